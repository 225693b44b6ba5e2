//! BoundBox - inclusive rectangle bounds
//!
//! Unlike a width/height rectangle, a `BoundBox` stores its four edges as
//! inclusive pixel coordinates.  A box whose `left > right` or
//! `top > bottom` is degenerate and stands for "no pixels"; its width or
//! height is reported as 0.

/// Inclusive rectangle given by its four edges
///
/// This is a simple Copy type; components hand out fresh copies rather
/// than references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundBox {
    /// Leftmost column
    pub left: i32,
    /// Rightmost column
    pub right: i32,
    /// Topmost row
    pub top: i32,
    /// Bottommost row
    pub bottom: i32,
}

impl BoundBox {
    /// The degenerate box containing no pixels.
    ///
    /// Growing it with [`BoundBox::expand`] yields exactly the expanded span.
    pub const EMPTY: BoundBox = BoundBox {
        left: i32::MAX,
        right: i32::MIN,
        top: i32::MAX,
        bottom: i32::MIN,
    };

    /// Create a box from its inclusive edges
    pub const fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Width in pixels, 0 when degenerate
    #[inline]
    pub fn width(&self) -> i32 {
        if self.right >= self.left {
            self.right - self.left + 1
        } else {
            0
        }
    }

    /// Height in pixels, 0 when degenerate
    #[inline]
    pub fn height(&self) -> i32 {
        if self.bottom >= self.top {
            self.bottom - self.top + 1
        } else {
            0
        }
    }

    /// Number of pixels covered
    #[inline]
    pub fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    /// Check if the box covers no pixels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Check if a point lies inside the box
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Grow the box to cover the horizontal span `[start, end]` on `row`
    #[inline]
    pub fn expand(&mut self, row: i32, start: i32, end: i32) {
        self.left = self.left.min(start);
        self.right = self.right.max(end);
        self.top = self.top.min(row);
        self.bottom = self.bottom.max(row);
    }

    /// Smallest box covering both boxes
    pub fn union(&self, other: &BoundBox) -> BoundBox {
        BoundBox {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
            top: self.top.min(other.top),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

impl Default for BoundBox {
    fn default() -> Self {
        Self::EMPTY
    }
}
