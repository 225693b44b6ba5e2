//! Synthetic test images
//!
//! Shapes with known topology and text-like pages with known skew.  All
//! images use pure black for ink and white for background.

use inkscan_core::{BACKGROUND, Bitmap, FOREGROUND};

/// A `width` x `height` image that is entirely ink.
///
/// # Panics
///
/// Panics if either dimension is zero.
pub fn filled_rect(width: u32, height: u32) -> Bitmap {
    Bitmap::from_pixels(width, height, vec![FOREGROUND; (width * height) as usize])
        .expect("non-empty rectangle")
}

/// An `outer` x `outer` square of ink with a centered `inner` x `inner`
/// square of background cut out.
///
/// # Panics
///
/// Panics unless `outer >= inner + 2`.
pub fn annulus(outer: u32, inner: u32) -> Bitmap {
    assert!(outer >= inner + 2, "ring needs a border");
    let mut bmp = filled_rect(outer, outer);
    if inner > 0 {
        let from = (outer - inner) / 2;
        bmp.fill_rect(from, from, from + inner - 1, from + inner - 1, BACKGROUND);
    }
    bmp
}

/// `depth` concentric one-pixel square rings separated by one-pixel gaps.
///
/// The image is `4 * depth + 1` pixels wide; the innermost ring encloses a
/// 3x3 background square, so the rings enclose exactly `depth` separate
/// background regions.
pub fn nested_rings(depth: u32) -> Bitmap {
    let size = 4 * depth.max(1) + 1;
    let mut bmp = Bitmap::new(size, size).expect("non-empty ring image");
    for level in 0..depth {
        let lo = 2 * level;
        let hi = size - 1 - 2 * level;
        bmp.fill_rect(lo, lo, hi, lo, FOREGROUND);
        bmp.fill_rect(lo, hi, hi, hi, FOREGROUND);
        bmp.fill_rect(lo, lo, lo, hi, FOREGROUND);
        bmp.fill_rect(hi, lo, hi, hi, FOREGROUND);
    }
    bmp
}

/// Layout of a synthetic text page
#[derive(Debug, Clone, Copy)]
pub struct PageLayout {
    /// Page width in pixels
    pub width: u32,
    /// Page height in pixels
    pub height: u32,
    /// Distance between the tops of consecutive text lines
    pub line_pitch: u32,
    /// Height of the inked band of each text line
    pub line_height: u32,
    /// Blank rows above the first and below the last text line
    pub margin: u32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            width: 400,
            height: 320,
            line_pitch: 20,
            line_height: 10,
            margin: 40,
        }
    }
}

/// A page of horizontal text lines.
///
/// Each line is a band of "glyphs": 3-pixel vertical strokes separated by
/// 3-pixel gaps, grouped into words by a wider gap.  Rows inside a band
/// cross many strokes; rows between bands cross none.
pub fn text_page(layout: &PageLayout) -> Bitmap {
    let mut bmp = Bitmap::new(layout.width, layout.height).expect("non-empty page");
    let first = layout.margin;
    let last = layout.height.saturating_sub(layout.margin);
    let mut top = first;
    while top + layout.line_height <= last {
        for y in top..top + layout.line_height {
            for x in 0..layout.width {
                let in_stroke = (x / 3) % 2 == 0;
                let in_word = (x / 24) % 4 != 3;
                if in_stroke && in_word {
                    bmp.fill_rect(x, y, x, y, FOREGROUND);
                }
            }
        }
        top += layout.line_pitch;
    }
    bmp
}

/// Shear an image so that row `i` of the input runs along
/// `(i + round(j * tan(theta)), j)` in the output.
///
/// Pixels sheared off the page are dropped.  Sampling the result along the
/// same offsets recovers the input rows, which is how a skewed scan looks
/// to a transition-count skew search.
pub fn shear_rows(bitmap: &Bitmap, theta: f64) -> Bitmap {
    let (width, height) = (bitmap.width(), bitmap.height());
    let slope = theta.tan();
    let mut out = Bitmap::new(width, height).expect("non-empty page");
    for j in 0..width {
        let offset = (j as f64 * slope).round() as i64;
        for i in 0..height {
            let target = i as i64 + offset;
            if target < 0 || target >= height as i64 {
                continue;
            }
            if bitmap.is_foreground_at(j, i) {
                out.fill_rect(j, target as u32, j, target as u32, FOREGROUND);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annulus_pixel_count() {
        let bmp = annulus(7, 3);
        assert_eq!(bmp.count_foreground(), 49 - 9);
        assert!(!bmp.is_foreground_at(3, 3));
        assert!(bmp.is_foreground_at(1, 1));
    }

    #[test]
    fn test_nested_rings_layout() {
        let bmp = nested_rings(2);
        assert_eq!(bmp.width(), 9);
        assert!(bmp.is_foreground_at(0, 4));
        assert!(!bmp.is_foreground_at(1, 4));
        assert!(bmp.is_foreground_at(2, 4));
        assert!(!bmp.is_foreground_at(4, 4));
    }

    #[test]
    fn test_text_page_has_blank_gaps() {
        let layout = PageLayout::default();
        let page = text_page(&layout);
        let row_ink = |y: u32| (0..layout.width).filter(|&x| page.is_foreground_at(x, y)).count();
        assert_eq!(row_ink(0), 0);
        assert!(row_ink(layout.margin) > 0);
        assert_eq!(row_ink(layout.margin + layout.line_height), 0);
    }

    #[test]
    fn test_shear_zero_is_identity() {
        let page = text_page(&PageLayout::default());
        assert_eq!(shear_rows(&page, 0.0), page);
    }
}
