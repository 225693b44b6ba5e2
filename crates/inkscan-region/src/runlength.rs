//! RunLength - a horizontal span of foreground pixels
//!
//! A run is stored as its row, its starting column and a `count` equal to
//! `length - 1`, so a single pixel has count 0 and the last covered column
//! is `start + count`.
//!
//! Runs order by (row, start) and then by end column.  The derived
//! ordering relies on the field order below.

use crate::error::{RegionError, RegionResult};

/// A maximal horizontal run of foreground pixels on one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunLength {
    row: i32,
    start: i32,
    count: i32,
}

impl RunLength {
    /// Create a new run
    ///
    /// # Errors
    ///
    /// Returns an error if any of `row`, `start` or `count` is negative.
    pub fn new(row: i32, start: i32, count: i32) -> RegionResult<Self> {
        if row < 0 || start < 0 || count < 0 {
            return Err(RegionError::InvalidRun { row, start, count });
        }
        Ok(Self { row, start, count })
    }

    /// Create a run without validation
    pub const fn new_unchecked(row: i32, start: i32, count: i32) -> Self {
        Self { row, start, count }
    }

    /// Row index
    #[inline]
    pub fn row(&self) -> i32 {
        self.row
    }

    /// First covered column
    #[inline]
    pub fn start(&self) -> i32 {
        self.start
    }

    /// Number of covered columns minus one
    #[inline]
    pub fn count(&self) -> i32 {
        self.count
    }

    /// Last covered column (inclusive)
    #[inline]
    pub fn end(&self) -> i32 {
        self.start + self.count
    }

    /// Number of covered pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.count as usize + 1
    }

    /// The same run stretched or shrunk so that it ends at `end`
    #[inline]
    pub(crate) fn with_end(self, end: i32) -> Self {
        Self {
            count: end - self.start,
            ..self
        }
    }

    /// Cut the run after column `x`.
    ///
    /// Requires `start <= x < end`; returns `[start, x]` and `[x + 1, end]`.
    pub(crate) fn split_after(self, x: i32) -> (Self, Self) {
        let tail = Self {
            row: self.row,
            start: x + 1,
            count: self.end() - x - 1,
        };
        (self.with_end(x), tail)
    }
}
