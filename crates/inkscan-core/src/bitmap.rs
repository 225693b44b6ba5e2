//! Bitmap - binarized page image
//!
//! A `Bitmap` is a rectangular, row-major buffer of packed RGB pixels.
//! Only the RGB bits take part in foreground classification, so images
//! carrying an alpha channel in the upper byte classify the same way as
//! opaque ones.

use crate::error::{Error, Result};

/// Mask selecting the RGB bits of a packed pixel
const RGB_MASK: u32 = 0x00ff_ffff;

/// Canonical foreground (pure black) pixel value
pub const FOREGROUND: u32 = 0x0000_0000;

/// Canonical background (white) pixel value
pub const BACKGROUND: u32 = 0x00ff_ffff;

/// Whether a packed pixel is foreground (all RGB bits zero).
#[inline]
pub fn is_foreground(pixel: u32) -> bool {
    pixel & RGB_MASK == 0
}

/// Binarized page image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl Bitmap {
    /// Create a bitmap filled with background pixels
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![BACKGROUND; width as usize * height as usize],
        })
    }

    /// Wrap an existing row-major pixel buffer
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or if `data` does not
    /// hold exactly `width * height` pixels.
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::BufferLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a bitmap from rows of 0/1 flags, where 1 marks foreground.
    ///
    /// Handy for small hand-drawn shapes.  All rows must have the same
    /// length.
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for row in rows {
            if row.len() != width as usize {
                return Err(Error::InvalidParameter(format!(
                    "ragged rows: expected width {}, got {}",
                    width,
                    row.len()
                )));
            }
            data.extend(
                row.iter()
                    .map(|&v| if v != 0 { FOREGROUND } else { BACKGROUND }),
            );
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Get the width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the raw row-major pixel data
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Get the pixels of one row
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u32] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Get a pixel value, or `None` when out of bounds
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.data[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Whether the pixel at (x, y) is foreground; out of bounds is background
    pub fn is_foreground_at(&self, x: u32, y: u32) -> bool {
        self.get_pixel(x, y).is_some_and(is_foreground)
    }

    /// Set a pixel value
    ///
    /// # Errors
    ///
    /// Returns an error if (x, y) lies outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.data[y as usize * self.width as usize + x as usize] = value;
        Ok(())
    }

    /// Paint the inclusive rectangle `[left, right] x [top, bottom]`,
    /// clipped to the image.
    pub fn fill_rect(&mut self, left: u32, top: u32, right: u32, bottom: u32, value: u32) {
        if left >= self.width || top >= self.height {
            return;
        }
        let right = right.min(self.width - 1);
        let bottom = bottom.min(self.height - 1);
        if left > right || top > bottom {
            return;
        }
        for y in top..=bottom {
            let start = y as usize * self.width as usize;
            self.data[start + left as usize..=start + right as usize].fill(value);
        }
    }

    /// Count foreground pixels
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&p| is_foreground(p)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreground_ignores_alpha() {
        assert!(is_foreground(0x0000_0000));
        assert!(is_foreground(0xff00_0000));
        assert!(!is_foreground(0xff00_0001));
        assert!(!is_foreground(BACKGROUND));
    }

    #[test]
    fn test_new_is_background() {
        let bmp = Bitmap::new(4, 3).unwrap();
        assert_eq!(bmp.width(), 4);
        assert_eq!(bmp.height(), 3);
        assert_eq!(bmp.count_foreground(), 0);
        assert!(Bitmap::new(0, 3).is_err());
    }

    #[test]
    fn test_from_pixels_length_check() {
        assert!(Bitmap::from_pixels(2, 2, vec![0; 3]).is_err());
        let bmp = Bitmap::from_pixels(2, 2, vec![0, BACKGROUND, BACKGROUND, 0]).unwrap();
        assert!(bmp.is_foreground_at(0, 0));
        assert!(!bmp.is_foreground_at(1, 0));
        assert!(bmp.is_foreground_at(1, 1));
    }

    #[test]
    fn test_from_rows() {
        let bmp = Bitmap::from_rows(&[&[1, 0, 1], &[0, 1, 0]]).unwrap();
        assert_eq!(bmp.count_foreground(), 3);
        assert!(bmp.is_foreground_at(2, 0));
        assert!(Bitmap::from_rows(&[&[1, 0], &[1]]).is_err());
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut bmp = Bitmap::new(5, 5).unwrap();
        bmp.fill_rect(3, 3, 10, 10, FOREGROUND);
        assert_eq!(bmp.count_foreground(), 4);
        bmp.fill_rect(7, 0, 9, 2, FOREGROUND);
        assert_eq!(bmp.count_foreground(), 4);
    }

    #[test]
    fn test_set_pixel_bounds() {
        let mut bmp = Bitmap::new(2, 2).unwrap();
        assert!(bmp.set_pixel(1, 1, FOREGROUND).is_ok());
        assert!(bmp.set_pixel(2, 0, FOREGROUND).is_err());
        assert_eq!(bmp.row(1), &[BACKGROUND, FOREGROUND]);
        assert_eq!(bmp.get_pixel(5, 5), None);
    }
}
