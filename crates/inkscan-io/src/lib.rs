//! inkscan IO - Image decoding
//!
//! Loads image files through the `image` crate and converts them into the
//! packed-RGB [`Bitmap`] used by the rest of inkscan.  Any format the
//! enabled `image` features support can be read (PNG, JPEG, BMP, PNM,
//! TIFF, GIF).  The format is detected from the file contents, not the
//! extension.
//!
//! Only pure black pixels count as ink afterwards, so callers are expected
//! to binarize scans before loading them.

pub mod error;

pub use error::{IoError, IoResult};

use std::path::Path;

use image::RgbImage;
use inkscan_core::Bitmap;
use tracing::debug;

/// Read an image file into a bitmap
pub fn read_bitmap<P: AsRef<Path>>(path: P) -> IoResult<Bitmap> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let bitmap = decode_bitmap(&data)?;
    debug!(
        path = %path.display(),
        width = bitmap.width(),
        height = bitmap.height(),
        "loaded bitmap"
    );
    Ok(bitmap)
}

/// Decode an in-memory encoded image into a bitmap
pub fn decode_bitmap(data: &[u8]) -> IoResult<Bitmap> {
    let img = image::load_from_memory(data)?;
    bitmap_from_rgb(&img.to_rgb8())
}

/// Pack an 8-bit RGB image into a bitmap.
///
/// Each pixel becomes `0x00RRGGBB`.
pub fn bitmap_from_rgb(img: &RgbImage) -> IoResult<Bitmap> {
    let data = img
        .pixels()
        .map(|p| {
            let [r, g, b] = p.0;
            ((r as u32) << 16) | ((g as u32) << 8) | b as u32
        })
        .collect();
    Ok(Bitmap::from_pixels(img.width(), img.height(), data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb};
    use std::io::Cursor;

    fn checker() -> RgbImage {
        RgbImage::from_fn(4, 3, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        })
    }

    #[test]
    fn test_bitmap_from_rgb_packs_channels() {
        let img = RgbImage::from_pixel(2, 1, Rgb([0x12, 0x34, 0x56]));
        let bmp = bitmap_from_rgb(&img).unwrap();
        assert_eq!(bmp.get_pixel(1, 0), Some(0x123456));
        assert!(!bmp.is_foreground_at(0, 0));
    }

    #[test]
    fn test_decode_png() {
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(checker())
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        let bmp = decode_bitmap(&buf).unwrap();
        assert_eq!((bmp.width(), bmp.height()), (4, 3));
        assert!(bmp.is_foreground_at(0, 0));
        assert!(!bmp.is_foreground_at(1, 0));
        assert_eq!(bmp.count_foreground(), 6);
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode_bitmap(b"not an image"),
            Err(IoError::Decode(_))
        ));
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            read_bitmap("/nonexistent/inkscan/page.png"),
            Err(IoError::Io(_))
        ));
    }
}
