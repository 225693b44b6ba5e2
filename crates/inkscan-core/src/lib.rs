//! inkscan Core - Basic data structures for document image preprocessing
//!
//! This crate provides the fundamental data structures shared by the
//! other inkscan crates:
//!
//! - [`Bitmap`] - Row-major buffer of packed RGB pixels
//! - [`BoundBox`] - Inclusive rectangle used as a component's bounds
//!
//! # Pixel convention
//!
//! Pixels are stored as `0x__RRGGBB`; the upper byte is ignored.  A pixel
//! is foreground (ink) only when all of its RGB bits are zero, i.e. pure
//! black.  Every other value is background.

pub mod bitmap;
pub mod bound_box;
pub mod error;

pub use bitmap::{BACKGROUND, Bitmap, FOREGROUND, is_foreground};
pub use bound_box::BoundBox;
pub use error::{Error, Result};
