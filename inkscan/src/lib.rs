//! inkscan - Document image analysis building blocks
//!
//! # Overview
//!
//! - Image loading into packed-RGB bitmaps ([`io`])
//! - Run-length connected components with merge/split algebra, shape
//!   descriptors, hole counting and a compact byte codec ([`region`])
//! - Skew detection by transition counting ([`recog`])
//!
//! # Example
//!
//! ```
//! use inkscan::Bitmap;
//! use inkscan::region::ConnectedComponent;
//!
//! let bmp = Bitmap::from_rows(&[&[1, 1, 1], &[1, 0, 1], &[1, 1, 1]]).unwrap();
//! let cc = ConnectedComponent::from_bitmap(&bmp);
//! assert_eq!(cc.weight(), 8);
//! assert_eq!(cc.hole_count(), 1);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use inkscan_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use inkscan_io as io;
pub use inkscan_recog as recog;
pub use inkscan_region as region;
