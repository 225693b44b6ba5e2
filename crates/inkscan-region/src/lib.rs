//! inkscan-region - Run-length connected components
//!
//! This crate provides the component side of the preprocessing core:
//!
//! - **Run-length components** - [`RunLength`] and [`ConnectedComponent`],
//!   with insertion, merge, split and normalization
//! - **Shape descriptors** - crossing profiles, moments, orientation,
//!   density and hole count
//! - **Serialization** - a compact byte format for storing components
//!
//! # Examples
//!
//! ## Extracting and measuring a component
//!
//! ```
//! use inkscan_core::Bitmap;
//! use inkscan_region::ConnectedComponent;
//!
//! let bmp = Bitmap::from_rows(&[
//!     &[1, 1, 1],
//!     &[1, 0, 1],
//!     &[1, 1, 1],
//! ])
//! .unwrap();
//!
//! let mut cc = ConnectedComponent::from_bitmap(&bmp);
//! cc.fix();
//! assert_eq!(cc.weight(), 8);
//! assert_eq!(cc.hole_count(), 1);
//! assert_eq!(cc.horizontal_crossing(), vec![1, 2, 1]);
//! ```
//!
//! ## Splitting and merging
//!
//! ```
//! use inkscan_region::{ConnectedComponent, RunLength};
//!
//! let mut cc = ConnectedComponent::from_run(RunLength::new(0, 0, 9).unwrap());
//! let right = cc.split_horizontally(4);
//! assert_eq!((cc.weight(), right.weight()), (5, 5));
//!
//! cc.combine_with(right);
//! cc.fix();
//! assert_eq!(cc.runs(), &[RunLength::new(0, 0, 9).unwrap()]);
//! ```

pub mod conncomp;
pub mod descriptor;
pub mod error;
pub mod holes;
pub mod render;
pub mod runlength;
pub mod serial;

// Re-export core types
pub use inkscan_core;

pub use conncomp::ConnectedComponent;
pub use error::{RegionError, RegionResult};
pub use runlength::RunLength;
pub use serial::{MAX_SERIAL_EXTENT, MAX_SERIAL_HEIGHT};
