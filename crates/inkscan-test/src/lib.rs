//! inkscan-test - regression harness and synthetic images
//!
//! - [`RegParams`] numbers each check and collects failures, so a single
//!   run of a `*_reg` test reports every mismatch at once
//! - [`fixtures`] draws images whose answers are known in advance: hole
//!   counts, stroke counts and skew angles
//!
//! ```
//! use inkscan_test::RegParams;
//! use inkscan_test::fixtures::annulus;
//!
//! let mut rp = RegParams::new("fixtures");
//! rp.compare_values(40.0, annulus(7, 3).count_foreground() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! Set `REGTEST_MODE=display` to have tests print intermediate results.

pub mod fixtures;
mod params;

pub use params::{Failure, RegParams, RegTestMode};
