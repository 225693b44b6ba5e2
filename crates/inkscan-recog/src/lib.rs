//! inkscan Recog - OCR preprocessing
//!
//! Currently provides skew detection: a search over candidate angles that
//! minimizes the transition-count cost of a page.
//!
//! ```
//! use inkscan_core::Bitmap;
//! use inkscan_recog::skew::{AngleRange, SkewDetector, TransitionCountDetector};
//!
//! // Pick the cheapest of a handful of evenly spaced angles
//! fn coarse(cost: &(dyn Fn(f64) -> f64 + Sync), range: AngleRange) -> f64 {
//!     let step = range.span() / 8.0;
//!     (0..=8)
//!         .map(|k| range.min + step * k as f64)
//!         .fold((0.0, f64::INFINITY), |best, a| {
//!             let c = cost(a);
//!             if c < best.1 { (a, c) } else { best }
//!         })
//!         .0
//! }
//!
//! let page = Bitmap::from_rows(&[&[1, 0, 1, 0], &[0, 0, 0, 0]]).unwrap();
//! let detector = TransitionCountDetector::with_strategy(coarse);
//! let angle = detector.detect(&page).unwrap();
//! assert!(AngleRange::default().contains(angle));
//! ```

pub mod error;
pub mod skew;

pub use error::{RecogError, RecogResult};
pub use skew::{
    AngleRange, SearchDetector, SearchStrategy, SkewCost, SkewDetector, TransitionCount,
    TransitionCountDetector, evaluate_angles, transition_count_cost,
};
