//! Skew detection
//!
//! A skewed page is detected by shearing the scanlines instead of rotating
//! the image.  For a candidate angle `theta`, column `j` is shifted down by
//! `round(j * tan(theta))` rows and every sheared scanline is walked once.
//!
//! # Transition count cost
//!
//! Along each sheared scanline the number of foreground/background
//! changes is counted.  When the scanlines follow the text lines, rows
//! through the text cross many strokes and rows between lines cross none,
//! so the counts spread out.  The cost is the negated variance of the
//! per-row counts: the true skew angle minimizes it.
//!
//! # Search
//!
//! Choosing which angles to evaluate is left to a [`SearchStrategy`].  A
//! [`SearchDetector`] binds a cost function and a strategy to an angle
//! range and implements [`SkewDetector`].

use inkscan_core::{Bitmap, is_foreground};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{RecogError, RecogResult};

/// Default half-width of the searched angle range in degrees
const DEFAULT_RANGE_DEGREES: f64 = 7.0;

/// Transition-count cost of `pixels` sheared by `theta` radians.
///
/// Scanline `i` visits `(i + round(j * tan(theta)), j)` for every column
/// `j`; positions sheared off the image are skipped.  The walk starts in
/// background, so a scanline beginning on ink counts one transition.
///
/// # Arguments
///
/// * `pixels` - Row-major `width` x `height` raster of packed RGB values;
///   pixels missing from a short buffer read as background
/// * `width`, `height` - Raster dimensions
/// * `theta` - Shear angle in radians.  Any value is accepted: near
///   `pi/2` nearly every sample falls off the image, and NaN shears
///   nothing.
///
/// # Returns
///
/// `-(sum(c^2) - sum(c)^2 / height) / height` over the per-row counts `c`,
/// or 0 for an empty raster.  Never panics.
pub fn transition_count_cost(pixels: &[u32], width: usize, height: usize, theta: f64) -> f64 {
    if width == 0 || height == 0 {
        return 0.0;
    }
    let slope = theta.tan();
    // an offset beyond the height only ever lands off the image
    let rows = height as i64;
    let offsets: Vec<i64> = (0..width)
        .map(|j| ((j as f64 * slope).round() as i64).clamp(-rows, rows))
        .collect();

    let mut sum = 0.0;
    let mut sqsum = 0.0;
    for i in 0..rows {
        let mut count = 0u64;
        let mut ink = false;
        for (j, &offset) in offsets.iter().enumerate() {
            let y = i + offset;
            if y < 0 || y >= rows {
                continue;
            }
            let fg = pixels
                .get(y as usize * width + j)
                .copied()
                .is_some_and(is_foreground);
            if fg != ink {
                ink = fg;
                count += 1;
            }
        }
        let c = count as f64;
        sum += c;
        sqsum += c * c;
    }
    let h = height as f64;
    -(sqsum - sum * sum / h) / h
}

/// A cost function over candidate skew angles; lower is better
pub trait SkewCost {
    /// Cost of the raster sheared by `theta` radians
    fn cost(&self, pixels: &[u32], width: usize, height: usize, theta: f64) -> f64;
}

/// The transition-count cost, see [`transition_count_cost`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionCount;

impl SkewCost for TransitionCount {
    fn cost(&self, pixels: &[u32], width: usize, height: usize, theta: f64) -> f64 {
        transition_count_cost(pixels, width, height, theta)
    }
}

/// Closed range of candidate angles in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleRange {
    /// Smallest angle to consider
    pub min: f64,
    /// Largest angle to consider
    pub max: f64,
}

impl Default for AngleRange {
    fn default() -> Self {
        Self::symmetric(DEFAULT_RANGE_DEGREES.to_radians())
    }
}

impl AngleRange {
    /// Create a range from its ends
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The range `[-half, half]`
    pub fn symmetric(half: f64) -> Self {
        Self::new(-half, half)
    }

    /// Set the lower end
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = min;
        self
    }

    /// Set the upper end
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = max;
        self
    }

    /// Width of the range
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether `theta` lies in the range (ends included)
    pub fn contains(&self, theta: f64) -> bool {
        theta >= self.min && theta <= self.max
    }

    /// Validate the range
    ///
    /// Both ends must be finite and strictly inside `(-pi/2, pi/2)`, where
    /// the shear offsets stay bounded, and `min` must be below `max`.
    pub fn validate(&self) -> RecogResult<()> {
        let limit = std::f64::consts::FRAC_PI_2;
        for (name, value) in [("min", self.min), ("max", self.max)] {
            if !value.is_finite() || value.abs() >= limit {
                return Err(RecogError::InvalidParameter(format!(
                    "{name} angle {value} must lie strictly between -pi/2 and pi/2"
                )));
            }
        }
        if self.min >= self.max {
            return Err(RecogError::InvalidParameter(format!(
                "min angle {} must be less than max angle {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Strategy choosing which angles to evaluate.
///
/// `search` receives the cost as a function of the angle and returns the
/// angle it settles on.  Any function or closure with the same signature
/// is a strategy.
pub trait SearchStrategy {
    /// Search `range` for the angle of lowest cost
    fn search(&self, cost: &(dyn Fn(f64) -> f64 + Sync), range: AngleRange) -> f64;
}

impl<F> SearchStrategy for F
where
    F: Fn(&(dyn Fn(f64) -> f64 + Sync), AngleRange) -> f64,
{
    fn search(&self, cost: &(dyn Fn(f64) -> f64 + Sync), range: AngleRange) -> f64 {
        self(cost, range)
    }
}

/// Detector of page skew
pub trait SkewDetector {
    /// Detect the skew of `image`, in radians
    fn detect(&self, image: &Bitmap) -> RecogResult<f64>;
}

/// Skew detector that searches a cost function over an angle range
#[derive(Debug, Clone)]
pub struct SearchDetector<C, S> {
    cost: C,
    strategy: S,
    range: AngleRange,
}

/// Search detector using the transition-count cost
pub type TransitionCountDetector<S> = SearchDetector<TransitionCount, S>;

impl<C, S> SearchDetector<C, S> {
    /// Create a detector searching the default range
    pub fn new(cost: C, strategy: S) -> Self {
        Self {
            cost,
            strategy,
            range: AngleRange::default(),
        }
    }

    /// Set the searched range
    pub fn with_range(mut self, range: AngleRange) -> Self {
        self.range = range;
        self
    }

    /// The searched range
    pub fn range(&self) -> AngleRange {
        self.range
    }
}

impl<S> TransitionCountDetector<S> {
    /// Create a transition-count detector around `strategy`
    pub fn with_strategy(strategy: S) -> Self {
        Self::new(TransitionCount, strategy)
    }
}

impl<C, S> SkewDetector for SearchDetector<C, S>
where
    C: SkewCost + Sync,
    S: SearchStrategy,
{
    /// Fails with [`RecogError::InvalidParameter`] for an invalid range and
    /// [`RecogError::EmptyImage`] for an image without ink.
    fn detect(&self, image: &Bitmap) -> RecogResult<f64> {
        self.range.validate()?;
        if image.count_foreground() == 0 {
            return Err(RecogError::EmptyImage);
        }
        let (width, height) = (image.width() as usize, image.height() as usize);
        let pixels = image.data();
        // borrow only the cost so the closure does not require `S: Sync`
        let scorer = &self.cost;
        let cost = |theta: f64| scorer.cost(pixels, width, height, theta);
        let angle = self.strategy.search(&cost, self.range);
        debug!(
            angle,
            degrees = angle.to_degrees(),
            width,
            height,
            "detected skew"
        );
        Ok(angle)
    }
}

/// Evaluate `cost` on `image` at each of `angles`.
///
/// The results line up with `angles`.  With the `parallel` feature the
/// angles are evaluated on the rayon thread pool.
pub fn evaluate_angles<C>(cost: &C, image: &Bitmap, angles: &[f64]) -> Vec<f64>
where
    C: SkewCost + Sync,
{
    let (width, height) = (image.width() as usize, image.height() as usize);
    let pixels = image.data();
    #[cfg(feature = "parallel")]
    {
        angles
            .par_iter()
            .map(|&theta| cost.cost(pixels, width, height, theta))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        angles
            .iter()
            .map(|&theta| cost.cost(pixels, width, height, theta))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkscan_core::{BACKGROUND, FOREGROUND};

    const STEPS: usize = 140;

    fn grid_sweep(cost: &(dyn Fn(f64) -> f64 + Sync), range: AngleRange) -> f64 {
        let step = range.span() / STEPS as f64;
        let mut best = (range.min, cost(range.min));
        for k in 1..=STEPS {
            let theta = range.min + step * k as f64;
            let c = cost(theta);
            if c < best.1 {
                best = (theta, c);
            }
        }
        best.0
    }

    #[test]
    fn test_cost_small_raster() {
        let pixels = [
            FOREGROUND, BACKGROUND, FOREGROUND, //
            BACKGROUND, BACKGROUND, BACKGROUND,
        ];
        // counts 3 and 0
        let c = transition_count_cost(&pixels, 3, 2, 0.0);
        assert!((c - -2.25).abs() < 1e-12);
    }

    #[test]
    fn test_cost_uniform_counts_is_zero() {
        let pixels = [FOREGROUND; 12];
        assert_eq!(transition_count_cost(&pixels, 4, 3, 0.0), 0.0);
        assert_eq!(transition_count_cost(&pixels, 4, 3, 0.2), 0.0);
    }

    #[test]
    fn test_cost_empty_raster() {
        assert_eq!(transition_count_cost(&[], 0, 0, 0.1), 0.0);
        assert_eq!(transition_count_cost(&[], 5, 0, 0.1), 0.0);
    }

    #[test]
    fn test_cost_steep_angles_do_not_overflow() {
        let pixels = vec![FOREGROUND; 4000];
        // only column 0 stays on the page: one transition per row
        let vertical = transition_count_cost(&pixels, 1000, 4, std::f64::consts::FRAC_PI_2);
        assert_eq!(vertical, 0.0);
        let backwards = transition_count_cost(&pixels, 1000, 4, -std::f64::consts::FRAC_PI_2);
        assert_eq!(backwards, 0.0);
        assert_eq!(transition_count_cost(&pixels, 1000, 4, f64::NAN), 0.0);
        assert_eq!(transition_count_cost(&pixels, 1000, 4, f64::INFINITY), 0.0);
        let costs = evaluate_angles(
            &TransitionCount,
            &Bitmap::from_pixels(1000, 4, pixels).unwrap(),
            &[1.5, -1.5, 1.57],
        );
        assert!(costs.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_detect_with_unsync_strategy() {
        use std::cell::Cell;

        struct CountingSweep {
            calls: Cell<usize>,
        }

        impl SearchStrategy for CountingSweep {
            fn search(&self, cost: &(dyn Fn(f64) -> f64 + Sync), range: AngleRange) -> f64 {
                self.calls.set(self.calls.get() + 1);
                grid_sweep(cost, range)
            }
        }

        let detector = SearchDetector::new(
            TransitionCount,
            CountingSweep {
                calls: Cell::new(0),
            },
        );
        let page = Bitmap::from_rows(&[&[1, 0, 1, 0], &[0, 0, 0, 0]]).unwrap();
        let angle = detector.detect(&page).unwrap();
        assert!(detector.range().contains(angle));
        assert_eq!(detector.strategy.calls.get(), 1);
    }

    #[test]
    fn test_angle_range_default() {
        let range = AngleRange::default();
        assert!((range.max - 7.0f64.to_radians()).abs() < 1e-12);
        assert_eq!(range.min, -range.max);
        assert!(range.validate().is_ok());
        assert!(range.contains(0.0));
        assert!(!range.contains(0.2));
    }

    #[test]
    fn test_angle_range_validate() {
        assert!(AngleRange::new(0.1, -0.1).validate().is_err());
        assert!(AngleRange::new(0.1, 0.1).validate().is_err());
        assert!(AngleRange::symmetric(2.0).validate().is_err());
        assert!(AngleRange::default().with_max(f64::NAN).validate().is_err());
        assert!(AngleRange::default().with_min(0.0).validate().is_ok());
    }

    #[test]
    fn test_detect_rejects_empty_image() {
        let detector = TransitionCountDetector::with_strategy(grid_sweep);
        let blank = Bitmap::new(8, 8).unwrap();
        assert!(matches!(
            detector.detect(&blank),
            Err(RecogError::EmptyImage)
        ));
    }

    #[test]
    fn test_detect_rejects_invalid_range() {
        let detector = TransitionCountDetector::with_strategy(grid_sweep)
            .with_range(AngleRange::new(0.3, 0.1));
        let page = Bitmap::from_rows(&[&[1, 0, 1]]).unwrap();
        assert!(matches!(
            detector.detect(&page),
            Err(RecogError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_strategy_sees_range() {
        fn upper_end(_: &(dyn Fn(f64) -> f64 + Sync), range: AngleRange) -> f64 {
            range.max
        }
        let detector = TransitionCountDetector::with_strategy(upper_end)
            .with_range(AngleRange::symmetric(0.25));
        let page = Bitmap::from_rows(&[&[1, 0, 1]]).unwrap();
        assert_eq!(detector.detect(&page).unwrap(), 0.25);
    }

    #[test]
    fn test_evaluate_angles_matches_cost() {
        let page = Bitmap::from_rows(&[&[1, 0, 1, 0], &[0, 1, 1, 0], &[0, 0, 0, 0]]).unwrap();
        let angles = [-0.3, 0.0, 0.1, 0.4];
        let costs = evaluate_angles(&TransitionCount, &page, &angles);
        assert_eq!(costs.len(), angles.len());
        for (&theta, &c) in angles.iter().zip(&costs) {
            assert_eq!(c, transition_count_cost(page.data(), 4, 3, theta));
        }
    }
}
