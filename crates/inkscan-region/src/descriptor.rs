//! Shape descriptors of connected components
//!
//! Crossing profiles, image moments, orientation and density.  All
//! descriptors are computed relative to the component's bounding box and
//! return zeros for empty components.  Crossing counts assume a
//! normalized component (see [`ConnectedComponent::fix`]).

use crate::conncomp::ConnectedComponent;
use crate::runlength::RunLength;

impl ConnectedComponent {
    /// Number of runs on each row of the bounding box.
    ///
    /// Entry `i` is the number of separate strokes crossed by row
    /// `top + i`.
    pub fn horizontal_crossing(&self) -> Vec<u32> {
        let mut cross = vec![0u32; self.height() as usize];
        for run in &self.runs {
            let i = (run.row() - self.bounds.top) as usize;
            if let Some(c) = cross.get_mut(i) {
                *c += 1;
            }
        }
        cross
    }

    /// Number of vertical strokes on each column of the bounding box.
    ///
    /// Rows are swept top to bottom while remembering which columns were
    /// foreground on the previous row; a column counts a new stroke each
    /// time it turns foreground.
    pub fn vertical_crossing(&self) -> Vec<u32> {
        let width = self.width() as usize;
        let mut cross = vec![0u32; width];
        if width == 0 || self.height() == 0 {
            return cross;
        }
        let mut above = vec![false; width];
        let mut current = vec![false; width];
        let mut runs = self.runs.iter().peekable();

        for row in self.bounds.top..=self.bounds.bottom {
            current.fill(false);
            while let Some(run) = runs.next_if(|r| r.row() == row) {
                for k in self.local_columns(run) {
                    if !above[k] && !current[k] {
                        cross[k] += 1;
                    }
                    current[k] = true;
                }
            }
            std::mem::swap(&mut above, &mut current);
        }
        cross
    }

    /// Box-relative column indices covered by `run`, clipped to the box
    pub(crate) fn local_columns(&self, run: &RunLength) -> std::ops::Range<usize> {
        let width = self.width().max(0);
        let from = (run.start() - self.bounds.left).clamp(0, width);
        let to = (run.end() - self.bounds.left + 1).clamp(from, width);
        from as usize..to as usize
    }

    /// Raw moment `M(p, q)`.
    ///
    /// The mean of `x^p * y^q` over all foreground pixels, with `x` and `y`
    /// measured from the top-left corner of the bounding box.
    pub fn moment(&self, p: i32, q: i32) -> f64 {
        let weight = self.weight();
        if weight == 0 {
            return 0.0;
        }
        let x0 = self.bounds.left as f64;
        let y0 = self.bounds.top as f64;
        self.power_sum(p, q, x0, y0) / weight as f64
    }

    /// Scale-normalized central moment `mu(p, q)`.
    ///
    /// Measured from the centroid and divided by
    /// `weight^((p + q) / 2 + 1)`.
    pub fn central_moment(&self, p: i32, q: i32) -> f64 {
        let weight = self.weight();
        if weight == 0 {
            return 0.0;
        }
        let x_mean = self.moment(1, 0) + self.bounds.left as f64;
        let y_mean = self.moment(0, 1) + self.bounds.top as f64;
        let norm = (weight as f64).powf((p + q) as f64 * 0.5 + 1.0);
        self.power_sum(p, q, x_mean, y_mean) / norm
    }

    fn power_sum(&self, p: i32, q: i32, x0: f64, y0: f64) -> f64 {
        let mut sum = 0.0;
        for run in &self.runs {
            let dy = (run.row() as f64 - y0).powi(q);
            let row_sum: f64 = (run.start()..=run.end())
                .map(|x| (x as f64 - x0).powi(p))
                .sum();
            sum += row_sum * dy;
        }
        sum
    }

    /// Angle of the principal axis in radians, in `(-pi/2, pi/2]`
    pub fn orientation(&self) -> f64 {
        let mu11 = self.central_moment(1, 1);
        let mu20 = self.central_moment(2, 0);
        let mu02 = self.central_moment(0, 2);
        0.5 * (2.0 * mu11).atan2(mu20 - mu02)
    }

    /// Fraction of the bounding box covered by foreground
    pub fn density(&self) -> f64 {
        let area = self.bounds.area();
        if area == 0 {
            return 0.0;
        }
        self.weight() as f64 / area as f64
    }

    /// Horizontal centroid as a fraction of the box width
    pub fn center_x(&self) -> f64 {
        match self.width() {
            0 => 0.0,
            w => self.moment(1, 0) / w as f64,
        }
    }

    /// Vertical centroid as a fraction of the box height
    pub fn center_y(&self) -> f64 {
        match self.height() {
            0 => 0.0,
            h => self.moment(0, 1) / h as f64,
        }
    }
}
