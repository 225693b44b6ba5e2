//! Rasterizing components back to pixel grids

use std::fmt;

use crate::conncomp::ConnectedComponent;

impl ConnectedComponent {
    /// Rasterize into rows of 0/1 flags covering the bounding box
    pub fn to_pixel_rows(&self) -> Vec<Vec<u8>> {
        let width = self.width() as usize;
        let mut rows = vec![vec![0u8; width]; self.height() as usize];
        for run in &self.runs {
            let i = (run.row() - self.bounds.top) as usize;
            if let Some(row) = rows.get_mut(i) {
                row[self.local_columns(run)].fill(1);
            }
        }
        rows
    }

    /// Rasterize into a flat row-major buffer of 0/1 flags
    pub fn to_pixels(&self) -> Vec<u8> {
        self.to_pixel_rows().concat()
    }
}

impl fmt::Display for ConnectedComponent {
    /// Draws the component as lines of `0` and `1`, one per row
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_pixel_rows() {
            for px in row {
                write!(f, "{px}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
