//! Hole counting
//!
//! Counts the background regions enclosed by a component in one
//! top-to-bottom sweep.  Background cells are labeled on the fly and
//! labels that meet are joined in a union-find forest addressed by label
//! index.  The box is padded by one background column on each side and
//! the row above the box is treated as exterior, so every background
//! region reaching the box border joins the exterior class.

use crate::conncomp::ConnectedComponent;

/// Label of the exterior background class
const EXTERIOR: u32 = 0;

/// Union-find forest over background labels
///
/// Joining two classes always makes the lower root the parent, so the
/// exterior class keeps label 0 as its root.
struct LabelForest {
    parent: Vec<u32>,
}

impl LabelForest {
    fn new() -> Self {
        Self {
            parent: vec![EXTERIOR],
        }
    }

    fn mint(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    fn find(&mut self, mut label: u32) -> u32 {
        while self.parent[label as usize] != label {
            let grandparent = self.parent[self.parent[label as usize] as usize];
            self.parent[label as usize] = grandparent;
            label = grandparent;
        }
        label
    }

    fn union(&mut self, a: u32, b: u32) -> u32 {
        let ra = self.find(a);
        let rb = self.find(b);
        let (low, high) = if ra <= rb { (ra, rb) } else { (rb, ra) };
        self.parent[high as usize] = low;
        low
    }

    /// Number of classes other than the exterior
    fn enclosed_classes(&self) -> usize {
        self.parent
            .iter()
            .enumerate()
            .skip(1)
            .filter(|&(label, &parent)| label as u32 == parent)
            .count()
    }
}

impl ConnectedComponent {
    /// Number of holes (background regions fully enclosed by the component)
    ///
    /// Background is 8-connected: a background cell joins its left
    /// neighbour and its three neighbours on the row above.  A gap touching
    /// the outside only at a corner therefore does not close a hole.
    ///
    /// # Returns
    ///
    /// The count of enclosed background regions; 0 for an empty component.
    /// Runs should be sorted (any component built through the public API
    /// is); overlapping runs are fine.
    pub fn hole_count(&self) -> usize {
        let width = self.width() as usize;
        if width == 0 || self.height() == 0 {
            return 0;
        }
        let cols = width + 2;
        let mut forest = LabelForest::new();
        // None marks foreground
        let mut above: Vec<Option<u32>> = vec![Some(EXTERIOR); cols];
        let mut current: Vec<Option<u32>> = vec![None; cols];
        let mut ink = vec![false; cols];
        let mut runs = self.runs.iter().peekable();

        for row in self.bounds.top..=self.bounds.bottom {
            ink.fill(false);
            while let Some(run) = runs.next_if(|r| r.row() == row) {
                for k in self.local_columns(run) {
                    ink[k + 1] = true;
                }
            }

            current[0] = Some(EXTERIOR);
            for k in 1..cols {
                if ink[k] {
                    current[k] = None;
                    continue;
                }
                let neighbours = [
                    above[k - 1],
                    above[k],
                    above.get(k + 1).copied().flatten(),
                    current[k - 1],
                ];
                let mut label = None;
                for n in neighbours.into_iter().flatten() {
                    label = Some(match label {
                        None => forest.find(n),
                        Some(l) => forest.union(l, n),
                    });
                }
                current[k] = Some(label.unwrap_or_else(|| forest.mint()));
            }
            std::mem::swap(&mut above, &mut current);
        }

        // Background on the bottom row is open to the outside
        for label in above[1..=width].iter().flatten() {
            forest.union(*label, EXTERIOR);
        }

        forest.enclosed_classes()
    }
}
