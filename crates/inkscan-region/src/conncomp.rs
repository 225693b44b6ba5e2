//! Run-length connected components
//!
//! A [`ConnectedComponent`] stores a foreground region as a sorted list of
//! [`RunLength`]s together with its bounding box.  The box is updated
//! incrementally as runs are added, merged or split off.
//!
//! Runs are kept in a `Vec`.  Construction from raster scans produces runs
//! in sorted order, so the common path is an O(1) append; random
//! insertion costs a binary search plus a splice.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use inkscan_core::{Bitmap, BoundBox, is_foreground};
use tracing::{debug, trace};

use crate::runlength::RunLength;

/// A foreground region stored as sorted horizontal runs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectedComponent {
    pub(crate) runs: Vec<RunLength>,
    pub(crate) bounds: BoundBox,
}

impl ConnectedComponent {
    /// Create an empty component
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a component holding a single run
    pub fn from_run(run: RunLength) -> Self {
        let mut cc = Self::new();
        cc.push_run(run);
        cc
    }

    /// Create a component without runs but with the given bounds.
    ///
    /// The bounds are taken as-is; they are widened as runs are added.
    pub fn with_bounds(bounds: BoundBox) -> Self {
        Self {
            runs: Vec::new(),
            bounds,
        }
    }

    /// Extract every foreground run of a binarized image as one component.
    ///
    /// Each row is scanned left to right; a run opens on a
    /// background-to-foreground transition and closes on the next
    /// foreground-to-background transition or at the end of the row.
    /// All runs end up in a single component; splitting a page into its
    /// separate regions is left to the caller.
    pub fn from_bitmap(bitmap: &Bitmap) -> Self {
        let mut cc = Self::new();
        for y in 0..bitmap.height() {
            let mut open: Option<usize> = None;
            for (x, &pixel) in bitmap.row(y).iter().enumerate() {
                match (is_foreground(pixel), open) {
                    (true, None) => open = Some(x),
                    (false, Some(start)) => {
                        cc.push_run(RunLength::new_unchecked(
                            y as i32,
                            start as i32,
                            (x - start - 1) as i32,
                        ));
                        open = None;
                    }
                    _ => {}
                }
            }
            if let Some(start) = open {
                let width = bitmap.width() as usize;
                cc.push_run(RunLength::new_unchecked(
                    y as i32,
                    start as i32,
                    (width - start - 1) as i32,
                ));
            }
        }
        debug!(
            width = bitmap.width(),
            height = bitmap.height(),
            runs = cc.runs.len(),
            "extracted runs from bitmap"
        );
        cc
    }

    /// The runs, sorted by (row, start, end)
    #[inline]
    pub fn runs(&self) -> &[RunLength] {
        &self.runs
    }

    /// Consume the component and return its runs
    pub fn into_runs(self) -> Vec<RunLength> {
        self.runs
    }

    /// Number of runs
    #[inline]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Check if the component has no runs
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Insert a run at its sorted position
    ///
    /// Runs comparing equal to existing ones are placed after them.
    pub fn add_run(&mut self, run: RunLength) {
        let pos = self.runs.partition_point(|r| *r <= run);
        self.runs.insert(pos, run);
        self.bounds.expand(run.row(), run.start(), run.end());
    }

    /// Append a run that sorts after every run already present.
    ///
    /// This is the fast path for raster-order construction.  The ordering
    /// precondition is not checked: appending an out-of-order run leaves
    /// the component unsorted and later descriptors will be wrong.
    #[inline]
    pub fn push_run(&mut self, run: RunLength) {
        self.runs.push(run);
        self.bounds.expand(run.row(), run.start(), run.end());
    }

    /// Merge another component into this one.
    ///
    /// Both run lists are already sorted, so this is a single linear merge.
    /// On ties the runs of `self` come first.
    pub fn combine_with(&mut self, other: ConnectedComponent) {
        let mine = std::mem::take(&mut self.runs);
        let mut merged = Vec::with_capacity(mine.len() + other.runs.len());
        let mut a = mine.into_iter().peekable();
        let mut b = other.runs.into_iter().peekable();
        loop {
            match (a.peek(), b.peek()) {
                (Some(x), Some(y)) => {
                    if y < x {
                        merged.extend(b.next());
                    } else {
                        merged.extend(a.next());
                    }
                }
                (Some(_), None) => {
                    merged.extend(a);
                    break;
                }
                (None, _) => {
                    merged.extend(b);
                    break;
                }
            }
        }
        self.runs = merged;
        self.bounds = self.bounds.union(&other.bounds);
    }

    /// Merge any number of components into a new one.
    ///
    /// Uses a k-way heap merge: O(R log N) for R runs spread over N
    /// components, instead of the O(N * R) of folding with
    /// [`combine_with`](Self::combine_with).
    ///
    /// # Arguments
    ///
    /// * `components` - Components to merge, each with sorted runs; empty
    ///   ones are allowed
    ///
    /// # Returns
    ///
    /// A component holding every run of every input in sorted order, with
    /// the union of the input boxes.  Runs are not coalesced; call
    /// [`fix`](Self::fix) afterwards when the inputs overlap.
    pub fn combine<I>(components: I) -> Self
    where
        I: IntoIterator<Item = ConnectedComponent>,
    {
        let mut bounds = BoundBox::EMPTY;
        let mut total = 0;
        let mut sources: Vec<_> = components
            .into_iter()
            .map(|cc| {
                bounds = bounds.union(&cc.bounds);
                total += cc.runs.len();
                cc.runs.into_iter()
            })
            .collect();

        let mut heap = BinaryHeap::with_capacity(sources.len());
        for (i, source) in sources.iter_mut().enumerate() {
            if let Some(run) = source.next() {
                heap.push(Reverse((run, i)));
            }
        }

        let mut runs = Vec::with_capacity(total);
        while let Some(Reverse((run, i))) = heap.pop() {
            runs.push(run);
            if let Some(next) = sources[i].next() {
                heap.push(Reverse((next, i)));
            }
        }

        Self { runs, bounds }
    }

    /// Split the component along the vertical line after column `x`.
    ///
    /// Runs ending at or before `x` stay, runs starting after `x` move to
    /// the returned component, and a run crossing the line is cut into
    /// `[start, x]` (kept) and `[x + 1, end]` (moved).
    ///
    /// # Arguments
    ///
    /// * `x` - Last column kept in `self`
    ///
    /// # Returns
    ///
    /// The part right of `x`, with a tight box.  The box of `self` is
    /// recomputed from the kept runs and its right edge is then set to `x`,
    /// even when no kept run reaches it.
    pub fn split_horizontally(&mut self, x: i32) -> ConnectedComponent {
        let mut moved = ConnectedComponent::new();
        let mut kept = Vec::with_capacity(self.runs.len());
        let mut bounds = BoundBox::EMPTY;

        for run in self.runs.drain(..) {
            if run.start() > x {
                moved.push_run(run);
                continue;
            }
            let run = if run.end() > x {
                let (head, tail) = run.split_after(x);
                moved.push_run(tail);
                head
            } else {
                run
            };
            bounds.expand(run.row(), run.start(), run.end());
            kept.push(run);
        }
        // Overlapping input runs can leave cut tails out of order.
        if !moved.runs.is_sorted() {
            moved.runs.sort_unstable();
        }

        bounds.right = x;
        self.runs = kept;
        self.bounds = bounds;
        moved
    }

    /// Split the component along the horizontal line below row `y`.
    ///
    /// Rows up to `y` stay, rows after `y` move to the returned component.
    /// Both boxes are recomputed from their runs; the bottom edge of
    /// `self` is set to `y`.
    pub fn split_vertically(&mut self, y: i32) -> ConnectedComponent {
        let at = self.runs.partition_point(|r| r.row() <= y);
        let mut moved = ConnectedComponent::new();
        for run in self.runs.drain(at..) {
            moved.push_run(run);
        }

        let mut bounds = BoundBox::EMPTY;
        for run in &self.runs {
            bounds.expand(run.row(), run.start(), run.end());
        }
        bounds.bottom = y;
        self.bounds = bounds;
        moved
    }

    /// Normalize the run list.
    ///
    /// Sorts the runs, then coalesces runs on the same row that overlap
    /// or touch (start <= previous end + 1).  Descriptors that count runs
    /// or strokes expect a normalized component.
    pub fn fix(&mut self) {
        self.runs.sort_unstable();
        let before = self.runs.len();
        let mut merged: Vec<RunLength> = Vec::with_capacity(before);
        for run in self.runs.drain(..) {
            if let Some(prev) = merged.last_mut()
                && prev.row() == run.row()
                && run.start() <= prev.end() + 1
            {
                if run.end() > prev.end() {
                    *prev = prev.with_end(run.end());
                }
            } else {
                merged.push(run);
            }
        }
        if merged.len() != before {
            trace!(before, after = merged.len(), "coalesced runs");
        }
        self.runs = merged;
    }

    /// Get the bounding box
    #[inline]
    pub fn bounds(&self) -> BoundBox {
        self.bounds
    }

    /// Leftmost column
    #[inline]
    pub fn left(&self) -> i32 {
        self.bounds.left
    }

    /// Rightmost column
    #[inline]
    pub fn right(&self) -> i32 {
        self.bounds.right
    }

    /// Topmost row
    #[inline]
    pub fn top(&self) -> i32 {
        self.bounds.top
    }

    /// Bottommost row
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.bounds.bottom
    }

    /// Width of the bounding box, 0 when empty
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height of the bounding box, 0 when empty
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of foreground pixels
    pub fn weight(&self) -> usize {
        self.runs.iter().map(RunLength::pixel_count).sum()
    }

    /// Order components by (left, top, right): left-to-right reading order
    pub fn from_left(a: &ConnectedComponent, b: &ConnectedComponent) -> Ordering {
        a.left()
            .cmp(&b.left())
            .then(a.top().cmp(&b.top()))
            .then(a.right().cmp(&b.right()))
    }
}

impl Ord for ConnectedComponent {
    /// Reading position: by (top, left, bottom) of the box.
    ///
    /// Components sharing those edges are told apart by the right edge and
    /// then by their runs, so the order agrees with `==`.
    fn cmp(&self, other: &Self) -> Ordering {
        self.top()
            .cmp(&other.top())
            .then(self.left().cmp(&other.left()))
            .then(self.bottom().cmp(&other.bottom()))
            .then(self.right().cmp(&other.right()))
            .then_with(|| self.runs.cmp(&other.runs))
    }
}

impl PartialOrd for ConnectedComponent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromIterator<RunLength> for ConnectedComponent {
    /// Collect runs in any order into a sorted component
    fn from_iter<T: IntoIterator<Item = RunLength>>(iter: T) -> Self {
        let mut runs: Vec<RunLength> = iter.into_iter().collect();
        runs.sort_unstable();
        let mut bounds = BoundBox::EMPTY;
        for run in &runs {
            bounds.expand(run.row(), run.start(), run.end());
        }
        Self { runs, bounds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(row: i32, start: i32, count: i32) -> RunLength {
        RunLength::new_unchecked(row, start, count)
    }

    #[test]
    fn test_empty_component() {
        let cc = ConnectedComponent::new();
        assert!(cc.is_empty());
        assert_eq!(cc.width(), 0);
        assert_eq!(cc.height(), 0);
        assert_eq!(cc.weight(), 0);
    }

    #[test]
    fn test_from_bitmap() {
        let bmp = Bitmap::from_rows(&[&[1, 1, 0, 1], &[0, 0, 0, 0], &[0, 1, 1, 1]]).unwrap();
        let cc = ConnectedComponent::from_bitmap(&bmp);
        assert_eq!(cc.runs(), &[run(0, 0, 1), run(0, 3, 0), run(2, 1, 2)]);
        assert_eq!(cc.bounds(), BoundBox::new(0, 3, 0, 2));
        assert_eq!(cc.weight(), 6);
    }

    #[test]
    fn test_add_run_keeps_order_and_box() {
        let mut cc = ConnectedComponent::from_run(run(5, 10, 2));
        cc.add_run(run(2, 4, 0));
        cc.add_run(run(5, 3, 1));
        cc.add_run(run(9, 11, 5));
        assert_eq!(
            cc.runs(),
            &[run(2, 4, 0), run(5, 3, 1), run(5, 10, 2), run(9, 11, 5)]
        );
        assert_eq!(cc.bounds(), BoundBox::new(3, 16, 2, 9));
    }

    #[test]
    fn test_combine_with_merges_in_order() {
        let mut a: ConnectedComponent = [run(0, 0, 1), run(2, 0, 1)].into_iter().collect();
        let b: ConnectedComponent = [run(1, 5, 0), run(2, 4, 0), run(3, 0, 0)]
            .into_iter()
            .collect();
        a.combine_with(b);
        assert_eq!(
            a.runs(),
            &[run(0, 0, 1), run(1, 5, 0), run(2, 0, 1), run(2, 4, 0), run(3, 0, 0)]
        );
        assert_eq!(a.bounds(), BoundBox::new(0, 5, 0, 3));
    }

    #[test]
    fn test_combine_many() {
        let parts = vec![
            ConnectedComponent::from_run(run(3, 0, 0)),
            ConnectedComponent::new(),
            [run(0, 2, 2), run(4, 1, 0)].into_iter().collect(),
            ConnectedComponent::from_run(run(0, 0, 0)),
        ];
        let cc = ConnectedComponent::combine(parts);
        assert_eq!(
            cc.runs(),
            &[run(0, 0, 0), run(0, 2, 2), run(3, 0, 0), run(4, 1, 0)]
        );
        assert_eq!(cc.bounds(), BoundBox::new(0, 4, 0, 4));
    }

    #[test]
    fn test_split_horizontally_clips_straddler() {
        let mut cc: ConnectedComponent = [run(0, 0, 9), run(1, 0, 1), run(1, 7, 2)]
            .into_iter()
            .collect();
        let right = cc.split_horizontally(4);
        assert_eq!(cc.runs(), &[run(0, 0, 4), run(1, 0, 1)]);
        assert_eq!(cc.bounds(), BoundBox::new(0, 4, 0, 1));
        assert_eq!(right.runs(), &[run(0, 5, 4), run(1, 7, 2)]);
        assert_eq!(right.bounds(), BoundBox::new(5, 9, 0, 1));
    }

    #[test]
    fn test_split_horizontally_forces_right_edge() {
        let mut cc: ConnectedComponent = [run(0, 0, 1), run(0, 8, 1)].into_iter().collect();
        let right = cc.split_horizontally(5);
        assert_eq!(cc.right(), 5);
        assert_eq!(cc.width(), 6);
        assert_eq!(right.left(), 8);
    }

    #[test]
    fn test_split_leaves_empty_side() {
        let mut cc = ConnectedComponent::from_run(run(2, 3, 3));
        let right = cc.split_horizontally(1);
        assert!(cc.is_empty());
        assert_eq!(cc.width(), 0);
        assert_eq!(cc.height(), 0);
        assert_eq!(right.weight(), 4);

        let mut cc = ConnectedComponent::from_run(run(2, 3, 3));
        let below = cc.split_vertically(5);
        assert!(below.is_empty());
        assert_eq!(below.width(), 0);
        assert_eq!(cc.bottom(), 5);
    }

    #[test]
    fn test_split_vertically() {
        let mut cc: ConnectedComponent = [run(0, 3, 0), run(1, 0, 5), run(2, 2, 0), run(3, 1, 1)]
            .into_iter()
            .collect();
        let lower = cc.split_vertically(1);
        assert_eq!(cc.runs(), &[run(0, 3, 0), run(1, 0, 5)]);
        assert_eq!(cc.bounds(), BoundBox::new(0, 5, 0, 1));
        assert_eq!(lower.runs(), &[run(2, 2, 0), run(3, 1, 1)]);
        assert_eq!(lower.bounds(), BoundBox::new(1, 2, 2, 3));
    }

    #[test]
    fn test_fix_coalesces_touching_and_overlapping() {
        let mut cc: ConnectedComponent = [
            run(0, 4, 2),
            run(0, 0, 3),
            run(0, 10, 0),
            run(1, 0, 5),
            run(1, 2, 1),
        ]
        .into_iter()
        .collect();
        cc.fix();
        assert_eq!(cc.runs(), &[run(0, 0, 6), run(0, 10, 0), run(1, 0, 5)]);
    }

    #[test]
    fn test_fix_is_idempotent() {
        let mut cc: ConnectedComponent = [run(3, 1, 1), run(3, 2, 4), run(0, 0, 0), run(3, 8, 0)]
            .into_iter()
            .collect();
        cc.fix();
        let once = cc.clone();
        cc.fix();
        assert_eq!(cc, once);
    }

    #[test]
    fn test_component_orderings() {
        let a = ConnectedComponent::from_run(run(0, 5, 0));
        let b = ConnectedComponent::from_run(run(1, 0, 0));
        assert!(a < b);
        assert_eq!(ConnectedComponent::from_left(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_sort_by_reading_position() {
        let lower = ConnectedComponent::from_run(run(4, 0, 2));
        let right = ConnectedComponent::from_run(run(1, 9, 0));
        let left = ConnectedComponent::from_run(run(1, 2, 0));
        let tall: ConnectedComponent = [run(1, 2, 0), run(3, 2, 0)].into_iter().collect();
        let mut ccs = vec![lower.clone(), tall.clone(), right.clone(), left.clone()];
        ccs.sort();
        assert_eq!(ccs, vec![left.clone(), tall.clone(), right.clone(), lower.clone()]);

        // same box edges, different runs: ordered but not equal
        let full: ConnectedComponent = [run(0, 0, 3)].into_iter().collect();
        let gapped: ConnectedComponent = [run(0, 0, 0), run(0, 3, 0)].into_iter().collect();
        assert_eq!(full.bounds(), gapped.bounds());
        assert_ne!(full.cmp(&gapped), Ordering::Equal);

        let set: std::collections::BTreeSet<_> = [full.clone(), gapped, full].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
