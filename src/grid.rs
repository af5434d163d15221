// src/grid.rs
use serde::Serialize;

use crate::trace::{self, Trace};

/// Cell value type. Cells outside a view read as `0.0`.
pub type Value = f64;

/// A `(row, col)` coordinate, always relative to the view that produced it.
///
/// Signed so that translating between views (and probing past an edge) never
/// wraps; reads outside the view simply return zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Location(pub isize, pub isize);

impl Location {
    pub const ORIGIN: Location = Location(0, 0);

    pub fn row(self) -> isize {
        self.0
    }

    pub fn col(self) -> isize {
        self.1
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// A window `(start_row, start_col, num_row, num_col)` relative to some view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub start_row: usize,
    pub start_col: usize,
    pub num_row: usize,
    pub num_col: usize,
}

impl Bounds {
    pub fn new(start_row: usize, start_col: usize, num_row: usize, num_col: usize) -> Self {
        Bounds { start_row, start_col, num_row, num_col }
    }

    pub fn contains(&self, location: Location) -> bool {
        let Location(row, col) = location;
        let (start_row, start_col) = (self.start_row as isize, self.start_col as isize);
        start_row <= row
            && row < start_row + self.num_row as isize
            && start_col <= col
            && col < start_col + self.num_col as isize
    }
}

/// Read-only view over a rectangular region of a shared backing grid.
///
/// Views are cheap to copy: sub-problems share the same backing rows and only
/// differ in their offset and extent.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    array: &'a [Vec<Value>],
    start_row: usize,
    start_col: usize,
    num_row: usize,
    num_col: usize,
}

impl<'a> GridView<'a> {
    /// Root view over the whole array. The column count is the shortest row
    /// length, so every in-bounds coordinate is valid in every row.
    pub fn new(array: &'a [Vec<Value>]) -> Self {
        let (num_row, num_col) = dimensions(array);
        GridView { array, start_row: 0, start_col: 0, num_row, num_col }
    }

    /// View with explicit absolute bounds over `array`.
    pub fn with_bounds(array: &'a [Vec<Value>], bounds: Bounds) -> Self {
        GridView {
            array,
            start_row: bounds.start_row,
            start_col: bounds.start_col,
            num_row: bounds.num_row,
            num_col: bounds.num_col,
        }
    }

    pub fn array(&self) -> &'a [Vec<Value>] {
        self.array
    }

    pub fn start_row(&self) -> usize {
        self.start_row
    }

    pub fn start_col(&self) -> usize {
        self.start_col
    }

    pub fn num_row(&self) -> usize {
        self.num_row
    }

    pub fn num_col(&self) -> usize {
        self.num_col
    }

    /// Absolute bounds of this view within the backing array.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.start_row, self.start_col, self.num_row, self.num_col)
    }

    pub fn is_empty(&self) -> bool {
        self.num_row == 0 || self.num_col == 0
    }

    fn in_view(&self, location: Location) -> bool {
        let Location(row, col) = location;
        (0..self.num_row as isize).contains(&row) && (0..self.num_col as isize).contains(&col)
    }

    /// Value at `location`, or zero when it lies outside the view.
    pub fn get(&self, location: Location) -> Value {
        if !self.in_view(location) {
            return 0.0;
        }
        let row = self.start_row + location.0 as usize;
        let col = self.start_col + location.1 as usize;
        self.array
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(0.0)
    }

    /// Returns the best strictly-greater neighbor of `location` inside this
    /// view, or `location` itself when none exists.
    ///
    /// Neighbors are checked up, left, down, right; each is compared with the
    /// best found so far, so a later neighbor only wins if it beats the
    /// earlier winner too.
    pub fn get_better_neighbor(&self, location: Location, trace: Trace<'_, '_>) -> Location {
        let Location(row, col) = location;
        let mut best = location;

        if row - 1 >= 0 && self.get(Location(row - 1, col)) > self.get(best) {
            best = Location(row - 1, col);
        }
        if col - 1 >= 0 && self.get(Location(row, col - 1)) > self.get(best) {
            best = Location(row, col - 1);
        }
        if row + 1 < self.num_row as isize && self.get(Location(row + 1, col)) > self.get(best) {
            best = Location(row + 1, col);
        }
        if col + 1 < self.num_col as isize && self.get(Location(row, col + 1)) > self.get(best) {
            best = Location(row, col + 1);
        }

        trace::record_better_neighbor(trace, location, best);
        best
    }

    /// Location with the greatest value among `locations`; the first one wins
    /// on ties. `None` only when `locations` is empty.
    pub fn get_maximum(&self, locations: &[Location], trace: Trace<'_, '_>) -> Option<Location> {
        let mut best: Option<(Location, Value)> = None;

        for &location in locations {
            let value = self.get(location);
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((location, value));
            }
        }

        let best_location = best.map(|(location, _)| location);
        trace::record_maximum(trace, locations, best_location);
        best_location
    }

    /// True when no neighbor inside this view is strictly greater.
    pub fn is_peak(&self, location: Location) -> bool {
        self.get_better_neighbor(location, None) == location
    }

    /// Sub-view with `bounds` given relative to this view.
    pub fn get_subproblem(&self, bounds: Bounds) -> GridView<'a> {
        GridView {
            array: self.array,
            start_row: self.start_row + bounds.start_row,
            start_col: self.start_col + bounds.start_col,
            num_row: bounds.num_row,
            num_col: bounds.num_col,
        }
    }

    /// Sub-view for the first entry of `bound_list` that contains `location`.
    ///
    /// # Panics
    ///
    /// Panics when no entry contains `location`. Callers always pass a
    /// partition of this view together with a location inside it, so a miss
    /// means the partition was built wrong.
    pub fn get_subproblem_containing(&self, bound_list: &[Bounds], location: Location) -> GridView<'a> {
        match bound_list.iter().find(|bounds| bounds.contains(location)) {
            Some(&bounds) => self.get_subproblem(bounds),
            None => panic!(
                "location {location} lies in none of the {} partitions of view {:?}",
                bound_list.len(),
                self.bounds()
            ),
        }
    }

    /// Translates `location`, expressed in `other`'s coordinates, into this
    /// view's coordinates. Both views must share the same backing array.
    pub fn get_location_in_self(&self, other: &GridView<'_>, location: Location) -> Location {
        let Location(row, col) = location;
        Location(
            row + other.start_row as isize - self.start_row as isize,
            col + other.start_col as isize - self.start_col as isize,
        )
    }
}

/// `(rows, shortest row length)`; zero columns when there are no rows.
fn dimensions(array: &[Vec<Value>]) -> (usize, usize) {
    let rows = array.len();
    let cols = array.iter().map(Vec::len).min().unwrap_or(0);
    (rows, cols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{TraceEvent, TraceRecord};
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Vec<Value>> {
        vec![
            vec![1.0, 2.0, 3.0, 4.0],
            vec![5.0, 6.0, 7.0, 8.0],
            vec![9.0, 10.0, 11.0, 12.0],
        ]
    }

    #[test]
    fn root_view_uses_shortest_row() {
        let ragged = vec![vec![1.0, 2.0, 3.0], vec![4.0], vec![5.0, 6.0]];
        let view = GridView::new(&ragged);
        assert_eq!((view.num_row(), view.num_col()), (3, 1));

        let empty: Vec<Vec<Value>> = Vec::new();
        assert!(GridView::new(&empty).is_empty());
        let empty_rows = vec![Vec::new(), Vec::new()];
        assert!(GridView::new(&empty_rows).is_empty());
    }

    #[test]
    fn get_reads_zero_outside_view() {
        let data = sample();
        let view = GridView::new(&data);
        assert_eq!(view.get(Location(2, 3)), 12.0);
        assert_eq!(view.get(Location(-1, 0)), 0.0);
        assert_eq!(view.get(Location(0, -1)), 0.0);
        assert_eq!(view.get(Location(3, 0)), 0.0);
        assert_eq!(view.get(Location(0, 4)), 0.0);
    }

    #[test]
    fn subproblem_offsets_compose() {
        let data = sample();
        let view = GridView::new(&data);
        let sub = view.get_subproblem(Bounds::new(1, 1, 2, 3));
        assert_eq!(sub.get(Location(0, 0)), 6.0);
        let inner = sub.get_subproblem(Bounds::new(1, 1, 1, 2));
        assert_eq!(inner.bounds(), Bounds::new(2, 2, 1, 2));
        assert_eq!(inner.get(Location(0, 1)), 12.0);
        // Cells of the parent outside the window read as zero.
        assert_eq!(inner.get(Location(-1, 0)), 0.0);
    }

    #[test]
    fn better_neighbor_compares_against_running_best() {
        // Up (5) beats the center, down (6) beats up, then right (7) beats down.
        let data = vec![
            vec![0.0, 5.0, 0.0],
            vec![4.0, 1.0, 7.0],
            vec![0.0, 6.0, 0.0],
        ];
        let view = GridView::new(&data);
        assert_eq!(view.get_better_neighbor(Location(1, 1), None), Location(1, 2));
    }

    #[test]
    fn better_neighbor_ignores_ties() {
        let data = vec![vec![3.0, 3.0], vec![3.0, 3.0]];
        let view = GridView::new(&data);
        assert_eq!(view.get_better_neighbor(Location(0, 0), None), Location(0, 0));
        assert!(view.is_peak(Location(1, 1)));
    }

    #[test]
    fn better_neighbor_stays_inside_subview() {
        let data = sample();
        let view = GridView::new(&data).get_subproblem(Bounds::new(0, 0, 2, 2));
        // (1, 1) is 6 here; the 7 and 10 next to it belong to the parent only.
        assert!(view.is_peak(Location(1, 1)));
    }

    #[test]
    fn maximum_prefers_first_on_ties() {
        let data = vec![vec![4.0, 9.0, 9.0, 1.0]];
        let view = GridView::new(&data);
        let candidates = [Location(0, 0), Location(0, 2), Location(0, 1)];
        assert_eq!(view.get_maximum(&candidates, None), Some(Location(0, 2)));
        assert_eq!(view.get_maximum(&[], None), None);
    }

    #[test]
    fn maximum_and_neighbor_are_traced() {
        let data = vec![vec![1.0, 2.0]];
        let view = GridView::new(&data);
        let mut record = TraceRecord::new();

        let candidates = [Location(0, 0)];
        view.get_maximum(&candidates, Some(&mut record));
        view.get_better_neighbor(Location(0, 0), Some(&mut record));
        view.get_better_neighbor(Location(0, 1), Some(&mut record));

        assert_eq!(
            record.events(),
            &[
                TraceEvent::FindingMaximum { coords: vec![Location(0, 0)] },
                TraceEvent::FoundMaximum { coord: Some(Location(0, 0)) },
                TraceEvent::FindingNeighbor { coord: Location(0, 0) },
                TraceEvent::FoundNeighbor { coord: Location(0, 1) },
                TraceEvent::FindingNeighbor { coord: Location(0, 1) },
            ]
        );
    }

    #[test]
    fn containing_picks_first_matching_partition() {
        let data = sample();
        let view = GridView::new(&data);
        let parts = [Bounds::new(0, 0, 3, 2), Bounds::new(0, 2, 3, 2)];
        let sub = view.get_subproblem_containing(&parts, Location(1, 3));
        assert_eq!(sub.bounds(), Bounds::new(0, 2, 3, 2));
    }

    #[test]
    #[should_panic(expected = "lies in none of the")]
    fn containing_panics_outside_partition() {
        let data = sample();
        let view = GridView::new(&data);
        let parts = [Bounds::new(0, 0, 3, 1), Bounds::new(0, 2, 3, 2)];
        view.get_subproblem_containing(&parts, Location(0, 1));
    }

    #[test]
    fn location_translation_between_views() {
        let data = sample();
        let view = GridView::new(&data);
        let sub = view.get_subproblem(Bounds::new(1, 2, 2, 2));
        assert_eq!(view.get_location_in_self(&sub, Location(0, 1)), Location(1, 3));
        assert_eq!(sub.get_location_in_self(&view, Location(1, 3)), Location(0, 1));
    }
}
