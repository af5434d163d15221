// src/search.rs
use tracing::debug;

use crate::grid::{Bounds, GridView, Location};
use crate::trace::{self, Trace};

/// The four peak-finding strategies, in the order the driver runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Algorithm {
    /// Split on the middle column and recurse toward a better neighbor.
    #[value(name = "1", alias = "divide")]
    DivideAndConquer,
    /// Climb to strictly better neighbors from the origin.
    #[value(name = "2", alias = "greedy")]
    GreedyAscent,
    /// Split on a middle row and column at once, recursing toward the best value seen.
    #[value(name = "3", alias = "quadrant")]
    QuadrantSearch,
    /// Split on rows and columns in turn, recursing toward the best value seen.
    #[value(name = "4", alias = "alternating")]
    AlternatingSplit,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::DivideAndConquer,
        Algorithm::GreedyAscent,
        Algorithm::QuadrantSearch,
        Algorithm::AlternatingSplit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::DivideAndConquer => "Algorithm 1",
            Algorithm::GreedyAscent => "Algorithm 2",
            Algorithm::QuadrantSearch => "Algorithm 3",
            Algorithm::AlternatingSplit => "Algorithm 4",
        }
    }

    /// Runs this strategy over `problem` with its default entry arguments.
    pub fn run(self, problem: &GridView<'_>, trace: Trace<'_, '_>) -> Option<Location> {
        match self {
            Algorithm::DivideAndConquer => divide_and_conquer(problem, trace),
            Algorithm::GreedyAscent => greedy_ascent(problem, Location::ORIGIN, trace),
            Algorithm::QuadrantSearch => quadrant_search(problem, None, trace),
            Algorithm::AlternatingSplit => alternating_split_search(problem, None, true, trace),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Algorithm 1.
///
/// Finds the maximum of the middle column. If nothing next to it is better it
/// is a peak; otherwise the better neighbor sits strictly left or right of the
/// divider and the search recurses into that half only.
pub fn divide_and_conquer(problem: &GridView<'_>, mut trace: Trace<'_, '_>) -> Option<Location> {
    if problem.is_empty() {
        return None;
    }

    let mid = problem.num_col() / 2;
    let subproblems = column_halves(problem, mid);
    let divider = cross_product(0..problem.num_row(), [mid]);

    let best_loc = problem.get_maximum(&divider, trace.as_deref_mut())?;
    let neighbor = problem.get_better_neighbor(best_loc, trace.as_deref_mut());

    if neighbor == best_loc {
        debug!(peak = %best_loc, bounds = ?problem.bounds(), "divide_and_conquer: peak on divider");
        trace::record_peak(trace, best_loc);
        return Some(best_loc);
    }

    let sub = problem.get_subproblem_containing(&subproblems, neighbor);
    debug!(neighbor = %neighbor, sub = ?sub.bounds(), "divide_and_conquer: recursing");
    trace::record_subproblem(trace.as_deref_mut(), &sub);
    let result = divide_and_conquer(&sub, trace)?;
    Some(problem.get_location_in_self(&sub, result))
}

/// Algorithm 2.
///
/// Moves from `location` to a strictly better neighbor until there is none.
/// Every step strictly increases the value, so it stops within
/// `num_row * num_col` steps.
pub fn greedy_ascent(problem: &GridView<'_>, location: Location, mut trace: Trace<'_, '_>) -> Option<Location> {
    if problem.is_empty() {
        return None;
    }

    let mut current = location;
    let mut steps = 0usize;
    loop {
        let next = problem.get_better_neighbor(current, trace.as_deref_mut());
        if next == current {
            debug!(peak = %current, steps, "greedy_ascent: no better neighbor");
            trace::record_peak(trace, current);
            return Some(current);
        }
        current = next;
        steps += 1;
    }
}

/// Algorithm 3.
///
/// Takes the maximum over the middle row and middle column together. If that
/// cell has no better neighbor it is returned; otherwise the search recurses
/// into the quadrant holding `best_seen`, the best neighbor found so far over
/// the whole search, rather than the quadrant of the latest neighbor.
///
/// The returned cell is only guaranteed to be a peak of the final sub-view;
/// on some grids a cell just outside that sub-view is larger.
pub fn quadrant_search(
    problem: &GridView<'_>,
    best_seen: Option<Location>,
    mut trace: Trace<'_, '_>,
) -> Option<Location> {
    if problem.is_empty() {
        return None;
    }

    let mid_row = problem.num_row() / 2;
    let mid_col = problem.num_col() / 2;
    let (upper, lower) = split(problem.num_row(), mid_row);
    let (left, right) = split(problem.num_col(), mid_col);

    let subproblems = [
        Bounds::new(upper.0, left.0, upper.1, left.1),
        Bounds::new(upper.0, right.0, upper.1, right.1),
        Bounds::new(lower.0, left.0, lower.1, left.1),
        Bounds::new(lower.0, right.0, lower.1, right.1),
    ];

    // The center cell is listed twice, once for the row and once for the column.
    let mut cross = cross_product([mid_row], 0..problem.num_col());
    cross.extend(cross_product(0..problem.num_row(), [mid_col]));

    let cross_loc = problem.get_maximum(&cross, trace.as_deref_mut())?;
    let neighbor = problem.get_better_neighbor(cross_loc, trace.as_deref_mut());

    let best_seen = update_best_seen(problem, best_seen, neighbor, trace.as_deref_mut());

    if neighbor == cross_loc {
        debug!(peak = %cross_loc, bounds = ?problem.bounds(), "quadrant_search: peak on cross");
        trace::record_peak(trace, cross_loc);
        return Some(cross_loc);
    }

    let sub = problem.get_subproblem_containing(&subproblems, best_seen);
    let new_best = sub.get_location_in_self(problem, best_seen);
    debug!(best_seen = %best_seen, sub = ?sub.bounds(), "quadrant_search: recursing");
    trace::record_subproblem(trace.as_deref_mut(), &sub);
    let result = quadrant_search(&sub, Some(new_best), trace)?;
    Some(problem.get_location_in_self(&sub, result))
}

/// Algorithm 4.
///
/// Splits on the middle row when `row_split` is set and on the middle column
/// otherwise, flipping the axis at each level. The divider maximum is only
/// accepted when it has no better neighbor and is at least as large as
/// `best_seen`; otherwise the search recurses toward `best_seen`.
pub fn alternating_split_search(
    problem: &GridView<'_>,
    best_seen: Option<Location>,
    row_split: bool,
    mut trace: Trace<'_, '_>,
) -> Option<Location> {
    if problem.is_empty() {
        return None;
    }

    let (subproblems, divider) = if row_split {
        let mid = problem.num_row() / 2;
        (row_halves(problem, mid), cross_product([mid], 0..problem.num_col()))
    } else {
        let mid = problem.num_col() / 2;
        (column_halves(problem, mid), cross_product(0..problem.num_row(), [mid]))
    };

    let best_loc = problem.get_maximum(&divider, trace.as_deref_mut())?;
    let neighbor = problem.get_better_neighbor(best_loc, trace.as_deref_mut());

    let best_seen = update_best_seen(problem, best_seen, neighbor, trace.as_deref_mut());

    if neighbor == best_loc && problem.get(best_loc) >= problem.get(best_seen) {
        debug!(peak = %best_loc, row_split, bounds = ?problem.bounds(), "alternating_split_search: peak on divider");
        trace::record_peak(trace, best_loc);
        return Some(best_loc);
    }

    let sub = problem.get_subproblem_containing(&subproblems, best_seen);
    let new_best = sub.get_location_in_self(problem, best_seen);
    debug!(best_seen = %best_seen, row_split, sub = ?sub.bounds(), "alternating_split_search: recursing");
    trace::record_subproblem(trace.as_deref_mut(), &sub);
    let result = alternating_split_search(&sub, Some(new_best), !row_split, trace)?;
    Some(problem.get_location_in_self(&sub, result))
}

/// Replaces `best_seen` with `candidate` when there is none yet or the
/// candidate is strictly greater.
fn update_best_seen(
    problem: &GridView<'_>,
    best_seen: Option<Location>,
    candidate: Location,
    trace: Trace<'_, '_>,
) -> Location {
    match best_seen {
        Some(best) if problem.get(candidate) <= problem.get(best) => best,
        _ => {
            trace::record_best_seen(trace, candidate);
            candidate
        }
    }
}

/// `(start, len)` of the two ranges either side of `mid` within `0..len`.
fn split(len: usize, mid: usize) -> ((usize, usize), (usize, usize)) {
    ((0, mid), (mid + 1, len - (mid + 1)))
}

fn column_halves(problem: &GridView<'_>, mid: usize) -> [Bounds; 2] {
    let (left, right) = split(problem.num_col(), mid);
    [
        Bounds::new(0, left.0, problem.num_row(), left.1),
        Bounds::new(0, right.0, problem.num_row(), right.1),
    ]
}

fn row_halves(problem: &GridView<'_>, mid: usize) -> [Bounds; 2] {
    let (upper, lower) = split(problem.num_row(), mid);
    [
        Bounds::new(upper.0, 0, upper.1, problem.num_col()),
        Bounds::new(lower.0, 0, lower.1, problem.num_col()),
    ]
}

/// Every `(row, col)` pair, rows outermost.
pub fn cross_product<R, C>(rows: R, cols: C) -> Vec<Location>
where
    R: IntoIterator<Item = usize>,
    C: IntoIterator<Item = usize>,
    C::IntoIter: Clone,
{
    let cols = cols.into_iter();
    rows.into_iter()
        .flat_map(|row| cols.clone().map(move |col| Location(row as isize, col as isize)))
        .collect()
}
