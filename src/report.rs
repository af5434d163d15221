// src/report.rs
use std::fmt;

use tracing::{info, warn};

use crate::grid::{GridView, Location};
use crate::search::Algorithm;
use crate::trace::{TraceEvent, TraceRecord};

/// Outcome of one algorithm run, checked against the root view.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakReport {
    pub algorithm: Algorithm,
    pub location: Option<Location>,
    pub is_peak: bool,
}

impl fmt::Display for PeakReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(location) if self.is_peak => write!(f, "{} : {} => is a peak", self.algorithm, location),
            Some(location) => write!(f, "{} : {} => is NOT a peak (INCORRECT!)", self.algorithm, location),
            None => write!(f, "{} : None => no peak (empty grid)", self.algorithm),
        }
    }
}

/// Runs each of `algorithms` over `root` with a fresh trace, returning the
/// reports and the recorded events in the same order.
pub fn run_all(root: &GridView<'_>, algorithms: &[Algorithm]) -> (Vec<PeakReport>, Vec<Vec<TraceEvent>>) {
    if root.is_empty() {
        warn!(rows = root.num_row(), cols = root.num_col(), "grid is empty, no algorithm can find a peak");
    }

    let mut reports = Vec::with_capacity(algorithms.len());
    let mut steps = Vec::with_capacity(algorithms.len());

    for &algorithm in algorithms {
        let mut record = TraceRecord::new();
        let location = algorithm.run(root, Some(&mut record));
        let is_peak = location.is_some_and(|location| root.is_peak(location));

        info!(%algorithm, ?location, is_peak, events = record.len(), "search finished");
        if location.is_some() && !is_peak {
            warn!(%algorithm, ?location, "returned location is not a peak of the full grid");
        }

        reports.push(PeakReport { algorithm, location, is_peak });
        steps.push(record.into_events());
    }

    (reports, steps)
}
