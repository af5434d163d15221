// src/trace.rs
use serde::Serialize;

use crate::grid::{GridView, Location};

/// One primitive step of a search, in emission order.
///
/// Serialized as `{"type": "<name>", ...}` records, the layout the HTML
/// visualizer reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TraceEvent {
    FindingMaximum { coords: Vec<Location> },
    FoundMaximum { coord: Option<Location> },
    FindingNeighbor { coord: Location },
    /// Only emitted when a strictly better neighbor exists.
    FoundNeighbor { coord: Location },
    #[serde(rename_all = "camelCase")]
    Subproblem {
        start_row: usize,
        num_rows: usize,
        start_col: usize,
        num_cols: usize,
    },
    BestSeen { coord: Location },
    FoundPeak { coord: Location },
}

/// Observer for search steps.
pub trait TraceSink {
    fn record(&mut self, event: TraceEvent);
}

/// Optional sink threaded through every search call. `None` disables tracing.
pub type Trace<'r, 's> = Option<&'r mut (dyn TraceSink + 's)>;

/// Append-only event log; the sink the driver hands to each algorithm run.
#[derive(Debug, Default, Clone)]
pub struct TraceRecord {
    sequence: Vec<TraceEvent>,
}

impl TraceRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn into_events(self) -> Vec<TraceEvent> {
        self.sequence
    }
}

impl TraceSink for TraceRecord {
    fn record(&mut self, event: TraceEvent) {
        self.sequence.push(event);
    }
}

pub(crate) fn record_maximum(trace: Trace<'_, '_>, candidates: &[Location], maximum: Option<Location>) {
    if let Some(sink) = trace {
        sink.record(TraceEvent::FindingMaximum { coords: candidates.to_vec() });
        sink.record(TraceEvent::FoundMaximum { coord: maximum });
    }
}

pub(crate) fn record_better_neighbor(trace: Trace<'_, '_>, checked: Location, better: Location) {
    if let Some(sink) = trace {
        sink.record(TraceEvent::FindingNeighbor { coord: checked });
        if checked != better {
            sink.record(TraceEvent::FoundNeighbor { coord: better });
        }
    }
}

pub(crate) fn record_subproblem(trace: Trace<'_, '_>, subproblem: &GridView<'_>) {
    if let Some(sink) = trace {
        sink.record(TraceEvent::Subproblem {
            start_row: subproblem.start_row(),
            num_rows: subproblem.num_row(),
            start_col: subproblem.start_col(),
            num_cols: subproblem.num_col(),
        });
    }
}

pub(crate) fn record_best_seen(trace: Trace<'_, '_>, best_seen: Location) {
    if let Some(sink) = trace {
        sink.record(TraceEvent::BestSeen { coord: best_seen });
    }
}

pub(crate) fn record_peak(trace: Trace<'_, '_>, peak: Location) {
    if let Some(sink) = trace {
        sink.record(TraceEvent::FoundPeak { coord: peak });
    }
}
