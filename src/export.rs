// src/export.rs
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{PeakError, Result};
use crate::grid::Value;
use crate::trace::TraceEvent;

/// Output layout for a trace file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TraceFormat {
    /// `parse({...})`, loadable by the HTML visualizer as a script.
    #[default]
    Jsonp,
    /// The bare JSON object.
    Json,
}

/// Input grid plus one event list per algorithm run, in run order.
#[derive(Debug, Serialize)]
pub struct TraceExport<'a> {
    pub input: &'a [Vec<Value>],
    pub steps: Vec<Vec<TraceEvent>>,
}

const JSONP_CALLBACK: &str = "parse";

pub fn render_trace(export: &TraceExport<'_>, format: TraceFormat) -> serde_json::Result<String> {
    let body = serde_json::to_string(export)?;
    Ok(match format {
        TraceFormat::Jsonp => format!("{JSONP_CALLBACK}({body})"),
        TraceFormat::Json => body,
    })
}

pub fn write_trace(path: &Path, export: &TraceExport<'_>, format: TraceFormat) -> Result<()> {
    let rendered = render_trace(export, format).map_err(|e| PeakError::json(path, e))?;
    fs::write(path, rendered).map_err(|e| PeakError::io(path, e))?;
    info!(path = %path.display(), runs = export.steps.len(), ?format, "wrote trace");
    Ok(())
}
