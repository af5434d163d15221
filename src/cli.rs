// src/cli.rs
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use peakfinder::export::TraceFormat;
use peakfinder::search::Algorithm;

#[derive(Debug, Parser)]
#[command(name = "peakfinder", about = "Find a peak in a 2D grid with four search strategies", version)]
pub struct Cli {
    /// File holding the grid, as a JSON array or a `<variable> = [[...]]` assignment.
    #[arg(default_value = "problem.py")]
    pub input: PathBuf,

    /// Name of the variable holding the grid.
    #[arg(long, default_value = "problemMatrix")]
    pub variable: String,

    /// Where to write the execution trace.
    #[arg(long, default_value = "trace.jsonp")]
    pub trace_out: PathBuf,

    #[arg(long, value_enum, default_value_t = TraceFormat::Jsonp)]
    pub format: TraceFormat,

    /// Skip writing the trace file.
    #[arg(long)]
    pub no_trace: bool,

    /// Run only these algorithms (repeatable). Defaults to all four.
    #[arg(short, long = "algorithm", value_enum)]
    pub algorithms: Vec<Algorithm>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn selected_algorithms(&self) -> Vec<Algorithm> {
        if self.algorithms.is_empty() {
            Algorithm::ALL.to_vec()
        } else {
            self.algorithms.clone()
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
