// src/main.rs
mod cli;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use peakfinder::export::{TraceExport, write_trace};
use peakfinder::grid::GridView;
use peakfinder::loader::load_grid;
use peakfinder::report::run_all;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    if let Err(e) = run(&cli) {
        eprintln!("{e}");
        std::process::exit(e.exit_code());
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the `-v` level.
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> peakfinder::Result<()> {
    let grid = load_grid(&cli.input, &cli.variable)?;
    let root = GridView::new(&grid);
    info!(rows = root.num_row(), cols = root.num_col(), "searching");

    let (reports, steps) = run_all(&root, &cli.selected_algorithms());
    for report in &reports {
        println!("{report}");
    }

    if !cli.no_trace {
        let export = TraceExport { input: &grid, steps };
        write_trace(&cli.trace_out, &export, cli.format)?;
    }
    Ok(())
}
