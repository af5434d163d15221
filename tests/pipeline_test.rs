//! Load a grid file, run every algorithm, and export the trace.

use std::io::Write;

use peakfinder::export::{TraceExport, TraceFormat, write_trace};
use peakfinder::loader::load_grid;
use peakfinder::report::run_all;
use peakfinder::{Algorithm, GridView, Location, TraceEvent, TraceRecord, greedy_ascent};
use pretty_assertions::assert_eq;

#[test]
fn problem_file_to_trace_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("problem.py");
    let mut file = std::fs::File::create(&input).unwrap();
    writeln!(file, "# 3x3 with a single peak").unwrap();
    writeln!(file, "problemMatrix = [").unwrap();
    writeln!(file, "    [1, 2, 1],").unwrap();
    writeln!(file, "    [2, 9, 2],").unwrap();
    writeln!(file, "    [1, 2, 1]").unwrap();
    writeln!(file, "]").unwrap();
    drop(file);

    let grid = load_grid(&input, "problemMatrix").unwrap();
    let root = GridView::new(&grid);
    let (reports, steps) = run_all(&root, &Algorithm::ALL);
    assert!(reports.iter().all(|report| report.is_peak && report.location == Some(Location(1, 1))));

    let output = dir.path().join("trace.jsonp");
    write_trace(&output, &TraceExport { input: &grid, steps }, TraceFormat::Jsonp).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    let body = written.strip_prefix("parse(").and_then(|rest| rest.strip_suffix(')')).unwrap();
    let value: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(value["input"][1][1], 9.0);
    assert_eq!(value["steps"].as_array().unwrap().len(), 4);
    // Algorithm 1 on this grid: one maximum search, one neighbor check, done.
    assert_eq!(
        value["steps"][0],
        serde_json::json!([
            {"type": "findingMaximum", "coords": [[0, 1], [1, 1], [2, 1]]},
            {"type": "foundMaximum", "coord": [1, 1]},
            {"type": "findingNeighbor", "coord": [1, 1]},
            {"type": "foundPeak", "coord": [1, 1]},
        ])
    );
}

#[test]
fn corner_peak_is_found_from_anywhere() {
    let grid = vec![vec![10.0, 9.0], vec![9.0, 8.0]];
    let root = GridView::new(&grid);
    for algorithm in Algorithm::ALL {
        assert_eq!(algorithm.run(&root, None), Some(Location(0, 0)), "{algorithm}");
    }
    for start in [Location(0, 1), Location(1, 0), Location(1, 1)] {
        assert_eq!(greedy_ascent(&root, start, None), Some(Location(0, 0)));
    }
}

#[test]
fn greedy_ascent_trace_ends_with_peak() {
    let grid = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
    let root = GridView::new(&grid);
    let mut record = TraceRecord::new();
    greedy_ascent(&root, Location::ORIGIN, Some(&mut record));

    let events = record.events();
    assert_eq!(events[0], TraceEvent::FindingNeighbor { coord: Location(0, 0) });
    assert_eq!(events[1], TraceEvent::FoundNeighbor { coord: Location(1, 0) });
    assert_eq!(events[events.len() - 2], TraceEvent::FindingNeighbor { coord: Location(1, 1) });
    assert_eq!(events[events.len() - 1], TraceEvent::FoundPeak { coord: Location(1, 1) });
}

#[test]
fn subproblem_events_shrink() {
    let grid: Vec<Vec<f64>> = (0..9)
        .map(|row| (0..9).map(|col| f64::from(row * 9 + col)).collect())
        .collect();
    let root = GridView::new(&grid);

    for algorithm in [Algorithm::DivideAndConquer, Algorithm::QuadrantSearch, Algorithm::AlternatingSplit] {
        let mut record = TraceRecord::new();
        let peak = algorithm.run(&root, Some(&mut record)).unwrap();
        assert_eq!(peak, Location(8, 8), "{algorithm}");

        let mut area = root.num_row() * root.num_col();
        for event in record.events() {
            if let TraceEvent::Subproblem { num_rows, num_cols, .. } = event {
                assert!(num_rows * num_cols < area, "{algorithm} did not shrink");
                area = num_rows * num_cols;
            }
        }
    }
}

#[test]
fn failed_run_reports_error_once() {
    let dir = tempfile::tempdir().unwrap();
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_peakfinder"))
        .arg(dir.path().join("absent.py"))
        .arg("--no-trace")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "{stderr}");
    assert!(lines[0].starts_with("failed to access "));
}
