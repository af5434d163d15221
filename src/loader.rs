// src/loader.rs
use std::fs;
use std::path::Path;

use serde_json::Deserializer;
use tracing::{debug, warn};

use crate::error::{PeakError, Result};
use crate::grid::Value;

/// Loads a grid from `path`.
///
/// The file holds either a bare JSON array of rows, or an assignment such as
/// `problemMatrix = [[1, 2], [3, 4]]`. Python list literals are accepted:
/// `#` comments run to the end of the line, and a comma right before a
/// closing `]` is dropped. Rows may differ in length; the search only looks
/// at the shortest row's width.
pub fn load_grid(path: &Path, variable: &str) -> Result<Vec<Vec<Value>>> {
    let text = fs::read_to_string(path).map_err(|e| PeakError::io(path, e))?;
    let grid = parse_grid(&text, variable, path)?;

    if let Some(shortest) = grid.iter().map(Vec::len).min() {
        if grid.iter().any(|row| row.len() != shortest) {
            warn!(path = %path.display(), shortest, "ragged rows, extra cells are ignored");
        }
    }
    debug!(path = %path.display(), rows = grid.len(), "loaded grid");
    Ok(grid)
}

/// Parses grid text; `path` is only used in error messages.
pub fn parse_grid(text: &str, variable: &str, path: &Path) -> Result<Vec<Vec<Value>>> {
    let source = strip_comments(text);
    let trimmed = source.trim_start();

    let literal = if trimmed.starts_with('[') {
        trimmed
    } else {
        find_assignment(&source, variable).ok_or_else(|| PeakError::MissingVariable {
            path: path.to_path_buf(),
            variable: variable.to_string(),
        })?
    };

    if !literal.starts_with('[') {
        return Err(PeakError::InvalidGrid {
            path: path.to_path_buf(),
            message: format!("`{variable}` is not a list of rows"),
        });
    }

    let literal = drop_trailing_commas(literal);
    // Only the first value is read; anything after the literal is left alone.
    match Deserializer::from_str(&literal).into_iter::<Vec<Vec<Value>>>().next() {
        Some(Ok(grid)) => Ok(grid),
        Some(Err(e)) => Err(PeakError::json(path, e)),
        None => Err(PeakError::InvalidGrid {
            path: path.to_path_buf(),
            message: "empty input".to_string(),
        }),
    }
}

/// Cuts every line at its first `#`. Grids hold only numbers, so there are
/// no string literals to protect.
fn strip_comments(text: &str) -> String {
    text.lines()
        .map(|line| line.split_once('#').map_or(line, |(code, _)| code))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Removes a `,` followed (after whitespace) by `]`, as in `[1, 2,]`.
fn drop_trailing_commas(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    for (i, c) in literal.char_indices() {
        if c == ',' && literal[i + 1..].trim_start().starts_with(']') {
            continue;
        }
        out.push(c);
    }
    out
}

/// Text following `variable =`, with leading whitespace removed.
fn find_assignment<'t>(source: &'t str, variable: &str) -> Option<&'t str> {
    let mut search_from = 0;
    while let Some(found) = source[search_from..].find(variable) {
        let start = search_from + found;
        let end = start + variable.len();
        search_from = end;

        let standalone = source[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_'));
        if !standalone {
            continue;
        }

        let rest = source[end..].trim_start();
        if let Some(value) = rest.strip_prefix('=') {
            if !value.starts_with('=') {
                return Some(value.trim_start());
            }
        }
    }
    None
}
