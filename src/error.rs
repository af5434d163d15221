// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PeakError>;

/// Failures of the I/O wrappers around the search. The searches themselves
/// never fail.
#[derive(Debug, Error)]
pub enum PeakError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no assignment to `{variable}` found in {path}")]
    MissingVariable { path: PathBuf, variable: String },

    #[error("invalid grid in {path}: {message}")]
    InvalidGrid { path: PathBuf, message: String },
}

impl PeakError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json { path: path.into(), source }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { .. } => 2,
            _ => 1,
        }
    }
}
