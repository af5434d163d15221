// src/lib.rs
//! Local peak finding in 2D grids.
//!
//! A [`GridView`] is a window onto a shared grid; the four strategies in
//! [`search`] each return a cell no smaller than its in-view neighbors, and can
//! report every step they take to a [`TraceSink`].

pub mod error;
pub mod export;
pub mod grid;
pub mod loader;
pub mod report;
pub mod search;
pub mod trace;

pub use error::{PeakError, Result};
pub use grid::{Bounds, GridView, Location, Value};
pub use search::{
    Algorithm, alternating_split_search, cross_product, divide_and_conquer, greedy_ascent, quadrant_search,
};
pub use trace::{Trace, TraceEvent, TraceRecord, TraceSink};
