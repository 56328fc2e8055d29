//! Centralised error types used across the crate.

use std::{error::Error, fmt, io};

use crate::core::{color::ColorError, ingest::ParseCsvError, series::StateError};
use crate::render::grid::GridError;

/// Top-level error type bubbled up by public APIs.
#[derive(Debug)]
pub enum ChartError {
    Io(io::Error),
    Csv(ParseCsvError),
    Json(serde_json::Error),
    Color(ColorError),
    State(StateError),
    Grid(GridError),
    /// A panel layout named a series that was never registered.
    UnknownSeries(String),
    /// A checkpoint key path did not resolve.
    MissingKey(String),
    InvalidAxis(String),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::Io(e) => write!(f, "{e}"),
            ChartError::Csv(e) => write!(f, "{e}"),
            ChartError::Json(e) => write!(f, "{e}"),
            ChartError::Color(e) => write!(f, "{e}"),
            ChartError::State(e) => write!(f, "{e}"),
            ChartError::Grid(e) => write!(f, "{e}"),
            ChartError::UnknownSeries(name) => write!(f, "unknown series `{name}`"),
            ChartError::MissingKey(path) => write!(f, "checkpoint key `{path}` not found"),
            ChartError::InvalidAxis(name) => {
                write!(f, "unknown axis `{name}`, expected step, time or relative-time")
            }
        }
    }
}
impl Error for ChartError {}

// automatic conversions
impl From<io::Error> for ChartError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
impl From<ParseCsvError> for ChartError {
    fn from(e: ParseCsvError) -> Self {
        Self::Csv(e)
    }
}
impl From<serde_json::Error> for ChartError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
impl From<ColorError> for ChartError {
    fn from(e: ColorError) -> Self {
        Self::Color(e)
    }
}
impl From<StateError> for ChartError {
    fn from(e: StateError) -> Self {
        Self::State(e)
    }
}
impl From<GridError> for ChartError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
