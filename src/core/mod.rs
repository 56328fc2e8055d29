//! Aggregates the “business logic” layer.

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod ingest;
pub mod rng;
pub mod schedule;
pub mod series;

// re-export frequently-used items for convenience
pub use color::{AnsiCode, ColorError, Palette, colorize};
pub use config::{Border, ChartOptions, ColorMode};
pub use error::ChartError;
pub use schedule::Every;
pub use series::{Axis, Capacity, Point, Sample, SeriesState, StateError, TimeSeries};
