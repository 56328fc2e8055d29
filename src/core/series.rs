//! Bounded-memory metric store.
//!
//! A [`TimeSeries`] absorbs an unbounded stream of scalar samples into a
//! fixed (or doubling) number of rows by averaging runs of consecutive
//! steps together once the rows fill up. Folding is lossy and irreversible
//! but keeps the overall shape of the series, which is all a terminal chart
//! can show anyway.

use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::constants::DEFAULT_CAPACITY;

/// An (x, y) pair ready for rasterization.
pub type Point = (f64, f64);

/// One physical storage row: the running mean of every logical step folded
/// into it so far. `step` and `time` are means too, so they stay meaningful
/// as x coordinates after compression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub step: f64,
    pub time: f64,
}

impl Sample {
    pub const ZERO: Self = Self {
        value: 0.0,
        step: 0.0,
        time: 0.0,
    };
}

// --- Capacity ---

/// Storage policy for a series.
///
/// `Fixed(n)` holds exactly `n` rows forever and doubles `compression`
/// when they fill. `Adaptive` keeps `compression = 1` and doubles the row
/// count instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "CapacityRepr", into = "CapacityRepr")]
pub enum Capacity {
    Fixed(usize),
    Adaptive,
}

/// Wire shape: a bare integer or the string `"adaptive"`.
#[derive(Deserialize, Serialize)]
#[serde(untagged)]
enum CapacityRepr {
    Count(usize),
    Keyword(String),
}

impl TryFrom<CapacityRepr> for Capacity {
    type Error = String;

    fn try_from(repr: CapacityRepr) -> Result<Self, Self::Error> {
        match repr {
            CapacityRepr::Count(n) => Ok(Self::Fixed(n)),
            CapacityRepr::Keyword(s) if s == "adaptive" => Ok(Self::Adaptive),
            CapacityRepr::Keyword(s) => Err(format!("unknown capacity `{s}`")),
        }
    }
}

impl From<Capacity> for CapacityRepr {
    fn from(capacity: Capacity) -> Self {
        match capacity {
            Capacity::Fixed(n) => Self::Count(n),
            Capacity::Adaptive => Self::Keyword("adaptive".into()),
        }
    }
}

// --- Axis ---

/// Which stored field becomes x when extracting points (value is always y).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Step,
    Time,
    /// Time with the first row's timestamp subtracted.
    RelativeTime,
}

impl Axis {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "step" => Some(Self::Step),
            "time" => Some(Self::Time),
            "relative-time" | "relative_time" => Some(Self::RelativeTime),
            _ => None,
        }
    }
}

// --- TimeSeries ---

#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    mode: Capacity,
    step: u64,
    compression: u64,
    rows: Vec<Sample>,
}

impl TimeSeries {
    /// Create an empty store. `Fixed(0)` is promoted to `Fixed(1)`, since a
    /// zero-row store could never absorb a sample.
    #[must_use]
    pub fn new(mode: Capacity) -> Self {
        let (mode, rows) = match mode {
            Capacity::Fixed(n) => {
                let n = n.max(1);
                (Capacity::Fixed(n), vec![Sample::ZERO; n])
            }
            Capacity::Adaptive => (Capacity::Adaptive, vec![Sample::ZERO; 1]),
        };
        Self {
            mode,
            step: 0,
            compression: 1,
            rows,
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(Capacity::Fixed(capacity))
    }

    #[must_use]
    pub fn mode(&self) -> Capacity {
        self.mode
    }

    /// Count of `record` calls so far.
    #[must_use]
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Logical steps folded into each physical row.
    #[must_use]
    pub fn compression(&self) -> u64 {
        self.compression
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.step == 0
    }

    /// Append one sample at the current step, stamped with wall-clock time.
    pub fn record(&mut self, value: f64) {
        self.record_at(value, unix_time());
    }

    /// Append one sample with a caller-supplied timestamp. Non-finite
    /// values flow through the running mean untouched.
    pub fn record_at(&mut self, value: f64, time: f64) {
        let mut row = (self.step / self.compression) as usize;
        while row >= self.rows.len() {
            match self.mode {
                Capacity::Adaptive => {
                    let grown = self.rows.len() * 2;
                    self.rows.resize(grown, Sample::ZERO);
                    debug!("series storage grew to {grown} rows");
                }
                Capacity::Fixed(capacity) => {
                    self.compression *= 2;
                    self.rows = self.rows.chunks(2).map(fold_rows).collect();
                    self.rows.resize(capacity, Sample::ZERO);
                    debug!(
                        "series compression doubled to {} ({capacity} rows)",
                        self.compression
                    );
                }
            }
            row = (self.step / self.compression) as usize;
        }

        let n = (self.step % self.compression) as f64;
        let prev = self.rows[row];
        self.rows[row] = Sample {
            value: (prev.value * n + value) / (n + 1.0),
            step: (prev.step * n + self.step as f64) / (n + 1.0),
            time: (prev.time * n + time) / (n + 1.0),
        };
        self.step += 1;
    }

    /// Rows written so far (the zero-filled tail is excluded).
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        let filled = self.step.div_ceil(self.compression) as usize;
        &self.rows[..filled.min(self.rows.len())]
    }

    /// Extract (x, y) points over `axis`, then keep the fractional
    /// `window` of them: `start = round(window.0 * n)`,
    /// `end = round(window.1 * n)`, both clamped into range.
    #[must_use]
    pub fn extract(&self, axis: Axis, window: (f64, f64)) -> Vec<Point> {
        let rows = self.samples();
        let t0 = match axis {
            Axis::RelativeTime => rows.first().map_or(0.0, |s| s.time),
            Axis::Step | Axis::Time => 0.0,
        };
        let points: Vec<Point> = rows
            .iter()
            .map(|s| match axis {
                Axis::Step => (s.step, s.value),
                Axis::Time => (s.time, s.value),
                Axis::RelativeTime => (s.time - t0, s.value),
            })
            .collect();

        let (start, end) = window_bounds(points.len(), window);
        points[start..end].to_vec()
    }

    // --- State export / import ---

    /// Snapshot of the four persistent fields as primitive types.
    #[must_use]
    pub fn export_state(&self) -> SeriesState {
        SeriesState {
            capacity: self.mode,
            step: self.step,
            rows: self
                .rows
                .iter()
                .map(|s| vec![s.value, s.step, s.time])
                .collect(),
            compression: self.compression,
        }
    }

    /// Rebuild a store from an exported state.
    ///
    /// Short row vectors are zero-filled back to the storage length;
    /// anything shape-inconsistent is a [`StateError`].
    pub fn from_state(state: SeriesState) -> Result<Self, StateError> {
        if state.compression == 0 {
            return Err(StateError::ZeroCompression);
        }
        if state.capacity == Capacity::Fixed(0) {
            return Err(StateError::ZeroCapacity);
        }

        let mut rows = Vec::with_capacity(state.rows.len());
        for (index, row) in state.rows.iter().enumerate() {
            if row.len() != 3 {
                return Err(StateError::RowWidth {
                    row: index,
                    found: row.len(),
                });
            }
            rows.push(Sample {
                value: row[0],
                step: row[1],
                time: row[2],
            });
        }

        let storage = match state.capacity {
            Capacity::Fixed(capacity) => {
                if rows.len() > capacity {
                    return Err(StateError::TooManyRows {
                        found: rows.len(),
                        capacity,
                    });
                }
                capacity
            }
            Capacity::Adaptive => rows.len().max(1),
        };
        rows.resize(storage, Sample::ZERO);

        let logical = state.step.div_ceil(state.compression) as usize;
        if logical > storage {
            return Err(StateError::Inconsistent { logical, storage });
        }

        Ok(Self {
            mode: state.capacity,
            step: state.step,
            compression: state.compression,
            rows,
        })
    }

    /// Replace this store's contents with an imported state. A failed
    /// import leaves the store untouched.
    pub fn import_state(&mut self, state: SeriesState) -> Result<(), StateError> {
        *self = Self::from_state(state)?;
        Ok(())
    }
}

impl Default for TimeSeries {
    fn default() -> Self {
        Self::new(Capacity::Fixed(DEFAULT_CAPACITY))
    }
}

/// Exported store state: four fields, primitive types only. `rows` accepts
/// the alias `data` so states written by older tooling still load.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SeriesState {
    pub capacity: Capacity,
    pub step: u64,
    #[serde(alias = "data")]
    pub rows: Vec<Vec<f64>>,
    pub compression: u64,
}

// --- Errors ---

#[derive(Debug, PartialEq, Eq)]
pub enum StateError {
    /// A row vector was not exactly `[value, step, time]`.
    RowWidth { row: usize, found: usize },
    ZeroCompression,
    ZeroCapacity,
    /// More rows than a fixed capacity can hold.
    TooManyRows { found: usize, capacity: usize },
    /// `step / compression` points past the storage that was provided.
    Inconsistent { logical: usize, storage: usize },
}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateError::RowWidth { row, found } => {
                write!(f, "state row {row} has width {found}, expected 3")
            }
            StateError::ZeroCompression => f.write_str("state compression must be positive"),
            StateError::ZeroCapacity => f.write_str("state capacity must be positive"),
            StateError::TooManyRows { found, capacity } => {
                write!(f, "state has {found} rows but capacity {capacity}")
            }
            StateError::Inconsistent { logical, storage } => write!(
                f,
                "state step/compression imply {logical} rows but storage holds {storage}"
            ),
        }
    }
}

impl std::error::Error for StateError {}

// --- Helpers ---

/// Mean of a fold group (normally a pair; a trailing odd row folds alone).
fn fold_rows(group: &[Sample]) -> Sample {
    let n = group.len() as f64;
    let sum = group.iter().fold(Sample::ZERO, |acc, s| Sample {
        value: acc.value + s.value,
        step: acc.step + s.step,
        time: acc.time + s.time,
    });
    Sample {
        value: sum.value / n,
        step: sum.step / n,
        time: sum.time / n,
    }
}

fn window_bounds(n: usize, window: (f64, f64)) -> (usize, usize) {
    let scale = |fraction: f64| -> usize {
        if fraction.is_nan() {
            return 0;
        }
        let n = n as f64;
        (fraction * n).round().clamp(0.0, n) as usize
    };
    let start = scale(window.0);
    let end = scale(window.1).max(start);
    (start, end)
}

/// Seconds since the Unix epoch; 0.0 if the clock sits before it.
fn unix_time() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64())
}

/// Shrink a polyline to at most `target` points by averaging runs of
/// `len / target` consecutive points (both coordinates). Inputs already at
/// or under `target` pass through; remainder points past the last full run
/// are dropped.
#[must_use]
pub fn downsample_mean(points: &[Point], target: usize) -> Vec<Point> {
    if target == 0 || points.len() <= target {
        return points.to_vec();
    }
    let run = points.len() / target;
    points
        .chunks_exact(run)
        .take(target)
        .map(|chunk| {
            let (sx, sy) = chunk
                .iter()
                .fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));
            let n = chunk.len() as f64;
            (sx / n, sy / n)
        })
        .collect()
}
