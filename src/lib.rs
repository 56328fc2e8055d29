//! Bounded-memory metric stores plotted as braille charts in the terminal.
//!
//! [`TimeSeries`] absorbs an unbounded sample stream into fixed memory by
//! folding old samples together; [`render_chart`] and [`render_grid`] turn
//! extracted polylines into annotated text blocks. [`render_series`] and
//! [`render_series_grid`] glue the two halves together for the common case.

pub mod cli;
pub mod core;
pub mod render;

pub use core::{
    color::{AnsiCode, ColorError, Palette, colorize},
    config::{Border, ChartOptions, ColorMode},
    error::ChartError,
    schedule::Every,
    series::{
        Axis, Capacity, Point, Sample, SeriesState, StateError, TimeSeries, downsample_mean,
    },
};
pub use render::{Canvas, GridBorder, GridError, encode_lines, render_chart, render_grid};

/// Extract every store over `axis`/`window`, then render one chart.
#[must_use]
pub fn render_series(
    stores: &[(&str, &TimeSeries)],
    axis: Axis,
    window: (f64, f64),
    options: &ChartOptions,
) -> String {
    let extracted: Vec<(&str, Vec<Point>)> = stores
        .iter()
        .map(|(name, series)| (*name, series.extract(axis, window)))
        .collect();
    let series: Vec<(&str, &[Point])> = extracted
        .iter()
        .map(|(name, points)| (*name, points.as_slice()))
        .collect();
    render_chart(&series, options)
}

/// Render a multi-panel dashboard in one call.
///
/// `layout` gives rows of cells, each cell listing the series names it
/// plots. `options.width` and `options.height` size the whole dashboard:
/// each cell gets `width / columns - 2` by `height / rows` (the -2 leaves
/// room for the grid verticals). A name absent from `stores` is
/// [`ChartError::UnknownSeries`].
pub fn render_series_grid(
    stores: &[(&str, &TimeSeries)],
    layout: &[Vec<Vec<&str>>],
    axis: Axis,
    window: (f64, f64),
    options: &ChartOptions,
    border: GridBorder,
) -> Result<String, ChartError> {
    let columns = layout.iter().map(Vec::len).max().unwrap_or(0).max(1);
    let rows = layout.len().max(1);
    let cell_width = (options.width / columns).saturating_sub(2);
    let cell_height = options.height / rows;

    let mut panels: Vec<Vec<String>> = Vec::with_capacity(layout.len());
    for row in layout {
        let mut cells: Vec<String> = Vec::with_capacity(row.len());
        for names in row {
            let mut cell_stores: Vec<(&str, &TimeSeries)> = Vec::with_capacity(names.len());
            for name in names {
                let store = stores
                    .iter()
                    .find(|(candidate, _)| candidate == name)
                    .ok_or_else(|| ChartError::UnknownSeries((*name).to_string()))?;
                cell_stores.push(*store);
            }
            let cell_options = ChartOptions {
                width: cell_width,
                height: cell_height,
                ..options.clone()
            };
            cells.push(render_series(&cell_stores, axis, window, &cell_options));
        }
        panels.push(cells);
    }
    Ok(render_grid(&panels, cell_width, border)?)
}
