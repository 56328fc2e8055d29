//! Chart render options: one canonical shape, every field public.

use std::collections::BTreeMap;

use crate::core::{
    color::Palette,
    constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH},
};

/// Horizontal chrome around the plot body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Border {
    #[default]
    None,
    Top,
    Bottom,
    TopBottom,
    /// Full box; composed through the grid module so both share one set of
    /// box-drawing rules.
    Box,
}

/// How series names map to color ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// No escapes at all.
    #[default]
    Monochrome,
    /// Cycle through the palette's auto ids in series order.
    Auto,
    /// Explicit name → id map; unlisted series fall back to the neutral id.
    Explicit(BTreeMap<String, u8>),
}

/// Immutable parameters handed to the chart renderer.
///
/// `width` and `height` are total character cells, decorations included,
/// so the glyph grid below the chrome is always a whole number of cells.
/// Every combination of fields renders; nothing here can fail validation.
#[derive(Clone, Debug)]
pub struct ChartOptions {
    pub width: usize,
    pub height: usize,
    pub border: Border,
    pub title: Option<String>,
    pub x_range: Option<(f64, f64)>,
    pub y_range: Option<(f64, f64)>,
    pub colors: ColorMode,
    pub legend: bool,
    pub min_max_y: bool,
    pub palette: Palette,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            border: Border::None,
            title: None,
            x_range: None,
            y_range: None,
            colors: ColorMode::Monochrome,
            legend: false,
            min_max_y: false,
            palette: Palette::standard(),
        }
    }
}

impl ChartOptions {
    #[must_use]
    pub fn sized(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }
    #[inline]
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn x_range(mut self, lo: f64, hi: f64) -> Self {
        self.x_range = Some((lo, hi));
        self
    }
    #[inline]
    #[must_use]
    pub fn y_range(mut self, lo: f64, hi: f64) -> Self {
        self.y_range = Some((lo, hi));
        self
    }
    #[inline]
    #[must_use]
    pub fn colors(mut self, colors: ColorMode) -> Self {
        self.colors = colors;
        self
    }
    #[inline]
    #[must_use]
    pub fn legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }
    #[inline]
    #[must_use]
    pub fn min_max_y(mut self, min_max_y: bool) -> Self {
        self.min_max_y = min_max_y;
        self
    }
    #[inline]
    #[must_use]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}
