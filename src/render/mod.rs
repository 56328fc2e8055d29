pub mod braille;
pub mod canvas;
pub mod chart;
pub mod grid;

pub use braille::encode_lines;
pub use canvas::Canvas;
pub use chart::render_chart;
pub use grid::{GridBorder, GridError, render_grid};
