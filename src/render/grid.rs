//! Multi-panel composition: rows of rendered blocks joined into one
//! text block, with optional ruled or space-padded borders.

use std::fmt;

// box drawing characters
const HORIZONTAL: &str = "─";
const VERTICAL: &str = "│";
const TOP_LEFT: &str = "┌";
const TOP_TEE: &str = "┬";
const TOP_RIGHT: &str = "┐";
const LEFT_TEE: &str = "├";
const CROSS: &str = "┼";
const RIGHT_TEE: &str = "┤";
const BOTTOM_LEFT: &str = "└";
const BOTTOM_TEE: &str = "┴";
const BOTTOM_RIGHT: &str = "┘";
const SPACE: &str = " ";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GridBorder {
    #[default]
    None,
    /// Box-drawing rules between and around cells.
    Ruled,
    /// Same geometry as `Ruled`, all separators blank.
    Spaced,
}

#[derive(Debug, PartialEq, Eq)]
pub enum GridError {
    /// Cells within one panel row disagree on line count. The caller
    /// composed the row from differently-sized blocks; that cannot be
    /// papered over at this level.
    MismatchedCellSize {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::MismatchedCellSize {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid row {row}: cell is {found} lines tall, expected {expected}"
            ),
        }
    }
}
impl std::error::Error for GridError {}

/// Arrange rendered text blocks into a grid.
///
/// Every cell must be `cell_width` characters wide (not checked) and all
/// cells within a row must be equally tall (checked). Short rows are
/// padded with blank cells. The column count is the longest row's length.
pub fn render_grid(
    panels: &[Vec<String>],
    cell_width: usize,
    border: GridBorder,
) -> Result<String, GridError> {
    let columns = panels.iter().map(Vec::len).max().unwrap_or(0).max(1);

    let rule = |left: &str, join: &str, right: &str, fill: &str| -> String {
        let segment = fill.repeat(cell_width);
        let mut line = String::with_capacity((cell_width + 1) * columns + 1);
        line.push_str(left);
        for i in 0..columns {
            if i > 0 {
                line.push_str(join);
            }
            line.push_str(&segment);
        }
        line.push_str(right);
        line
    };
    let spacer = || rule(SPACE, SPACE, SPACE, SPACE);

    let mut content: Vec<String> = Vec::new();
    match border {
        GridBorder::Ruled => content.push(rule(TOP_LEFT, TOP_TEE, TOP_RIGHT, HORIZONTAL)),
        GridBorder::Spaced => content.push(spacer()),
        GridBorder::None => {}
    }

    for (i, row) in panels.iter().enumerate() {
        let blank_cell: String;
        let mut cells: Vec<Vec<&str>> = row.iter().map(|cell| cell.split('\n').collect()).collect();

        let height = cells.first().map_or(0, Vec::len);
        for cell in &cells {
            if cell.len() != height {
                return Err(GridError::MismatchedCellSize {
                    row: i,
                    expected: height,
                    found: cell.len(),
                });
            }
        }

        if cells.len() < columns {
            blank_cell = SPACE.repeat(cell_width);
            while cells.len() < columns {
                cells.push(vec![blank_cell.as_str(); height]);
            }
        }

        for line_idx in 0..height {
            let mut line = String::new();
            let (lead, join) = match border {
                GridBorder::Ruled => (VERTICAL, VERTICAL),
                GridBorder::Spaced => (SPACE, SPACE),
                GridBorder::None => ("", ""),
            };
            line.push_str(lead);
            for (c, cell) in cells.iter().enumerate() {
                if c > 0 {
                    line.push_str(join);
                }
                line.push_str(cell[line_idx]);
            }
            line.push_str(lead);
            content.push(line);
        }

        if i != panels.len() - 1 {
            match border {
                GridBorder::Ruled => content.push(rule(LEFT_TEE, CROSS, RIGHT_TEE, HORIZONTAL)),
                GridBorder::Spaced => content.push(spacer()),
                GridBorder::None => {}
            }
        }
    }

    match border {
        GridBorder::Ruled => content.push(rule(BOTTOM_LEFT, BOTTOM_TEE, BOTTOM_RIGHT, HORIZONTAL)),
        GridBorder::Spaced => content.push(spacer()),
        GridBorder::None => {}
    }

    Ok(content.join("\n"))
}
