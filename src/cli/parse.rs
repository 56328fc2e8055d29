use clap::{Parser, Subcommand};

use crate::core::constants::DEFAULT_CAPACITY;

/// Top-level CLI structure.
#[derive(Parser)]
#[command(
    name = "trendline",
    about = "Bounded-memory metric logs plotted as braille charts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Plot series states stored in JSON checkpoints
    Plot(PlotArgs),
    /// Replay a value stream from a CSV file and plot it
    Csv(CsvArgs),
    /// Render a deterministic multi-series dashboard
    Demo(DemoArgs),
    /// Show the palette and color syntax
    Colors,
}

/// `trendline plot …`
#[derive(Parser, Debug)]
pub struct PlotArgs {
    /// Checkpoint files (JSON), one series per file
    #[arg(value_name = "CHECKPOINT", required = true)]
    pub checkpoints: Vec<String>,

    /// Nested keys (map keys or array indices) locating the series state
    /// inside each checkpoint
    #[arg(long, num_args = 0.., value_name = "KEY")]
    pub keys: Vec<String>,

    /// X axis: step, time or relative-time
    #[arg(long, default_value = "step")]
    pub axis: String,

    /// Fractional window over the extracted points
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"], default_values_t = [0.0, 1.0])]
    pub window: Vec<f64>,

    /// Chart width in cells (terminal width if omitted)
    #[arg(long)]
    pub width: Option<usize>,
    /// Chart height in cells (terminal height if omitted)
    #[arg(long)]
    pub height: Option<usize>,
}

/// `trendline csv …`
#[derive(Parser, Debug)]
pub struct CsvArgs {
    /// CSV path (use `-` for stdin); lines of `value` or `time,value`
    #[arg(value_name = "FILE", default_value = "-")]
    pub file: String,

    /// Chart title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Rows kept before compression starts folding samples together
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Grow storage instead of compressing
    #[arg(long, conflicts_with = "capacity")]
    pub adaptive: bool,

    /// X axis: step, time or relative-time
    #[arg(long, default_value = "step")]
    pub axis: String,

    /// Fractional window over the extracted points
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"], default_values_t = [0.0, 1.0])]
    pub window: Vec<f64>,

    /// Series color (name or `#RRGGBB`)
    #[arg(long)]
    pub color: Option<String>,

    /// Chart width in cells (terminal width if omitted)
    #[arg(long)]
    pub width: Option<usize>,
    /// Chart height in cells (terminal height if omitted)
    #[arg(long)]
    pub height: Option<usize>,
}

/// `trendline demo …`
#[derive(Parser, Debug)]
pub struct DemoArgs {
    /// Samples recorded into each demo series
    #[arg(long, default_value_t = 5000)]
    pub steps: usize,
    /// Seed for the noise series
    #[arg(long, default_value_t = 7)]
    pub seed: u64,
}
