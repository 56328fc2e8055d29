use std::{collections::BTreeMap, fs::File, io::BufReader};

use terminal_size::{Height, Width, terminal_size};

use crate::{
    core::{
        color::{AnsiCode, Palette, colorize},
        config::{Border, ChartOptions, ColorMode},
        constants::{BRAILLE_HORIZONTAL_RESOLUTION, DEFAULT_HEIGHT, DEFAULT_WIDTH},
        error::ChartError,
        ingest,
        rng::Lcg,
        series::{Axis, Capacity, SeriesState, TimeSeries, downsample_mean},
    },
    render::{chart::render_chart, grid::GridBorder},
    render_series, render_series_grid,
};

use super::parse::{CsvArgs, DemoArgs, PlotArgs};

pub fn plot(a: &PlotArgs) -> Result<(), ChartError> {
    let axis = parse_axis(&a.axis)?;
    let window = (a.window[0], a.window[1]);

    let mut stores: Vec<(String, TimeSeries)> = Vec::with_capacity(a.checkpoints.len());
    for path in &a.checkpoints {
        let file = File::open(path)?;
        let checkpoint: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;
        let state: SeriesState =
            serde_json::from_value(walk_keys(&checkpoint, &a.keys, path)?.clone())?;
        stores.push((path.clone(), TimeSeries::from_state(state)?));
    }

    let (width, height) = chart_dims(a.width, a.height);
    let mut options = ChartOptions::sized(width, height)
        .border(Border::Box)
        .colors(ColorMode::Auto)
        .legend(true)
        .min_max_y(true);
    if !a.keys.is_empty() {
        options = options.title(format!("[{}]", a.keys.join("][")));
    }

    let refs: Vec<(&str, &TimeSeries)> = stores.iter().map(|(n, s)| (n.as_str(), s)).collect();
    println!("{}", render_series(&refs, axis, window, &options));
    Ok(())
}

pub fn csv(a: &CsvArgs) -> Result<(), ChartError> {
    let axis = parse_axis(&a.axis)?;
    let window = (a.window[0], a.window[1]);
    let measurements = ingest::read_values_from_path(&a.file)?;

    let mut series = if a.adaptive {
        TimeSeries::new(Capacity::Adaptive)
    } else {
        TimeSeries::with_capacity(a.capacity)
    };
    ingest::replay(&mut series, &measurements);

    let (width, height) = chart_dims(a.width, a.height);
    let name = a.title.as_deref().unwrap_or(&a.file);
    let mut options = ChartOptions::sized(width, height)
        .border(Border::TopBottom)
        .min_max_y(true);
    if let Some(title) = &a.title {
        options = options.title(title.clone());
    }
    if let Some(color) = &a.color {
        let mut palette = Palette::standard();
        palette.set(2, AnsiCode::from_name(color)?);
        let mut map = BTreeMap::new();
        map.insert(name.to_string(), 2u8);
        options = options.colors(ColorMode::Explicit(map)).palette(palette);
    }

    let points = series.extract(axis, window);
    let points = downsample_mean(&points, width * BRAILLE_HORIZONTAL_RESOLUTION);
    println!("{}", render_chart(&[(name, &points)], &options));
    Ok(())
}

pub fn demo(a: &DemoArgs) -> Result<(), ChartError> {
    use std::f64::consts::PI;

    let mut cos = TimeSeries::with_capacity(512);
    let mut sin = TimeSeries::with_capacity(512);
    let mut lin = TimeSeries::with_capacity(512);
    let mut noise = TimeSeries::with_capacity(512);
    let mut rng = Lcg::seed(a.seed);

    let steps = a.steps.max(1);
    for i in 0..steps {
        let phase = i as f64 / steps as f64;
        let t = i as f64;
        cos.record_at((phase * 5.0 * PI).cos(), t);
        sin.record_at((phase * 2.0 * PI).sin(), t);
        lin.record_at(phase.mul_add(2.0, -1.0), t);
        noise.record_at((phase * 5.0 * PI).cos() + rng.uniform() * 0.75, t);
    }

    let stores: [(&str, &TimeSeries); 4] =
        [("cos", &cos), ("sin", &sin), ("lin", &lin), ("noise", &noise)];
    let (width, height) = chart_dims(None, None);

    let options = ChartOptions::sized(width, height)
        .border(Border::Top)
        .title("demo")
        .colors(ColorMode::Auto)
        .legend(true)
        .min_max_y(true);
    println!("{}", render_series(&stores, Axis::Step, (0.0, 1.0), &options));

    let layout: Vec<Vec<Vec<&str>>> = vec![
        vec![vec!["cos"], vec!["sin"]],
        vec![vec!["lin"], vec!["noise"]],
    ];
    let grid_options = ChartOptions::sized(width, height * 2)
        .colors(ColorMode::Auto)
        .legend(true)
        .min_max_y(true);
    let dashboard = render_series_grid(
        &stores,
        &layout,
        Axis::Step,
        (0.0, 1.0),
        &grid_options,
        GridBorder::Ruled,
    )?;
    println!("{dashboard}");
    Ok(())
}

/// Pretty-print the palette ids and the `--color` syntax.
pub fn colors() {
    println!("\nPalette (auto-cycled in id order):");
    println!("  2  {}", colorize(&AnsiCode::red(), "red"));
    println!("  3  {}", colorize(&AnsiCode::blue(), "blue"));
    println!("  4  {}", colorize(&AnsiCode::green(), "green"));
    println!("  5  {}", colorize(&AnsiCode::yellow(), "yellow"));
    println!("  6  {}", colorize(&AnsiCode::magenta(), "magenta"));
    println!("  7  {}", colorize(&AnsiCode::orange(), "orange"));
    println!("  8  {}", colorize(&AnsiCode::pink(), "pink"));
    println!(
        "\n--color also accepts cyan, white, default, or any hex code, e.g. {}\n",
        colorize(&AnsiCode::rgb(0x60, 0x48, 0xc1), "#6048c1")
    );
}

// --- Helpers ---

fn parse_axis(name: &str) -> Result<Axis, ChartError> {
    Axis::from_name(name).ok_or_else(|| ChartError::InvalidAxis(name.to_string()))
}

/// Walk nested map keys / array indices down to the series state.
fn walk_keys<'a>(
    mut value: &'a serde_json::Value,
    keys: &[String],
    path: &str,
) -> Result<&'a serde_json::Value, ChartError> {
    let mut trail = path.to_string();
    for key in keys {
        trail = format!("{trail}[{key}]");
        let next = match key.parse::<usize>() {
            Ok(index) if value.is_array() => value.get(index),
            _ => value.get(key.as_str()),
        };
        value = next.ok_or_else(|| ChartError::MissingKey(trail.clone()))?;
    }
    Ok(value)
}

/// Explicit dimensions win; otherwise the terminal's, minus two rows so
/// the shell prompt does not scroll the chart; otherwise 80×20.
fn chart_dims(width: Option<usize>, height: Option<usize>) -> (usize, usize) {
    let term = terminal_size();
    let w = width
        .unwrap_or_else(|| term.map_or(DEFAULT_WIDTH, |(Width(w), _)| w as usize));
    let h = height.unwrap_or_else(|| {
        term.map_or(DEFAULT_HEIGHT, |(_, Height(h))| {
            (h as usize).saturating_sub(2)
        })
    });
    (w.max(4), h.max(1))
}
