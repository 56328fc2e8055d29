//! End-to-end coverage: record into stores, extract, compose charts and
//! grids, and round-trip series state through JSON the way a checkpoint
//! loader would.

use trendline::{
    Axis, Border, Capacity, ChartOptions, ColorMode, GridBorder, SeriesState, TimeSeries,
    render_grid, render_series, render_series_grid,
};

fn recorded(values: impl IntoIterator<Item = f64>, capacity: usize) -> TimeSeries {
    let mut series = TimeSeries::with_capacity(capacity);
    for (i, v) in values.into_iter().enumerate() {
        series.record_at(v, i as f64);
    }
    series
}

#[test]
fn record_compress_extract_render() {
    // 2k samples into a k-row store: one fold, shape preserved
    let series = recorded((0..8).map(f64::from), 4);
    assert_eq!(series.step(), 8);
    assert_eq!(series.compression(), 2);

    let points = series.extract(Axis::Step, (0.0, 1.0));
    let values: Vec<f64> = points.iter().map(|&(_, y)| y).collect();
    assert_eq!(values, vec![0.5, 2.5, 4.5, 6.5]);

    let options = ChartOptions::sized(20, 8)
        .border(Border::TopBottom)
        .title("ramp")
        .min_max_y(true);
    let chart = render_series(&[("ramp", &series)], Axis::Step, (0.0, 1.0), &options);
    let lines: Vec<&str> = chart.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines[1].starts_with("ramp:"));
    assert!(lines[2].starts_with("Max: 6.5000"));
    assert!(lines[lines.len() - 2].starts_with("Min: 0.5000"));
    // something actually got drawn
    assert!(chart.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c)));
}

#[test]
fn windowed_extraction_feeds_the_same_pipeline() {
    let series = recorded((0..10).map(f64::from), 32);
    let all = series.extract(Axis::Step, (0.0, 1.0));
    let back = series.extract(Axis::Step, (0.5, 1.0));
    assert_eq!(back.as_slice(), &all[5..]);

    let options = ChartOptions::sized(16, 4).min_max_y(true);
    let chart = render_series(&[("s", &series)], Axis::Step, (0.5, 1.0), &options);
    assert!(chart.lines().next().unwrap().starts_with("Max: 9.0000"));
    assert!(chart.lines().last().unwrap().starts_with("Min: 5.0000"));
}

#[test]
fn state_survives_json_like_a_checkpoint() {
    let series = recorded([0.25, 0.5, 0.75, 1.0, 1.25, 1.5], 4);
    let json = serde_json::to_string(&series.export_state()).unwrap();

    let state: SeriesState = serde_json::from_str(&json).unwrap();
    let restored = TimeSeries::from_state(state).unwrap();
    assert_eq!(restored.step(), series.step());
    assert_eq!(restored.compression(), series.compression());
    assert_eq!(
        restored.extract(Axis::Step, (0.0, 1.0)),
        series.extract(Axis::Step, (0.0, 1.0))
    );
}

#[test]
fn adaptive_state_round_trips_too() {
    let mut series = TimeSeries::new(Capacity::Adaptive);
    for i in 0..5 {
        series.record_at(f64::from(i), f64::from(i));
    }
    let json = serde_json::to_string(&series.export_state()).unwrap();
    assert!(json.contains("\"adaptive\""));
    let restored: SeriesState = serde_json::from_str(&json).unwrap();
    let restored = TimeSeries::from_state(restored).unwrap();
    assert_eq!(restored.mode(), Capacity::Adaptive);
    assert_eq!(restored.samples(), series.samples());
}

#[test]
fn two_rows_grid_line_and_width_counts() {
    let series = recorded((0..6).map(f64::from), 16);
    let options = ChartOptions::sized(20, 4);
    let block = render_series(&[("s", &series)], Axis::Step, (0.0, 1.0), &options);
    let (w, h) = (20, 4);

    // vertical stack: 2h + 3 rule lines, width w + 2 verticals
    let stacked = render_grid(
        &[vec![block.clone()], vec![block.clone()]],
        w,
        GridBorder::Ruled,
    )
    .unwrap();
    assert_eq!(stacked.lines().count(), 2 * h + 3);
    assert!(stacked.lines().all(|l| l.chars().count() == w + 2));

    // side by side: h + 2 rule lines, width 2w + 3 verticals
    let paired = render_grid(&[vec![block.clone(), block]], w, GridBorder::Ruled).unwrap();
    assert_eq!(paired.lines().count(), h + 2);
    assert!(paired.lines().all(|l| l.chars().count() == 2 * w + 3));
}

#[test]
fn dashboard_composes_equal_cells() {
    let cos = recorded((0..64).map(|i| (f64::from(i) / 10.0).cos()), 32);
    let sin = recorded((0..64).map(|i| (f64::from(i) / 10.0).sin()), 32);
    let stores = [("cos", &cos), ("sin", &sin)];
    let layout = vec![vec![vec!["cos"], vec!["sin"]]];

    let options = ChartOptions::sized(44, 8)
        .colors(ColorMode::Auto)
        .legend(true)
        .min_max_y(true);
    let dashboard = render_series_grid(
        &stores,
        &layout,
        Axis::Step,
        (0.0, 1.0),
        &options,
        GridBorder::Ruled,
    )
    .unwrap();

    // cell width 44/2 - 2 = 20; two cells + 3 verticals; 8 rows + 2 rules
    let lines: Vec<&str> = dashboard.lines().collect();
    assert_eq!(lines.len(), 8 + 2);
    for line in &lines {
        let stripped = strip_escapes(line);
        assert_eq!(stripped.chars().count(), 2 * 20 + 3);
    }
}

#[test]
fn empty_stores_keep_the_dashboard_alive() {
    let warm = recorded([1.0, 2.0], 8);
    let cold = TimeSeries::with_capacity(8);
    let options = ChartOptions::sized(20, 6).title("status").legend(true);
    let chart = render_series(
        &[("warm", &warm), ("cold", &cold)],
        Axis::Step,
        (0.0, 1.0),
        &options,
    );
    let lines: Vec<&str> = chart.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("status:"));
    assert!(lines[1].starts_with("warm"));
    assert!(lines[2].starts_with("cold"));
}

fn strip_escapes(line: &str) -> String {
    let mut out = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for e in chars.by_ref() {
                if e == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
