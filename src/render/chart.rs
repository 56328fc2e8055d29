//! Chart composition: scale, rasterize, encode, decorate.
//!
//! One call builds one text block from named polylines. Decorations eat
//! into the requested height so the output never exceeds the cell count
//! the caller asked for; the plot body gets whatever rows remain.

use log::trace;

use crate::core::{
    color::{AnsiCode, AUTO_COLOR_IDS, NEUTRAL_COLOR_ID},
    config::{Border, ChartOptions, ColorMode},
    constants::{BRAILLE_HORIZONTAL_RESOLUTION, BRAILLE_VERTICAL_RESOLUTION, MINMAX_DECIMALS},
    series::Point,
};
use crate::render::{
    braille::encode_lines,
    canvas::Canvas,
    grid::{render_grid, GridBorder},
};

const RULE: &str = "─";

/// Render named polylines into one annotated text block.
///
/// Decoration order is fixed: top rule, title, legend, max annotation,
/// plot body, min annotation, bottom rule. Series with no points keep
/// their legend row and color assignment but are not drawn; with no
/// drawable series at all the decorations still render, so a dashboard
/// stays alive while its series warm up. This function does not fail.
#[must_use]
pub fn render_chart(series: &[(&str, &[Point])], options: &ChartOptions) -> String {
    // reserve decoration rows before sizing the plot body
    let mut width = options.width;
    let mut height = options.height;
    match options.border {
        Border::Box => {
            width = width.saturating_sub(2);
            height = height.saturating_sub(2);
        }
        Border::TopBottom => height = height.saturating_sub(2),
        Border::Top | Border::Bottom => height = height.saturating_sub(1),
        Border::None => {}
    }
    if options.legend {
        height = height.saturating_sub(series.len());
    }
    if options.title.is_some() {
        height = height.saturating_sub(1);
    }
    if options.min_max_y {
        height = height.saturating_sub(2);
    }

    let use_colors = options.colors != ColorMode::Monochrome;
    let ids = assign_colors(series, &options.colors);

    let mut content: Vec<String> = Vec::new();
    if matches!(options.border, Border::Top | Border::TopBottom) {
        content.push(RULE.repeat(width));
    }
    if let Some(title) = &options.title {
        content.push(fit_width(&format!("{title}:"), width));
    }
    if options.legend {
        for ((name, _), id) in series.iter().zip(&ids) {
            let label = fit_width(name, width);
            if use_colors {
                content.push(format!(
                    "{}{label}{}",
                    options.palette.escape(*id),
                    AnsiCode::reset()
                ));
            } else {
                content.push(label);
            }
        }
    }

    let active: Vec<(&[Point], u8)> = series
        .iter()
        .zip(&ids)
        .filter(|((_, points), _)| !points.is_empty())
        .map(|((_, points), &id)| (*points, id))
        .collect();

    if !active.is_empty() {
        let (x_lo, x_hi) = data_extent(&active, |p| p.0);
        let (y_lo, y_hi) = data_extent(&active, |p| p.1);
        let (x_range, x_scale) = resolve_range(options.x_range, (x_lo, x_hi));
        let (y_range, y_scale) = resolve_range(options.y_range, (y_lo, y_hi));

        if options.min_max_y {
            let max_line = format!("Max: {y_hi:.prec$}", prec = MINMAX_DECIMALS);
            content.push(format!("{max_line:<width$}"));
        }

        let canvas_w = width * BRAILLE_HORIZONTAL_RESOLUTION;
        let canvas_h = height * BRAILLE_VERTICAL_RESOLUTION;
        trace!(
            "chart canvas {canvas_w}x{canvas_h}px, {} of {} series drawn",
            active.len(),
            series.len()
        );
        let mut canvas = Canvas::new(canvas_w, canvas_h);

        if x_scale != 0.0 && x_scale.is_finite() && y_scale != 0.0 && y_scale.is_finite() {
            let px_w = canvas_w.saturating_sub(1) as f64;
            let px_h = canvas_h.saturating_sub(1) as f64;
            for (points, id) in &active {
                let normalized: Vec<Point> = points
                    .iter()
                    .map(|&(x, y)| {
                        (
                            (x - x_range.0) / x_scale * px_w,
                            (1.0 - (y - y_range.0) / y_scale) * px_h,
                        )
                    })
                    .collect();
                canvas.draw_polyline(&normalized, *id);
            }
        }
        content.extend(encode_lines(&canvas, &options.palette, use_colors));

        if options.min_max_y {
            let min_line = format!("Min: {y_lo:.prec$}", prec = MINMAX_DECIMALS);
            content.push(format!("{min_line:<width$}"));
        }
    }

    if matches!(options.border, Border::Bottom | Border::TopBottom) {
        content.push(RULE.repeat(width));
    }

    let body = content.join("\n");
    if options.border == Border::Box {
        return match render_grid(&[vec![body.clone()]], width, GridBorder::Ruled) {
            Ok(boxed) => boxed,
            // a single cell cannot mismatch
            Err(_) => body,
        };
    }
    body
}

/// Color id per series, in input order, independent of which series end
/// up drawable. Legends stay stable while a series warms up.
fn assign_colors(series: &[(&str, &[Point])], mode: &ColorMode) -> Vec<u8> {
    series
        .iter()
        .enumerate()
        .map(|(i, (name, _))| match mode {
            ColorMode::Monochrome => NEUTRAL_COLOR_ID,
            ColorMode::Auto => AUTO_COLOR_IDS[i % AUTO_COLOR_IDS.len()],
            ColorMode::Explicit(map) => map.get(*name).copied().unwrap_or(NEUTRAL_COLOR_ID),
        })
        .collect()
}

/// Min/max of one coordinate across every active point. NaN points are
/// skipped; an all-NaN extent comes back inverted-infinite and disables
/// rasterization downstream.
fn data_extent(active: &[(&[Point], u8)], pick: fn(&Point) -> f64) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for (points, _) in active {
        for p in *points {
            lo = lo.min(pick(p));
            hi = hi.max(pick(p));
        }
    }
    (lo, hi)
}

/// Explicit ranges are honored as-is, zero span included (which blanks
/// the body rather than dividing by zero). Auto ranges with zero span
/// widen by ±1 so a flat series draws mid-plot.
fn resolve_range(explicit: Option<(f64, f64)>, data: (f64, f64)) -> ((f64, f64), f64) {
    match explicit {
        Some(range) => (range, range.1 - range.0),
        None => {
            let span = data.1 - data.0;
            if span == 0.0 {
                ((data.0 - 1.0, data.1 + 1.0), 2.0)
            } else {
                (data, span)
            }
        }
    }
}

/// Left-justify and clip to `width` characters.
fn fit_width(text: &str, width: usize) -> String {
    let clipped: String = text.chars().take(width).collect();
    format!("{clipped:<width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(s: &str) -> Vec<&str> {
        s.lines().collect()
    }

    #[test]
    fn output_height_matches_request() {
        let points: Vec<Point> = (0..16).map(|i| (f64::from(i), f64::from(i % 5))).collect();
        let series: Vec<(&str, &[Point])> = vec![("a", &points), ("b", &points)];
        let opts = ChartOptions::sized(24, 12)
            .border(Border::TopBottom)
            .title("metrics")
            .legend(true)
            .min_max_y(true);
        let out = render_chart(&series, &opts);
        assert_eq!(lines(&out).len(), 12);
    }

    #[test]
    fn decoration_order_is_fixed() {
        let points: Vec<Point> = vec![(0.0, 1.0), (1.0, 2.0)];
        let series: Vec<(&str, &[Point])> = vec![("loss", &points)];
        let opts = ChartOptions::sized(20, 8)
            .border(Border::TopBottom)
            .title("run")
            .legend(true)
            .min_max_y(true);
        let out = render_chart(&series, &opts);
        let ls = lines(&out);
        assert!(ls[0].starts_with('─'));
        assert!(ls[1].starts_with("run:"));
        assert!(ls[2].starts_with("loss"));
        assert!(ls[3].starts_with("Max:"));
        assert!(ls[ls.len() - 2].starts_with("Min:"));
        assert!(ls[ls.len() - 1].starts_with('─'));
    }

    #[test]
    fn flat_series_min_max_annotations_match() {
        let points: Vec<Point> = vec![(0.0, 5.0), (1.0, 5.0), (2.0, 5.0)];
        let series: Vec<(&str, &[Point])> = vec![("flat", &points)];
        let opts = ChartOptions::sized(20, 6).min_max_y(true);
        let out = render_chart(&series, &opts);
        let max = lines(&out)[0].trim_start_matches("Max:").trim();
        let min = lines(&out).last().unwrap().trim_start_matches("Min:").trim();
        assert_eq!(max, "5.0000");
        assert_eq!(max, min);
    }

    #[test]
    fn flat_series_still_draws_a_line() {
        let points: Vec<Point> = vec![(0.0, 5.0), (10.0, 5.0)];
        let series: Vec<(&str, &[Point])> = vec![("flat", &points)];
        let out = render_chart(&series, &ChartOptions::sized(10, 4));
        assert!(out.chars().any(|c| c != '\u{2800}' && c != '\n'));
    }

    #[test]
    fn empty_series_render_decorations_only() {
        let empty: Vec<Point> = Vec::new();
        let series: Vec<(&str, &[Point])> = vec![("pending", &empty)];
        let opts = ChartOptions::sized(16, 8)
            .title("warmup")
            .legend(true)
            .min_max_y(true);
        let out = render_chart(&series, &opts);
        let ls = lines(&out);
        assert_eq!(ls.len(), 2);
        assert!(ls[0].starts_with("warmup:"));
        assert!(ls[1].starts_with("pending"));
    }

    #[test]
    fn no_series_no_decorations_is_empty() {
        let out = render_chart(&[], &ChartOptions::sized(16, 8));
        assert!(out.is_empty());
    }

    #[test]
    fn box_border_wraps_everything() {
        let points: Vec<Point> = vec![(0.0, 0.0), (1.0, 1.0)];
        let series: Vec<(&str, &[Point])> = vec![("a", &points)];
        let opts = ChartOptions::sized(12, 6).border(Border::Box);
        let out = render_chart(&series, &opts);
        let ls = lines(&out);
        assert_eq!(ls.len(), 6);
        assert!(ls[0].starts_with('┌') && ls[0].ends_with('┐'));
        assert!(ls[5].starts_with('└') && ls[5].ends_with('┘'));
        for l in &ls {
            assert_eq!(l.chars().count(), 12);
        }
    }

    #[test]
    fn explicit_zero_span_range_blanks_the_body() {
        let points: Vec<Point> = vec![(0.0, 1.0), (1.0, 2.0)];
        let series: Vec<(&str, &[Point])> = vec![("a", &points)];
        let opts = ChartOptions::sized(8, 3).y_range(3.0, 3.0);
        let out = render_chart(&series, &opts);
        assert!(out.chars().all(|c| c == '\u{2800}' || c == '\n'));
    }

    #[test]
    fn empty_title_still_takes_a_row() {
        let points: Vec<Point> = vec![(0.0, 0.0), (1.0, 1.0)];
        let series: Vec<(&str, &[Point])> = vec![("a", &points)];
        let opts = ChartOptions::sized(8, 4).title("");
        let out = render_chart(&series, &opts);
        let ls = lines(&out);
        assert_eq!(ls.len(), 4);
        assert_eq!(ls[0].trim_end(), ":");
    }

    #[test]
    fn monochrome_emits_no_escapes() {
        let points: Vec<Point> = vec![(0.0, 0.0), (5.0, 3.0)];
        let series: Vec<(&str, &[Point])> = vec![("a", &points)];
        let opts = ChartOptions::sized(10, 4).legend(true).min_max_y(true);
        let out = render_chart(&series, &opts);
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn colored_lines_each_reset() {
        let points: Vec<Point> = vec![(0.0, 0.0), (5.0, 3.0)];
        let series: Vec<(&str, &[Point])> = vec![("a", &points)];
        let opts = ChartOptions::sized(10, 4).colors(ColorMode::Auto).legend(true);
        let out = render_chart(&series, &opts);
        for line in out.lines() {
            assert!(line.ends_with(AnsiCode::reset().as_str()));
        }
    }

    #[test]
    fn auto_colors_cycle_in_order() {
        let names: Vec<String> = (0..9).map(|i| format!("s{i}")).collect();
        let series: Vec<(&str, &[Point])> =
            names.iter().map(|n| (n.as_str(), &[][..])).collect();
        let ids = assign_colors(&series, &ColorMode::Auto);
        assert_eq!(ids[0], AUTO_COLOR_IDS[0]);
        assert_eq!(ids[6], AUTO_COLOR_IDS[6]);
        assert_eq!(ids[7], AUTO_COLOR_IDS[0]);
        assert_eq!(ids[8], AUTO_COLOR_IDS[1]);
    }

    #[test]
    fn explicit_map_falls_back_to_neutral() {
        let mut map = std::collections::BTreeMap::new();
        map.insert("known".to_string(), 5u8);
        let series: Vec<(&str, &[Point])> = vec![("known", &[][..]), ("other", &[][..])];
        let ids = assign_colors(&series, &ColorMode::Explicit(map));
        assert_eq!(ids, vec![5, NEUTRAL_COLOR_ID]);
    }

    #[test]
    fn nan_points_do_not_break_autoscale() {
        // the segment between the two trailing finite points still draws
        let points: Vec<Point> = vec![(0.0, 1.0), (1.0, f64::NAN), (2.0, 3.0), (3.0, 2.0)];
        let series: Vec<(&str, &[Point])> = vec![("a", &points)];
        let opts = ChartOptions::sized(10, 4).min_max_y(true);
        let out = render_chart(&series, &opts);
        let ls = lines(&out);
        assert!(ls[0].starts_with("Max: 3.0000"));
        assert!(ls.last().unwrap().starts_with("Min: 1.0000"));
        assert!(out.chars().any(|c| c != '\u{2800}' && c != '\n' && !c.is_ascii()));
    }
}
