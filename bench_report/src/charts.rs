//! Chart models for the per-operation performance curves and the speedup
//! comparison.

use itertools::Itertools;
use plotly::{
    common::{DashType, Font, Line, Marker, MarkerSymbol, Mode as TraceMode, Position, TextPosition, Title},
    layout::{Annotation, Axis, BarMode, Legend, Shape, ShapeLine, ShapeType},
    Bar, Configuration, Layout, Plot, Scatter,
};

use crate::{
    analysis::mean_time_ms,
    data::{MeasurementRow, Mode, Operation, Resolution},
    defaults::MIN_SPEEDUP_AXIS_TOP,
    speedup::{speedup_label, SpeedupRow},
};

const PLOT_BACKGROUND_COLOR: &str = "#fafafa";
const PAPER_BACKGROUND_COLOR: &str = "white";
const GRID_COLOR: &str = "rgba(128, 128, 128, 0.3)";

/// Color of the dashed "no speedup" line.
const BASELINE_COLOR: &str = "red";

const LINE_WIDTH: f64 = 3.0;
const MARKER_SIZE: usize = 12;
const VALUE_LABEL_FONT_SIZE: usize = 9;

const SPEEDUP_EXPLANATION: &str = "<b>Speedup Explanation:</b><br>\
• 1.0× = Same speed as Sequential<br>\
• 2.0× = Twice as fast as Sequential<br>\
• 0.5× = Half the speed (2× slower)<br>\
<br>\
MP = Megapixels (image size)<br>\
• 0.01MP = 100×100 = 10,000 pixels<br>\
• 15.5MP = 3876×3999 = 15.5M pixels";

/// Colorblind-friendly color per mode.
fn mode_color(mode: Mode) -> &'static str {
    match mode {
        Mode::Sequential => "#D32F2F",
        Mode::Multithreaded => "#388E3C",
        Mode::Distributed => "#1976D2",
    }
}

fn mode_symbol(mode: Mode) -> MarkerSymbol {
    match mode {
        Mode::Sequential => MarkerSymbol::Circle,
        Mode::Multithreaded => MarkerSymbol::Square,
        Mode::Distributed => MarkerSymbol::TriangleUp,
    }
}

fn new_plot() -> Plot {
    let config = Configuration::default().responsive(true).fill_frame(false);
    let mut plot = Plot::new();
    plot.set_configuration(config);
    plot
}

fn framed_legend() -> Legend {
    Legend::new()
        .background_color(PAPER_BACKGROUND_COLOR)
        .border_color("gray")
        .border_width(1)
}

/// Points of one mode's curve: x is the index into `resolutions`, y the mean
/// execution time in seconds. Resolutions without data are left out.
fn mode_series(
    rows: &[MeasurementRow],
    operation: Operation,
    mode: Mode,
    resolutions: &[Resolution],
) -> (Vec<f64>, Vec<f64>) {
    resolutions
        .iter()
        .enumerate()
        .filter_map(|(i, res)| {
            mean_time_ms(rows, Some(operation), *res, mode).map(|ms| (i as f64, ms / 1000.0))
        })
        .unzip()
}

/// Execution time against image resolution for one operation, one line per mode.
///
/// Returns `None` if there are no measurements for `operation` at all. Modes
/// without data at any of `resolutions` get no line.
pub fn operation_chart(
    rows: &[MeasurementRow],
    operation: Operation,
    resolutions: &[Resolution],
) -> Option<Plot> {
    if !rows.iter().any(|r| r.operation == operation) {
        return None;
    }

    let mut plot = new_plot();

    for mode in Mode::ALL {
        let (x, y) = mode_series(rows, operation, mode, resolutions);
        if x.is_empty() {
            log::debug!("[{}] no {} measurements at the charted resolutions", operation, mode);
            continue;
        }
        let labels = y.iter().map(|s| format!("{:.2}s", s)).collect_vec();
        let trace = Scatter::new(x, y)
            .name(mode.label())
            .mode(TraceMode::LinesMarkersText)
            .line(Line::new().color(mode_color(mode)).width(LINE_WIDTH))
            .marker(
                Marker::new()
                    .color(mode_color(mode))
                    .symbol(mode_symbol(mode))
                    .size(MARKER_SIZE)
                    .line(Line::new().color("white").width(2.0)),
            )
            .opacity(0.9)
            .text_array(labels)
            .text_position(Position::TopCenter)
            .text_font(Font::new().size(VALUE_LABEL_FONT_SIZE));
        plot.add_trace(trace);
    }

    let (tick_values, tick_text): (Vec<f64>, Vec<String>) = resolutions
        .iter()
        .enumerate()
        .map(|(i, res)| (i as f64, res.axis_label()))
        .unzip();

    let x_axis = Axis::new()
        .title(Title::from("Image Resolution"))
        .tick_values(tick_values)
        .tick_text(tick_text)
        .show_grid(false);
    let y_axis = Axis::new()
        .title(Title::from("Execution Time (seconds)"))
        .tick_suffix("s")
        .show_grid(true)
        .grid_color(GRID_COLOR);

    let layout = Layout::new()
        .title(Title::from(
            format!("{} Performance Analysis", operation.title()).as_str(),
        ))
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend(framed_legend())
        .plot_background_color(PLOT_BACKGROUND_COLOR)
        .paper_background_color(PAPER_BACKGROUND_COLOR);
    plot.set_layout(layout);

    Some(plot)
}

fn speedup_bar_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Sequential => "Sequential (Baseline)",
        other => other.label(),
    }
}

/// Grouped bars of the speedup of every mode at every resolution.
///
/// Returns `None` if `speedups` is empty.
pub fn speedup_chart(speedups: &[SpeedupRow]) -> Option<Plot> {
    if speedups.is_empty() {
        return None;
    }

    let mut plot = new_plot();
    let categories = speedups
        .iter()
        .map(|s| s.resolution.to_string())
        .collect_vec();

    for mode in Mode::ALL {
        let values = speedups.iter().map(|s| s.speedup(mode)).collect_vec();
        let labels = values.iter().map(|v| speedup_label(*v)).collect_vec();
        let trace = Bar::new(categories.clone(), values)
            .name(speedup_bar_name(mode))
            .marker(
                Marker::new()
                    .color(mode_color(mode))
                    .line(Line::new().color("white").width(2.0)),
            )
            .opacity(0.8)
            .text_array(labels)
            .text_position(TextPosition::Outside);
        plot.add_trace(trace);
    }

    let highest = speedups
        .iter()
        .flat_map(|s| Mode::ALL.map(|m| s.speedup(m)))
        .fold(0.0_f64, f64::max);
    // Headroom for the labels above the bars.
    let y_top = (highest * 1.15).max(MIN_SPEEDUP_AXIS_TOP);

    let mut layout = Layout::new()
        .title(Title::from(
            "Performance Speedup Comparison<br><sub>(Speedup = Sequential_Time ÷ Method_Time)</sub>",
        ))
        .x_axis(Axis::new().title(Title::from("Image Resolution")))
        .y_axis(
            Axis::new()
                .title(Title::from("Speedup Factor"))
                .range(vec![0.0, y_top])
                .show_grid(true)
                .grid_color(GRID_COLOR),
        )
        .bar_mode(BarMode::Group)
        .legend(framed_legend())
        .plot_background_color(PLOT_BACKGROUND_COLOR)
        .paper_background_color(PAPER_BACKGROUND_COLOR);

    layout.add_shape(
        Shape::new()
            .shape_type(ShapeType::Line)
            .x_ref("paper")
            .x0(0.0)
            .x1(1.0)
            .y0(1.0)
            .y1(1.0)
            .line(
                ShapeLine::new()
                    .color(BASELINE_COLOR)
                    .width(2.0)
                    .dash(DashType::Dash),
            ),
    );
    layout.add_annotation(
        Annotation::new()
            .text(SPEEDUP_EXPLANATION)
            .x_ref("paper")
            .y_ref("paper")
            .x(0.02)
            .y(0.98)
            .show_arrow(false)
            .background_color("lightyellow")
            .font(Font::new().size(VALUE_LABEL_FONT_SIZE)),
    );

    plot.set_layout(layout);
    Some(plot)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::defaults::CANONICAL_RESOLUTIONS;
    use crate::speedup::compute_speedups;

    fn row(operation: Operation, mode: Mode, res: Resolution, ms: f64) -> MeasurementRow {
        MeasurementRow {
            operation,
            mode,
            image_width: res.width,
            image_height: res.height,
            execution_time_ms: ms,
        }
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_operation_chart_without_data() {
        let rows = vec![row(
            Operation::Blur,
            Mode::Sequential,
            Resolution::new(100, 100),
            10.0,
        )];
        assert!(operation_chart(&rows, Operation::Sharpen, &CANONICAL_RESOLUTIONS).is_none());
        assert!(operation_chart(&[], Operation::Blur, &CANONICAL_RESOLUTIONS).is_none());
    }

    #[test]
    fn test_operation_chart_traces_per_mode() {
        let rows = vec![
            row(Operation::EdgeDetection, Mode::Sequential, Resolution::new(100, 100), 100.0),
            row(Operation::EdgeDetection, Mode::Sequential, Resolution::new(100, 100), 300.0),
            row(Operation::EdgeDetection, Mode::Sequential, Resolution::new(640, 480), 1500.0),
            row(Operation::EdgeDetection, Mode::Multithreaded, Resolution::new(640, 480), 500.0),
            // Not a charted resolution
            row(Operation::EdgeDetection, Mode::Distributed, Resolution::new(800, 600), 50.0),
            // Other operation
            row(Operation::Blur, Mode::Distributed, Resolution::new(100, 100), 50.0),
        ];
        let plot = operation_chart(&rows, Operation::EdgeDetection, &CANONICAL_RESOLUTIONS).unwrap();
        let json = plot.to_json();

        assert!(json.contains("Edge Detection Performance Analysis"));
        assert!(json.contains("Execution Time (seconds)"));
        assert_eq!(count(&json, "\"type\":\"scatter\""), 2);
        assert!(json.contains("\"name\":\"Sequential\""));
        assert!(json.contains("\"name\":\"Multithreaded\""));
        assert!(!json.contains("\"name\":\"Distributed\""));
        assert!(json.contains("#D32F2F"));
        assert!(json.contains("#388E3C"));
        // Mean of 100ms and 300ms, in seconds
        assert!(json.contains("\"0.20s\""));
        assert!(json.contains("\"1.50s\""));
        assert!(json.contains("\"0.50s\""));
        assert!(json.contains("640×480<br>(0.31MP)"));
        assert!(json.contains("3876×3999<br>(15.5MP)"));
    }

    #[test]
    fn test_operation_chart_x_is_resolution_index() {
        let rows = vec![
            row(Operation::Blur, Mode::Sequential, Resolution::new(100, 100), 200.0),
            row(Operation::Blur, Mode::Sequential, Resolution::new(640, 480), 1500.0),
            row(Operation::Blur, Mode::Multithreaded, Resolution::new(640, 480), 500.0),
        ];
        let plot = operation_chart(&rows, Operation::Blur, &CANONICAL_RESOLUTIONS).unwrap();
        let json = plot.to_json();

        assert!(json.contains("\"x\":[0.0,1.0]"));
        assert!(json.contains("\"y\":[0.2,1.5]"));
        assert!(json.contains("\"x\":[1.0]"));
        assert!(json.contains("\"y\":[0.5]"));
        assert!(json.contains("\"tickvals\":[0.0,1.0,2.0,3.0,4.0]"));
        assert!(!json.contains("307200"));
    }

    #[test]
    fn test_speedup_chart_empty() {
        assert!(speedup_chart(&[]).is_none());
    }

    #[test]
    fn test_speedup_chart_bars() {
        let res = Resolution::new(1280, 720);
        let rows = vec![
            row(Operation::Blur, Mode::Sequential, res, 400.0),
            row(Operation::Blur, Mode::Multithreaded, res, 100.0),
            row(Operation::Blur, Mode::Distributed, res, 800.0),
        ];
        let speedups = compute_speedups(&rows, &CANONICAL_RESOLUTIONS);
        let plot = speedup_chart(&speedups).unwrap();
        let json = plot.to_json();

        assert_eq!(count(&json, "\"type\":\"bar\""), 3);
        assert!(json.contains("Sequential (Baseline)"));
        assert!(json.contains("\"1.00×\""));
        assert!(json.contains("\"4.00×\""));
        assert!(json.contains("\"2.00× slower\""));
        assert!(json.contains("\"1280×720\""));
        assert!(json.contains("Performance Speedup Comparison"));
        assert!(json.contains("Speedup Factor"));
        assert!(json.contains("Speedup Explanation"));
        // Room above the 4.00× bar
        assert!(json.contains("\"range\":[0.0,4.6"));
    }

    #[test]
    fn test_speedup_chart_axis_and_baseline() {
        let res = Resolution::new(100, 100);
        let rows = vec![
            row(Operation::Sharpen, Mode::Sequential, res, 400.0),
            row(Operation::Sharpen, Mode::Multithreaded, res, 200.0),
            row(Operation::Sharpen, Mode::Distributed, res, 400.0),
        ];
        let speedups = compute_speedups(&rows, &CANONICAL_RESOLUTIONS);
        let plot = speedup_chart(&speedups).unwrap();
        let json = plot.to_json();

        assert!(json.contains("\"range\":[0.0,2.5]"));
        assert!(json.contains("\"type\":\"line\""));
        assert!(json.contains("\"y0\":1.0"));
        assert!(json.contains("\"y1\":1.0"));
        assert!(json.contains("\"dash\":\"dash\""));
        assert!(json.contains("\"color\":\"red\""));
    }
}
