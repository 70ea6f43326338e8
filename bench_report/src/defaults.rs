//! Centralized default values for bench-report.
//!
//! These are used as fallback values when neither the command line nor the
//! configuration file provide a setting.

use bench_report_cli_types::FigureFormat;

use crate::data::Resolution;

// ============================================================================
// Input / Output Defaults
// ============================================================================

/// CSV written by the benchmark harness, relative to the working directory.
pub const DEFAULT_INPUT_PATH: &str = "results/timing_logs/processing_times.csv";

/// Directory receiving all figures and the LaTeX snippet.
pub const DEFAULT_OUTPUT_DIR: &str = "graphs";

/// Formats written for every figure.
pub const DEFAULT_FIGURE_FORMATS: [FigureFormat; 2] = [FigureFormat::Png, FigureFormat::Pdf];

/// Name of the configuration file searched upward from the working directory.
pub const CONFIG_FILE_NAME: &str = ".benchreportconfig";

/// Name of the generated LaTeX snippet inside the output directory.
pub const LATEX_FILE_NAME: &str = "latex_figures.tex";

/// File stem of the speedup comparison chart.
pub const SPEEDUP_FIGURE_STEM: &str = "speedup_summary";

// ============================================================================
// Figure Geometry Defaults
// ============================================================================

/// Pixel size of a per-operation chart before scaling.
pub const OPERATION_FIGURE_SIZE: (usize, usize) = (1200, 800);

/// Pixel size of the speedup chart before scaling.
pub const SPEEDUP_FIGURE_SIZE: (usize, usize) = (1400, 800);

/// Scale factor applied by the static exporter.
///
/// Roughly matches the 300 dpi expected for printed figures.
pub const DEFAULT_FIGURE_SCALE: f64 = 3.0;

/// Lower bound for the top of the speedup chart's y axis.
pub const MIN_SPEEDUP_AXIS_TOP: f64 = 2.5;

// ============================================================================
// Analysis Defaults
// ============================================================================

/// Image sizes charted on the x axis, from very small to very large.
pub const CANONICAL_RESOLUTIONS: [Resolution; 5] = [
    Resolution::new(100, 100),
    Resolution::new(640, 480),
    Resolution::new(1280, 720),
    Resolution::new(1920, 1080),
    Resolution::new(3876, 3999),
];
