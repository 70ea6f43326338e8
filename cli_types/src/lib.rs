use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FigureFormat {
    Png,
    Pdf,
    Svg,
    Html,
}

impl FigureFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            FigureFormat::Png => "png",
            FigureFormat::Pdf => "pdf",
            FigureFormat::Svg => "svg",
            FigureFormat::Html => "html",
        }
    }

    /// Whether the format needs a rasterizer/vector exporter instead of plain HTML.
    pub fn is_static(&self) -> bool {
        !matches!(self, FigureFormat::Html)
    }
}

impl FromStr for FigureFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(FigureFormat::Png),
            "pdf" => Ok(FigureFormat::Pdf),
            "svg" => Ok(FigureFormat::Svg),
            "html" => Ok(FigureFormat::Html),
            _ => Err(anyhow!(
                "Invalid figure format: {}. Valid values are 'png', 'pdf', 'svg' or 'html'",
                s
            )),
        }
    }
}

/// Summarize benchmark timing logs into statistics, charts and a LaTeX figure snippet.
///
/// Without arguments, reads `results/timing_logs/processing_times.csv` and writes all
/// figures to `graphs/`.
#[derive(Parser)]
#[command(version, name = "bench-report")]
pub struct Cli {
    /// Increase verbosity level (can be specified multiple times.) The first level sets level
    /// "info", second sets level "debug", and third sets level "trace" for the logger.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// CSV file with the timing measurements
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Directory receiving the figures and the LaTeX snippet
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Figure format to write (can be specified multiple times)
    #[arg(short, long = "format", value_enum)]
    pub formats: Vec<FigureFormat>,

    /// Configuration file to use instead of searching for `.benchreportconfig`
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}
