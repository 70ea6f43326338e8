use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("unknown mode '{0}'")]
    UnknownMode(String),

    #[error("invalid resolution '{0}', expected <width>x<height>")]
    InvalidResolution(String),
}

/// Image-processing operation that was benchmarked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    EdgeDetection,
    Blur,
    Sharpen,
}

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::EdgeDetection,
        Operation::Blur,
        Operation::Sharpen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::EdgeDetection => "edge_detection",
            Operation::Blur => "blur",
            Operation::Sharpen => "sharpen",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Operation::EdgeDetection => "Edge Detection",
            Operation::Blur => "Blur",
            Operation::Sharpen => "Sharpen",
        }
    }

    /// File stem of the chart for this operation, e.g. `blur_performance`.
    pub fn figure_stem(&self) -> String {
        format!("{}_performance", self.as_str())
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edge_detection" => Ok(Operation::EdgeDetection),
            "blur" => Ok(Operation::Blur),
            "sharpen" => Ok(Operation::Sharpen),
            _ => Err(LabelError::UnknownOperation(s.to_string())),
        }
    }
}

/// Processing strategy of a benchmark run.
///
/// The declaration order is the display order used in tables and charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    Sequential,
    Multithreaded,
    Distributed,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Sequential, Mode::Multithreaded, Mode::Distributed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Sequential => "sequential",
            Mode::Multithreaded => "multithreaded",
            Mode::Distributed => "distributed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Sequential => "Sequential",
            Mode::Multithreaded => "Multithreaded",
            Mode::Distributed => "Distributed",
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(Mode::Sequential),
            // Older harness versions logged the multithreaded mode as "parallel".
            "multithreaded" | "parallel" => Ok(Mode::Multithreaded),
            "distributed" => Ok(Mode::Distributed),
            _ => Err(LabelError::UnknownMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Resolution { width, height }
    }

    pub fn pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn megapixels(&self) -> f64 {
        self.pixels() as f64 / 1_000_000.0
    }

    /// Two-line axis label, e.g. `640×480<br>(0.31MP)` or `1920×1080<br>(2.1MP)`.
    pub fn axis_label(&self) -> String {
        let mp = self.megapixels();
        if mp < 1.0 {
            format!("{}<br>({:.2}MP)", self, mp)
        } else {
            format!("{}<br>({:.1}MP)", self, mp)
        }
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = LabelError;

    /// Accepts `640x480`, `640X480` and `640×480`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LabelError::InvalidResolution(s.to_string());
        let (width, height) = s
            .trim()
            .split_once(['x', 'X', '×'])
            .ok_or_else(invalid)?;
        let width = width.trim().parse().map_err(|_| invalid())?;
        let height = height.trim().parse().map_err(|_| invalid())?;
        Ok(Resolution::new(width, height))
    }
}

/// A single benchmark timing as logged by the harness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementRow {
    pub operation: Operation,
    pub mode: Mode,
    pub image_width: u32,
    pub image_height: u32,
    pub execution_time_ms: f64,
}

impl MeasurementRow {
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.image_width, self.image_height)
    }

    pub fn pixels(&self) -> u64 {
        self.resolution().pixels()
    }

    pub fn megapixels(&self) -> f64 {
        self.resolution().megapixels()
    }
}
