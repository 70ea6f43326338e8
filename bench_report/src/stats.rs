use std::fmt::Display;

use average::{self, concatenate, Estimate, Mean, Variance};

use readable::num::*;

concatenate!(AggStats, [Mean, mean], [Variance, sample_variance]);

/// Mean, sample standard deviation and count of `measurements`.
///
/// Fewer than two measurements yield a standard deviation of zero.
pub fn aggregate_measurements(measurements: impl Iterator<Item = f64>) -> Stats {
    let s: AggStats = measurements.collect();
    Stats {
        mean: s.mean(),
        stddev: s.sample_variance().sqrt(),
        len: s.mean.len() as usize,
    }
}

/// Mean of `measurements`, or `None` if there are none.
pub fn mean(measurements: impl Iterator<Item = f64>) -> Option<f64> {
    let stats: AggStats = measurements.collect();
    if stats.mean.is_empty() {
        None
    } else {
        Some(stats.mean())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub mean: f64,
    pub stddev: f64,
    pub len: usize,
}

impl Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "μ: {} σ: {} n: {}",
            Float::from(self.mean),
            Float::from(self.stddev),
            Unsigned::from(self.len),
        )
    }
}
