//! Grouped statistics over the loaded measurements and the console summary.

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use sparklines::spark;

use crate::{
    data::{MeasurementRow, Mode, Operation, Resolution},
    stats::{self, aggregate_measurements, Stats},
};

/// Execution time statistics per mode, across all operations and resolutions.
pub fn summarize_by_mode(rows: &[MeasurementRow]) -> BTreeMap<Mode, Stats> {
    rows.iter()
        .into_group_map_by(|r| r.mode)
        .into_iter()
        .map(|(mode, group)| {
            let stats = aggregate_measurements(group.iter().map(|r| r.execution_time_ms));
            (mode, stats)
        })
        .collect()
}

/// Execution time statistics per (operation, mode), across all resolutions.
pub fn summarize_by_operation(rows: &[MeasurementRow]) -> BTreeMap<(Operation, Mode), Stats> {
    rows.iter()
        .into_group_map_by(|r| (r.operation, r.mode))
        .into_iter()
        .map(|(key, group)| {
            let stats = aggregate_measurements(group.iter().map(|r| r.execution_time_ms));
            (key, stats)
        })
        .collect()
}

/// Mean execution time in milliseconds of all rows at `resolution` in `mode`.
///
/// With `operation` set, only rows of that operation are considered.
pub fn mean_time_ms(
    rows: &[MeasurementRow],
    operation: Option<Operation>,
    resolution: Resolution,
    mode: Mode,
) -> Option<f64> {
    stats::mean(
        rows.iter()
            .filter(|r| operation.map(|op| r.operation == op).unwrap_or(true))
            .filter(|r| r.mode == mode && r.resolution() == resolution)
            .map(|r| r.execution_time_ms),
    )
}

/// The console summary: overall statistics per mode followed by the
/// per-operation means.
///
/// Each per-operation line ends with a sparkline of the mode's mean time over
/// `resolutions`, when at least two of them have data.
pub struct Summary<'a> {
    pub rows: &'a [MeasurementRow],
    pub resolutions: &'a [Resolution],
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(40);

        writeln!(f, "COMPREHENSIVE PERFORMANCE ANALYSIS")?;
        writeln!(f, "{}", "=".repeat(50))?;

        writeln!(f, "\nOVERALL PERFORMANCE SUMMARY:")?;
        writeln!(f, "{}", rule)?;
        for (mode, stats) in summarize_by_mode(self.rows) {
            writeln!(
                f,
                "{:>12}: {:8.1} ms ± {:6.1} ms (n={})",
                mode.as_str().to_uppercase(),
                stats.mean,
                stats.stddev,
                stats.len
            )?;
        }

        writeln!(f, "\nPERFORMANCE BY OPERATION:")?;
        writeln!(f, "{}", rule)?;
        let by_operation = summarize_by_operation(self.rows);
        for operation in by_operation.keys().map(|(op, _)| *op).dedup() {
            writeln!(f, "\n{}:", operation.as_str().to_uppercase())?;
            for mode in Mode::ALL {
                let Some(stats) = by_operation.get(&(operation, mode)) else {
                    continue;
                };
                write!(f, "  {:>12}: {:8.1} ms", mode.as_str(), stats.mean)?;
                let trend = self
                    .resolutions
                    .iter()
                    .filter_map(|res| mean_time_ms(self.rows, Some(operation), *res, mode))
                    .collect_vec();
                if trend.len() > 1 {
                    write!(f, "  {}", spark(trend.as_slice()))?;
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

pub fn format_summary(rows: &[MeasurementRow], resolutions: &[Resolution]) -> String {
    Summary { rows, resolutions }.to_string()
}

pub fn print_summary(rows: &[MeasurementRow], resolutions: &[Resolution]) {
    print!("{}", Summary { rows, resolutions });
}
