//! Centralized test helpers for bench-report
//!
//! Synthetic timing data and CSV fixtures shared by unit tests and benchmarks.

use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

use crate::data::{MeasurementRow, Mode, Operation};
use crate::defaults::CANONICAL_RESOLUTIONS;

/// Header written by the benchmark harness.
pub const CSV_HEADER: [&str; 5] = [
    "operation",
    "mode",
    "image_width",
    "image_height",
    "execution_time_ms",
];

/// A complete grid of measurements: every operation, mode and canonical
/// resolution, `repetitions` times each.
///
/// Times grow with the pixel count; multithreaded runs are four times and
/// distributed runs twice as fast as sequential ones.
pub fn synthetic_rows(repetitions: usize) -> Vec<MeasurementRow> {
    let mut rows = Vec::new();
    for operation in Operation::ALL {
        for mode in Mode::ALL {
            let divisor = match mode {
                Mode::Sequential => 1.0,
                Mode::Multithreaded => 4.0,
                Mode::Distributed => 2.0,
            };
            for res in CANONICAL_RESOLUTIONS {
                for rep in 0..repetitions {
                    let base = res.pixels() as f64 / 1000.0 + rep as f64;
                    rows.push(MeasurementRow {
                        operation,
                        mode,
                        image_width: res.width,
                        image_height: res.height,
                        execution_time_ms: base / divisor,
                    });
                }
            }
        }
    }
    rows
}

/// Writes `rows` as harness CSV to `path`.
///
/// With `legacy_labels`, multithreaded rows are written with the old
/// `parallel` label.
///
/// # Panics
/// Panics if the file cannot be written.
pub fn write_timing_csv(path: &Path, rows: &[MeasurementRow], legacy_labels: bool) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create timing CSV");
    writer
        .write_record(CSV_HEADER)
        .expect("Failed to write header");
    for row in rows {
        let mode = match row.mode {
            Mode::Multithreaded if legacy_labels => "parallel",
            other => other.as_str(),
        };
        writer
            .write_record([
                row.operation.as_str().to_string(),
                mode.to_string(),
                row.image_width.to_string(),
                row.image_height.to_string(),
                row.execution_time_ms.to_string(),
            ])
            .expect("Failed to write record");
    }
    writer.flush().expect("Failed to flush timing CSV");
}

/// Creates a temporary directory containing `processing_times.csv` with `rows`.
///
/// # Returns
/// The `TempDir` (cleaned up when dropped) and the path of the CSV.
pub fn dir_with_timing_csv(rows: &[MeasurementRow]) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("processing_times.csv");
    write_timing_csv(&path, rows, false);
    (dir, path)
}
