//! Reading the timing log written by the benchmark harness.

use std::{
    fs::File,
    io::{self, ErrorKind, Read},
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::data::{MeasurementRow, Mode, Operation};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no timing data found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed timing data in {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// One CSV line before the labels are interpreted.
#[derive(Debug, Deserialize)]
struct RawRecord {
    operation: String,
    mode: String,
    image_width: u32,
    image_height: u32,
    execution_time_ms: f64,
}

impl RawRecord {
    fn into_row(self) -> Option<MeasurementRow> {
        let operation = match self.operation.parse::<Operation>() {
            Ok(op) => op,
            Err(e) => {
                log::debug!("Skipping record: {}", e);
                return None;
            }
        };
        let mode = match self.mode.parse::<Mode>() {
            Ok(mode) => mode,
            Err(e) => {
                log::debug!("Skipping record: {}", e);
                return None;
            }
        };
        Some(MeasurementRow {
            operation,
            mode,
            image_width: self.image_width,
            image_height: self.image_height,
            execution_time_ms: self.execution_time_ms,
        })
    }
}

/// Load all measurements from the CSV at `path`.
///
/// A missing file is reported as [`LoadError::NotFound`] so callers can treat it
/// as "nothing to analyze yet" rather than a failure.
pub fn load_measurements(path: &Path) -> Result<Vec<MeasurementRow>, LoadError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    let rows = parse_measurements(file).map_err(|e| LoadError::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;
    log::info!("Loaded {} measurements from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse headered CSV timing data.
///
/// Column order is free and additional columns are ignored. Legacy `parallel`
/// mode labels come back as [`Mode::Multithreaded`]. Records with an unknown
/// operation or mode are dropped.
pub fn parse_measurements(reader: impl Read) -> Result<Vec<MeasurementRow>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in reader.deserialize::<RawRecord>() {
        match record?.into_row() {
            Some(row) => rows.push(row),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!(
            "Skipped {} records with an unknown operation or mode",
            skipped
        );
    }

    Ok(rows)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_helpers::{synthetic_rows, write_timing_csv};
    use unindent::unindent;

    #[test]
    fn parallel_and_multithreaded_are_unified() {
        let input = unindent(
            "
            operation,mode,image_width,image_height,execution_time_ms
            blur,parallel,640,480,120.5
            blur,multithreaded,640,480,110.0
            blur,sequential,640,480,400.0
            ",
        );
        let rows = parse_measurements(input.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].mode, Mode::Multithreaded);
        assert_eq!(rows[1].mode, Mode::Multithreaded);
        assert_eq!(rows[2].mode, Mode::Sequential);
        assert!(rows.iter().all(|r| r.operation == Operation::Blur));
    }

    #[test]
    fn legacy_labels_written_by_harness_are_unified() {
        let rows = synthetic_rows(1);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processing_times.csv");
        write_timing_csv(&path, &rows, true);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains(",parallel,"));
        assert!(!content.contains(",multithreaded,"));

        let loaded = load_measurements(&path).unwrap();
        assert_eq!(loaded, rows);
    }

    #[test]
    fn columns_in_any_order_with_extras() {
        let input = unindent(
            "
            image_height, image_width, mode, operation, execution_time_ms, host
            1080, 1920, distributed, sharpen, 2500, node-1
            ",
        );
        let rows = parse_measurements(input.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![MeasurementRow {
                operation: Operation::Sharpen,
                mode: Mode::Distributed,
                image_width: 1920,
                image_height: 1080,
                execution_time_ms: 2500.0,
            }]
        );
        assert_eq!(rows[0].pixels(), 2_073_600);
    }

    #[test]
    fn unknown_labels_are_skipped() {
        let input = unindent(
            "
            operation,mode,image_width,image_height,execution_time_ms
            emboss,sequential,100,100,1.0
            blur,gpu,100,100,1.0
            blur,sequential,100,100,2.0
            ",
        );
        let rows = parse_measurements(input.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].execution_time_ms, 2.0);
    }

    #[test]
    fn malformed_numbers_are_an_error() {
        let input = unindent(
            "
            operation,mode,image_width,image_height,execution_time_ms
            blur,sequential,wide,100,1.0
            ",
        );
        assert!(parse_measurements(input.as_bytes()).is_err());
    }

    #[test]
    fn header_only_yields_no_rows() {
        let input = "operation,mode,image_width,image_height,execution_time_ms\n";
        assert!(parse_measurements(input.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processing_times.csv");
        match load_measurements(&path) {
            Err(LoadError::NotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processing_times.csv");
        std::fs::write(
            &path,
            "operation,mode,image_width,image_height,execution_time_ms\nblur,sequential,100,100,5\n",
        )
        .unwrap();
        let rows = load_measurements(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].resolution().to_string(), "100×100");
    }
}
