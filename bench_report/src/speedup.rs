use crate::{
    analysis::mean_time_ms,
    data::{MeasurementRow, Mode, Resolution},
};

/// Speedups of every mode against sequential processing at one resolution.
///
/// Means are taken over all operations at that resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedupRow {
    pub resolution: Resolution,
    pub sequential_speedup: f64,
    pub multithreaded_speedup: f64,
    pub distributed_speedup: f64,
}

impl SpeedupRow {
    pub fn megapixels(&self) -> f64 {
        self.resolution.megapixels()
    }

    pub fn speedup(&self, mode: Mode) -> f64 {
        match mode {
            Mode::Sequential => self.sequential_speedup,
            Mode::Multithreaded => self.multithreaded_speedup,
            Mode::Distributed => self.distributed_speedup,
        }
    }
}

/// Compute one [`SpeedupRow`] per resolution in `resolutions` that has a
/// sequential baseline.
///
/// A mode without data at a resolution gets a speedup of 1.0, as does one whose
/// ratio is not a positive finite number (zero mean times).
pub fn compute_speedups(rows: &[MeasurementRow], resolutions: &[Resolution]) -> Vec<SpeedupRow> {
    resolutions
        .iter()
        .filter_map(|&resolution| {
            let Some(sequential) = mean_time_ms(rows, None, resolution, Mode::Sequential) else {
                log::debug!("No sequential baseline at {}", resolution);
                return None;
            };
            let relative = |mode| {
                mean_time_ms(rows, None, resolution, mode)
                    .map(|mean| sequential / mean)
                    .filter(|speedup| {
                        let usable = speedup.is_finite() && *speedup > 0.0;
                        if !usable {
                            log::debug!("No usable {} speedup at {}: {}", mode, resolution, speedup);
                        }
                        usable
                    })
                    .unwrap_or(1.0)
            };
            Some(SpeedupRow {
                resolution,
                sequential_speedup: 1.0,
                multithreaded_speedup: relative(Mode::Multithreaded),
                distributed_speedup: relative(Mode::Distributed),
            })
        })
        .collect()
}

/// Bar label for a speedup: `2.50×` when faster, `2.00× slower` when slower.
pub fn speedup_label(speedup: f64) -> String {
    if speedup >= 1.0 {
        format!("{:.2}×", speedup)
    } else {
        format!("{:.2}× slower", 1.0 / speedup)
    }
}
