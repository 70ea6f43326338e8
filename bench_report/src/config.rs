use anyhow::{bail, Result};
use config::{Config, ConfigError, File, FileFormat};
use std::{
    env,
    path::{Path, PathBuf},
};

use bench_report_cli_types::FigureFormat;

use crate::{
    data::Resolution,
    defaults::{
        CANONICAL_RESOLUTIONS, CONFIG_FILE_NAME, DEFAULT_FIGURE_FORMATS, DEFAULT_FIGURE_SCALE,
        DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR,
    },
    figures::FigureSettings,
};

/// Everything a run needs, after merging CLI, configuration file and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub figures: FigureSettings,
    pub resolutions: Vec<Resolution>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            figures: FigureSettings {
                formats: DEFAULT_FIGURE_FORMATS.to_vec(),
                scale: DEFAULT_FIGURE_SCALE,
            },
            resolutions: CANONICAL_RESOLUTIONS.to_vec(),
        }
    }
}

/// Search upward from the current directory for `.benchreportconfig`.
fn find_config_path() -> Option<PathBuf> {
    let mut current_dir = env::current_dir().ok()?;
    loop {
        let candidate = current_dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current_dir.pop() {
            return None;
        }
    }
}

/// Read the configuration file.
///
/// An explicitly given file must exist and parse. Otherwise `.benchreportconfig`
/// is searched upward from the current directory; if it is absent or cannot be
/// read, the returned configuration is empty.
pub fn read_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("Config file not found: {}", path.display());
        }
        return Ok(Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()?);
    }

    Ok(find_config_path()
        .map(|path| read_discovered_config(&path))
        .unwrap_or_default())
}

/// Read a configuration file found by the upward search.
///
/// Unreadable or malformed files are logged and yield an empty configuration.
fn read_discovered_config(path: &Path) -> Config {
    log::debug!("Using config file {}", path.display());
    let config = Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml).required(false))
        .build();
    match config {
        Ok(config) => config,
        Err(e) => {
            log::debug!("Could not read config file {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Parse configuration text directly, mostly useful for tests.
pub fn config_from_str(content: &str) -> Result<Config, ConfigError> {
    Config::builder()
        .add_source(File::from_str(content, FileFormat::Toml))
        .build()
}

fn config_path(config: &Config, key: &str) -> Option<PathBuf> {
    config.get_string(key).ok().map(PathBuf::from)
}

fn config_formats(config: &Config) -> Option<Vec<FigureFormat>> {
    let values = config.get_array("output.formats").ok()?;
    let formats: Vec<FigureFormat> = values
        .into_iter()
        .filter_map(|v| {
            let text = v.into_string().ok()?;
            match text.parse::<FigureFormat>() {
                Ok(format) => Some(format),
                Err(e) => {
                    log::warn!("Ignoring output.formats entry: {}", e);
                    None
                }
            }
        })
        .collect();
    Some(formats)
}

fn config_scale(config: &Config) -> Option<f64> {
    let scale = config.get_float("output.scale").ok()?;
    if scale > 0.0 && scale.is_finite() {
        Some(scale)
    } else {
        log::warn!("Ignoring output.scale {}: must be positive", scale);
        None
    }
}

fn config_resolutions(config: &Config) -> Option<Vec<Resolution>> {
    let values = config.get_array("analysis.resolutions").ok()?;
    let resolutions: Vec<Resolution> = values
        .into_iter()
        .filter_map(|v| {
            let text = v.into_string().ok()?;
            match text.parse::<Resolution>() {
                Ok(res) => Some(res),
                Err(e) => {
                    log::warn!("Ignoring analysis.resolutions entry: {}", e);
                    None
                }
            }
        })
        .collect();
    if resolutions.is_empty() {
        log::warn!("No valid analysis.resolutions configured, using defaults");
        None
    } else {
        Some(resolutions)
    }
}

/// Determine the final settings with proper precedence:
/// 1. CLI option (if specified)
/// 2. Configuration file
/// 3. Default
pub fn resolve_settings(
    cli_input: Option<PathBuf>,
    cli_output_dir: Option<PathBuf>,
    cli_formats: Vec<FigureFormat>,
    config: &Config,
) -> Settings {
    let defaults = Settings::default();

    let formats = if !cli_formats.is_empty() {
        cli_formats
    } else {
        config_formats(config).unwrap_or(defaults.figures.formats)
    };

    Settings {
        input: cli_input
            .or_else(|| config_path(config, "input.path"))
            .unwrap_or(defaults.input),
        output_dir: cli_output_dir
            .or_else(|| config_path(config, "output.dir"))
            .unwrap_or(defaults.output_dir),
        figures: FigureSettings {
            formats,
            scale: config_scale(config).unwrap_or(defaults.figures.scale),
        },
        resolutions: config_resolutions(config).unwrap_or(defaults.resolutions),
    }
}
