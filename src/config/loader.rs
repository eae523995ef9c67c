//! Configuration loading
//!
//! Provides functions to load a config file, fall back to the built-in
//! default configuration, and merge CLI overrides.

use indexmap::IndexMap;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::schema::GeneratorConfig;
use crate::agents::{ForcefieldRequest, PresetRequest, SequenceRequest};
use crate::schema::{ForceEventSpec, TrackSpec};

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON/JSON5 parsing error
    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] json5::Error),
    /// Extension is not one of .toml, .json, .json5
    #[error("Unsupported config format: {} (expected .toml, .json or .json5)", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Config file syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    /// JSON5, which also accepts plain JSON
    Json,
}

impl ConfigFormat {
    /// Pick a format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") | Some("json5") => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output directory
    pub out_dir: Option<PathBuf>,
    /// Override the preset agent's particle cap
    pub max_particles: Option<i64>,
    /// Override the forcefield agent's speed cap
    pub max_speed: Option<f64>,
}

/// Load configuration from a file.
///
/// If a path is provided, loads from that file. Otherwise returns the
/// built-in default configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(Some(Path::new("weather.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig, ConfigError> {
    match path {
        Some(p) => load_config_file(p),
        None => {
            debug!("no config given, using built-in default configuration");
            Ok(default_config())
        }
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    let format = ConfigFormat::from_path(path)?;
    let contents = fs::read_to_string(path)?;
    debug!("loading {:?} config from {}", format, path.display());
    load_config_str(&contents, format)
}

/// Parse and validate configuration text
pub fn load_config_str(contents: &str, format: ConfigFormat) -> Result<GeneratorConfig, ConfigError> {
    let config: GeneratorConfig = match format {
        ConfigFormat::Toml => toml::from_str(contents)?,
        ConfigFormat::Json => json5::from_str(contents)?,
    };

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }

    Ok(config)
}

/// The configuration used when no file is given: a gentle petal preset, a
/// breeze with one gust, and a looping sequence wiring the two together.
pub fn default_config() -> GeneratorConfig {
    let preset = PresetRequest {
        palette: Some(vec!["#ffd6e7".to_string(), "#ffc1dc".to_string(), "#ffe9f2".to_string()]),
        ..PresetRequest::new("Sample petals gently swaying")
    };

    let forcefield = ForcefieldRequest {
        prompt: "Calm breeze with a short gust".to_string(),
        events: vec![
            ForceEventSpec { dir_deg: Some(180.0), speed: Some(120.0), ..ForceEventSpec::new(0.0, "wind") },
            ForceEventSpec {
                dir_deg: Some(150.0),
                speed: Some(240.0),
                dur: Some(6.0),
                ..ForceEventSpec::new(30.0, "gust")
            },
        ],
        use_prebaked_texture: false,
    };

    let mut apply = IndexMap::new();
    apply.insert("preset".to_string(), "res://runtime/preset.json".to_string());
    apply.insert("force".to_string(), "res://runtime/forcefield.json".to_string());
    let sequence = SequenceRequest { tracks: vec![TrackSpec { t: 0.0, apply }], looping: true };

    GeneratorConfig {
        preset: Some(preset),
        forcefield: Some(forcefield),
        sequence: Some(sequence),
        ..Default::default()
    }
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut GeneratorConfig, overrides: &CliOverrides) {
    if let Some(ref out_dir) = overrides.out_dir {
        config.output.dir = out_dir.clone();
    }

    if let Some(max_particles) = overrides.max_particles {
        config.constraints.preset.max_particles = max_particles;
    }

    if let Some(max_speed) = overrides.max_speed {
        config.constraints.forcefield.max_speed = max_speed;
    }
}
