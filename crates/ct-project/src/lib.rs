//! ct-project: configuration file format, validation and network assembly.

pub mod network;
pub mod schema;
pub mod validate;

use std::path::Path;

use ct_core::{kelvin_of, seconds_of};
use ct_network::{NetworkError, ThermalNetwork};

pub use schema::*;
pub use validate::{ValidationError, validate_config};

/// The only configuration version this crate reads and writes.
pub const SUPPORTED_VERSION: u32 = 1;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Config {
    /// Ambient temperature in Kelvin.
    pub fn ambience(&self) -> f64 {
        kelvin_of(self.ambience_k)
    }

    /// Sampling interval in seconds.
    pub fn time_step(&self) -> f64 {
        seconds_of(self.time_step_s)
    }

    /// Validate, then assemble the thermal network.
    pub fn build_network(&self) -> ProjectResult<ThermalNetwork> {
        validate_config(self)?;
        self.network.build()
    }
}

pub fn load_yaml(path: &Path) -> ProjectResult<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_yaml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn save_yaml(path: &Path, config: &Config) -> ProjectResult<()> {
    validate_config(config)?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn save_json(path: &Path, config: &Config) -> ProjectResult<()> {
    validate_config(config)?;
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a configuration, choosing the format from the file extension
/// (`.json` for JSON, anything else for YAML).
pub fn load(path: &Path) -> ProjectResult<Config> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}
