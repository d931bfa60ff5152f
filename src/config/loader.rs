//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading matching
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::MatchingConfig;

/// Name of the settings file inside a configuration directory.
const MATCHING_CONFIG_FILE: &str = "matching.yaml";

/// Loads and provides access to matching configuration.
///
/// # Directory Structure
///
/// ```text
/// config/two_part_tariff/
/// └── matching.yaml   # Purpose codes, grace period, unit conversion
/// ```
///
/// # Example
///
/// ```no_run
/// use two_part_tariff::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/two_part_tariff")?;
/// println!("Grace period: {} days", loader.config().late_return_grace_period_days);
/// # Ok::<(), two_part_tariff::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: MatchingConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `matching.yaml` is missing (`ConfigNotFound`)
    /// - the file contains invalid YAML (`ConfigParseError`)
    /// - a value is out of range (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let config_path = path.as_ref().join(MATCHING_CONFIG_FILE);
        let config = Self::load_yaml::<MatchingConfig>(&config_path)?;
        config.validate()?;

        debug!(
            path = %config_path.display(),
            purpose_codes = ?config.two_part_tariff_purpose_codes,
            "Loaded matching configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> MatchingConfig {
        self.config
    }
}
