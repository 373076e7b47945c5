//! Configuration file support for featurekit.
//!
//! Estimator configurations ([`KBinsConfig`](crate::binning::KBinsConfig),
//! [`NeighborsConfig`](crate::neighbors::NeighborsConfig)) are plain serde
//! structs. This module lets any of them be read from or written to a
//! `.json` or `.toml` file, validating on load.

use crate::core::error::{FeatureKitError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Configuration file format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML configuration format
    Toml,
    /// JSON configuration format
    Json,
}

impl ConfigFormat {
    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(FeatureKitError::config(
                "Unsupported config file format. Use .json or .toml",
            )),
        }
    }
}

/// Load/save support for validated configuration structs.
pub trait ConfigFile: Serialize + DeserializeOwned {
    /// Validate the configuration values.
    fn validate(&self) -> Result<()>;

    /// Parse from a string in the given format and validate.
    fn from_str_with_format(content: &str, format: ConfigFormat) -> Result<Self> {
        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| {
                FeatureKitError::config(format!("Failed to parse JSON config: {}", e))
            })?,
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| {
                FeatureKitError::config(format!("Failed to parse TOML config: {}", e))
            })?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a `.json` or `.toml` file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| FeatureKitError::config(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_str_with_format(&content, format)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| FeatureKitError::config(format!("Failed to serialize to JSON: {}", e)))?,
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| FeatureKitError::config(format!("Failed to serialize to TOML: {}", e)))?,
        };

        std::fs::write(path, content)
            .map_err(|e| FeatureKitError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}
