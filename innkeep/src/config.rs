//! Library configuration.
//!
//! Configuration is loaded from a YAML or JSON file and can be overridden
//! programmatically through [`ConfigBuilder`]. All fields are optional;
//! unset fields fall back to defaults when the database configuration is
//! resolved.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::database::{default_data_dir, DatabaseConfig};
use crate::error::{Error, Result};

/// Default database file name inside the data directory.
const DATABASE_FILE: &str = "innkeep.db";

/// Default configuration file name inside the data directory.
const CONFIG_FILE: &str = "config.yaml";

/// Declarative configuration for the reservation store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the database and configuration files.
    /// Defaults to `~/.innkeep`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Database file name inside the data directory.
    /// Defaults to `innkeep.db`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_file: Option<String>,

    /// Busy timeout in milliseconds for database lock contention.
    /// Defaults to 5000.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub busy_timeout_ms: Option<u64>,
}

impl Config {
    /// Loads configuration from a YAML or JSON file, chosen by extension.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a
    /// configuration error if it cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&text)?
        } else {
            serde_yaml::from_str(&text)?
        };
        Ok(config)
    }

    /// Merges another configuration over this one; set fields in `other`
    /// win.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
        if other.database_file.is_some() {
            self.database_file = other.database_file;
        }
        if other.busy_timeout_ms.is_some() {
            self.busy_timeout_ms = other.busy_timeout_ms;
        }
        self
    }

    /// Validates field values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a zero busy timeout or a blank
    /// database file name.
    pub fn validate(&self) -> Result<()> {
        if self.busy_timeout_ms == Some(0) {
            return Err(Error::Validation {
                field: "busy_timeout_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self
            .database_file
            .as_ref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(Error::Validation {
                field: "database_file".to_string(),
                message: "must be non-empty".to_string(),
            });
        }
        Ok(())
    }

    /// Resolves the database configuration this config describes.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory is set and the home
    /// directory cannot be determined.
    pub fn database_config(&self) -> Result<DatabaseConfig> {
        let data_dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };
        let file = self.database_file.as_deref().unwrap_or(DATABASE_FILE);
        let mut config = DatabaseConfig::new(data_dir.join(file));
        if let Some(ms) = self.busy_timeout_ms {
            config = config.with_busy_timeout(Duration::from_millis(ms));
        }
        Ok(config)
    }
}

/// Builder that assembles the effective configuration from an optional
/// file and programmatic overrides.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config_file: Option<PathBuf>,
    skip_file: bool,
    overrides: Config,
}

impl ConfigBuilder {
    /// Creates a builder that reads `{data_dir}/config.yaml` if present.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads configuration from an explicit file instead of the default
    /// location. The file must exist.
    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self.skip_file = false;
        self
    }

    /// Skips file loading entirely; only overrides apply.
    #[must_use]
    pub fn without_config_file(mut self) -> Self {
        self.skip_file = true;
        self.config_file = None;
        self
    }

    /// Applies programmatic overrides on top of whatever the file set.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Config) -> Self {
        self.overrides = overrides;
        self
    }

    /// Builds and validates the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit config file is missing or
    /// unparsable, or if the merged configuration fails validation.
    pub fn build(self) -> Result<Config> {
        let base = if self.skip_file {
            Config::default()
        } else if let Some(path) = self.config_file {
            Config::load_from(&path)?
        } else {
            // The default file is optional.
            match default_config_path() {
                Ok(path) if path.exists() => Config::load_from(&path)?,
                _ => Config::default(),
            }
        };

        let config = base.merge(self.overrides);
        config.validate()?;
        Ok(config)
    }
}

/// The default configuration file location, `~/.innkeep/config.yaml`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(default_data_dir()?.join(CONFIG_FILE))
}
