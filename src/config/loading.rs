use std::{fs, path::Path};

use tracing::{debug, info};

use super::{Config, ConfigPaths};
use crate::{PiPlayerError, Result};

const MASKED: &str = "***";

impl Config {
    /// Loads the main configuration file, falling back to defaults when it
    /// does not exist.
    ///
    /// # Errors
    /// Returns error if the config directory cannot be determined, or if the
    /// file exists but cannot be read, parsed or validated.
    pub fn load() -> Result<Config> {
        let path = ConfigPaths::main_config()?;

        if !path.exists() {
            info!(path = %path.display(), "No config file found, using defaults");
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads and validates the configuration file at `path`.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, is not valid TOML, or fails validation.
    pub fn load_from(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| PiPlayerError::io(e, path))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| PiPlayerError::toml_parse(e, Some(path)))?;

        config.validate()?;
        debug!(path = %path.display(), "Loaded configuration");

        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    /// Returns error if the string is not valid TOML or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| PiPlayerError::toml_parse(e, None))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    /// Returns `PiPlayerError::ConfigValidation` naming the offending section.
    pub fn validate(&self) -> Result<()> {
        if self.connection.host.trim().is_empty() {
            return Err(PiPlayerError::validation("connection", "host must not be empty"));
        }

        if self.connection.port == 0 {
            return Err(PiPlayerError::validation("connection", "port must be non-zero"));
        }

        if self.connection.timeout_secs == 0 {
            return Err(PiPlayerError::validation(
                "connection",
                "timeout_secs must be at least 1",
            ));
        }

        if self.connection.idle_timeout_secs == Some(0) {
            return Err(PiPlayerError::validation(
                "connection",
                "idle_timeout_secs must be at least 1, or unset to wait forever",
            ));
        }

        if !(1..=100).contains(&self.player.volume_step) {
            return Err(PiPlayerError::validation(
                "player",
                format!(
                    "volume_step must be between 1 and 100, got {}",
                    self.player.volume_step
                ),
            ));
        }

        Ok(())
    }

    /// Looks up a value by dotted path, e.g. `connection.port`.
    ///
    /// The password is never returned in clear text.
    ///
    /// # Errors
    /// Returns `PiPlayerError::ConfigValidation` if the path does not exist.
    pub fn get_by_path(&self, path: &str) -> Result<toml::Value> {
        let mut current = toml::Value::try_from(self).map_err(|e| PiPlayerError::Serialize {
            what: "configuration".to_string(),
            details: e.to_string(),
        })?;

        if let Some(password) = current
            .get_mut("connection")
            .and_then(|connection| connection.get_mut("password"))
        {
            *password = toml::Value::String(MASKED.to_string());
        }

        for segment in path.split('.').filter(|segment| !segment.is_empty()) {
            current = match current {
                toml::Value::Table(mut table) => table.remove(segment).ok_or_else(|| {
                    PiPlayerError::validation(path, format!("no such key '{segment}'"))
                })?,
                _ => {
                    return Err(PiPlayerError::validation(
                        path,
                        format!("'{segment}' is not inside a table"),
                    ));
                }
            };
        }

        Ok(current)
    }

    /// JSON schema of the configuration file, pretty printed.
    ///
    /// # Errors
    /// Returns `PiPlayerError::Serialize` if the schema cannot be rendered.
    pub fn schema() -> Result<String> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema).map_err(|e| PiPlayerError::Serialize {
            what: "configuration schema".to_string(),
            details: e.to_string(),
        })
    }
}
