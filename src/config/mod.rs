//! Configuration schema definitions and validation.
//!
//! Defines the configuration structure for pi-player: logging, the daemon
//! connection and player behaviour. All configuration is serializable
//! to/from TOML and described by a JSON schema.

mod connection;
mod general;
mod loading;
mod paths;
mod player;

#[cfg(test)]
mod tests;

pub use connection::{ConnectionConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};
pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;
pub use player::{DEFAULT_PLAYLIST, DEFAULT_VOLUME_STEP, PlayerConfig};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure for pi-player.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Daemon connection settings.
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Player behaviour settings.
    #[serde(default)]
    pub player: PlayerConfig,
}
