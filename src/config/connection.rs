use std::{fmt, time::Duration};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default daemon host.
pub const DEFAULT_HOST: &str = "localhost";
/// Default daemon port.
pub const DEFAULT_PORT: u16 = 6600;
/// Default network timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the playback daemon lives and how long to wait for it.
#[derive(Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Host name or address of the daemon.
    pub host: String,

    /// TCP port of the daemon.
    pub port: u16,

    /// Password sent right after connecting. No authentication when unset.
    pub password: Option<String>,

    /// Network timeout for connecting and for each command, in seconds.
    pub timeout_secs: u64,

    /// Timeout while waiting for daemon events, in seconds. Unset waits forever.
    pub idle_timeout_secs: Option<u64>,
}

impl ConnectionConfig {
    /// Network timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Idle timeout as a `Duration`, `None` meaning unbounded.
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            password: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            idle_timeout_secs: None,
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .finish()
    }
}
