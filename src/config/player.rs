use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default volume change for one volume-up or volume-down step.
pub const DEFAULT_VOLUME_STEP: u8 = 10;
/// Default stored playlist loaded by `load`.
pub const DEFAULT_PLAYLIST: &str = "playlist";

/// Player behaviour settings
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Volume change applied by a single volume-up or volume-down.
    pub volume_step: u8,

    /// Name of the stored playlist on the daemon.
    pub playlist: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume_step: DEFAULT_VOLUME_STEP,
            playlist: DEFAULT_PLAYLIST.to_string(),
        }
    }
}
