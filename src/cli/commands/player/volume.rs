use std::sync::Arc;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    services::mpd::VOLUME_RANGE,
};

use super::{CATEGORY_NAME, SharedPlayer};

/// Sets an absolute volume.
pub struct VolumeCommand {
    player: Arc<SharedPlayer>,
}

impl VolumeCommand {
    /// Creates a new VolumeCommand
    pub fn new(player: Arc<SharedPlayer>) -> Self {
        Self { player }
    }
}

impl Command for VolumeCommand {
    /// Out of range levels are ignored, matching the player, and reported as
    /// such rather than as an error.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidArguments` if the level is not an integer.
    fn execute(&self, args: &[String]) -> CommandResult {
        let raw = args.first().ok_or_else(|| {
            CliError::InvalidArguments("Expected <level> argument for 'volume'".to_string())
        })?;
        let level: i32 = raw
            .parse()
            .map_err(|_| CliError::InvalidArguments(format!("'{raw}' is not a volume level")))?;

        if self.player.with_player(|p| p.set_volume(level))? {
            Ok(format!("Volume set to {level}%"))
        } else {
            Ok(format!(
                "Volume {level} is outside {}-{}, ignored",
                VOLUME_RANGE.start(),
                VOLUME_RANGE.end()
            ))
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "volume".to_string(),
            description: "Set the volume".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![CommandArg {
                name: "level".to_string(),
                description: "Volume from 0 to 100".to_string(),
                required: true,
                repeated: false,
                value_type: ArgType::Number,
            }],
            examples: vec![
                "pi-player player volume 40".to_string(),
                "pi-player player volume 0".to_string(),
            ],
        }
    }
}

/// Raises or lowers the volume by the configured step.
pub struct VolumeStepCommand {
    up: bool,
    player: Arc<SharedPlayer>,
}

impl VolumeStepCommand {
    /// `volume-up`
    pub fn up(player: Arc<SharedPlayer>) -> Self {
        Self { up: true, player }
    }

    /// `volume-down`
    pub fn down(player: Arc<SharedPlayer>) -> Self {
        Self { up: false, player }
    }
}

impl Command for VolumeStepCommand {
    fn execute(&self, _args: &[String]) -> CommandResult {
        let applied = self.player.with_player(|p| {
            if self.up {
                p.increase_volume()
            } else {
                p.decrease_volume()
            }
        })?;

        Ok(match applied {
            Some(level) => format!("Volume set to {level}%"),
            None => "Volume already at its limit".to_string(),
        })
    }

    fn metadata(&self) -> CommandMetadata {
        let (name, direction) = if self.up {
            ("volume-up", "Raise")
        } else {
            ("volume-down", "Lower")
        };

        CommandMetadata {
            name: name.to_string(),
            description: format!(
                "{direction} the volume by one step (player.volume_step, {} by default)",
                crate::config::DEFAULT_VOLUME_STEP
            ),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec![format!("pi-player player {name}")],
        }
    }
}
