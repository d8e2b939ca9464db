//! Commands that talk to the playback daemon.
mod load;
mod playback;
mod shutdown;
mod status;
mod volume;
mod wait;

use std::sync::{Arc, Mutex, MutexGuard};

pub use load::LoadCommand;
pub use playback::{PlaybackCommand, ToggleCommand};
pub use shutdown::ShutdownCommand;
pub use status::{CurrentCommand, StatusCommand};
pub use volume::{VolumeCommand, VolumeStepCommand};
pub use wait::WaitCommand;

use tracing::debug;

use crate::{
    cli::{CliError, CommandRegistry},
    config::Config,
    services::{PlayerError, ResilientPlayer},
};

const CATEGORY_NAME: &str = "player";

/// One player shared by all player commands, connected on first use.
///
/// The mutex serializes commands, since a [`ResilientPlayer`] handles one
/// call at a time.
pub struct SharedPlayer {
    config: Config,
    player: Mutex<Option<ResilientPlayer>>,
}

impl SharedPlayer {
    /// Creates the handle without connecting.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            player: Mutex::new(None),
        }
    }

    /// Settings the player is built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs `action` against the connected player, connecting first if needed.
    ///
    /// # Errors
    /// Returns `CliError::Player` if connecting or `action` fails.
    pub fn with_player<R>(
        &self,
        action: impl FnOnce(&mut ResilientPlayer) -> Result<R, PlayerError>,
    ) -> Result<R, CliError> {
        let mut slot = self.lock()?;
        let player = match slot.take() {
            Some(player) => player,
            None => self.connect()?,
        };

        let player = slot.insert(player);
        Ok(action(player)?)
    }

    /// Removes the player from the handle, connecting it first if needed.
    /// The next command builds a fresh one.
    ///
    /// # Errors
    /// Returns `CliError::Player` if connecting fails.
    pub fn take(&self) -> Result<ResilientPlayer, CliError> {
        let mut slot = self.lock()?;
        match slot.take() {
            Some(player) => Ok(player),
            None => self.connect(),
        }
    }

    fn connect(&self) -> Result<ResilientPlayer, CliError> {
        let mut player = ResilientPlayer::from_config(&self.config);
        debug!(address = %player.session().address(), "Connecting player");
        player.connect()?;
        Ok(player)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<ResilientPlayer>>, CliError> {
        self.player
            .lock()
            .map_err(|_| CliError::ServiceError("player lock poisoned".to_string()))
    }
}

/// Registers every command of the `player` category.
pub fn register_commands(registry: &mut CommandRegistry, player: Arc<SharedPlayer>) {
    for command in PlaybackCommand::all(&player) {
        registry.register_command(CATEGORY_NAME, Box::new(command));
    }

    registry.register_command(CATEGORY_NAME, Box::new(ToggleCommand::new(player.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(VolumeCommand::new(player.clone())));
    registry.register_command(
        CATEGORY_NAME,
        Box::new(VolumeStepCommand::up(player.clone())),
    );
    registry.register_command(
        CATEGORY_NAME,
        Box::new(VolumeStepCommand::down(player.clone())),
    );
    registry.register_command(CATEGORY_NAME, Box::new(StatusCommand::new(player.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(CurrentCommand::new(player.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(LoadCommand::new(player.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(WaitCommand::new(player.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(ShutdownCommand::new(player)));
}
