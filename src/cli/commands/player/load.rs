use std::sync::Arc;

use crate::cli::{Command, CommandResult, types::CommandMetadata};

use super::{CATEGORY_NAME, SharedPlayer};

/// Loads the configured stored playlist into the queue.
pub struct LoadCommand {
    player: Arc<SharedPlayer>,
}

impl LoadCommand {
    /// Creates a new LoadCommand
    pub fn new(player: Arc<SharedPlayer>) -> Self {
        Self { player }
    }
}

impl Command for LoadCommand {
    /// A missing playlist is reported in the output, not as a failure.
    fn execute(&self, _args: &[String]) -> CommandResult {
        let playlist = self.player.config().player.playlist.clone();
        let loaded = self.player.with_player(|p| Ok(p.load_playlist()))?;

        if loaded {
            Ok(format!("Loaded playlist '{playlist}'"))
        } else {
            Ok(format!("Playlist '{playlist}' could not be loaded, see log"))
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "load".to_string(),
            description: "Load the stored playlist named by player.playlist".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["pi-player player load".to_string()],
        }
    }
}
