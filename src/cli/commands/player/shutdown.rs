use std::sync::Arc;

use crate::cli::{Command, CommandResult, types::CommandMetadata};

use super::{CATEGORY_NAME, SharedPlayer};

/// Terminates the daemon process.
pub struct ShutdownCommand {
    player: Arc<SharedPlayer>,
}

impl ShutdownCommand {
    /// Creates a new ShutdownCommand
    pub fn new(player: Arc<SharedPlayer>) -> Self {
        Self { player }
    }
}

impl Command for ShutdownCommand {
    fn execute(&self, _args: &[String]) -> CommandResult {
        let player = self.player.take()?;
        let address = player.session().address();
        player.shutdown()?;

        Ok(format!("Daemon at {address} shut down"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "shutdown".to_string(),
            description: "Kill the daemon process. Not retried.".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["pi-player player shutdown".to_string()],
        }
    }
}
