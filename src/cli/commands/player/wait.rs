use std::sync::Arc;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    services::Subsystems,
};

use super::{CATEGORY_NAME, SharedPlayer};

/// Blocks until the daemon reports a change, then prints what changed.
pub struct WaitCommand {
    player: Arc<SharedPlayer>,
}

impl WaitCommand {
    /// Creates a new WaitCommand
    pub fn new(player: Arc<SharedPlayer>) -> Self {
        Self { player }
    }
}

impl Command for WaitCommand {
    /// # Errors
    ///
    /// Returns `CliError::InvalidArguments` for an unknown subsystem name.
    fn execute(&self, args: &[String]) -> CommandResult {
        let filter = parse_subsystems(args)?;
        let changed = self.player.with_player(|p| p.wait_for_change(filter))?;

        Ok(format!("changed: {}", changed.names().join(", ")))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "wait".to_string(),
            description: "Wait for the daemon to report a change".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![CommandArg {
                name: "subsystem".to_string(),
                description: "Subsystem to watch, e.g. player or mixer. All when omitted."
                    .to_string(),
                required: false,
                repeated: true,
                value_type: ArgType::String,
            }],
            examples: vec![
                "pi-player player wait".to_string(),
                "pi-player player wait player mixer".to_string(),
            ],
        }
    }
}

fn parse_subsystems(names: &[String]) -> Result<Subsystems, CliError> {
    names.iter().try_fold(Subsystems::empty(), |acc, name| {
        Subsystems::from_protocol_name(name)
            .map(|flag| acc | flag)
            .ok_or_else(|| CliError::InvalidArguments(format!("Unknown subsystem '{name}'")))
    })
}
