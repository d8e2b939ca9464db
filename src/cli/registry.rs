use std::{collections::HashMap, sync::Arc};

use crate::config::Config;

use super::{
    CliError, Command,
    commands::{
        config,
        player::{self, SharedPlayer},
    },
    types::CommandMetadata,
};

/// Registry for CLI commands organized by category.
///
/// ```text
/// registry
/// ├── config
/// │   ├── get
/// │   └── schema
/// └── player
///     ├── play
///     ├── volume
///     └── ...
/// ```
pub struct CommandRegistry {
    /// category name -> (command name -> command implementation)
    categories: HashMap<String, HashMap<String, Box<dyn Command>>>,
    config: Arc<Config>,
    player: Arc<SharedPlayer>,
}

impl CommandRegistry {
    /// Creates an empty registry. Commands registered later share `config`
    /// and one lazily connected player built from it.
    pub fn new(config: Config) -> Self {
        let player = Arc::new(SharedPlayer::new(config.clone()));
        Self {
            categories: HashMap::new(),
            config: Arc::new(config),
            player,
        }
    }

    /// Registers a command in `category` under its metadata name, replacing
    /// any command of the same name.
    pub fn register_command(&mut self, category: &str, command: Box<dyn Command>) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(command.metadata().name, command);
    }

    /// Executes a command by category and name.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CommandNotFound` if the category or command does not
    /// exist, `CliError::InvalidArguments` if the argument count does not
    /// match, and whatever the command itself returns otherwise.
    pub fn execute(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        let found_category = self.categories.get(category).ok_or_else(|| {
            CliError::CommandNotFound(format!("Failed to find category '{category}'"))
        })?;

        let found_command = found_category.get(command_name).ok_or_else(|| {
            CliError::CommandNotFound(format!(
                "Failed to find command '{command_name}' in '{category}'"
            ))
        })?;

        Self::validate_args(&found_command.metadata(), args)?;

        found_command.execute(args)
    }

    /// Metadata of every command, grouped by category. Categories and
    /// commands are sorted by name.
    pub fn list_commands(&self) -> Vec<(String, Vec<CommandMetadata>)> {
        let mut categories: Vec<(String, Vec<CommandMetadata>)> = self
            .categories
            .iter()
            .map(|(category, commands)| {
                let mut metadata: Vec<CommandMetadata> =
                    commands.values().map(|command| command.metadata()).collect();
                metadata.sort_by(|a, b| a.name.cmp(&b.name));

                (category.clone(), metadata)
            })
            .collect();

        categories.sort_by(|a, b| a.0.cmp(&b.0));

        categories
    }

    fn validate_args(metadata: &CommandMetadata, args: &[String]) -> Result<(), CliError> {
        let required_count = metadata.args.iter().filter(|arg| arg.required).count();
        let unbounded = metadata.args.last().is_some_and(|arg| arg.repeated);

        if args.len() < required_count {
            return Err(CliError::InvalidArguments(format!(
                "Expected at least {} arguments, got {}",
                required_count,
                args.len(),
            )));
        }

        if !unbounded && args.len() > metadata.args.len() {
            return Err(CliError::InvalidArguments(format!(
                "Expected at most {} arguments, got {}",
                metadata.args.len(),
                args.len(),
            )));
        }

        Ok(())
    }

    /// Registers the built-in player and config commands.
    pub fn register_all_commands(&mut self) {
        player::register_commands(self, self.player.clone());
        config::register_commands(self, self.config.clone());
    }
}
