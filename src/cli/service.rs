use crate::config::Config;

use super::{
    CliError, CommandRegistry,
    formatting::{format_category, format_command, format_description, format_header},
};

/// Entry point for running CLI commands.
pub struct CliService {
    registry: CommandRegistry,
}

impl CliService {
    /// Creates a service with every built-in command registered.
    ///
    /// No connection is made here; the first player command connects using
    /// the `[connection]` settings of `config`.
    pub fn new(config: Config) -> Self {
        let mut registry = CommandRegistry::new(config);
        registry.register_all_commands();

        CliService { registry }
    }

    /// Executes a command by category and name.
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` if the command doesn't exist, or the
    /// command's own error.
    pub fn execute_command(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        self.registry.execute(category, command_name, args)
    }

    /// Lists command names by category.
    pub fn list_all(&self) -> Vec<(String, Vec<String>)> {
        self.registry
            .list_commands()
            .into_iter()
            .map(|(category, commands)| {
                (
                    category,
                    commands.into_iter().map(|metadata| metadata.name).collect(),
                )
            })
            .collect()
    }

    /// Help text for all categories, or for one category when given.
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` for an unknown category.
    pub fn help(&self, category: Option<&str>) -> Result<String, CliError> {
        let listing: Vec<_> = self
            .registry
            .list_commands()
            .into_iter()
            .filter(|(name, _)| category.is_none_or(|wanted| wanted == name))
            .collect();

        if let Some(wanted) = category.filter(|_| listing.is_empty()) {
            return Err(CliError::CommandNotFound(format!(
                "Failed to find category '{wanted}'"
            )));
        }

        let mut out = format_header("Usage: pi-player [OPTIONS] <category> <command> [args...]");
        out.push('\n');

        for (name, commands) in listing {
            out.push_str(&format!("\n{}\n", format_category(&name)));
            for metadata in commands {
                out.push_str(&format!(
                    "  {:<36} {}\n",
                    format_command(&metadata.usage()),
                    format_description(&metadata.description)
                ));
                if category.is_some() {
                    for example in &metadata.examples {
                        out.push_str(&format!("      {}\n", format_description(example)));
                    }
                }
            }
        }

        Ok(out)
    }
}
