use std::sync::Arc;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::format_toml_value,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::Config,
};

/// Prints the effective value at a dotted configuration path.
///
/// Values reflect the loaded file plus command line overrides. The
/// password is always masked.
///
/// ```bash
/// pi-player config get connection.host
/// pi-player config get player
/// ```
pub struct GetCommand {
    config: Arc<Config>,
}

impl GetCommand {
    /// Creates a new GetCommand reading from `config`.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl Command for GetCommand {
    /// # Errors
    ///
    /// * `CliError::InvalidArguments` - If no path argument is provided
    /// * `CliError::ConfigError` - If the path does not exist
    fn execute(&self, args: &[String]) -> CommandResult {
        let path = args.first().ok_or_else(|| {
            CliError::InvalidArguments("Expected <path> argument for 'get' command".to_string())
        })?;

        let value = self
            .config
            .get_by_path(path)
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        if value.is_table() {
            Ok(format!("[{path}]\n{}", format_toml_value(&value)))
        } else {
            Ok(format!("{path} = {}", format_toml_value(&value)))
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "get".to_string(),
            description: "Show a configuration value".to_string(),
            category: "config".to_string(),
            args: vec![CommandArg {
                name: "path".to_string(),
                description: "Dotted configuration path (e.g., connection.port)".to_string(),
                required: true,
                repeated: false,
                value_type: ArgType::Path,
            }],
            examples: vec![
                "pi-player config get connection.host".to_string(),
                "pi-player config get player.volume_step".to_string(),
                "pi-player config get general".to_string(),
            ],
        }
    }
}
