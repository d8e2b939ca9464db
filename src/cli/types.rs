use thiserror::Error;

use crate::services::PlayerError;

/// Errors that can occur during CLI command execution.
#[derive(Error, Debug)]
pub enum CliError {
    /// A command or category was not found in the registry.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Wrong number of arguments, or an argument that does not parse.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Reading the configuration failed, e.g. an unknown path.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The daemon could not be reached or refused a command.
    ///
    /// Carries the player's message, which already names the host and the
    /// operation that failed.
    #[error("Player error: {0}")]
    Player(#[from] PlayerError),

    /// Local failure unrelated to the daemon, such as a poisoned lock.
    #[error("Service error: {0}")]
    ServiceError(String),
}

/// Output text of a command, or why it failed.
pub type CommandResult = Result<String, CliError>;

/// Specification for a single command argument.
#[derive(Debug, Clone)]
pub struct CommandArg {
    /// Placeholder shown in usage, e.g. "level".
    pub name: String,

    /// What the argument does.
    pub description: String,

    /// Whether the command refuses to run without it.
    pub required: bool,

    /// Whether the argument may be given any number of times.
    /// Only the last argument of a command may repeat.
    pub repeated: bool,

    /// Expected kind of value, shown in help text.
    pub value_type: ArgType,
}

/// Kind of value an argument expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// Free text
    String,

    /// Integer
    Number,

    /// Dotted configuration path
    Path,
}

impl ArgType {
    /// Short hint for help output.
    pub fn hint(self) -> &'static str {
        match self {
            Self::String => "text",
            Self::Number => "number",
            Self::Path => "path",
        }
    }
}

/// Complete metadata for a CLI command.
///
/// Used for help generation and argument count validation.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The command name (e.g., "play", "get").
    pub name: String,

    /// Brief description of what this command does.
    pub description: String,

    /// Specification of all arguments this command accepts.
    pub args: Vec<CommandArg>,

    /// Example invocations to show in help text.
    pub examples: Vec<String>,

    /// Category this command belongs to (e.g., "player", "config").
    pub category: String,
}

impl CommandMetadata {
    /// One line usage, e.g. `player volume <level>` or `player wait [subsystem...]`.
    pub fn usage(&self) -> String {
        let mut usage = format!("{} {}", self.category, self.name);
        for arg in &self.args {
            let dots = if arg.repeated { "..." } else { "" };
            if arg.required {
                usage.push_str(&format!(" <{}{dots}>", arg.name));
            } else {
                usage.push_str(&format!(" [{}{dots}]", arg.name));
            }
        }
        usage
    }
}

/// Interface implemented by every CLI command.
///
/// Commands receive their dependencies through their constructors.
pub trait Command: Send + Sync {
    /// Runs the command.
    ///
    /// The registry has already checked the argument count against
    /// [`metadata`](Self::metadata); parsing the values is up to the command.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if an argument is invalid or the underlying
    /// player or configuration operation fails.
    fn execute(&self, args: &[String]) -> CommandResult;

    /// Describes the command for help output and validation.
    fn metadata(&self) -> CommandMetadata;
}
