//! pi-player command line entry point.
//!
//! Global flags are parsed by clap; everything after them is routed to the
//! command registry as `<category> <command> [args...]`.

use std::{error::Error, path::PathBuf, process};

use clap::Parser;
use pi_player::{
    cli::{CliService, formatting::format_error},
    config::Config,
    tracing_config,
};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "pi-player")]
#[command(about = "Control a remote MPD playback daemon", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file, instead of ~/.config/pi-player/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Daemon host, overrides connection.host
    #[arg(long)]
    host: Option<String>,

    /// Daemon port, overrides connection.port
    #[arg(long)]
    port: Option<u16>,

    /// Daemon password, overrides connection.password
    #[arg(long)]
    password: Option<String>,

    /// Also write logs to ~/.pi-player/logs
    #[arg(long)]
    log_file: bool,

    /// Command category (player, config) or "help"
    category: Option<String>,

    /// Command within the category
    command: Option<String>,

    /// Command arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

impl Cli {
    fn load_config(&self) -> Result<Config, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if let Some(host) = &self.host {
            config.connection.host = host.clone();
        }
        if let Some(port) = self.port {
            config.connection.port = port;
        }
        if let Some(password) = &self.password {
            config.connection.password = Some(password.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String, Box<dyn Error>> {
    let config = tracing_config::with_startup_logging(|| cli.load_config())?;

    let level = config.general.log_level;
    if cli.log_file {
        tracing_config::init_with_file(level)?;
    } else {
        tracing_config::init(level)?;
    }
    debug!(connection = ?config.connection, "Configuration loaded");

    let service = CliService::new(config);

    match (cli.category.as_deref(), cli.command.as_deref()) {
        (None, _) | (Some("help"), None) => Ok(service.help(None)?),
        (Some("help"), Some(category)) => Ok(service.help(Some(category))?),
        (Some(category), None) => Ok(service.help(Some(category))?),
        (Some(category), Some(command)) => {
            Ok(service.execute_command(category, command, &cli.args)?)
        }
    }
}
