//! pi-player - resilient control client for an MPD playback daemon.
//!
//! The core is [`services::ResilientPlayer`]: every playback command is tried
//! once, and after a failure the connection is rebuilt and the command tried
//! exactly once more. Around it sit a TOML configuration, structured logging
//! and a small command line front end.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pi_player::{config::Config, services::ResilientPlayer};
//!
//! let config = Config::load()?;
//! let mut player = ResilientPlayer::from_config(&config);
//! player.connect()?;
//! player.load_playlist();
//! player.play()?;
//! player.set_volume(40)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Configuration schema, loading and validation.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Command-line interface.
pub mod cli;

/// Playback daemon client.
pub mod services;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{PiPlayerError, Result};
