/// Configuration inspection commands
pub mod config;
/// Playback daemon commands
pub mod player;
