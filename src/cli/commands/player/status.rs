use std::sync::Arc;

use crate::{
    cli::{Command, CommandResult, formatting::format_duration, types::CommandMetadata},
    services::{ResilientPlayer, Song, Status},
};

use super::{CATEGORY_NAME, SharedPlayer};

/// Prints playback state, volume and modes.
pub struct StatusCommand {
    player: Arc<SharedPlayer>,
}

impl StatusCommand {
    /// Creates a new StatusCommand
    pub fn new(player: Arc<SharedPlayer>) -> Self {
        Self { player }
    }
}

impl Command for StatusCommand {
    fn execute(&self, _args: &[String]) -> CommandResult {
        let status = self.player.with_player(ResilientPlayer::status)?;
        Ok(render_status(&status))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "status".to_string(),
            description: "Show playback state, volume and modes".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["pi-player player status".to_string()],
        }
    }
}

fn render_status(status: &Status) -> String {
    let volume = status
        .volume
        .map_or_else(|| "n/a".to_string(), |level| format!("{level}%"));

    let mut lines = vec![
        format!("state: {}", status.state),
        format!("volume: {volume}"),
    ];

    if let Some(position) = status.song {
        let mut line = format!(
            "song: {}/{}",
            position.saturating_add(1),
            status.playlist_length
        );
        if let (Some(elapsed), Some(duration)) = (status.elapsed, status.duration) {
            line.push_str(&format!(
                " ({}/{})",
                format_duration(elapsed),
                format_duration(duration)
            ));
        }
        lines.push(line);
    }

    let on_off = |flag: bool| if flag { "on" } else { "off" };
    lines.push(format!(
        "repeat: {}  random: {}  single: {}  consume: {}",
        on_off(status.repeat),
        on_off(status.random),
        on_off(status.single),
        on_off(status.consume)
    ));

    lines.join("\n")
}

/// Prints the current song.
pub struct CurrentCommand {
    player: Arc<SharedPlayer>,
}

impl CurrentCommand {
    /// Creates a new CurrentCommand
    pub fn new(player: Arc<SharedPlayer>) -> Self {
        Self { player }
    }
}

impl Command for CurrentCommand {
    fn execute(&self, _args: &[String]) -> CommandResult {
        let song = self.player.with_player(ResilientPlayer::poll)?;
        Ok(song
            .as_ref()
            .map_or_else(|| "Nothing selected".to_string(), Song::display_name))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "current".to_string(),
            description: "Show the current song".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["pi-player player current".to_string()],
        }
    }
}
