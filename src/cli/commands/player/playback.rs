use std::sync::Arc;

use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    services::{PlaybackState, PlayerError, ResilientPlayer},
};

use super::{CATEGORY_NAME, SharedPlayer};

type Action = fn(&mut ResilientPlayer) -> Result<(), PlayerError>;

/// Argument-less playback command: play, pause, stop, next or previous.
///
/// All five share the same shape and differ only in the player method they
/// call and what they print.
pub struct PlaybackCommand {
    name: &'static str,
    description: &'static str,
    done: &'static str,
    action: Action,
    player: Arc<SharedPlayer>,
}

impl PlaybackCommand {
    /// Creates the five playback commands sharing `player`.
    pub fn all(player: &Arc<SharedPlayer>) -> Vec<Self> {
        let table: [(&'static str, &'static str, &'static str, Action); 5] = [
            ("play", "Start playback", "Playback started", |p| p.play()),
            ("pause", "Pause playback", "Playback paused", |p| p.pause()),
            ("stop", "Stop playback", "Playback stopped", |p| p.stop()),
            ("next", "Skip to the next track", "Skipped to next track", |p| {
                p.next()
            }),
            (
                "previous",
                "Go back to the previous track",
                "Went back to previous track",
                |p| p.previous(),
            ),
        ];

        table
            .into_iter()
            .map(|(name, description, done, action)| Self {
                name,
                description,
                done,
                action,
                player: player.clone(),
            })
            .collect()
    }
}

impl Command for PlaybackCommand {
    fn execute(&self, _args: &[String]) -> CommandResult {
        self.player.with_player(self.action)?;
        Ok(self.done.to_string())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: self.name.to_string(),
            description: self.description.to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec![format!("pi-player player {}", self.name)],
        }
    }
}

/// Stops when playing, starts otherwise.
pub struct ToggleCommand {
    player: Arc<SharedPlayer>,
}

impl ToggleCommand {
    /// Creates a new ToggleCommand
    pub fn new(player: Arc<SharedPlayer>) -> Self {
        Self { player }
    }
}

impl Command for ToggleCommand {
    fn execute(&self, _args: &[String]) -> CommandResult {
        let requested = self.player.with_player(ResilientPlayer::toggle_play)?;

        Ok(match requested {
            PlaybackState::Play => "Playback started".to_string(),
            PlaybackState::Stop | PlaybackState::Pause => "Playback stopped".to_string(),
        })
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "toggle".to_string(),
            description: "Stop if playing, start otherwise".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["pi-player player toggle".to_string()],
        }
    }
}
