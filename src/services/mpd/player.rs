use tracing::{debug, error, info, warn};

use super::{
    PlaybackState, PlayerError, RemoteSession, Response, SessionError, SessionOptions, Song,
    Status, Subsystems, TcpTransport, Transport,
};
use crate::config::{Config, DEFAULT_PLAYLIST, DEFAULT_VOLUME_STEP};

/// Accepted volume range for `setvol`.
pub const VOLUME_RANGE: std::ops::RangeInclusive<i32> = 0..=100;

/// Playback control surface that survives dropped connections.
///
/// Every playback command goes through one policy: try once, and on any
/// failure disconnect, reconnect and try exactly once more. A failed
/// reconnect or a second failure is reported as a [`PlayerError`].
///
/// The player caches nothing about the daemon; volume, state and the current
/// song are queried when needed. Calls are blocking and take `&mut self`, so
/// concurrent callers have to serialize access themselves.
pub struct ResilientPlayer<T: Transport = TcpTransport> {
    session: RemoteSession<T>,
    volume_step: u8,
    playlist: String,
}

impl ResilientPlayer<TcpTransport> {
    /// Creates a disconnected player talking TCP to the daemon in `options`.
    pub fn new(options: SessionOptions) -> Self {
        Self::with_session(RemoteSession::new(options))
    }

    /// Creates a disconnected player from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(SessionOptions::from(&config.connection))
            .with_volume_step(config.player.volume_step)
            .with_playlist(config.player.playlist.clone())
    }
}

impl<T: Transport> ResilientPlayer<T> {
    /// Wraps an existing session with default volume step and playlist.
    pub fn with_session(session: RemoteSession<T>) -> Self {
        Self {
            session,
            volume_step: DEFAULT_VOLUME_STEP,
            playlist: DEFAULT_PLAYLIST.to_string(),
        }
    }

    /// Overrides the volume change of one volume-up or volume-down.
    pub fn with_volume_step(mut self, volume_step: u8) -> Self {
        self.volume_step = volume_step;
        self
    }

    /// Overrides the stored playlist loaded by [`load_playlist`](Self::load_playlist).
    pub fn with_playlist(mut self, playlist: impl Into<String>) -> Self {
        self.playlist = playlist.into();
        self
    }

    /// The underlying session.
    pub fn session(&self) -> &RemoteSession<T> {
        &self.session
    }

    /// Volume change of one step.
    pub fn volume_step(&self) -> u8 {
        self.volume_step
    }

    /// Stored playlist name.
    pub fn playlist(&self) -> &str {
        &self.playlist
    }

    /// Connects (and authenticates) the session.
    ///
    /// # Errors
    /// Returns `PlayerError::Session` wrapping the connection or
    /// authentication failure.
    pub fn connect(&mut self) -> Result<(), PlayerError> {
        self.session.connect().map_err(PlayerError::from)
    }

    /// Disconnects the session. Never fails.
    pub fn disconnect(&mut self) {
        self.session.disconnect();
    }

    /// Current song, or `None` when nothing is selected.
    ///
    /// # Errors
    /// Returns `PlayerError` if the query fails twice or reconnecting fails.
    pub fn poll(&mut self) -> Result<Option<Song>, PlayerError> {
        let response = self.run("retrieve current song", "currentsong", &[])?;
        Song::from_response(&response)
    }

    /// Fresh daemon status.
    ///
    /// # Errors
    /// Returns `PlayerError` if the query fails twice or reconnecting fails.
    pub fn status(&mut self) -> Result<Status, PlayerError> {
        let response = self.run("retrieve status", "status", &[])?;
        Status::try_from(&response)
    }

    /// Skips to the next track.
    ///
    /// # Errors
    /// Returns `PlayerError` if the command fails twice or reconnecting fails.
    pub fn next(&mut self) -> Result<(), PlayerError> {
        self.run("switch to next track", "next", &[]).map(drop)
    }

    /// Goes back to the previous track.
    ///
    /// # Errors
    /// Returns `PlayerError` if the command fails twice or reconnecting fails.
    pub fn previous(&mut self) -> Result<(), PlayerError> {
        self.run("switch to previous track", "previous", &[])
            .map(drop)
    }

    /// Starts playback.
    ///
    /// # Errors
    /// Returns `PlayerError` if the command fails twice or reconnecting fails.
    pub fn play(&mut self) -> Result<(), PlayerError> {
        self.run("start play", "play", &[]).map(drop)
    }

    /// Pauses playback.
    ///
    /// # Errors
    /// Returns `PlayerError` if the command fails twice or reconnecting fails.
    pub fn pause(&mut self) -> Result<(), PlayerError> {
        self.run("pause play", "pause", &["1".to_string()])
            .map(drop)
    }

    /// Stops playback.
    ///
    /// # Errors
    /// Returns `PlayerError` if the command fails twice or reconnecting fails.
    pub fn stop(&mut self) -> Result<(), PlayerError> {
        self.run("stop play", "stop", &[]).map(drop)
    }

    /// Sets the volume to `target`.
    ///
    /// Targets outside 0-100 are ignored without an error. Returns whether a
    /// command was sent.
    ///
    /// # Errors
    /// Returns `PlayerError` if the command fails twice or reconnecting fails.
    pub fn set_volume(&mut self, target: i32) -> Result<bool, PlayerError> {
        if !VOLUME_RANGE.contains(&target) {
            debug!(target, "Ignoring out of range volume");
            return Ok(false);
        }

        self.run("change volume", "setvol", &[target.to_string()])?;
        Ok(true)
    }

    /// Raises the volume by one step. See [`step_volume`](Self::step_volume).
    ///
    /// # Errors
    /// Returns `PlayerError` if reading or setting the volume fails.
    pub fn increase_volume(&mut self) -> Result<Option<i32>, PlayerError> {
        self.step_volume(i32::from(self.volume_step))
    }

    /// Lowers the volume by one step. See [`step_volume`](Self::step_volume).
    ///
    /// # Errors
    /// Returns `PlayerError` if reading or setting the volume fails.
    pub fn decrease_volume(&mut self) -> Result<Option<i32>, PlayerError> {
        self.step_volume(-i32::from(self.volume_step))
    }

    /// Changes the volume by `delta` relative to the daemon's current volume.
    ///
    /// The current volume is read through [`status`](Self::status), so the
    /// read is retried like any other command. A result outside 0-100 is
    /// dropped rather than clamped. Returns the new volume if it was applied.
    ///
    /// # Errors
    /// Returns `PlayerError::VolumeUnavailable` if the daemon has no mixer.
    pub fn step_volume(&mut self, delta: i32) -> Result<Option<i32>, PlayerError> {
        let current = self
            .status()?
            .volume
            .ok_or_else(|| PlayerError::VolumeUnavailable {
                host: self.session.options().host.clone(),
            })?;

        let target = i32::from(current) + delta;
        Ok(self.set_volume(target)?.then_some(target))
    }

    /// Stops when playing, starts otherwise, based on freshly fetched status.
    ///
    /// Returns the state that was requested.
    ///
    /// # Errors
    /// Returns `PlayerError` if fetching status or the playback command fails.
    pub fn toggle_play(&mut self) -> Result<PlaybackState, PlayerError> {
        if self.status()?.state == PlaybackState::Play {
            self.stop()?;
            Ok(PlaybackState::Stop)
        } else {
            self.play()?;
            Ok(PlaybackState::Play)
        }
    }

    /// Loads the configured stored playlist into the queue.
    ///
    /// Best effort: a missing playlist or a broken connection is logged and
    /// playback carries on. Returns whether the playlist was loaded.
    pub fn load_playlist(&mut self) -> bool {
        match self.session.invoke("load", &[self.playlist.clone()]) {
            Ok(_) => {
                info!(playlist = %self.playlist, "Playlist loaded");
                true
            }
            Err(e) => {
                warn!(playlist = %self.playlist, error = %e, "Playlist not loaded, continuing");
                false
            }
        }
    }

    /// Blocks until the daemon reports a change in `subsystems` (any when empty).
    ///
    /// # Errors
    /// Returns `PlayerError` if waiting fails twice or reconnecting fails.
    pub fn wait_for_change(&mut self, subsystems: Subsystems) -> Result<Subsystems, PlayerError> {
        self.with_reconnect("wait for daemon events", |session| {
            session.idle(subsystems)
        })
    }

    /// Terminates the daemon process and closes the session. Not retried.
    ///
    /// # Errors
    /// Returns `PlayerError::Session` if the kill command cannot be sent.
    pub fn shutdown(mut self) -> Result<(), PlayerError> {
        info!(address = %self.session.address(), "Shutting down daemon");

        let killed = self.session.notify("kill", &[]);
        self.session.disconnect();

        killed.map_err(PlayerError::from)
    }

    fn run(
        &mut self,
        operation: &'static str,
        command: &str,
        args: &[String],
    ) -> Result<Response, PlayerError> {
        self.with_reconnect(operation, |session| session.invoke(command, args))
    }

    /// Runs `call`, and on failure reconnects and runs it exactly once more.
    fn with_reconnect<R>(
        &mut self,
        operation: &'static str,
        mut call: impl FnMut(&mut RemoteSession<T>) -> Result<R, SessionError>,
    ) -> Result<R, PlayerError> {
        match call(&mut self.session) {
            Ok(value) => return Ok(value),
            Err(e) => warn!(operation, error = %e, "Command failed, reconnecting"),
        }

        self.session.disconnect();
        if let Err(source) = self.session.connect() {
            error!(operation, error = %source, "Reconnecting failed");
            return Err(PlayerError::Reconnect { operation, source });
        }
        info!(operation, "Reconnected, retrying");

        call(&mut self.session).map_err(|source| {
            error!(operation, error = %source, "Command failed after reconnect");
            PlayerError::Operation { operation, source }
        })
    }
}

impl<T: Transport> std::fmt::Debug for ResilientPlayer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientPlayer")
            .field("session", &self.session)
            .field("volume_step", &self.volume_step)
            .field("playlist", &self.playlist)
            .finish()
    }
}
