/// Playback daemon client
pub mod mpd;

pub use mpd::{
    PlaybackState, PlayerError, RemoteSession, ResilientPlayer, SessionError, SessionOptions,
    Song, Status, Subsystems,
};
