//! Client for a remote playback daemon speaking the MPD line protocol.
//!
//! Layered leaves first: a [`Transport`] moves single commands over the wire,
//! a [`RemoteSession`] owns one connection and its authentication, and a
//! [`ResilientPlayer`] puts the reconnect-and-retry policy around every
//! playback command.

/// Error types for transports, sessions and the player
pub mod error;
/// Resilient playback command surface
pub mod player;
/// TCP implementation of the line protocol
pub mod protocol;
/// Connection and authentication lifecycle
pub mod session;
/// Typed views of daemon responses
pub mod status;
/// Transport capability trait
pub mod transport;

#[cfg(test)]
mod tests;

pub use error::*;
pub use player::{ResilientPlayer, VOLUME_RANGE};
pub use protocol::TcpTransport;
pub use session::{RemoteSession, SessionOptions, SessionState};
pub use status::{PlaybackState, Song, Status, Subsystems};
pub use transport::{Response, Transport};
