use std::io;

/// Failures reported by a [`Transport`](super::Transport).
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    /// Socket level failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The daemon sent something that is not valid protocol
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The daemon rejected the command
    #[error("[{code}@{offset}] {{{command}}} {message}")]
    Ack {
        /// Daemon error code
        code: u32,
        /// Index of the failing command in a command list
        offset: u32,
        /// Command the daemon rejected
        command: String,
        /// Daemon supplied message
        message: String,
    },

    /// No connection is open
    #[error("not connected")]
    NotConnected,

    /// A connection is already open
    #[error("already connected")]
    AlreadyConnected,
}

/// Errors raised by a [`RemoteSession`](super::RemoteSession).
///
/// Sessions never retry; every variant describes a single failed attempt.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    /// Transport could not be established
    #[error("Could not connect to '{host}': {details}")]
    Connection {
        /// Daemon address
        host: String,
        /// Underlying cause
        details: String,
    },

    /// Daemon rejected the configured password
    #[error("Could not connect to '{host}': password command failed: [{code}] {message}")]
    Auth {
        /// Daemon address
        host: String,
        /// Daemon error code
        code: u32,
        /// Daemon supplied message
        message: String,
    },

    /// A remote command failed at transport or protocol level
    #[error("command '{command}' on '{host}' failed: {details}")]
    Command {
        /// Command name
        command: String,
        /// Daemon address
        host: String,
        /// Underlying cause
        details: String,
    },
}

/// Fatal errors surfaced by a [`ResilientPlayer`](super::ResilientPlayer).
#[derive(thiserror::Error, Debug)]
pub enum PlayerError {
    /// The command failed and the session could not be re-established
    #[error("Reconnecting failed: {source} (while trying to {operation})")]
    Reconnect {
        /// Operation that triggered the reconnect
        operation: &'static str,
        /// Why reconnecting failed
        #[source]
        source: SessionError,
    },

    /// The command failed again after a successful reconnect
    #[error("Couldn't {operation}: {source}")]
    Operation {
        /// Human readable operation, e.g. "stop play"
        operation: &'static str,
        /// Failure of the retried attempt
        #[source]
        source: SessionError,
    },

    /// Direct session failure on connect or shutdown
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The daemon reports no volume (no mixer configured)
    #[error("Volume is not available on '{host}'")]
    VolumeUnavailable {
        /// Daemon address
        host: String,
    },

    /// A response field could not be interpreted
    #[error("Malformed '{field}' in daemon response: '{value}'")]
    MalformedResponse {
        /// Response key
        field: String,
        /// Offending value
        value: String,
    },
}
