use std::time::Duration;

use super::TransportError;

/// Key/value pairs returned by the daemon for one command, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pairs: Vec<(String, String)>,
}

impl Response {
    /// Creates a response from already split pairs.
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, e.g. each `changed` line of an idle reply.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// True when the daemon answered with a bare `OK`.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// All pairs in the order the daemon sent them.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

impl FromIterator<(String, String)> for Response {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Client capability for talking to the playback daemon.
///
/// A transport knows how to open a connection and exchange single commands.
/// It keeps no session state beyond the open connection and never retries;
/// that is left to [`RemoteSession`](super::RemoteSession) and
/// [`ResilientPlayer`](super::ResilientPlayer).
pub trait Transport: Send {
    /// Opens a connection to `host:port`, giving up after `timeout`.
    ///
    /// # Errors
    /// Returns `TransportError::AlreadyConnected` if a connection is open, or
    /// an I/O or protocol error if the daemon cannot be reached.
    fn connect(&mut self, host: &str, port: u16, timeout: Duration) -> Result<(), TransportError>;

    /// Sends a command and reads its response.
    ///
    /// # Errors
    /// Returns `TransportError::Ack` when the daemon rejects the command.
    fn command(&mut self, name: &str, args: &[String]) -> Result<Response, TransportError>;

    /// Sends a command without waiting for a reply.
    ///
    /// # Errors
    /// Returns an error if the command cannot be written.
    fn send(&mut self, name: &str, args: &[String]) -> Result<(), TransportError>;

    /// Changes the read timeout of the open connection. `None` waits forever.
    ///
    /// # Errors
    /// Returns `TransportError::NotConnected` without an open connection.
    fn set_timeout(&mut self, timeout: Option<Duration>) -> Result<(), TransportError>;

    /// Tells the daemon the client is going away.
    ///
    /// # Errors
    /// Returns an error if the notification cannot be written.
    fn close(&mut self) -> Result<(), TransportError> {
        self.send("close", &[])
    }

    /// Tears down the local end of the connection.
    ///
    /// # Errors
    /// Returns `TransportError::NotConnected` if nothing is open.
    fn disconnect(&mut self) -> Result<(), TransportError>;
}
