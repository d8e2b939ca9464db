use std::{fmt, time::Duration};

use tracing::{debug, info, warn};

use super::{Response, SessionError, Subsystems, TcpTransport, Transport, TransportError};
use crate::config::{ConnectionConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};

/// Where a session connects and how it authenticates.
#[derive(Clone, PartialEq)]
pub struct SessionOptions {
    /// Daemon host
    pub host: String,
    /// Daemon port
    pub port: u16,
    /// Optional password sent right after connecting
    pub password: Option<String>,
    /// Network timeout for connecting and for each command
    pub timeout: Duration,
    /// Timeout for `idle`; `None` waits forever
    pub idle_timeout: Option<Duration>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            password: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            idle_timeout: None,
        }
    }
}

impl From<&ConnectionConfig> for SessionOptions {
    fn from(config: &ConnectionConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            password: config.password.clone(),
            timeout: config.timeout(),
            idle_timeout: config.idle_timeout(),
        }
    }
}

impl fmt::Debug for SessionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionOptions")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .field("idle_timeout", &self.idle_timeout)
            .finish()
    }
}

/// Connection lifecycle of a [`RemoteSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No usable connection
    Disconnected,
    /// Connected without a password
    Connected,
    /// Connected and the password was accepted
    Authenticated,
}

type TransportFactory<T> = Box<dyn Fn() -> T + Send>;

/// One logical connection to the playback daemon.
///
/// Owns exactly one transport handle. Every operation either succeeds or
/// fails immediately; retrying is the caller's business.
pub struct RemoteSession<T: Transport = TcpTransport> {
    options: SessionOptions,
    transport: T,
    new_transport: TransportFactory<T>,
    state: SessionState,
}

impl RemoteSession<TcpTransport> {
    /// Creates an unconnected session using the TCP transport.
    pub fn new(options: SessionOptions) -> Self {
        Self::with_transport(options, TcpTransport::new)
    }
}

impl<T: Transport> RemoteSession<T> {
    /// Creates an unconnected session whose transport handles come from `factory`.
    ///
    /// The factory is called once now and again whenever a broken handle has
    /// to be replaced.
    pub fn with_transport(
        options: SessionOptions,
        factory: impl Fn() -> T + Send + 'static,
    ) -> Self {
        Self {
            transport: factory(),
            new_transport: Box::new(factory),
            options,
            state: SessionState::Disconnected,
        }
    }

    /// Connection options of this session.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// `host:port` of the daemon.
    pub fn address(&self) -> String {
        format!("{}:{}", self.options.host, self.options.port)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True when connected, with or without authentication.
    pub fn is_connected(&self) -> bool {
        self.state != SessionState::Disconnected
    }

    /// Opens the transport and authenticates if a password is configured.
    ///
    /// An already connected session is disconnected first.
    ///
    /// # Errors
    /// Returns `SessionError::Connection` when the daemon cannot be reached and
    /// `SessionError::Auth` when it rejects the password. The session is left
    /// disconnected in both cases.
    pub fn connect(&mut self) -> Result<(), SessionError> {
        if self.is_connected() {
            self.disconnect();
        }

        self.transport
            .connect(&self.options.host, self.options.port, self.options.timeout)
            .map_err(|e| self.connection_error(e.to_string()))?;
        self.state = SessionState::Connected;

        if let Some(password) = self.options.password.clone() {
            if let Err(e) = self.authenticate(&password) {
                self.disconnect();
                return Err(e);
            }
            self.state = SessionState::Authenticated;
        }

        info!(address = %self.address(), state = ?self.state, "Connected to daemon");
        Ok(())
    }

    fn authenticate(&mut self, password: &str) -> Result<(), SessionError> {
        match self.transport.command("password", &[password.to_string()]) {
            Ok(_) => Ok(()),
            Err(TransportError::Ack { code, message, .. }) => {
                warn!(code, %message, "Daemon rejected password");
                Err(SessionError::Auth {
                    host: self.options.host.clone(),
                    code,
                    message,
                })
            }
            Err(e) => Err(self.connection_error(format!("error with password command: {e}"))),
        }
    }

    /// Returns the session to `Disconnected`. Never fails.
    ///
    /// The daemon is told about the close first if possible. If the local
    /// teardown fails the handle is thrown away and replaced by a fresh,
    /// unconnected one.
    pub fn disconnect(&mut self) {
        best_effort(self.transport.close(), "close notification");

        if let Err(e) = self.transport.disconnect() {
            debug!(error = %e, "Transport teardown failed, replacing handle");
            self.transport = (self.new_transport)();
        }

        if self.state != SessionState::Disconnected {
            info!(address = %self.address(), "Disconnected from daemon");
        }
        self.state = SessionState::Disconnected;
    }

    /// Sends a named command and returns the daemon's response.
    ///
    /// # Errors
    /// Returns `SessionError::Command` if the session is disconnected or the
    /// command fails for any reason.
    pub fn invoke(&mut self, command: &str, args: &[String]) -> Result<Response, SessionError> {
        self.ensure_connected(command)?;
        debug!(command, ?args, "Invoking");

        self.transport
            .command(command, args)
            .map_err(|e| self.command_error(command, e))
    }

    /// Sends a named command the daemon does not answer, such as `kill`.
    ///
    /// # Errors
    /// Returns `SessionError::Command` if the session is disconnected or the
    /// command cannot be written.
    pub fn notify(&mut self, command: &str, args: &[String]) -> Result<(), SessionError> {
        self.ensure_connected(command)?;
        debug!(command, ?args, "Notifying");

        self.transport
            .send(command, args)
            .map_err(|e| self.command_error(command, e))
    }

    /// Blocks until one of `subsystems` changes (any subsystem when empty).
    ///
    /// Uses the idle timeout while waiting and restores the network timeout
    /// afterwards.
    ///
    /// # Errors
    /// Returns `SessionError::Command` if the wait fails or times out.
    pub fn idle(&mut self, subsystems: Subsystems) -> Result<Subsystems, SessionError> {
        const COMMAND: &str = "idle";
        self.ensure_connected(COMMAND)?;

        let args: Vec<String> = subsystems.names().into_iter().map(String::from).collect();

        self.transport
            .set_timeout(self.options.idle_timeout)
            .map_err(|e| self.command_error(COMMAND, e))?;
        let result = self.transport.command(COMMAND, &args);
        let restored = self.transport.set_timeout(Some(self.options.timeout));

        let response = result.map_err(|e| self.command_error(COMMAND, e))?;
        restored.map_err(|e| self.command_error(COMMAND, e))?;

        Ok(Subsystems::from_response(&response))
    }

    fn ensure_connected(&self, command: &str) -> Result<(), SessionError> {
        if self.is_connected() {
            return Ok(());
        }

        Err(self.command_error(command, TransportError::NotConnected))
    }

    fn connection_error(&self, details: String) -> SessionError {
        SessionError::Connection {
            host: self.options.host.clone(),
            details,
        }
    }

    fn command_error(&self, command: &str, error: TransportError) -> SessionError {
        SessionError::Command {
            command: command.to_string(),
            host: self.address(),
            details: error.to_string(),
        }
    }
}

impl<T: Transport> fmt::Debug for RemoteSession<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSession")
            .field("options", &self.options)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Discards the error of an operation whose failure does not matter,
/// leaving a trace in the debug log.
pub(crate) fn best_effort<E: fmt::Display>(result: Result<(), E>, what: &str) {
    if let Err(e) = result {
        debug!(error = %e, "Ignoring failed {what}");
    }
}
