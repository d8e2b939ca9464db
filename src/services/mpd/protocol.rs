use std::{
    io::{self, BufRead, BufReader, Write},
    net::{Shutdown, TcpStream, ToSocketAddrs},
    sync::OnceLock,
    time::Duration,
};

use regex::Regex;
use tracing::{debug, trace};

use super::{Response, Transport, TransportError};

const GREETING_PREFIX: &str = "OK MPD ";
const OK_LINE: &str = "OK";
const ACK_PREFIX: &str = "ACK ";

fn ack_pattern() -> Option<&'static Regex> {
    static ACK: OnceLock<Option<Regex>> = OnceLock::new();
    ACK.get_or_init(|| Regex::new(r"^ACK \[(\d+)@(\d+)\] \{([^}]*)\} ?(.*)$").ok())
        .as_ref()
}

/// [`Transport`] speaking the daemon's line protocol over TCP.
///
/// Commands are written as a single line with quoted arguments; responses are
/// `key: value` lines terminated by `OK` or an `ACK` error line.
#[derive(Debug, Default)]
pub struct TcpTransport {
    stream: Option<BufReader<TcpStream>>,
    protocol_version: Option<String>,
}

impl TcpTransport {
    /// Creates an unconnected transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Protocol version announced in the daemon greeting of the open connection.
    pub fn protocol_version(&self) -> Option<&str> {
        self.protocol_version.as_deref()
    }

    fn open_stream(host: &str, port: u16, timeout: Duration) -> Result<TcpStream, TransportError> {
        let mut last_error = None;

        for addr in (host, port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => {
                    debug!(%addr, error = %e, "Connection attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no addresses found for '{host}'"),
                )
            })
            .into())
    }

    fn stream(&mut self) -> Result<&mut BufReader<TcpStream>, TransportError> {
        self.stream.as_mut().ok_or(TransportError::NotConnected)
    }
}

impl Transport for TcpTransport {
    fn connect(&mut self, host: &str, port: u16, timeout: Duration) -> Result<(), TransportError> {
        if self.stream.is_some() {
            return Err(TransportError::AlreadyConnected);
        }

        let stream = Self::open_stream(host, port, timeout)?;
        stream.set_read_timeout(Some(timeout))?;
        stream.set_write_timeout(Some(timeout))?;

        let mut reader = BufReader::new(stream);
        let greeting = read_line(&mut reader)?;
        let version = greeting.strip_prefix(GREETING_PREFIX).ok_or_else(|| {
            TransportError::Protocol(format!("unexpected greeting '{greeting}'"))
        })?;

        debug!(host, port, version, "Daemon greeting received");
        self.protocol_version = Some(version.to_string());
        self.stream = Some(reader);

        Ok(())
    }

    fn command(&mut self, name: &str, args: &[String]) -> Result<Response, TransportError> {
        let reader = self.stream()?;
        let line = format_command(name, args)?;
        trace!(command = name, args = args.len(), "Sending");

        reader.get_mut().write_all(line.as_bytes())?;
        read_response(reader)
    }

    fn send(&mut self, name: &str, args: &[String]) -> Result<(), TransportError> {
        let reader = self.stream()?;
        let line = format_command(name, args)?;
        trace!(command = name, args = args.len(), "Sending without reply");

        reader.get_mut().write_all(line.as_bytes())?;
        Ok(())
    }

    fn set_timeout(&mut self, timeout: Option<Duration>) -> Result<(), TransportError> {
        self.stream()?.get_ref().set_read_timeout(timeout)?;
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), TransportError> {
        let reader = self.stream.take().ok_or(TransportError::NotConnected)?;
        self.protocol_version = None;

        reader.get_ref().shutdown(Shutdown::Both)?;
        Ok(())
    }
}

/// Renders one command line, quoting every argument.
///
/// Arguments may not contain line breaks; the daemon would read the rest as a
/// separate command.
pub(crate) fn format_command(name: &str, args: &[String]) -> Result<String, TransportError> {
    let mut line = String::from(name);

    for arg in args {
        if arg.contains(['\n', '\r']) {
            return Err(TransportError::Protocol(format!(
                "line break in argument of '{name}'"
            )));
        }

        line.push_str(" \"");
        for c in arg.chars() {
            if c == '"' || c == '\\' {
                line.push('\\');
            }
            line.push(c);
        }
        line.push('"');
    }

    line.push('\n');
    Ok(line)
}

/// Reads `key: value` lines up to the terminating `OK` or `ACK`.
pub(crate) fn read_response(reader: &mut impl BufRead) -> Result<Response, TransportError> {
    let mut pairs = Vec::new();

    loop {
        let line = read_line(reader)?;

        if line == OK_LINE {
            return Ok(Response::new(pairs));
        }

        if line.starts_with(ACK_PREFIX) {
            return Err(parse_ack(&line));
        }

        let (key, value) = line
            .split_once(": ")
            .ok_or_else(|| TransportError::Protocol(format!("unexpected line '{line}'")))?;
        pairs.push((key.to_string(), value.to_string()));
    }
}

/// Turns an `ACK [code@offset] {command} message` line into an error.
pub(crate) fn parse_ack(line: &str) -> TransportError {
    let Some(caps) = ack_pattern().and_then(|pattern| pattern.captures(line)) else {
        return TransportError::Protocol(format!("malformed error line '{line}'"));
    };

    TransportError::Ack {
        code: caps[1].parse().unwrap_or_default(),
        offset: caps[2].parse().unwrap_or_default(),
        command: caps[3].to_string(),
        message: caps[4].to_string(),
    }
}

fn read_line(reader: &mut impl BufRead) -> Result<String, TransportError> {
    let mut line = String::new();

    if reader.read_line(&mut line)? == 0 {
        return Err(TransportError::Protocol(
            "connection closed by daemon".to_string(),
        ));
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
