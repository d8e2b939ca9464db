//! Unit tests for the daemon client
//!
//! A scripted in-memory transport stands in for the daemon so connection
//! drops, rejected passwords and broken teardowns can be injected.

#![allow(clippy::unwrap_used, clippy::panic)]


use std::{
    collections::HashMap,
    io,
    sync::{Arc, Mutex},
    time::Duration,
};

use super::{RemoteSession, ResilientPlayer, Response, SessionOptions, Transport, TransportError};

/// Daemon behaviour shared by every transport handle of one test.
#[derive(Default)]
struct Daemon {
    log: Vec<String>,
    password: Option<String>,
    responses: HashMap<String, Response>,
    playlists: Vec<String>,
    connect_failures: usize,
    command_failures: usize,
    teardown_fails: bool,
    handles_created: usize,
}

#[derive(Clone, Default)]
struct Script(Arc<Mutex<Daemon>>);

impl Script {
    fn new() -> Self {
        Self::default()
    }

    fn with(&self, configure: impl FnOnce(&mut Daemon)) -> &Self {
        let mut daemon = self.0.lock().unwrap();
        configure(&mut *daemon);
        drop(daemon);
        self
    }

    fn respond(&self, command: &str, pairs: &[(&str, &str)]) -> &Self {
        let response: Response = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.with(|d| {
            d.responses.insert(command.to_string(), response);
        })
    }

    fn log(&self) -> Vec<String> {
        self.0.lock().unwrap().log.clone()
    }

    fn clear_log(&self) {
        self.0.lock().unwrap().log.clear();
    }

    fn count(&self, entry: &str) -> usize {
        self.log().iter().filter(|e| *e == entry).count()
    }

    fn handles_created(&self) -> usize {
        self.0.lock().unwrap().handles_created
    }

    fn session(&self, options: SessionOptions) -> RemoteSession<ScriptedTransport> {
        let script = self.clone();
        RemoteSession::with_transport(options, move || {
            script.0.lock().unwrap().handles_created += 1;
            ScriptedTransport {
                script: script.clone(),
                connected: false,
            }
        })
    }

    fn player(&self) -> ResilientPlayer<ScriptedTransport> {
        ResilientPlayer::with_session(self.session(SessionOptions::default()))
    }

    fn connected_player(&self) -> ResilientPlayer<ScriptedTransport> {
        let mut player = self.player();
        player.connect().unwrap();
        self.clear_log();
        player
    }
}

struct ScriptedTransport {
    script: Script,
    connected: bool,
}

impl ScriptedTransport {
    fn daemon(&self) -> std::sync::MutexGuard<'_, Daemon> {
        self.script.0.lock().unwrap()
    }
}

fn broken_pipe() -> TransportError {
    TransportError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
}

impl Transport for ScriptedTransport {
    fn connect(&mut self, host: &str, port: u16, _timeout: Duration) -> Result<(), TransportError> {
        let mut daemon = self.daemon();
        daemon.log.push(format!("connect {host}:{port}"));

        if self.connected {
            return Err(TransportError::AlreadyConnected);
        }

        if daemon.connect_failures > 0 {
            daemon.connect_failures -= 1;
            return Err(TransportError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )));
        }

        drop(daemon);
        self.connected = true;
        Ok(())
    }

    fn command(&mut self, name: &str, args: &[String]) -> Result<Response, TransportError> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }

        let mut daemon = self.daemon();
        let entry = std::iter::once(name.to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        daemon.log.push(entry);

        if name == "password" {
            return if daemon.password.as_deref() == args.first().map(String::as_str) {
                Ok(Response::default())
            } else {
                Err(TransportError::Ack {
                    code: 3,
                    offset: 0,
                    command: "password".to_string(),
                    message: "incorrect password".to_string(),
                })
            };
        }

        if daemon.command_failures > 0 {
            daemon.command_failures -= 1;
            return Err(broken_pipe());
        }

        if name == "load" && !args.first().is_some_and(|p| daemon.playlists.contains(p)) {
            return Err(TransportError::Ack {
                code: 50,
                offset: 0,
                command: "load".to_string(),
                message: "No such playlist".to_string(),
            });
        }

        Ok(daemon.responses.get(name).cloned().unwrap_or_default())
    }

    fn send(&mut self, name: &str, _args: &[String]) -> Result<(), TransportError> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        self.daemon().log.push(format!("send {name}"));
        Ok(())
    }

    fn set_timeout(&mut self, timeout: Option<Duration>) -> Result<(), TransportError> {
        self.daemon().log.push(format!("timeout {timeout:?}"));
        Ok(())
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.daemon().log.push("close".to_string());
        if self.connected {
            Ok(())
        } else {
            Err(TransportError::NotConnected)
        }
    }

    fn disconnect(&mut self) -> Result<(), TransportError> {
        let mut daemon = self.daemon();
        daemon.log.push("disconnect".to_string());

        if daemon.teardown_fails {
            return Err(broken_pipe());
        }

        drop(daemon);
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        self.connected = false;
        Ok(())
    }
}
