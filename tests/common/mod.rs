//! In-process daemon speaking just enough of the line protocol for tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::{
    io::{BufRead, BufReader, Write},
    net::{TcpListener, TcpStream},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use pi_player::services::SessionOptions;

pub const GREETING: &str = "OK MPD 0.23.5";

/// What the daemon does with one command line.
pub enum Reply {
    /// `key: value` lines then `OK`
    Ok(Vec<(&'static str, String)>),
    /// `ACK [code@0] {command} message`
    Ack(u32, &'static str),
    /// Close the connection without answering
    Hangup,
}

impl Reply {
    pub fn ok() -> Self {
        Self::Ok(Vec::new())
    }

    pub fn pairs(pairs: &[(&'static str, &str)]) -> Self {
        Self::Ok(pairs.iter().map(|(k, v)| (*k, v.to_string())).collect())
    }
}

type Handler = dyn Fn(usize, &str) -> Reply + Send + Sync;

/// Listens on a free local port and serves each connection on its own thread.
///
/// The handler gets the zero based connection index and the raw command
/// line. `close` and `kill` end the connection without a reply.
pub struct FakeDaemon {
    port: u16,
    lines: Arc<Mutex<Vec<String>>>,
    connections: Arc<AtomicUsize>,
}

impl FakeDaemon {
    pub fn start(handler: impl Fn(usize, &str) -> Reply + Send + Sync + 'static) -> Self {
        Self::start_limited(usize::MAX, handler)
    }

    /// Accepts `limit` connections, then stops listening so further connects
    /// are refused.
    pub fn start_limited(
        limit: usize,
        handler: impl Fn(usize, &str) -> Reply + Send + Sync + 'static,
    ) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let lines = Arc::new(Mutex::new(Vec::new()));
        let connections = Arc::new(AtomicUsize::new(0));
        let handler: Arc<Handler> = Arc::new(handler);

        let accept_lines = lines.clone();
        let accept_connections = connections.clone();
        thread::spawn(move || {
            for (index, stream) in listener.incoming().take(limit).enumerate() {
                let Ok(stream) = stream else { break };
                accept_connections.fetch_add(1, Ordering::SeqCst);

                let handler = handler.clone();
                let lines = accept_lines.clone();
                thread::spawn(move || serve(index, stream, handler.as_ref(), &lines));
            }
        });

        Self {
            port,
            lines,
            connections,
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn options(&self) -> SessionOptions {
        SessionOptions {
            host: "127.0.0.1".to_string(),
            port: self.port,
            timeout: Duration::from_secs(2),
            ..SessionOptions::default()
        }
    }

    /// Every command line received so far, across connections.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn count(&self, line: &str) -> usize {
        self.lines().iter().filter(|l| *l == line).count()
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Waits up to two seconds for a line the client sends without
    /// expecting a reply.
    pub fn wait_for_line(&self, line: &str) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if self.count(line) > 0 {
                return true;
            }
            thread::sleep(Duration::from_millis(10));
        }
        false
    }
}

fn serve(index: usize, stream: TcpStream, handler: &Handler, lines: &Mutex<Vec<String>>) {
    let Ok(mut writer) = stream.try_clone() else {
        return;
    };
    if writeln!(writer, "{GREETING}").is_err() {
        return;
    }

    for line in BufReader::new(stream).lines() {
        let Ok(line) = line else { break };
        lines.lock().unwrap().push(line.clone());

        if line == "close" || line == "kill" {
            break;
        }

        let command = line.split(' ').next().unwrap_or_default();
        let written = match handler(index, &line) {
            Reply::Ok(pairs) => pairs
                .iter()
                .try_for_each(|(k, v)| writeln!(writer, "{k}: {v}"))
                .and_then(|()| writeln!(writer, "OK")),
            Reply::Ack(code, message) => {
                writeln!(writer, "ACK [{code}@0] {{{command}}} {message}")
            }
            Reply::Hangup => break,
        };

        if written.is_err() {
            break;
        }
    }
}
