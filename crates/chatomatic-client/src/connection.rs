//! Socket lifecycle and line IO.
//!
//! # State machine
//!
//! ```text
//! ┌──────────────┐ ──── connect() ────> ┌───────────┐
//! │ Disconnected │                      │ Connected │
//! └──────────────┘ <── read/write ───── └───────────┘
//!        │             failure                │
//!        └───────── close() ──> Closed <──────┘
//!                              (terminal)
//! ```
//!
//! `Closed` is terminal: an explicitly closed connection never reconnects.
//! A `Disconnected` connection may be reconnected by the health loop.

use std::time::Duration;

use chatomatic_proto::Command;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
};
use tracing::{debug, trace};

use crate::error::TransportError;

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// No live socket; reconnecting is allowed.
    Disconnected,
    /// Socket established, line IO available.
    Connected,
    /// Explicitly closed; terminal.
    Closed,
}

/// Buffered line reader plus write half of one TCP socket.
struct LineStream {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

/// Owns the socket to the chat server.
///
/// Only [`crate::RequestChannel`] drives an established connection; nothing
/// else reads or writes the raw transport. Reachability probing opens its
/// own short-lived socket (see [`probe`]) so it never contends with an
/// in-flight exchange.
pub struct Connection {
    host: String,
    port: u16,
    stream: Option<LineStream>,
    state: LinkState,
}

impl Connection {
    /// Create a connection to `host:port`, initially `Disconnected`.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port, stream: None, state: LinkState::Disconnected }
    }

    /// Server host name.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Server port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Current state.
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Whether line IO is currently available.
    pub fn is_connected(&self) -> bool {
        self.state == LinkState::Connected
    }

    /// Open the socket.
    ///
    /// Reconnecting an already-connected connection is a no-op.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Closed`] if the connection was explicitly closed
    /// - [`TransportError::Unreachable`] on any handshake IO failure
    pub async fn connect(&mut self) -> Result<(), TransportError> {
        match self.state {
            LinkState::Closed => return Err(TransportError::Closed),
            LinkState::Connected => return Ok(()),
            LinkState::Disconnected => {},
        }

        let stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(|source| TransportError::Unreachable { source })?;
        let (read_half, write_half) = stream.into_split();
        self.stream = Some(LineStream { reader: BufReader::new(read_half), writer: write_half });
        self.state = LinkState::Connected;
        debug!(host = %self.host, port = self.port, "connected");
        Ok(())
    }

    /// Write one line, appending the newline terminator.
    ///
    /// # Errors
    ///
    /// [`TransportError::Closed`] when no socket is open,
    /// [`TransportError::Io`] on write failure. Either failure drops the
    /// socket and flips the state to `Disconnected` (unless `Closed`).
    pub async fn write_line(&mut self, line: &str) -> Result<(), TransportError> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(TransportError::Closed);
        };
        trace!(%line, "-->");
        let mut framed = String::with_capacity(line.len() + 1);
        framed.push_str(line);
        framed.push('\n');
        match stream.writer.write_all(framed.as_bytes()).await {
            Ok(()) => Ok(()),
            Err(source) => {
                self.drop_stream();
                Err(TransportError::Io { source })
            },
        }
    }

    /// Read one line, stripping the newline terminator.
    ///
    /// Returns `None` on EOF or IO failure; both drop the socket and flip
    /// the state to `Disconnected`. Blocks until a line arrives, per the
    /// transport's own blocking-read semantics.
    pub async fn read_line(&mut self) -> Option<String> {
        let stream = self.stream.as_mut()?;
        let mut line = String::new();
        match stream.reader.read_line(&mut line).await {
            Ok(0) | Err(_) => {
                self.drop_stream();
                None
            },
            Ok(_) => {
                while line.ends_with('\n') || line.ends_with('\r') {
                    line.pop();
                }
                trace!(%line, "<--");
                Some(line)
            },
        }
    }

    /// Close the connection for good.
    ///
    /// Best-effort: sends the `end` sentinel so the server can drop the
    /// session cleanly, then releases the socket. Failures are logged and
    /// swallowed since the connection is being torn down anyway. Idempotent;
    /// the state ends `Closed` either way.
    pub async fn close(&mut self) {
        if self.state == LinkState::Closed {
            return;
        }
        if let Some(mut stream) = self.stream.take() {
            let sentinel = format!("{}\n", Command::End.encode());
            if let Err(error) = stream.writer.write_all(sentinel.as_bytes()).await {
                debug!(%error, "end sentinel not delivered during close");
            }
            if let Err(error) = stream.writer.shutdown().await {
                debug!(%error, "socket shutdown failed during close");
            }
        }
        self.state = LinkState::Closed;
        debug!(host = %self.host, port = self.port, "closed");
    }

    /// Drop the socket after an IO failure.
    fn drop_stream(&mut self) {
        self.stream = None;
        if self.state != LinkState::Closed {
            self.state = LinkState::Disconnected;
        }
    }
}

/// Lightweight reachability check, independent of the request protocol.
///
/// Opens (and immediately drops) a fresh socket to `host:port`, bounded by
/// `timeout`. Used by the health loop to decide whether a protocol-level
/// exchange is worth attempting; it never touches the session's socket, so
/// it cannot interleave with an in-flight request.
pub async fn probe(host: &str, port: u16, timeout: Duration) -> bool {
    matches!(
        tokio::time::timeout(timeout, TcpStream::connect((host, port))).await,
        Ok(Ok(_))
    )
}
