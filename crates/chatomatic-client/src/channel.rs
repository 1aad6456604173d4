//! Serialized request execution.

use std::sync::Arc;

use chatomatic_proto::{Command, Response};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    connection::{Connection, LinkState},
    error::TransportError,
};

/// Cloneable handle executing commands against the shared connection, one
/// complete exchange at a time.
///
/// Responses carry no correlation identifier: the n-th response line on
/// the wire answers the n-th request line. Any interleaving of two
/// in-flight requests would silently pair the wrong response with the
/// wrong caller, so `execute` holds the connection lock across the full
/// write+read cycle, never partially. The foreground facade and both
/// background loops all go through this handle; nothing else touches the
/// transport.
#[derive(Clone)]
pub struct RequestChannel {
    inner: Arc<Mutex<Connection>>,
}

impl RequestChannel {
    /// Wrap a connection.
    pub fn new(connection: Connection) -> Self {
        Self { inner: Arc::new(Mutex::new(connection)) }
    }

    /// Execute one command: write the request line, read the response line.
    ///
    /// Returns `None` when the connection is not `Connected`, when the
    /// write or read fails, or when the response line does not decode.
    /// All of those are ordinary failures to the caller, not errors.
    pub async fn execute(&self, command: &Command) -> Option<Response> {
        let mut connection = self.inner.lock().await;
        if !connection.is_connected() {
            return None;
        }
        if let Err(error) = connection.write_line(&command.encode()).await {
            debug!(verb = command.verb(), %error, "request write failed");
            return None;
        }
        let line = connection.read_line().await?;
        match Response::decode(&line) {
            Ok(response) => Some(response),
            Err(error) => {
                debug!(verb = command.verb(), %error, "response did not decode");
                None
            },
        }
    }

    /// Open (or re-open) the underlying connection.
    ///
    /// # Errors
    ///
    /// Propagates [`TransportError`] from [`Connection::connect`].
    pub async fn connect(&self) -> Result<(), TransportError> {
        self.inner.lock().await.connect().await
    }

    /// Close the underlying connection. Idempotent, best-effort.
    pub async fn close(&self) {
        self.inner.lock().await.close().await;
    }

    /// Current connection state.
    pub async fn state(&self) -> LinkState {
        self.inner.lock().await.state()
    }

    /// Whether the connection is currently `Connected`.
    pub async fn is_connected(&self) -> bool {
        self.inner.lock().await.is_connected()
    }
}
