//! Transport error types.

use thiserror::Error;

/// Errors from the socket layer.
///
/// These stay inside the client: the facade translates them into failure
/// values, and the session loops translate them into events.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server could not be reached during connect.
    #[error("server unreachable: {source}")]
    Unreachable {
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },

    /// The connection was explicitly closed; `Closed` is terminal and the
    /// connection cannot be reused.
    #[error("connection is closed")]
    Closed,

    /// A read or write on an established connection failed.
    #[error("transport i/o failed: {source}")]
    Io {
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },
}
