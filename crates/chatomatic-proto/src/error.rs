//! Protocol error types.

use thiserror::Error;

/// Errors produced while decoding response lines.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The response line was empty.
    ///
    /// An empty line means "no data", not a malformed response; callers
    /// typically treat it the same way as a missing response.
    #[error("empty response line")]
    EmptyLine,

    /// A message tuple carried a timestamp that does not parse as a
    /// wall-clock time of day.
    #[error("invalid message timestamp: {value:?}")]
    InvalidTimestamp {
        /// The raw timestamp field as received.
        value: String,
    },
}
