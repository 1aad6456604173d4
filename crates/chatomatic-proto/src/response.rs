//! Response line decoding.

use crate::{DELIMITER, Message, ProtocolError};

/// Response status tag.
///
/// The server answers `ok` on success; any other tag counts as failure.
/// The raw tag is kept for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The request succeeded.
    Ok,
    /// The request failed; carries the raw status tag as received.
    Error(String),
}

/// A decoded response line: status plus ordered payload fields.
///
/// Responses carry no correlation identifier; which request a response
/// answers is purely positional and enforced by the request channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: Status,
    fields: Vec<String>,
}

impl Response {
    /// Decode one response line (newline already stripped).
    ///
    /// Splits on [`DELIMITER`]; the first token is the status, the rest are
    /// the payload fields.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::EmptyLine`] if the line is empty. An empty line is
    /// "no data", not a protocol violation; callers treat it like a
    /// missing response.
    pub fn decode(line: &str) -> Result<Self, ProtocolError> {
        if line.is_empty() {
            return Err(ProtocolError::EmptyLine);
        }
        let mut parts = line.split(DELIMITER);
        // split() yields at least one token for a non-empty input.
        let status = match parts.next() {
            Some("ok") => Status::Ok,
            Some(other) => Status::Error(other.to_owned()),
            None => return Err(ProtocolError::EmptyLine),
        };
        let fields = parts.map(str::to_owned).collect();
        Ok(Self { status, fields })
    }

    /// Whether the status tag is `ok`.
    pub fn is_ok(&self) -> bool {
        matches!(self.status, Status::Ok)
    }

    /// Response status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Ordered payload fields (status excluded).
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Consume the response, yielding its payload fields.
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }

    /// Interpret the payload fields as a message batch.
    ///
    /// Messages arrive as repeated 4-tuples of timestamp, sender,
    /// recipient, body. Only complete tuples are read; trailing leftover
    /// fields are ignored.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::InvalidTimestamp`] if any complete tuple carries an
    /// unparseable timestamp. The whole batch is discarded in that case so
    /// a malformed batch is never partially applied.
    pub fn parse_messages(&self) -> Result<Vec<Message>, ProtocolError> {
        let mut messages = Vec::with_capacity(self.fields.len() / 4);
        for tuple in self.fields.chunks_exact(4) {
            let timestamp = tuple[0].parse().map_err(|_| ProtocolError::InvalidTimestamp {
                value: tuple[0].clone(),
            })?;
            messages.push(Message::new(
                timestamp,
                tuple[1].clone(),
                tuple[2].clone(),
                tuple[3].clone(),
            ));
        }
        Ok(messages)
    }
}
