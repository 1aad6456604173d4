//! Chat message value type.

use std::cmp::Ordering;

use chrono::NaiveTime;

/// A delivered chat message.
///
/// Timestamps are wall-clock time of day only; the protocol carries no date
/// component. Messages are ordered by timestamp (body as tiebreaker) and
/// two messages are equal when their (timestamp, body) pairs match;
/// sender and recipient do not participate in equality.
#[derive(Debug, Clone)]
pub struct Message {
    /// Time of day the server stamped the message with.
    pub timestamp: NaiveTime,
    /// Sender user name.
    pub from: String,
    /// Recipient user name.
    pub to: String,
    /// Message body.
    pub body: String,
}

impl Message {
    /// Create a message from its wire fields.
    pub fn new(
        timestamp: NaiveTime,
        from: impl Into<String>,
        to: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self { timestamp, from: from.into(), to: to.into(), body: body.into() }
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp && self.body == other.body
    }
}

impl Eq for Message {}

impl PartialOrd for Message {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Message {
    fn cmp(&self, other: &Self) -> Ordering {
        // Timestamp is the primary key; body keeps Ord consistent with Eq.
        self.timestamp.cmp(&other.timestamp).then_with(|| self.body.cmp(&other.body))
    }
}
