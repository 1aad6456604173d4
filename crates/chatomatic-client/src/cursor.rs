//! Incremental fetch boundary.

use chatomatic_proto::{Message, NaiveTime};

/// Timestamp of the most recently consumed message.
///
/// Drives incremental fetch: repeated polls pass the cursor so the server
/// only returns newer messages. `None` means "fetch all available
/// history" (first poll of a session). The cursor is monotonically
/// non-decreasing: it advances to the maximum timestamp observed in a
/// batch and never regresses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageCursor {
    last: Option<NaiveTime>,
}

impl MessageCursor {
    /// Fresh cursor; the next fetch retrieves all available history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position, `None` before the first non-empty batch.
    pub fn position(&self) -> Option<NaiveTime> {
        self.last
    }

    /// Advance past a fetched batch.
    ///
    /// Batches arrive time-ordered from the server, so the maximum is the
    /// last element; a guard keeps the cursor from regressing if a batch
    /// ever arrives out of order. An empty batch leaves the cursor
    /// untouched.
    pub fn advance(&mut self, batch: &[Message]) {
        let Some(newest) = batch.iter().map(|m| m.timestamp).max() else {
            return;
        };
        if self.last.is_none_or(|current| newest > current) {
            self.last = Some(newest);
        }
    }
}
