//! Wire protocol for the Chatomatic chat protocol.
//!
//! The protocol is line-oriented text over a streaming socket: one request
//! line per command, one response line per request, fields joined by the
//! `/%` delimiter. Responses carry no correlation identifiers: the n-th
//! response line answers the n-th request line, so pairing is enforced one
//! layer up by the client's request channel.
//!
//! # Components
//!
//! - [`Command`]: typed request, one variant per protocol verb
//! - [`Response`]: decoded response line (status plus ordered fields)
//! - [`Message`]: a delivered chat message
//! - [`ProtocolError`]: decode failures
//!
//! This crate is pure: no I/O, no async, no shared state.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod command;
mod error;
mod message;
mod response;

pub use chrono::NaiveTime;
pub use command::{Command, DELIMITER};
pub use error::ProtocolError;
pub use message::Message;
pub use response::{Response, Status};
