//! Client
//!
//! Client-side network layer for the Chatomatic chat protocol: connection
//! lifecycle, serialized request execution, the public operation facade,
//! and the two background loops that keep a logged-in session alive.
//!
//! # Architecture
//!
//! The protocol correlates responses to requests purely by arrival order;
//! there are no request identifiers on the wire. [`RequestChannel`] is the
//! one component allowed to touch the transport, and it holds an exclusive
//! lock across each complete write+read exchange so concurrent callers can
//! never pair a response with the wrong request.
//!
//! Three callers share that channel for the lifetime of a session: the
//! foreground facade ([`ChatClient`]), the health loop (probing liveness
//! every few seconds, reporting only on state transitions) and the fetch
//! loop (cursor-based incremental message retrieval every second). Both
//! loops live in [`Session`] and stop cooperatively.
//!
//! Failures never escape as panics or errors from the facade: transport
//! and protocol failures come back as ordinary values (`false`, `None`,
//! empty), and the loops surface them as [`SessionEvent`]s.
//!
//! # Components
//!
//! - [`Connection`]: socket lifecycle and line IO, with [`LinkState`]
//! - [`RequestChannel`]: mutex-serialized command execution
//! - [`ChatClient`]: public operations (login, send, directory queries, …)
//! - [`MessageCursor`]: incremental fetch boundary
//! - [`HealthMonitor`]: edge detection over probe results
//! - [`Session`]: owns history, cursor and both background loops

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod channel;
mod client;
mod config;
mod connection;
mod cursor;
mod error;
mod event;
mod monitor;
mod session;

pub use channel::RequestChannel;
pub use chatomatic_proto::{Command, Message, NaiveTime, Response};
pub use client::ChatClient;
pub use config::ClientConfig;
pub use connection::{Connection, LinkState, probe};
pub use cursor::MessageCursor;
pub use error::TransportError;
pub use event::SessionEvent;
pub use monitor::HealthMonitor;
pub use session::Session;
