//! Session lifecycle signals.

/// Signals the session loops emit toward the owning collaborator.
///
/// Delivered over an unbounded channel; the UI side decides how to render
/// them (status indicator, return to the login view, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Connectivity changed. Emitted by the health loop on transitions
    /// only, never on steady-state probes.
    ConnectionStateChanged {
        /// New connectivity.
        connected: bool,
    },

    /// A fetch tick found the connection down or failed its exchange.
    /// Expected to trigger a return to an unauthenticated view.
    ConnectionLost,
}
