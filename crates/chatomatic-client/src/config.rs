//! Client configuration.

use std::time::Duration;

/// Default interval between message fetch ticks.
pub const DEFAULT_FETCH_INTERVAL: Duration = Duration::from_secs(1);

/// Default interval between liveness probes.
pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_secs(3);

/// Default upper bound on one reachability probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Endpoint and cadence settings for a client session.
///
/// The intervals bound the cancellation latency of the background loops:
/// stopping a session takes at most one fetch interval for the fetch loop
/// and one probe interval for the health loop.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server host name or address.
    pub host: String,
    /// Server TCP port.
    pub port: u16,
    /// Cadence of the message fetch loop.
    pub fetch_interval: Duration,
    /// Cadence of the health loop.
    pub probe_interval: Duration,
    /// Upper bound on one reachability probe.
    pub probe_timeout: Duration,
}

impl ClientConfig {
    /// Configuration for `host:port` with the default cadences.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            fetch_interval: DEFAULT_FETCH_INTERVAL,
            probe_interval: DEFAULT_PROBE_INTERVAL,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}
