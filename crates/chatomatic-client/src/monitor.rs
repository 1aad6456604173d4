//! Connectivity edge detection.

/// Turns level-triggered probe results into edge-triggered notifications.
///
/// The health loop probes on a fixed interval; observers only want to hear
/// about actual connectivity changes, not every identical probe. This is a
/// pure state machine: the loop feeds it probe outcomes and executes
/// whatever it reports, keeping the debouncing logic trivially testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthMonitor {
    last: bool,
}

impl HealthMonitor {
    /// Start from the currently known connectivity.
    pub fn new(connected: bool) -> Self {
        Self { last: connected }
    }

    /// Last observed connectivity.
    pub fn connected(&self) -> bool {
        self.last
    }

    /// Feed one probe outcome.
    ///
    /// Returns `Some(new_state)` exactly when connectivity changed since
    /// the previous observation, `None` in steady state.
    pub fn observe(&mut self, connected: bool) -> Option<bool> {
        if connected == self.last {
            return None;
        }
        self.last = connected;
        Some(connected)
    }
}
