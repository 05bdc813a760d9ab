use core::{fmt, pin::Pin, time::Duration};

use tokio::time::Sleep;

/// Mutable state of one prober, owned by its task.
pub(super) struct ProbeState {
    /// A lookup request is in flight.
    pub loading: bool,
    /// `None` until the first probe finished.
    pub available: Option<bool>,
    /// Probes issued in the current retry cycle, starting at 1.
    pub attempt: u32,
    /// The one retry timer that may be pending; dropping it cancels the retry.
    pub pending_retry: Option<Pin<Box<Sleep>>>,
}

impl ProbeState {
    pub(super) const fn new() -> Self {
        Self {
            loading: false,
            available: None,
            attempt: 1,
            pending_retry: None,
        }
    }

    pub(super) fn snapshot(&self) -> ProbeStatus {
        let phase = match (self.loading, self.pending_retry.is_some(), self.available) {
            (true, _, _) => ProbePhase::Checking,
            (false, true, _) => ProbePhase::Retrying,
            (false, false, Some(true)) => ProbePhase::Available,
            (false, false, Some(false)) => ProbePhase::Exhausted,
            (false, false, None) => ProbePhase::Idle,
        };
        ProbeStatus {
            loading: self.loading,
            available: self.available,
            attempt: self.attempt,
            phase,
        }
    }
}

impl fmt::Debug for ProbeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeState")
            .field("loading", &self.loading)
            .field("available", &self.available)
            .field("attempt", &self.attempt)
            .field("retry_pending", &self.pending_retry.is_some())
            .finish()
    }
}

/// Where a prober is in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbePhase {
    Idle,
    Checking,
    Available,
    /// Last probe failed and a retry timer is pending.
    Retrying,
    /// Last probe failed and the retry budget is spent.
    Exhausted,
}

impl ProbePhase {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Available | Self::Exhausted)
    }
}

/// Snapshot of a prober's state as published to the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeStatus {
    pub loading: bool,
    pub available: Option<bool>,
    pub attempt: u32,
    pub phase: ProbePhase,
}

impl ProbeStatus {
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available == Some(true)
    }
}

impl Default for ProbeStatus {
    fn default() -> Self {
        ProbeState::new().snapshot()
    }
}

/// Trace of probe activity, broadcast to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeEvent {
    Started {
        attempt: u32,
    },
    Succeeded {
        attempt: u32,
    },
    /// `retry_in` is `None` when no retry was scheduled.
    Failed {
        attempt: u32,
        retry_in: Option<Duration>,
    },
    Exhausted {
        attempts: u32,
    },
}
