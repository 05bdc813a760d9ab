//! Platform lifecycle signals delivered to the login controller.

use tokio::sync::broadcast;
use tracing::trace;

const SIGNAL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformSignal {
    /// The app came back to the foreground.
    Resume,
    /// The native shell finished loading.
    DeviceReady,
}

/// Source of [`PlatformSignal`]s the controller subscribes to.
pub trait SignalSource: Send + Sync {
    fn subscribe(&self) -> broadcast::Receiver<PlatformSignal>;
}

/// In-process signal fan-out. The CLI feeds it from OS signals, tests emit directly.
#[derive(Debug, Clone)]
pub struct SignalHub {
    tx: broadcast::Sender<PlatformSignal>,
}

impl SignalHub {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(SIGNAL_CAPACITY);
        Self { tx }
    }

    /// Delivers `signal` to every current subscriber and returns how many there were.
    pub fn emit(&self, signal: PlatformSignal) -> usize {
        self.tx.send(signal).unwrap_or_else(|_| {
            trace!(?signal, "No signal subscribers");
            0
        })
    }
}

impl Default for SignalHub {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalSource for SignalHub {
    fn subscribe(&self) -> broadcast::Receiver<PlatformSignal> {
        self.tx.subscribe()
    }
}
