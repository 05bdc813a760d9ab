//! Availability probe against the district lookup service.
//!
//! A prober is a single task owning its [`ProbeState`]. Commands, lookup responses
//! and retry timer expiry are serialised through one `select!` loop, so no two
//! state transitions ever overlap. Stopping the task drops the pending timer and
//! any in-flight request, which is what makes late responses after teardown no-ops.

use alloc::sync::Arc;
use core::{
    future::{self, Future},
    pin::Pin,
    time::Duration,
};

use tokio::{
    sync::{broadcast, mpsc, watch},
    task::JoinHandle,
    time::{Sleep, sleep},
};
use tracing::{Instrument as _, debug, info, trace, warn};

use schoolportal_common::{DistrictId, DistrictLookup, LookupError, RoleId};

use super::state::{ProbeEvent, ProbePhase, ProbeState, ProbeStatus};
use crate::config::RetryConfig;

const EVENT_CAPACITY: usize = 32;

/// How many retries a prober may schedule and how far apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Delay before the probe numbered `attempt` (counted after the increment).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Check,
    Resume,
    Stop,
}

type ProbeFuture = Pin<Box<dyn Future<Output = Result<(), LookupError>> + Send>>;

pub struct Prober<L> {
    lookup: Arc<L>,
    district: DistrictId,
    role: RoleId,
    policy: RetryPolicy,
    state: ProbeState,
    in_flight: Option<ProbeFuture>,
    status_tx: watch::Sender<ProbeStatus>,
    events_tx: broadcast::Sender<ProbeEvent>,
}

impl<L: DistrictLookup + 'static> Prober<L> {
    /// Spawns an idle prober for `district` as `role`. Nothing is probed until
    /// [`ProberHandle::check_status`] is called.
    pub fn start(
        lookup: Arc<L>,
        district: DistrictId,
        role: RoleId,
        policy: RetryPolicy,
    ) -> ProberHandle {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(ProbeStatus::default());
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);

        let span = tracing::info_span!("prober", %district, %role);
        let prober = Self {
            lookup,
            district,
            role,
            policy,
            state: ProbeState::new(),
            in_flight: None,
            status_tx,
            events_tx: events_tx.clone(),
        };
        let task = tokio::spawn(prober.run(commands_rx).instrument(span));

        ProberHandle {
            trigger: ProbeTrigger { commands_tx },
            status_rx,
            events_tx,
            task: Some(task),
        }
    }

    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        loop {
            tokio::select! {
                biased;
                command = commands.recv() => match command {
                    Some(Command::Check) => self.check_status(),
                    Some(Command::Resume) => self.resume(),
                    Some(Command::Stop) | None => break,
                },
                outcome = in_flight(&mut self.in_flight) => {
                    self.in_flight = None;
                    self.finish_probe(outcome);
                }
                () = retry_due(&mut self.state.pending_retry) => {
                    self.state.pending_retry = None;
                    debug!(attempt = self.state.attempt, "Retry timer fired");
                    self.check_status();
                }
            }
        }
        debug!(state = ?self.state, "Prober stopped");
    }

    fn check_status(&mut self) {
        if self.state.loading {
            debug!("Probe already in flight, ignoring check");
            return;
        }
        if self.state.pending_retry.take().is_some() {
            debug!("Cancelled pending retry in favour of an immediate check");
        }

        let attempt = self.state.attempt;
        debug!(attempt, "Checking district lookup service");
        self.state.loading = true;
        let lookup = Arc::clone(&self.lookup);
        let district = self.district.clone();
        let role = self.role.clone();
        self.in_flight = Some(Box::pin(async move {
            lookup.search(&district, &role).await
        }));

        self.publish();
        self.emit(ProbeEvent::Started { attempt });
    }

    fn resume(&mut self) {
        if self.state.available == Some(true) {
            debug!("Service known to be available, ignoring resume");
            return;
        }
        info!(
            attempt = self.state.attempt,
            "Resumed while service unavailable, checking again"
        );
        self.check_status();
    }

    fn finish_probe(&mut self, outcome: Result<(), LookupError>) {
        self.state.loading = false;
        let attempt = self.state.attempt;

        let event = match outcome {
            Ok(()) => {
                self.state.available = Some(true);
                info!(attempt, "District lookup service available");
                ProbeEvent::Succeeded { attempt }
            }
            Err(e) if attempt <= self.policy.max_retries => {
                self.state.available = Some(false);
                self.state.attempt = attempt + 1;
                let delay = self.policy.delay_for(self.state.attempt);
                warn!(attempt, error = %e, retry_in = ?delay, "District lookup failed, scheduling retry");
                self.state.pending_retry = Some(Box::pin(sleep(delay)));
                ProbeEvent::Failed {
                    attempt,
                    retry_in: Some(delay),
                }
            }
            Err(e) => {
                self.state.available = Some(false);
                warn!(attempt, error = %e, "District lookup failed, retries exhausted");
                ProbeEvent::Failed {
                    attempt,
                    retry_in: None,
                }
            }
        };

        // Observers see the new status by the time the event arrives.
        self.publish();
        self.emit(event);
        if self.state.snapshot().phase == ProbePhase::Exhausted {
            self.emit(ProbeEvent::Exhausted { attempts: attempt });
        }
    }

    fn publish(&self) {
        self.status_tx.send_replace(self.state.snapshot());
    }

    fn emit(&self, event: ProbeEvent) {
        if self.events_tx.send(event).is_err() {
            trace!("No probe event subscribers");
        }
    }
}

async fn in_flight(slot: &mut Option<ProbeFuture>) -> Result<(), LookupError> {
    match slot.as_mut() {
        Some(probe) => probe.await,
        None => future::pending().await,
    }
}

async fn retry_due(slot: &mut Option<Pin<Box<Sleep>>>) {
    match slot.as_mut() {
        Some(timer) => timer.await,
        None => future::pending().await,
    }
}

/// Cheap, cloneable way to ask a running prober for a check.
#[derive(Debug, Clone)]
pub struct ProbeTrigger {
    commands_tx: mpsc::UnboundedSender<Command>,
}

impl ProbeTrigger {
    /// Probes now, replacing any pending retry. Ignored while a request is in flight.
    pub fn check_status(&self) {
        self.send(Command::Check);
    }

    /// Probes now unless the service is already known to be available.
    ///
    /// The attempt counter is left alone, so an exhausted prober gets exactly one more probe.
    pub fn resume(&self) {
        self.send(Command::Resume);
    }

    fn send(&self, command: Command) {
        if self.commands_tx.send(command).is_err() {
            debug!(?command, "Prober already stopped");
        }
    }
}

/// Owner side of a running prober. Dropping it aborts the prober task.
#[derive(Debug)]
pub struct ProberHandle {
    trigger: ProbeTrigger,
    status_rx: watch::Receiver<ProbeStatus>,
    events_tx: broadcast::Sender<ProbeEvent>,
    task: Option<JoinHandle<()>>,
}

impl ProberHandle {
    pub fn check_status(&self) {
        self.trigger.check_status();
    }

    pub fn resume(&self) {
        self.trigger.resume();
    }

    #[must_use]
    pub fn trigger(&self) -> ProbeTrigger {
        self.trigger.clone()
    }

    #[must_use]
    pub fn status(&self) -> ProbeStatus {
        *self.status_rx.borrow()
    }

    #[must_use]
    pub fn watch(&self) -> watch::Receiver<ProbeStatus> {
        self.status_rx.clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ProbeEvent> {
        self.events_tx.subscribe()
    }

    /// Waits until the prober is either available or out of retries.
    ///
    /// Returns the last published status if the prober stops first.
    pub async fn settled(&self) -> ProbeStatus {
        let mut status_rx = self.status_rx.clone();
        let settled = status_rx
            .wait_for(|status| status.phase.is_terminal())
            .await
            .map(|status| *status);
        settled.unwrap_or_else(|_| *status_rx.borrow())
    }

    /// Stops the prober and waits for its task to finish.
    ///
    /// A pending retry never fires afterwards, and the response of a request
    /// still in flight is discarded.
    pub async fn stop(&mut self) {
        self.trigger.send(Command::Stop);
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            warn!("Prober task ended abnormally: {e}");
        }
    }
}

impl Drop for ProberHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
