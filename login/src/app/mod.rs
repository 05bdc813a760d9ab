mod controller;
mod dialogs;
mod language;
mod prober;
mod signals;
mod state;
#[cfg(test)]
pub(crate) mod testing;

pub use controller::{Collaborators, LoginController, LoginSettings};
pub use dialogs::{open, open_faq, open_find_my_district};
pub use language::set_language;
pub use prober::{ProbeTrigger, Prober, ProberHandle, RetryPolicy};
pub use signals::{PlatformSignal, SignalHub, SignalSource};
pub use state::{ProbeEvent, ProbePhase, ProbeStatus};
