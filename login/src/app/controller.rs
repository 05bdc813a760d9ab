//! Login page controller, independent of any UI framework.
//!
//! The UI host drives it through three lifecycle calls: [`LoginController::activate`]
//! once the page is created, [`LoginController::after_render`] once it is on
//! screen, and [`LoginController::teardown`] when it goes away.

use alloc::sync::Arc;

use tokio::{
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
};
use tracing::{Instrument as _, debug, info, warn};

use schoolportal_common::{
    DialogHandle, DialogHost, DistrictId, DistrictLookup, LanguageCode, LanguageStore, Platform,
    PlatformHost, RoleId, SessionService,
};

use super::{
    PlatformSignal, ProbeEvent, ProbeStatus, Prober, ProberHandle, RetryPolicy, SignalSource,
    dialogs, language,
};

/// Everything the controller reaches out to.
pub struct Collaborators<L> {
    pub lookup: Arc<L>,
    pub language: Arc<dyn LanguageStore>,
    pub session: Arc<dyn SessionService>,
    pub dialogs: Arc<dyn DialogHost>,
    pub platform: Arc<dyn PlatformHost>,
    pub signals: Arc<dyn SignalSource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSettings {
    /// District and role probed for backend availability.
    pub district: DistrictId,
    pub role: RoleId,
    pub retry: RetryPolicy,
    /// Plain web build; native-hosted builds style the status bar on device-ready.
    pub web: bool,
    pub os: Platform,
}

pub struct LoginController<L> {
    collaborators: Collaborators<L>,
    settings: LoginSettings,
    current_language: Option<LanguageCode>,
    prober: Option<ProberHandle>,
    listeners: Vec<JoinHandle<()>>,
}

impl<L: DistrictLookup + 'static> LoginController<L> {
    #[must_use]
    pub const fn new(collaborators: Collaborators<L>, settings: LoginSettings) -> Self {
        Self {
            collaborators,
            settings,
            current_language: None,
            prober: None,
            listeners: Vec::new(),
        }
    }

    /// Page creation: restores the language, starts probing the backend,
    /// listens for resume signals and ends any leftover session.
    pub fn activate(&mut self) {
        if self.prober.is_some() {
            warn!("Login controller already active");
            return;
        }

        self.set_language(None);

        let prober = Prober::start(
            Arc::clone(&self.collaborators.lookup),
            self.settings.district.clone(),
            self.settings.role.clone(),
            self.settings.retry,
        );
        prober.check_status();

        let trigger = prober.trigger();
        let mut signals = self.collaborators.signals.subscribe();
        self.listeners.push(tokio::spawn(
            async move {
                loop {
                    match signals.recv().await {
                        Ok(PlatformSignal::Resume) => trigger.resume(),
                        Ok(PlatformSignal::DeviceReady) => {}
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "Missed platform signals, treating as resume");
                            trigger.resume();
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }
            .in_current_span(),
        ));

        self.prober = Some(prober);
        self.collaborators.session.end_session();
        info!(
            district = %self.settings.district,
            role = %self.settings.role,
            "Login controller activated"
        );
    }

    /// Page rendered: on native-hosted builds, styles the status bar once the device is ready.
    pub fn after_render(&mut self) {
        if self.settings.web {
            return;
        }

        let style = self.settings.os.status_bar_style();
        let platform = Arc::clone(&self.collaborators.platform);
        let mut signals = self.collaborators.signals.subscribe();
        self.listeners.push(tokio::spawn(
            async move {
                loop {
                    match signals.recv().await {
                        Ok(PlatformSignal::DeviceReady) => {
                            debug!(?style, "Device ready, styling status bar");
                            platform.style_status_bar(style);
                            break;
                        }
                        Ok(PlatformSignal::Resume) | Err(RecvError::Lagged(_)) => {}
                        Err(RecvError::Closed) => break,
                    }
                }
            }
            .in_current_span(),
        ));
    }

    /// Page destroyed: cancels any pending retry and stops listening for signals.
    pub async fn teardown(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.abort();
        }
        if let Some(mut prober) = self.prober.take() {
            prober.stop().await;
            info!("Login controller torn down");
        }
    }

    pub fn set_language(&mut self, requested: Option<&str>) -> LanguageCode {
        let language = language::set_language(self.collaborators.language.as_ref(), requested);
        self.current_language = Some(language.clone());
        language
    }

    #[must_use]
    pub const fn current_language(&self) -> Option<&LanguageCode> {
        self.current_language.as_ref()
    }

    pub fn open_faq_dialog(&self) -> DialogHandle {
        dialogs::open_faq(self.collaborators.dialogs.as_ref())
    }

    pub fn open_find_my_district_dialog(&self) -> DialogHandle {
        dialogs::open_find_my_district(self.collaborators.dialogs.as_ref())
    }

    /// Availability as currently known; idle before activation and after teardown.
    #[must_use]
    pub fn status(&self) -> ProbeStatus {
        self.prober
            .as_ref()
            .map_or_else(ProbeStatus::default, ProberHandle::status)
    }

    /// Probe activity trace; `None` before activation and after teardown.
    #[must_use]
    pub fn subscribe_events(&self) -> Option<broadcast::Receiver<ProbeEvent>> {
        self.prober.as_ref().map(ProberHandle::subscribe)
    }

    #[must_use]
    pub const fn prober(&self) -> Option<&ProberHandle> {
        self.prober.as_ref()
    }
}

impl<L> Drop for LoginController<L> {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.abort();
        }
    }
}
