//! In-memory collaborators shared by the unit tests.

use alloc::{collections::VecDeque, sync::Arc};
use core::{
    sync::atomic::{AtomicU32, Ordering},
    time::Duration,
};
use std::sync::Mutex;

use tokio::time;

use schoolportal_common::{
    DialogHandle, DialogHost, DialogRequest, DistrictId, DistrictLookup, LanguageCode,
    LanguageStore, LookupError, PlatformHost, RoleId, SessionService, StatusBarStyle,
};

/// Answers with scripted outcomes (`true` = success), failing once the script runs out.
pub(crate) struct ScriptedLookup {
    outcomes: Mutex<VecDeque<bool>>,
    latency: Duration,
    calls: AtomicU32,
}

impl ScriptedLookup {
    pub(crate) fn new(outcomes: &[bool]) -> Arc<Self> {
        Self::with_latency(outcomes, Duration::ZERO)
    }

    pub(crate) fn with_latency(outcomes: &[bool], latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.iter().copied().collect()),
            latency,
            calls: AtomicU32::new(0),
        })
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DistrictLookup for ScriptedLookup {
    async fn search(&self, _district: &DistrictId, _role: &RoleId) -> Result<(), LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            time::sleep(self.latency).await;
        }
        let succeed = self.outcomes.lock().unwrap().pop_front().unwrap_or(false);
        if succeed {
            Ok(())
        } else {
            Err(LookupError::Status(503))
        }
    }
}

pub(crate) struct MemoryLanguageStore {
    current: Mutex<LanguageCode>,
    pub(crate) writes: Mutex<Vec<LanguageCode>>,
}

impl MemoryLanguageStore {
    pub(crate) fn new(current: &str) -> Self {
        Self {
            current: Mutex::new(LanguageCode::new(current).unwrap()),
            writes: Mutex::new(Vec::new()),
        }
    }
}

impl LanguageStore for MemoryLanguageStore {
    fn get(&self) -> LanguageCode {
        self.current.lock().unwrap().clone()
    }

    fn set(&self, language: &LanguageCode) {
        *self.current.lock().unwrap() = language.clone();
        self.writes.lock().unwrap().push(language.clone());
    }
}

#[derive(Default)]
pub(crate) struct CountingSession {
    pub(crate) ended: AtomicU32,
}

impl SessionService for CountingSession {
    fn end_session(&self) {
        self.ended.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub(crate) struct RecordingDialogHost {
    pub(crate) opened: Mutex<Vec<DialogRequest>>,
}

impl DialogHost for RecordingDialogHost {
    fn open(&self, request: DialogRequest) -> DialogHandle {
        let mut opened = self.opened.lock().unwrap();
        opened.push(request);
        DialogHandle(opened.len() as u64)
    }
}

#[derive(Default)]
pub(crate) struct RecordingPlatform {
    pub(crate) styles: Mutex<Vec<StatusBarStyle>>,
}

impl PlatformHost for RecordingPlatform {
    fn style_status_bar(&self, style: StatusBarStyle) {
        self.styles.lock().unwrap().push(style);
    }
}
