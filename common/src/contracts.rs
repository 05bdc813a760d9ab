//! Contracts for the collaborators the login controller talks to.
//!
//! Everything UI-framework specific (rendering dialogs, persisting preferences,
//! talking HTTP) lives behind these traits so the controller can run headless.

use core::future::Future;

use thiserror::Error as ThisError;

use crate::{DialogHandle, DialogRequest, DistrictId, LanguageCode, RoleId, StatusBarStyle};

/// Why a district lookup did not succeed.
///
/// The prober treats every variant the same way; the distinction only exists for logging.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum LookupError {
    #[error("lookup service answered with status {0}")]
    Status(u16),
    #[error("lookup request failed: {0}")]
    Transport(String),
    #[error("lookup request timed out")]
    Timeout,
}

/// Remote district search, used as a liveness probe for the backend.
pub trait DistrictLookup: Send + Sync {
    /// Searches for `district` as seen by `role`. Only success or failure matters.
    fn search(
        &self,
        district: &DistrictId,
        role: &RoleId,
    ) -> impl Future<Output = Result<(), LookupError>> + Send;
}

/// Persisted display language preference.
///
/// Implementations never fail; they fall back to a default on their own.
pub trait LanguageStore: Send + Sync {
    fn get(&self) -> LanguageCode;
    fn set(&self, language: &LanguageCode);
}

/// Ends whatever session a previous visit left behind. Fire-and-forget.
pub trait SessionService: Send + Sync {
    fn end_session(&self);
}

/// Opens modal dialogs. Stacking and singleton behaviour is up to the host.
pub trait DialogHost: Send + Sync {
    fn open(&self, request: DialogRequest) -> DialogHandle;
}

/// Native shell integration.
pub trait PlatformHost: Send + Sync {
    fn style_status_bar(&self, style: StatusBarStyle);
}
