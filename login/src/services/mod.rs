//! Production adapters for the controller's collaborators.

mod district;
mod hosts;
mod language;
mod session;

pub use district::HttpDistrictLookup;
pub use hosts::{LogDialogHost, LogPlatformHost};
pub use language::FileLanguageStore;
pub use session::FileSession;
