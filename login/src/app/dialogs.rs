use schoolportal_common::{DialogConfig, DialogHandle, DialogHost, DialogKind, DialogRequest};
use tracing::debug;

/// How-to and FAQs, with the host's default presentation.
pub fn open_faq(host: &dyn DialogHost) -> DialogHandle {
    debug!("Opening FAQ dialog");
    host.open(DialogRequest::new(DialogKind::Faq))
}

/// District search, covering the whole screen.
pub fn open_find_my_district(host: &dyn DialogHost) -> DialogHandle {
    debug!("Opening find-my-district dialog");
    host.open(DialogRequest::with_config(
        DialogKind::FindMyDistrict,
        DialogConfig::full_screen(),
    ))
}

pub fn open(host: &dyn DialogHost, kind: DialogKind) -> DialogHandle {
    match kind {
        DialogKind::Faq => open_faq(host),
        DialogKind::FindMyDistrict => open_find_my_district(host),
    }
}
