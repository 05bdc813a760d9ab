use schoolportal_common::{LanguageCode, LanguageStore};
use tracing::debug;

/// Resolves the display language and writes it back to `store`.
///
/// An explicit, non-blank `requested` language wins; otherwise the persisted
/// preference is kept. The result is always written back, which is a no-op
/// for an unchanged preference.
pub fn set_language(store: &dyn LanguageStore, requested: Option<&str>) -> LanguageCode {
    let language = requested
        .and_then(|requested| LanguageCode::new(requested).ok())
        .unwrap_or_else(|| store.get());
    debug!(%language, "Setting display language");
    store.set(&language);
    language
}
