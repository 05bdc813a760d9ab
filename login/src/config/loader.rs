//! Reading the login config file.

use std::path::Path;

use eyre::WrapErr as _;
use tokio::fs;

use crate::config::LoginConfig;

/// Loads the login config. Missing sections fall back to their defaults; `[lookup]` is required.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not TOML, or holds an empty district, role or language.
pub async fn load<P: AsRef<Path>>(path: P) -> eyre::Result<LoginConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("Failed to read login config at {}", path.display()))?;
    toml::from_str(&content)
        .wrap_err_with(|| format!("Invalid login config at {}", path.display()))
}
