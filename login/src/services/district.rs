//! District lookup over HTTP.

use eyre::WrapErr as _;
use tracing::debug;

use schoolportal_common::{DistrictId, DistrictLookup, LookupError, RoleId};

use crate::config::LookupConfig;

/// Searches districts via `GET {base_url}/districts/search?keyword=..&role=..`.
///
/// Any 2xx answer counts as success; the body is ignored.
#[derive(Debug, Clone)]
pub struct HttpDistrictLookup {
    client: reqwest::Client,
    search_url: String,
}

impl HttpDistrictLookup {
    /// Builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed (e.g. no TLS provider installed).
    pub fn new(config: &LookupConfig) -> eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .wrap_err("Failed to build HTTP client for district lookup")?;
        Ok(Self {
            client,
            search_url: format!("{}/districts/search", config.base_url.trim_end_matches('/')),
        })
    }
}

impl DistrictLookup for HttpDistrictLookup {
    async fn search(&self, district: &DistrictId, role: &RoleId) -> Result<(), LookupError> {
        let response = self
            .client
            .get(&self.search_url)
            .query(&[("keyword", district.as_str()), ("role", role.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LookupError::Timeout
                } else {
                    LookupError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        debug!(%status, url = %self.search_url, "District lookup answered");
        if status.is_success() {
            Ok(())
        } else {
            Err(LookupError::Status(status.as_u16()))
        }
    }
}
