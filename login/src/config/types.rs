//! Configuration data types and structures for the login controller.
//!
//! This module contains all the data structures used for configuration,
//! including the probed district, lookup endpoint, retry budget, persisted
//! state locations and the execution platform.

use core::time::Duration;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use schoolportal_common::{DistrictId, LanguageCode, Platform, RoleId};

/// District and role the availability probe searches for.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DistrictConfig {
    #[serde(default = "default_district")]
    pub id: DistrictId,
    #[serde(default = "default_role")]
    pub role: RoleId,
}

impl Default for DistrictConfig {
    fn default() -> Self {
        Self {
            id: default_district(),
            role: default_role(),
        }
    }
}

/// Remote district lookup service.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Base URL of the portal API, without the `/districts/search` suffix.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl LookupConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Retry budget of the availability probe.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries scheduled after the first failed probe.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Multiplied by the attempt number to get the delay before a retry.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Used when no preference has been persisted yet.
    #[serde(default = "default_language")]
    pub default: LanguageCode,
    /// Preference file. Relative paths are resolved relative to the config file.
    #[serde(default = "default_language_path")]
    pub path: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default: default_language(),
            path: default_language_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Session marker removed on login page activation. Relative paths are resolved relative to the config file.
    #[serde(default = "default_session_path")]
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

/// Execution context of the UI host.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Plain web build. When false the controller waits for device-ready to style the native shell.
    #[serde(default = "do_web")]
    pub web: bool,
    #[serde(default)]
    pub os: Platform,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            web: do_web(),
            os: Platform::default(),
        }
    }
}

fn default_district() -> DistrictId {
    DistrictId::new("schoolcafe").expect("literal is non-empty")
}

fn default_role() -> RoleId {
    RoleId::new("parent").expect("literal is non-empty")
}

fn default_language() -> LanguageCode {
    LanguageCode::new("en").expect("literal is non-empty")
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_base_delay_ms() -> u64 {
    6000
}

fn default_language_path() -> String {
    "./language.json".to_string()
}

fn default_session_path() -> String {
    "./session.json".to_string()
}

const fn do_web() -> bool {
    true
}

/// Resolves a state file location from the config (language preference, session marker).
///
/// Relative locations are taken relative to the directory holding the config file.
/// Normalized lexically, the file may not exist yet.
pub fn resolve_config_relative_paths(config_path: &Path, relative_path: &str) -> PathBuf {
    let path = Path::new(relative_path);
    if path.is_absolute() {
        return normalize_path(path);
    }
    let base = config_path.parent().unwrap_or_else(|| Path::new(""));
    normalize_path(&base.join(path))
}

/// Drops `.` components and lets `..` pop the preceding one.
fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                result.pop();
            }
            Component::Normal(_) | Component::RootDir | Component::Prefix(_) => {
                result.push(component);
            }
        }
    }
    result
}

/// Root config structure for the login controller.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoginConfig {
    #[serde(default)]
    pub district: DistrictConfig,
    pub lookup: LookupConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub language: LanguageConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
}
