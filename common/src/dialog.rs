//! Dialog requests handed to a [`DialogHost`](crate::DialogHost).

use core::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Which dialog to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DialogKind {
    /// How-to and frequently asked questions.
    Faq,
    /// Search for the user's school district.
    FindMyDistrict,
}

impl DialogKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Faq => "faq",
            Self::FindMyDistrict => "find-my-district",
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Faq, Self::FindMyDistrict]
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown dialog '{s}', expected 'faq' or 'find-my-district'"))
    }
}

/// Presentation options; every unset field leaves the host default in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_class: Option<String>,
    #[serde(default)]
    pub auto_focus: bool,
    #[serde(default)]
    pub has_backdrop: bool,
    #[serde(default)]
    pub close_on_navigation: bool,
}

impl DialogConfig {
    /// Covers the whole viewport, focuses the dialog and closes it when the user navigates away.
    #[must_use]
    pub fn full_screen() -> Self {
        Self {
            max_width: Some("100vw".to_owned()),
            max_height: Some("100vh".to_owned()),
            width: Some("100%".to_owned()),
            height: Some("100%".to_owned()),
            panel_class: Some("full-screen-dialog".to_owned()),
            auto_focus: true,
            has_backdrop: true,
            close_on_navigation: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogRequest {
    pub kind: DialogKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<DialogConfig>,
}

impl DialogRequest {
    #[must_use]
    pub const fn new(kind: DialogKind) -> Self {
        Self { kind, config: None }
    }

    #[must_use]
    pub const fn with_config(kind: DialogKind, config: DialogConfig) -> Self {
        Self {
            kind,
            config: Some(config),
        }
    }
}

/// Opaque handle returned by the host for an opened dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogHandle(pub u64);
