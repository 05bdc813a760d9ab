use serde::{Deserialize, Serialize};

/// Operating system of a native-hosted shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    #[default]
    Other,
}

impl Platform {
    /// iOS keeps the default dark-on-light bar, everything else uses light content.
    #[must_use]
    pub const fn status_bar_style(self) -> StatusBarStyle {
        match self {
            Self::Ios => StatusBarStyle::Default,
            Self::Android | Self::Other => StatusBarStyle::LightContent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusBarStyle {
    Default,
    LightContent,
}
