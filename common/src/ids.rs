//! Non-empty identifier newtypes.

use core::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Returned when an identifier is empty or only whitespace.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{kind} must not be empty")]
pub struct IdError {
    pub kind: &'static str,
}

// Defines a string newtype that can only hold trimmed, non-empty values.
macro_rules! define_identifier {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident => $kind:literal;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        $vis struct $name(String);

        impl $name {
            /// Validates and wraps `value`.
            pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(IdError { kind: $kind });
                }
                Ok(Self(if trimmed.len() == value.len() {
                    value
                } else {
                    trimmed.to_owned()
                }))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

define_identifier! {
    /// Identifier of a school district as understood by the district lookup service.
    pub struct DistrictId => "district id";
}

define_identifier! {
    /// Identifier of the role a user logs in as (parent, student, ...).
    pub struct RoleId => "role id";
}

define_identifier! {
    /// Display language code, e.g. `en` or `fr`.
    pub struct LanguageCode => "language code";
}
