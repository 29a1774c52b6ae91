//! Payload serialization modes.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Controls which empty values a property keeps when serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PayloadType {
    /// Omit `None` values and empty collections.
    #[default]
    OmitEmptyProperties,
    /// Always send collections, even when empty; omit `None` values.
    ExplicitCollections,
    /// Always send every property, including `None` as `null`.
    ExplicitProperties,
}

impl PayloadType {
    /// All payload types, in declaration order.
    pub const ALL: [PayloadType; 3] = [
        Self::OmitEmptyProperties,
        Self::ExplicitCollections,
        Self::ExplicitProperties,
    ];

    /// Returns the configuration spelling of this payload type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OmitEmptyProperties => "omitEmptyProperties",
            Self::ExplicitCollections => "explicitCollections",
            Self::ExplicitProperties => "explicitProperties",
        }
    }

    /// Returns true if `None` values are skipped.
    #[must_use]
    pub const fn omits_none(&self) -> bool {
        !matches!(self, Self::ExplicitProperties)
    }

    /// Returns true if empty collections are skipped.
    #[must_use]
    pub const fn omits_empty_collections(&self) -> bool {
        matches!(self, Self::OmitEmptyProperties)
    }
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayloadType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                ConfigError::invalid_value(
                    "$payloadType",
                    s,
                    "expected omitEmptyProperties, explicitCollections or explicitProperties",
                )
            })
    }
}
