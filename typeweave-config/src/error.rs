//! Error types for configuration.

use thiserror::Error;
use typeweave_core::TypeName;

/// Error type for configuration operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A setting was given two different values.
    #[error("conflicting values for {setting}: already '{existing}', cannot set '{requested}'")]
    Conflict {
        /// Setting name.
        setting: String,
        /// Value already held.
        existing: String,
        /// Value that was rejected.
        requested: String,
    },

    /// A setting value is not acceptable.
    #[error("invalid value '{value}' for {setting}: {reason}")]
    InvalidValue {
        /// Setting name.
        setting: String,
        /// Rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An error raised while configuring a type.
    #[error("configuring type {type_name}: {source}")]
    Type {
        /// Type being configured.
        type_name: TypeName,
        /// Underlying error.
        #[source]
        source: Box<ConfigError>,
    },

    /// An error raised while configuring a property.
    #[error("configuring property {property} of {type_name}: {source}")]
    Property {
        /// Type owning the property.
        type_name: TypeName,
        /// Property being configured.
        property: String,
        /// Underlying error.
        #[source]
        source: Box<ConfigError>,
    },
}

impl ConfigError {
    /// Creates a conflict error.
    pub fn conflict(
        setting: impl Into<String>,
        existing: impl Into<String>,
        requested: impl Into<String>,
    ) -> Self {
        Self::Conflict {
            setting: setting.into(),
            existing: existing.into(),
            requested: requested.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(
        setting: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            setting: setting.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Returns the innermost error, unwrapping type and property context.
    #[must_use]
    pub fn root_cause(&self) -> &ConfigError {
        match self {
            Self::Type { source, .. } | Self::Property { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
