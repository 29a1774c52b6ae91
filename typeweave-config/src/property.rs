//! Per-property configuration.

use crate::configurable::Configurable;
use crate::payload::PayloadType;

/// Overrides attached to one property of one type.
///
/// Every cell is independently optional; an unset cell defers to the
/// generator's default behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyConfiguration {
    name: String,
    /// How empty values of the property are serialized.
    pub payload_type: Configurable<PayloadType>,
    /// Replacement field name.
    pub rename_to: Configurable<String>,
    /// Replacement documentation.
    pub description: Configurable<String>,
}

impl PropertyConfiguration {
    /// Creates an empty configuration for the named property.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload_type: Configurable::unset(),
            rename_to: Configurable::unset(),
            description: Configurable::unset(),
        }
    }

    /// Returns the property name as first written.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if no cell has been set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.payload_type.is_set() && !self.rename_to.is_set() && !self.description.is_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_configuration_new_is_empty() {
        let config = PropertyConfiguration::new("Name");
        assert_eq!(config.name(), "Name");
        assert!(config.is_empty());
    }

    #[test]
    fn test_property_configuration_cells_are_independent() {
        let mut config = PropertyConfiguration::new("Name");
        config.payload_type.set(PayloadType::ExplicitProperties);

        assert!(!config.is_empty());
        assert!(config.payload_type.is_set());
        assert!(!config.rename_to.is_set());
        assert!(!config.description.is_set());
    }
}
