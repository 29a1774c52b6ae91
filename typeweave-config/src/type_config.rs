//! Per-type configuration.

use crate::configurable::Configurable;
use crate::property::PropertyConfiguration;
use std::collections::BTreeMap;
use typeweave_core::TypeName;

/// Overrides attached to one type, plus the configuration of its properties.
///
/// Property names are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeConfiguration {
    name: TypeName,
    /// Replacement type name.
    pub rename_to: Configurable<String>,
    /// Replacement documentation.
    pub description: Configurable<String>,
    properties: BTreeMap<String, PropertyConfiguration>,
}

impl TypeConfiguration {
    /// Creates an empty configuration for the named type.
    #[must_use]
    pub fn new(name: TypeName) -> Self {
        Self {
            name,
            rename_to: Configurable::unset(),
            description: Configurable::unset(),
            properties: BTreeMap::new(),
        }
    }

    /// Returns the configured type name.
    #[must_use]
    pub const fn name(&self) -> &TypeName {
        &self.name
    }

    /// Finds the configuration of a property.
    #[must_use]
    pub fn find_property(&self, property: &str) -> Option<&PropertyConfiguration> {
        self.properties.get(&property_key(property))
    }

    /// Returns the configuration of a property, creating it on first use.
    pub fn property_mut(&mut self, property: &str) -> &mut PropertyConfiguration {
        self.properties
            .entry(property_key(property))
            .or_insert_with(|| PropertyConfiguration::new(property))
    }

    /// Iterates the configured properties, ordered by normalized name.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyConfiguration> {
        self.properties.values()
    }
}

fn property_key(property: &str) -> String {
    property.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeweave_core::PackageReference;

    fn person() -> TypeName {
        TypeName::new(PackageReference::local("Pkg", "v2020"), "Person")
    }

    #[test]
    fn test_property_mut_creates_once() {
        let mut config = TypeConfiguration::new(person());
        config.property_mut("Name").rename_to.set("full_name".to_string());
        config.property_mut("NAME").description.set("The name.".to_string());

        assert_eq!(config.properties().count(), 1);
        let property = config.find_property("name").expect("property");
        assert_eq!(property.name(), "Name");
        assert!(property.rename_to.is_set());
        assert!(property.description.is_set());
    }

    #[test]
    fn test_find_property_missing() {
        let config = TypeConfiguration::new(person());
        assert!(config.find_property("Age").is_none());
        assert_eq!(config.name(), &person());
    }
}
