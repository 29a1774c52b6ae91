//! The configuration store.

use crate::access::{PropertyAccess, PropertyAccessMut, TypeAccess, TypeAccessMut};
use crate::error::ConfigError;
use crate::payload::PayloadType;
use crate::property::PropertyConfiguration;
use crate::type_config::TypeConfiguration;
use std::collections::BTreeMap;
use tracing::trace;
use typeweave_core::TypeName;

/// Maps type names, and property names within them, to configuration.
///
/// Entries are created on first write and never removed during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectModelConfiguration {
    types: BTreeMap<TypeName, TypeConfiguration>,
}

impl ObjectModelConfiguration {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locates or creates the configuration for `name` and applies `mutator`.
    ///
    /// # Errors
    /// Returns the mutator's error, wrapped with the type name.
    pub fn modify_type<F>(&mut self, name: &TypeName, mutator: F) -> Result<(), ConfigError>
    where
        F: FnOnce(&mut TypeConfiguration) -> Result<(), ConfigError>,
    {
        trace!(type_name = %name, "modifying type configuration");
        let config = self.type_mut(name);
        mutator(config).map_err(|source| ConfigError::Type {
            type_name: name.clone(),
            source: Box::new(source),
        })
    }

    /// Locates or creates the configuration for `property` of `name` and
    /// applies `mutator`.
    ///
    /// # Errors
    /// Returns the mutator's error, wrapped with the type and property names.
    pub fn modify_property<F>(
        &mut self,
        name: &TypeName,
        property: &str,
        mutator: F,
    ) -> Result<(), ConfigError>
    where
        F: FnOnce(&mut PropertyConfiguration) -> Result<(), ConfigError>,
    {
        trace!(type_name = %name, property, "modifying property configuration");
        let config = self.type_mut(name).property_mut(property);
        mutator(config).map_err(|source| ConfigError::Property {
            type_name: name.clone(),
            property: property.to_string(),
            source: Box::new(source),
        })
    }

    /// Finds the configuration of a type.
    #[must_use]
    pub fn find_type(&self, name: &TypeName) -> Option<&TypeConfiguration> {
        self.types.get(name)
    }

    /// Finds the configuration of a property.
    #[must_use]
    pub fn find_property(&self, name: &TypeName, property: &str) -> Option<&PropertyConfiguration> {
        self.find_type(name)
            .and_then(|config| config.find_property(property))
    }

    /// Iterates the configured types in name order.
    pub fn types(&self) -> impl Iterator<Item = &TypeConfiguration> {
        self.types.values()
    }

    /// Returns the number of configured types.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Returns true if nothing has been configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Lookup lens for property payload types.
    #[must_use]
    pub fn payload_types(&self) -> PropertyAccess<'_, PayloadType> {
        PropertyAccess::new(self, |c| &c.payload_type)
    }

    /// Modify lens for property payload types.
    #[must_use]
    pub fn payload_types_mut(&mut self) -> PropertyAccessMut<'_, PayloadType> {
        PropertyAccessMut::new(self, |c| &mut c.payload_type)
    }

    /// Lookup lens for property renames.
    #[must_use]
    pub fn property_renames(&self) -> PropertyAccess<'_, String> {
        PropertyAccess::new(self, |c| &c.rename_to)
    }

    /// Modify lens for property renames.
    #[must_use]
    pub fn property_renames_mut(&mut self) -> PropertyAccessMut<'_, String> {
        PropertyAccessMut::new(self, |c| &mut c.rename_to)
    }

    /// Lookup lens for property descriptions.
    #[must_use]
    pub fn property_descriptions(&self) -> PropertyAccess<'_, String> {
        PropertyAccess::new(self, |c| &c.description)
    }

    /// Modify lens for property descriptions.
    #[must_use]
    pub fn property_descriptions_mut(&mut self) -> PropertyAccessMut<'_, String> {
        PropertyAccessMut::new(self, |c| &mut c.description)
    }

    /// Lookup lens for type renames.
    #[must_use]
    pub fn type_renames(&self) -> TypeAccess<'_, String> {
        TypeAccess::new(self, |c| &c.rename_to)
    }

    /// Modify lens for type renames.
    #[must_use]
    pub fn type_renames_mut(&mut self) -> TypeAccessMut<'_, String> {
        TypeAccessMut::new(self, |c| &mut c.rename_to)
    }

    /// Lookup lens for type descriptions.
    #[must_use]
    pub fn type_descriptions(&self) -> TypeAccess<'_, String> {
        TypeAccess::new(self, |c| &c.description)
    }

    /// Modify lens for type descriptions.
    #[must_use]
    pub fn type_descriptions_mut(&mut self) -> TypeAccessMut<'_, String> {
        TypeAccessMut::new(self, |c| &mut c.description)
    }

    fn type_mut(&mut self, name: &TypeName) -> &mut TypeConfiguration {
        self.types
            .entry(name.clone())
            .or_insert_with(|| TypeConfiguration::new(name.clone()))
    }
}
