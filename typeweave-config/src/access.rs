//! Generic lenses over configuration cells.
//!
//! Each setting kind is described once, by a function that picks its
//! [`Configurable`] cell out of a configuration record. The lookup and
//! creation logic across the type name -> property name -> cell nesting
//! lives here and nowhere else.

use crate::configurable::Configurable;
use crate::error::ConfigError;
use crate::object_model::ObjectModelConfiguration;
use crate::property::PropertyConfiguration;
use crate::type_config::TypeConfiguration;
use typeweave_core::TypeName;

/// Extracts one cell from a property configuration.
pub type PropertyCell<T> = fn(&PropertyConfiguration) -> &Configurable<T>;

/// Extracts one cell from a property configuration for writing.
pub type PropertyCellMut<T> = fn(&mut PropertyConfiguration) -> &mut Configurable<T>;

/// Extracts one cell from a type configuration.
pub type TypeCell<T> = fn(&TypeConfiguration) -> &Configurable<T>;

/// Extracts one cell from a type configuration for writing.
pub type TypeCellMut<T> = fn(&mut TypeConfiguration) -> &mut Configurable<T>;

/// Typed lookup of one property-level setting.
pub struct PropertyAccess<'a, T> {
    model: &'a ObjectModelConfiguration,
    cell: PropertyCell<T>,
}

impl<'a, T> PropertyAccess<'a, T> {
    /// Creates a lens over `model` for the cell chosen by `cell`.
    #[must_use]
    pub fn new(model: &'a ObjectModelConfiguration, cell: PropertyCell<T>) -> Self {
        Self { model, cell }
    }
}

impl<T: Clone> PropertyAccess<'_, T> {
    /// Looks up the explicit value for `property` of `name`.
    ///
    /// Returns `None` if the type has no configuration, the property has no
    /// configuration, or the cell was never set.
    #[must_use]
    pub fn lookup(&self, name: &TypeName, property: &str) -> Option<T> {
        self.model
            .find_property(name, property)
            .and_then(|config| (self.cell)(config).value())
            .cloned()
    }

    /// Looks up the explicit value, falling back to `default`.
    #[must_use]
    pub fn lookup_or(&self, name: &TypeName, property: &str, default: T) -> T {
        self.lookup(name, property).unwrap_or(default)
    }
}

impl<T> Clone for PropertyAccess<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PropertyAccess<'_, T> {}

/// Typed modification of one property-level setting.
pub struct PropertyAccessMut<'a, T> {
    model: &'a mut ObjectModelConfiguration,
    cell: PropertyCellMut<T>,
}

impl<'a, T> PropertyAccessMut<'a, T> {
    /// Creates a lens over `model` for the cell chosen by `cell`.
    #[must_use]
    pub fn new(model: &'a mut ObjectModelConfiguration, cell: PropertyCellMut<T>) -> Self {
        Self { model, cell }
    }

    /// Applies `mutator` to the cell for `property` of `name`, creating the
    /// configuration entries if needed.
    ///
    /// # Errors
    /// Returns the mutator's error, wrapped with the type and property names.
    pub fn modify<F>(&mut self, name: &TypeName, property: &str, mutator: F) -> Result<(), ConfigError>
    where
        F: FnOnce(&mut Configurable<T>) -> Result<(), ConfigError>,
    {
        let cell = self.cell;
        self.model
            .modify_property(name, property, |config| mutator(cell(config)))
    }

    /// Sets the cell for `property` of `name`.
    ///
    /// # Errors
    /// Never fails today; the signature matches [`Self::modify`].
    pub fn set(&mut self, name: &TypeName, property: &str, value: T) -> Result<(), ConfigError> {
        self.modify(name, property, |cell| {
            cell.set(value);
            Ok(())
        })
    }
}

/// Typed lookup of one type-level setting.
pub struct TypeAccess<'a, T> {
    model: &'a ObjectModelConfiguration,
    cell: TypeCell<T>,
}

impl<'a, T> TypeAccess<'a, T> {
    /// Creates a lens over `model` for the cell chosen by `cell`.
    #[must_use]
    pub fn new(model: &'a ObjectModelConfiguration, cell: TypeCell<T>) -> Self {
        Self { model, cell }
    }
}

impl<T: Clone> TypeAccess<'_, T> {
    /// Looks up the explicit value for `name`.
    #[must_use]
    pub fn lookup(&self, name: &TypeName) -> Option<T> {
        self.model
            .find_type(name)
            .and_then(|config| (self.cell)(config).value())
            .cloned()
    }

    /// Looks up the explicit value, falling back to `default`.
    #[must_use]
    pub fn lookup_or(&self, name: &TypeName, default: T) -> T {
        self.lookup(name).unwrap_or(default)
    }
}

impl<T> Clone for TypeAccess<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypeAccess<'_, T> {}

/// Typed modification of one type-level setting.
pub struct TypeAccessMut<'a, T> {
    model: &'a mut ObjectModelConfiguration,
    cell: TypeCellMut<T>,
}

impl<'a, T> TypeAccessMut<'a, T> {
    /// Creates a lens over `model` for the cell chosen by `cell`.
    #[must_use]
    pub fn new(model: &'a mut ObjectModelConfiguration, cell: TypeCellMut<T>) -> Self {
        Self { model, cell }
    }

    /// Applies `mutator` to the cell for `name`.
    ///
    /// # Errors
    /// Returns the mutator's error, wrapped with the type name.
    pub fn modify<F>(&mut self, name: &TypeName, mutator: F) -> Result<(), ConfigError>
    where
        F: FnOnce(&mut Configurable<T>) -> Result<(), ConfigError>,
    {
        let cell = self.cell;
        self.model.modify_type(name, |config| mutator(cell(config)))
    }

    /// Sets the cell for `name`.
    ///
    /// # Errors
    /// Never fails today; the signature matches [`Self::modify`].
    pub fn set(&mut self, name: &TypeName, value: T) -> Result<(), ConfigError> {
        self.modify(name, |cell| {
            cell.set(value);
            Ok(())
        })
    }
}
