//! Named type definitions.

use crate::context::CodeGenerationContext;
use crate::error::NamingError;
use crate::types::{PackageImportSet, Shape, Type};
use proc_macro2::TokenStream;
use std::collections::BTreeMap;
use std::collections::btree_map;
use typeweave_core::{PackageReference, TypeName, TypeNameSet};

/// A name bound to a type.
///
/// Equality compares name and type; the description is documentation only.
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    name: TypeName,
    ty: Type,
    description: Option<String>,
}

impl TypeDefinition {
    /// Binds `name` to `ty`.
    #[must_use]
    pub fn new(name: TypeName, ty: Type) -> Self {
        Self {
            name,
            ty,
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets or clears the description.
    #[must_use]
    pub fn with_optional_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Returns a copy bound to a different type.
    #[must_use]
    pub fn with_type(&self, ty: Type) -> Self {
        Self {
            ty,
            ..self.clone()
        }
    }

    /// Returns a copy under a different name.
    #[must_use]
    pub fn with_name(&self, name: TypeName) -> Self {
        Self {
            name,
            ..self.clone()
        }
    }

    /// Defined name.
    #[must_use]
    pub const fn name(&self) -> &TypeName {
        &self.name
    }

    /// Bound type.
    #[must_use]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Named types the bound type refers to.
    #[must_use]
    pub fn references(&self) -> TypeNameSet {
        self.ty.references()
    }

    /// Packages the declarations need in scope.
    #[must_use]
    pub fn required_imports(&self) -> PackageImportSet {
        self.ty.required_imports()
    }

    /// Renders the declarations for this definition.
    #[must_use]
    pub fn as_declarations(&self, ctx: &CodeGenerationContext) -> Vec<TokenStream> {
        self.ty
            .as_declarations(ctx, &self.name, self.description.as_deref())
    }

    /// Returns true if the definition is a bare alias of itself.
    #[must_use]
    pub fn is_self_alias(&self) -> bool {
        self.ty.as_name() == Some(&self.name)
    }
}

impl PartialEq for TypeDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.ty == other.ty
    }
}

impl Eq for TypeDefinition {}

/// Definitions keyed by name, iterated in name order.
#[derive(Debug, Clone, Default)]
pub struct TypeDefinitionSet {
    definitions: BTreeMap<TypeName, TypeDefinition>,
}

impl TypeDefinitionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set, merging equal definitions.
    ///
    /// # Errors
    /// Returns [`NamingError::Collision`] if one name is bound to two
    /// different types.
    pub fn try_from_definitions(
        definitions: impl IntoIterator<Item = TypeDefinition>,
    ) -> Result<Self, NamingError> {
        let mut set = Self::new();
        for definition in definitions {
            set.insert(definition)?;
        }
        Ok(set)
    }

    /// Adds a definition.
    ///
    /// Returns `Ok(false)` if an equal definition was already present.
    ///
    /// # Errors
    /// Returns [`NamingError::Collision`] if the name is already bound to a
    /// different type.
    pub fn insert(&mut self, definition: TypeDefinition) -> Result<bool, NamingError> {
        match self.definitions.get(definition.name()) {
            Some(existing) if existing.ty() == definition.ty() => Ok(false),
            Some(existing) => Err(NamingError::collision(
                definition.name().clone(),
                format!("existing {}", existing.ty().kind()),
                format!("new {}", definition.ty().kind()),
            )),
            None => {
                self.definitions
                    .insert(definition.name().clone(), definition);
                Ok(true)
            }
        }
    }

    /// Adds or replaces a definition, returning the one it replaced.
    pub fn replace(&mut self, definition: TypeDefinition) -> Option<TypeDefinition> {
        self.definitions
            .insert(definition.name().clone(), definition)
    }

    /// Removes a definition.
    pub fn remove(&mut self, name: &TypeName) -> Option<TypeDefinition> {
        self.definitions.remove(name)
    }

    /// Finds a definition by name.
    #[must_use]
    pub fn get(&self, name: &TypeName) -> Option<&TypeDefinition> {
        self.definitions.get(name)
    }

    /// Returns true if `name` is defined.
    #[must_use]
    pub fn contains(&self, name: &TypeName) -> bool {
        self.definitions.contains_key(name)
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterates definitions in name order.
    pub fn iter(&self) -> btree_map::Values<'_, TypeName, TypeDefinition> {
        self.definitions.values()
    }

    /// All defined names.
    #[must_use]
    pub fn names(&self) -> TypeNameSet {
        self.definitions.keys().cloned().collect()
    }

    /// Iterates the definitions that live in `package`.
    pub fn in_package<'a>(
        &'a self,
        package: &'a PackageReference,
    ) -> impl Iterator<Item = &'a TypeDefinition> + 'a {
        self.iter().filter(move |definition| definition.name().is_in(package))
    }

    /// Packages that own at least one definition.
    #[must_use]
    pub fn packages(&self) -> Vec<PackageReference> {
        let mut packages: Vec<PackageReference> = self
            .definitions
            .keys()
            .map(|name| name.package().clone())
            .collect();
        packages.dedup();
        packages
    }
}

impl IntoIterator for TypeDefinitionSet {
    type Item = TypeDefinition;
    type IntoIter = btree_map::IntoValues<TypeName, TypeDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.into_values()
    }
}

impl<'a> IntoIterator for &'a TypeDefinitionSet {
    type Item = &'a TypeDefinition;
    type IntoIter = btree_map::Values<'a, TypeName, TypeDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
