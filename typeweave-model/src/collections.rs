//! Arrays, maps and optional values.

use crate::context::{CodeGenerationContext, type_alias};
use crate::definition::TypeDefinition;
use crate::naming::{bind, child_hint, name_nested};
use crate::types::{Naming, PackageImportSet, Shape, Type};
use proc_macro2::TokenStream;
use quote::quote;
use typeweave_core::{IdentifierFactory, TypeName, TypeNameSet};

/// A sequence of one element type, rendered as `Vec<T>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayType {
    element: Box<Type>,
}

impl ArrayType {
    /// Creates an array of `element`.
    #[must_use]
    pub fn new(element: Type) -> Self {
        Self {
            element: Box::new(element),
        }
    }

    /// Returns the element type.
    #[must_use]
    pub fn element(&self) -> &Type {
        &self.element
    }

    pub(crate) fn rewrite_references(&self, rename: &dyn Fn(&TypeName) -> Option<TypeName>) -> Self {
        Self::new(self.element.rewrite_references(rename))
    }
}

impl Shape for ArrayType {
    fn required_imports(&self) -> PackageImportSet {
        self.element.required_imports()
    }

    fn references(&self) -> TypeNameSet {
        self.element.references()
    }

    fn as_type(&self, ctx: &CodeGenerationContext) -> TokenStream {
        let element = self.element.as_type(ctx);
        quote!(Vec<#element>)
    }

    fn as_declarations(
        &self,
        ctx: &CodeGenerationContext,
        name: &TypeName,
        description: Option<&str>,
    ) -> Vec<TokenStream> {
        vec![type_alias(name, description, self.as_type(ctx))]
    }

    fn create_named_definition(
        &self,
        name: &TypeName,
        ids: &dyn IdentifierFactory,
    ) -> Naming<TypeDefinition> {
        bind(name, self.name_internal_definitions(name, ids)?)
    }

    fn name_internal_definitions(
        &self,
        hint: &TypeName,
        ids: &dyn IdentifierFactory,
    ) -> Naming<Type> {
        let (element, definitions) = name_nested(&self.element, &child_hint(hint, "Item"), ids)?;
        Ok((Type::array(element), definitions))
    }
}

/// A mapping from keys to values, rendered as a `BTreeMap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapType {
    key: Box<Type>,
    value: Box<Type>,
}

impl MapType {
    /// Creates a map from `key` to `value`.
    #[must_use]
    pub fn new(key: Type, value: Type) -> Self {
        Self {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Returns the key type.
    #[must_use]
    pub fn key(&self) -> &Type {
        &self.key
    }

    /// Returns the value type.
    #[must_use]
    pub fn value(&self) -> &Type {
        &self.value
    }

    pub(crate) fn rewrite_references(&self, rename: &dyn Fn(&TypeName) -> Option<TypeName>) -> Self {
        Self::new(
            self.key.rewrite_references(rename),
            self.value.rewrite_references(rename),
        )
    }
}

impl Shape for MapType {
    fn required_imports(&self) -> PackageImportSet {
        let mut imports = self.key.required_imports();
        imports.extend(self.value.required_imports());
        imports
    }

    fn references(&self) -> TypeNameSet {
        let mut references = self.key.references();
        references.union(&self.value.references());
        references
    }

    fn as_type(&self, ctx: &CodeGenerationContext) -> TokenStream {
        let key = self.key.as_type(ctx);
        let value = self.value.as_type(ctx);
        quote!(::std::collections::BTreeMap<#key, #value>)
    }

    fn as_declarations(
        &self,
        ctx: &CodeGenerationContext,
        name: &TypeName,
        description: Option<&str>,
    ) -> Vec<TokenStream> {
        vec![type_alias(name, description, self.as_type(ctx))]
    }

    fn create_named_definition(
        &self,
        name: &TypeName,
        ids: &dyn IdentifierFactory,
    ) -> Naming<TypeDefinition> {
        bind(name, self.name_internal_definitions(name, ids)?)
    }

    fn name_internal_definitions(
        &self,
        hint: &TypeName,
        ids: &dyn IdentifierFactory,
    ) -> Naming<Type> {
        let (key, mut definitions) = name_nested(&self.key, &child_hint(hint, "Key"), ids)?;
        let (value, more) = name_nested(&self.value, &child_hint(hint, "Value"), ids)?;
        definitions.extend(more);
        Ok((Type::map(key, value), definitions))
    }
}

/// A value that may be absent, rendered as `Option<T>`.
///
/// Build through [`Type::optional`], which never nests one optional in
/// another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalType {
    element: Box<Type>,
}

impl OptionalType {
    pub(crate) fn new(element: Type) -> Self {
        Self {
            element: Box::new(element),
        }
    }

    /// Returns the wrapped type.
    #[must_use]
    pub fn element(&self) -> &Type {
        &self.element
    }
}

impl Shape for OptionalType {
    fn required_imports(&self) -> PackageImportSet {
        self.element.required_imports()
    }

    fn references(&self) -> TypeNameSet {
        self.element.references()
    }

    fn as_type(&self, ctx: &CodeGenerationContext) -> TokenStream {
        let element = self.element.as_type(ctx);
        quote!(Option<#element>)
    }

    fn as_declarations(
        &self,
        ctx: &CodeGenerationContext,
        name: &TypeName,
        description: Option<&str>,
    ) -> Vec<TokenStream> {
        vec![type_alias(name, description, self.as_type(ctx))]
    }

    fn create_named_definition(
        &self,
        name: &TypeName,
        ids: &dyn IdentifierFactory,
    ) -> Naming<TypeDefinition> {
        // Bound directly to a name, the optional is its own path segment.
        let (element, definitions) = name_nested(&self.element, &child_hint(name, "Value"), ids)?;
        bind(name, (Type::optional(element), definitions))
    }

    fn name_internal_definitions(
        &self,
        hint: &TypeName,
        ids: &dyn IdentifierFactory,
    ) -> Naming<Type> {
        let (element, definitions) = name_nested(&self.element, hint, ids)?;
        Ok((Type::optional(element), definitions))
    }
}
