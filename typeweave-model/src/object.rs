//! Object types and their properties.

use crate::context::{CodeGenerationContext, doc_attributes, ident, unnamed};
use crate::definition::TypeDefinition;
use crate::error::ModelError;
use crate::naming::{bind, child_hint, name_nested};
use crate::types::{Naming, PackageImportSet, Shape, Type};
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::BTreeMap;
use typeweave_core::{IdentifierFactory, PackageReference, TypeName, TypeNameSet};

/// How a property is written when serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertySerialization {
    /// Skip the property when an optional value is absent.
    pub omit_none: bool,
    /// Skip the property when a collection value is empty.
    pub omit_empty_collections: bool,
}

impl PropertySerialization {
    /// Always write the property.
    pub const EXPLICIT: Self = Self {
        omit_none: false,
        omit_empty_collections: false,
    };
}

impl Default for PropertySerialization {
    fn default() -> Self {
        Self {
            omit_none: true,
            omit_empty_collections: true,
        }
    }
}

/// A named, typed member of an object.
///
/// Equality ignores the description.
#[derive(Debug, Clone)]
pub struct PropertyDefinition {
    name: String,
    json_name: String,
    property_type: Type,
    description: Option<String>,
    serialization: PropertySerialization,
}

impl PropertyDefinition {
    /// Creates a property serialized under `json_name`.
    #[must_use]
    pub fn new(name: impl Into<String>, json_name: impl Into<String>, property_type: Type) -> Self {
        Self {
            name: name.into(),
            json_name: json_name.into(),
            property_type,
            description: None,
            serialization: PropertySerialization::default(),
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

    /// Sets the serialization behaviour.
    #[must_use]
    pub const fn with_serialization(mut self, serialization: PropertySerialization) -> Self {
        self.serialization = serialization;
        self
    }

    /// Returns a copy with a different type.
    #[must_use]
    pub fn with_type(&self, property_type: Type) -> Self {
        Self {
            property_type,
            ..self.clone()
        }
    }

    /// Returns a copy with a different field name; the JSON name is kept.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Makes the property optional.
    #[must_use]
    pub fn make_optional(self) -> Self {
        let property_type = Type::optional(self.property_type.clone());
        Self {
            property_type,
            ..self
        }
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name on the wire.
    #[must_use]
    pub fn json_name(&self) -> &str {
        &self.json_name
    }

    /// Property type.
    #[must_use]
    pub const fn property_type(&self) -> &Type {
        &self.property_type
    }

    /// Description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Serialization behaviour.
    #[must_use]
    pub const fn serialization(&self) -> PropertySerialization {
        self.serialization
    }

    fn render(&self, ctx: &CodeGenerationContext) -> TokenStream {
        let docs = doc_attributes(self.description.as_deref());
        let field = ident(&self.name);
        let ty = field_type(&self.property_type, ctx);

        let mut serde = Vec::new();
        if self.json_name != self.name {
            let json_name = &self.json_name;
            serde.push(quote!(rename = #json_name));
        }
        match &self.property_type {
            Type::Optional(_) => {
                serde.push(quote!(default));
                if self.serialization.omit_none {
                    serde.push(quote!(skip_serializing_if = "Option::is_none"));
                }
            }
            Type::Array(_) => {
                serde.push(quote!(default));
                if self.serialization.omit_empty_collections {
                    serde.push(quote!(skip_serializing_if = "Vec::is_empty"));
                }
            }
            Type::Map(_) => {
                serde.push(quote!(default));
                if self.serialization.omit_empty_collections {
                    serde.push(quote!(
                        skip_serializing_if = "::std::collections::BTreeMap::is_empty"
                    ));
                }
            }
            _ => {}
        }
        let serde = if serde.is_empty() {
            TokenStream::new()
        } else {
            quote!(#[serde(#(#serde),*)])
        };

        quote! {
            #docs
            #serde
            pub #field: #ty
        }
    }
}

impl PartialEq for PropertyDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.json_name == other.json_name
            && self.property_type == other.property_type
            && self.serialization == other.serialization
    }
}

impl Eq for PropertyDefinition {}

/// Renders `ty` in field position, boxing references that need indirection.
pub(crate) fn field_type(ty: &Type, ctx: &CodeGenerationContext) -> TokenStream {
    match ty {
        Type::Name(name) if ctx.needs_indirection(name) => {
            let inner = ctx.type_reference(name);
            quote!(Box<#inner>)
        }
        Type::Optional(optional) => match optional.element() {
            Type::Name(name) if ctx.needs_indirection(name) => {
                let inner = ctx.type_reference(name);
                quote!(Option<Box<#inner>>)
            }
            _ => ty.as_type(ctx),
        },
        _ => ty.as_type(ctx),
    }
}

/// A record of named properties, kept in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectType {
    properties: BTreeMap<String, PropertyDefinition>,
}

impl ObjectType {
    /// Creates an object with no properties.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an object, rejecting duplicate property names.
    ///
    /// # Errors
    /// Returns [`ModelError::DuplicateProperty`] if two properties share a name.
    pub fn try_from_properties(
        properties: impl IntoIterator<Item = PropertyDefinition>,
    ) -> Result<Self, ModelError> {
        let mut object = Self::new();
        for property in properties {
            if object.properties.contains_key(property.name()) {
                return Err(ModelError::DuplicateProperty {
                    name: property.name().to_string(),
                });
            }
            object.properties.insert(property.name().to_string(), property);
        }
        Ok(object)
    }

    /// Adds or replaces a property.
    #[must_use]
    pub fn with_property(mut self, property: PropertyDefinition) -> Self {
        self.properties.insert(property.name().to_string(), property);
        self
    }

    /// Returns a copy with `map` applied to every property.
    ///
    /// # Errors
    /// Returns the first error from `map`, or a duplicate property error if
    /// two mapped properties end up with the same name.
    pub fn try_map_properties<E>(
        &self,
        mut map: impl FnMut(&PropertyDefinition) -> Result<PropertyDefinition, E>,
    ) -> Result<Self, E>
    where
        E: From<ModelError>,
    {
        let mut mapped = Vec::with_capacity(self.properties.len());
        for property in self.properties.values() {
            mapped.push(map(property)?);
        }
        Ok(Self::try_from_properties(mapped)?)
    }

    /// Iterates the properties in name order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDefinition> {
        self.properties.values()
    }

    /// Finds a property by field name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.get(name)
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if the object has no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub(crate) fn rewrite_references(&self, rename: &dyn Fn(&TypeName) -> Option<TypeName>) -> Self {
        let properties = self
            .properties
            .iter()
            .map(|(name, property)| {
                let rewritten = property.property_type.rewrite_references(rename);
                (name.clone(), property.with_type(rewritten))
            })
            .collect();
        Self { properties }
    }
}

impl Shape for ObjectType {
    fn required_imports(&self) -> PackageImportSet {
        let mut imports: PackageImportSet = [PackageReference::external("serde")].into();
        for property in self.properties.values() {
            imports.extend(property.property_type.required_imports());
        }
        imports
    }

    fn references(&self) -> TypeNameSet {
        let mut references = TypeNameSet::new();
        for property in self.properties.values() {
            references.union(&property.property_type.references());
        }
        references
    }

    fn as_type(&self, _ctx: &CodeGenerationContext) -> TokenStream {
        unnamed("object")
    }

    fn as_declarations(
        &self,
        ctx: &CodeGenerationContext,
        name: &TypeName,
        description: Option<&str>,
    ) -> Vec<TokenStream> {
        let docs = doc_attributes(description);
        let name = ident(name.name());
        let fields = self.properties.values().map(|property| property.render(ctx));
        vec![quote! {
            #docs
            #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
            pub struct #name {
                #(#fields),*
            }
        }]
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
        let mut definitions = Vec::new();
        let mut properties = BTreeMap::new();
        for (key, property) in &self.properties {
            let (ty, more) = name_nested(
                &property.property_type,
                &child_hint(hint, property.name()),
                ids,
            )?;
            definitions.extend(more);
            properties.insert(key.clone(), property.with_type(ty));
        }
        Ok((Type::Object(Self { properties }), definitions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::PrimitiveType;
    use crate::testing::{context, person};
    use typeweave_core::RustIdentifierFactory;

    fn string() -> Type {
        PrimitiveType::String.into()
    }

    #[test]
    fn test_try_from_properties_rejects_duplicates() {
        let err = ObjectType::try_from_properties([
            PropertyDefinition::new("name", "name", string()),
            PropertyDefinition::new("name", "fullName", string()),
        ])
        .expect_err("duplicate");
        assert_eq!(
            err,
            ModelError::DuplicateProperty {
                name: "name".to_string()
            }
        );
    }

    #[test]
    fn test_properties_are_ordered() {
        let object = ObjectType::new()
            .with_property(PropertyDefinition::new("zip", "zip", string()))
            .with_property(PropertyDefinition::new("city", "city", string()));
        let names: Vec<_> = object.properties().map(PropertyDefinition::name).collect();
        assert_eq!(names, vec!["city", "zip"]);
    }

    #[test]
    fn test_equality_depends_on_property_set() {
        let a = ObjectType::new().with_property(PropertyDefinition::new("a", "a", string()));
        let b = ObjectType::new().with_property(PropertyDefinition::new("b", "b", string()));
        let a_renamed_on_wire =
            ObjectType::new().with_property(PropertyDefinition::new("a", "A", string()));
        assert_ne!(a, b);
        assert_ne!(a, a_renamed_on_wire);
    }

    #[test]
    fn test_object_as_type_is_compile_error() {
        let tokens = ObjectType::new().as_type(&context()).to_string();
        assert!(tokens.starts_with("compile_error"));
    }

    #[test]
    fn test_declaration() {
        let object = ObjectType::new()
            .with_property(
                PropertyDefinition::new("full_name", "fullName", string())
                    .with_description("Display name."),
            )
            .with_property(PropertyDefinition::new(
                "nicknames",
                "nicknames",
                Type::array(string()),
            ))
            .with_property(PropertyDefinition::new(
                "age",
                "age",
                Type::optional(PrimitiveType::Int32.into()),
            ));

        let declarations = object.as_declarations(&context(), &person(), Some("A person."));
        assert_eq!(declarations.len(), 1);
        assert_eq!(
            declarations[0].to_string(),
            quote! {
                #[doc = " A person."]
                #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
                pub struct Person {
                    #[serde(default, skip_serializing_if = "Option::is_none")]
                    pub age: Option<i32>,
                    #[doc = " Display name."]
                    #[serde(rename = "fullName")]
                    pub full_name: String,
                    #[serde(default, skip_serializing_if = "Vec::is_empty")]
                    pub nicknames: Vec<String>
                }
            }
            .to_string()
        );
    }

    #[test]
    fn test_explicit_serialization_keeps_fields() {
        let object = ObjectType::new().with_property(
            PropertyDefinition::new("tags", "tags", Type::array(string()))
                .with_serialization(PropertySerialization::EXPLICIT),
        );
        let rendered = object.as_declarations(&context(), &person(), None)[0].to_string();
        assert!(rendered.contains("default"));
        assert!(!rendered.contains("skip_serializing_if"));
    }

    #[test]
    fn test_recursive_field_is_boxed() {
        let node = person().with_name("Node");
        let object = ObjectType::new()
            .with_property(PropertyDefinition::new(
                "next",
                "next",
                Type::optional(Type::Name(node.clone())),
            ))
            .with_property(PropertyDefinition::new("child", "child", Type::Name(node.clone())));
        let ctx = context().with_indirection(std::iter::once(node.clone()).collect());

        let rendered = object.as_declarations(&ctx, &node, None)[0].to_string();
        assert!(rendered.contains(&quote!(pub child: Box<Node>).to_string()));
        assert!(rendered.contains(&quote!(pub next: Option<Box<Node>>).to_string()));
    }

    #[test]
    fn test_required_imports_include_serde_and_nested() {
        let object = ObjectType::new().with_property(PropertyDefinition::new(
            "data",
            "data",
            PrimitiveType::Json.into(),
        ));
        let imports = object.required_imports();
        assert!(imports.contains(&PackageReference::external("serde")));
        assert!(imports.contains(&PackageReference::external("serde_json")));
    }

    #[test]
    fn test_name_internal_definitions_uses_property_hints() {
        let ids = RustIdentifierFactory::new();
        let address = ObjectType::new().with_property(PropertyDefinition::new("city", "city", string()));
        let object = ObjectType::new().with_property(PropertyDefinition::new(
            "home_address",
            "homeAddress",
            address.clone().into(),
        ));

        let (ty, definitions) = object
            .name_internal_definitions(&person(), &ids)
            .expect("named");

        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].name(), &person().with_name("PersonHomeAddress"));
        assert_eq!(definitions[0].ty(), &Type::Object(address));
        assert_eq!(
            ty.references().into_iter().collect::<Vec<_>>(),
            vec![person().with_name("PersonHomeAddress")]
        );
    }

    #[test]
    fn test_make_optional() {
        let property = PropertyDefinition::new("age", "age", PrimitiveType::Int32.into()).make_optional();
        assert_eq!(
            property.property_type(),
            &Type::optional(PrimitiveType::Int32.into())
        );
        let again = property.clone().make_optional();
        assert_eq!(again, property);
    }

    #[test]
    fn test_try_map_properties_detects_rename_collision() {
        let object = ObjectType::new()
            .with_property(PropertyDefinition::new("a", "a", string()))
            .with_property(PropertyDefinition::new("b", "b", string()));
        let result: Result<ObjectType, ModelError> =
            object.try_map_properties(|property| Ok(property.with_name("same")));
        assert!(matches!(result, Err(ModelError::DuplicateProperty { .. })));
    }
}
