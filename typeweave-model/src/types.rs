//! The closed set of type variants and the contract they share.

use crate::collections::{ArrayType, MapType, OptionalType};
use crate::context::CodeGenerationContext;
use crate::definition::TypeDefinition;
use crate::enums::EnumType;
use crate::error::NamingError;
use crate::object::ObjectType;
use crate::one_of::OneOfType;
use crate::primitive::PrimitiveType;
use crate::resource::ResourceType;
use crate::validated::ValidatedType;
use proc_macro2::TokenStream;
use std::collections::BTreeSet;
use typeweave_core::{IdentifierFactory, PackageReference, TypeName, TypeNameSet};

/// Packages a rendered type needs in scope.
pub type PackageImportSet = BTreeSet<PackageReference>;

/// A value produced by naming, with the definitions created along the way.
pub type Naming<T> = Result<(T, Vec<TypeDefinition>), NamingError>;

/// Behaviour every type variant provides.
///
/// The trait has no default bodies. Every variant implements each method.
pub trait Shape {
    /// Packages that must be importable wherever this type is rendered.
    fn required_imports(&self) -> PackageImportSet;

    /// Named types this type refers to, directly or through nesting.
    fn references(&self) -> TypeNameSet;

    /// Renders this type where a type expression is expected.
    fn as_type(&self, ctx: &CodeGenerationContext) -> TokenStream;

    /// Renders the declarations that define `name` as this type.
    fn as_declarations(
        &self,
        ctx: &CodeGenerationContext,
        name: &TypeName,
        description: Option<&str>,
    ) -> Vec<TokenStream>;

    /// Binds this type to `name`, naming any anonymous nested types.
    ///
    /// # Errors
    /// Returns an error if a nested name cannot be synthesized, or if the
    /// result would be `name` aliasing itself.
    fn create_named_definition(
        &self,
        name: &TypeName,
        ids: &dyn IdentifierFactory,
    ) -> Naming<TypeDefinition>;

    /// Replaces every anonymous nested type that needs a name with a
    /// reference, using `hint` to derive the new names.
    ///
    /// Applying this to its own output creates no further definitions.
    ///
    /// # Errors
    /// Returns an error if the identifier service rejects a hint.
    fn name_internal_definitions(&self, hint: &TypeName, ids: &dyn IdentifierFactory)
    -> Naming<Type>;
}

/// A structural type.
///
/// Equality is structural and ignores documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Built-in scalar.
    Primitive(PrimitiveType),
    /// Record of named properties.
    Object(ObjectType),
    /// Sequence of one element type.
    Array(ArrayType),
    /// Key to value mapping.
    Map(MapType),
    /// Value that may be absent.
    Optional(OptionalType),
    /// Closed set of literal values.
    Enum(EnumType),
    /// Element type carrying validation rules.
    Validated(ValidatedType),
    /// Exactly one of several alternatives.
    OneOf(OneOfType),
    /// Spec and status pair of a top-level resource.
    Resource(ResourceType),
    /// Reference to a named type.
    Name(TypeName),
}

macro_rules! dispatch {
    ($value:expr, $inner:ident => $call:expr) => {
        match $value {
            Type::Primitive($inner) => $call,
            Type::Object($inner) => $call,
            Type::Array($inner) => $call,
            Type::Map($inner) => $call,
            Type::Optional($inner) => $call,
            Type::Enum($inner) => $call,
            Type::Validated($inner) => $call,
            Type::OneOf($inner) => $call,
            Type::Resource($inner) => $call,
            Type::Name($inner) => $call,
        }
    };
}

impl Type {
    /// Creates an array of `element`.
    #[must_use]
    pub fn array(element: Type) -> Self {
        Self::Array(ArrayType::new(element))
    }

    /// Creates a map from `key` to `value`.
    #[must_use]
    pub fn map(key: Type, value: Type) -> Self {
        Self::Map(MapType::new(key, value))
    }

    /// Creates an optional `element`; optional-of-optional collapses.
    #[must_use]
    pub fn optional(element: Type) -> Self {
        match element {
            Self::Optional(_) => element,
            other => Self::Optional(OptionalType::new(other)),
        }
    }

    /// Creates a reference to a named type.
    #[must_use]
    pub fn name(name: TypeName) -> Self {
        Self::Name(name)
    }

    /// Returns true for variants that must be named before they can be
    /// rendered as a type expression.
    #[must_use]
    pub const fn requires_name(&self) -> bool {
        matches!(
            self,
            Self::Object(_) | Self::Enum(_) | Self::OneOf(_) | Self::Resource(_) | Self::Validated(_)
        )
    }

    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Optional(_) => "optional",
            Self::Enum(_) => "enum",
            Self::Validated(_) => "validated",
            Self::OneOf(_) => "one-of",
            Self::Resource(_) => "resource",
            Self::Name(_) => "reference",
        }
    }

    /// Returns the referenced name if this is a [`Type::Name`].
    #[must_use]
    pub const fn as_name(&self) -> Option<&TypeName> {
        match self {
            Self::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Returns a copy with every reference passed through `rename`.
    ///
    /// References for which `rename` returns `None` are kept.
    #[must_use]
    pub fn rewrite_references(&self, rename: &dyn Fn(&TypeName) -> Option<TypeName>) -> Type {
        match self {
            Self::Primitive(primitive) => Self::Primitive(*primitive),
            Self::Object(object) => Self::Object(object.rewrite_references(rename)),
            Self::Array(array) => Self::Array(array.rewrite_references(rename)),
            Self::Map(map) => Self::Map(map.rewrite_references(rename)),
            Self::Optional(optional) => Self::optional(optional.element().rewrite_references(rename)),
            Self::Enum(enumeration) => Self::Enum(enumeration.clone()),
            Self::Validated(validated) => Self::Validated(validated.rewrite_references(rename)),
            Self::OneOf(one_of) => Self::OneOf(one_of.rewrite_references(rename)),
            Self::Resource(resource) => Self::Resource(resource.rewrite_references(rename)),
            Self::Name(name) => Self::Name(rename(name).unwrap_or_else(|| name.clone())),
        }
    }
}

impl Shape for Type {
    fn required_imports(&self) -> PackageImportSet {
        dispatch!(self, inner => inner.required_imports())
    }

    fn references(&self) -> TypeNameSet {
        dispatch!(self, inner => inner.references())
    }

    fn as_type(&self, ctx: &CodeGenerationContext) -> TokenStream {
        dispatch!(self, inner => inner.as_type(ctx))
    }

    fn as_declarations(
        &self,
        ctx: &CodeGenerationContext,
        name: &TypeName,
        description: Option<&str>,
    ) -> Vec<TokenStream> {
        dispatch!(self, inner => inner.as_declarations(ctx, name, description))
    }

    fn create_named_definition(
        &self,
        name: &TypeName,
        ids: &dyn IdentifierFactory,
    ) -> Naming<TypeDefinition> {
        dispatch!(self, inner => inner.create_named_definition(name, ids))
    }

    fn name_internal_definitions(
        &self,
        hint: &TypeName,
        ids: &dyn IdentifierFactory,
    ) -> Naming<Type> {
        dispatch!(self, inner => inner.name_internal_definitions(hint, ids))
    }
}

impl From<PrimitiveType> for Type {
    fn from(primitive: PrimitiveType) -> Self {
        Self::Primitive(primitive)
    }
}

impl From<ObjectType> for Type {
    fn from(object: ObjectType) -> Self {
        Self::Object(object)
    }
}

impl From<EnumType> for Type {
    fn from(enumeration: EnumType) -> Self {
        Self::Enum(enumeration)
    }
}

impl From<ValidatedType> for Type {
    fn from(validated: ValidatedType) -> Self {
        Self::Validated(validated)
    }
}

impl From<OneOfType> for Type {
    fn from(one_of: OneOfType) -> Self {
        Self::OneOf(one_of)
    }
}

impl From<ResourceType> for Type {
    fn from(resource: ResourceType) -> Self {
        Self::Resource(resource)
    }
}

impl From<TypeName> for Type {
    fn from(name: TypeName) -> Self {
        Self::Name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::PropertyDefinition;
    use crate::testing::{arb_type, person};
    use proptest::prelude::*;

    #[test]
    fn test_optional_collapses() {
        let once = Type::optional(PrimitiveType::String.into());
        let twice = Type::optional(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_requires_name() {
        assert!(Type::Object(ObjectType::new()).requires_name());
        assert!(!Type::array(PrimitiveType::Int32.into()).requires_name());
        assert!(!Type::Name(person()).requires_name());
    }

    #[test]
    fn test_equality_ignores_descriptions() {
        let plain = ObjectType::new().with_property(PropertyDefinition::new(
            "name",
            "name",
            PrimitiveType::String.into(),
        ));
        let documented = ObjectType::new().with_property(
            PropertyDefinition::new("name", "name", PrimitiveType::String.into())
                .with_description("The name."),
        );
        assert_eq!(Type::Object(plain), Type::Object(documented));
    }

    #[test]
    fn test_different_variants_are_never_equal() {
        let name = Type::Name(person());
        let array = Type::array(Type::Name(person()));
        let optional = Type::optional(Type::Name(person()));
        assert_ne!(name, array);
        assert_ne!(array, optional);
        assert_ne!(name, optional);
    }

    #[test]
    fn test_rewrite_references() {
        let ty = Type::map(
            PrimitiveType::String.into(),
            Type::array(Type::Name(person())),
        );
        let rewritten = ty.rewrite_references(&|name| {
            (name == &person()).then(|| name.with_name("Human"))
        });

        let references: Vec<_> = rewritten.references().into_iter().collect();
        assert_eq!(references, vec![person().with_name("Human")]);
    }

    proptest! {
        #[test]
        fn prop_equality_is_reflexive(ty in arb_type()) {
            prop_assert_eq!(&ty, &ty.clone());
        }

        #[test]
        fn prop_equality_is_symmetric(a in arb_type(), b in arb_type()) {
            prop_assert_eq!(a == b, b == a);
        }

        #[test]
        fn prop_equality_is_transitive(a in arb_type(), b in arb_type(), c in arb_type()) {
            if a == b && b == c {
                prop_assert_eq!(&a, &c);
            }
        }

        #[test]
        fn prop_equality_ignores_descriptions(ty in arb_type(), text in "[a-z ]{1,24}") {
            let plain = ObjectType::new()
                .with_property(PropertyDefinition::new("field", "field", ty.clone()));
            let documented = ObjectType::new().with_property(
                PropertyDefinition::new("field", "field", ty.clone()).with_description(text.clone()),
            );
            prop_assert_eq!(Type::Object(plain), Type::Object(documented));

            let bare = TypeDefinition::new(person(), ty.clone());
            prop_assert_eq!(bare.clone().with_description(text), bare);
        }

        #[test]
        fn prop_naming_is_idempotent(ty in arb_type()) {
            let ids = typeweave_core::RustIdentifierFactory::new();
            let hint = person().with_name("Root");
            let (named, _) = ty.name_internal_definitions(&hint, &ids).expect("first pass");
            let (again, extra) = named.name_internal_definitions(&hint, &ids).expect("second pass");
            prop_assert_eq!(named, again);
            prop_assert!(extra.is_empty());
        }

        #[test]
        fn prop_referenced_packages_are_required_imports(ty in arb_type()) {
            let ids = typeweave_core::RustIdentifierFactory::new();
            let (named, _) = ty
                .name_internal_definitions(&person().with_name("Root"), &ids)
                .expect("named");
            for reference in named.references() {
                prop_assert!(named.required_imports().contains(reference.package()));
            }
        }
    }
}
