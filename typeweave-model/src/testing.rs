//! Shared fixtures for unit tests.

use crate::context::CodeGenerationContext;
use crate::enums::{EnumType, EnumValue};
use crate::object::{ObjectType, PropertyDefinition};
use crate::one_of::OneOfType;
use crate::primitive::PrimitiveType;
use crate::resource::ResourceType;
use crate::types::Type;
use crate::validated::{ValidatedType, Validations};
use proptest::prelude::*;
use typeweave_core::{IdentifierFactory, IdentifierKind, PackageReference, TypeName};

pub(crate) fn pkg() -> PackageReference {
    PackageReference::local("Pkg", "v2020")
}

pub(crate) fn person() -> TypeName {
    TypeName::new(pkg(), "Person")
}

pub(crate) fn context() -> CodeGenerationContext {
    CodeGenerationContext::new(pkg())
}

/// Deterministic identifier service that keeps only ASCII alphanumerics.
pub(crate) struct ConcatIdentifierFactory;

impl IdentifierFactory for ConcatIdentifierFactory {
    fn create_identifier(&self, raw: &str, kind: IdentifierKind) -> typeweave_core::Result<String> {
        let joined: String = raw.chars().filter(char::is_ascii_alphanumeric).collect();
        if joined.is_empty() {
            return Err(typeweave_core::Error::unusable_identifier(
                raw,
                kind,
                "no alphanumeric characters",
            ));
        }
        Ok(joined)
    }
}

fn sample_enum() -> EnumType {
    EnumType::new(
        PrimitiveType::String,
        [EnumValue::new("On", "on"), EnumValue::new("Off", "off")],
    )
    .expect("valid enum")
}

fn arb_leaf() -> impl Strategy<Value = Type> {
    prop_oneof![
        prop::sample::select(vec![
            PrimitiveType::Bool,
            PrimitiveType::Int32,
            PrimitiveType::Int64,
            PrimitiveType::UInt64,
            PrimitiveType::Float64,
            PrimitiveType::String,
            PrimitiveType::Json,
        ])
        .prop_map(Type::Primitive),
        prop::sample::select(vec!["Alpha", "Beta", "Gamma"])
            .prop_map(|name| Type::Name(person().with_name(name))),
        Just(Type::Enum(sample_enum())),
    ]
}

/// Arbitrary types up to a small depth, covering every variant.
pub(crate) fn arb_type() -> impl Strategy<Value = Type> {
    arb_leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(Type::array),
            inner
                .clone()
                .prop_map(|value| Type::map(PrimitiveType::String.into(), value)),
            inner.clone().prop_map(Type::optional),
            prop::collection::vec(
                (
                    prop::sample::select(vec!["id", "name", "items", "next"]),
                    inner.clone()
                ),
                1..4
            )
            .prop_map(|fields| {
                let object = fields.into_iter().fold(ObjectType::new(), |object, (field, ty)| {
                    object.with_property(PropertyDefinition::new(field, field, ty))
                });
                Type::Object(object)
            }),
            prop::collection::vec(inner.clone(), 1..4)
                .prop_map(|options| Type::OneOf(OneOfType::new(options))),
            (inner.clone(), any::<bool>()).prop_map(|(element, strict)| {
                let validations = if strict {
                    Validations::new().with_length(Some(1), None)
                } else {
                    Validations::new()
                };
                Type::Validated(ValidatedType::new(element, validations))
            }),
            (inner.clone(), prop::option::of(inner)).prop_map(|(spec, status)| {
                let resource = ResourceType::new(spec);
                Type::Resource(match status {
                    Some(status) => resource.with_status(status),
                    None => resource,
                })
            }),
        ]
    })
}
