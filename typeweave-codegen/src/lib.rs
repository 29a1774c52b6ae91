//! # Typeweave Codegen
//!
//! Rust code generation from flattened type definitions.
//!
//! This crate provides:
//! - Application of [`ObjectModelConfiguration`] overrides to definitions
//! - A [`DependencyGraph`] that orders definitions and finds cycles
//! - The [`Generator`], which renders one package as Rust source

pub mod configure;
pub mod error;
pub mod generator;
pub mod graph;

pub use configure::{apply_configuration, serialization_for};
pub use error::CodegenError;
pub use generator::{Generator, GeneratorOptions};
pub use graph::DependencyGraph;

use typeweave_config::ObjectModelConfiguration;
use typeweave_core::{IdentifierFactory, PackageReference};
use typeweave_model::{NamingEngine, TypeDefinition};

/// Generates Rust code for one package from root definitions.
///
/// # Arguments
/// * `roots` - Root definitions, possibly with anonymous nesting
/// * `config` - Operator overrides
/// * `ids` - Identifier service used for synthesized and renamed names
/// * `package` - Package to emit
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if naming, configuration or generation fails.
pub fn generate_package(
    roots: impl IntoIterator<Item = TypeDefinition>,
    config: &ObjectModelConfiguration,
    ids: &dyn IdentifierFactory,
    package: &PackageReference,
) -> Result<String, CodegenError> {
    let flattened = NamingEngine::new(ids).flatten(roots)?;
    let configured = apply_configuration(flattened, config, ids)?;
    Generator::new(&configured, package).generate_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeweave_config::PayloadType;
    use typeweave_core::{RustIdentifierFactory, TypeName};
    use typeweave_model::{ObjectType, PrimitiveType, PropertyDefinition, Type};

    fn person() -> TypeName {
        TypeName::new(PackageReference::local("Pkg", "v2020"), "Person")
    }

    fn roots() -> Vec<TypeDefinition> {
        let address = ObjectType::new().with_property(PropertyDefinition::new(
            "city",
            "city",
            PrimitiveType::String.into(),
        ));
        let person_object = ObjectType::new()
            .with_property(PropertyDefinition::new(
                "address",
                "address",
                Type::optional(address.into()),
            ))
            .with_property(PropertyDefinition::new(
                "tags",
                "tags",
                Type::array(PrimitiveType::String.into()),
            ));
        vec![TypeDefinition::new(person(), person_object.into())]
    }

    #[test]
    fn test_generate_package_names_nested_objects() {
        let ids = RustIdentifierFactory::new();
        let source = generate_package(
            roots(),
            &ObjectModelConfiguration::new(),
            &ids,
            person().package(),
        )
        .expect("generate");

        let file: syn::File = syn::parse_str(&source).expect("parse");
        let structs: Vec<String> = file
            .items
            .iter()
            .filter_map(|item| match item {
                syn::Item::Struct(item) => Some(item.ident.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(structs, vec!["PersonAddress", "Person"]);
    }

    #[test]
    fn test_generate_package_applies_configuration() {
        let ids = RustIdentifierFactory::new();
        let mut config = ObjectModelConfiguration::new();
        config
            .payload_types_mut()
            .set(&person(), "tags", PayloadType::ExplicitCollections)
            .expect("set");

        let source = generate_package(roots(), &config, &ids, person().package())
            .expect("generate");
        assert!(!source.contains("Vec::is_empty"));
    }
}
