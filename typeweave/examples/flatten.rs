//! Flattens a nested resource schema and prints the generated Rust code.
//!
//! Run with: `RUST_LOG=debug cargo run --example flatten`

use typeweave::prelude::*;

fn storage_account(package: &PackageReference) -> Result<TypeDefinition, Box<dyn std::error::Error>> {
    let tier = EnumType::new(
        PrimitiveType::String,
        [
            EnumValue::new("Hot", "Hot").with_description("Frequently accessed data."),
            EnumValue::new("Cool", "Cool").with_description("Infrequently accessed data."),
        ],
    )?;

    let rule = ObjectType::new()
        .with_property(PropertyDefinition::new(
            "address",
            "ipAddress",
            ValidatedType::new(
                PrimitiveType::String.into(),
                Validations::new().with_pattern(r"^\d+\.\d+\.\d+\.\d+$"),
            )
            .into(),
        ))
        .with_property(PropertyDefinition::new(
            "action",
            "action",
            Type::optional(PrimitiveType::String.into()),
        ));

    let spec = ObjectType::new()
        .with_property(PropertyDefinition::new("tier", "accessTier", tier.into()))
        .with_property(PropertyDefinition::new(
            "rules",
            "networkRules",
            Type::array(rule.into()),
        ))
        .with_property(PropertyDefinition::new(
            "tags",
            "tags",
            Type::map(PrimitiveType::String.into(), PrimitiveType::String.into()),
        ));

    let status = ObjectType::new().with_property(PropertyDefinition::new(
        "endpoint",
        "primaryEndpoint",
        OneOfType::new([PrimitiveType::String.into(), PrimitiveType::Json.into()]).into(),
    ));

    Ok(TypeDefinition::new(
        TypeName::new(package.clone(), "StorageAccount"),
        ResourceType::new(spec.into()).with_status(status.into()).into(),
    )
    .with_description("A storage account resource."))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let ids = RustIdentifierFactory::new();
    let package = PackageReference::local("Storage", "v2021");
    let root = storage_account(&package)?;

    let flattened = NamingEngine::new(&ids).flatten([root.clone()])?;
    println!("Flattened {} definitions:", flattened.len());
    for definition in &flattened {
        println!("  {} ({})", definition.name(), definition.ty().kind());
    }

    let spec = TypeName::new(package.clone(), "StorageAccountSpec");
    let mut config = ObjectModelConfiguration::new();
    config
        .payload_types_mut()
        .set(&spec, "tags", PayloadType::ExplicitCollections)?;
    config
        .type_renames_mut()
        .set(&spec.with_name("StorageAccountSpecRulesItem"), "NetworkRule".to_string())?;

    let source = generate_package([root], &config, &ids, &package)?;
    println!();
    println!("{source}");
    Ok(())
}
