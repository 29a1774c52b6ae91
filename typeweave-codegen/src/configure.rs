//! Applies object model configuration to flattened definitions.

use crate::error::CodegenError;
use std::collections::BTreeMap;
use tracing::{debug, info};
use typeweave_config::{ObjectModelConfiguration, PayloadType, PropertyAccess};
use typeweave_core::{IdentifierFactory, IdentifierKind, TypeName};
use typeweave_model::{
    NamingError, PropertyDefinition, PropertySerialization, Type, TypeDefinition,
    TypeDefinitionSet,
};

/// Maps a payload type to the serialization behaviour of one property.
#[must_use]
pub const fn serialization_for(payload: PayloadType) -> PropertySerialization {
    PropertySerialization {
        omit_none: payload.omits_none(),
        omit_empty_collections: payload.omits_empty_collections(),
    }
}

/// Applies type and property overrides from `config`.
///
/// Property payload types, renames and descriptions are applied to object
/// properties; type descriptions and renames to definitions. Renamed types
/// are re-referenced everywhere.
///
/// # Errors
/// Returns an error if a configured name is not a usable identifier, if a
/// property rename clashes with another property, or if a type rename
/// clashes with another definition.
pub fn apply_configuration(
    definitions: TypeDefinitionSet,
    config: &ObjectModelConfiguration,
    ids: &dyn IdentifierFactory,
) -> Result<TypeDefinitionSet, CodegenError> {
    if config.is_empty() {
        return Ok(definitions);
    }

    let mut configured = Vec::with_capacity(definitions.len());
    for definition in definitions {
        configured.push(configure_definition(definition, config, ids)?);
    }

    let renames = type_renames(&configured, config, ids)?;
    let rename = |name: &TypeName| renames.get(name).cloned();

    let mut claimed: BTreeMap<TypeName, TypeName> = BTreeMap::new();
    let mut result = TypeDefinitionSet::new();
    for definition in configured {
        let origin = definition.name().clone();
        let name = rename(&origin).unwrap_or_else(|| origin.clone());
        if let Some(first) = claimed.insert(name.clone(), origin.clone()) {
            return Err(NamingError::collision(name, first.to_string(), origin.to_string()).into());
        }
        let ty = definition.ty().rewrite_references(&rename);
        result.replace(definition.with_name(name).with_type(ty));
    }

    info!(
        definitions = result.len(),
        renamed = renames.len(),
        "applied object model configuration"
    );
    Ok(result)
}

fn configure_definition(
    definition: TypeDefinition,
    config: &ObjectModelConfiguration,
    ids: &dyn IdentifierFactory,
) -> Result<TypeDefinition, CodegenError> {
    let owner = definition.name().clone();
    let definition = match config.type_descriptions().lookup(&owner) {
        Some(description) => {
            debug!(type_name = %owner, "overriding type description");
            definition.with_description(description)
        }
        None => definition,
    };

    let Type::Object(object) = definition.ty() else {
        return Ok(definition);
    };
    let object = object.try_map_properties(|property| configure_property(&owner, property, config, ids))?;
    Ok(definition.with_type(Type::Object(object)))
}

fn configure_property(
    owner: &TypeName,
    property: &PropertyDefinition,
    config: &ObjectModelConfiguration,
    ids: &dyn IdentifierFactory,
) -> Result<PropertyDefinition, CodegenError> {
    let mut configured = property.clone();

    if let Some(payload) = property_setting(config.payload_types(), owner, property) {
        debug!(type_name = %owner, property = property.name(), %payload, "applying payload type");
        configured = configured.with_serialization(serialization_for(payload));
    }
    if let Some(rename) = property_setting(config.property_renames(), owner, property) {
        let field = ids.create_identifier(&rename, IdentifierKind::Field)?;
        debug!(type_name = %owner, property = property.name(), field = %field, "renaming property");
        configured = configured.with_name(field);
    }
    if let Some(description) = property_setting(config.property_descriptions(), owner, property) {
        configured = configured.with_description(description);
    }

    Ok(configured)
}

/// Looks a property setting up by field name, then by wire name.
fn property_setting<T: Clone>(
    access: PropertyAccess<'_, T>,
    owner: &TypeName,
    property: &PropertyDefinition,
) -> Option<T> {
    access
        .lookup(owner, property.name())
        .or_else(|| access.lookup(owner, property.json_name()))
}

fn type_renames(
    definitions: &[TypeDefinition],
    config: &ObjectModelConfiguration,
    ids: &dyn IdentifierFactory,
) -> Result<BTreeMap<TypeName, TypeName>, CodegenError> {
    let access = config.type_renames();
    let mut renames = BTreeMap::new();
    for definition in definitions {
        let Some(rename) = access.lookup(definition.name()) else {
            continue;
        };
        let identifier = ids.create_identifier(&rename, IdentifierKind::Type)?;
        let renamed = definition.name().with_name(identifier);
        if &renamed != definition.name() {
            debug!(from = %definition.name(), to = %renamed, "renaming type");
            renames.insert(definition.name().clone(), renamed);
        }
    }
    Ok(renames)
}
