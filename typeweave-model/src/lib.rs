//! # Typeweave Model
//!
//! Structural type model and naming engine.
//!
//! This crate provides:
//! - The closed [`Type`] variant set and the [`Shape`] contract every variant
//!   implements (imports, references, rendering, equality, naming)
//! - [`TypeDefinition`]s binding names to types, collected in a
//!   [`TypeDefinitionSet`]
//! - The [`NamingEngine`], which turns anonymous nested structure into named
//!   definitions
//! - Validation of flattened definition sets
//!
//! ## Pipeline
//!
//! ```text
//! schema parser ──> roots (anonymous nesting) ──> NamingEngine::flatten
//!                                                        │
//!                         flat TypeDefinitionSet <───────┘
//!                                  │
//!                      emission stage (as_type / as_declarations)
//! ```

pub mod collections;
pub mod context;
pub mod dedup;
pub mod definition;
pub mod enums;
pub mod error;
pub mod naming;
pub mod object;
pub mod one_of;
pub mod primitive;
pub mod reference;
pub mod resource;
pub mod types;
pub mod validated;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use collections::{ArrayType, MapType, OptionalType};
pub use context::CodeGenerationContext;
pub use definition::{TypeDefinition, TypeDefinitionSet};
pub use enums::{EnumType, EnumValue};
pub use error::{ModelError, NamingError};
pub use naming::{NamingEngine, NamingOptions};
pub use object::{ObjectType, PropertyDefinition, PropertySerialization};
pub use one_of::OneOfType;
pub use primitive::PrimitiveType;
pub use resource::ResourceType;
pub use types::{Naming, PackageImportSet, Shape, Type};
pub use validated::{ValidatedType, Validations};
