//! Prelude module for convenient imports.
//!
//! ```ignore
//! use typeweave::prelude::*;
//! ```

// Core types
pub use typeweave_core::error::{Error as CoreError, Result as CoreResult};
pub use typeweave_core::{
    IdentifierFactory, IdentifierKind, PackageReference, RustIdentifierFactory, TypeName,
    TypeNameSet,
};

// Configuration
pub use typeweave_config::{
    ConfigError, ObjectModelConfiguration, PayloadType, PropertyAccess, TypeAccess,
};

// Model
pub use typeweave_model::{
    ArrayType, CodeGenerationContext, EnumType, EnumValue, MapType, ModelError, NamingEngine,
    NamingError, NamingOptions, ObjectType, OneOfType, OptionalType, PrimitiveType,
    PropertyDefinition, ResourceType, Shape, Type, TypeDefinition, TypeDefinitionSet,
    ValidatedType, Validations,
};

// Code generation
pub use typeweave_codegen::{
    CodegenError, DependencyGraph, Generator, GeneratorOptions, apply_configuration,
    generate_package,
};
