//! # Typeweave
//!
//! Structural type modeling, naming and Rust code generation.
//!
//! Schemas describe data with anonymous nesting: objects inside arrays inside
//! optional properties. Typeweave models those shapes as a closed set of
//! [`model::Type`] variants, flattens them into named definitions, applies
//! operator overrides and emits Rust source.
//!
//! ## Quick Start
//!
//! ```ignore
//! use typeweave::prelude::*;
//!
//! let ids = RustIdentifierFactory::new();
//! let package = PackageReference::local("Pkg", "v2020");
//! let source = generate_package(roots, &ObjectModelConfiguration::new(), &ids, &package)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Package references, type names, identifier service
//! - [`config`] - Object model configuration and access lenses
//! - [`model`] - Type variants, definitions, naming engine
//! - [`codegen`] - Configuration application and Rust emission

pub mod prelude;

/// Package references, type names and identifiers.
pub mod core {
    pub use typeweave_core::*;
}

/// Object model configuration.
pub mod config {
    pub use typeweave_config::*;
}

/// Type model and naming engine.
pub mod model {
    pub use typeweave_model::*;
}

/// Rust code generation.
pub mod codegen {
    pub use typeweave_codegen::*;
}

// Re-export commonly used items at the crate root
pub use typeweave_codegen::{CodegenError, Generator, generate_package};
pub use typeweave_config::ObjectModelConfiguration;
pub use typeweave_core::{PackageReference, RustIdentifierFactory, TypeName};
pub use typeweave_model::{NamingEngine, Type, TypeDefinition, TypeDefinitionSet};
