//! # Typeweave Core
//!
//! Identity types shared by every Typeweave crate.
//!
//! This crate provides:
//! - Package references for generated and library packages
//! - Type names qualified by their package
//! - Deterministically ordered sets of type names
//! - The identifier service used to synthesize legal Rust identifiers

pub mod error;
pub mod identifiers;
pub mod names;

pub use error::{Error, Result};
pub use identifiers::{IdentifierFactory, IdentifierKind, RustIdentifierFactory};
pub use names::{
    ExternalPackageReference, LocalPackageReference, PackageReference, TypeName, TypeNameSet,
};
