//! # Typeweave Config
//!
//! Operator overrides for how specific types and properties are emitted.
//!
//! This crate provides:
//! - [`Configurable`] cells that are either unset or hold an explicit value
//! - Per-property and per-type configuration records
//! - The [`ObjectModelConfiguration`] store keyed by type name and property
//! - Generic [`PropertyAccess`] and [`TypeAccess`] lenses, so each new setting
//!   kind only supplies an extraction function
//!
//! The store is populated once, before generation, and only read afterwards.

pub mod access;
pub mod configurable;
pub mod error;
pub mod object_model;
pub mod payload;
pub mod property;
pub mod type_config;

pub use access::{PropertyAccess, PropertyAccessMut, TypeAccess, TypeAccessMut};
pub use configurable::Configurable;
pub use error::ConfigError;
pub use object_model::ObjectModelConfiguration;
pub use payload::PayloadType;
pub use property::PropertyConfiguration;
pub use type_config::TypeConfiguration;
