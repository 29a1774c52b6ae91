//! Built-in scalar types.

use crate::context::{CodeGenerationContext, type_alias};
use crate::definition::TypeDefinition;
use crate::types::{Naming, PackageImportSet, Shape, Type};
use proc_macro2::TokenStream;
use quote::quote;
use std::fmt;
use typeweave_core::{IdentifierFactory, PackageReference, TypeName, TypeNameSet};

/// A built-in scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimitiveType {
    /// `bool`.
    Bool,
    /// `i32`.
    Int32,
    /// `i64`.
    Int64,
    /// `u64`.
    UInt64,
    /// `f64`.
    Float64,
    /// `String`.
    String,
    /// Arbitrary JSON, rendered as `serde_json::Value`.
    Json,
}

impl PrimitiveType {
    /// Schema-level name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt64 => "uint64",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Json => "json",
        }
    }

    /// Name used when the primitive labels a variant.
    #[must_use]
    pub const fn variant_name(&self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Float64 => "Float64",
            Self::String => "String",
            Self::Json => "Json",
        }
    }

    /// Returns true for the integer types.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Int32 | Self::Int64 | Self::UInt64)
    }

    /// Returns true for integer and floating point types.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, Self::Float64)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Shape for PrimitiveType {
    fn required_imports(&self) -> PackageImportSet {
        match self {
            Self::Json => [PackageReference::external("serde_json")].into(),
            _ => PackageImportSet::new(),
        }
    }

    fn references(&self) -> TypeNameSet {
        TypeNameSet::new()
    }

    fn as_type(&self, _ctx: &CodeGenerationContext) -> TokenStream {
        match self {
            Self::Bool => quote!(bool),
            Self::Int32 => quote!(i32),
            Self::Int64 => quote!(i64),
            Self::UInt64 => quote!(u64),
            Self::Float64 => quote!(f64),
            Self::String => quote!(String),
            Self::Json => quote!(::serde_json::Value),
        }
    }

    fn as_declarations(
        &self,
        ctx: &CodeGenerationContext,
        name: &TypeName,
        description: Option<&str>,
    ) -> Vec<TokenStream> {
        vec![type_alias(name, description, self.as_type(ctx))]
    }

    fn create_named_definition(
        &self,
        name: &TypeName,
        _ids: &dyn IdentifierFactory,
    ) -> Naming<TypeDefinition> {
        Ok((TypeDefinition::new(name.clone(), Type::Primitive(*self)), Vec::new()))
    }

    fn name_internal_definitions(
        &self,
        _hint: &TypeName,
        _ids: &dyn IdentifierFactory,
    ) -> Naming<Type> {
        Ok((Type::Primitive(*self), Vec::new()))
    }
}
