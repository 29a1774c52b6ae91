//! Enumerations over literal values.

use crate::context::{CodeGenerationContext, doc_attributes, ident, unnamed};
use crate::definition::TypeDefinition;
use crate::error::ModelError;
use crate::primitive::PrimitiveType;
use crate::types::{Naming, PackageImportSet, Shape, Type};
use proc_macro2::{Literal, TokenStream};
use quote::quote;
use typeweave_core::{IdentifierFactory, IdentifierKind, PackageReference, TypeName, TypeNameSet};

/// One permitted value of an enum.
///
/// Equality ignores the description.
#[derive(Debug, Clone)]
pub struct EnumValue {
    identifier: String,
    value: String,
    description: Option<String>,
}

impl EnumValue {
    /// Creates a value rendered as variant `identifier` for `value`.
    #[must_use]
    pub fn new(identifier: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            value: value.into(),
            description: None,
        }
    }

    /// Creates a value whose variant name is derived from the literal.
    ///
    /// # Errors
    /// Returns an error if no variant name can be derived from `value`.
    pub fn from_literal(
        value: impl Into<String>,
        ids: &dyn IdentifierFactory,
    ) -> typeweave_core::Result<Self> {
        let value = value.into();
        let identifier = ids.create_identifier(&value, IdentifierKind::Variant)?;
        Ok(Self::new(identifier, value))
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Variant name.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Literal value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier && self.value == other.value
    }
}

impl Eq for EnumValue {}

/// A closed set of literal values over a string or integer base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    base: PrimitiveType,
    values: Vec<EnumValue>,
}

impl EnumType {
    /// Creates an enum, sorting values by identifier.
    ///
    /// # Errors
    /// Returns an error if the base cannot carry literals, if there are no
    /// values, if two values share an identifier, or if a literal does not
    /// parse as the base type.
    pub fn new(
        base: PrimitiveType,
        values: impl IntoIterator<Item = EnumValue>,
    ) -> Result<Self, ModelError> {
        if !(base.is_integer() || base == PrimitiveType::String) {
            return Err(ModelError::UnsupportedEnumBase { base });
        }

        let mut values: Vec<EnumValue> = values.into_iter().collect();
        if values.is_empty() {
            return Err(ModelError::EmptyEnum);
        }
        values.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        if let Some(pair) = values.windows(2).find(|pair| pair[0].identifier == pair[1].identifier) {
            return Err(ModelError::DuplicateEnumValue {
                identifier: pair[0].identifier.clone(),
            });
        }
        for value in &values {
            if parse_literal(base, &value.value).is_none() {
                return Err(ModelError::InvalidEnumLiteral {
                    value: value.value.clone(),
                    base,
                });
            }
        }

        Ok(Self { base, values })
    }

    /// Base type of the literals.
    #[must_use]
    pub const fn base(&self) -> PrimitiveType {
        self.base
    }

    /// Values in identifier order.
    #[must_use]
    pub fn values(&self) -> &[EnumValue] {
        &self.values
    }

    fn render_enum(&self, name: &TypeName, description: Option<&str>) -> TokenStream {
        let docs = doc_attributes(description);
        let name = ident(name.name());

        if self.base == PrimitiveType::String {
            let variants = self.values.iter().map(|value| {
                let docs = doc_attributes(value.description());
                let variant = ident(&value.identifier);
                let literal = &value.value;
                quote! {
                    #docs
                    #[serde(rename = #literal)]
                    #variant
                }
            });
            return quote! {
                #docs
                #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ::serde::Serialize, ::serde::Deserialize)]
                pub enum #name {
                    #(#variants),*
                }
            };
        }

        let repr = self.repr();
        let variants = self.values.iter().map(|value| {
            let docs = doc_attributes(value.description());
            let variant = ident(&value.identifier);
            let discriminant = parse_literal(self.base, &value.value)
                .map_or_else(TokenStream::new, |literal| quote!(= #literal));
            quote! {
                #docs
                #variant #discriminant
            }
        });
        let repr_name = repr.to_string();
        quote! {
            #docs
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ::serde::Serialize, ::serde::Deserialize)]
            #[serde(try_from = #repr_name, into = #repr_name)]
            #[repr(#repr)]
            pub enum #name {
                #(#variants),*
            }
        }
    }

    /// Conversions to and from the integer representation, used by serde.
    fn render_conversions(&self, name: &TypeName) -> TokenStream {
        let message = format!("invalid {} value: {{}}", name.name());
        let name = ident(name.name());
        let repr = self.repr();
        let arms = self.values.iter().filter_map(|value| {
            let variant = ident(&value.identifier);
            parse_literal(self.base, &value.value).map(|literal| quote!(#literal => Ok(Self::#variant)))
        });
        quote! {
            impl From<#name> for #repr {
                fn from(value: #name) -> Self {
                    value as #repr
                }
            }

            impl TryFrom<#repr> for #name {
                type Error = String;

                fn try_from(value: #repr) -> Result<Self, Self::Error> {
                    match value {
                        #(#arms,)*
                        other => Err(format!(#message, other)),
                    }
                }
            }
        }
    }

    fn repr(&self) -> proc_macro2::Ident {
        ident(match self.base {
            PrimitiveType::Int32 => "i32",
            PrimitiveType::UInt64 => "u64",
            _ => "i64",
        })
    }

    fn render_impl(&self, name: &TypeName) -> TokenStream {
        let name = ident(name.name());
        let count = self.values.len();
        let variants: Vec<_> = self.values.iter().map(|value| ident(&value.identifier)).collect();
        let literals = self.values.iter().map(|value| value.value.as_str());
        quote! {
            impl #name {
                /// Every value, in declaration order.
                pub const VALUES: [Self; #count] = [#(Self::#variants),*];

                /// Returns the literal this value stands for.
                #[must_use]
                pub const fn as_str(&self) -> &'static str {
                    match self {
                        #(Self::#variants => #literals),*
                    }
                }
            }
        }
    }
}

fn parse_literal(base: PrimitiveType, value: &str) -> Option<Literal> {
    match base {
        PrimitiveType::String => Some(Literal::string(value)),
        PrimitiveType::Int32 => value.parse::<i32>().ok().map(Literal::i32_unsuffixed),
        PrimitiveType::Int64 => value.parse::<i64>().ok().map(Literal::i64_unsuffixed),
        PrimitiveType::UInt64 => value.parse::<u64>().ok().map(Literal::u64_unsuffixed),
        PrimitiveType::Bool | PrimitiveType::Float64 | PrimitiveType::Json => None,
    }
}

impl Shape for EnumType {
    fn required_imports(&self) -> PackageImportSet {
        [PackageReference::external("serde")].into()
    }

    fn references(&self) -> TypeNameSet {
        TypeNameSet::new()
    }

    fn as_type(&self, _ctx: &CodeGenerationContext) -> TokenStream {
        unnamed("enum")
    }

    fn as_declarations(
        &self,
        _ctx: &CodeGenerationContext,
        name: &TypeName,
        description: Option<&str>,
    ) -> Vec<TokenStream> {
        let mut declarations = vec![self.render_enum(name, description), self.render_impl(name)];
        if self.base != PrimitiveType::String {
            declarations.push(self.render_conversions(name));
        }
        declarations
    }

    fn create_named_definition(
        &self,
        name: &TypeName,
        _ids: &dyn IdentifierFactory,
    ) -> Naming<TypeDefinition> {
        Ok((TypeDefinition::new(name.clone(), Type::Enum(self.clone())), Vec::new()))
    }

    fn name_internal_definitions(
        &self,
        _hint: &TypeName,
        _ids: &dyn IdentifierFactory,
    ) -> Naming<Type> {
        Ok((Type::Enum(self.clone()), Vec::new()))
    }
}
