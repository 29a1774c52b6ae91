//! Untagged unions.

use crate::context::{CodeGenerationContext, doc_attributes, ident, unnamed};
use crate::definition::TypeDefinition;
use crate::naming::{bind, child_hint, name_nested};
use crate::object::field_type;
use crate::types::{Naming, PackageImportSet, Shape, Type};
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::BTreeSet;
use typeweave_core::{IdentifierFactory, PackageReference, TypeName, TypeNameSet};

/// A value that is exactly one of several alternatives.
///
/// Nested one-ofs are flattened and duplicate options dropped on
/// construction. Equality ignores option order.
#[derive(Debug, Clone)]
pub struct OneOfType {
    options: Vec<Type>,
}

impl OneOfType {
    /// Creates a one-of over `options`.
    #[must_use]
    pub fn new(options: impl IntoIterator<Item = Type>) -> Self {
        let mut flat: Vec<Type> = Vec::new();
        for option in options {
            match option {
                Type::OneOf(nested) => {
                    for inner in nested.options {
                        if !flat.contains(&inner) {
                            flat.push(inner);
                        }
                    }
                }
                other => {
                    if !flat.contains(&other) {
                        flat.push(other);
                    }
                }
            }
        }
        Self { options: flat }
    }

    /// Options in the order given.
    #[must_use]
    pub fn options(&self) -> &[Type] {
        &self.options
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns true if there are no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub(crate) fn rewrite_references(&self, rename: &dyn Fn(&TypeName) -> Option<TypeName>) -> Self {
        Self::new(
            self.options
                .iter()
                .map(|option| option.rewrite_references(rename)),
        )
    }

    /// Variant names, one per option, unique within this one-of.
    fn variant_names(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.options
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let label = variant_label(option);
                if seen.insert(label.clone()) {
                    label
                } else {
                    let numbered = format!("{label}{}", index + 1);
                    seen.insert(numbered.clone());
                    numbered
                }
            })
            .collect()
    }
}

fn variant_label(option: &Type) -> String {
    match option {
        Type::Primitive(primitive) => primitive.variant_name().to_string(),
        Type::Name(name) => name.name().to_string(),
        Type::Object(_) => "Object".to_string(),
        Type::Array(_) => "Array".to_string(),
        Type::Map(_) => "Map".to_string(),
        Type::Optional(_) => "Optional".to_string(),
        Type::Enum(_) => "Enum".to_string(),
        Type::Validated(_) => "Validated".to_string(),
        Type::OneOf(_) => "OneOf".to_string(),
        Type::Resource(_) => "Resource".to_string(),
    }
}

impl PartialEq for OneOfType {
    fn eq(&self, other: &Self) -> bool {
        self.options.len() == other.options.len()
            && self.options.iter().all(|option| other.options.contains(option))
    }
}

impl Eq for OneOfType {}

impl Shape for OneOfType {
    fn required_imports(&self) -> PackageImportSet {
        let mut imports: PackageImportSet = [PackageReference::external("serde")].into();
        for option in &self.options {
            imports.extend(option.required_imports());
        }
        imports
    }

    fn references(&self) -> TypeNameSet {
        let mut references = TypeNameSet::new();
        for option in &self.options {
            references.union(&option.references());
        }
        references
    }

    fn as_type(&self, _ctx: &CodeGenerationContext) -> TokenStream {
        unnamed("one-of")
    }

    fn as_declarations(
        &self,
        ctx: &CodeGenerationContext,
        name: &TypeName,
        description: Option<&str>,
    ) -> Vec<TokenStream> {
        let docs = doc_attributes(description);
        let name = ident(name.name());
        let variants = self
            .variant_names()
            .into_iter()
            .zip(&self.options)
            .map(|(variant, option)| {
                let variant = ident(&variant);
                let ty = field_type(option, ctx);
                quote!(#variant(#ty))
            });
        vec![quote! {
            #docs
            #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
            #[serde(untagged)]
            pub enum #name {
                #(#variants),*
            }
        }]
    }

    fn create_named_definition(
        &self,
        name: &TypeName,
        ids: &dyn IdentifierFactory,
    ) -> Naming<TypeDefinition> {
        bind(name, self.name_internal_definitions(name, ids)?)
    }

    fn name_internal_definitions(
        &self,
        hint: &TypeName,
        ids: &dyn IdentifierFactory,
    ) -> Naming<Type> {
        let mut definitions = Vec::new();
        let mut options = Vec::with_capacity(self.options.len());
        for (index, option) in self.options.iter().enumerate() {
            let segment = format!("Option{}", index + 1);
            let (named, more) = name_nested(option, &child_hint(hint, &segment), ids)?;
            definitions.extend(more);
            options.push(named);
        }
        Ok((Type::OneOf(Self::new(options)), definitions))
    }
}
