//! Top-level resources with a spec and an optional status.

use crate::context::{CodeGenerationContext, doc_attributes, ident, unnamed};
use crate::definition::TypeDefinition;
use crate::naming::{bind, child_hint, name_nested};
use crate::object::field_type;
use crate::types::{Naming, PackageImportSet, Shape, Type};
use proc_macro2::TokenStream;
use quote::quote;
use typeweave_core::{IdentifierFactory, PackageReference, TypeName, TypeNameSet};

/// A resource: the desired state (`spec`) and, optionally, the observed
/// state (`status`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceType {
    spec: Box<Type>,
    status: Option<Box<Type>>,
}

impl ResourceType {
    /// Creates a resource with no status.
    #[must_use]
    pub fn new(spec: Type) -> Self {
        Self {
            spec: Box::new(spec),
            status: None,
        }
    }

    /// Sets the status type.
    #[must_use]
    pub fn with_status(mut self, status: Type) -> Self {
        self.status = Some(Box::new(status));
        self
    }

    /// Spec type.
    #[must_use]
    pub fn spec(&self) -> &Type {
        &self.spec
    }

    /// Status type, if any.
    #[must_use]
    pub fn status(&self) -> Option<&Type> {
        self.status.as_deref()
    }

    pub(crate) fn rewrite_references(&self, rename: &dyn Fn(&TypeName) -> Option<TypeName>) -> Self {
        Self {
            spec: Box::new(self.spec.rewrite_references(rename)),
            status: self
                .status
                .as_ref()
                .map(|status| Box::new(status.rewrite_references(rename))),
        }
    }
}

impl Shape for ResourceType {
    fn required_imports(&self) -> PackageImportSet {
        let mut imports = self.spec.required_imports();
        if let Some(status) = &self.status {
            imports.extend(status.required_imports());
        }
        imports.insert(PackageReference::external("serde"));
        imports
    }

    fn references(&self) -> TypeNameSet {
        let mut references = self.spec.references();
        if let Some(status) = &self.status {
            references.union(&status.references());
        }
        references
    }

    fn as_type(&self, _ctx: &CodeGenerationContext) -> TokenStream {
        unnamed("resource")
    }

    fn as_declarations(
        &self,
        ctx: &CodeGenerationContext,
        name: &TypeName,
        description: Option<&str>,
    ) -> Vec<TokenStream> {
        let docs = doc_attributes(description);
        let name = ident(name.name());
        let spec = field_type(&self.spec, ctx);

        let Some(status) = &self.status else {
            return vec![
                quote! {
                    #docs
                    #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
                    pub struct #name {
                        pub spec: #spec
                    }
                },
                quote! {
                    impl #name {
                        /// Creates a resource with the given spec.
                        #[must_use]
                        pub fn new(spec: #spec) -> Self {
                            Self { spec }
                        }
                    }
                },
            ];
        };

        let status = field_type(status, ctx);
        vec![
            quote! {
                #docs
                #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
                pub struct #name {
                    pub spec: #spec,
                    #[serde(default, skip_serializing_if = "Option::is_none")]
                    pub status: Option<#status>
                }
            },
            quote! {
                impl #name {
                    /// Creates a resource with the given spec and no status.
                    #[must_use]
                    pub fn new(spec: #spec) -> Self {
                        Self { spec, status: None }
                    }
                }
            },
        ]
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
        let (spec, mut definitions) = name_nested(&self.spec, &child_hint(hint, "Spec"), ids)?;
        let mut resource = Self::new(spec);
        if let Some(status) = &self.status {
            let (status, more) = name_nested(status, &child_hint(hint, "Status"), ids)?;
            definitions.extend(more);
            resource = resource.with_status(status);
        }
        Ok((Type::Resource(resource), definitions))
    }
}
