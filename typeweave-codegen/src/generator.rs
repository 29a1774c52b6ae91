//! Rust source emission for one package of flattened definitions.

use crate::error::CodegenError;
use crate::graph::DependencyGraph;
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::BTreeSet;
use tracing::{debug, info};
use typeweave_core::PackageReference;
use typeweave_model::context::{ident, package_path};
use typeweave_model::{CodeGenerationContext, TypeDefinitionSet};

/// Options controlling emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    validate_syntax: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            validate_syntax: true,
        }
    }
}

impl GeneratorOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the emitted tokens as a Rust file before returning them.
    #[must_use]
    pub const fn validate_syntax(mut self, validate: bool) -> Self {
        self.validate_syntax = validate;
        self
    }

    /// Returns true if emitted code is parsed back.
    #[must_use]
    pub const fn is_validating_syntax(&self) -> bool {
        self.validate_syntax
    }
}

/// Main code generator for one package.
pub struct Generator<'a> {
    definitions: &'a TypeDefinitionSet,
    package: &'a PackageReference,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a generator for the definitions of `package`.
    ///
    /// # Arguments
    /// * `definitions` - Flattened definitions of every package
    /// * `package` - Package to emit
    #[must_use]
    pub fn new(definitions: &'a TypeDefinitionSet, package: &'a PackageReference) -> Self {
        Self {
            definitions,
            package,
            options: GeneratorOptions::default(),
        }
    }

    /// Replaces the emission options.
    #[must_use]
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Generates the package as a token stream.
    ///
    /// Definitions are emitted dependencies first. Other generated packages
    /// are imported under their alias; fields that close a reference cycle
    /// are boxed.
    ///
    /// # Errors
    /// Returns an error if the package owns no definitions or the output
    /// does not parse.
    pub fn generate(&self) -> Result<TokenStream, CodegenError> {
        if self.definitions.in_package(self.package).next().is_none() {
            return Err(CodegenError::generation(format!(
                "package {} has no definitions",
                self.package
            )));
        }

        let graph = DependencyGraph::new(self.definitions);
        let imported = self.imported_packages();

        let mut ctx = CodeGenerationContext::new(self.package.clone());
        let mut uses = Vec::with_capacity(imported.len());
        for package in imported {
            let Some(local) = package.as_local() else {
                continue;
            };
            let alias = local.alias();
            let path = package_path(&package);
            let alias_ident = ident(&alias);
            uses.push(quote!(use #path as #alias_ident;));
            ctx = ctx.with_import(package, alias);
        }

        let cycles = graph.cycles();
        let mut items = Vec::new();
        for name in graph.topological_order() {
            if !name.is_in(self.package) {
                continue;
            }
            let Some(definition) = self.definitions.get(&name) else {
                continue;
            };
            let indirect = cycles.get(&name).cloned().unwrap_or_default();
            if !indirect.is_empty() {
                debug!(type_name = %name, cycle = indirect.len(), "boxing recursive references");
            }
            let scoped = ctx.clone().with_indirection(indirect);
            items.extend(definition.as_declarations(&scoped));
        }

        let output = quote! {
            #(#uses)*
            #(#items)*
        };

        if self.options.validate_syntax {
            syn::parse2::<syn::File>(output.clone())
                .map_err(|e| CodegenError::invalid_syntax(self.package, e.to_string()))?;
        }

        info!(
            package = %self.package,
            items = items.len(),
            imports = uses.len(),
            "generated package"
        );
        Ok(output)
    }

    /// Generates the package as source text.
    ///
    /// # Errors
    /// See [`Generator::generate`].
    pub fn generate_string(&self) -> Result<String, CodegenError> {
        self.generate().map(|tokens| tokens.to_string())
    }

    /// Library crates the generated package depends on, by crate name.
    #[must_use]
    pub fn external_crates(&self) -> BTreeSet<String> {
        self.definitions
            .in_package(self.package)
            .flat_map(|definition| definition.required_imports())
            .filter_map(|package| {
                package
                    .as_external()
                    .map(|external| external.crate_name().to_string())
            })
            .collect()
    }

    /// Other generated packages referenced from this one.
    fn imported_packages(&self) -> BTreeSet<PackageReference> {
        self.definitions
            .in_package(self.package)
            .flat_map(|definition| definition.required_imports())
            .filter(|package| package.is_local() && package != self.package)
            .collect()
    }
}
