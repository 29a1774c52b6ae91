//! Rendering context shared by every type during emission.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote};
use std::collections::BTreeMap;
use typeweave_core::identifiers::is_keyword;
use typeweave_core::{PackageReference, TypeName, TypeNameSet};

/// Describes the package being generated and how other packages are reached
/// from it.
#[derive(Debug, Clone)]
pub struct CodeGenerationContext {
    package: PackageReference,
    imports: BTreeMap<PackageReference, String>,
    indirect: TypeNameSet,
}

impl CodeGenerationContext {
    /// Creates a context for emitting into `package`.
    #[must_use]
    pub fn new(package: PackageReference) -> Self {
        Self {
            package,
            imports: BTreeMap::new(),
            indirect: TypeNameSet::new(),
        }
    }

    /// Makes `package` reachable through `alias`.
    #[must_use]
    pub fn with_import(mut self, package: PackageReference, alias: impl Into<String>) -> Self {
        self.imports.insert(package, alias.into());
        self
    }

    /// Marks types that must be boxed where they appear as fields.
    #[must_use]
    pub fn with_indirection(mut self, names: TypeNameSet) -> Self {
        self.indirect = names;
        self
    }

    /// Returns the package being generated.
    #[must_use]
    pub const fn package(&self) -> &PackageReference {
        &self.package
    }

    /// Returns the alias under which `package` is imported, if any.
    #[must_use]
    pub fn import_alias(&self, package: &PackageReference) -> Option<&str> {
        self.imports.get(package).map(String::as_str)
    }

    /// Iterates the imported packages and their aliases in package order.
    pub fn imports(&self) -> impl Iterator<Item = (&PackageReference, &str)> {
        self.imports
            .iter()
            .map(|(package, alias)| (package, alias.as_str()))
    }

    /// Returns true if fields of type `name` must be boxed.
    #[must_use]
    pub fn needs_indirection(&self, name: &TypeName) -> bool {
        self.indirect.contains(name)
    }

    /// Renders a path to the named type as seen from the current package.
    #[must_use]
    pub fn type_reference(&self, name: &TypeName) -> TokenStream {
        let item = ident(name.name());
        if name.is_in(&self.package) {
            return quote!(#item);
        }
        if let Some(alias) = self.import_alias(name.package()) {
            let alias = ident(alias);
            return quote!(#alias::#item);
        }
        let path = package_path(name.package());
        quote!(#path::#item)
    }
}

/// Renders the absolute module path of a package.
#[must_use]
pub fn package_path(package: &PackageReference) -> TokenStream {
    match package {
        PackageReference::Local(local) => {
            let segments = local.module_segments();
            let segments = segments.iter().map(|segment| ident(segment));
            quote!(crate #(::#segments)*)
        }
        PackageReference::External(external) => {
            let segments = external.segments().map(ident);
            quote!(#(::#segments)*)
        }
    }
}

/// Converts text into an identifier token without panicking.
///
/// Keywords become raw identifiers where Rust allows it; anything else that
/// is not a legal identifier is cleaned up character by character.
#[must_use]
pub fn ident(name: &str) -> Ident {
    if !name.starts_with("r#") && syn::parse_str::<Ident>(name).is_ok() {
        return Ident::new(name, Span::call_site());
    }
    if is_keyword(name) {
        return match name {
            "crate" | "self" | "Self" | "super" => format_ident!("{}_", name),
            _ => Ident::new_raw(name, Span::call_site()),
        };
    }

    let mut cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        cleaned.insert(0, '_');
    }
    if cleaned.chars().all(|c| c == '_') {
        cleaned = "__".to_string();
    }
    if is_keyword(&cleaned) {
        cleaned.push('_');
    }
    Ident::new(&cleaned, Span::call_site())
}

/// Renders a description as `#[doc]` attributes, one per line.
#[must_use]
pub fn doc_attributes(description: Option<&str>) -> TokenStream {
    let lines = description
        .into_iter()
        .flat_map(str::lines)
        .map(|line| format!(" {}", line.trim_end()));
    quote!(#(#[doc = #lines])*)
}

/// Renders `pub type <name> = <target>;`.
pub(crate) fn type_alias(name: &TypeName, description: Option<&str>, target: TokenStream) -> TokenStream {
    let docs = doc_attributes(description);
    let name = ident(name.name());
    quote! {
        #docs
        pub type #name = #target;
    }
}

/// Renders a placeholder for a shape that has no name yet.
pub(crate) fn unnamed(kind: &str) -> TokenStream {
    let message = format!("anonymous {kind} must be named before it can be used as a type");
    quote!(compile_error!(#message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> TypeName {
        TypeName::new(PackageReference::local("Pkg", "v2020"), "Person")
    }

    #[test]
    fn test_same_package_reference_is_bare() {
        let ctx = CodeGenerationContext::new(PackageReference::local("Pkg", "v2020"));
        assert_eq!(ctx.type_reference(&person()).to_string(), "Person");
    }

    #[test]
    fn test_aliased_package_reference() {
        let other = PackageReference::local("Other", "v1");
        let ctx = CodeGenerationContext::new(PackageReference::local("Pkg", "v2020"))
            .with_import(other.clone(), "other_v1");
        let name = TypeName::new(other.clone(), "Thing");

        assert_eq!(
            ctx.type_reference(&name).to_string(),
            quote!(other_v1::Thing).to_string()
        );
        assert_eq!(ctx.import_alias(&other), Some("other_v1"));
    }

    #[test]
    fn test_unimported_local_reference_uses_crate_path() {
        let ctx = CodeGenerationContext::new(PackageReference::local("Pkg", "v2020"));
        let name = TypeName::new(PackageReference::local("Other", "v1"), "Thing");

        assert_eq!(
            ctx.type_reference(&name).to_string(),
            quote!(crate::other::v1::Thing).to_string()
        );
    }

    #[test]
    fn test_external_reference_is_absolute() {
        let ctx = CodeGenerationContext::new(PackageReference::local("Pkg", "v2020"));
        let name = TypeName::new(PackageReference::external("chrono"), "DateTime");

        assert_eq!(
            ctx.type_reference(&name).to_string(),
            quote!(::chrono::DateTime).to_string()
        );
    }

    #[test]
    fn test_indirection() {
        let ctx = CodeGenerationContext::new(PackageReference::local("Pkg", "v2020"))
            .with_indirection(std::iter::once(person()).collect());
        assert!(ctx.needs_indirection(&person()));
        assert!(!ctx.needs_indirection(&person().with_name("Address")));
    }

    #[test]
    fn test_ident_handles_keywords_and_junk() {
        assert_eq!(ident("name").to_string(), "name");
        assert_eq!(ident("type").to_string(), "r#type");
        assert_eq!(ident("self").to_string(), "self_");
        assert_eq!(ident("9lives").to_string(), "_9lives");
        assert_eq!(ident("foo-bar").to_string(), "foo_bar");
        assert_eq!(ident("").to_string(), "__");
        assert_eq!(ident("r#type").to_string(), "r_type");
    }

    #[test]
    fn test_doc_attributes() {
        assert!(doc_attributes(None).is_empty());
        let docs = doc_attributes(Some("First line.\nSecond line."));
        assert_eq!(
            docs.to_string(),
            quote!(#[doc = " First line."] #[doc = " Second line."]).to_string()
        );
    }

    #[test]
    fn test_unnamed_is_compile_error() {
        let tokens = unnamed("object").to_string();
        assert!(tokens.starts_with("compile_error"));
        assert!(tokens.contains("anonymous object"));
    }
}
