//! Types carrying validation rules.

use crate::context::{CodeGenerationContext, doc_attributes, ident};
use crate::definition::TypeDefinition;
use crate::naming::{bind, child_hint, name_nested};
use crate::object::field_type;
use crate::primitive::PrimitiveType;
use crate::types::{Naming, PackageImportSet, Shape, Type};
use ordered_float::OrderedFloat;
use proc_macro2::{Literal, TokenStream};
use quote::quote;
use typeweave_core::{IdentifierFactory, PackageReference, TypeName, TypeNameSet};

/// Validation rules attached to a type.
///
/// Bounds are stored as [`OrderedFloat`] so that rules, and the types that
/// carry them, have a total equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Validations {
    /// Minimum string length, in characters.
    pub min_length: Option<u64>,
    /// Maximum string length, in characters.
    pub max_length: Option<u64>,
    /// Regular expression the string must match.
    pub pattern: Option<String>,
    /// Inclusive lower bound for numbers.
    pub minimum: Option<OrderedFloat<f64>>,
    /// Inclusive upper bound for numbers.
    pub maximum: Option<OrderedFloat<f64>>,
    /// Minimum number of array items.
    pub min_items: Option<u64>,
    /// Maximum number of array items.
    pub max_items: Option<u64>,
}

impl Validations {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the length bounds.
    #[must_use]
    pub const fn with_length(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Sets the pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the numeric bounds.
    #[must_use]
    pub fn with_range(mut self, minimum: Option<f64>, maximum: Option<f64>) -> Self {
        self.minimum = minimum.map(OrderedFloat);
        self.maximum = maximum.map(OrderedFloat);
        self
    }

    /// Sets the item count bounds.
    #[must_use]
    pub const fn with_items(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_items = min;
        self.max_items = max;
        self
    }

    /// Returns true if no rule is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// An element type wrapped with validation rules.
///
/// Declared as a transparent newtype with a `validate` method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedType {
    element: Box<Type>,
    validations: Validations,
}

impl ValidatedType {
    /// Wraps `element` with `validations`.
    #[must_use]
    pub fn new(element: Type, validations: Validations) -> Self {
        Self {
            element: Box::new(element),
            validations,
        }
    }

    /// Wrapped type.
    #[must_use]
    pub fn element(&self) -> &Type {
        &self.element
    }

    /// Rules.
    #[must_use]
    pub const fn validations(&self) -> &Validations {
        &self.validations
    }

    pub(crate) fn rewrite_references(&self, rename: &dyn Fn(&TypeName) -> Option<TypeName>) -> Self {
        Self::new(
            self.element.rewrite_references(rename),
            self.validations.clone(),
        )
    }

    fn render_impl(&self, name: &TypeName) -> TokenStream {
        let name = ident(name.name());
        let rules = &self.validations;
        let mut constants = Vec::new();
        let mut checks = Vec::new();

        let is_text = matches!(*self.element, Type::Primitive(PrimitiveType::String));
        let is_number = matches!(*self.element, Type::Primitive(primitive) if primitive.is_numeric());
        let is_sequence = matches!(*self.element, Type::Array(_));

        if let Some(min) = rules.min_length {
            let min = Literal::u64_unsuffixed(min);
            constants.push(quote!(pub const MIN_LENGTH: usize = #min;));
            if is_text {
                checks.push(quote! {
                    if self.0.chars().count() < Self::MIN_LENGTH {
                        return Err("value is shorter than the minimum length");
                    }
                });
            }
        }
        if let Some(max) = rules.max_length {
            let max = Literal::u64_unsuffixed(max);
            constants.push(quote!(pub const MAX_LENGTH: usize = #max;));
            if is_text {
                checks.push(quote! {
                    if self.0.chars().count() > Self::MAX_LENGTH {
                        return Err("value is longer than the maximum length");
                    }
                });
            }
        }
        if let Some(pattern) = &rules.pattern {
            constants.push(quote!(pub const PATTERN: &'static str = #pattern;));
        }
        if let Some(minimum) = rules.minimum.filter(|value| value.into_inner().is_finite()) {
            let minimum = Literal::f64_unsuffixed(minimum.into_inner());
            constants.push(quote!(pub const MINIMUM: f64 = #minimum;));
            if is_number {
                checks.push(quote! {
                    if (self.0 as f64) < Self::MINIMUM {
                        return Err("value is below the minimum");
                    }
                });
            }
        }
        if let Some(maximum) = rules.maximum.filter(|value| value.into_inner().is_finite()) {
            let maximum = Literal::f64_unsuffixed(maximum.into_inner());
            constants.push(quote!(pub const MAXIMUM: f64 = #maximum;));
            if is_number {
                checks.push(quote! {
                    if (self.0 as f64) > Self::MAXIMUM {
                        return Err("value is above the maximum");
                    }
                });
            }
        }
        if let Some(min) = rules.min_items {
            let min = Literal::u64_unsuffixed(min);
            constants.push(quote!(pub const MIN_ITEMS: usize = #min;));
            if is_sequence {
                checks.push(quote! {
                    if self.0.len() < Self::MIN_ITEMS {
                        return Err("too few items");
                    }
                });
            }
        }
        if let Some(max) = rules.max_items {
            let max = Literal::u64_unsuffixed(max);
            constants.push(quote!(pub const MAX_ITEMS: usize = #max;));
            if is_sequence {
                checks.push(quote! {
                    if self.0.len() > Self::MAX_ITEMS {
                        return Err("too many items");
                    }
                });
            }
        }

        quote! {
            impl #name {
                #(#constants)*

                /// Checks the wrapped value against the declared rules.
                pub fn validate(&self) -> Result<(), &'static str> {
                    #(#checks)*
                    Ok(())
                }
            }
        }
    }
}

impl Shape for ValidatedType {
    fn required_imports(&self) -> PackageImportSet {
        let mut imports = self.element.required_imports();
        imports.insert(PackageReference::external("serde"));
        imports
    }

    fn references(&self) -> TypeNameSet {
        self.element.references()
    }

    fn as_type(&self, ctx: &CodeGenerationContext) -> TokenStream {
        self.element.as_type(ctx)
    }

    fn as_declarations(
        &self,
        ctx: &CodeGenerationContext,
        name: &TypeName,
        description: Option<&str>,
    ) -> Vec<TokenStream> {
        let docs = doc_attributes(description);
        let type_name = ident(name.name());
        let inner = field_type(&self.element, ctx);
        vec![
            quote! {
                #docs
                #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
                #[serde(transparent)]
                pub struct #type_name(pub #inner);
            },
            self.render_impl(name),
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
        let (element, definitions) = name_nested(&self.element, &child_hint(hint, "Value"), ids)?;
        Ok((
            Type::Validated(Self::new(element, self.validations.clone())),
            definitions,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ObjectType, PropertyDefinition};
    use crate::testing::{context, person};
    use typeweave_core::RustIdentifierFactory;

    fn short_name() -> ValidatedType {
        ValidatedType::new(
            PrimitiveType::String.into(),
            Validations::new()
                .with_length(Some(1), Some(10))
                .with_pattern("^[a-z]+$"),
        )
    }

    #[test]
    fn test_equality_includes_rules() {
        let loose = ValidatedType::new(PrimitiveType::String.into(), Validations::new());
        assert_ne!(short_name(), loose);
        assert_eq!(short_name(), short_name());
        assert!(Validations::new().is_empty());
        assert!(!short_name().validations().is_empty());
    }

    #[test]
    fn test_range_equality_is_total() {
        let a = Validations::new().with_range(Some(0.0), Some(1.5));
        let b = Validations::new().with_range(Some(0.0), Some(1.5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_as_type_is_element() {
        assert_eq!(short_name().as_type(&context()).to_string(), "String");
    }

    #[test]
    fn test_declarations() {
        let declarations = short_name().as_declarations(&context(), &person().with_name("Nick"), None);
        assert_eq!(declarations.len(), 2);
        assert_eq!(
            declarations[0].to_string(),
            quote! {
                #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
                #[serde(transparent)]
                pub struct Nick(pub String);
            }
            .to_string()
        );

        let rendered_impl = declarations[1].to_string();
        assert!(rendered_impl.contains(&quote!(pub const MIN_LENGTH: usize = 1;).to_string()));
        assert!(rendered_impl.contains(&quote!(pub const PATTERN: &'static str = "^[a-z]+$";).to_string()));
        assert!(rendered_impl.contains("chars"));
        assert!(!rendered_impl.contains("MINIMUM"));
    }

    #[test]
    fn test_numeric_checks() {
        let percentage = ValidatedType::new(
            PrimitiveType::Int32.into(),
            Validations::new().with_range(Some(0.0), Some(100.0)),
        );
        let rendered = percentage.as_declarations(&context(), &person().with_name("Percent"), None)[1]
            .to_string();
        assert!(rendered.contains("MINIMUM"));
        assert!(rendered.contains("MAXIMUM"));
        assert!(rendered.contains("as f64"));
    }

    #[test]
    fn test_non_finite_bounds_are_skipped() {
        let unbounded = ValidatedType::new(
            PrimitiveType::Float64.into(),
            Validations::new().with_range(Some(f64::NEG_INFINITY), None),
        );
        let rendered = unbounded.as_declarations(&context(), &person().with_name("Any"), None)[1]
            .to_string();
        assert!(!rendered.contains("MINIMUM"));
    }

    #[test]
    fn test_names_nested_element() {
        let ids = RustIdentifierFactory::new();
        let element: Type = ObjectType::new()
            .with_property(PropertyDefinition::new("id", "id", PrimitiveType::Int64.into()))
            .into();
        let validated = ValidatedType::new(Type::array(element), Validations::new().with_items(Some(1), None));

        let (ty, definitions) = validated
            .name_internal_definitions(&person().with_name("Ids"), &ids)
            .expect("named");

        let names: Vec<_> = definitions.iter().map(|d| d.name().name().to_string()).collect();
        assert_eq!(names, vec!["IdsValueItem"]);
        assert!(ty.references().contains(&person().with_name("IdsValueItem")));
    }
}
