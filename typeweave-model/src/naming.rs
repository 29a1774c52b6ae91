//! Naming engine.
//!
//! Schemas describe types with arbitrarily deep anonymous nesting, but the
//! generated code needs every struct, enum and wrapper to have a name. The
//! engine walks each root definition, replaces anonymous nested shapes with
//! references to synthesized definitions, and repeats until nothing new is
//! produced. The result is a flat [`TypeDefinitionSet`].
//!
//! Names are derived from the path to the nested shape:
//!
//! | Position                | Hint                 |
//! |-------------------------|----------------------|
//! | object property `field` | `<hint>_<field>`     |
//! | array element           | `<hint>_Item`        |
//! | map key / value         | `<hint>_Key` / `_Value` |
//! | validated element       | `<hint>_Value`       |
//! | one-of option `n`       | `<hint>_Option<n>`   |
//! | resource spec / status  | `<hint>_Spec` / `_Status` |
//! | optional element        | `<hint>`             |
//! | top-level optional      | `<hint>_Value`       |
//!
//! The hint is passed through the identifier service to obtain the final name.

use crate::dedup::deduplicate;
use crate::definition::{TypeDefinition, TypeDefinitionSet};
use crate::error::NamingError;
use crate::types::{Naming, Shape, Type};
use crate::validation::{check_alias_cycles, check_reference_closure};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info, trace};
use typeweave_core::{IdentifierFactory, IdentifierKind, TypeName, TypeNameSet};

/// Options controlling a flatten run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamingOptions {
    parallel: bool,
    deduplicate: bool,
    verify_references: bool,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            deduplicate: false,
            verify_references: true,
        }
    }
}

impl NamingOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names independent roots on the rayon thread pool.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Collapses structurally equal synthesized definitions.
    #[must_use]
    pub const fn deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    /// Checks that every local reference resolves within the result.
    #[must_use]
    pub const fn verify_references(mut self, verify: bool) -> Self {
        self.verify_references = verify;
        self
    }

    /// Returns true if roots are named in parallel.
    #[must_use]
    pub const fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Returns true if equal definitions are collapsed.
    #[must_use]
    pub const fn is_deduplicating(&self) -> bool {
        self.deduplicate
    }

    /// Returns true if reference closure is verified.
    #[must_use]
    pub const fn is_verifying_references(&self) -> bool {
        self.verify_references
    }
}

/// A synthesized or root definition with the root it came from.
type Traced = (TypeDefinition, TypeName);

/// Flattens anonymous nested types into named definitions.
pub struct NamingEngine<'a> {
    ids: &'a dyn IdentifierFactory,
    options: NamingOptions,
}

impl<'a> NamingEngine<'a> {
    /// Creates an engine that synthesizes names through `ids`.
    #[must_use]
    pub fn new(ids: &'a dyn IdentifierFactory) -> Self {
        Self {
            ids,
            options: NamingOptions::default(),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: NamingOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the options.
    #[must_use]
    pub const fn options(&self) -> &NamingOptions {
        &self.options
    }

    /// Flattens `roots` into a set of definitions in which no anonymous
    /// shape remains nested inside another.
    ///
    /// # Errors
    /// Returns an error on duplicate roots, self-aliases, identifier failures,
    /// name collisions, alias cycles and (if enabled) dangling references.
    pub fn flatten(
        &self,
        roots: impl IntoIterator<Item = TypeDefinition>,
    ) -> Result<TypeDefinitionSet, NamingError> {
        let roots: Vec<TypeDefinition> = roots.into_iter().collect();

        let mut root_names = TypeNameSet::new();
        for root in &roots {
            if !root_names.insert(root.name().clone()) {
                return Err(NamingError::DuplicateRoot {
                    name: root.name().clone(),
                });
            }
            if root.is_self_alias() {
                return Err(NamingError::SelfReference {
                    name: root.name().clone(),
                });
            }
        }

        let per_root: Vec<Vec<Traced>> = if self.options.parallel {
            roots
                .par_iter()
                .map(|root| self.flatten_root(root))
                .collect::<Result<_, _>>()?
        } else {
            roots
                .iter()
                .map(|root| self.flatten_root(root))
                .collect::<Result<_, _>>()?
        };

        let mut definitions = merge(per_root.into_iter().flatten().collect())?;
        if self.options.deduplicate {
            definitions = deduplicate(definitions, &root_names);
        }

        check_alias_cycles(&definitions)?;
        if self.options.verify_references {
            check_reference_closure(&definitions)?;
        }

        info!(
            roots = roots.len(),
            definitions = definitions.len(),
            "flattened type definitions"
        );
        Ok(definitions)
    }

    /// Names one root and everything nested within it, to a fixpoint.
    fn flatten_root(&self, root: &TypeDefinition) -> Result<Vec<Traced>, NamingError> {
        let origin = root.name().clone();
        let (named, mut pending) = root.ty().create_named_definition(root.name(), self.ids)?;
        let mut output = vec![(root.with_type(named.ty().clone()), origin.clone())];

        let mut pass = 0usize;
        while !pending.is_empty() {
            pass += 1;
            trace!(root = %origin, pass, pending = pending.len(), "naming pass");
            let mut next = Vec::new();
            for definition in pending {
                debug!(
                    name = %definition.name(),
                    root = %origin,
                    kind = definition.ty().kind(),
                    "synthesized definition"
                );
                let (ty, more) = definition
                    .ty()
                    .name_internal_definitions(definition.name(), self.ids)?;
                next.extend(more);
                output.push((definition.with_type(ty), origin.clone()));
            }
            pending = next;
        }
        Ok(output)
    }
}

/// Merges traced definitions in `(name, origin)` order.
///
/// Equal definitions under one name are merged; different ones collide.
fn merge(mut traced: Vec<Traced>) -> Result<TypeDefinitionSet, NamingError> {
    traced.sort_by(|(a, a_origin), (b, b_origin)| {
        a.name().cmp(b.name()).then_with(|| a_origin.cmp(b_origin))
    });

    let mut merged: BTreeMap<TypeName, Traced> = BTreeMap::new();
    for (definition, origin) in traced {
        match merged.get(definition.name()) {
            Some((existing, _)) if existing.ty() == definition.ty() => {
                debug!(name = %definition.name(), root = %origin, "merged equal definition");
            }
            Some((_, first)) => {
                return Err(NamingError::collision(
                    definition.name().clone(),
                    first.to_string(),
                    origin.to_string(),
                ));
            }
            None => {
                merged.insert(definition.name().clone(), (definition, origin));
            }
        }
    }

    let mut set = TypeDefinitionSet::new();
    for (_, (definition, _)) in merged {
        set.replace(definition);
    }
    Ok(set)
}

/// Extends a naming hint with one path segment.
pub(crate) fn child_hint(hint: &TypeName, segment: &str) -> TypeName {
    hint.with_name(format!("{}_{}", hint.name(), segment))
}

/// Turns a hint into a legal type name in the same package.
pub(crate) fn synthesize_name(
    hint: &TypeName,
    ids: &dyn IdentifierFactory,
) -> Result<TypeName, NamingError> {
    let name = ids
        .create_identifier(hint.name(), IdentifierKind::Type)
        .map_err(|source| NamingError::identifier(hint, source))?;
    Ok(hint.with_name(name))
}

/// Names a type that appears nested inside another.
///
/// Shapes that need a name are replaced by a reference to a new definition;
/// everything else is searched for such shapes.
pub(crate) fn name_nested(
    ty: &Type,
    hint: &TypeName,
    ids: &dyn IdentifierFactory,
) -> Naming<Type> {
    if !ty.requires_name() {
        return ty.name_internal_definitions(hint, ids);
    }
    let (inner, mut definitions) = ty.name_internal_definitions(hint, ids)?;
    let name = synthesize_name(hint, ids)?;
    definitions.push(TypeDefinition::new(name.clone(), inner));
    Ok((Type::Name(name), definitions))
}

/// Binds an already named type to `name`.
pub(crate) fn bind(name: &TypeName, named: (Type, Vec<TypeDefinition>)) -> Naming<TypeDefinition> {
    let (ty, definitions) = named;
    if ty.as_name() == Some(name) {
        return Err(NamingError::SelfReference { name: name.clone() });
    }
    Ok((TypeDefinition::new(name.clone(), ty), definitions))
}
