//! Collapsing of structurally equal definitions.

use crate::definition::{TypeDefinition, TypeDefinitionSet};
use std::collections::BTreeMap;
use tracing::debug;
use typeweave_core::{TypeName, TypeNameSet};

/// Replaces synthesized definitions that equal another definition with
/// references to it.
///
/// Names in `protected` (the roots) are never removed and are preferred as
/// the surviving name; otherwise the smallest name survives. Rewriting can
/// make further definitions equal, so this repeats until nothing changes.
#[must_use]
pub fn deduplicate(set: TypeDefinitionSet, protected: &TypeNameSet) -> TypeDefinitionSet {
    let mut set = set;
    loop {
        let renames = find_duplicates(&set, protected);
        if renames.is_empty() {
            return set;
        }
        for (from, to) in &renames {
            debug!(from = %from, to = %to, "collapsing duplicate definition");
        }

        let rename = |name: &TypeName| renames.get(name).cloned();
        let mut next = TypeDefinitionSet::new();
        for definition in set {
            if renames.contains_key(definition.name()) {
                continue;
            }
            let ty = definition.ty().rewrite_references(&rename);
            next.replace(definition.with_type(ty));
        }
        set = next;
    }
}

fn find_duplicates(set: &TypeDefinitionSet, protected: &TypeNameSet) -> BTreeMap<TypeName, TypeName> {
    let definitions: Vec<&TypeDefinition> = set.iter().collect();
    let mut renames = BTreeMap::new();

    for candidate in &definitions {
        if protected.contains(candidate.name()) {
            continue;
        }
        let target = definitions
            .iter()
            .filter(|other| other.name() != candidate.name())
            .filter(|other| !renames.contains_key(other.name()))
            .filter(|other| other.ty() == candidate.ty())
            .min_by_key(|other| (!protected.contains(other.name()), other.name().clone()));

        if let Some(target) = target {
            if protected.contains(target.name()) || target.name() < candidate.name() {
                renames.insert(candidate.name().clone(), target.name().clone());
            }
        }
    }
    renames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ObjectType, PropertyDefinition};
    use crate::primitive::PrimitiveType;
    use crate::testing::person;
    use crate::types::Type;

    fn point() -> Type {
        ObjectType::new()
            .with_property(PropertyDefinition::new("x", "x", PrimitiveType::Float64.into()))
            .into()
    }

    fn holder(fields: &[(&str, &str)]) -> Type {
        let mut object = ObjectType::new();
        for (field, target) in fields {
            object = object.with_property(PropertyDefinition::new(
                *field,
                *field,
                Type::Name(person().with_name(*target)),
            ));
        }
        object.into()
    }

    #[test]
    fn test_collapses_to_smallest_name() {
        let set = TypeDefinitionSet::try_from_definitions([
            TypeDefinition::new(person(), holder(&[("a", "PersonB"), ("b", "PersonA")])),
            TypeDefinition::new(person().with_name("PersonA"), point()),
            TypeDefinition::new(person().with_name("PersonB"), point()),
        ])
        .expect("set");
        let roots: TypeNameSet = std::iter::once(person()).collect();

        let deduplicated = deduplicate(set, &roots);

        assert_eq!(deduplicated.len(), 2);
        assert!(deduplicated.contains(&person().with_name("PersonA")));
        let root = deduplicated.get(&person()).expect("root");
        let references: Vec<_> = root.references().into_iter().collect();
        assert_eq!(references, vec![person().with_name("PersonA")]);
    }

    #[test]
    fn test_prefers_root_name() {
        let set = TypeDefinitionSet::try_from_definitions([
            TypeDefinition::new(person().with_name("Point"), point()),
            TypeDefinition::new(person().with_name("APoint"), point()),
            TypeDefinition::new(person(), holder(&[("at", "APoint")])),
        ])
        .expect("set");
        let roots: TypeNameSet = [person(), person().with_name("Point")].into_iter().collect();

        let deduplicated = deduplicate(set, &roots);

        assert!(!deduplicated.contains(&person().with_name("APoint")));
        assert!(
            deduplicated
                .get(&person())
                .expect("root")
                .references()
                .contains(&person().with_name("Point"))
        );
    }

    #[test]
    fn test_repeats_until_stable() {
        // HolderA and HolderB only become equal once PointB is renamed.
        let set = TypeDefinitionSet::try_from_definitions([
            TypeDefinition::new(person().with_name("PointA"), point()),
            TypeDefinition::new(person().with_name("PointB"), point()),
            TypeDefinition::new(person().with_name("HolderA"), holder(&[("p", "PointA")])),
            TypeDefinition::new(person().with_name("HolderB"), holder(&[("p", "PointB")])),
        ])
        .expect("set");

        let deduplicated = deduplicate(set, &TypeNameSet::new());

        let names: Vec<_> = deduplicated.iter().map(|d| d.name().name()).collect();
        assert_eq!(names, vec!["HolderA", "PointA"]);
    }

    #[test]
    fn test_roots_are_never_removed() {
        let set = TypeDefinitionSet::try_from_definitions([
            TypeDefinition::new(person().with_name("A"), point()),
            TypeDefinition::new(person().with_name("B"), point()),
        ])
        .expect("set");
        let roots: TypeNameSet = [person().with_name("A"), person().with_name("B")]
            .into_iter()
            .collect();

        assert_eq!(deduplicate(set, &roots).len(), 2);
    }
}
