//! Consistency checks over flattened definition sets.

use crate::definition::TypeDefinitionSet;
use crate::error::NamingError;
use crate::types::Type;
use typeweave_core::TypeName;

/// Runs every check.
///
/// # Errors
/// Returns the first problem found.
pub fn validate_definitions(set: &TypeDefinitionSet) -> Result<(), NamingError> {
    check_self_aliases(set)?;
    check_alias_cycles(set)?;
    check_reference_closure(set)
}

/// Rejects definitions that are a bare alias of themselves.
///
/// # Errors
/// Returns [`NamingError::SelfReference`] for the first such definition.
pub fn check_self_aliases(set: &TypeDefinitionSet) -> Result<(), NamingError> {
    match set.iter().find(|definition| definition.is_self_alias()) {
        Some(definition) => Err(NamingError::SelfReference {
            name: definition.name().clone(),
        }),
        None => Ok(()),
    }
}

/// Rejects chains of aliases that loop back on themselves.
///
/// Recursion through any structure (a field, an element, an option) is fine;
/// only alias-to-alias loops are reported.
///
/// # Errors
/// Returns [`NamingError::AliasCycle`] naming the loop.
pub fn check_alias_cycles(set: &TypeDefinitionSet) -> Result<(), NamingError> {
    for start in set.iter() {
        let mut path: Vec<&TypeName> = vec![start.name()];
        let mut current = start;
        while let Type::Name(next) = current.ty() {
            if let Some(position) = path.iter().position(|seen| *seen == next) {
                let cycle: Vec<String> = path[position..]
                    .iter()
                    .chain(std::iter::once(&next))
                    .map(ToString::to_string)
                    .collect();
                return Err(NamingError::AliasCycle {
                    path: cycle.join(" -> "),
                });
            }
            path.push(next);
            match set.get(next) {
                Some(definition) => current = definition,
                None => break,
            }
        }
    }
    Ok(())
}

/// Checks that every reference to a generated package resolves within the
/// set. References into external packages are taken as given.
///
/// # Errors
/// Returns [`NamingError::DanglingReference`] for the first unresolved
/// reference.
pub fn check_reference_closure(set: &TypeDefinitionSet) -> Result<(), NamingError> {
    for definition in set.iter() {
        for reference in definition.references() {
            if reference.package().is_local() && !set.contains(&reference) {
                return Err(NamingError::DanglingReference {
                    definition: definition.name().clone(),
                    reference,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::TypeDefinition;
    use crate::primitive::PrimitiveType;
    use crate::testing::person;
    use typeweave_core::PackageReference;

    fn alias(from: &str, to: &str) -> TypeDefinition {
        TypeDefinition::new(
            person().with_name(from),
            Type::Name(person().with_name(to)),
        )
    }

    #[test]
    fn test_valid_set_passes() {
        let set = TypeDefinitionSet::try_from_definitions([
            alias("A", "B"),
            TypeDefinition::new(person().with_name("B"), PrimitiveType::String.into()),
        ])
        .expect("set");
        assert_eq!(validate_definitions(&set), Ok(()));
    }

    #[test]
    fn test_alias_cycle_is_reported() {
        let set = TypeDefinitionSet::try_from_definitions([
            alias("A", "B"),
            alias("B", "C"),
            alias("C", "A"),
        ])
        .expect("set");

        let err = check_alias_cycles(&set).expect_err("cycle");
        let NamingError::AliasCycle { path } = err else {
            panic!("expected alias cycle");
        };
        assert!(path.starts_with("Pkg/v2020/A -> "));
        assert!(path.ends_with(" -> Pkg/v2020/A"));
    }

    #[test]
    fn test_recursion_through_structure_is_not_a_cycle() {
        let set = TypeDefinitionSet::try_from_definitions([
            alias("List", "Node"),
            TypeDefinition::new(
                person().with_name("Node"),
                Type::array(Type::Name(person().with_name("List"))),
            ),
        ])
        .expect("set");
        assert_eq!(check_alias_cycles(&set), Ok(()));
    }

    #[test]
    fn test_self_alias_is_reported() {
        let set = TypeDefinitionSet::try_from_definitions([alias("A", "A")]).expect("set");
        assert_eq!(
            check_self_aliases(&set),
            Err(NamingError::SelfReference {
                name: person().with_name("A")
            })
        );
    }

    #[test]
    fn test_dangling_local_reference() {
        let set = TypeDefinitionSet::try_from_definitions([alias("A", "Missing")]).expect("set");
        assert_eq!(
            check_reference_closure(&set),
            Err(NamingError::DanglingReference {
                definition: person().with_name("A"),
                reference: person().with_name("Missing"),
            })
        );
    }

    #[test]
    fn test_external_references_are_not_checked() {
        let external = TypeName::new(PackageReference::external("chrono"), "DateTime");
        let set = TypeDefinitionSet::try_from_definitions([TypeDefinition::new(
            person(),
            Type::optional(Type::Name(external)),
        )])
        .expect("set");
        assert_eq!(check_reference_closure(&set), Ok(()));
    }
}
