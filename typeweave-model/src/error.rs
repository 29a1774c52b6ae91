//! Error types for the type model and naming engine.

use crate::primitive::PrimitiveType;
use thiserror::Error;
use typeweave_core::TypeName;

/// Error type for constructing types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Two properties of one object share a name.
    #[error("duplicate property '{name}'")]
    DuplicateProperty {
        /// Property name.
        name: String,
    },

    /// Two values of one enum share an identifier.
    #[error("duplicate enum value '{identifier}'")]
    DuplicateEnumValue {
        /// Value identifier.
        identifier: String,
    },

    /// An enum has no values.
    #[error("enum has no values")]
    EmptyEnum,

    /// An enum is based on a primitive that cannot carry literals.
    #[error("enums cannot be based on {base}")]
    UnsupportedEnumBase {
        /// Requested base type.
        base: PrimitiveType,
    },

    /// An enum literal does not fit the enum's base type.
    #[error("invalid {base} enum literal '{value}'")]
    InvalidEnumLiteral {
        /// Literal text.
        value: String,
        /// Enum base type.
        base: PrimitiveType,
    },
}

/// Error type for naming and flattening.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// The identifier service could not produce a name.
    #[error("cannot name {hint}: {source}")]
    Identifier {
        /// Name hint that was being converted.
        hint: String,
        /// Identifier service error.
        #[source]
        source: typeweave_core::Error,
    },

    /// Two different types were given the same name.
    #[error("type name {name} assigned to different types by {first} and {second}")]
    Collision {
        /// Contested name.
        name: TypeName,
        /// Where the first type came from.
        first: String,
        /// Where the second type came from.
        second: String,
    },

    /// A definition is a bare reference to itself.
    #[error("definition {name} refers to itself without any structure in between")]
    SelfReference {
        /// Definition name.
        name: TypeName,
    },

    /// Two roots share a name.
    #[error("duplicate root definition {name}")]
    DuplicateRoot {
        /// Duplicated name.
        name: TypeName,
    },

    /// A definition references a type that is not defined.
    #[error("definition {definition} references undefined type {reference}")]
    DanglingReference {
        /// Referencing definition.
        definition: TypeName,
        /// Missing type.
        reference: TypeName,
    },

    /// Aliases form a cycle with no structure in between.
    #[error("alias cycle detected: {path}")]
    AliasCycle {
        /// Names along the cycle.
        path: String,
    },
}

impl NamingError {
    /// Creates a collision error.
    pub fn collision(name: TypeName, first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::Collision {
            name,
            first: first.into(),
            second: second.into(),
        }
    }

    /// Creates an identifier error for the given hint.
    pub fn identifier(hint: &TypeName, source: typeweave_core::Error) -> Self {
        Self::Identifier {
            hint: hint.to_string(),
            source,
        }
    }
}
