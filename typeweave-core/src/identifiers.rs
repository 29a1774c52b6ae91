//! Identifier synthesis.
//!
//! The naming engine never builds identifiers by itself: every name derived
//! from schema text goes through an [`IdentifierFactory`]. The factory must be
//! deterministic, and safe to share across the threads that name independent
//! root definitions.

use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;

/// The syntactic role an identifier is created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdentifierKind {
    /// A type name (PascalCase).
    Type,
    /// A struct field (snake_case).
    Field,
    /// An enum variant (PascalCase).
    Variant,
    /// A constant (SCREAMING_SNAKE_CASE).
    Constant,
    /// A module path segment (snake_case).
    Module,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Type => "type",
            Self::Field => "field",
            Self::Variant => "variant",
            Self::Constant => "constant",
            Self::Module => "module",
        };
        f.write_str(text)
    }
}

/// Turns raw, schema-derived text into legal identifiers.
pub trait IdentifierFactory: Send + Sync {
    /// Creates an identifier of the given kind from raw text.
    ///
    /// # Errors
    /// Returns an error if no legal identifier can be derived from `raw`.
    fn create_identifier(&self, raw: &str, kind: IdentifierKind) -> Result<String>;
}

/// Identifier factory producing idiomatic Rust identifiers.
///
/// Results are cached per `(raw, kind)`, so repeated requests from the naming
/// engine are cheap and always agree.
#[derive(Debug, Default)]
pub struct RustIdentifierFactory {
    cache: Mutex<HashMap<(String, IdentifierKind), String>>,
}

impl RustIdentifierFactory {
    /// Creates a new factory with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of cached identifiers.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.lock().len()
    }
}

impl IdentifierFactory for RustIdentifierFactory {
    fn create_identifier(&self, raw: &str, kind: IdentifierKind) -> Result<String> {
        let key = (raw.to_string(), kind);
        if let Some(hit) = self.cache.lock().get(&key) {
            return Ok(hit.clone());
        }

        let identifier = sanitize(raw, kind)?;
        self.cache.lock().insert(key, identifier.clone());
        Ok(identifier)
    }
}

fn sanitize(raw: &str, kind: IdentifierKind) -> Result<String> {
    let words = split_words(raw);
    if words.is_empty() {
        return Err(Error::unusable_identifier(
            raw,
            kind,
            "no alphanumeric characters",
        ));
    }

    let mut identifier = match kind {
        IdentifierKind::Type | IdentifierKind::Variant => join_pascal(&words),
        IdentifierKind::Field | IdentifierKind::Module => join_snake(&words),
        IdentifierKind::Constant => join_snake(&words).to_ascii_uppercase(),
    };

    if identifier.starts_with(|c: char| c.is_ascii_digit()) {
        identifier.insert(0, '_');
    }
    if is_keyword(&identifier) {
        identifier.push('_');
    }

    Ok(identifier)
}

/// Splits text into words at separators, lower-to-upper case changes and
/// the end of an acronym (`MDEntry` splits into `MD` and `Entry`).
///
/// Digits stay attached to the word they follow.
#[must_use]
pub fn split_words(raw: &str) -> Vec<String> {
    let chars: Vec<char> = raw.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            let boundary = (prev.is_ascii_lowercase() && c.is_ascii_uppercase())
                || (prev.is_ascii_uppercase() && c.is_ascii_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Converts a string to snake_case.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    join_snake(&split_words(s))
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    join_pascal(&split_words(s))
}

fn join_snake(words: &[String]) -> String {
    words
        .iter()
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

fn join_pascal(words: &[String]) -> String {
    let mut result = String::new();
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.push(first.to_ascii_uppercase());
            result.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }
    result
}

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Returns true if `s` is a strict or reserved Rust keyword.
#[must_use]
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("clOrdId"), vec!["cl", "Ord", "Id"]);
        assert_eq!(split_words("MDEntryPx"), vec!["MD", "Entry", "Px"]);
        assert_eq!(split_words("Person_address"), vec!["Person", "address"]);
        assert_eq!(split_words("order-type v1beta"), vec!["order", "type", "v1beta"]);
        assert!(split_words("--").is_empty());
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("clOrdId"), "cl_ord_id");
        assert_eq!(to_snake_case("symbol"), "symbol");
        assert_eq!(to_snake_case("MDEntryPx"), "md_entry_px");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("message_header"), "MessageHeader");
        assert_eq!(to_pascal_case("side"), "Side");
        assert_eq!(to_pascal_case("order-type"), "OrderType");
        assert_eq!(to_pascal_case("Person_address_Item"), "PersonAddressItem");
    }

    #[test]
    fn test_create_identifier_by_kind() {
        let ids = RustIdentifierFactory::new();
        let get = |raw, kind| ids.create_identifier(raw, kind).expect("identifier");

        assert_eq!(get("person_address", IdentifierKind::Type), "PersonAddress");
        assert_eq!(get("PersonAddress", IdentifierKind::Field), "person_address");
        assert_eq!(get("max-items", IdentifierKind::Constant), "MAX_ITEMS");
        assert_eq!(get("in progress", IdentifierKind::Variant), "InProgress");
        assert_eq!(get("v1beta1", IdentifierKind::Module), "v1beta1");
    }

    #[test]
    fn test_create_identifier_escapes_keywords() {
        let ids = RustIdentifierFactory::new();
        assert_eq!(
            ids.create_identifier("type", IdentifierKind::Field).expect("identifier"),
            "type_"
        );
        assert_eq!(
            ids.create_identifier("self", IdentifierKind::Type).expect("identifier"),
            "Self_"
        );
    }

    #[test]
    fn test_create_identifier_leading_digit() {
        let ids = RustIdentifierFactory::new();
        assert_eq!(
            ids.create_identifier("3d-model", IdentifierKind::Field).expect("identifier"),
            "_3d_model"
        );
        assert_eq!(
            ids.create_identifier("2xx", IdentifierKind::Variant).expect("identifier"),
            "_2xx"
        );
    }

    #[test]
    fn test_create_identifier_rejects_empty() {
        let ids = RustIdentifierFactory::new();
        let err = ids
            .create_identifier("  __  ", IdentifierKind::Type)
            .expect_err("no alphanumerics");
        assert!(matches!(err, Error::UnusableIdentifier { .. }));
        assert!(err.to_string().contains("type identifier"));
    }

    #[test]
    fn test_create_identifier_is_cached() {
        let ids = RustIdentifierFactory::new();
        let first = ids.create_identifier("foo_bar", IdentifierKind::Type);
        let second = ids.create_identifier("foo_bar", IdentifierKind::Type);
        assert_eq!(first, second);
        assert_eq!(ids.cached(), 1);

        ids.create_identifier("foo_bar", IdentifierKind::Field)
            .expect("identifier");
        assert_eq!(ids.cached(), 2);
    }

    #[test]
    fn test_create_identifier_across_threads() {
        let ids = Arc::new(RustIdentifierFactory::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || {
                    ids.create_identifier("shared_name", IdentifierKind::Type)
                        .expect("identifier")
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().expect("thread"), "SharedName");
        }
    }
}
