//! Optional configuration cells.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A setting that is either unset (defer to default behavior) or holds an
/// explicit value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configurable<T> {
    value: Option<T>,
}

impl<T> Default for Configurable<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T> Configurable<T> {
    /// Creates an unset cell.
    #[must_use]
    pub const fn unset() -> Self {
        Self { value: None }
    }

    /// Sets the value, replacing any previous one.
    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    /// Returns the explicit value, if one was set.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Returns true if an explicit value was set.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

impl<T: PartialEq + Debug> Configurable<T> {
    /// Sets the value unless a different one is already present.
    ///
    /// Setting the same value twice is accepted.
    ///
    /// # Errors
    /// Returns [`ConfigError::Conflict`] if the cell already holds a
    /// different value.
    pub fn try_set(&mut self, setting: &str, value: T) -> Result<(), ConfigError> {
        match &self.value {
            Some(existing) if *existing != value => Err(ConfigError::conflict(
                setting,
                format!("{existing:?}"),
                format!("{value:?}"),
            )),
            _ => {
                self.value = Some(value);
                Ok(())
            }
        }
    }
}

impl<T> From<T> for Configurable<T> {
    fn from(value: T) -> Self {
        Self { value: Some(value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configurable_starts_unset() {
        let cell: Configurable<bool> = Configurable::default();
        assert!(!cell.is_set());
        assert_eq!(cell.value(), None);
    }

    #[test]
    fn test_configurable_set_replaces() {
        let mut cell = Configurable::unset();
        cell.set(1);
        cell.set(2);
        assert_eq!(cell.value(), Some(&2));
    }

    #[test]
    fn test_try_set_accepts_same_value() {
        let mut cell = Configurable::from("a".to_string());
        assert!(cell.try_set("$renameTo", "a".to_string()).is_ok());
        assert_eq!(cell.value().map(String::as_str), Some("a"));
    }

    #[test]
    fn test_try_set_rejects_different_value() {
        let mut cell = Configurable::from(true);
        let err = cell.try_set("$isSecret", false).expect_err("conflict");
        assert_eq!(err, ConfigError::conflict("$isSecret", "true", "false"));
        assert_eq!(cell.value(), Some(&true));
    }

    #[test]
    fn test_configurable_serde_is_transparent() {
        let cell = Configurable::from(5u32);
        assert_eq!(serde_json::to_string(&cell).expect("serialize"), "5");

        let unset: Configurable<u32> = serde_json::from_str("null").expect("deserialize");
        assert!(!unset.is_set());
    }
}
