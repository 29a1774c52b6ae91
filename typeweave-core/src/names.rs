//! Package references and type names.
//!
//! A [`TypeName`] is the identity of a named type: the package it lives in
//! plus its local name. Both are plain values with structural equality and a
//! total order, so they can key maps and drive deterministic output ordering.

use crate::identifiers::to_snake_case;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::collections::btree_set;
use std::fmt;

/// A package produced by the generator itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocalPackageReference {
    group: String,
    version: String,
}

impl LocalPackageReference {
    /// Creates a new local package reference.
    #[must_use]
    pub fn new(group: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
        }
    }

    /// Returns the group.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Returns the version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the module path segments below `crate`.
    #[must_use]
    pub fn module_segments(&self) -> [String; 2] {
        [to_snake_case(&self.group), to_snake_case(&self.version)]
    }

    /// Returns the alias used when importing this package.
    #[must_use]
    pub fn alias(&self) -> String {
        let [group, version] = self.module_segments();
        format!("{group}_{version}")
    }
}

impl fmt::Display for LocalPackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.version)
    }
}

/// A library crate (or a module inside one) the generated code depends on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExternalPackageReference {
    path: String,
}

impl ExternalPackageReference {
    /// Creates a new external package reference from a `::`-separated path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the full path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split("::").filter(|s| !s.is_empty())
    }

    /// Returns the name of the crate that provides this package.
    #[must_use]
    pub fn crate_name(&self) -> &str {
        self.segments().next().unwrap_or(&self.path)
    }
}

impl fmt::Display for ExternalPackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Identity of an importable grouping of types.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PackageReference {
    /// A package produced by the generator.
    Local(LocalPackageReference),
    /// A library package.
    External(ExternalPackageReference),
}

impl PackageReference {
    /// Creates a reference to a generated package.
    #[must_use]
    pub fn local(group: impl Into<String>, version: impl Into<String>) -> Self {
        Self::Local(LocalPackageReference::new(group, version))
    }

    /// Creates a reference to a library package.
    #[must_use]
    pub fn external(path: impl Into<String>) -> Self {
        Self::External(ExternalPackageReference::new(path))
    }

    /// Returns true if this package is produced by the generator.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// Returns the local reference, if any.
    #[must_use]
    pub const fn as_local(&self) -> Option<&LocalPackageReference> {
        match self {
            Self::Local(local) => Some(local),
            Self::External(_) => None,
        }
    }

    /// Returns the external reference, if any.
    #[must_use]
    pub const fn as_external(&self) -> Option<&ExternalPackageReference> {
        match self {
            Self::Local(_) => None,
            Self::External(external) => Some(external),
        }
    }
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(local) => local.fmt(f),
            Self::External(external) => external.fmt(f),
        }
    }
}

/// The qualified identity of a named type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeName {
    package: PackageReference,
    name: String,
}

impl TypeName {
    /// Creates a new type name.
    #[must_use]
    pub fn new(package: PackageReference, name: impl Into<String>) -> Self {
        Self {
            package,
            name: name.into(),
        }
    }

    /// Returns the package this type lives in.
    #[must_use]
    pub const fn package(&self) -> &PackageReference {
        &self.package
    }

    /// Returns the local name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a type name in the same package with a different local name.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self::new(self.package.clone(), name)
    }

    /// Returns true if this type lives in `package`.
    #[must_use]
    pub fn is_in(&self, package: &PackageReference) -> bool {
        &self.package == package
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.name)
    }
}

/// A set of type names that always iterates in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeNameSet(BTreeSet<TypeName>);

impl TypeNameSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name, returning true if it was not already present.
    pub fn insert(&mut self, name: TypeName) -> bool {
        self.0.insert(name)
    }

    /// Returns true if the set contains `name`.
    #[must_use]
    pub fn contains(&self, name: &TypeName) -> bool {
        self.0.contains(name)
    }

    /// Adds every name from `other`.
    pub fn union(&mut self, other: &TypeNameSet) {
        self.0.extend(other.0.iter().cloned());
    }

    /// Returns the number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the names in sorted order.
    pub fn iter(&self) -> btree_set::Iter<'_, TypeName> {
        self.0.iter()
    }
}

impl FromIterator<TypeName> for TypeNameSet {
    fn from_iter<I: IntoIterator<Item = TypeName>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<TypeName> for TypeNameSet {
    fn extend<I: IntoIterator<Item = TypeName>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for TypeNameSet {
    type Item = TypeName;
    type IntoIter = btree_set::IntoIter<TypeName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TypeNameSet {
    type Item = &'a TypeName;
    type IntoIter = btree_set::Iter<'a, TypeName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg() -> PackageReference {
        PackageReference::local("Pkg", "v2020")
    }

    #[test]
    fn test_type_name_equality_is_structural() {
        let a = TypeName::new(pkg(), "Person");
        let b = TypeName::new(PackageReference::local("Pkg", "v2020"), "Person");
        let c = TypeName::new(PackageReference::local("Pkg", "v2021"), "Person");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, a.with_name("Address"));
    }

    #[test]
    fn test_type_name_display() {
        let name = TypeName::new(pkg(), "Person");
        assert_eq!(name.to_string(), "Pkg/v2020/Person");

        let value = TypeName::new(PackageReference::external("serde_json"), "Value");
        assert_eq!(value.to_string(), "serde_json/Value");
    }

    #[test]
    fn test_type_name_order_is_package_then_name() {
        let mut names = vec![
            TypeName::new(PackageReference::local("b", "v1"), "A"),
            TypeName::new(PackageReference::local("a", "v1"), "Z"),
            TypeName::new(PackageReference::local("a", "v1"), "B"),
        ];
        names.sort();

        let rendered: Vec<_> = names.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["a/v1/B", "a/v1/Z", "b/v1/A"]);
    }

    #[test]
    fn test_local_package_paths() {
        let local = LocalPackageReference::new("Microsoft.Storage", "v1beta1");
        assert_eq!(
            local.module_segments(),
            ["microsoft_storage".to_string(), "v1beta1".to_string()]
        );
        assert_eq!(local.alias(), "microsoft_storage_v1beta1");
    }

    #[test]
    fn test_external_package_segments() {
        let external = ExternalPackageReference::new("std::collections");
        assert_eq!(external.segments().collect::<Vec<_>>(), vec!["std", "collections"]);
        assert_eq!(external.crate_name(), "std");
    }

    #[test]
    fn test_package_reference_accessors() {
        let local = pkg();
        assert!(local.is_local());
        assert!(local.as_local().is_some());
        assert!(local.as_external().is_none());

        let external = PackageReference::external("serde");
        assert!(!external.is_local());
        assert_eq!(external.as_external().map(|e| e.path()), Some("serde"));
    }

    #[test]
    fn test_type_name_set_deduplicates_and_sorts() {
        let mut set = TypeNameSet::new();
        assert!(set.insert(TypeName::new(pkg(), "Zebra")));
        assert!(set.insert(TypeName::new(pkg(), "Aardvark")));
        assert!(!set.insert(TypeName::new(pkg(), "Zebra")));

        assert_eq!(set.len(), 2);
        let names: Vec<_> = set.iter().map(TypeName::name).collect();
        assert_eq!(names, vec!["Aardvark", "Zebra"]);
    }

    #[test]
    fn test_type_name_set_union() {
        let mut left: TypeNameSet = [TypeName::new(pkg(), "A")].into_iter().collect();
        let right: TypeNameSet = [TypeName::new(pkg(), "A"), TypeName::new(pkg(), "B")]
            .into_iter()
            .collect();

        left.union(&right);
        assert_eq!(left, right);
        assert!(left.contains(&TypeName::new(pkg(), "B")));
    }

    #[test]
    fn test_type_name_serde_shape() {
        let name = TypeName::new(pkg(), "Person");
        let json = serde_json::to_value(&name).expect("serialize");
        assert_eq!(json["name"], "Person");
        assert_eq!(json["package"]["Local"]["group"], "Pkg");
    }
}
