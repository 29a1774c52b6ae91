//! Dependency graph over definitions.
//!
//! Drives emission order and decides which references must be boxed: a
//! struct that contains itself, directly or through other structs, needs a
//! `Box` somewhere in the loop.

use std::collections::{BTreeMap, BTreeSet};
use typeweave_core::{TypeName, TypeNameSet};
use typeweave_model::TypeDefinitionSet;

/// Definition name -> names it depends on, restricted to the set.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Dependency graph: definition -> definitions it references
    dependencies: BTreeMap<TypeName, BTreeSet<TypeName>>,

    /// Reverse lookup: definition -> definitions that reference it
    dependents: BTreeMap<TypeName, BTreeSet<TypeName>>,
}

impl DependencyGraph {
    /// Builds the graph for `definitions`.
    ///
    /// References to names outside the set are ignored.
    #[must_use]
    pub fn new(definitions: &TypeDefinitionSet) -> Self {
        let mut graph = Self::default();
        for definition in definitions {
            graph
                .dependencies
                .entry(definition.name().clone())
                .or_default();
            graph
                .dependents
                .entry(definition.name().clone())
                .or_default();
        }
        for definition in definitions {
            for reference in definition.references() {
                if !definitions.contains(&reference) {
                    continue;
                }
                graph
                    .dependents
                    .entry(reference.clone())
                    .or_default()
                    .insert(definition.name().clone());
                graph
                    .dependencies
                    .entry(definition.name().clone())
                    .or_default()
                    .insert(reference);
            }
        }
        graph
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Returns true if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Names `name` depends on.
    pub fn dependencies(&self, name: &TypeName) -> impl Iterator<Item = &TypeName> {
        self.dependencies.get(name).into_iter().flatten()
    }

    /// Names that depend on `name`.
    pub fn dependents(&self, name: &TypeName) -> impl Iterator<Item = &TypeName> {
        self.dependents.get(name).into_iter().flatten()
    }

    /// Orders names so that dependencies come first.
    ///
    /// When only cycles remain, the smallest remaining name is emitted next,
    /// so the order is fully deterministic.
    #[must_use]
    pub fn topological_order(&self) -> Vec<TypeName> {
        let mut in_degree: BTreeMap<&TypeName, usize> = self
            .dependencies
            .iter()
            .map(|(name, dependencies)| (name, dependencies.len()))
            .collect();
        let mut ready: BTreeSet<&TypeName> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(name, _)| *name)
            .collect();
        let mut order = Vec::with_capacity(self.dependencies.len());

        while !in_degree.is_empty() {
            let next = match ready.pop_first() {
                Some(name) => name,
                None => match in_degree.keys().next() {
                    Some(name) => *name,
                    None => break,
                },
            };
            if in_degree.remove(next).is_none() {
                continue;
            }
            order.push(next.clone());

            for dependent in self.dependents(next) {
                if let Some(degree) = in_degree.get_mut(dependent) {
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 {
                        ready.insert(dependent);
                    }
                }
            }
        }
        order
    }

    /// Strongly connected components, each sorted, in sorted order of their
    /// first member.
    #[must_use]
    pub fn strongly_connected_components(&self) -> Vec<Vec<TypeName>> {
        let mut tarjan = Tarjan::new(self);
        for name in self.dependencies.keys() {
            if !tarjan.index.contains_key(name) {
                tarjan.visit(name);
            }
        }
        let mut components = tarjan.components;
        for component in &mut components {
            component.sort();
        }
        components.sort();
        components
    }

    /// Names that take part in a reference cycle, including self-loops.
    #[must_use]
    pub fn recursive_names(&self) -> TypeNameSet {
        self.cycles().into_keys().collect()
    }

    /// Maps every name on a reference cycle to the members of its cycle.
    ///
    /// Components are computed once; names outside any cycle are absent.
    #[must_use]
    pub fn cycles(&self) -> BTreeMap<TypeName, TypeNameSet> {
        let mut cycles = BTreeMap::new();
        for component in self.strongly_connected_components() {
            if !self.is_cyclic(&component) {
                continue;
            }
            let members: TypeNameSet = component.iter().cloned().collect();
            for name in component {
                cycles.insert(name, members.clone());
            }
        }
        cycles
    }

    /// Names that must be boxed where they appear as fields of `name`:
    /// the members of `name`'s cycle.
    ///
    /// Runs a full component search; prefer [`DependencyGraph::cycles`]
    /// when querying many names.
    #[must_use]
    pub fn indirection_for(&self, name: &TypeName) -> TypeNameSet {
        self.strongly_connected_components()
            .into_iter()
            .find(|component| component.contains(name))
            .filter(|component| self.is_cyclic(component))
            .map(|component| component.into_iter().collect())
            .unwrap_or_default()
    }

    fn is_cyclic(&self, component: &[TypeName]) -> bool {
        match component {
            [single] => self.dependencies(single).any(|dependency| dependency == single),
            _ => !component.is_empty(),
        }
    }
}

/// Tarjan's algorithm state.
struct Tarjan<'a> {
    graph: &'a DependencyGraph,
    next_index: usize,
    index: BTreeMap<&'a TypeName, usize>,
    low_link: BTreeMap<&'a TypeName, usize>,
    stack: Vec<&'a TypeName>,
    on_stack: BTreeSet<&'a TypeName>,
    components: Vec<Vec<TypeName>>,
}

impl<'a> Tarjan<'a> {
    fn new(graph: &'a DependencyGraph) -> Self {
        Self {
            graph,
            next_index: 0,
            index: BTreeMap::new(),
            low_link: BTreeMap::new(),
            stack: Vec::new(),
            on_stack: BTreeSet::new(),
            components: Vec::new(),
        }
    }

    fn visit(&mut self, name: &'a TypeName) {
        self.index.insert(name, self.next_index);
        self.low_link.insert(name, self.next_index);
        self.next_index += 1;
        self.stack.push(name);
        self.on_stack.insert(name);

        let graph = self.graph;
        for dependency in graph.dependencies(name) {
            if !self.index.contains_key(dependency) {
                self.visit(dependency);
                let low = self.low_link[dependency].min(self.low_link[name]);
                self.low_link.insert(name, low);
            } else if self.on_stack.contains(dependency) {
                let low = self.index[dependency].min(self.low_link[name]);
                self.low_link.insert(name, low);
            }
        }

        if self.low_link[name] == self.index[name] {
            let mut component = Vec::new();
            while let Some(member) = self.stack.pop() {
                self.on_stack.remove(member);
                component.push(member.clone());
                if member == name {
                    break;
                }
            }
            self.components.push(component);
        }
    }
}
