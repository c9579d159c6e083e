//! Dependency graph: each node maps to the set of nodes that must come after it.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// A set of "must-come-before" constraints over caller-defined nodes.
///
/// Every node that appears anywhere, as a key or as a successor, is part of
/// the node universe. Adding an edge registers both endpoints, so a node that
/// only ever appears as a successor still gets placed by the resolver.
///
/// Successor sets are sets: adding the same edge twice is a no-op, and a
/// node's in-degree is the number of *distinct* predecessors.
#[derive(Clone, PartialEq, Eq)]
pub struct DependencyGraph<N> {
    successors: BTreeMap<N, BTreeSet<N>>,
}

impl<N: Ord + Clone> DependencyGraph<N> {
    pub fn new() -> Self {
        Self {
            successors: BTreeMap::new(),
        }
    }

    /// Add a node with no constraints. Returns `false` if it was already present.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.successors.contains_key(&node) {
            return false;
        }
        self.successors.insert(node, BTreeSet::new());
        true
    }

    /// Require `before` to be placed strictly before `after`.
    ///
    /// Returns `false` if the edge already existed. A self-edge is accepted
    /// and makes the node unorderable.
    pub fn add_edge(&mut self, before: N, after: N) -> bool {
        self.add_node(after.clone());
        self.successors.entry(before).or_default().insert(after)
    }

    /// Build a graph from the inverse form: each node mapped to the nodes it
    /// depends on, i.e. the nodes that must come before it.
    ///
    /// This is the shape package manifests declare.
    pub fn from_dependencies<I, D>(dependencies: I) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        D: IntoIterator<Item = N>,
    {
        let mut graph = Self::new();
        for (node, deps) in dependencies {
            graph.add_node(node.clone());
            for dep in deps {
                graph.add_edge(dep, node.clone());
            }
        }
        graph
    }

    pub fn contains(&self, node: &N) -> bool {
        self.successors.contains_key(node)
    }

    /// Nodes that must come after `node`, or `None` if `node` is not in the graph.
    pub fn successors(&self, node: &N) -> Option<&BTreeSet<N>> {
        self.successors.get(node)
    }

    /// The node universe in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.successors.keys()
    }

    /// All edges as `(before, after)` pairs, ordered by `before` then `after`.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.successors
            .iter()
            .flat_map(|(from, tos)| tos.iter().map(move |to| (from, to)))
    }

    pub fn node_count(&self) -> usize {
        self.successors.len()
    }

    pub fn edge_count(&self) -> usize {
        self.successors.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }

    /// A copy of this graph with every edge flipped.
    pub fn reversed(&self) -> Self {
        let mut graph = Self::new();
        for node in self.nodes() {
            graph.add_node(node.clone());
        }
        for (from, to) in self.edges() {
            graph.add_edge(to.clone(), from.clone());
        }
        graph
    }
}

impl<N: Ord + Clone> Default for DependencyGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: fmt::Debug> fmt::Debug for DependencyGraph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.successors.iter()).finish()
    }
}

impl<N, I> FromIterator<(N, I)> for DependencyGraph<N>
where
    N: Ord + Clone,
    I: IntoIterator<Item = N>,
{
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut graph = Self::new();
        for (node, successors) in iter {
            graph.add_node(node.clone());
            for successor in successors {
                graph.add_edge(node.clone(), successor);
            }
        }
        graph
    }
}

impl<N: Ord + Clone> From<BTreeMap<N, BTreeSet<N>>> for DependencyGraph<N> {
    fn from(map: BTreeMap<N, BTreeSet<N>>) -> Self {
        map.into_iter().collect()
    }
}

impl<N: Ord + Clone + Hash> From<HashMap<N, HashSet<N>>> for DependencyGraph<N> {
    fn from(map: HashMap<N, HashSet<N>>) -> Self {
        map.into_iter().collect()
    }
}
