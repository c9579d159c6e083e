//! Cycle diagnostics for sorts that stall.

use std::fmt;

use ordo_util::errors::OrdoError;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

/// The constraint set cannot be linearized.
///
/// Carries every node whose in-degree never reached zero, plus the
/// constraints among them, so callers can tell which nodes sit on a cycle
/// and which are merely stuck behind one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError<N> {
    unresolved: Vec<N>,
    /// Edges among `unresolved`, as index pairs into it.
    edges: Vec<(usize, usize)>,
}

impl<N> CycleError<N> {
    pub(crate) fn new(unresolved: Vec<N>, edges: Vec<(usize, usize)>) -> Self {
        Self { unresolved, edges }
    }

    /// Nodes that never became ready, in ascending order.
    pub fn unresolved(&self) -> &[N] {
        &self.unresolved
    }

    pub fn into_unresolved(self) -> Vec<N> {
        self.unresolved
    }
}

impl<N: Clone + Ord> CycleError<N> {
    /// The cycles among the unresolved nodes.
    ///
    /// Each entry is a strongly connected component that actually loops: more
    /// than one node, or a single node constrained to come before itself.
    /// Nodes are ascending within a component and components are ordered by
    /// their smallest node. Unresolved nodes downstream of a cycle appear in
    /// no component.
    pub fn cycles(&self) -> Vec<Vec<N>> {
        let mut graph: DiGraph<usize, ()> =
            DiGraph::with_capacity(self.unresolved.len(), self.edges.len());
        let ids: Vec<NodeIndex> = (0..self.unresolved.len())
            .map(|i| graph.add_node(i))
            .collect();
        for &(from, to) in &self.edges {
            graph.add_edge(ids[from], ids[to], ());
        }

        let mut cycles: Vec<Vec<N>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut members: Vec<usize> = scc.into_iter().map(|id| graph[id]).collect();
                members.sort_unstable();
                members
                    .into_iter()
                    .map(|i| self.unresolved[i].clone())
                    .collect()
            })
            .collect();
        cycles.sort();
        cycles
    }
}

impl<N: fmt::Debug> fmt::Display for CycleError<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dependency cycle: {} node(s) could not be ordered: {:?}",
            self.unresolved.len(),
            self.unresolved
        )
    }
}

impl<N: fmt::Debug> std::error::Error for CycleError<N> {}

impl<N: fmt::Debug> From<CycleError<N>> for OrdoError {
    fn from(err: CycleError<N>) -> Self {
        OrdoError::Cycle {
            count: err.unresolved.len(),
            nodes: format!("{:?}", err.unresolved),
        }
    }
}
