//! Arena index over a borrowed graph: integer slots for nodes, successor
//! lists and in-degree counters, plus the precomputed tie-break order.

use ordo_core::graph::DependencyGraph;
use ordo_core::priority::{MissingPriority, Priority};

use crate::cycle::CycleError;

/// Per-call scratch state. Built fresh for every sort and dropped with it.
///
/// Slot `i` holds the `i`-th smallest node, so comparing slots compares nodes.
/// `by_key` lists slots in `(rank, node)` order and `position` is its inverse;
/// the ready queue stores positions, which makes the two-level tie-break a
/// plain integer comparison.
pub(crate) struct GraphIndex<'g, N> {
    pub(crate) nodes: Vec<&'g N>,
    pub(crate) successors: Vec<Vec<usize>>,
    pub(crate) in_degree: Vec<usize>,
    pub(crate) by_key: Vec<usize>,
    pub(crate) position: Vec<usize>,
}

impl<'g, N: Ord + Clone> GraphIndex<'g, N> {
    pub(crate) fn build<P>(
        graph: &'g DependencyGraph<N>,
        priority: &P,
        missing: MissingPriority,
    ) -> Self
    where
        P: Priority<N>,
    {
        let nodes: Vec<&N> = graph.nodes().collect();
        let mut successors = vec![Vec::new(); nodes.len()];
        let mut in_degree = vec![0usize; nodes.len()];

        for (slot, node) in nodes.iter().enumerate() {
            let Some(succ) = graph.successors(node) else {
                continue;
            };
            for to in succ {
                // Every successor is itself a key of the graph.
                if let Ok(target) = nodes.binary_search(&to) {
                    successors[slot].push(target);
                    in_degree[target] += 1;
                }
            }
        }

        let ranks: Vec<_> = nodes
            .iter()
            .map(|node| missing.rank(priority.priority(node)))
            .collect();
        let mut by_key: Vec<usize> = (0..nodes.len()).collect();
        by_key.sort_by(|&a, &b| ranks[a].cmp(&ranks[b]).then(a.cmp(&b)));

        let mut position = vec![0usize; nodes.len()];
        for (pos, &slot) in by_key.iter().enumerate() {
            position[slot] = pos;
        }

        Self {
            nodes,
            successors,
            in_degree,
            by_key,
            position,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }

    /// Positions of the nodes that start with no predecessors.
    pub(crate) fn initially_ready(&self) -> impl Iterator<Item = usize> + '_ {
        self.in_degree
            .iter()
            .enumerate()
            .filter(|(_, &deg)| deg == 0)
            .map(|(slot, _)| self.position[slot])
    }

    /// Consume every out-edge of `slot`, calling `on_ready` with the position
    /// of each successor whose in-degree drops to zero. Returns the number of
    /// edges consumed.
    pub(crate) fn release(&mut self, slot: usize, mut on_ready: impl FnMut(usize)) -> usize {
        for &target in &self.successors[slot] {
            self.in_degree[target] -= 1;
            if self.in_degree[target] == 0 {
                on_ready(self.position[target]);
            }
        }
        self.successors[slot].len()
    }

    /// Describe the nodes that never reached in-degree zero.
    pub(crate) fn stalled(&self) -> CycleError<N> {
        let mut local = vec![None; self.len()];
        let mut unresolved = Vec::new();
        for (slot, &deg) in self.in_degree.iter().enumerate() {
            if deg > 0 {
                local[slot] = Some(unresolved.len());
                unresolved.push(self.nodes[slot].clone());
            }
        }

        let mut edges = Vec::new();
        for (slot, targets) in self.successors.iter().enumerate() {
            let Some(from) = local[slot] else {
                continue;
            };
            edges.extend(targets.iter().filter_map(|&t| local[t].map(|to| (from, to))));
        }

        CycleError::new(unresolved, edges)
    }
}
