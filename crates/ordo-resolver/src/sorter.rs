//! Kahn's algorithm with deterministic `(priority, node)` tie-breaking.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordo_core::graph::DependencyGraph;
use ordo_core::options::SortOptions;
use ordo_core::priority::{MissingPriority, NoPriority, Priority};

use crate::budget::Budget;
use crate::cycle::CycleError;
use crate::index::GraphIndex;

/// Resolves a [`DependencyGraph`] into a single linear order.
///
/// The graph and the priority source are only borrowed or owned read-only;
/// every call builds its own in-degree index and ready queue, so one sorter
/// can be used any number of times and independent sorters can run on
/// different threads at once.
///
/// When several nodes are ready, the one with the smallest priority key is
/// placed first. Nodes without a key rank according to [`MissingPriority`]
/// (after every keyed node by default), and remaining ties go to the smaller
/// node.
pub struct GraphSorter<'g, N, P = NoPriority> {
    graph: &'g DependencyGraph<N>,
    priority: P,
    missing: MissingPriority,
    max_steps: Option<u64>,
}

impl<'g, N: Ord + Clone> GraphSorter<'g, N, NoPriority> {
    pub fn new(graph: &'g DependencyGraph<N>) -> Self {
        Self {
            graph,
            priority: NoPriority,
            missing: MissingPriority::default(),
            max_steps: None,
        }
    }
}

impl<'g, N, P> GraphSorter<'g, N, P>
where
    N: Ord + Clone,
    P: Priority<N>,
{
    /// Replace the priority source.
    pub fn priority<Q: Priority<N>>(self, priority: Q) -> GraphSorter<'g, N, Q> {
        GraphSorter {
            graph: self.graph,
            priority,
            missing: self.missing,
            max_steps: self.max_steps,
        }
    }

    pub fn missing_priority(mut self, policy: MissingPriority) -> Self {
        self.missing = policy;
        self
    }

    /// Apply the policy and step ceiling from `options`.
    pub fn options(mut self, options: &SortOptions) -> Self {
        self.missing = options.missing_priority;
        self.max_steps = options.max_steps;
        self
    }

    /// The configured step ceiling, if any.
    pub fn budget(&self) -> Option<Budget> {
        self.max_steps.map(Budget::steps)
    }

    /// Start a lazy sort that yields one placed node per step.
    pub fn steps(&self) -> SortSteps<'g, N> {
        let index = GraphIndex::build(self.graph, &self.priority, self.missing);
        tracing::debug!(
            nodes = index.len(),
            edges = index.edge_count(),
            missing_priority = ?self.missing,
            "Sorting dependency graph"
        );
        SortSteps::new(index)
    }

    /// Produce the full order, or the nodes that could not be ordered.
    pub fn sort(&self) -> Result<Vec<N>, CycleError<N>> {
        let mut steps = self.steps();
        let order: Vec<N> = steps.by_ref().collect();
        steps.finish()?;
        Ok(order)
    }

    /// Group nodes into tiers: tier `k` holds the nodes whose longest chain
    /// of predecessors has `k` links.
    ///
    /// Every node's predecessors sit in earlier tiers, and within a tier nodes
    /// follow the same `(priority, node)` order as [`sort`](Self::sort), so
    /// concatenating the tiers gives a valid order.
    pub fn tiers(&self) -> Result<Vec<Vec<N>>, CycleError<N>> {
        let mut index = GraphIndex::build(self.graph, &self.priority, self.missing);
        let mut tiers = Vec::new();
        let mut placed = 0usize;
        let mut current: Vec<usize> = index.initially_ready().collect();

        while !current.is_empty() {
            current.sort_unstable();
            let mut next = Vec::new();
            let mut tier = Vec::with_capacity(current.len());
            for &pos in &current {
                let slot = index.by_key[pos];
                index.release(slot, |ready| next.push(ready));
                tier.push(index.nodes[slot].clone());
            }
            placed += tier.len();
            tracing::trace!(tier = tiers.len(), size = tier.len(), "Closed tier");
            tiers.push(tier);
            current = next;
        }

        if placed < index.len() {
            let err = index.stalled();
            tracing::debug!(
                unresolved = err.unresolved().len(),
                "Tiering stalled on a cycle"
            );
            return Err(err);
        }
        Ok(tiers)
    }
}

/// A sort in progress. Yields nodes in their final order.
///
/// Call [`finish`](Self::finish) to learn whether every node could be placed
/// or the sort stalls on a cycle.
pub struct SortSteps<'g, N> {
    index: GraphIndex<'g, N>,
    ready: BinaryHeap<Reverse<usize>>,
    placed: usize,
    edges_consumed: u64,
}

impl<'g, N: Ord + Clone> SortSteps<'g, N> {
    fn new(index: GraphIndex<'g, N>) -> Self {
        let ready: BinaryHeap<Reverse<usize>> = index.initially_ready().map(Reverse).collect();
        Self {
            index,
            ready,
            placed: 0,
            edges_consumed: 0,
        }
    }

    /// Nodes not yet placed.
    pub fn remaining(&self) -> usize {
        self.index.len() - self.placed
    }

    pub fn placed(&self) -> usize {
        self.placed
    }

    /// Work done so far: one step per placed node and per consumed edge.
    pub fn steps_taken(&self) -> u64 {
        self.placed as u64 + self.edges_consumed
    }

    /// `true` when nothing is ready but nodes remain.
    pub fn is_stalled(&self) -> bool {
        self.ready.is_empty() && self.remaining() > 0
    }

    /// Check that every node can be placed.
    ///
    /// Nodes still ready are placed and discarded first, so calling this
    /// before the iterator is exhausted only fails on an actual cycle.
    pub fn finish(mut self) -> Result<(), CycleError<N>> {
        for _ in self.by_ref() {}
        if self.remaining() == 0 {
            return Ok(());
        }
        let err = self.index.stalled();
        tracing::debug!(
            placed = self.placed,
            unresolved = err.unresolved().len(),
            "Sort stalled on a cycle"
        );
        Err(err)
    }
}

impl<N: Ord + Clone> Iterator for SortSteps<'_, N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let Reverse(pos) = self.ready.pop()?;
        let slot = self.index.by_key[pos];
        let ready = &mut self.ready;
        let consumed = self.index.release(slot, |next| ready.push(Reverse(next)));
        self.edges_consumed += consumed as u64;
        self.placed += 1;
        tracing::trace!(slot, placed = self.placed, ready = self.ready.len(), "Placed node");
        Some(self.index.nodes[slot].clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ready.len(), Some(self.remaining()))
    }
}
