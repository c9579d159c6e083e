//! Deterministic dependency-order resolution.
//!
//! Given a [`DependencyGraph`] of "must-come-before" constraints, produce one
//! linear order that satisfies all of them, or a [`CycleError`] naming the
//! nodes that cannot be ordered. Ties among ready nodes are broken by a
//! caller-supplied priority, then by the nodes' own order, so the same input
//! always yields the same output.
//!
//! ```
//! use ordo_core::graph::DependencyGraph;
//!
//! let graph: DependencyGraph<&str> = [("A", vec!["B", "C"]), ("B", vec!["D"]), ("C", vec!["D"])]
//!     .into_iter()
//!     .collect();
//! assert_eq!(ordo_resolver::sort(&graph).unwrap(), vec!["A", "B", "C", "D"]);
//! ```

pub mod budget;
pub mod cycle;
pub mod error;
mod index;
pub mod sorter;

pub use budget::Budget;
pub use cycle::CycleError;
pub use error::SortError;
pub use ordo_core::graph::DependencyGraph;
pub use ordo_core::priority::{MissingPriority, Priority};
pub use sorter::{GraphSorter, SortSteps};

/// Sort `graph`, breaking ties by node order alone.
pub fn sort<N: Ord + Clone>(graph: &DependencyGraph<N>) -> Result<Vec<N>, CycleError<N>> {
    GraphSorter::new(graph).sort()
}

/// Sort `graph`, preferring ready nodes with smaller keys from `priority`.
/// Nodes without a key are placed after keyed ones.
pub fn sort_by_priority<N, P>(
    graph: &DependencyGraph<N>,
    priority: P,
) -> Result<Vec<N>, CycleError<N>>
where
    N: Ord + Clone,
    P: Priority<N>,
{
    GraphSorter::new(graph).priority(priority).sort()
}
