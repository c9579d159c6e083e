//! Step budgets for callers that need bounded latency.
//!
//! The ceiling is enforced between steps of [`SortSteps`](crate::sorter::SortSteps),
//! outside the algorithm itself.

use ordo_core::priority::Priority;

use crate::error::SortError;
use crate::sorter::GraphSorter;

/// Ceiling on the work a sort may do: one step per placed node and one per
/// consumed edge. A complete sort of `V` nodes and `E` edges takes `V + E`.
///
/// Only the placement loop is counted. Building the index beforehand
/// (`O(V log V + E)`, one priority lookup per node) always runs in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    pub max_steps: u64,
}

impl Budget {
    pub fn steps(max_steps: u64) -> Self {
        Self { max_steps }
    }
}

impl<N, P> GraphSorter<'_, N, P>
where
    N: Ord + Clone,
    P: Priority<N>,
{
    /// Sort, giving up with [`SortError::ResourceExhausted`] once `budget`
    /// is exceeded.
    pub fn sort_within(&self, budget: Budget) -> Result<Vec<N>, SortError<N>> {
        let mut steps = self.steps();
        let mut order = Vec::with_capacity(steps.remaining());
        while let Some(node) = steps.next() {
            order.push(node);
            if steps.steps_taken() > budget.max_steps {
                tracing::warn!(
                    limit = budget.max_steps,
                    placed = order.len(),
                    remaining = steps.remaining(),
                    "Sort budget exhausted"
                );
                return Err(SortError::ResourceExhausted {
                    limit: budget.max_steps,
                    placed: order.len(),
                });
            }
        }
        steps.finish()?;
        Ok(order)
    }

    /// Sort under the configured step ceiling, or unbounded if none is set.
    pub fn resolve(&self) -> Result<Vec<N>, SortError<N>> {
        match self.budget() {
            Some(budget) => self.sort_within(budget),
            None => Ok(self.sort()?),
        }
    }
}
