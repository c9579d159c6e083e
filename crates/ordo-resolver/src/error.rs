use std::fmt;

use ordo_util::errors::OrdoError;
use thiserror::Error;

use crate::cycle::CycleError;

/// Failure of a budgeted sort.
///
/// The core algorithm only ever fails with a cycle; running out of budget is
/// reported by the layer that imposes the budget.
#[derive(Debug, Error)]
pub enum SortError<N> {
    #[error(transparent)]
    Cycle(#[from] CycleError<N>),

    #[error("sort budget of {limit} steps exhausted after placing {placed} node(s)")]
    ResourceExhausted { limit: u64, placed: usize },
}

impl<N> SortError<N> {
    pub fn as_cycle(&self) -> Option<&CycleError<N>> {
        match self {
            SortError::Cycle(err) => Some(err),
            SortError::ResourceExhausted { .. } => None,
        }
    }
}

impl<N: fmt::Debug> From<SortError<N>> for OrdoError {
    fn from(err: SortError<N>) -> Self {
        match err {
            SortError::Cycle(cycle) => cycle.into(),
            SortError::ResourceExhausted { limit, placed } => {
                OrdoError::ResourceExhausted { limit, placed }
            }
        }
    }
}
