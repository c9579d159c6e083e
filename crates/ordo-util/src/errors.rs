use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all Ordo operations.
///
/// The resolver's own errors are generic over the caller's node type; they
/// convert into this enum by rendering nodes with `Debug`, so embedding tools
/// can surface them through `miette`.
#[derive(Debug, Error, Diagnostic)]
pub enum OrdoError {
    /// The constraint set contains a cycle and cannot be linearized.
    #[error("Dependency cycle: {count} node(s) could not be ordered: {nodes}")]
    #[diagnostic(
        code(ordo::cycle),
        help("Break or reverse one of the constraints between the listed nodes and sort again")
    )]
    Cycle { count: usize, nodes: String },

    /// A bounded sort ran out of its step budget.
    #[error("Sort budget exhausted after {limit} steps ({placed} node(s) placed)")]
    #[diagnostic(
        code(ordo::budget),
        help("Raise `max-steps` or sort a smaller graph")
    )]
    ResourceExhausted { limit: u64, placed: usize },

    /// Invalid or malformed sorter options.
    #[error("Options error: {message}")]
    #[diagnostic(help("Check the option keys: `missing-priority` and `max-steps`"))]
    Options { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type OrdoResult<T> = miette::Result<T>;
