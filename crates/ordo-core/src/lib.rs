//! Core data types for the Ordo dependency-order resolver.
//!
//! This crate defines the inputs the resolver consumes: the dependency graph
//! itself, the sources a caller can draw priorities from, the policy for
//! nodes that have no priority, and the options that configure a sort.
//!
//! This crate is intentionally free of I/O. Nodes are opaque to it; all it
//! needs is a total order on them.

pub mod graph;
pub mod options;
pub mod priority;
