//! Shared utilities for the Ordo dependency-order resolver.
//!
//! This crate provides the cross-cutting error type used by the other Ordo
//! crates and by tools that embed them.

pub mod errors;
