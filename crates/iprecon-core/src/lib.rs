//! iprecon-core: Shared types and error handling for the IP reconciler.
//!
//! This crate provides the foundational types used by the reconciliation
//! pipeline:
//! - `Table`, an all-text, header-first tabular representation
//! - `IpSet`, a deduplicated, lexicographically ordered set of address tokens
//! - `Reconciliation`, the extracted/matched/unmatched partition
//! - Common error types

pub mod error;
pub mod types;

pub use error::CoreError;
pub use types::{IpSet, Reconciliation, Table};
