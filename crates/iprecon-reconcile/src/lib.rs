//! iprecon-reconcile: Extract IPv4 addresses from a syslog export and
//! reconcile them against a device inventory.
//!
//! Finds the inputs in a working directory, scans every syslog row for
//! dotted-quad tokens, and writes the extracted, matched (known device) and
//! unmatched address tables.

pub mod config;
pub mod discover;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod output;
pub mod pipeline;
pub mod table;

pub use error::ReconcileError;
pub use pipeline::{run, RunReport};
