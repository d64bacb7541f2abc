//! Error types for the iprecon-reconcile crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::table::TableError;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("No syslog file found in {}", .dir.display())]
    MissingSyslog { dir: PathBuf },

    #[error("Failed to load syslog file {}: {source}", .path.display())]
    SyslogLoad {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    #[error(
        "Failed to load device file {} as delimited text ({text}) or as a spreadsheet: {spreadsheet}",
        .path.display()
    )]
    DeviceLoad {
        path: PathBuf,
        text: TableError,
        #[source]
        spreadsheet: TableError,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Table error: {0}")]
    Table(#[from] iprecon_core::CoreError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
