use thiserror::Error;

/// Errors raised when a value violates the shape of a core type.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Row {row} has {found} cells but the header declares {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Column index {index} out of range (table has {columns} columns)")]
    ColumnOutOfRange { index: usize, columns: usize },
}
