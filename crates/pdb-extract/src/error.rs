//! Error types for pdb-extract

use pdb_db::DbError;
use thiserror::Error;

/// Configuration extraction errors
#[derive(Error, Debug)]
pub enum ExtractError {
    /// X001: Query against the source database failed
    #[error("[X001] Failed to read '{table}': {source}")]
    Query { table: String, source: DbError },

    /// X002: A row came back with the wrong number of columns
    #[error("[X002] Table '{table}' returned {found} columns, expected {expected}")]
    RowShape {
        table: String,
        expected: usize,
        found: usize,
    },
}

/// Result type alias for ExtractError
pub type ExtractResult<T> = Result<T, ExtractError>;
