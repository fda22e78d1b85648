//! Error types for pdb-merge

use thiserror::Error;

/// SQL merge errors
#[derive(Error, Debug)]
pub enum MergeError {
    /// M001: A required input file does not exist
    #[error("[M001] Required input not found: {path}")]
    MissingInput { path: String },

    /// M002: A required section marker is absent from the schema file
    #[error("[M002] Section '{section}' not found: missing marker '{marker}'")]
    MissingSection {
        section: &'static str,
        marker: &'static str,
    },

    /// M003: IO error with file path context
    #[error("[M003] IO error on '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for MergeError
pub type MergeResult<T> = Result<T, MergeError>;
