//! pdb-extract - Configuration extraction for posdb
//!
//! Reads the fixed set of configuration tables from a live database and
//! renders them back as `DELETE`/`INSERT`/`ON CONFLICT` SQL that recreates
//! the same configuration on a fresh deployment.

pub mod error;
pub mod render;
pub mod runner;
pub mod tables;

pub use error::{ExtractError, ExtractResult};
pub use render::{render_document, render_table, ExtractedTable};
pub use runner::{Extraction, Extractor};
pub use tables::{InsertStyle, TableSpec, CONFIG_TABLES};
