//! pdb-core - Core library for posdb
//!
//! This crate provides the configuration file, SQL literal rendering for
//! values read from the database, and the essential-table set that decides
//! whether an `INSERT` line is configuration or sample data.

pub mod config;
pub mod error;
pub mod essential;
pub mod sql_value;

pub use config::{Backend, Config, ExtractConfig, MergeConfig};
pub use error::{CoreError, CoreResult};
pub use essential::{classify_insert, is_sample_insert, EssentialTable, InsertKind};
pub use sql_value::{escape_sql_string, Row, SqlValue};
