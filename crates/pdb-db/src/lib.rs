//! pdb-db - Database abstraction layer for posdb
//!
//! This crate provides the `Database` trait and implementations for
//! PostgreSQL (the production configuration database) and DuckDB (local
//! files and tests).

pub mod duckdb;
pub mod error;
pub mod postgres;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use postgres::PostgresBackend;
pub use traits::Database;
