//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;
use pdb_core::Row;

/// Database abstraction trait for posdb
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Run a query and return every row, columns in SELECT order
    async fn query_rows(&self, sql: &str) -> DbResult<Vec<Row>>;

    /// Run a query and return the first row, if any
    async fn query_optional(&self, sql: &str) -> DbResult<Option<Row>> {
        Ok(self.query_rows(sql).await?.into_iter().next())
    }

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
