//! PostgreSQL database backend implementation
//!
//! Uses a single-connection sqlx pool. Booleans, numbers and JSON are
//! decoded by their Postgres type name; every other type is read as text.

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use pdb_core::{Row, SqlValue};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::types::BigDecimal;
use sqlx::{Column, Row as _, TypeInfo};
use std::time::Duration;

/// PostgreSQL database backend
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    /// Connect using a `postgres://` connection string
    pub async fn connect(url: &str) -> DbResult<Self> {
        log::debug!("Opening PostgreSQL connection");
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .connect(url)
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl Database for PostgresBackend {
    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        sqlx::raw_sql(sql).execute(&self.pool).await?;
        Ok(())
    }

    /// Runs over the simple query protocol, so every column arrives in
    /// text format and types without a dedicated decoder read as text.
    async fn query_rows(&self, sql: &str) -> DbResult<Vec<Row>> {
        let rows = sqlx::raw_sql(sql).fetch_all(&self.pool).await?;
        rows.iter().map(decode_row).collect()
    }

    fn db_type(&self) -> &'static str {
        "postgres"
    }
}

/// How a Postgres column is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Bool,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Numeric,
    Json,
    Text,
}

/// Map a Postgres type name onto its decoder. Unknown types are text.
fn column_kind(type_name: &str) -> ColumnKind {
    match type_name {
        "BOOL" => ColumnKind::Bool,
        "INT2" => ColumnKind::Int2,
        "INT4" => ColumnKind::Int4,
        "INT8" => ColumnKind::Int8,
        "FLOAT4" => ColumnKind::Float4,
        "FLOAT8" => ColumnKind::Float8,
        "NUMERIC" => ColumnKind::Numeric,
        "JSON" | "JSONB" => ColumnKind::Json,
        _ => ColumnKind::Text,
    }
}

fn decode_row(row: &PgRow) -> DbResult<Row> {
    (0..row.columns().len())
        .map(|idx| decode_column(row, idx))
        .collect()
}

fn decode_column(row: &PgRow, idx: usize) -> DbResult<SqlValue> {
    let kind = column_kind(row.columns()[idx].type_info().name());

    let value: SqlValue = match kind {
        ColumnKind::Bool => row.try_get::<Option<bool>, _>(idx)?.into(),
        ColumnKind::Int2 => row.try_get::<Option<i16>, _>(idx)?.map(i64::from).into(),
        ColumnKind::Int4 => row.try_get::<Option<i32>, _>(idx)?.map(i64::from).into(),
        ColumnKind::Int8 => row.try_get::<Option<i64>, _>(idx)?.into(),
        ColumnKind::Float4 => row.try_get::<Option<f32>, _>(idx)?.map(f64::from).into(),
        ColumnKind::Float8 => row.try_get::<Option<f64>, _>(idx)?.into(),
        ColumnKind::Numeric => row
            .try_get::<Option<BigDecimal>, _>(idx)?
            .map_or(SqlValue::Null, |d| SqlValue::Numeric(d.to_string())),
        ColumnKind::Json => row
            .try_get::<Option<serde_json::Value>, _>(idx)?
            .map_or(SqlValue::Null, SqlValue::Json),
        ColumnKind::Text => row.try_get_unchecked::<Option<String>, _>(idx)?.into(),
    };
    Ok(value)
}
