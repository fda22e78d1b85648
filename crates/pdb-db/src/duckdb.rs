//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta};
use duckdb::types::{TimeUnit, Value};
use duckdb::Connection;
use pdb_core::{Row, SqlValue};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute batch SQL synchronously
    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    /// Query rows synchronously.
    ///
    /// DuckDB panics on `stmt.column_count()` before execution, so the
    /// column count is read from each row instead.
    fn query_rows_sync(&self, sql: &str) -> DbResult<Vec<Row>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;

        let raw_rows: Vec<Vec<Value>> = stmt
            .query_map([], |row| {
                let col_count = row.as_ref().column_count();
                (0..col_count).map(|i| row.get::<_, Value>(i)).collect()
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(raw_rows
            .into_iter()
            .map(|values| values.into_iter().map(convert_value).collect())
            .collect())
    }
}

/// Map a DuckDB value onto the literal model.
///
/// Anything that is not NULL, a boolean or a number is carried as text.
fn convert_value(value: Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Boolean(b) => b.into(),
        Value::TinyInt(n) => i64::from(n).into(),
        Value::SmallInt(n) => i64::from(n).into(),
        Value::Int(n) => i64::from(n).into(),
        Value::BigInt(n) => n.into(),
        Value::UTinyInt(n) => i64::from(n).into(),
        Value::USmallInt(n) => i64::from(n).into(),
        Value::UInt(n) => i64::from(n).into(),
        Value::UBigInt(n) => i64::try_from(n)
            .map_or_else(|_| SqlValue::Numeric(n.to_string()), SqlValue::Int),
        Value::HugeInt(n) => i64::try_from(n)
            .map_or_else(|_| SqlValue::Numeric(n.to_string()), SqlValue::Int),
        Value::Float(f) => f64::from(f).into(),
        Value::Double(f) => f.into(),
        Value::Decimal(d) => SqlValue::Numeric(d.to_string()),
        Value::Text(s) | Value::Enum(s) => s.into(),
        other => value_text(&other).into(),
    }
}

/// Text form of a non-scalar value, in PostgreSQL input syntax
fn value_text(value: &Value) -> String {
    match value {
        // Days since 1970-01-01, the NaiveDate default
        Value::Date32(days) => NaiveDate::default()
            .checked_add_signed(TimeDelta::days(i64::from(*days)))
            .map_or_else(|| days.to_string(), |d| d.format("%Y-%m-%d").to_string()),
        Value::Timestamp(unit, n) => DateTime::from_timestamp_micros(to_micros(*unit, *n))
            .map_or_else(
                || n.to_string(),
                |t| t.naive_utc().format("%Y-%m-%d %H:%M:%S%.f").to_string(),
            ),
        Value::Time64(unit, n) => {
            let micros = to_micros(*unit, *n);
            u32::try_from(micros.div_euclid(1_000_000))
                .ok()
                .and_then(|secs| {
                    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
                    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
                })
                .map_or_else(|| n.to_string(), |t| t.format("%H:%M:%S%.f").to_string())
        }
        Value::Interval {
            months,
            days,
            nanos,
        } => format!(
            "{months} months {days} days {} microseconds",
            nanos / 1_000
        ),
        Value::Blob(bytes) => {
            let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
            format!("\\x{hex}")
        }
        Value::List(items) | Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(array_element).collect();
            format!("{{{}}}", parts.join(","))
        }
        Value::Union(inner) => convert_value(inner.as_ref().clone()).as_text(),
        other => format!("{other:?}"),
    }
}

/// One element of a PostgreSQL array literal; text is double-quoted
fn array_element(value: &Value) -> String {
    match convert_value(value.clone()) {
        SqlValue::Null => "NULL".to_string(),
        SqlValue::Text(s) if !matches!(value, Value::List(_) | Value::Array(_)) => {
            format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
        }
        other => other.as_text(),
    }
}

fn to_micros(unit: TimeUnit, n: i64) -> i64 {
    match unit {
        TimeUnit::Second => n.saturating_mul(1_000_000),
        TimeUnit::Millisecond => n.saturating_mul(1_000),
        TimeUnit::Microsecond => n,
        TimeUnit::Nanosecond => n / 1_000,
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn query_rows(&self, sql: &str) -> DbResult<Vec<Row>> {
        self.query_rows_sync(sql)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
