//! SQL literal values
//!
//! Values read back from the database and rendered as SQL literals for
//! generated `INSERT` statements.

use std::fmt;

/// A single column value read from a database row
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL NULL
    Null,
    /// Boolean, rendered as bare `true`/`false`
    Bool(bool),
    /// Any integer column
    Int(i64),
    /// Floating point column
    Float(f64),
    /// Exact numeric (DECIMAL/NUMERIC) kept in its textual form
    Numeric(String),
    /// Text and anything without a dedicated variant (dates, uuids, ...)
    Text(String),
    /// JSON/JSONB document
    Json(serde_json::Value),
}

/// One result row, in SELECT column order
pub type Row = Vec<SqlValue>;

impl SqlValue {
    /// Render the value as a SQL literal.
    ///
    /// # Examples
    /// ```
    /// use pdb_core::SqlValue;
    /// assert_eq!(SqlValue::Null.to_sql_literal(), "NULL");
    /// assert_eq!(SqlValue::Bool(true).to_sql_literal(), "true");
    /// assert_eq!(SqlValue::Int(42).to_sql_literal(), "42");
    /// assert_eq!(SqlValue::Text("O'Brien".into()).to_sql_literal(), "'O''Brien'");
    /// ```
    pub fn to_sql_literal(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Bool(b) => b.to_string(),
            SqlValue::Int(n) => n.to_string(),
            SqlValue::Float(f) => float_literal(*f),
            SqlValue::Numeric(s) => s.clone(),
            SqlValue::Text(s) => quote_string(s),
            SqlValue::Json(v) => quote_string(&v.to_string()),
        }
    }

    /// Whether the value carries no content: NULL, empty text, or an empty
    /// JSON document.
    pub fn is_blank(&self) -> bool {
        match self {
            SqlValue::Null => true,
            SqlValue::Text(s) => s.is_empty(),
            SqlValue::Json(serde_json::Value::Null) => true,
            SqlValue::Json(serde_json::Value::Object(map)) => map.is_empty(),
            SqlValue::Json(serde_json::Value::Array(items)) => items.is_empty(),
            SqlValue::Json(serde_json::Value::String(s)) => s.is_empty(),
            _ => false,
        }
    }

    /// The value as document text, without SQL quoting. NULL becomes "".
    pub fn as_text(&self) -> String {
        match self {
            SqlValue::Null => String::new(),
            SqlValue::Text(s) | SqlValue::Numeric(s) => s.clone(),
            SqlValue::Json(v) => v.to_string(),
            SqlValue::Bool(b) => b.to_string(),
            SqlValue::Int(n) => n.to_string(),
            SqlValue::Float(f) => format!("{f:?}"),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql_literal())
    }
}

impl From<bool> for SqlValue {
    fn from(b: bool) -> Self {
        SqlValue::Bool(b)
    }
}

impl From<i64> for SqlValue {
    fn from(n: i64) -> Self {
        SqlValue::Int(n)
    }
}

impl From<f64> for SqlValue {
    fn from(f: f64) -> Self {
        SqlValue::Float(f)
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::Text(s)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

/// Escape a SQL string literal value by doubling single quotes.
///
/// This is for use inside single-quoted SQL string literals, not identifiers.
pub fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

fn quote_string(value: &str) -> String {
    format!("'{}'", escape_sql_string(value))
}

// Debug formatting keeps the decimal point (`2.0`), which Display drops.
fn float_literal(f: f64) -> String {
    if f.is_nan() {
        "'NaN'".to_string()
    } else if f.is_infinite() {
        if f > 0.0 {
            "'Infinity'".to_string()
        } else {
            "'-Infinity'".to_string()
        }
    } else {
        format!("{f:?}")
    }
}

#[cfg(test)]
#[path = "sql_value_test.rs"]
mod tests;
