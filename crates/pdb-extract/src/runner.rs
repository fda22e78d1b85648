//! Extraction execution

use crate::error::{ExtractError, ExtractResult};
use crate::render::{render_document, ExtractedTable};
use crate::tables::{TableSpec, CONFIG_TABLES};
use chrono::{NaiveDate, Utc};
use pdb_core::{EssentialTable, Row};
use pdb_db::{Database, DbResult};

/// Result of a completed extraction
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The generated SQL file contents
    pub sql: String,

    /// Rows read per table, in output order
    pub row_counts: Vec<(EssentialTable, usize)>,
}

/// Reads the configuration tables and renders them as SQL
#[derive(Debug, Clone)]
pub struct Extractor {
    date: NaiveDate,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// Create an extractor stamped with today's UTC date
    pub fn new() -> Self {
        Self {
            date: Utc::now().date_naive(),
        }
    }

    /// Pin the date written in the file header
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Query every configuration table and render the output file.
    ///
    /// The first failing query aborts the whole extraction.
    pub async fn run(&self, db: &dyn Database) -> ExtractResult<Extraction> {
        let mut tables = Vec::with_capacity(CONFIG_TABLES.len());

        for spec in CONFIG_TABLES {
            let table = read_table(db, spec).await?;
            log::debug!(
                "Read {} rows from {} ({})",
                table.rows.len(),
                spec.table,
                db.db_type()
            );
            tables.push(table);
        }

        let row_counts = tables
            .iter()
            .map(|t| (t.spec.table, t.rows.len()))
            .collect();

        Ok(Extraction {
            sql: render_document(self.date, &tables),
            row_counts,
        })
    }
}

async fn read_table(db: &dyn Database, spec: TableSpec) -> ExtractResult<ExtractedTable> {
    let sql = spec.select_sql();
    let result: DbResult<Vec<Row>> = if spec.limit == Some(1) {
        db.query_optional(&sql).await.map(|row| row.into_iter().collect())
    } else {
        db.query_rows(&sql).await
    };
    let rows: Vec<Row> = result.map_err(|source| ExtractError::Query {
        table: spec.table.to_string(),
        source,
    })?;

    if let Some(row) = rows.iter().find(|r| r.len() != spec.columns.len()) {
        return Err(ExtractError::RowShape {
            table: spec.table.to_string(),
            expected: spec.columns.len(),
            found: row.len(),
        });
    }

    Ok(ExtractedTable { spec, rows })
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
