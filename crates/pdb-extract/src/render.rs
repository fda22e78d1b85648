//! Rendering extracted rows as SQL text

use crate::tables::{InsertStyle, TableSpec};
use chrono::NaiveDate;
use pdb_core::{Row, SqlValue};

const RULE: &str =
    "-- =============================================================================";

/// Rows read for one table spec
#[derive(Debug, Clone)]
pub struct ExtractedTable {
    pub spec: TableSpec,
    pub rows: Vec<Row>,
}

/// Render the complete output file: header, then every table in order
pub fn render_document(date: NaiveDate, tables: &[ExtractedTable]) -> String {
    let mut out = format!(
        "{RULE}\n-- ESSENTIAL CONFIGURATION DATA FROM PRODUCTION DATABASE\n{RULE}\n\
         -- Extracted configuration to ensure 1-click deployment matches production\n\
         -- Date: {}\n",
        date.format("%Y-%m-%d")
    );

    for table in tables {
        out.push_str(&render_table(&table.spec, &table.rows));
    }
    out
}

/// Render one table block: banner, then statements in the table's insert style
pub fn render_table(spec: &TableSpec, rows: &[Row]) -> String {
    let mut out = format!("\n{RULE}\n-- {}\n{RULE}\n", spec.title);
    let table = spec.table.as_str();
    let columns = spec.column_list();

    match spec.style {
        InsertStyle::ReplaceAll {
            clear_comment,
            insert_comment,
            empty_comment,
        } => {
            out.push_str(&format!("-- {clear_comment}\nDELETE FROM {table};\n"));
            if rows.is_empty() {
                out.push_str(&format!("\n-- {empty_comment}\n"));
                return out;
            }
            out.push_str(&format!(
                "\n-- {insert_comment}\nINSERT INTO {table} ({columns}) VALUES\n"
            ));
            let values: Vec<String> = rows
                .iter()
                .map(|row| format!("({})", render_values(spec, row)))
                .collect();
            out.push_str(&values.join(",\n"));
            out.push_str(";\n");
        }
        InsertStyle::PerRow {
            comment,
            conflict,
            empty_comment,
        } => {
            if let Some(empty_comment) = empty_comment.filter(|_| rows.is_empty()) {
                out.push_str(&format!("\n-- {empty_comment}\n"));
                return out;
            }
            out.push_str(&format!("\n-- {comment}\n"));
            for row in rows {
                out.push_str(&format!(
                    "INSERT INTO {table} ({columns}) VALUES\n({})\n{conflict};\n\n",
                    render_values(spec, row)
                ));
            }
        }
        InsertStyle::IfTableEmpty { comment } => {
            if let Some(row) = rows.first() {
                out.push_str(&format!(
                    "\n-- {comment}\nINSERT INTO {table} ({columns}) \n\
                     SELECT {}\n\
                     WHERE NOT EXISTS (SELECT 1 FROM {table} LIMIT 1);\n",
                    render_values(spec, row)
                ));
            }
        }
    }
    out
}

/// Comma-joined literals for one row
fn render_values(spec: &TableSpec, row: &Row) -> String {
    row.iter()
        .zip(spec.columns)
        .map(|(value, column)| {
            if spec.is_jsonb(column) {
                jsonb_literal(value)
            } else {
                value.to_sql_literal()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn jsonb_literal(value: &SqlValue) -> String {
    let document = if value.is_blank() {
        SqlValue::from("{}")
    } else {
        SqlValue::from(value.as_text())
    };
    format!("{}::jsonb", document.to_sql_literal())
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
