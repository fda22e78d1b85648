use super::*;
use async_trait::async_trait;
use pdb_core::{Row, SqlValue};
use pdb_db::{DbError, DbResult, DuckDbBackend};

const SCHEMA: &str = "
CREATE TABLE system_settings (
    setting_key VARCHAR PRIMARY KEY,
    setting_value VARCHAR,
    setting_type VARCHAR,
    description VARCHAR,
    category VARCHAR,
    is_encrypted BOOLEAN,
    is_active BOOLEAN,
    created_by VARCHAR,
    updated_by VARCHAR
);
CREATE TABLE roles (
    name VARCHAR PRIMARY KEY,
    description VARCHAR,
    permissions VARCHAR,
    is_active BOOLEAN
);
CREATE TABLE payment_methods (
    name VARCHAR,
    code VARCHAR PRIMARY KEY,
    description VARCHAR,
    requires_online_payment BOOLEAN,
    display_order INTEGER,
    icon VARCHAR,
    is_active BOOLEAN
);
CREATE TABLE customer_tier_rules (
    tier_name VARCHAR,
    tier_level INTEGER PRIMARY KEY,
    min_spending DECIMAL(10, 2),
    min_visits INTEGER,
    min_points INTEGER,
    points_multiplier DOUBLE
);
CREATE TABLE locations (
    name VARCHAR,
    address VARCHAR,
    phone VARCHAR,
    email VARCHAR,
    is_active BOOLEAN
);
";

const SEED: &str = "
INSERT INTO system_settings VALUES
    ('currency', 'USD', 'string', 'Store currency', 'general', false, true, NULL, NULL),
    ('api_key', 'x''y', 'string', NULL, 'integrations', true, true, 'admin', 'admin');
INSERT INTO roles VALUES
    ('Admin', 'Full access', '{\"all\": true}', true),
    ('Cashier', NULL, NULL, true);
INSERT INTO payment_methods VALUES
    ('Card', 'card', 'Credit card', true, 2, 'card-icon', true),
    ('Cash', 'cash', NULL, false, 1, 'cash-icon', true);
INSERT INTO locations VALUES
    ('Main Store', '1 Market St', NULL, 'store@example.com', true);
";

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 13).unwrap()
}

async fn seeded_db() -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(SCHEMA).await.unwrap();
    db.execute_batch(SEED).await.unwrap();
    db
}

#[tokio::test]
async fn test_extract_from_duckdb() {
    let db = seeded_db().await;
    let extraction = Extractor::new().with_date(date()).run(&db).await.unwrap();

    assert!(extraction.sql.contains("-- Date: 2025-11-13"));
    assert!(extraction.sql.contains(
        "('currency', 'USD', 'string', 'Store currency', 'general', false, true, NULL, NULL),\n\
         ('api_key', 'x''y', 'string', NULL, 'integrations', true, true, 'admin', 'admin');\n"
    ));
    assert!(extraction
        .sql
        .contains("('Cashier', NULL, '{}'::jsonb, true)\nON CONFLICT (name) DO NOTHING;"));

    let cash = extraction.sql.find("'cash-icon'").unwrap();
    let card = extraction.sql.find("'card-icon'").unwrap();
    assert!(cash < card, "payment methods follow display_order");
}

#[tokio::test]
async fn test_empty_tier_rules_comment() {
    let db = seeded_db().await;
    let extraction = Extractor::new().with_date(date()).run(&db).await.unwrap();

    assert!(extraction
        .sql
        .contains("-- No customer tier rules found in database"));
    assert!(!extraction.sql.contains("INSERT INTO customer_tier_rules"));
}

#[tokio::test]
async fn test_row_counts() {
    let db = seeded_db().await;
    let extraction = Extractor::new().with_date(date()).run(&db).await.unwrap();

    assert_eq!(
        extraction.row_counts,
        vec![
            (EssentialTable::SystemSettings, 2),
            (EssentialTable::Roles, 2),
            (EssentialTable::PaymentMethods, 2),
            (EssentialTable::CustomerTierRules, 0),
            (EssentialTable::Locations, 1),
        ]
    );
}

#[tokio::test]
async fn test_generated_sql_recreates_rows() {
    let source = seeded_db().await;
    source
        .execute_batch(
            "INSERT INTO customer_tier_rules VALUES \
             ('Silver', 1, 100.00, 2, 50, 1.0), ('Gold', 2, 1000.50, 10, 500, 1.5);",
        )
        .await
        .unwrap();
    let extraction = Extractor::new().with_date(date()).run(&source).await.unwrap();

    let target = DuckDbBackend::in_memory().unwrap();
    target.execute_batch(SCHEMA).await.unwrap();
    // DuckDB has no jsonb type; the permissions column is plain text here.
    target
        .execute_batch(&extraction.sql.replace("::jsonb", ""))
        .await
        .unwrap();

    for spec in CONFIG_TABLES {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {}",
            spec.column_list(),
            spec.table,
            spec.columns[0]
        );
        let expected = source.query_rows(&sql).await.unwrap();
        let actual = target.query_rows(&sql).await.unwrap();
        if spec.table == EssentialTable::Roles {
            // NULL permissions come back as the '{}' default
            assert_eq!(actual[1][2], SqlValue::Text("{}".to_string()));
            assert_eq!(actual[0], expected[0]);
        } else {
            assert_eq!(actual, expected, "table {}", spec.table);
        }
    }
}

#[tokio::test]
async fn test_location_not_duplicated_on_rerun() {
    let source = seeded_db().await;
    let extraction = Extractor::new().with_date(date()).run(&source).await.unwrap();

    let sql = extraction.sql.replace("::jsonb", "");
    source.execute_batch(&sql).await.unwrap();

    let rows = source
        .query_rows("SELECT count(*) FROM locations")
        .await
        .unwrap();
    assert_eq!(rows, vec![vec![SqlValue::Int(1)]]);
}

struct FailingDb;

#[async_trait]
impl Database for FailingDb {
    async fn execute_batch(&self, _sql: &str) -> DbResult<()> {
        Ok(())
    }

    async fn query_rows(&self, _sql: &str) -> DbResult<Vec<Row>> {
        Err(DbError::ExecutionError("relation does not exist".to_string()))
    }

    fn db_type(&self) -> &'static str {
        "failing"
    }
}

#[tokio::test]
async fn test_query_failure_aborts() {
    let err = Extractor::new().run(&FailingDb).await.unwrap_err();
    match err {
        ExtractError::Query { table, .. } => assert_eq!(table, "system_settings"),
        other => panic!("unexpected error: {other}"),
    }
}

struct NarrowDb;

#[async_trait]
impl Database for NarrowDb {
    async fn execute_batch(&self, _sql: &str) -> DbResult<()> {
        Ok(())
    }

    async fn query_rows(&self, _sql: &str) -> DbResult<Vec<Row>> {
        Ok(vec![vec![SqlValue::Int(1)]])
    }

    fn db_type(&self) -> &'static str {
        "narrow"
    }
}

#[tokio::test]
async fn test_row_shape_mismatch() {
    let err = Extractor::new().run(&NarrowDb).await.unwrap_err();
    assert!(matches!(
        err,
        ExtractError::RowShape {
            expected: 9,
            found: 1,
            ..
        }
    ));
}

struct RecordingDb {
    inner: DuckDbBackend,
    single_row_reads: std::sync::Mutex<Vec<String>>,
}

#[async_trait]
impl Database for RecordingDb {
    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.inner.execute_batch(sql).await
    }

    async fn query_rows(&self, sql: &str) -> DbResult<Vec<Row>> {
        self.inner.query_rows(sql).await
    }

    async fn query_optional(&self, sql: &str) -> DbResult<Option<Row>> {
        self.single_row_reads.lock().unwrap().push(sql.to_string());
        self.inner.query_optional(sql).await
    }

    fn db_type(&self) -> &'static str {
        "recording"
    }
}

#[tokio::test]
async fn test_default_location_read_as_single_row() {
    let db = RecordingDb {
        inner: seeded_db().await,
        single_row_reads: std::sync::Mutex::new(Vec::new()),
    };
    db.execute_batch("INSERT INTO locations VALUES ('Annex', NULL, NULL, NULL, false);")
        .await
        .unwrap();

    let extraction = Extractor::new().with_date(date()).run(&db).await.unwrap();

    let reads = db.single_row_reads.lock().unwrap().clone();
    assert_eq!(
        reads,
        vec!["SELECT name, address, phone, email, is_active FROM locations LIMIT 1".to_string()]
    );
    assert_eq!(extraction.row_counts[4], (EssentialTable::Locations, 1));
    assert_eq!(extraction.sql.matches("INSERT INTO locations").count(), 1);
}
