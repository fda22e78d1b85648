//! Integration tests for the posdb binary

use pdb_db::{Database, DuckDbBackend};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn posdb_bin() -> String {
    env!("CARGO_BIN_EXE_posdb").to_string()
}

const SAMPLE_PROJECT: &str = "tests/fixtures/sample_project";

fn run_merge(output_dir: &Path) -> std::process::Output {
    Command::new(posdb_bin())
        .args([
            "merge",
            "--project-dir",
            SAMPLE_PROJECT,
            "--output-dir",
            output_dir.to_str().unwrap(),
        ])
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run posdb merge")
}

#[test]
fn test_merge_sample_project() {
    let out = TempDir::new().unwrap();
    let output = run_merge(out.path());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "merge failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Created:"), "stdout: {stdout}");

    let schema = std::fs::read_to_string(out.path().join("database.sql")).unwrap();
    let sample = std::fs::read_to_string(out.path().join("load_sample_data.sql")).unwrap();

    assert!(schema.contains("INSERT INTO roles (name, permissions) VALUES ('Admin'"));
    assert!(schema.contains("INSERT INTO system_settings"));
    assert!(schema.contains("CREATE TABLE loyalty_tiers"));
    assert!(schema.contains("SHOP SYSTEM TABLES"));
    assert!(schema.contains("salesforce_id"));
    assert!(!schema.contains("LEAK-1"));
    assert!(!schema.contains("SKU-001"));
    assert!(!schema.contains("ORD-1"));
    assert_eq!(schema.matches("INSERT INTO users").count(), 1);

    assert!(sample.contains("INSERT INTO products (sku) VALUES ('SKU-001');"));
    assert!(sample.contains("ORD-1"));
    assert!(!sample.contains("'Admin'"));
    assert!(!sample.contains("ADDITIONAL SAMPLE DATA"));
}

#[test]
fn test_merge_is_deterministic() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    assert!(run_merge(first.path()).status.success());
    assert!(run_merge(second.path()).status.success());

    for name in ["database.sql", "load_sample_data.sql"] {
        let a = std::fs::read(first.path().join(name)).unwrap();
        let b = std::fs::read(second.path().join(name)).unwrap();
        assert_eq!(a, b, "{name} differs between runs");
    }
}

#[test]
fn test_merge_missing_database_file_fails() {
    let project = TempDir::new().unwrap();
    let output = Command::new(posdb_bin())
        .args(["merge", "--project-dir", project.path().to_str().unwrap()])
        .output()
        .expect("Failed to run posdb merge");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[M001]"), "stderr: {stderr}");
    assert!(!project.path().join("db/temp").exists());
}

#[test]
fn test_merge_missing_required_section_fails() {
    let project = TempDir::new().unwrap();
    std::fs::create_dir_all(project.path().join("db")).unwrap();
    std::fs::write(
        project.path().join("db/database.sql"),
        "-- DROP ALL EXISTING OBJECTS\nDROP TABLE x;\n",
    )
    .unwrap();

    let output = Command::new(posdb_bin())
        .args(["merge", "--project-dir", project.path().to_str().unwrap()])
        .output()
        .expect("Failed to run posdb merge");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[M002]"), "stderr: {stderr}");
}

async fn seed_duckdb(path: &Path) {
    let db = DuckDbBackend::from_path(path).unwrap();
    let schema = std::fs::read_to_string("tests/fixtures/config_schema.sql").unwrap();
    db.execute_batch(&schema).await.unwrap();
}

#[tokio::test]
async fn test_extract_from_duckdb_file() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("pos.duckdb");
    seed_duckdb(&db_path).await;
    let out_path = dir.path().join("config.sql");

    let output = Command::new(posdb_bin())
        .args([
            "extract",
            "--backend",
            "duckdb",
            "--database-url",
            db_path.to_str().unwrap(),
            "--date",
            "2025-11-13",
            "-o",
            out_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to run posdb extract");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "extract failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("✓ roles (1 rows)"), "stdout: {stdout}");
    assert!(stdout.contains("✓ customer_tier_rules (1 rows)"), "stdout: {stdout}");

    let sql = std::fs::read_to_string(&out_path).unwrap();
    assert!(sql.contains("-- Date: 2025-11-13"));
    assert!(sql.contains("DELETE FROM system_settings;"));
    assert!(sql.contains("'{\"all\": true}'::jsonb"));
    assert!(sql.contains("ON CONFLICT (code) DO UPDATE SET"));
    assert!(sql.contains("ON CONFLICT (tier_level) DO NOTHING"));
    assert!(sql.contains("WHERE NOT EXISTS (SELECT 1 FROM locations LIMIT 1)"));
}

#[tokio::test]
async fn test_extract_reads_backend_from_config() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("pos.duckdb");
    seed_duckdb(&db_path).await;
    std::fs::write(
        dir.path().join("posdb.yml"),
        "extract:\n  backend: duckdb\n  output: from_config.sql\n",
    )
    .unwrap();

    let output = Command::new(posdb_bin())
        .current_dir(dir.path())
        .args(["extract"])
        .env("DATABASE_URL", db_path.to_str().unwrap())
        .output()
        .expect("Failed to run posdb extract");

    assert!(
        output.status.success(),
        "extract failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(dir.path().join("from_config.sql").exists());
}

#[test]
fn test_extract_without_connection_fails() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(posdb_bin())
        .current_dir(dir.path())
        .args(["extract", "--backend", "duckdb"])
        .env_remove("DATABASE_URL")
        .output()
        .expect("Failed to run posdb extract");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DATABASE_URL"), "stderr: {stderr}");
    assert!(!dir.path().join("config_data_from_production.sql").exists());
}

#[test]
fn test_extract_missing_table_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("empty.duckdb");
    let out_path = dir.path().join("config.sql");

    let output = Command::new(posdb_bin())
        .args([
            "extract",
            "--backend",
            "duckdb",
            "--database-url",
            db_path.to_str().unwrap(),
            "-o",
            out_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to run posdb extract");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[X001]"), "stderr: {stderr}");
    assert!(!out_path.exists());
}
