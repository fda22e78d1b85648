//! Extract command implementation

use anyhow::{bail, Context, Result};
use pdb_core::Backend;
use pdb_db::{Database, DuckDbBackend, PostgresBackend};
use pdb_extract::Extractor;
use std::path::Path;
use std::sync::Arc;

use crate::cli::{ExtractArgs, GlobalArgs};
use crate::commands::common::{format_size, load_config};

/// Execute the extract command
pub async fn execute(args: &ExtractArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let backend = args.backend.map(Backend::from).unwrap_or(config.extract.backend);
    let output = args.output.as_deref().unwrap_or(&config.extract.output);

    let Some(url) = args.database_url.as_deref() else {
        bail!("No database connection given; pass --database-url or set DATABASE_URL");
    };

    println!("Connecting to {} database...", backend);
    let db = connect(backend, url).await?;

    let extractor = match args.date {
        Some(date) => Extractor::new().with_date(date),
        None => Extractor::new(),
    };

    println!("Extracting configuration data...");
    let extraction = extractor
        .run(db.as_ref())
        .await
        .context("Failed to extract configuration data")?;

    for (table, count) in &extraction.row_counts {
        println!("  ✓ {} ({} rows)", table, count);
    }

    std::fs::write(Path::new(output), &extraction.sql)
        .with_context(|| format!("Failed to write {output}"))?;

    println!();
    println!(
        "Configuration data written to {} ({})",
        output,
        format_size(extraction.sql.len())
    );
    Ok(())
}

/// Open the configured backend
async fn connect(backend: Backend, url: &str) -> Result<Arc<dyn Database>> {
    let db: Arc<dyn Database> = match backend {
        Backend::Postgres => Arc::new(
            PostgresBackend::connect(url)
                .await
                .context("Failed to connect to database")?,
        ),
        Backend::DuckDb => {
            Arc::new(DuckDbBackend::new(url).context("Failed to connect to database")?)
        }
    };
    log::debug!("Connected ({})", db.db_type());
    Ok(db)
}
