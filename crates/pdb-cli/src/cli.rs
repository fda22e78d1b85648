//! CLI argument definitions using clap derive API

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use pdb_core::Backend;

/// posdb - configuration extraction and SQL merging for the POS/loyalty database
#[derive(Parser, Debug)]
#[command(name = "posdb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dump configuration tables as INSERT statements
    Extract(ExtractArgs),

    /// Merge the SQL files into a schema file and a sample data file
    Merge(MergeArgs),
}

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Connection string (PostgreSQL URL, or a file path for DuckDB)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Override the database backend
    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Override the output file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Date written in the file header (default: today, UTC)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Database backends selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendArg {
    Postgres,
    Duckdb,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Postgres => Backend::Postgres,
            BackendArg::Duckdb => Backend::DuckDb,
        }
    }
}

/// Arguments for the merge command
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Override the directory holding database.sql
    #[arg(long)]
    pub db_dir: Option<String>,

    /// Override the loyalty app db directory
    #[arg(long)]
    pub loyalty_db_dir: Option<String>,

    /// Override the output directory
    #[arg(short, long)]
    pub output_dir: Option<String>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
