//! Configuration types and parsing for posdb.yml
//!
//! The config file only carries paths and the backend kind. The database
//! connection string is never read from here; it comes from the command
//! line or the `DATABASE_URL` environment variable.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File names searched for, in order, by [`Config::load_from_dir`]
pub const CONFIG_FILE_NAMES: [&str; 2] = ["posdb.yml", "posdb.yaml"];

/// Main configuration from posdb.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Settings for `posdb extract`
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Settings for `posdb merge`
    #[serde(default)]
    pub merge: MergeConfig,
}

/// Database backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// PostgreSQL (default)
    #[default]
    Postgres,
    /// DuckDB file or `:memory:`
    DuckDb,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Postgres => write!(f, "postgres"),
            Backend::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// Config extractor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractConfig {
    /// Backend used to read the configuration tables
    #[serde(default)]
    pub backend: Backend,

    /// Output file, relative to the working directory
    #[serde(default = "default_extract_output")]
    pub output: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            output: default_extract_output(),
        }
    }
}

/// SQL merger settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeConfig {
    /// Directory holding database.sql and the other POS SQL files
    #[serde(default = "default_db_dir")]
    pub db_dir: String,

    /// Directory holding the loyalty app's SQL changes
    #[serde(default = "default_loyalty_db_dir")]
    pub loyalty_db_dir: String,

    /// Directory the two merged files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            db_dir: default_db_dir(),
            loyalty_db_dir: default_loyalty_db_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl MergeConfig {
    /// Get the absolute db directory
    pub fn db_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.db_dir)
    }

    /// Get the absolute loyalty db directory
    pub fn loyalty_db_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.loyalty_db_dir)
    }

    /// Get the absolute output directory
    pub fn output_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.output_dir)
    }
}

fn default_extract_output() -> String {
    "config_data_from_production.sql".to_string()
}

fn default_db_dir() -> String {
    "db".to_string()
}

fn default_loyalty_db_dir() -> String {
    "loyalty-app/db".to_string()
}

fn default_output_dir() -> String {
    "db/temp".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for posdb.yml or posdb.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        Err(CoreError::ConfigNotFound {
            path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
        })
    }

    /// Like [`Config::load_from_dir`], but falls back to defaults when the
    /// directory has no config file. Parse errors are still reported.
    pub fn load_or_default(dir: &Path) -> CoreResult<Self> {
        match Self::load_from_dir(dir) {
            Err(CoreError::ConfigNotFound { path }) => {
                log::debug!("No config at {}, using defaults", path);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.extract.output.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "extract.output cannot be empty".to_string(),
            });
        }

        for (key, value) in [
            ("merge.db_dir", &self.merge.db_dir),
            ("merge.loyalty_db_dir", &self.merge.loyalty_db_dir),
            ("merge.output_dir", &self.merge.output_dir),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("{key} cannot be empty"),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
