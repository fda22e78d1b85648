//! Loading the merge input files

use crate::error::{MergeError, MergeResult};
use pdb_core::MergeConfig;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// The files the merger reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFile {
    /// Main POS schema with all named sections
    Database,
    /// Loyalty app schema changes
    LoyaltyChanges,
    ShopSystem,
    SalesforceColumns,
    PaymentIcons,
    /// Hand-maintained sample data appended to the sample output
    SampleData,
}

impl InputFile {
    pub const ALL: [InputFile; 6] = [
        InputFile::Database,
        InputFile::LoyaltyChanges,
        InputFile::ShopSystem,
        InputFile::SalesforceColumns,
        InputFile::PaymentIcons,
        InputFile::SampleData,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            InputFile::Database => "database.sql",
            InputFile::LoyaltyChanges => "loyalty-database-changes.sql",
            InputFile::ShopSystem => "shop_system.sql",
            InputFile::SalesforceColumns => "add_salesforce_sync_columns.sql",
            InputFile::PaymentIcons => "update_payment_method_icons.sql",
            InputFile::SampleData => "load_sample_data.sql",
        }
    }

    /// Only the main schema file must exist
    pub fn is_required(self) -> bool {
        self == InputFile::Database
    }

    /// Absolute path of this input under `root`
    pub fn path(self, root: &Path, config: &MergeConfig) -> PathBuf {
        let dir = match self {
            InputFile::LoyaltyChanges => config.loyalty_db_dir_absolute(root),
            _ => config.db_dir_absolute(root),
        };
        dir.join(self.file_name())
    }
}

/// Contents of every input file; missing optional files are empty
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeInputs {
    pub database: String,
    pub loyalty: String,
    pub shop_system: String,
    pub salesforce: String,
    pub payment_icons: String,
    pub existing_sample: String,
}

impl MergeInputs {
    /// Read all inputs for a project rooted at `root`
    pub fn load(root: &Path, config: &MergeConfig) -> MergeResult<Self> {
        let read = |file: InputFile| read_input(file, &file.path(root, config));
        Ok(Self {
            database: read(InputFile::Database)?,
            loyalty: read(InputFile::LoyaltyChanges)?,
            shop_system: read(InputFile::ShopSystem)?,
            salesforce: read(InputFile::SalesforceColumns)?,
            payment_icons: read(InputFile::PaymentIcons)?,
            existing_sample: read(InputFile::SampleData)?,
        })
    }

    /// Contents for one input
    pub fn get(&self, file: InputFile) -> &str {
        match file {
            InputFile::Database => &self.database,
            InputFile::LoyaltyChanges => &self.loyalty,
            InputFile::ShopSystem => &self.shop_system,
            InputFile::SalesforceColumns => &self.salesforce,
            InputFile::PaymentIcons => &self.payment_icons,
            InputFile::SampleData => &self.existing_sample,
        }
    }
}

fn read_input(file: InputFile, path: &Path) -> MergeResult<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            log::debug!("Read {} ({} bytes)", path.display(), content.len());
            Ok(content)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            if file.is_required() {
                return Err(MergeError::MissingInput {
                    path: path.display().to_string(),
                });
            }
            log::warn!("Optional input {} not found, using empty content", path.display());
            Ok(String::new())
        }
        Err(source) => Err(MergeError::Io {
            path: path.display().to_string(),
            source,
        }),
    }
}
