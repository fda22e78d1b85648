//! Assembling the two merged output files

use crate::error::{MergeError, MergeResult};
use crate::filter::{filter_essential_lines, filter_sample_lines, strip_sample_inserts};
use crate::inputs::MergeInputs;
use crate::section::SchemaSection;
use std::path::{Path, PathBuf};

/// File name of the schema + configuration output
pub const SCHEMA_OUTPUT: &str = "database.sql";

/// File name of the sample data output
pub const SAMPLE_OUTPUT: &str = "load_sample_data.sql";

const RULE: &str =
    "-- =============================================================================";

const SCHEMA_HEADER: &str = "\
-- =============================================================================
-- UNIFIED POS-LOYALTY DATABASE SCHEMA
-- =============================================================================
-- Complete database schema for POS and Loyalty applications
-- This file creates a fully functional system with:
-- - Complete schema (tables, indexes, sequences)
-- - Functions and triggers
-- - Views
-- - Essential configuration data
-- - One admin user for initial access
--
-- For sample data (products, customers, transactions), run load_sample_data.sql
-- =============================================================================

";

const ADMIN_USER_BLOCK: &str = "
-- =============================================================================
-- DEFAULT ADMIN USER
-- =============================================================================
-- Create default admin user for initial system access
-- Username: admin@pos.com

DO $$
BEGIN
    -- Create admin user if not exists
    IF NOT EXISTS (SELECT 1 FROM users WHERE email = 'admin@pos.com') THEN
        INSERT INTO users (email, first_name, last_name, role, is_active, created_at, updated_at)
        VALUES ('admin@pos.com', 'Admin', 'User', 'Admin', true, NOW(), NOW());

        RAISE NOTICE 'Admin user created: admin@pos.com';
    END IF;
END $$;

";

const SCHEMA_FOOTER: &str = "
-- =============================================================================
-- SCHEMA CREATION COMPLETE
-- =============================================================================
-- Database schema is now ready
-- To load sample data, run: load_sample_data.sql
-- =============================================================================
";

const SAMPLE_HEADER: &str = "\
-- =============================================================================
-- SAMPLE DATA FOR POS-LOYALTY SYSTEM
-- =============================================================================
-- This file contains sample data for testing and demonstration
-- Run this AFTER database.sql has been executed
--
-- Includes:
-- - Sample products
-- - Sample customers
-- - Sample transactions
-- - Sample orders
-- - Sample loyalty data
-- =============================================================================

";

const SAMPLE_FOOTER: &str = "
-- =============================================================================
-- SAMPLE DATA LOADING COMPLETE
-- =============================================================================
-- Your system now has sample data for testing and demonstration
-- =============================================================================
";

/// Banner opening a block: blank line, rule, title, rule, then extra lines
fn banner(title: &str, notes: &[&str]) -> String {
    let mut out = format!("\n{RULE}\n-- {title}\n{RULE}\n");
    for note in notes {
        out.push_str("-- ");
        out.push_str(note);
        out.push('\n');
    }
    out
}

/// The two merged files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedOutputs {
    pub schema: String,
    pub sample_data: String,
}

/// Build both outputs from loaded inputs
pub fn merge(inputs: &MergeInputs) -> MergeResult<MergedOutputs> {
    Ok(MergedOutputs {
        schema: build_schema(inputs)?,
        sample_data: build_sample_data(inputs)?,
    })
}

/// Build the schema + essential configuration file
pub fn build_schema(inputs: &MergeInputs) -> MergeResult<String> {
    let db = inputs.database.as_str();
    let mut out = String::from(SCHEMA_HEADER);

    log::debug!("Extracting DROP statements");
    out.push_str(SchemaSection::Drop.locate(db)?);

    log::debug!("Merging CREATE TABLE statements");
    out.push_str(&banner(
        "CREATE TABLES",
        &["Tables from POS system, loyalty system, and shop system merged"],
    ));
    out.push_str(&strip_sample_inserts(SchemaSection::CreateTables.locate(db)?));

    out.push_str(&banner("LOYALTY APPLICATION TABLES", &[]));
    out.push_str(&inputs.loyalty);

    if inputs.shop_system.contains("CREATE TABLE") {
        log::debug!("Adding shop system tables");
        out.push_str(&banner("SHOP SYSTEM TABLES", &[]));
        out.push_str(&inputs.shop_system);
    }

    out.push_str(&banner("SALESFORCE INTEGRATION", &[]));
    out.push_str(&inputs.salesforce);

    out.push('\n');
    for section in SchemaSection::TRAILING {
        log::debug!("Extracting {}", section);
        out.push_str(section.locate(db)?);
    }

    log::debug!("Adding essential configuration data");
    out.push_str(&banner(
        "ESSENTIAL CONFIGURATION DATA",
        &[
            "System settings, roles, payment methods, locations, etc.",
            "This is NOT sample data - it's required for the system to function",
        ],
    ));
    out.push('\n');
    let essential = SchemaSection::EssentialData.locate(db)?;
    if !essential.is_empty() {
        out.push_str(&filter_essential_lines(essential));
    }

    out.push_str(&banner("PAYMENT METHOD ICONS", &[]));
    out.push_str(&inputs.payment_icons);

    out.push_str(ADMIN_USER_BLOCK);
    out.push_str(SCHEMA_FOOTER);
    Ok(out)
}

/// Build the sample data file
pub fn build_sample_data(inputs: &MergeInputs) -> MergeResult<String> {
    let mut out = String::from(SAMPLE_HEADER);

    let sample = SchemaSection::SampleData.locate(&inputs.database)?;
    if !sample.is_empty() {
        log::debug!("Extracting sample data");
        out.push_str(&filter_sample_lines(sample));
    }

    if !inputs.existing_sample.is_empty() {
        log::debug!("Adding existing sample data");
        out.push_str(&banner("ADDITIONAL SAMPLE DATA", &[]));
        out.push_str(&inputs.existing_sample);
    }

    out.push_str(SAMPLE_FOOTER);
    Ok(out)
}

/// Write both outputs into `dir`, creating it if needed.
///
/// Each file is written independently; a failure on the second leaves the
/// first in place.
pub fn write_outputs(dir: &Path, outputs: &MergedOutputs) -> MergeResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|source| MergeError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let mut written = Vec::with_capacity(2);
    for (name, content) in [
        (SCHEMA_OUTPUT, &outputs.schema),
        (SAMPLE_OUTPUT, &outputs.sample_data),
    ] {
        let path = dir.join(name);
        std::fs::write(&path, content).map_err(|source| MergeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
#[path = "assemble_test.rs"]
mod tests;
