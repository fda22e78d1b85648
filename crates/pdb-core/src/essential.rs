//! Essential configuration tables
//!
//! `INSERT` statements into these tables are configuration the system needs
//! to run. Inserts into any other table are disposable sample data.

use std::fmt;

/// Tables whose rows are required configuration rather than sample data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EssentialTable {
    Roles,
    SystemSettings,
    PaymentMethods,
    LoyaltyTiers,
    CustomerTierRules,
    Locations,
}

impl EssentialTable {
    /// Every essential table
    pub const ALL: [EssentialTable; 6] = [
        EssentialTable::Roles,
        EssentialTable::SystemSettings,
        EssentialTable::PaymentMethods,
        EssentialTable::LoyaltyTiers,
        EssentialTable::CustomerTierRules,
        EssentialTable::Locations,
    ];

    /// Table name as it appears in SQL
    pub fn as_str(self) -> &'static str {
        match self {
            EssentialTable::Roles => "roles",
            EssentialTable::SystemSettings => "system_settings",
            EssentialTable::PaymentMethods => "payment_methods",
            EssentialTable::LoyaltyTiers => "loyalty_tiers",
            EssentialTable::CustomerTierRules => "customer_tier_rules",
            EssentialTable::Locations => "locations",
        }
    }

    /// Look up a table by its exact (lower-case) name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for EssentialTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of line an `INSERT` classifier saw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertKind {
    /// `INSERT INTO` one of the essential tables
    Essential(EssentialTable),
    /// `INSERT INTO` any other table
    Sample,
    /// Not an `INSERT INTO` line at all
    NotInsert,
}

impl InsertKind {
    /// True for inserts into non-essential tables
    pub fn is_sample(self) -> bool {
        matches!(self, InsertKind::Sample)
    }

    /// True for inserts into essential tables
    pub fn is_essential(self) -> bool {
        matches!(self, InsertKind::Essential(_))
    }
}

const INSERT_PREFIX: &str = "insert into";

/// Classify a single line of SQL text.
///
/// The line is trimmed and lower-cased and must start with `insert into`.
/// The target table (optionally schema-qualified or double-quoted) is
/// compared exactly against the essential set, so `roles_backup` is sample
/// data, not `roles`.
///
/// # Examples
/// ```
/// use pdb_core::{classify_insert, EssentialTable, InsertKind};
/// assert_eq!(
///     classify_insert("INSERT INTO roles (name) VALUES ('Admin');"),
///     InsertKind::Essential(EssentialTable::Roles)
/// );
/// assert_eq!(classify_insert("INSERT INTO products (sku) VALUES ('A1');"), InsertKind::Sample);
/// assert_eq!(classify_insert("-- comment"), InsertKind::NotInsert);
/// ```
pub fn classify_insert(line: &str) -> InsertKind {
    let lower = line.trim().to_lowercase();
    let Some(rest) = lower.strip_prefix(INSERT_PREFIX) else {
        return InsertKind::NotInsert;
    };

    let target = if rest.starts_with(char::is_whitespace) {
        target_table(rest.trim_start())
    } else {
        ""
    };

    match EssentialTable::from_name(target) {
        Some(table) => InsertKind::Essential(table),
        None => InsertKind::Sample,
    }
}

/// True if `line` inserts into a table outside the essential set
pub fn is_sample_insert(line: &str) -> bool {
    classify_insert(line).is_sample()
}

/// Extract the unqualified table name at the start of `rest`.
fn target_table(rest: &str) -> &str {
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.' || c == '"'))
        .unwrap_or(rest.len());
    let qualified = &rest[..end];
    let table = qualified.rsplit('.').next().unwrap_or(qualified);
    table.trim_matches('"')
}

#[cfg(test)]
#[path = "essential_test.rs"]
mod tests;
