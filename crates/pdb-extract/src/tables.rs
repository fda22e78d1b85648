//! Fixed extraction specs for the configuration tables
//!
//! Which tables are extracted, and how each is written back, is not
//! configurable.

use pdb_core::EssentialTable;

/// How the rows of one table are written back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertStyle {
    /// `DELETE` everything, then one multi-row `INSERT`
    ReplaceAll {
        clear_comment: &'static str,
        insert_comment: &'static str,
        empty_comment: &'static str,
    },
    /// One `INSERT ... ON CONFLICT` per row
    PerRow {
        comment: &'static str,
        conflict: &'static str,
        /// Emitted instead of `comment` when the table has no rows
        empty_comment: Option<&'static str>,
    },
    /// `INSERT ... SELECT ... WHERE NOT EXISTS`, only into an empty table
    IfTableEmpty { comment: &'static str },
}

/// One table to extract
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub table: EssentialTable,
    /// Banner title in the generated file
    pub title: &'static str,
    pub columns: &'static [&'static str],
    /// Columns written as `'<json>'::jsonb`, `'{}'` when blank
    pub jsonb_columns: &'static [&'static str],
    pub order_by: Option<&'static str>,
    pub limit: Option<u32>,
    pub style: InsertStyle,
}

impl TableSpec {
    /// The SELECT that reads this table
    pub fn select_sql(&self) -> String {
        let mut sql = format!(
            "SELECT {} FROM {}",
            self.columns.join(", "),
            self.table.as_str()
        );
        if let Some(order_by) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        sql
    }

    /// Comma-separated column list
    pub fn column_list(&self) -> String {
        self.columns.join(", ")
    }

    pub(crate) fn is_jsonb(&self, column: &str) -> bool {
        self.jsonb_columns.contains(&column)
    }
}

/// The configuration tables, in output order
pub const CONFIG_TABLES: [TableSpec; 5] = [
    TableSpec {
        table: EssentialTable::SystemSettings,
        title: "SYSTEM SETTINGS",
        columns: &[
            "setting_key",
            "setting_value",
            "setting_type",
            "description",
            "category",
            "is_encrypted",
            "is_active",
            "created_by",
            "updated_by",
        ],
        jsonb_columns: &[],
        order_by: Some("category, setting_key"),
        limit: None,
        style: InsertStyle::ReplaceAll {
            clear_comment: "Clear existing settings",
            insert_comment: "Insert system settings",
            empty_comment: "No system settings found in database",
        },
    },
    TableSpec {
        table: EssentialTable::Roles,
        title: "ROLES",
        columns: &["name", "description", "permissions", "is_active"],
        jsonb_columns: &["permissions"],
        order_by: Some("name"),
        limit: None,
        style: InsertStyle::PerRow {
            comment: "Insert roles (skip if exists)",
            conflict: "ON CONFLICT (name) DO NOTHING",
            empty_comment: None,
        },
    },
    TableSpec {
        table: EssentialTable::PaymentMethods,
        title: "PAYMENT METHODS",
        columns: &[
            "name",
            "code",
            "description",
            "requires_online_payment",
            "display_order",
            "icon",
            "is_active",
        ],
        jsonb_columns: &[],
        order_by: Some("display_order"),
        limit: None,
        style: InsertStyle::PerRow {
            comment: "Insert payment methods (skip if exists)",
            conflict:
                "ON CONFLICT (code) DO UPDATE SET icon = EXCLUDED.icon, is_active = EXCLUDED.is_active",
            empty_comment: None,
        },
    },
    TableSpec {
        table: EssentialTable::CustomerTierRules,
        title: "CUSTOMER TIER RULES",
        columns: &[
            "tier_name",
            "tier_level",
            "min_spending",
            "min_visits",
            "min_points",
            "points_multiplier",
        ],
        jsonb_columns: &[],
        order_by: Some("tier_level"),
        limit: None,
        style: InsertStyle::PerRow {
            comment: "Insert customer tier rules (skip if exists)",
            conflict: "ON CONFLICT (tier_level) DO NOTHING",
            empty_comment: Some("No customer tier rules found in database"),
        },
    },
    TableSpec {
        table: EssentialTable::Locations,
        title: "DEFAULT LOCATION",
        columns: &["name", "address", "phone", "email", "is_active"],
        jsonb_columns: &[],
        order_by: None,
        limit: Some(1),
        style: InsertStyle::IfTableEmpty {
            comment: "Insert default location if none exists",
        },
    },
];
