//! User settings for splitbook
//!
//! Manages user preferences: display currency symbol and date format, the
//! default expense category, and the debtor/creditor ordering used when
//! suggesting settlements.

use serde::{Deserialize, Serialize};

use super::paths::SplitbookPaths;
use crate::error::SplitbookError;
use crate::models::FALLBACK_CATEGORY;
use crate::storage::write_json_atomic;

/// Order in which debtors and creditors are paired when suggesting transfers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SettlementOrder {
    /// Members in the order they were added to the group
    #[default]
    Insertion,
    /// Largest outstanding amounts first (ties keep insertion order).
    /// Usually yields fewer transfers but changes which pairs get matched.
    LargestFirst,
}

/// User settings for splitbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Category given to expenses recorded without one
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Pairing order for settlement suggestions
    #[serde(default)]
    pub settlement_order: SettlementOrder,

    /// Number of recent expenses shown in the overview report
    #[serde(default = "default_recent_limit")]
    pub recent_expense_limit: usize,

    /// Number of groups ranked in the overview report
    #[serde(default = "default_top_groups")]
    pub top_group_limit: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_category() -> String {
    FALLBACK_CATEGORY.to_string()
}

fn default_recent_limit() -> usize {
    5
}

fn default_top_groups() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_category: default_category(),
            settlement_order: SettlementOrder::default(),
            recent_expense_limit: default_recent_limit(),
            top_group_limit: default_top_groups(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SplitbookPaths) -> Result<Self, SplitbookError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SplitbookError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SplitbookError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SplitbookPaths) -> Result<(), SplitbookError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
