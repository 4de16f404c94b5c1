//! JSON Export functionality
//!
//! Exports one group's complete data to JSON with schema versioning.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{SplitbookError, SplitbookResult};
use crate::models::{Expense, Group, GroupId, Member, Money, SettlementRecord};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Snapshot of a group and everything in it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub group: Group,

    /// In the order they were added
    pub members: Vec<Member>,

    /// In the order they were recorded
    pub expenses: Vec<Expense>,

    /// Newest first
    pub settlements: Vec<SettlementRecord>,

    pub metadata: ExportMetadata,
}

/// Summary figures for a quick look at an export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub member_count: usize,
    pub expense_count: usize,
    pub settlement_count: usize,
    pub total_spent: Money,
    pub earliest_expense: Option<NaiveDate>,
    pub latest_expense: Option<NaiveDate>,
}

impl GroupExport {
    /// Collect a group's data from storage
    pub fn from_storage(storage: &Storage, group_id: GroupId) -> SplitbookResult<Self> {
        let group = storage
            .groups
            .get(group_id)?
            .ok_or_else(|| SplitbookError::group_not_found(group_id.to_string()))?;
        let members = storage.members.get_by_group(group_id)?;
        let expenses = storage.expenses.get_by_group(group_id)?;
        let settlements = storage.settlements.get_by_group(group_id)?;

        let metadata = ExportMetadata {
            member_count: members.len(),
            expense_count: expenses.len(),
            settlement_count: settlements.len(),
            total_spent: expenses.iter().map(|e| e.amount).sum(),
            earliest_expense: expenses.iter().map(|e| e.date).min(),
            latest_expense: expenses.iter().map(|e| e.date).max(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            group,
            members,
            expenses,
            settlements,
            metadata,
        })
    }
}

/// Export a group to JSON
pub fn export_group_json<W: Write>(
    storage: &Storage,
    group_id: GroupId,
    writer: &mut W,
    pretty: bool,
) -> SplitbookResult<()> {
    let export = GroupExport::from_storage(storage, group_id)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| SplitbookError::Export(e.to_string()))
}
