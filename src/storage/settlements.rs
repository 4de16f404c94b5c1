//! Settlement record repository for JSON storage
//!
//! Manages loading and saving recorded payments to settlements.json

use std::path::PathBuf;

use crate::error::SplitbookError;
use crate::models::{GroupId, MemberId, SettlementId, SettlementRecord};

use super::file_io::{read_json, stage_json, StagedWrite};
use super::table::{Keyed, Table};

impl Keyed for SettlementRecord {
    type Key = SettlementId;

    fn key(&self) -> SettlementId {
        self.id
    }
}

/// Serializable settlement data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SettlementData {
    settlements: Vec<SettlementRecord>,
}

/// Repository for recorded payments
pub struct SettlementRepository {
    path: PathBuf,
    table: Table<SettlementRecord>,
}

impl SettlementRepository {
    /// Create a new settlement repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            table: Table::new(),
        }
    }

    /// Load settlement records from disk
    pub fn load(&self) -> Result<(), SplitbookError> {
        let file_data: SettlementData = read_json(&self.path)?;
        self.table.replace_all(file_data.settlements)
    }

    /// Save settlement records to disk
    pub fn save(&self) -> Result<(), SplitbookError> {
        self.stage()?.commit()
    }

    /// Write settlement records to a temp file, leaving settlements.json in place until commit
    pub fn stage(&self) -> Result<StagedWrite, SplitbookError> {
        let file_data = SettlementData {
            settlements: self.table.all()?,
        };
        stage_json(&self.path, &file_data)
    }

    /// Get a settlement record by ID
    pub fn get(&self, id: SettlementId) -> Result<Option<SettlementRecord>, SplitbookError> {
        self.table.get(id)
    }

    /// Get the records of a group, newest first
    pub fn get_by_group(
        &self,
        group_id: GroupId,
    ) -> Result<Vec<SettlementRecord>, SplitbookError> {
        let mut records = self.table.filter(|s| s.group_id == group_id)?;
        records.reverse();
        Ok(records)
    }

    /// Insert or update a record
    pub fn upsert(&self, record: SettlementRecord) -> Result<(), SplitbookError> {
        self.table.upsert(record)
    }

    /// Delete every record of a group where a member is either payer or receiver
    pub fn delete_by_member(
        &self,
        group_id: GroupId,
        member_id: MemberId,
    ) -> Result<Vec<SettlementRecord>, SplitbookError> {
        self.table
            .remove_where(|s| s.group_id == group_id && s.references(member_id))
    }

    /// Delete every record of a group
    pub fn delete_by_group(
        &self,
        group_id: GroupId,
    ) -> Result<Vec<SettlementRecord>, SplitbookError> {
        self.table.remove_where(|s| s.group_id == group_id)
    }

    /// Count records across all groups
    pub fn count(&self) -> Result<usize, SplitbookError> {
        self.table.len()
    }
}
