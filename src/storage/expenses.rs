//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json

use std::path::PathBuf;

use crate::error::SplitbookError;
use crate::models::{Expense, ExpenseId, GroupId, MemberId};

use super::file_io::{read_json, stage_json, StagedWrite};
use super::table::{Keyed, Table};

impl Keyed for Expense {
    type Key = ExpenseId;

    fn key(&self) -> ExpenseId {
        self.id
    }
}

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    table: Table<Expense>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            table: Table::new(),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> Result<(), SplitbookError> {
        let file_data: ExpenseData = read_json(&self.path)?;
        self.table.replace_all(file_data.expenses)
    }

    /// Save expenses to disk in recording order
    pub fn save(&self) -> Result<(), SplitbookError> {
        self.stage()?.commit()
    }

    /// Write expenses to a temp file, leaving expenses.json in place until commit
    pub fn stage(&self) -> Result<StagedWrite, SplitbookError> {
        let file_data = ExpenseData {
            expenses: self.table.all()?,
        };
        stage_json(&self.path, &file_data)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, SplitbookError> {
        self.table.get(id)
    }

    /// Get all expenses in recording order
    pub fn get_all(&self) -> Result<Vec<Expense>, SplitbookError> {
        self.table.all()
    }

    /// Get the expenses of a group in recording order
    pub fn get_by_group(&self, group_id: GroupId) -> Result<Vec<Expense>, SplitbookError> {
        self.table.filter(|e| e.group_id == group_id)
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), SplitbookError> {
        self.table.upsert(expense)
    }

    /// Replace the participant list of an expense
    pub fn set_participants(
        &self,
        id: ExpenseId,
        participants: Vec<MemberId>,
    ) -> Result<Expense, SplitbookError> {
        let mut expense = self
            .table
            .get(id)?
            .ok_or_else(|| SplitbookError::expense_not_found(id.to_string()))?;
        expense.split_between = participants;
        self.table.upsert(expense.clone())?;
        Ok(expense)
    }

    /// Delete an expense, returning it if it existed
    pub fn delete(&self, id: ExpenseId) -> Result<Option<Expense>, SplitbookError> {
        self.table.remove(id)
    }

    /// Delete every expense of a group paid by a member
    pub fn delete_by_payer(
        &self,
        group_id: GroupId,
        member_id: MemberId,
    ) -> Result<Vec<Expense>, SplitbookError> {
        self.table
            .remove_where(|e| e.group_id == group_id && e.paid_by == member_id)
    }

    /// Delete every expense of a group
    pub fn delete_by_group(&self, group_id: GroupId) -> Result<Vec<Expense>, SplitbookError> {
        self.table.remove_where(|e| e.group_id == group_id)
    }

    /// Count expenses across all groups
    pub fn count(&self) -> Result<usize, SplitbookError> {
        self.table.len()
    }
}
