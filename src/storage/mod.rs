//! Storage layer for splitbook
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. [`Storage`] is the collaborator store behind the service layer
//! and implements [`GroupStore`] for the member deletion cascade.

pub mod expenses;
pub mod file_io;
pub mod groups;
pub mod members;
pub mod settlements;
pub mod store;
pub mod table;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use groups::GroupRepository;
pub use members::MemberRepository;
pub use settlements::SettlementRepository;
pub use store::GroupStore;

use serde::Serialize;
use tracing::{debug, warn};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::SplitbookPaths;
use crate::error::{SplitbookError, SplitbookResult};
use crate::models::{Expense, ExpenseId, GroupId, Member, MemberId, SettlementRecord};

pub const COLLECTION_SETTLEMENTS: &str = "settlements";
pub const COLLECTION_EXPENSES: &str = "expenses";
pub const COLLECTION_MEMBERS: &str = "members";
pub const COLLECTION_GROUPS: &str = "groups";

/// A save that failed, with the collections already replaced on disk
#[derive(Debug, thiserror::Error)]
#[error("Saving {failed} failed after writing [{}]: {error}", .committed.join(", "))]
pub struct PartialSave {
    /// Collections written before the failure, in commit order
    pub committed: Vec<&'static str>,
    /// Collection that could not be written
    pub failed: &'static str,
    pub error: SplitbookError,
}

impl PartialSave {
    /// Whether anything reached disk before the failure
    pub fn is_partial(&self) -> bool {
        !self.committed.is_empty()
    }
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SplitbookPaths,
    pub groups: GroupRepository,
    pub members: MemberRepository,
    pub expenses: ExpenseRepository,
    pub settlements: SettlementRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: SplitbookPaths) -> Result<Self, SplitbookError> {
        paths.ensure_directories()?;

        Ok(Self {
            groups: GroupRepository::new(paths.groups_file()),
            members: MemberRepository::new(paths.members_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            settlements: SettlementRepository::new(paths.settlements_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &SplitbookPaths {
        &self.paths
    }

    /// Load all data from disk, discarding unsaved in-memory changes
    pub fn load_all(&self) -> Result<(), SplitbookError> {
        self.groups.load()?;
        self.members.load()?;
        self.expenses.load()?;
        self.settlements.load()?;
        debug!("storage loaded from {}", self.paths.data_dir().display());
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SplitbookError> {
        self.commit_all().map_err(|partial| partial.error)
    }

    /// Save all data, reporting which collections reached disk on failure
    ///
    /// Every collection is staged to a temp file first; nothing is replaced
    /// unless all of them were written. Files are then moved into place
    /// with referencing records first (settlement records, expenses,
    /// members, groups), so stopping part way never leaves a record on disk
    /// that points at one already deleted there.
    pub fn commit_all(&self) -> Result<(), PartialSave> {
        let staged = [
            (COLLECTION_SETTLEMENTS, self.settlements.stage()),
            (COLLECTION_EXPENSES, self.expenses.stage()),
            (COLLECTION_MEMBERS, self.members.stage()),
            (COLLECTION_GROUPS, self.groups.stage()),
        ];

        let mut ready = Vec::with_capacity(staged.len());
        let mut failure = None;
        for (collection, result) in staged {
            match result {
                Ok(write) => ready.push((collection, write)),
                Err(error) => {
                    failure.get_or_insert((collection, error));
                }
            }
        }

        if let Some((failed, error)) = failure {
            ready.into_iter().for_each(|(_, write)| write.discard());
            return Err(PartialSave {
                committed: Vec::new(),
                failed,
                error,
            });
        }

        let mut committed = Vec::new();
        let mut pending = ready.into_iter();
        while let Some((collection, write)) = pending.next() {
            if let Err(error) = write.commit() {
                pending.for_each(|(_, write)| write.discard());
                warn!(
                    collection,
                    committed = ?committed,
                    error = %error,
                    "save stopped part way"
                );
                return Err(PartialSave {
                    committed,
                    failed: collection,
                    error,
                });
            }
            committed.push(collection);
        }

        debug!("storage saved to {}", self.paths.data_dir().display());
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// The audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a create operation in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> SplitbookResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record a delete operation in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> SplitbookResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    /// Record several operations at once
    pub fn log_batch(&self, entries: &[AuditEntry]) -> SplitbookResult<()> {
        self.audit.log_batch(entries)
    }
}

impl GroupStore for Storage {
    fn list_members(&self, group_id: GroupId) -> SplitbookResult<Vec<Member>> {
        self.members.get_by_group(group_id)
    }

    fn list_expenses(&self, group_id: GroupId) -> SplitbookResult<Vec<Expense>> {
        self.expenses.get_by_group(group_id)
    }

    fn list_settlements(&self, group_id: GroupId) -> SplitbookResult<Vec<SettlementRecord>> {
        self.settlements.get_by_group(group_id)
    }

    fn find_member(
        &self,
        group_id: GroupId,
        member_id: MemberId,
    ) -> SplitbookResult<Option<Member>> {
        Ok(self
            .members
            .get(member_id)?
            .filter(|member| member.group_id == group_id))
    }

    fn delete_settlements_by_member(
        &self,
        group_id: GroupId,
        member_id: MemberId,
    ) -> SplitbookResult<usize> {
        Ok(self.settlements.delete_by_member(group_id, member_id)?.len())
    }

    fn delete_expenses_by_payer(
        &self,
        group_id: GroupId,
        member_id: MemberId,
    ) -> SplitbookResult<usize> {
        Ok(self.expenses.delete_by_payer(group_id, member_id)?.len())
    }

    fn update_expense_participants(
        &self,
        expense_id: ExpenseId,
        participants: Vec<MemberId>,
    ) -> SplitbookResult<()> {
        self.expenses.set_participants(expense_id, participants)?;
        Ok(())
    }

    fn delete_expense(&self, expense_id: ExpenseId) -> SplitbookResult<bool> {
        Ok(self.expenses.delete(expense_id)?.is_some())
    }

    fn delete_member(&self, member_id: MemberId) -> SplitbookResult<bool> {
        self.members.delete(member_id)
    }
}
