//! Group service
//!
//! Creating, listing, inspecting and deleting groups, plus the per-group
//! analytics report.

use tracing::{info, warn};

use crate::audit::{AuditEntry, EntityType};
use crate::error::{SplitbookError, SplitbookResult};
use crate::models::{Expense, Group, GroupId, Member, Money, SettlementRecord};
use crate::reports::{compute_group_analytics, AnalyticsReport};
use crate::storage::Storage;

/// A group with its computed totals
#[derive(Debug, Clone)]
pub struct GroupSummary {
    pub group: Group,
    pub member_count: usize,
    pub expense_count: usize,
    pub total_expenses: Money,
}

/// Everything shown on a group's detail page
#[derive(Debug, Clone)]
pub struct GroupDetails {
    pub group: Group,
    /// In the order they were added
    pub members: Vec<Member>,
    /// Newest first
    pub expenses: Vec<Expense>,
    /// Newest first
    pub settlements: Vec<SettlementRecord>,
}

impl GroupDetails {
    pub fn total_expenses(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Display name of a member, or its ID if the member is unknown
    pub fn member_name(&self, id: crate::models::MemberId) -> String {
        self.members
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

/// What deleting a group removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupDeletion {
    pub members: usize,
    pub expenses: usize,
    pub settlements: usize,
}

/// Service for group management
pub struct GroupService<'a> {
    storage: &'a Storage,
}

impl<'a> GroupService<'a> {
    /// Create a new group service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new group
    pub fn create(&self, name: &str, budget: Option<Money>) -> SplitbookResult<Group> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SplitbookError::Validation("Group name cannot be empty".into()));
        }

        if self.storage.groups.get_by_name(name)?.is_some() {
            return Err(SplitbookError::Duplicate {
                entity_type: "Group",
                identifier: name.to_string(),
            });
        }

        let group = match budget {
            Some(budget) => Group::with_budget(name, budget),
            None => Group::new(name),
        };

        group
            .validate()
            .map_err(|e| SplitbookError::Validation(e.to_string()))?;

        self.storage.groups.upsert(group.clone())?;
        self.storage.groups.save()?;

        self.storage.log_create(
            EntityType::Group,
            group.id.to_string(),
            Some(group.name.clone()),
            &group,
        )?;

        info!(group = %group.id, "group created");
        Ok(group)
    }

    /// Get a group by ID
    pub fn get(&self, id: GroupId) -> SplitbookResult<Option<Group>> {
        self.storage.groups.get(id)
    }

    /// Get a group by ID, failing if it does not exist
    pub fn require(&self, id: GroupId) -> SplitbookResult<Group> {
        self.storage
            .groups
            .get(id)?
            .ok_or_else(|| SplitbookError::group_not_found(id.to_string()))
    }

    /// Find a group by name or ID
    pub fn find(&self, identifier: &str) -> SplitbookResult<Option<Group>> {
        if let Some(group) = self.storage.groups.get_by_name(identifier)? {
            return Ok(Some(group));
        }

        Ok(self
            .storage
            .groups
            .get_all()?
            .into_iter()
            .find(|g| g.id.matches(identifier)))
    }

    /// Find a group by name or ID, failing if it does not exist
    pub fn resolve(&self, identifier: &str) -> SplitbookResult<Group> {
        self.find(identifier)?
            .ok_or_else(|| SplitbookError::group_not_found(identifier))
    }

    /// List all groups, newest first, with their totals
    pub fn list(&self) -> SplitbookResult<Vec<GroupSummary>> {
        self.storage
            .groups
            .get_all()?
            .into_iter()
            .map(|group| {
                let expenses = self.storage.expenses.get_by_group(group.id)?;
                Ok(GroupSummary {
                    member_count: self.storage.members.get_by_group(group.id)?.len(),
                    expense_count: expenses.len(),
                    total_expenses: expenses.iter().map(|e| e.amount).sum(),
                    group,
                })
            })
            .collect()
    }

    /// Members, expenses and settlement records of a group
    pub fn details(&self, id: GroupId) -> SplitbookResult<GroupDetails> {
        let group = self.require(id)?;

        let mut expenses = self.storage.expenses.get_by_group(id)?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        Ok(GroupDetails {
            members: self.storage.members.get_by_group(id)?,
            settlements: self.storage.settlements.get_by_group(id)?,
            expenses,
            group,
        })
    }

    /// Analytics for a group
    pub fn analytics(&self, id: GroupId) -> SplitbookResult<AnalyticsReport> {
        let group = self.require(id)?;
        let expenses = self.storage.expenses.get_by_group(id)?;
        let members = self.storage.members.get_by_group(id)?;
        compute_group_analytics(&group, &expenses, &members)
    }

    /// Delete a group together with its settlement records, expenses and members
    pub fn delete(&self, id: GroupId) -> SplitbookResult<GroupDeletion> {
        let group = self.require(id)?;

        let settlements = self.storage.settlements.delete_by_group(id)?;
        let expenses = self.storage.expenses.delete_by_group(id)?;
        let members = self.storage.members.delete_by_group(id)?;
        self.storage.groups.delete(id)?;

        if let Err(e) = self.storage.save_all() {
            self.storage.load_all()?;
            return Err(e);
        }

        let mut entries: Vec<AuditEntry> = Vec::new();
        entries.extend(settlements.iter().map(|s| {
            AuditEntry::delete(EntityType::Settlement, s.id.to_string(), None, s)
        }));
        entries.extend(expenses.iter().map(|e| {
            AuditEntry::delete(
                EntityType::Expense,
                e.id.to_string(),
                Some(e.description.clone()),
                e,
            )
        }));
        entries.extend(members.iter().map(|m| {
            AuditEntry::delete(EntityType::Member, m.id.to_string(), Some(m.name.clone()), m)
        }));
        entries.push(AuditEntry::delete(
            EntityType::Group,
            group.id.to_string(),
            Some(group.name.clone()),
            &group,
        ));
        if let Err(e) = self.storage.log_batch(&entries) {
            warn!(group = %id, error = %e, "failed to audit group deletion");
        }

        info!(group = %id, "group deleted");
        Ok(GroupDeletion {
            members: members.len(),
            expenses: expenses.len(),
            settlements: settlements.len(),
        })
    }
}
