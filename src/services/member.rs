//! Member service
//!
//! Adding and listing group members, and removing them through the deletion
//! cascade. The cascade runs against in-memory state; it is written to disk
//! only when every step succeeded, otherwise the last saved state is
//! reloaded. The save itself replaces expenses before members, so a save
//! that stops part way leaves the member in place rather than orphaned
//! expenses.

use tracing::{info, warn};

use crate::audit::{AuditEntry, EntityType};
use crate::error::{SplitbookError, SplitbookResult};
use crate::models::{GroupId, Member, MemberId};
use crate::settle::{cascade_delete_member, CascadeReport};
use crate::storage::Storage;

/// Service for member management
pub struct MemberService<'a> {
    storage: &'a Storage,
}

impl<'a> MemberService<'a> {
    /// Create a new member service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a member to a group
    pub fn add(&self, group_id: GroupId, name: &str) -> SplitbookResult<Member> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SplitbookError::Validation("Member name cannot be empty".into()));
        }

        self.storage
            .groups
            .get(group_id)?
            .ok_or_else(|| SplitbookError::group_not_found(group_id.to_string()))?;

        if self.storage.members.get_by_name(group_id, name)?.is_some() {
            return Err(SplitbookError::Duplicate {
                entity_type: "Member",
                identifier: name.to_string(),
            });
        }

        let member = Member::new(group_id, name);
        member
            .validate()
            .map_err(|e| SplitbookError::Validation(e.to_string()))?;

        self.storage.members.upsert(member.clone())?;
        self.storage.members.save()?;

        self.storage.log_create(
            EntityType::Member,
            member.id.to_string(),
            Some(member.name.clone()),
            &member,
        )?;

        Ok(member)
    }

    /// Members of a group in the order they were added
    pub fn list(&self, group_id: GroupId) -> SplitbookResult<Vec<Member>> {
        self.storage.members.get_by_group(group_id)
    }

    /// Find a member of a group by name or ID
    pub fn find(&self, group_id: GroupId, identifier: &str) -> SplitbookResult<Option<Member>> {
        if let Some(member) = self.storage.members.get_by_name(group_id, identifier)? {
            return Ok(Some(member));
        }

        Ok(self
            .storage
            .members
            .get_by_group(group_id)?
            .into_iter()
            .find(|m| m.id.matches(identifier)))
    }

    /// Find a member of a group by name or ID, failing if there is none
    pub fn resolve(&self, group_id: GroupId, identifier: &str) -> SplitbookResult<Member> {
        self.find(group_id, identifier)?
            .ok_or_else(|| SplitbookError::member_not_found(identifier))
    }

    /// Remove a member and everything that references it
    pub fn remove(&self, group_id: GroupId, member_id: MemberId) -> SplitbookResult<CascadeReport> {
        let report = match cascade_delete_member(self.storage, group_id, member_id) {
            Ok(report) => report,
            Err(e) => {
                self.discard_unsaved_changes();
                return Err(e);
            }
        };

        if let Err(partial) = self.storage.commit_all() {
            self.discard_unsaved_changes();
            if !partial.is_partial() {
                return Err(partial.error);
            }
            return Err(SplitbookError::PartialCascadeFailure {
                member_id: member_id.to_string(),
                completed: partial
                    .committed
                    .iter()
                    .map(|collection| format!("save {}", collection))
                    .collect(),
                failed_step: format!("save {}", partial.failed),
                message: partial.error.to_string(),
            });
        }

        // The removal is on disk; a missing audit line must not undo that
        if let Err(e) = self.storage.log_batch(&audit_entries(&report)) {
            warn!(member = %member_id, error = %e, "failed to audit member removal");
        }

        info!(
            member = %member_id,
            settlements = report.settlements_removed,
            expenses_removed = report.expenses_removed,
            expenses_updated = report.expenses_updated,
            "member removed"
        );
        Ok(report)
    }

    fn discard_unsaved_changes(&self) {
        if let Err(e) = self.storage.load_all() {
            warn!(error = %e, "failed to reload storage after an aborted member removal");
        }
    }
}

/// Audit trail for a finished cascade, in the order the steps ran
fn audit_entries(report: &CascadeReport) -> Vec<AuditEntry> {
    let plan = &report.plan;
    let mut entries = Vec::new();

    for record in &plan.settlements {
        entries.push(AuditEntry::delete(
            EntityType::Settlement,
            record.id.to_string(),
            None,
            record,
        ));
    }

    for expense in &plan.paid_expenses {
        entries.push(
            AuditEntry::delete(
                EntityType::Expense,
                expense.id.to_string(),
                Some(expense.description.clone()),
                expense,
            )
            .with_summary(format!("payer {} removed", plan.member.name)),
        );
    }

    for change in &plan.participant_changes {
        let expense = &change.expense;
        let entry = if change.deletes_expense() {
            AuditEntry::delete(
                EntityType::Expense,
                expense.id.to_string(),
                Some(expense.description.clone()),
                expense,
            )
            .with_summary(format!("last participant {} removed", plan.member.name))
        } else {
            let mut after = expense.clone();
            after.split_between = change.remaining.clone();
            AuditEntry::update(
                EntityType::Expense,
                expense.id.to_string(),
                Some(expense.description.clone()),
                expense,
                &after,
                Some(format!("participant {} removed", plan.member.name)),
            )
        };
        entries.push(entry);
    }

    entries.push(AuditEntry::delete(
        EntityType::Member,
        plan.member.id.to_string(),
        Some(plan.member.name.clone()),
        &plan.member,
    ));

    entries
}
