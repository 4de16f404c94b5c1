//! Settlement service
//!
//! Suggested transfers are computed fresh from the stored snapshot on every
//! call. Recorded payments are a separate log and do not change suggestions.

use tracing::debug;

use crate::audit::EntityType;
use crate::config::SettlementOrder;
use crate::error::{SplitbookError, SplitbookResult};
use crate::models::{GroupId, MemberId, Money, SettlementRecord};
use crate::settle::{
    compute_balances, compute_settlements_with_order, MemberBalance, TransferSuggestion,
};
use crate::storage::Storage;

/// Service for settlement suggestions and recorded payments
pub struct SettlementService<'a> {
    storage: &'a Storage,
}

impl<'a> SettlementService<'a> {
    /// Create a new settlement service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn require_group(&self, group_id: GroupId) -> SplitbookResult<()> {
        self.storage
            .groups
            .get(group_id)?
            .map(|_| ())
            .ok_or_else(|| SplitbookError::group_not_found(group_id.to_string()))
    }

    /// Current balances of every member of a group
    pub fn balances(&self, group_id: GroupId) -> SplitbookResult<Vec<MemberBalance>> {
        self.require_group(group_id)?;
        let members = self.storage.members.get_by_group(group_id)?;
        let expenses = self.storage.expenses.get_by_group(group_id)?;
        compute_balances(&members, &expenses)
    }

    /// Suggested transfers that settle a group
    pub fn suggest(
        &self,
        group_id: GroupId,
        order: SettlementOrder,
    ) -> SplitbookResult<Vec<TransferSuggestion>> {
        self.require_group(group_id)?;
        let members = self.storage.members.get_by_group(group_id)?;
        let expenses = self.storage.expenses.get_by_group(group_id)?;

        let suggestions = compute_settlements_with_order(&members, &expenses, order)?;
        debug!(
            group = %group_id,
            expenses = expenses.len(),
            suggestions = suggestions.len(),
            "settlements suggested"
        );
        Ok(suggestions)
    }

    /// Record a payment between two members of a group
    pub fn record(
        &self,
        group_id: GroupId,
        from: MemberId,
        to: MemberId,
        amount: Money,
    ) -> SplitbookResult<SettlementRecord> {
        self.require_group(group_id)?;

        for member_id in [from, to] {
            self.storage
                .members
                .get(member_id)?
                .filter(|m| m.group_id == group_id)
                .ok_or_else(|| SplitbookError::member_not_found(member_id.to_string()))?;
        }

        let record = SettlementRecord::new(group_id, from, to, amount);
        record
            .validate()
            .map_err(|e| SplitbookError::Validation(e.to_string()))?;

        self.storage.settlements.upsert(record.clone())?;
        self.storage.settlements.save()?;

        self.storage
            .log_create(EntityType::Settlement, record.id.to_string(), None, &record)?;

        Ok(record)
    }

    /// Recorded payments of a group, newest first
    pub fn history(&self, group_id: GroupId) -> SplitbookResult<Vec<SettlementRecord>> {
        self.require_group(group_id)?;
        self.storage.settlements.get_by_group(group_id)
    }
}
