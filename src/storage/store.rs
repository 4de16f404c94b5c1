//! The collaborator interface the core needs from a persistent store
//!
//! Pure computations take plain snapshots; only the member deletion cascade
//! talks to a store, through this trait, so it can run against the JSON
//! storage or any other backend that can list and delete by key.

use crate::error::SplitbookResult;
use crate::models::{Expense, ExpenseId, GroupId, Member, MemberId, SettlementRecord};

/// Lookups and mutations over one group's members, expenses and payments
pub trait GroupStore {
    /// Members of a group in insertion order
    fn list_members(&self, group_id: GroupId) -> SplitbookResult<Vec<Member>>;

    /// Expenses of a group in recording order
    fn list_expenses(&self, group_id: GroupId) -> SplitbookResult<Vec<Expense>>;

    /// Recorded payments of a group
    fn list_settlements(&self, group_id: GroupId) -> SplitbookResult<Vec<SettlementRecord>>;

    /// A member of the group, if present
    fn find_member(&self, group_id: GroupId, member_id: MemberId)
        -> SplitbookResult<Option<Member>>;

    /// Delete payments where the member is payer or receiver; returns the count
    fn delete_settlements_by_member(
        &self,
        group_id: GroupId,
        member_id: MemberId,
    ) -> SplitbookResult<usize>;

    /// Delete expenses the member paid for; returns the count
    fn delete_expenses_by_payer(
        &self,
        group_id: GroupId,
        member_id: MemberId,
    ) -> SplitbookResult<usize>;

    /// Replace an expense's participant list
    fn update_expense_participants(
        &self,
        expense_id: ExpenseId,
        participants: Vec<MemberId>,
    ) -> SplitbookResult<()>;

    /// Delete a single expense; returns whether it existed
    fn delete_expense(&self, expense_id: ExpenseId) -> SplitbookResult<bool>;

    /// Delete the member row; returns whether it existed
    fn delete_member(&self, member_id: MemberId) -> SplitbookResult<bool>;
}
