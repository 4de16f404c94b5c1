//! Member deletion cascade
//!
//! Removing a member touches every collection that can reference them. The
//! work is planned from one snapshot, then applied step by step against a
//! [`GroupStore`]:
//!
//! 1. settlement records where the member paid or was paid
//! 2. expenses the member paid for
//! 3. expenses the member shared: the member is stripped from the split,
//!    and the expense is deleted if nobody is left
//! 4. the member itself
//!
//! Step 3 is planned before step 2 runs and skips the member's own
//! expenses, so nothing is processed twice. The store is not transactional;
//! a failure after the first committed step is reported as
//! [`SplitbookError::PartialCascadeFailure`] and needs reconciliation.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{SplitbookError, SplitbookResult};
use crate::models::{Expense, GroupId, Member, MemberId, SettlementRecord};
use crate::storage::GroupStore;

/// An expense whose participant list loses the deleted member
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantChange {
    /// The expense as it was before the cascade
    pub expense: Expense,
    /// Participants left once the member is removed; empty means delete
    pub remaining: Vec<MemberId>,
}

impl ParticipantChange {
    pub fn deletes_expense(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Everything a member deletion will remove or rewrite
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CascadePlan {
    pub member: Member,
    pub settlements: Vec<SettlementRecord>,
    pub paid_expenses: Vec<Expense>,
    pub participant_changes: Vec<ParticipantChange>,
}

impl CascadePlan {
    /// Expenses deleted by the cascade, paid or emptied
    pub fn deleted_expenses(&self) -> impl Iterator<Item = &Expense> {
        self.paid_expenses.iter().chain(
            self.participant_changes
                .iter()
                .filter(|c| c.deletes_expense())
                .map(|c| &c.expense),
        )
    }

    /// Expenses kept with a shorter participant list
    pub fn updated_expenses(&self) -> impl Iterator<Item = &ParticipantChange> {
        self.participant_changes
            .iter()
            .filter(|c| !c.deletes_expense())
    }
}

/// Outcome of a completed cascade
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CascadeReport {
    pub plan: CascadePlan,
    pub settlements_removed: usize,
    pub expenses_removed: usize,
    pub expenses_updated: usize,
}

/// Work out what deleting `member` affects, without touching any store
pub fn plan_member_removal(
    member: &Member,
    expenses: &[Expense],
    settlements: &[SettlementRecord],
) -> CascadePlan {
    let settlements = settlements
        .iter()
        .filter(|s| s.group_id == member.group_id && s.references(member.id))
        .cloned()
        .collect();

    let (paid_expenses, others): (Vec<&Expense>, Vec<&Expense>) = expenses
        .iter()
        .filter(|e| e.group_id == member.group_id)
        .partition(|e| e.paid_by == member.id);

    let participant_changes = others
        .into_iter()
        .filter(|e| e.involves(member.id))
        .map(|e| ParticipantChange {
            expense: e.clone(),
            remaining: e
                .split_between
                .iter()
                .copied()
                .filter(|id| *id != member.id)
                .collect(),
        })
        .collect();

    CascadePlan {
        member: member.clone(),
        settlements,
        paid_expenses: paid_expenses.into_iter().cloned().collect(),
        participant_changes,
    }
}

/// Delete a member and everything that references it
pub fn cascade_delete_member<S: GroupStore + ?Sized>(
    store: &S,
    group_id: GroupId,
    member_id: MemberId,
) -> SplitbookResult<CascadeReport> {
    let member = store
        .find_member(group_id, member_id)?
        .ok_or_else(|| SplitbookError::member_not_found(member_id.to_string()))?;

    let expenses = store.list_expenses(group_id)?;
    let settlements = store.list_settlements(group_id)?;
    let plan = plan_member_removal(&member, &expenses, &settlements);

    debug!(
        member = %member_id,
        settlements = plan.settlements.len(),
        paid_expenses = plan.paid_expenses.len(),
        shared_expenses = plan.participant_changes.len(),
        "member cascade planned"
    );

    let mut run = CascadeRun::new(member_id);

    let settlements_removed = run.step("delete settlement records".into(), || {
        store.delete_settlements_by_member(group_id, member_id)
    })?;

    let mut expenses_removed = run.step("delete paid expenses".into(), || {
        store.delete_expenses_by_payer(group_id, member_id)
    })?;

    let mut expenses_updated = 0;
    for change in &plan.participant_changes {
        let expense_id = change.expense.id;
        if change.deletes_expense() {
            run.step(format!("delete expense {}", expense_id), || {
                store.delete_expense(expense_id)
            })?;
            expenses_removed += 1;
        } else {
            run.step(format!("update expense {}", expense_id), || {
                store.update_expense_participants(expense_id, change.remaining.clone())
            })?;
            expenses_updated += 1;
        }
    }

    run.step("delete member".into(), || {
        if store.delete_member(member_id)? {
            Ok(())
        } else {
            Err(SplitbookError::member_not_found(member_id.to_string()))
        }
    })?;

    Ok(CascadeReport {
        plan,
        settlements_removed,
        expenses_removed,
        expenses_updated,
    })
}

/// Tracks committed steps so a late failure can say what already happened
struct CascadeRun {
    member_id: MemberId,
    completed: Vec<String>,
}

impl CascadeRun {
    fn new(member_id: MemberId) -> Self {
        Self {
            member_id,
            completed: Vec::new(),
        }
    }

    fn step<T>(
        &mut self,
        label: String,
        op: impl FnOnce() -> SplitbookResult<T>,
    ) -> SplitbookResult<T> {
        match op() {
            Ok(value) => {
                debug!(member = %self.member_id, step = %label, "cascade step done");
                self.completed.push(label);
                Ok(value)
            }
            Err(e) if self.completed.is_empty() => Err(e),
            Err(e) => {
                warn!(
                    member = %self.member_id,
                    step = %label,
                    completed = self.completed.len(),
                    error = %e,
                    "member cascade failed part way"
                );
                Err(SplitbookError::PartialCascadeFailure {
                    member_id: self.member_id.to_string(),
                    completed: std::mem::take(&mut self.completed),
                    failed_step: label,
                    message: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, Money};
    use chrono::NaiveDate;
    use std::cell::RefCell;

    /// In-memory store that can be told to fail one operation
    #[derive(Default)]
    struct MemoryStore {
        members: RefCell<Vec<Member>>,
        expenses: RefCell<Vec<Expense>>,
        settlements: RefCell<Vec<SettlementRecord>>,
        fail_on: Option<&'static str>,
    }

    impl MemoryStore {
        fn check(&self, op: &'static str) -> SplitbookResult<()> {
            if self.fail_on == Some(op) {
                Err(SplitbookError::Storage(format!("{} unavailable", op)))
            } else {
                Ok(())
            }
        }
    }

    impl GroupStore for MemoryStore {
        fn list_members(&self, group_id: GroupId) -> SplitbookResult<Vec<Member>> {
            Ok(self
                .members
                .borrow()
                .iter()
                .filter(|m| m.group_id == group_id)
                .cloned()
                .collect())
        }

        fn list_expenses(&self, group_id: GroupId) -> SplitbookResult<Vec<Expense>> {
            Ok(self
                .expenses
                .borrow()
                .iter()
                .filter(|e| e.group_id == group_id)
                .cloned()
                .collect())
        }

        fn list_settlements(&self, group_id: GroupId) -> SplitbookResult<Vec<SettlementRecord>> {
            Ok(self
                .settlements
                .borrow()
                .iter()
                .filter(|s| s.group_id == group_id)
                .cloned()
                .collect())
        }

        fn find_member(
            &self,
            group_id: GroupId,
            member_id: MemberId,
        ) -> SplitbookResult<Option<Member>> {
            Ok(self
                .members
                .borrow()
                .iter()
                .find(|m| m.group_id == group_id && m.id == member_id)
                .cloned())
        }

        fn delete_settlements_by_member(
            &self,
            group_id: GroupId,
            member_id: MemberId,
        ) -> SplitbookResult<usize> {
            self.check("delete_settlements_by_member")?;
            let mut settlements = self.settlements.borrow_mut();
            let before = settlements.len();
            settlements.retain(|s| !(s.group_id == group_id && s.references(member_id)));
            Ok(before - settlements.len())
        }

        fn delete_expenses_by_payer(
            &self,
            group_id: GroupId,
            member_id: MemberId,
        ) -> SplitbookResult<usize> {
            self.check("delete_expenses_by_payer")?;
            let mut expenses = self.expenses.borrow_mut();
            let before = expenses.len();
            expenses.retain(|e| !(e.group_id == group_id && e.paid_by == member_id));
            Ok(before - expenses.len())
        }

        fn update_expense_participants(
            &self,
            expense_id: ExpenseId,
            participants: Vec<MemberId>,
        ) -> SplitbookResult<()> {
            self.check("update_expense_participants")?;
            let mut expenses = self.expenses.borrow_mut();
            let expense = expenses
                .iter_mut()
                .find(|e| e.id == expense_id)
                .ok_or_else(|| SplitbookError::expense_not_found(expense_id.to_string()))?;
            expense.split_between = participants;
            Ok(())
        }

        fn delete_expense(&self, expense_id: ExpenseId) -> SplitbookResult<bool> {
            self.check("delete_expense")?;
            let mut expenses = self.expenses.borrow_mut();
            let before = expenses.len();
            expenses.retain(|e| e.id != expense_id);
            Ok(before != expenses.len())
        }

        fn delete_member(&self, member_id: MemberId) -> SplitbookResult<bool> {
            self.check("delete_member")?;
            let mut members = self.members.borrow_mut();
            let before = members.len();
            members.retain(|m| m.id != member_id);
            Ok(before != members.len())
        }
    }

    struct Scenario {
        store: MemoryStore,
        group: GroupId,
        x: MemberId,
        y: MemberId,
        z: MemberId,
    }

    /// X paid one expense; X shares one expense with Y; X alone shares one
    /// expense Y paid; one expense does not involve X; X has two payments.
    fn scenario() -> Scenario {
        let group = GroupId::new();
        let x = Member::new(group, "X");
        let y = Member::new(group, "Y");
        let z = Member::new(group, "Z");
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let expense = |payer: &Member, split: Vec<MemberId>, desc: &str| {
            Expense::new(group, desc, Money::from_cents(1_200), payer.id, split, day)
        };

        let store = MemoryStore::default();
        store.expenses.replace(vec![
            expense(&x, vec![x.id, y.id], "paid by x"),
            expense(&y, vec![x.id, y.id], "shared with y"),
            expense(&y, vec![x.id], "only x"),
            expense(&z, vec![y.id, z.id], "unrelated"),
        ]);
        store.settlements.replace(vec![
            SettlementRecord::new(group, x.id, y.id, Money::from_cents(500)),
            SettlementRecord::new(group, z.id, x.id, Money::from_cents(300)),
            SettlementRecord::new(group, y.id, z.id, Money::from_cents(100)),
        ]);

        let (xid, yid, zid) = (x.id, y.id, z.id);
        store.members.replace(vec![x, y, z]);
        Scenario {
            store,
            group,
            x: xid,
            y: yid,
            z: zid,
        }
    }

    fn descriptions(store: &MemoryStore) -> Vec<String> {
        store
            .expenses
            .borrow()
            .iter()
            .map(|e| e.description.clone())
            .collect()
    }

    #[test]
    fn test_plan_skips_paid_expenses_in_participant_changes() {
        let s = scenario();
        let member = s.store.find_member(s.group, s.x).unwrap().unwrap();
        let plan = plan_member_removal(
            &member,
            &s.store.list_expenses(s.group).unwrap(),
            &s.store.list_settlements(s.group).unwrap(),
        );

        assert_eq!(plan.settlements.len(), 2);
        assert_eq!(plan.paid_expenses.len(), 1);
        assert_eq!(plan.participant_changes.len(), 2);
        assert_eq!(plan.deleted_expenses().count(), 2);
        assert_eq!(plan.updated_expenses().count(), 1);
    }

    #[test]
    fn test_cascade_leaves_no_references() {
        let s = scenario();
        let report = cascade_delete_member(&s.store, s.group, s.x).unwrap();

        assert_eq!(report.settlements_removed, 2);
        assert_eq!(report.expenses_removed, 2);
        assert_eq!(report.expenses_updated, 1);

        assert_eq!(descriptions(&s.store), vec!["shared with y", "unrelated"]);
        for expense in s.store.expenses.borrow().iter() {
            assert_ne!(expense.paid_by, s.x);
            assert!(!expense.involves(s.x));
            assert!(!expense.split_between.is_empty());
        }
        assert!(s.store.settlements.borrow().iter().all(|r| !r.references(s.x)));
        assert!(s.store.find_member(s.group, s.x).unwrap().is_none());

        let remaining: Vec<MemberId> = s
            .store
            .list_members(s.group)
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(remaining, vec![s.y, s.z]);
    }

    #[test]
    fn test_missing_member() {
        let s = scenario();
        let err = cascade_delete_member(&s.store, s.group, MemberId::new()).unwrap_err();
        assert!(err.is_member_not_found());

        // a member of another group is not found either
        let err = cascade_delete_member(&s.store, GroupId::new(), s.x).unwrap_err();
        assert!(err.is_member_not_found());
    }

    #[test]
    fn test_first_step_failure_is_not_partial() {
        let mut s = scenario();
        s.store.fail_on = Some("delete_settlements_by_member");

        let err = cascade_delete_member(&s.store, s.group, s.x).unwrap_err();
        assert!(matches!(err, SplitbookError::Storage(_)));
        assert_eq!(s.store.expenses.borrow().len(), 4);
    }

    #[test]
    fn test_late_failure_reports_partial_cascade() {
        let mut s = scenario();
        s.store.fail_on = Some("update_expense_participants");

        let err = cascade_delete_member(&s.store, s.group, s.x).unwrap_err();
        match err {
            SplitbookError::PartialCascadeFailure {
                completed,
                failed_step,
                ..
            } => {
                assert_eq!(
                    completed,
                    vec!["delete settlement records", "delete paid expenses"]
                );
                assert!(failed_step.starts_with("update expense"));
            }
            other => panic!("unexpected error: {}", other),
        }

        // committed steps stay committed, the member row is still there
        assert!(s.store.find_member(s.group, s.x).unwrap().is_some());
        assert_eq!(s.store.settlements.borrow().len(), 1);
    }

    #[test]
    fn test_member_with_no_references() {
        let s = scenario();
        let lonely = Member::new(s.group, "W");
        let id = lonely.id;
        s.store.members.borrow_mut().push(lonely);

        let report = cascade_delete_member(&s.store, s.group, id).unwrap();
        assert_eq!(report.settlements_removed, 0);
        assert_eq!(report.expenses_removed, 0);
        assert_eq!(s.store.expenses.borrow().len(), 4);
    }
}
