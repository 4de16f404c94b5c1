//! Per-member balances over a group snapshot
//!
//! This is the one place `paid`, `share` and `net` are computed. The
//! settlement calculator and the group analytics report both build on it.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{SplitbookError, SplitbookResult};
use crate::models::{Expense, Member, MemberId};

/// What one member paid and owes across a group's expenses, in currency units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberBalance {
    pub member_id: MemberId,
    pub name: String,
    /// Sum of the expenses this member paid for
    pub paid: f64,
    /// Sum of this member's equal shares
    pub share: f64,
}

impl MemberBalance {
    fn new(member: &Member) -> Self {
        Self {
            member_id: member.id,
            name: member.name.clone(),
            paid: 0.0,
            share: 0.0,
        }
    }

    /// Positive when the member is owed money, negative when they owe
    pub fn net(&self) -> f64 {
        self.paid - self.share
    }
}

/// Compute balances for every member, in the order the members are given
///
/// Fails with [`SplitbookError::InvalidExpenseReference`] when an expense has
/// no participants or names a payer or participant outside `members`.
pub fn compute_balances(
    members: &[Member],
    expenses: &[Expense],
) -> SplitbookResult<Vec<MemberBalance>> {
    let mut balances: Vec<MemberBalance> = Vec::with_capacity(members.len());
    let mut index: HashMap<MemberId, usize> = HashMap::with_capacity(members.len());
    for member in members {
        if !index.contains_key(&member.id) {
            index.insert(member.id, balances.len());
            balances.push(MemberBalance::new(member));
        }
    }

    for expense in expenses {
        let lookup = |member_id: MemberId, role: &str| {
            index.get(&member_id).copied().ok_or_else(|| {
                SplitbookError::invalid_reference(
                    expense.id.to_string(),
                    format!("{} {} is not a member of the group", role, member_id),
                )
            })
        };

        if expense.split_between.is_empty() {
            return Err(SplitbookError::invalid_reference(
                expense.id.to_string(),
                "expense has no participants",
            ));
        }

        let payer = lookup(expense.paid_by, "payer")?;
        let participants = expense
            .split_between
            .iter()
            .map(|id| lookup(*id, "participant"))
            .collect::<SplitbookResult<Vec<_>>>()?;

        let amount = expense.amount.to_units();
        let share = amount / participants.len() as f64;

        balances[payer].paid += amount;
        for slot in participants {
            balances[slot].share += share;
        }
    }

    Ok(balances)
}
