//! Settlement calculator
//!
//! Turns a group's balances into an ordered list of transfers that brings
//! every member back to zero. Pure computation over a snapshot; recomputed on
//! every view and never persisted.

use serde::Serialize;
use tracing::trace;

use super::balance::{compute_balances, MemberBalance};
use crate::config::SettlementOrder;
use crate::error::SplitbookResult;
use crate::models::{Expense, Member, MemberId, Money};

/// Balances at or within one cent of zero count as settled
pub const SETTLEMENT_EPSILON: Money = Money::from_cents(1);

/// A suggested payment from a debtor to a creditor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransferSuggestion {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

struct Outstanding {
    member_id: MemberId,
    remaining: Money,
}

/// Suggest transfers for a group, pairing members in insertion order
pub fn compute_settlements(
    members: &[Member],
    expenses: &[Expense],
) -> SplitbookResult<Vec<TransferSuggestion>> {
    compute_settlements_with_order(members, expenses, SettlementOrder::Insertion)
}

/// Suggest transfers for a group using the given pairing order
pub fn compute_settlements_with_order(
    members: &[Member],
    expenses: &[Expense],
    order: SettlementOrder,
) -> SplitbookResult<Vec<TransferSuggestion>> {
    let balances = compute_balances(members, expenses)?;
    Ok(settle_balances(&balances, order))
}

/// Greedily pair debtors with creditors
///
/// Net balances are rounded to whole cents first. Each step settles the
/// smaller of the two outstanding amounts, then moves past whichever side
/// has at most [`SETTLEMENT_EPSILON`] left. Anything still outstanding when
/// one side runs out is rounding residue and is dropped. Half-cent nets
/// round away from zero, so -0.005 becomes -0.01 rather than 0.00.
pub fn settle_balances(
    balances: &[MemberBalance],
    order: SettlementOrder,
) -> Vec<TransferSuggestion> {
    let mut debtors = Vec::new();
    let mut creditors = Vec::new();

    for balance in balances {
        let net = Money::from_units_rounded(balance.net());
        if net < -SETTLEMENT_EPSILON {
            debtors.push(Outstanding {
                member_id: balance.member_id,
                remaining: -net,
            });
        } else if net > SETTLEMENT_EPSILON {
            creditors.push(Outstanding {
                member_id: balance.member_id,
                remaining: net,
            });
        }
    }

    if order == SettlementOrder::LargestFirst {
        // sort_by is stable, so equal amounts keep insertion order
        debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    }

    let mut transfers = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let debtor = &mut debtors[i];
        let creditor = &mut creditors[j];

        let amount = debtor.remaining.min(creditor.remaining);
        transfers.push(TransferSuggestion {
            from: debtor.member_id,
            to: creditor.member_id,
            amount,
        });

        debtor.remaining -= amount;
        creditor.remaining -= amount;

        if debtor.remaining <= SETTLEMENT_EPSILON {
            i += 1;
        }
        if creditor.remaining <= SETTLEMENT_EPSILON {
            j += 1;
        }
    }

    trace!(
        debtors = debtors.len(),
        creditors = creditors.len(),
        transfers = transfers.len(),
        "settlement pairing finished"
    );

    transfers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupId;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    const TOLERANCE: f64 = 0.01 + 1e-9;

    struct Fixture {
        group: GroupId,
        members: Vec<Member>,
        expenses: Vec<Expense>,
    }

    impl Fixture {
        fn new(names: &[&str]) -> Self {
            let group = GroupId::new();
            Self {
                group,
                members: names.iter().map(|n| Member::new(group, *n)).collect(),
                expenses: Vec::new(),
            }
        }

        fn id(&self, index: usize) -> MemberId {
            self.members[index].id
        }

        fn pay(&mut self, cents: i64, payer: usize, split: &[usize]) {
            let split = split.iter().map(|i| self.id(*i)).collect();
            self.expenses.push(Expense::new(
                self.group,
                "Shared",
                Money::from_cents(cents),
                self.id(payer),
                split,
                NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            ));
        }

        fn settle(&self, order: SettlementOrder) -> Vec<TransferSuggestion> {
            compute_settlements_with_order(&self.members, &self.expenses, order).unwrap()
        }

        /// Checks every property a suggestion list must satisfy
        fn assert_valid(&self, transfers: &[TransferSuggestion]) {
            let balances = compute_balances(&self.members, &self.expenses).unwrap();
            let mut residual: HashMap<MemberId, f64> =
                balances.iter().map(|b| (b.member_id, b.net())).collect();

            for t in transfers {
                assert_ne!(t.from, t.to, "self transfer");
                assert!(t.amount.is_positive(), "non-positive transfer");
                *residual.get_mut(&t.from).unwrap() += t.amount.to_units();
                *residual.get_mut(&t.to).unwrap() -= t.amount.to_units();
            }

            for (member, left) in residual {
                assert!(left.abs() <= TOLERANCE, "{} left with {}", member, left);
            }

            let debtors = balances
                .iter()
                .filter(|b| Money::from_units_rounded(b.net()) < -SETTLEMENT_EPSILON)
                .count();
            let creditors = balances
                .iter()
                .filter(|b| Money::from_units_rounded(b.net()) > SETTLEMENT_EPSILON)
                .count();
            let bound = if debtors == 0 || creditors == 0 {
                0
            } else {
                debtors + creditors - 1
            };
            assert!(transfers.len() <= bound);
        }
    }

    #[test]
    fn test_worked_example() {
        let mut f = Fixture::new(&["A", "B", "C"]);
        f.pay(30_000, 0, &[0, 1, 2]);
        f.pay(9_000, 1, &[1, 2]);

        let transfers = compute_settlements(&f.members, &f.expenses).unwrap();
        assert_eq!(
            transfers,
            vec![
                TransferSuggestion {
                    from: f.id(1),
                    to: f.id(0),
                    amount: Money::from_cents(5_500),
                },
                TransferSuggestion {
                    from: f.id(2),
                    to: f.id(0),
                    amount: Money::from_cents(14_500),
                },
            ]
        );
        f.assert_valid(&transfers);
    }

    #[test]
    fn test_no_expenses_means_no_transfers() {
        let f = Fixture::new(&["A", "B"]);
        assert!(f.settle(SettlementOrder::Insertion).is_empty());
        assert!(compute_settlements(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_balanced_group_means_no_transfers() {
        let mut f = Fixture::new(&["A", "B"]);
        f.pay(5_000, 0, &[0, 1]);
        f.pay(5_000, 1, &[0, 1]);
        assert!(f.settle(SettlementOrder::Insertion).is_empty());

        // a lone one-cent imbalance is below the epsilon
        let mut g = Fixture::new(&["A", "B"]);
        g.pay(2, 0, &[0, 1]);
        assert!(g.settle(SettlementOrder::Insertion).is_empty());
    }

    #[test]
    fn test_uneven_three_way_split() {
        let mut f = Fixture::new(&["A", "B", "C"]);
        f.pay(10_000, 0, &[0, 1, 2]);

        let transfers = f.settle(SettlementOrder::Insertion);
        assert_eq!(transfers.len(), 2);
        assert!(transfers
            .iter()
            .all(|t| t.to == f.id(0) && t.amount == Money::from_cents(3_333)));
        f.assert_valid(&transfers);
    }

    #[test]
    fn test_chain_of_debts_follows_insertion_order() {
        let mut f = Fixture::new(&["A", "B", "C", "D"]);
        f.pay(6_000, 0, &[2, 3]);
        f.pay(4_000, 1, &[2, 3]);

        // C and D each owe 50; A is owed 60, B is owed 40
        let transfers = f.settle(SettlementOrder::Insertion);
        let pairs: Vec<(MemberId, MemberId, i64)> = transfers
            .iter()
            .map(|t| (t.from, t.to, t.amount.cents()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (f.id(2), f.id(0), 5_000),
                (f.id(3), f.id(0), 1_000),
                (f.id(3), f.id(1), 4_000),
            ]
        );
        f.assert_valid(&transfers);
    }

    #[test]
    fn test_largest_first_orders_by_magnitude() {
        let mut f = Fixture::new(&["A", "B", "C"]);
        f.pay(1_000, 0, &[1]);
        f.pay(9_000, 0, &[2]);

        let insertion = f.settle(SettlementOrder::Insertion);
        assert_eq!(insertion[0].from, f.id(1));

        let largest = f.settle(SettlementOrder::LargestFirst);
        assert_eq!(largest[0].from, f.id(2));
        assert_eq!(largest[0].amount, Money::from_cents(9_000));
        f.assert_valid(&largest);
    }

    #[test]
    fn test_mixed_groups_satisfy_properties() {
        let mut f = Fixture::new(&["A", "B", "C", "D", "E"]);
        f.pay(12_345, 0, &[0, 1, 2]);
        f.pay(6_789, 1, &[1, 3, 4]);
        f.pay(1_001, 4, &[0, 4]);
        f.pay(250, 2, &[3]);
        f.pay(9_999, 3, &[0, 1, 2, 3, 4]);

        for order in [SettlementOrder::Insertion, SettlementOrder::LargestFirst] {
            let transfers = f.settle(order);
            assert!(!transfers.is_empty());
            f.assert_valid(&transfers);
        }
    }

    #[test]
    fn test_invalid_reference_aborts() {
        let mut f = Fixture::new(&["A", "B"]);
        f.pay(1_000, 0, &[0, 1]);
        let stranger = Member::new(f.group, "Stranger");
        f.expenses.push(Expense::new(
            f.group,
            "Taxi",
            Money::from_cents(500),
            stranger.id,
            vec![f.id(0)],
            NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
        ));

        assert!(compute_settlements(&f.members, &f.expenses).is_err());
    }
}
