//! Group analytics report
//!
//! Totals, daily averages, the busiest day, a category breakdown and the
//! per-member paid/share/balance table for a single group.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::SplitbookResult;
use crate::models::{Expense, Group, Member, Money};
use crate::settle::compute_balances;

/// The calendar day with the largest total spend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingDay {
    pub date: NaiveDate,
    pub amount: Money,
}

/// Spend for one category label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub value: Money,
}

/// A member's paid/share/balance triple, in currency units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberStat {
    pub name: String,
    pub paid: f64,
    pub share: f64,
    pub balance: f64,
}

/// Analytics for one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub group_name: String,
    pub budget: Option<Money>,
    pub total_spent: Money,
    pub expense_count: usize,
    /// Total divided by the number of distinct days with an expense
    pub avg_daily_spend: Money,
    pub highest_spending_day: Option<SpendingDay>,
    /// Largest category first
    pub category_breakdown: Vec<CategoryTotal>,
    pub member_stats: Vec<MemberStat>,
    pub total_members: usize,
}

impl AnalyticsReport {
    /// Share of the budget already spent, as a percentage
    pub fn budget_used_percent(&self) -> Option<f64> {
        match self.budget {
            Some(budget) if budget.is_positive() => {
                Some(self.total_spent.cents() as f64 * 100.0 / budget.cents() as f64)
            }
            _ => None,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(symbol);
        let units = |u: f64| Money::from_units_rounded(u).format_with_symbol(symbol);

        let mut output = String::new();
        output.push_str(&format!("Analytics: {}\n", self.group_name));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Total Spent:      {}\n", money(self.total_spent)));
        output.push_str(&format!("Expenses:         {}\n", self.expense_count));
        output.push_str(&format!("Members:          {}\n", self.total_members));
        output.push_str(&format!("Avg per Day:      {}\n", money(self.avg_daily_spend)));

        match &self.highest_spending_day {
            Some(day) => output.push_str(&format!(
                "Highest Day:      {} ({})\n",
                day.date,
                money(day.amount)
            )),
            None => output.push_str("Highest Day:      N/A\n"),
        }

        if let (Some(budget), Some(used)) = (self.budget, self.budget_used_percent()) {
            output.push_str(&format!(
                "Budget:           {} ({:.0}% used)\n",
                money(budget),
                used
            ));
        }

        if !self.category_breakdown.is_empty() {
            output.push_str(&format!("\n{:<30} {:>12}\n", "Category", "Amount"));
            output.push_str(&"-".repeat(43));
            output.push('\n');
            for category in &self.category_breakdown {
                output.push_str(&format!(
                    "{:<30} {:>12}\n",
                    category.name,
                    money(category.value)
                ));
            }
        }

        if !self.member_stats.is_empty() {
            output.push_str(&format!(
                "\n{:<20} {:>12} {:>12} {:>12}\n",
                "Member", "Paid", "Share", "Balance"
            ));
            output.push_str(&"-".repeat(59));
            output.push('\n');
            for stat in &self.member_stats {
                output.push_str(&format!(
                    "{:<20} {:>12} {:>12} {:>12}\n",
                    stat.name,
                    units(stat.paid),
                    units(stat.share),
                    units(stat.balance)
                ));
            }
        }

        output
    }
}

/// Build the analytics report for a group snapshot
pub fn compute_group_analytics(
    group: &Group,
    expenses: &[Expense],
    members: &[Member],
) -> SplitbookResult<AnalyticsReport> {
    let member_stats = compute_balances(members, expenses)?
        .into_iter()
        .map(|b| MemberStat {
            balance: b.net(),
            name: b.name,
            paid: b.paid,
            share: b.share,
        })
        .collect();

    let total_spent: Money = expenses.iter().map(|e| e.amount).sum();

    // per-day totals in first-seen order
    let mut days: Vec<SpendingDay> = Vec::new();
    let mut day_index: HashMap<NaiveDate, usize> = HashMap::new();
    for expense in expenses {
        match day_index.get(&expense.date) {
            Some(&i) => days[i].amount += expense.amount,
            None => {
                day_index.insert(expense.date, days.len());
                days.push(SpendingDay {
                    date: expense.date,
                    amount: expense.amount,
                });
            }
        }
    }

    let avg_daily_spend = if days.is_empty() {
        total_spent
    } else {
        Money::from_units_rounded(total_spent.to_units() / days.len() as f64)
    };

    // strict comparison keeps the first day on ties
    let mut highest_spending_day: Option<SpendingDay> = None;
    for day in days {
        if highest_spending_day
            .as_ref()
            .map_or(true, |best| day.amount > best.amount)
        {
            highest_spending_day = Some(day);
        }
    }

    let mut category_breakdown: Vec<CategoryTotal> = Vec::new();
    for expense in expenses {
        let label = expense.category_or_fallback();
        match category_breakdown.iter_mut().find(|c| c.name == label) {
            Some(total) => total.value += expense.amount,
            None => category_breakdown.push(CategoryTotal {
                name: label.to_string(),
                value: expense.amount,
            }),
        }
    }
    category_breakdown.sort_by(|a, b| b.value.cmp(&a.value));

    Ok(AnalyticsReport {
        group_name: group.name.clone(),
        budget: group.budget,
        total_spent,
        expense_count: expenses.len(),
        avg_daily_spend,
        highest_spending_day,
        category_breakdown,
        member_stats,
        total_members: members.len(),
    })
}
