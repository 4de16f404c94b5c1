//! Overview report across all groups
//!
//! Lifetime and current-month totals, a six-month spending trend, the
//! groups with the most spend, and the latest expenses. "Today" is passed in
//! so the rolling window is deterministic.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{Expense, ExpenseId, Group, GroupId, Money};

/// Number of months in the spending trend, current month included
pub const TREND_MONTHS: u32 = 6;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Spend within one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySpend {
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub amount: Money,
}

/// Total spend of one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSpend {
    pub group_id: GroupId,
    pub name: String,
    pub value: Money,
}

/// A recent expense with its group's name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentExpense {
    pub expense_id: ExpenseId,
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub group_name: String,
}

/// Overview of spending across every group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewReport {
    pub today: NaiveDate,
    pub total_spent: Money,
    pub current_month_total: Money,
    /// Oldest month first
    pub monthly: Vec<MonthlySpend>,
    pub top_groups: Vec<GroupSpend>,
    pub recent_expenses: Vec<RecentExpense>,
}

/// Step back `back` months from the given year and month
fn months_before(year: i32, month: u32, back: u32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 - back as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

impl OverviewReport {
    /// Build the overview from every group and expense
    pub fn generate(
        groups: &[Group],
        expenses: &[Expense],
        today: NaiveDate,
        top_group_limit: usize,
        recent_limit: usize,
    ) -> Self {
        let total_spent: Money = expenses.iter().map(|e| e.amount).sum();

        let in_month = |e: &&Expense, year: i32, month: u32| {
            e.date.year() == year && e.date.month() == month
        };

        let monthly: Vec<MonthlySpend> = (0..TREND_MONTHS)
            .rev()
            .map(|back| {
                let (year, month) = months_before(today.year(), today.month(), back);
                MonthlySpend {
                    label: MONTH_LABELS[month as usize - 1].to_string(),
                    year,
                    month,
                    amount: expenses
                        .iter()
                        .filter(|e| in_month(e, year, month))
                        .map(|e| e.amount)
                        .sum(),
                }
            })
            .collect();

        let current_month_total = monthly
            .last()
            .map(|m| m.amount)
            .unwrap_or_default();

        let mut per_group: HashMap<GroupId, Money> = HashMap::new();
        for expense in expenses {
            *per_group.entry(expense.group_id).or_default() += expense.amount;
        }

        let mut top_groups: Vec<GroupSpend> = groups
            .iter()
            .map(|g| GroupSpend {
                group_id: g.id,
                name: g.name.clone(),
                value: per_group.get(&g.id).copied().unwrap_or_default(),
            })
            .collect();
        top_groups.sort_by(|a, b| b.value.cmp(&a.value));
        top_groups.truncate(top_group_limit);

        let names: HashMap<GroupId, &str> =
            groups.iter().map(|g| (g.id, g.name.as_str())).collect();

        let mut recent: Vec<&Expense> = expenses.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        let recent_expenses = recent
            .into_iter()
            .take(recent_limit)
            .map(|e| RecentExpense {
                expense_id: e.id,
                description: e.description.clone(),
                amount: e.amount,
                date: e.date,
                group_name: names.get(&e.group_id).copied().unwrap_or("?").to_string(),
            })
            .collect();

        Self {
            today,
            total_spent,
            current_month_total,
            monthly,
            top_groups,
            recent_expenses,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(symbol);

        let mut output = String::new();
        output.push_str(&format!("Overview as of {}\n", self.today));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Total Spent:   {}\n", money(self.total_spent)));
        output.push_str(&format!(
            "This Month:    {}\n",
            money(self.current_month_total)
        ));

        output.push_str("\nLast 6 Months\n");
        for month in &self.monthly {
            output.push_str(&format!(
                "  {} {:<6} {:>12}\n",
                month.label,
                month.year,
                money(month.amount)
            ));
        }

        if !self.top_groups.is_empty() {
            output.push_str("\nTop Groups\n");
            for group in &self.top_groups {
                output.push_str(&format!("  {:<30} {:>12}\n", group.name, money(group.value)));
            }
        }

        if !self.recent_expenses.is_empty() {
            output.push_str("\nRecent Expenses\n");
            for expense in &self.recent_expenses {
                output.push_str(&format!(
                    "  {} {:<24} {:<16} {:>12}\n",
                    expense.date,
                    expense.description,
                    expense.group_name,
                    money(expense.amount)
                ));
            }
        }

        output
    }
}
