//! Group display formatting
//!
//! Formats groups for terminal output in table and detail views.

use crate::models::Money;
use crate::services::{GroupDetails, GroupSummary};

use super::expense::format_expense_list;

/// Format a list of groups with totals as a table
pub fn format_group_list(summaries: &[GroupSummary], symbol: &str) -> String {
    if summaries.is_empty() {
        return "No groups found.\n".to_string();
    }

    let name_width = summaries
        .iter()
        .map(|s| s.group.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>7}  {:>8}  {:>12}  {:>12}\n",
        "Name",
        "Members",
        "Expenses",
        "Total",
        "Budget",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->7}  {:->8}  {:->12}  {:->12}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for summary in summaries {
        let budget = summary
            .group
            .budget
            .map(|b| b.format_with_symbol(symbol))
            .unwrap_or_else(|| "-".to_string());

        output.push_str(&format!(
            "{:<name_width$}  {:>7}  {:>8}  {:>12}  {:>12}\n",
            summary.group.name,
            summary.member_count,
            summary.expense_count,
            summary.total_expenses.format_with_symbol(symbol),
            budget,
            name_width = name_width,
        ));
    }

    let total: Money = summaries.iter().map(|s| s.total_expenses).sum();
    output.push_str(&format!(
        "\nTotal across {} group(s): {}\n",
        summaries.len(),
        total.format_with_symbol(symbol)
    ));

    output
}

/// Format a group's members, expenses and recorded payments
pub fn format_group_details(details: &GroupDetails, symbol: &str, date_format: &str) -> String {
    let group = &details.group;
    let total = details.total_expenses();

    let mut output = String::new();
    output.push_str(&format!("Group: {}\n", group.name));
    output.push_str(&format!("ID:    {}\n", group.id));
    output.push_str(&format!("Total: {}\n", total.format_with_symbol(symbol)));

    if let Some(budget) = group.budget.filter(|b| b.is_positive()) {
        let used = total.cents() as f64 * 100.0 / budget.cents() as f64;
        let flag = if total > budget { "  OVER BUDGET" } else { "" };
        output.push_str(&format!(
            "Budget: {} ({:.0}% used){}\n",
            budget.format_with_symbol(symbol),
            used,
            flag
        ));
    }

    output.push_str(&format!("\nMembers ({})\n", details.members.len()));
    if details.members.is_empty() {
        output.push_str("  (none)\n");
    }
    for member in &details.members {
        output.push_str(&format!("  {}  {}\n", member.id, member.name));
    }

    output.push_str(&format!("\nExpenses ({})\n", details.expenses.len()));
    output.push_str(&format_expense_list(
        &details.expenses,
        |id| details.member_name(id),
        symbol,
        date_format,
    ));

    if !details.settlements.is_empty() {
        output.push_str(&format!("\nRecorded Payments ({})\n", details.settlements.len()));
        for record in &details.settlements {
            output.push_str(&format!(
                "  {}  {} paid {} {}\n",
                record.created_at.format(date_format),
                details.member_name(record.from),
                details.member_name(record.to),
                record.amount.format_with_symbol(symbol)
            ));
        }
    }

    output
}
