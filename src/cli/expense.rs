//! Expense CLI commands

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_expense_list;
use crate::error::{SplitbookError, SplitbookResult};
use crate::services::{ExpenseService, GroupService, MemberService, NewExpense};
use crate::storage::Storage;

use super::group::parse_amount;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a shared expense
    Add {
        /// Group name or ID
        group: String,
        /// What the money was spent on
        description: String,
        /// Amount (e.g., "42.50")
        amount: String,
        /// Member who paid (name or ID)
        #[arg(short, long)]
        paid_by: String,
        /// Members sharing the cost, comma separated (default: everyone)
        #[arg(short, long, value_delimiter = ',')]
        split: Vec<String>,
        /// Category label
        #[arg(short, long)]
        category: Option<String>,
        /// Expense date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List the expenses of a group
    List {
        /// Group name or ID
        group: String,
    },
    /// Delete an expense
    Delete {
        /// Group name or ID
        group: String,
        /// Expense ID
        expense: String,
    },
}

pub(crate) fn parse_date(input: &str) -> SplitbookResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|e| {
        SplitbookError::Validation(format!(
            "Invalid date '{}'. Use YYYY-MM-DD. Error: {}",
            input, e
        ))
    })
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> SplitbookResult<()> {
    let groups = GroupService::new(storage);
    let members = MemberService::new(storage);
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            group,
            description,
            amount,
            paid_by,
            split,
            category,
            date,
        } => {
            let group = groups.resolve(&group)?;
            let amount = parse_amount(&amount, "amount")?;
            let payer = members.resolve(group.id, &paid_by)?;

            let split_between = if split.is_empty() {
                members.list(group.id)?.into_iter().map(|m| m.id).collect()
            } else {
                split
                    .iter()
                    .map(|name| members.resolve(group.id, name).map(|m| m.id))
                    .collect::<SplitbookResult<Vec<_>>>()?
            };

            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };

            let expense = service.create(
                NewExpense {
                    group_id: group.id,
                    description,
                    amount,
                    category,
                    paid_by: payer.id,
                    split_between,
                    date,
                },
                &settings.default_category,
            )?;

            println!("Recorded expense: {}", expense.description);
            println!("  Amount:   {}", expense.amount.format_with_symbol(symbol));
            println!("  Paid by:  {}", payer.name);
            println!("  Split:    {} way(s)", expense.participant_count());
            println!("  Category: {}", expense.category_or_fallback());
            println!("  ID:       {}", expense.id);
        }

        ExpenseCommands::List { group } => {
            let details = groups.details(groups.resolve(&group)?.id)?;
            print!(
                "{}",
                format_expense_list(
                    &details.expenses,
                    |id| details.member_name(id),
                    symbol,
                    &settings.date_format
                )
            );
        }

        ExpenseCommands::Delete { group, expense } => {
            let group = groups.resolve(&group)?;
            let found = service.resolve(group.id, &expense)?;
            let deleted = service.delete(found.id)?;
            println!(
                "Deleted expense: {} ({})",
                deleted.description,
                deleted.amount.format_with_symbol(symbol)
            );
        }
    }

    Ok(())
}
