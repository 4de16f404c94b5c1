//! Group CLI commands
//!
//! Implements CLI commands for group management.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_group_details, format_group_list};
use crate::error::{SplitbookError, SplitbookResult};
use crate::models::Money;
use crate::services::GroupService;
use crate::storage::Storage;

/// Group subcommands
#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create a new group
    Create {
        /// Group name
        name: String,
        /// Optional spending budget (e.g., "500.00" or "500")
        #[arg(short, long)]
        budget: Option<String>,
    },
    /// List all groups with their totals
    List,
    /// Show members, expenses and recorded payments of a group
    Show {
        /// Group name or ID
        group: String,
    },
    /// Delete a group and everything in it
    Delete {
        /// Group name or ID
        group: String,
        /// Skip the confirmation notice
        #[arg(short, long)]
        force: bool,
    },
}

/// Parse a user-entered amount
pub(crate) fn parse_amount(input: &str, what: &str) -> SplitbookResult<Money> {
    Money::parse(input).map_err(|e| {
        SplitbookError::Validation(format!(
            "Invalid {} '{}'. Use a format like '12.50' or '12'. Error: {}",
            what, input, e
        ))
    })
}

/// Handle a group command
pub fn handle_group_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GroupCommands,
) -> SplitbookResult<()> {
    let service = GroupService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        GroupCommands::Create { name, budget } => {
            let budget = budget
                .as_deref()
                .map(|b| parse_amount(b, "budget"))
                .transpose()?;

            let group = service.create(&name, budget)?;
            println!("Created group: {}", group.name);
            if let Some(budget) = group.budget {
                println!("  Budget: {}", budget.format_with_symbol(symbol));
            }
            println!("  ID: {}", group.id);
        }

        GroupCommands::List => {
            let summaries = service.list()?;
            print!("{}", format_group_list(&summaries, symbol));
        }

        GroupCommands::Show { group } => {
            let found = service.resolve(&group)?;
            let details = service.details(found.id)?;
            print!(
                "{}",
                format_group_details(&details, symbol, &settings.date_format)
            );
        }

        GroupCommands::Delete { group, force } => {
            let found = service.resolve(&group)?;
            if !force {
                println!(
                    "This deletes '{}' with all of its members, expenses and payments.",
                    found.name
                );
                println!("Re-run with --force to confirm.");
                return Ok(());
            }

            let deletion = service.delete(found.id)?;
            println!("Deleted group: {}", found.name);
            println!(
                "  Removed {} member(s), {} expense(s), {} payment(s)",
                deletion.members, deletion.expenses, deletion.settlements
            );
        }
    }

    Ok(())
}
