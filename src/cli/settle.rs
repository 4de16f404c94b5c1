//! Settlement CLI commands
//!
//! Suggested transfers, balances, and the log of recorded payments.

use clap::Subcommand;

use crate::config::{SettlementOrder, Settings};
use crate::display::{format_balances, format_settlement_history, format_suggestion_board};
use crate::error::SplitbookResult;
use crate::models::{Member, MemberId};
use crate::services::{GroupService, MemberService, SettlementService};
use crate::settle::SuggestionBoard;
use crate::storage::Storage;

use super::group::parse_amount;

/// Settlement subcommands
#[derive(Subcommand)]
pub enum SettleCommands {
    /// Suggest transfers that settle everyone up
    Suggest {
        /// Group name or ID
        group: String,
        /// Mark suggestions (by number) as already paid, for display only
        #[arg(short, long, value_delimiter = ',')]
        mark: Vec<usize>,
        /// Pair the largest debts first instead of using member order
        #[arg(long)]
        largest_first: bool,
    },
    /// Show what each member paid, owes and is owed
    Balances {
        /// Group name or ID
        group: String,
    },
    /// Record a payment between two members
    Record {
        /// Group name or ID
        group: String,
        /// Member who paid (name or ID)
        #[arg(short, long)]
        from: String,
        /// Member who received the money (name or ID)
        #[arg(short, long)]
        to: String,
        /// Amount paid (e.g., "55.00")
        amount: String,
    },
    /// List recorded payments, newest first
    History {
        /// Group name or ID
        group: String,
    },
}

/// Resolve member IDs to display names, falling back to the ID
fn member_names(members: Vec<Member>) -> impl Fn(MemberId) -> String {
    move |id| {
        members
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

/// Handle a settle command
pub fn handle_settle_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SettleCommands,
) -> SplitbookResult<()> {
    let groups = GroupService::new(storage);
    let members = MemberService::new(storage);
    let service = SettlementService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        SettleCommands::Suggest {
            group,
            mark,
            largest_first,
        } => {
            let group = groups.resolve(&group)?;
            let order = if largest_first {
                SettlementOrder::LargestFirst
            } else {
                settings.settlement_order
            };

            let mut board = SuggestionBoard::new(service.suggest(group.id, order)?);
            for id in mark {
                board.mark_settled(id)?;
            }

            println!("Settle up: {}", group.name);
            let names = member_names(members.list(group.id)?);
            print!("{}", format_suggestion_board(&board, names, symbol));
        }

        SettleCommands::Balances { group } => {
            let group = groups.resolve(&group)?;
            print!("{}", format_balances(&service.balances(group.id)?, symbol));
        }

        SettleCommands::Record {
            group,
            from,
            to,
            amount,
        } => {
            let group = groups.resolve(&group)?;
            let from = members.resolve(group.id, &from)?;
            let to = members.resolve(group.id, &to)?;
            let amount = parse_amount(&amount, "amount")?;

            let record = service.record(group.id, from.id, to.id, amount)?;
            println!(
                "Recorded payment: {} paid {} {}",
                from.name,
                to.name,
                record.amount.format_with_symbol(symbol)
            );
            println!("  ID: {}", record.id);
        }

        SettleCommands::History { group } => {
            let group = groups.resolve(&group)?;
            let records = service.history(group.id)?;
            let names = member_names(members.list(group.id)?);
            print!(
                "{}",
                format_settlement_history(&records, names, symbol, &settings.date_format)
            );
        }
    }

    Ok(())
}
