//! Member CLI commands

use clap::Subcommand;

use crate::error::SplitbookResult;
use crate::services::{GroupService, MemberService};
use crate::storage::Storage;

/// Member subcommands
#[derive(Subcommand)]
pub enum MemberCommands {
    /// Add a member to a group
    Add {
        /// Group name or ID
        group: String,
        /// Member name
        name: String,
    },
    /// List the members of a group
    List {
        /// Group name or ID
        group: String,
    },
    /// Remove a member, their payments and the expenses they paid for
    Remove {
        /// Group name or ID
        group: String,
        /// Member name or ID
        member: String,
    },
}

/// Handle a member command
pub fn handle_member_command(storage: &Storage, cmd: MemberCommands) -> SplitbookResult<()> {
    let groups = GroupService::new(storage);
    let service = MemberService::new(storage);

    match cmd {
        MemberCommands::Add { group, name } => {
            let group = groups.resolve(&group)?;
            let member = service.add(group.id, &name)?;
            println!("Added {} to {}", member.name, group.name);
            println!("  ID: {}", member.id);
        }

        MemberCommands::List { group } => {
            let group = groups.resolve(&group)?;
            let members = service.list(group.id)?;
            if members.is_empty() {
                println!("No members in {}.", group.name);
            }
            for member in members {
                println!("{}  {}", member.id, member.name);
            }
        }

        MemberCommands::Remove { group, member } => {
            let group = groups.resolve(&group)?;
            let member = service.resolve(group.id, &member)?;
            let report = service.remove(group.id, member.id)?;

            println!("Removed {} from {}", member.name, group.name);
            println!("  Payments removed:       {}", report.settlements_removed);
            println!("  Expenses removed:       {}", report.expenses_removed);
            println!("  Expenses re-split:      {}", report.expenses_updated);
        }
    }

    Ok(())
}
