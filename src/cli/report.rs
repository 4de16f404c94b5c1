//! CLI commands for reports
//!
//! Group analytics and the cross-group spending overview.

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::error::{SplitbookError, SplitbookResult};
use crate::reports::OverviewReport;
use crate::services::GroupService;
use crate::storage::Storage;

use super::expense::parse_date;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending analytics for one group
    Group {
        /// Group name or ID
        group: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Spending across all groups, with a monthly trend
    Overview {
        /// Reference date for the monthly trend (YYYY-MM-DD, default: today)
        #[arg(long)]
        today: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn to_json<T: serde::Serialize>(report: &T) -> SplitbookResult<String> {
    serde_json::to_string_pretty(report)
        .map_err(|e| SplitbookError::Json(format!("Failed to serialize report: {}", e)))
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> SplitbookResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Group { group, json } => {
            let service = GroupService::new(storage);
            let group = service.resolve(&group)?;
            let report = service.analytics(group.id)?;

            if json {
                println!("{}", to_json(&report)?);
            } else {
                print!("{}", report.format_terminal(symbol));
            }
        }

        ReportCommands::Overview { today, json } => {
            let today = match today {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };

            let report = OverviewReport::generate(
                &storage.groups.get_all()?,
                &storage.expenses.get_all()?,
                today,
                settings.top_group_limit,
                settings.recent_expense_limit,
            );

            if json {
                println!("{}", to_json(&report)?);
            } else {
                print!("{}", report.format_terminal(symbol));
            }
        }
    }

    Ok(())
}
