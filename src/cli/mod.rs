//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod export;
pub mod group;
pub mod log;
pub mod member;
pub mod report;
pub mod settle;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use group::{handle_group_command, GroupCommands};
pub use log::{handle_log_command, LogArgs};
pub use member::{handle_member_command, MemberCommands};
pub use report::{handle_report_command, ReportCommands};
pub use settle::{handle_settle_command, SettleCommands};
