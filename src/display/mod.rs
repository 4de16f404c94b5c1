//! Display formatting for terminal output
//!
//! Provides utilities for formatting groups, expenses, balances and
//! settlement suggestions as plain-text tables.

pub mod expense;
pub mod group;
pub mod settlement;

pub use expense::format_expense_list;
pub use group::{format_group_details, format_group_list};
pub use settlement::{format_balances, format_settlement_history, format_suggestion_board};
