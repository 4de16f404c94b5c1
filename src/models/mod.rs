//! Core data models for splitbook
//!
//! This module contains the data structures of the shared-expense domain:
//! groups, members, expenses and recorded settlement payments.

pub mod expense;
pub mod group;
pub mod ids;
pub mod member;
pub mod money;
pub mod settlement;

pub use expense::{Expense, ExpenseValidationError, FALLBACK_CATEGORY};
pub use group::Group;
pub use ids::{ExpenseId, GroupId, MemberId, SettlementId};
pub use member::Member;
pub use money::Money;
pub use settlement::SettlementRecord;
