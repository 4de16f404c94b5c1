//! Service layer for splitbook
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, audit logging, and cross-entity operations such as
//! the member deletion cascade.

pub mod expense;
pub mod group;
pub mod member;
pub mod settlement;

pub use expense::{ExpenseService, NewExpense};
pub use group::{GroupDeletion, GroupDetails, GroupService, GroupSummary};
pub use member::MemberService;
pub use settlement::SettlementService;
