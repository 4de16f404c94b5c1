//! Debt settlement engine
//!
//! Balances, suggested transfers, presentational settle marks and the
//! member deletion cascade. Everything except the cascade is a pure function
//! of a group snapshot.

pub mod balance;
pub mod calculator;
pub mod cascade;
pub mod marking;

pub use balance::{compute_balances, MemberBalance};
pub use calculator::{
    compute_settlements, compute_settlements_with_order, settle_balances, TransferSuggestion,
    SETTLEMENT_EPSILON,
};
pub use cascade::{
    cascade_delete_member, plan_member_removal, CascadePlan, CascadeReport, ParticipantChange,
};
pub use marking::{BoardEntry, SuggestionBoard};
