//! Reports module for splitbook
//!
//! Provides per-group analytics and a cross-group spending overview.

pub mod group_analytics;
pub mod overview;

pub use group_analytics::{
    compute_group_analytics, AnalyticsReport, CategoryTotal, MemberStat, SpendingDay,
};
pub use overview::{GroupSpend, MonthlySpend, OverviewReport, RecentExpense};
