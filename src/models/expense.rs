//! Expense model
//!
//! An expense is paid by exactly one member and shared equally between a
//! non-empty list of participant members. Expenses are never edited; the only
//! in-place change is dropping a participant when that member is deleted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::ids::{ExpenseId, GroupId, MemberId};
use super::money::Money;

/// Category used for expenses recorded without one
pub const FALLBACK_CATEGORY: &str = "Misc";

/// A shared expense within a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// The group this expense belongs to
    pub group_id: GroupId,

    /// What the money was spent on
    pub description: String,

    /// Total amount paid
    pub amount: Money,

    /// Category label (None or blank means uncategorized)
    #[serde(default)]
    pub category: Option<String>,

    /// The member who paid
    pub paid_by: MemberId,

    /// Members sharing the cost equally, in the order they were given
    pub split_between: Vec<MemberId>,

    /// Calendar day of the expense
    pub date: NaiveDate,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        group_id: GroupId,
        description: impl Into<String>,
        amount: Money,
        paid_by: MemberId,
        split_between: Vec<MemberId>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            group_id,
            description: description.into(),
            amount,
            category: None,
            paid_by,
            split_between,
            date,
            created_at: Utc::now(),
        }
    }

    /// Set the category label
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// The category label, or the fallback for untagged expenses
    pub fn category_or_fallback(&self) -> &str {
        match self.category.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ => FALLBACK_CATEGORY,
        }
    }

    /// Number of participants sharing this expense
    pub fn participant_count(&self) -> usize {
        self.split_between.len()
    }

    /// Check if a member participates in this expense
    pub fn involves(&self, member_id: MemberId) -> bool {
        self.split_between.contains(&member_id)
    }

    /// Each participant's share, in currency units
    pub fn share_per_participant(&self) -> f64 {
        if self.split_between.is_empty() {
            0.0
        } else {
            self.amount.to_units() / self.split_between.len() as f64
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        if self.split_between.is_empty() {
            return Err(ExpenseValidationError::NoParticipants);
        }

        let mut seen = HashSet::new();
        for member_id in &self.split_between {
            if !seen.insert(member_id) {
                return Err(ExpenseValidationError::DuplicateParticipant(*member_id));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NonPositiveAmount(Money),
    NoParticipants,
    DuplicateParticipant(MemberId),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Expense description is required"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive, got {}", amount)
            }
            Self::NoParticipants => write!(f, "Expense must be split between at least one member"),
            Self::DuplicateParticipant(id) => {
                write!(f, "Member {} is listed more than once in the split", id)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
