//! Group model
//!
//! A named collection of members and expenses, optionally with a spending budget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GroupId;
use super::money::Money;

/// A group of people sharing expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier
    pub id: GroupId,

    /// Group name
    pub name: String,

    /// Optional spending budget for the whole group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Money>,

    /// When the group was created
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Create a new group without a budget
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            budget: None,
            created_at: Utc::now(),
        }
    }

    /// Create a new group with a budget
    pub fn with_budget(name: impl Into<String>, budget: Money) -> Self {
        let mut group = Self::new(name);
        group.budget = Some(budget);
        group
    }

    /// Validate the group
    pub fn validate(&self) -> Result<(), GroupValidationError> {
        if self.name.trim().is_empty() {
            return Err(GroupValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(GroupValidationError::NameTooLong(self.name.len()));
        }

        if let Some(budget) = self.budget {
            if budget.is_negative() {
                return Err(GroupValidationError::NegativeBudget(budget));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeBudget(Money),
}

impl fmt::Display for GroupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Group name is required"),
            Self::NameTooLong(len) => write!(f, "Group name too long ({} chars, max 100)", len),
            Self::NegativeBudget(budget) => write!(f, "Budget cannot be negative: {}", budget),
        }
    }
}

impl std::error::Error for GroupValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_group() {
        let group = Group::new("Lisbon Trip");
        assert_eq!(group.name, "Lisbon Trip");
        assert!(group.budget.is_none());
        assert!(group.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            Group::new("   ").validate(),
            Err(GroupValidationError::EmptyName)
        );

        let group = Group::with_budget("Flat", Money::from_cents(-1));
        assert!(matches!(
            group.validate(),
            Err(GroupValidationError::NegativeBudget(_))
        ));
    }

    #[test]
    fn test_budget_not_serialized_when_absent() {
        let json = serde_json::to_string(&Group::new("Flat")).unwrap();
        assert!(!json.contains("budget"));
    }
}
