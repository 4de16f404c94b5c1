//! Member model
//!
//! A participant within a group. Members are not necessarily users of the
//! application; they are the people expenses get split between.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{GroupId, MemberId};

/// A member of a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier
    pub id: MemberId,

    /// The group this member belongs to
    pub group_id: GroupId,

    /// Display name
    pub name: String,

    /// When the member was added
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Create a new member of a group
    pub fn new(group_id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(),
            group_id,
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// Validate the member
    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.name.trim().is_empty() {
            return Err(MemberValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(MemberValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }

    /// Check if this member matches a name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for members
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for MemberValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Member name is required"),
            Self::NameTooLong(len) => {
                write!(f, "Member name too long ({} chars, max 100)", len)
            }
        }
    }
}

impl std::error::Error for MemberValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_member() {
        let group_id = GroupId::new();
        let member = Member::new(group_id, "Alice");
        assert_eq!(member.group_id, group_id);
        assert_eq!(member.to_string(), "Alice");
        assert!(member.validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let member = Member::new(GroupId::new(), "");
        assert_eq!(member.validate(), Err(MemberValidationError::EmptyName));
    }

    #[test]
    fn test_matches_name() {
        let member = Member::new(GroupId::new(), "Alice");
        assert!(member.matches_name(" alice "));
        assert!(!member.matches_name("Alicia"));
    }
}
