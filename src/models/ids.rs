//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Check a user-typed identifier against this ID
            ///
            /// Accepts the full UUID, or the short display form with or
            /// without its prefix.
            pub fn matches(&self, s: &str) -> bool {
                let s = s.trim();
                let short = s.strip_prefix($display_prefix).unwrap_or(s);
                let full = self.0.to_string();
                short.len() >= 8 && full.starts_with(&short.to_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }
    };
}

define_id!(GroupId, "grp-");
define_id!(MemberId, "mem-");
define_id!(ExpenseId, "exp-");
define_id!(SettlementId, "stl-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id_creation() {
        let id = MemberId::new();
        assert!(!id.as_uuid().is_nil());
    }

    #[test]
    fn test_id_display() {
        let id = ExpenseId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("exp-"));
        assert_eq!(display.len(), 12); // "exp-" + 8 chars
    }

    #[test]
    fn test_id_serialization() {
        let id = GroupId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: GroupId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_matches_short_and_full_forms() {
        let id = SettlementId::new();
        assert!(id.matches(&id.to_string()));
        assert!(id.matches(&id.as_uuid().to_string()));
        assert!(id.matches(&id.to_string()[4..]));
        assert!(!id.matches("stl-"));
        assert!(!id.matches(&SettlementId::new().to_string()));
    }
}
