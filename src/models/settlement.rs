//! Settlement record model
//!
//! A recorded real-world payment between two members. Records are a plain log
//! of what was entered; they never feed back into suggested transfers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{GroupId, MemberId, SettlementId};
use super::money::Money;

/// A payment one member made to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRecord {
    /// Unique identifier
    pub id: SettlementId,

    /// The group this payment belongs to
    pub group_id: GroupId,

    /// Member who paid
    pub from: MemberId,

    /// Member who received the money
    pub to: MemberId,

    /// Amount paid
    pub amount: Money,

    /// When the payment was recorded
    pub created_at: DateTime<Utc>,
}

impl SettlementRecord {
    /// Create a new settlement record
    pub fn new(group_id: GroupId, from: MemberId, to: MemberId, amount: Money) -> Self {
        Self {
            id: SettlementId::new(),
            group_id,
            from,
            to,
            amount,
            created_at: Utc::now(),
        }
    }

    /// Check if a member is either side of this payment
    pub fn references(&self, member_id: MemberId) -> bool {
        self.from == member_id || self.to == member_id
    }

    /// Validate the record
    pub fn validate(&self) -> Result<(), SettlementValidationError> {
        if self.from == self.to {
            return Err(SettlementValidationError::SelfPayment);
        }

        if !self.amount.is_positive() {
            return Err(SettlementValidationError::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for SettlementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.amount)
    }
}

/// Validation errors for settlement records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementValidationError {
    SelfPayment,
    NonPositiveAmount(Money),
}

impl fmt::Display for SettlementValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfPayment => write!(f, "A member cannot pay themselves"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Payment amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for SettlementValidationError {}
