//! Money type for representing currency amounts
//!
//! Stored amounts (expenses, recorded payments, suggested transfers) are kept
//! in whole cents. Equal splits produce fractional cents, so derived balances
//! are computed in `f64` currency units and rounded back with
//! [`Money::from_units_rounded`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, SubAssign};
use thiserror::Error;

/// A monetary amount in cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

/// Why a user-entered amount was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("Invalid money format: {0}")]
    InvalidFormat(String),

    #[error("At most two decimal places are allowed: {0}")]
    TooManyDecimals(String),

    #[error("Amount is too large: {0}")]
    OutOfRange(String),
}

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use splitbook::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Round a currency-unit amount to the nearest cent
    ///
    /// Half-cent ties round away from zero.
    ///
    /// # Examples
    /// ```
    /// use splitbook::models::Money;
    /// assert_eq!(Money::from_units_rounded(33.333).cents(), 3333);
    /// assert_eq!(Money::from_units_rounded(-0.126).cents(), -13);
    /// ```
    pub fn from_units_rounded(units: f64) -> Self {
        Self((units * 100.0).round() as i64)
    }

    /// The amount in currency units (e.g. 10.5 for $10.50)
    pub fn to_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse a user-entered amount
    ///
    /// Accepts whole units or up to two decimals, with an optional leading
    /// `-` and `$`: "10", "10.5", "$10.50", "-10.50".
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let trimmed = input.trim();
        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let (whole, fraction) = rest.split_once('.').unwrap_or((rest, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooManyDecimals(trimmed.to_string()));
        }

        let out_of_range = || MoneyParseError::OutOfRange(trimmed.to_string());
        let units: i64 = whole.parse().map_err(|_| out_of_range())?;
        // fraction is at most two ASCII digits here
        let fraction_cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse::<i64>().map_err(|_| invalid())?,
        };

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_cents))
            .ok_or_else(out_of_range)?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol, e.g. "-€12.05"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}{}.{:02}", sign, symbol, abs / 100, abs % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-$10.50");
        assert_eq!(Money::from_cents(5).format_with_symbol("€"), "€0.05");
        assert_eq!(Money::from_cents(-5).format_with_symbol("€"), "-€0.05");
    }

    #[test]
    fn test_arithmetic() {
        let mut a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((-a).cents(), -1000);
        assert_eq!(a.min(b), b);
        a -= b;
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse(" 10 ").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10.").unwrap().cents(), 1000);
        assert_eq!(Money::parse("-$0.07").unwrap().cents(), -7);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for input in ["ten", "", ".", ".50", "1.2.3", "+5", "1,000", "10.1é", "１０"] {
            assert!(
                matches!(Money::parse(input), Err(MoneyParseError::InvalidFormat(_))),
                "{:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_extra_decimals() {
        assert_eq!(
            Money::parse("10.999"),
            Err(MoneyParseError::TooManyDecimals("10.999".into()))
        );
        assert!(Money::parse("0.001").is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(matches!(
            Money::parse("99999999999999999.00"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        let max_units = (i64::MAX / 100).to_string();
        assert!(Money::parse(&max_units).is_ok());
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(Money::from_cents(4550).to_units(), 45.5);
        // 100 / 3 shares leave float drift that rounding absorbs
        let share = 100.0 / 3.0;
        assert_eq!(Money::from_units_rounded(share * 3.0).cents(), 10000);
        assert_eq!(Money::from_units_rounded(-145.0000000001).cents(), -14500);
    }

    #[test]
    fn test_half_cent_rounds_away_from_zero() {
        assert_eq!(Money::from_units_rounded(0.125).cents(), 13);
        assert_eq!(Money::from_units_rounded(-0.125).cents(), -13);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Money::from_cents(1050)).unwrap();
        assert_eq!(json, "1050");
    }
}
