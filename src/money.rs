use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Monetary amount stored as integer minor units (cents).
///
/// Keeping currency in integer cents makes balance conservation exact:
/// a settlement moves cents between entries and can never create or lose
/// fractions to floating-point rounding.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(transparent)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Builds an amount from whole currency units.
    pub fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Parses a decimal amount such as `300`, `300.5`, or `-12.50`.
    ///
    /// At most two fraction digits are accepted; anything finer has no
    /// representation in minor units and is rejected outright.
    pub fn parse(input: &str) -> Result<Money, LedgerError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::Validation("amount is empty".into()));
        }
        let (sign, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (-1i64, rest),
            None => (1i64, trimmed),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid_amount(input));
        }
        if frac_part.len() > 2 {
            return Err(LedgerError::Validation(format!(
                "amount `{}` has more than two decimal places",
                input
            )));
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid_amount(input));
        }
        let units: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| invalid_amount(input))?
        };
        let mut cents: i64 = if frac_part.is_empty() {
            0
        } else {
            frac_part.parse().map_err(|_| invalid_amount(input))?
        };
        if frac_part.len() == 1 {
            cents *= 10;
        }
        units
            .checked_mul(100)
            .and_then(|total| total.checked_add(cents))
            .and_then(|total| total.checked_mul(sign))
            .map(Money)
            .ok_or_else(|| invalid_amount(input))
    }
}

fn invalid_amount(input: &str) -> LedgerError {
    LedgerError::Validation(format!("invalid amount `{}`", input))
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.0.abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, cents / 100, cents % 100)
    }
}

impl FromStr for Money {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

// Operators go through the checked forms so an overflow can never wrap
// silently in release builds; ledger-scale amounts are nowhere near i64
// range, so a failure here is a corrupted-state bug, not a user error.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        self.checked_add(rhs).expect("money addition overflowed")
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        self.checked_sub(rhs).expect("money subtraction overflowed")
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}
