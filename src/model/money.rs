//! Currency amounts.
//!
//! Amounts are kept at full precision; rounding to cents only happens when an amount
//! is displayed or handed to a payment provider.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::iter::Sum;
use std::ops::{Add, Mul};

/// A US dollar amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub f64);

impl Money {
    pub const ZERO: Money = Money(0.0);

    pub fn amount(self) -> f64 {
        self.0
    }

    /// Amount in whole cents, rounded half away from zero.
    pub fn cents(self) -> i64 {
        (self.0 * 100.0).round() as i64
    }

    /// Amount rounded to the smallest currency unit.
    pub fn rounded(self) -> f64 {
        self.cents() as f64 / 100.0
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.unsigned_abs();
        write!(f, "{sign}${}.{:02}", cents / 100, cents % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        Money(self.0 * f64::from(quantity))
    }
}

impl Mul<f64> for Money {
    type Output = Money;

    fn mul(self, rate: f64) -> Money {
        Money(self.0 * rate)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}
