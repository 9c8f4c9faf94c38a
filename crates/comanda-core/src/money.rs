//! # Money Module
//!
//! Provides the `Money` type for credit balances, menu prices, delivery fees
//! and order totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Credit 500.00 - 35.00 - 8.00 - 5.00 as f64 can drift by fractions     │
//! │  of a cent, and a balance of 0.0000001 is "enough" for nothing.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    50000 - 3500 - 800 - 500 = 45200 cents, exactly                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use comanda_core::money::Money;
//!
//! let pizza = Money::from_major_minor(35, 0);
//! let soda = Money::from_cents(800);
//! let fee = Money::from_cents(500);
//!
//! let total: Money = [pizza, soda, fee].into_iter().sum();
//! assert_eq!(total, Money::from_cents(4800));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction is always defined; guards that forbid a
///   negative result (credit debits) live on the entity, not here
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: serde support for snapshot files, ordering for comparisons
///
/// ## Where Money is Used
/// ```text
/// MenuItem.price ──► Order.items (snapshot) ──► Order.subtotal
///                                                   │
/// Restaurant.delivery_fee ──► Order.delivery_fee ───┴──► Order.total
///                                                           │
/// Customer.credit ◄──────────── debit_credit(total) ◄───────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// let price = Money::from_cents(3500);
    /// assert_eq!(price.cents(), 3500);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// let credit = Money::from_major_minor(452, 0);
    /// assert_eq!(credit.cents(), 45200);
    ///
    /// let negative = Money::from_major_minor(-5, 50);
    /// assert_eq!(negative.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(4850).major(), 48);
    /// assert_eq!(Money::from_cents(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Subtracts `other`, returning `None` when the result would be negative.
    ///
    /// This is the primitive behind credit debits: a balance never goes
    /// below zero, so the check and the subtraction happen together.
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// let credit = Money::from_cents(1000);
    /// assert_eq!(credit.checked_debit(Money::from_cents(400)), Some(Money::from_cents(600)));
    /// assert_eq!(credit.checked_debit(Money::from_cents(4800)), None);
    /// ```
    pub fn checked_debit(&self, other: Money) -> Option<Money> {
        let remaining = self.0.checked_sub(other.0)?;
        if remaining < 0 {
            None
        } else {
            Some(Money(remaining))
        }
    }

    /// Adds `other`, returning `None` on `i64` overflow.
    ///
    /// Balances and order totals go through this instead of `+`.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Sums amounts, returning `None` if any partial sum overflows.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$48.00`. For logs and receipts; the UI owns localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Summing prices is how order subtotals are computed.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(4850);
        assert_eq!(money.cents(), 4850);
        assert_eq!(money.major(), 48);
        assert_eq!(money.minor(), 50);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(35, 0).cents(), 3500);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(4800)), "$48.00");
        assert_eq!(format!("{}", Money::from_cents(350)), "$3.50");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let mut c = a;
        c += b;
        c -= Money::from_cents(200);
        assert_eq!(c.cents(), 1300);
    }

    #[test]
    fn test_sum() {
        let prices = vec![Money::from_cents(3500), Money::from_cents(800)];
        let by_ref: Money = prices.iter().sum();
        let by_value: Money = prices.into_iter().sum();
        assert_eq!(by_ref, Money::from_cents(4300));
        assert_eq!(by_value, by_ref);

        let empty: Vec<Money> = Vec::new();
        assert!(empty.into_iter().sum::<Money>().is_zero());
    }

    #[test]
    fn test_checked_debit_never_goes_negative() {
        let balance = Money::from_cents(1000);
        assert_eq!(balance.checked_debit(Money::from_cents(1000)), Some(Money::zero()));
        assert_eq!(balance.checked_debit(Money::from_cents(1001)), None);
        assert_eq!(Money::zero().checked_debit(Money::from_cents(1)), None);
    }

    #[test]
    fn test_checked_add_detects_overflow() {
        let near_max = Money::from_cents(i64::MAX - 10);
        assert_eq!(
            near_max.checked_add(Money::from_cents(10)),
            Some(Money::from_cents(i64::MAX))
        );
        assert_eq!(near_max.checked_add(Money::from_cents(11)), None);

        let prices = [Money::from_cents(3500), Money::from_cents(800)];
        assert_eq!(Money::checked_sum(prices), Some(Money::from_cents(4300)));
        assert_eq!(Money::checked_sum([Money::from_cents(i64::MAX), Money::from_cents(1)]), None);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }
}
