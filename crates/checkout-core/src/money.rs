//! # Money Module
//!
//! Provides the `Money` type for prices, wallet funds and change.
//!
//! ## Whole Units Only
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Notes are printed in whole currency units (1, 2, 5, 10, 20, 50) and    │
//! │  every cart price in the simulation is a whole number as well.          │
//! │                                                                         │
//! │  So Money is a plain unsigned integer count of units:                   │
//! │    • no fractions, no floating point                                    │
//! │    • never negative: change is computed with checked_sub                │
//! │    • never wraps: `+`, `*` and `sum` saturate at MAX, checked_add and   │
//! │      checked_sum report overflow instead                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::Money;
//!
//! let price = Money::from_units(7);
//! let paid = Money::from_units(5) + Money::from_units(5);
//!
//! assert_eq!(paid.checked_sub(price), Some(Money::from_units(3)));
//! assert_eq!(price.checked_sub(paid), None);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A non-negative monetary value in whole currency units.
///
/// ## Where Money is Used
/// ```text
/// CartItem.price ──► Customer::cart_price() ──┐
///                                             ├──► settle() ──► Settlement.change
/// Note.value ──────► Wallet::funds() ─────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(u64);

impl Money {
    /// Largest representable amount.
    pub const MAX: Money = Money(u64::MAX);

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_units(12);
    /// assert_eq!(price.units(), 12);
    /// ```
    #[inline]
    pub const fn from_units(units: u64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> u64 {
        self.0
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

    /// Subtracts `other`, returning `None` instead of going negative.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let funds = Money::from_units(7);
    /// assert!(funds.checked_sub(Money::from_units(10)).is_none());
    /// ```
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(units) => Some(Money(units)),
            None => None,
        }
    }

    /// Adds `other`, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(units) => Some(Money(units)),
            None => None,
        }
    }

    /// Sums `amounts`, returning `None` if the total does not fit.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let prices = [Money::from_units(5), Money::MAX];
    /// assert!(Money::checked_sum(prices).is_none());
    /// ```
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |total, amount| total.checked_add(amount))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl From<u64> for Money {
    fn from(units: u64) -> Self {
        Money(units)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

/// Multiplication by a count (e.g. ten notes of $5).
impl Mul<u64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: u64) -> Self {
        Money(self.0.saturating_mul(count))
    }
}

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
    fn test_from_units() {
        let money = Money::from_units(12);
        assert_eq!(money.units(), 12);
        assert!(!money.is_zero());
        assert!(Money::zero().is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_units(7)), "$7");
        assert_eq!(format!("{}", Money::zero()), "$0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(10);
        let b = Money::from_units(5);

        assert_eq!((a + b).units(), 15);
        assert_eq!(a.checked_sub(b), Some(Money::from_units(5)));
        assert_eq!(b.checked_sub(a), None);
        assert_eq!((b * 3).units(), 15);

        let mut total = Money::zero();
        total += a;
        assert_eq!(total, a);
    }

    #[test]
    fn test_sum() {
        let values = [Money::from_units(5), Money::from_units(2), Money::from_units(10)];
        let total: Money = values.iter().sum();
        assert_eq!(total.units(), 17);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_arithmetic_never_wraps() {
        let near_max = Money::from_units(u64::MAX - 1);

        assert_eq!(near_max + Money::from_units(5), Money::MAX);
        assert_eq!(near_max * 2, Money::MAX);
        assert_eq!(near_max.checked_add(Money::from_units(1)), Some(Money::MAX));
        assert_eq!(near_max.checked_add(Money::from_units(2)), None);

        let huge = [Money::from_units(9_000_000_000_000_000_000); 3];
        assert_eq!(huge.iter().sum::<Money>(), Money::MAX);
        assert_eq!(Money::checked_sum(huge), None);
        assert_eq!(
            Money::checked_sum([Money::from_units(2), Money::from_units(3)]),
            Some(Money::from_units(5))
        );
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::from_units(42)).unwrap();
        assert_eq!(json, "42");

        let back: Money = serde_json::from_str("42").unwrap();
        assert_eq!(back, Money::from_units(42));
    }
}
