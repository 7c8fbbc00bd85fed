//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    11.23 × 2 / 3 = 7.486666...  → which cent do we charge?            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every amount is an i64 count of pence. Fractions are kept exact     │
//! │    (see `fraction`) and rounded to a cent exactly once.                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::{self, Money};
//!
//! let price = Money::from_cents(1123); // £11.23
//! let doubled = price * 2;              // £22.46
//! assert_eq!(doubled.to_string(), "£22.46");
//!
//! // Plain cent amounts format the same way
//! assert_eq!(money::format(311), "£3.11");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::DEFAULT_CURRENCY_SYMBOL;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (pence).
///
/// ## Design Decisions
/// - **i64 (signed)**: A checkout total may go negative when stacked
///   discounts exceed the subtotal
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Saturating arithmetic**: a rule configured with an absurd price
///   pins at `i64::MIN`/`i64::MAX` instead of overflowing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_cents(311); // Represents £3.11
    /// assert_eq!(price.cents(), 311);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion, truncated toward zero.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1123).major(), 11);
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(500);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 1500);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats the amount with the given currency symbol.
    ///
    /// The sign belongs to the number, not the symbol: `£-5.50`.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1934).format_with_symbol("$"), "$19.34");
    /// assert_eq!(Money::from_cents(-550).format_with_symbol("€"), "€-5.50");
    /// ```
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            symbol,
            sign,
            self.major().abs(),
            self.minor()
        )
    }
}

/// Formats a plain cent amount with the default currency symbol.
///
/// ## Example
/// ```rust
/// use checkout_core::money;
///
/// assert_eq!(money::format(2245), "£22.45");
/// assert_eq!(money::format(5), "£0.05");
/// ```
pub fn format(cents: i64) -> String {
    Money::from_cents(cents).to_string()
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol(DEFAULT_CURRENCY_SYMBOL))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<i64> for Money {
    fn from(cents: i64) -> Self {
        Money::from_cents(cents)
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
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
        let money = Money::from_cents(1123);
        assert_eq!(money.cents(), 1123);
        assert_eq!(money.major(), 11);
        assert_eq!(money.minor(), 23);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(2245).to_string(), "£22.45");
        assert_eq!(Money::from_cents(311).to_string(), "£3.11");
        assert_eq!(Money::from_cents(1000).to_string(), "£10.00");
        assert_eq!(Money::from_cents(0).to_string(), "£0.00");
        assert_eq!(Money::from_cents(7).to_string(), "£0.07");
    }

    #[test]
    fn test_negative_amounts_truncate_toward_zero() {
        assert_eq!(Money::from_cents(-550).to_string(), "£-5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "£-0.05");
        assert_eq!(format(-150), "£-1.50");
    }

    #[test]
    fn test_format_helper() {
        assert_eq!(format(1934), "£19.34");
        assert_eq!(format(311), "£3.11");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let mut c = a;
        c += b;
        c -= Money::from_cents(100);
        assert_eq!(c.cents(), 1400);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX / 2 + 1);

        assert_eq!((huge * 2).cents(), i64::MAX);
        assert_eq!((huge + huge).cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - huge).cents(), i64::MIN);
    }

    #[test]
    fn test_sum() {
        let total: Money = [311, 500, 1123].into_iter().map(Money::from).sum();
        assert_eq!(total.cents(), 1934);
    }
}
