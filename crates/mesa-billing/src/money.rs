//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    80001.0 × 0.80 = 64000.799999999996  ❌ WRONG!                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    8000100 cents − 20% (1600020) = 6400080 cents = $64000.80           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mesa_billing::money::Money;
//!
//! let price = Money::from_major_minor(3500, 0); // $3500.00
//! let line = price * 3;                          // $10500.00
//! assert_eq!(line.cents(), 1_050_000);
//!
//! // 30% of a beverage subtotal
//! assert_eq!(line.percentage(3000).cents(), 315_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// One hundred percent in basis points.
pub const FULL_BPS: u32 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for shortages and discounts
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON receipts and TOML config
/// - **Saturating arithmetic**: `+`, `-`, `*` and `Sum` clamp at the i64
///   bounds instead of panicking or wrapping; line totals that would not fit
///   are rejected up front by `validate_line_total`
///
/// ## Where Money is Used
/// ```text
/// MenuItem.price ──► MenuItem.total_price ──► Order.total_price
///                                                  │
///                        DiscountOutcome.discount ◄┘
///                                  │
///                                  ▼
///                 DiscountOutcome.total ──► PaymentMethod::pay
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use mesa_billing::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -$5.50.
    ///
    /// ```rust
    /// use mesa_billing::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    ///
    /// ```rust
    /// use mesa_billing::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Multiplies money by a quantity; `None` when the product overflows.
    ///
    /// ```rust
    /// use mesa_billing::money::Money;
    ///
    /// assert!(Money::from_cents(i64::MAX / 2).checked_multiply_quantity(3).is_none());
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns `bps / 10000` of this amount.
    ///
    /// ## Rounding
    /// Integer math on the absolute value: `(|amount| * bps + 5000) / 10000`,
    /// so half a cent rounds away from zero. The sign is reapplied afterwards.
    ///
    /// ```rust
    /// use mesa_billing::money::Money;
    ///
    /// let subtotal = Money::from_cents(10000); // $100.00
    /// assert_eq!(subtotal.percentage(1500).cents(), 1500); // 15%
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        // i128 keeps large order totals from overflowing
        let magnitude = (self.0.unsigned_abs() as i128 * bps as i128 + 5000) / FULL_BPS as i128;
        let cents = magnitude.min(i64::MAX as i128) as i64;
        Money(if self.0 < 0 { -cents } else { cents })
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ```rust
    /// use mesa_billing::money::Money;
    ///
    /// let subtotal = Money::from_cents(10000);
    /// assert_eq!(subtotal.apply_percentage_discount(1000).cents(), 9000);
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        *self - self.percentage(discount_bps)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders with a dollar sign and exactly two decimals: `$1234.50`.
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

/// Multiplication by a quantity.
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
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(6_400_080)), "$64000.80");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_arithmetic_saturates_at_bounds() {
        let big = Money::from_cents(i64::MAX / 2);
        assert_eq!(big.checked_multiply_quantity(2), Some(Money::from_cents(i64::MAX - 1)));
        assert_eq!(big.checked_multiply_quantity(3), None);
        assert_eq!((big * 3).cents(), i64::MAX);
        assert_eq!((big + big + big).cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - Money::from_cents(1)).cents(), i64::MIN);

        let total: Money = [big, big, big].iter().sum();
        assert_eq!(total.cents(), i64::MAX);
        assert_eq!(Money::from_cents(i64::MAX).percentage(FULL_BPS).cents(), i64::MAX);
    }

    #[test]
    fn test_percentage_rounds_half_away_from_zero() {
        // 15% of $0.10 = 1.5 cents -> 2 cents
        assert_eq!(Money::from_cents(10).percentage(1500).cents(), 2);
        assert_eq!(Money::from_cents(-10).percentage(1500).cents(), -2);
        // 20% of $80001.00 = $16000.20
        assert_eq!(Money::from_cents(8_000_100).percentage(2000).cents(), 1_600_020);
    }

    #[test]
    fn test_percentage_discount() {
        let subtotal = Money::from_cents(10000);
        assert_eq!(subtotal.apply_percentage_discount(1000).cents(), 9000);
        assert_eq!(subtotal.apply_percentage_discount(0), subtotal);
        assert!(subtotal.apply_percentage_discount(FULL_BPS).is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }
}
