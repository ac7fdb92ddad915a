//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many retail systems:                                                │
//! │    K10.00 / 3 = K3.33 (×3 = K9.99)  → Lost 1 ngwee!                    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Ngwee                                            │
//! │    1000 ngwee / 3 = 333 ngwee (×3 = 999 ngwee)                         │
//! │    We KNOW we lost 1 ngwee, and handle it explicitly                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use biztrack_core::money::Money;
//!
//! // Create from ngwee (preferred)
//! let price = Money::from_ngwee(2000); // K20.00
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // K40.00
//! let total = price + Money::from_ngwee(500);    // K25.00
//!
//! // NEVER do this:
//! // let bad = Money::from_float(20.00); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (ngwee; 1 kwacha
/// = 100 ngwee).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for losses and net-profit math
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Persisted records store raw `_ngwee` integer fields and expose `Money`
/// through accessor methods, so every calculation in the system flows through
/// this type while the stored JSON stays plain numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from ngwee (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use biztrack_core::money::Money;
    ///
    /// let price = Money::from_ngwee(2099); // Represents K20.99
    /// assert_eq!(price.ngwee(), 2099);
    /// ```
    #[inline]
    pub const fn from_ngwee(ngwee: i64) -> Self {
        Money(ngwee)
    }

    /// Creates a Money value from whole kwacha.
    ///
    /// ## Example
    /// ```rust
    /// use biztrack_core::money::Money;
    ///
    /// let amount = Money::from_kwacha(100); // K100.00
    /// assert_eq!(amount.ngwee(), 10000);
    /// ```
    #[inline]
    pub const fn from_kwacha(kwacha: i64) -> Self {
        Money(kwacha * 100)
    }

    /// Returns the value in ngwee (smallest currency unit).
    #[inline]
    pub const fn ngwee(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (kwacha) portion.
    #[inline]
    pub const fn kwacha(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (ngwee) portion (always 0-99).
    #[inline]
    pub const fn ngwee_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
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

    /// Applies a margin expressed in basis points and returns the margin
    /// amount (not the total).
    ///
    /// ## Arguments
    /// * `margin_bps` - Margin in basis points (2000 = 20%)
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`
    /// The +5000 provides rounding (5000/10000 = 0.5)
    ///
    /// ## Example
    /// ```rust
    /// use biztrack_core::money::Money;
    ///
    /// let sale = Money::from_kwacha(100); // K100.00
    /// let margin = sale.apply_margin_bps(2000); // 20%
    /// assert_eq!(margin.ngwee(), 2000); // K20.00
    /// ```
    pub fn apply_margin_bps(&self, margin_bps: u32) -> Money {
        // i128 to prevent overflow on large amounts
        let margin = (self.0 as i128 * margin_bps as i128 + 5000) / 10000;
        Money::from_ngwee(margin as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use biztrack_core::money::Money;
    ///
    /// let unit_margin = Money::from_ngwee(500); // K5.00 per item
    /// let line = unit_margin.multiply_quantity(3);
    /// assert_eq!(line.ngwee(), 1500); // K15.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Presentation-layer formatting handles
/// localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}K{}.{:02}", sign, self.kwacha().abs(), self.ngwee_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation, so reporting can fold iterators of Money directly.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
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
    fn test_from_ngwee() {
        let money = Money::from_ngwee(2099);
        assert_eq!(money.ngwee(), 2099);
        assert_eq!(money.kwacha(), 20);
        assert_eq!(money.ngwee_part(), 99);
    }

    #[test]
    fn test_from_kwacha() {
        assert_eq!(Money::from_kwacha(100).ngwee(), 10000);
        assert_eq!(Money::from_kwacha(-5).ngwee(), -500);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_ngwee(2099)), "K20.99");
        assert_eq!(format!("{}", Money::from_ngwee(500)), "K5.00");
        assert_eq!(format!("{}", Money::from_ngwee(-550)), "-K5.50");
        assert_eq!(format!("{}", Money::from_ngwee(0)), "K0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_ngwee(1000);
        let b = Money::from_ngwee(500);

        assert_eq!((a + b).ngwee(), 1500);
        assert_eq!((a - b).ngwee(), 500);
        let result: Money = a * 3;
        assert_eq!(result.ngwee(), 3000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300]
            .iter()
            .map(|n| Money::from_ngwee(*n))
            .sum();
        assert_eq!(total.ngwee(), 600);
    }

    #[test]
    fn test_margin_basic() {
        // K150.00 at 20% = K30.00
        let amount = Money::from_kwacha(150);
        assert_eq!(amount.apply_margin_bps(2000).ngwee(), 3000);
    }

    #[test]
    fn test_margin_with_rounding() {
        // 125 ngwee at 20% = 25 ngwee exactly; 123 at 20% = 24.6 → 25
        assert_eq!(Money::from_ngwee(125).apply_margin_bps(2000).ngwee(), 25);
        assert_eq!(Money::from_ngwee(123).apply_margin_bps(2000).ngwee(), 25);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_ngwee(100);
        assert!(positive.is_positive());

        let negative = Money::from_ngwee(-100);
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit = Money::from_ngwee(299);
        assert_eq!(unit.multiply_quantity(3).ngwee(), 897);
    }

    /// Documents the intentional precision loss of integer division.
    #[test]
    fn test_division_precision_loss_documented() {
        let ten_kwacha = Money::from_ngwee(1000);
        let one_third = Money::from_ngwee(1000 / 3); // 333 ngwee
        let reconstructed: Money = one_third * 3; // 999 ngwee

        assert_eq!(reconstructed.ngwee(), 999);
        let lost = ten_kwacha - reconstructed;
        assert_eq!(lost.ngwee(), 1);
    }
}
