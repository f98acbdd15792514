//! # Money Module
//!
//! Provides the `Money` type and the `RoundingMode` every pricing stage uses.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Catalog prices are not always whole cents either:                     │
//! │    unit price 0.333 × 3 = 0.999 → 1.00 (HALF_UP, scale 2)              │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal + explicit rounding                         │
//! │    Arithmetic is exact; every rounding names its mode and its scale.   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::{Money, RoundingMode};
//! use rust_decimal::Decimal;
//!
//! let unit = Money::new(Decimal::new(1099, 2)); // 10.99
//! let line = unit.multiply_quantity(3).unwrap().round(RoundingMode::HalfUp);
//! assert_eq!(line.to_string(), "32.97");
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places for every amount the pipeline reports.
pub const MONEY_SCALE: u32 = 2;

// =============================================================================
// Rounding Mode
// =============================================================================

/// Rounding mode carried by an order request.
///
/// The request's mode is handed to the tax collaborator untouched. Line
/// pricing and discounts always use [`RoundingMode::HalfUp`].
///
/// ## Mapping
/// ```text
/// ┌──────────────┬──────────────────────────────┬────────────────────────┐
/// │ Mode         │ rust_decimal strategy        │ 2.345 → / -2.345 →     │
/// ├──────────────┼──────────────────────────────┼────────────────────────┤
/// │ HALF_UP      │ MidpointAwayFromZero         │ 2.35 / -2.35           │
/// │ HALF_DOWN    │ MidpointTowardZero           │ 2.34 / -2.34           │
/// │ HALF_EVEN    │ MidpointNearestEven          │ 2.34 / -2.34           │
/// │ UP           │ AwayFromZero                 │ 2.35 / -2.35           │
/// │ DOWN         │ ToZero                       │ 2.34 / -2.34           │
/// │ CEILING      │ ToPositiveInfinity           │ 2.35 / -2.34           │
/// │ FLOOR        │ ToNegativeInfinity           │ 2.34 / -2.35           │
/// └──────────────┴──────────────────────────────┴────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundingMode {
    #[default]
    HalfUp,
    HalfDown,
    HalfEven,
    Up,
    Down,
    Ceiling,
    Floor,
}

impl RoundingMode {
    /// Returns the equivalent `rust_decimal` strategy.
    pub const fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::Up => RoundingStrategy::AwayFromZero,
            RoundingMode::Down => RoundingStrategy::ToZero,
            RoundingMode::Ceiling => RoundingStrategy::ToPositiveInfinity,
            RoundingMode::Floor => RoundingStrategy::ToNegativeInfinity,
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundingMode::HalfUp => "HALF_UP",
            RoundingMode::HalfDown => "HALF_DOWN",
            RoundingMode::HalfEven => "HALF_EVEN",
            RoundingMode::Up => "UP",
            RoundingMode::Down => "DOWN",
            RoundingMode::Ceiling => "CEILING",
            RoundingMode::Floor => "FLOOR",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in a single (implicit) currency.
///
/// ## Design Decisions
/// - **Decimal inside**: exact base-10 arithmetic, no cents conversion
/// - **Scale is preserved**: `Money` never rounds on its own; callers pick
///   the moment and the mode with [`Money::round`] / [`Money::round_to_scale`]
/// - **Serialized as a string** (Decimal's serde impl) so JSON never goes through f64
///
/// ## Where Money is Used
/// ```text
/// Product.unit_price ──► line subtotal ──► net before discount
///                                              │
///                     discount cascade ◄───────┤
///                                              ▼
///                              tax collaborator ──► tax, gross
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a decimal amount as-is (no rounding, scale kept).
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Zero at money scale (`0.00`).
    #[inline]
    pub fn zero() -> Self {
        Money(Decimal::new(0, MONEY_SCALE))
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Number of decimal places currently carried.
    #[inline]
    pub fn scale(&self) -> u32 {
        self.0.scale()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Rounds to [`MONEY_SCALE`] places with `mode`.
    ///
    /// The result always carries exactly two decimal places, so `1500`
    /// becomes `1500.00` rather than staying at scale 0.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::{Money, RoundingMode};
    /// use rust_decimal::Decimal;
    ///
    /// let half = Money::new(Decimal::new(2345, 3)); // 2.345
    /// assert_eq!(half.round(RoundingMode::HalfUp).to_string(), "2.35");
    /// assert_eq!(half.round(RoundingMode::HalfDown).to_string(), "2.34");
    /// ```
    pub fn round(&self, mode: RoundingMode) -> Money {
        self.round_to_scale(MONEY_SCALE, mode)
    }

    /// Rounds to `scale` places with `mode`, padding with zeros when the
    /// amount carries fewer places.
    ///
    /// Amounts too large to carry `scale` places keep fewer; use
    /// [`Money::checked_round`] where that must be an error.
    pub fn round_to_scale(&self, scale: u32, mode: RoundingMode) -> Money {
        let mut rounded = self.0.round_dp_with_strategy(scale, mode.strategy());
        // Only pads here: rounding above already dropped any extra places.
        rounded.rescale(scale);
        Money(rounded)
    }

    /// Like [`Money::round`], but `None` when the amount cannot carry
    /// [`MONEY_SCALE`] places.
    pub fn checked_round(&self, mode: RoundingMode) -> Option<Money> {
        let rounded = self.round(mode);
        (rounded.scale() == MONEY_SCALE).then_some(rounded)
    }

    /// Multiplies by a quantity without rounding. `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let unit = Money::new(Decimal::new(299, 2)); // 2.99
    /// assert_eq!(unit.multiply_quantity(3).unwrap().amount(), Decimal::new(897, 2));
    /// assert!(Money::new(Decimal::MAX).multiply_quantity(2).is_none());
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Option<Money> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Addition that returns `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Applies a fractional `rate` (0.05 = 5%) and rounds the product to
    /// money scale with `mode`.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::{Money, RoundingMode};
    /// use rust_decimal::Decimal;
    ///
    /// let subtotal = Money::new(Decimal::new(1500, 0));
    /// let five_pct = subtotal.percentage(Decimal::new(5, 2), RoundingMode::HalfUp);
    /// assert_eq!(five_pct.to_string(), "75.00");
    /// ```
    pub fn percentage(&self, rate: Decimal, mode: RoundingMode) -> Money {
        Money(self.0 * rate).round(mode)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the raw decimal with its current scale (`1500.00`, `97000`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
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
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test]
    fn test_zero_has_money_scale() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert_eq!(zero.to_string(), "0.00");
    }

    #[test]
    fn test_round_pads_whole_amounts() {
        let amount = Money::new(dec!(1500));
        assert_eq!(amount.round(RoundingMode::HalfUp).to_string(), "1500.00");
    }

    #[test_case(RoundingMode::HalfUp, "2.35", "-2.35")]
    #[test_case(RoundingMode::HalfDown, "2.34", "-2.34")]
    #[test_case(RoundingMode::HalfEven, "2.34", "-2.34")]
    #[test_case(RoundingMode::Up, "2.35", "-2.35")]
    #[test_case(RoundingMode::Down, "2.34", "-2.34")]
    #[test_case(RoundingMode::Ceiling, "2.35", "-2.34")]
    #[test_case(RoundingMode::Floor, "2.34", "-2.35")]
    fn test_rounding_modes_at_midpoint(mode: RoundingMode, positive: &str, negative: &str) {
        assert_eq!(Money::new(dec!(2.345)).round(mode).to_string(), positive);
        assert_eq!(Money::new(dec!(-2.345)).round(mode).to_string(), negative);
    }

    #[test]
    fn test_round_to_scale_zero() {
        let gross = Money::new(dec!(1075.50));
        assert_eq!(
            gross.round_to_scale(0, RoundingMode::HalfUp).to_string(),
            "1076"
        );
        assert_eq!(gross.round_to_scale(0, RoundingMode::Down).to_string(), "1075");
    }

    #[test]
    fn test_multiply_quantity_is_exact() {
        let unit = Money::new(dec!(0.333));
        let line = unit.multiply_quantity(3).unwrap();
        assert_eq!(line.amount(), dec!(0.999));
        assert_eq!(line.round(RoundingMode::HalfUp).to_string(), "1.00");
    }

    #[test]
    fn test_overflow_is_reported() {
        let huge = Money::new(dec!(10000000000));
        assert!(huge.multiply_quantity(i64::MAX).is_none());
        assert!(Money::new(Decimal::MAX)
            .checked_add(Money::new(dec!(1)))
            .is_none());
        assert_eq!(
            Money::new(dec!(1.50)).checked_add(Money::new(dec!(2.25))),
            Some(Money::new(dec!(3.75)))
        );
    }

    #[test]
    fn test_checked_round_needs_two_places() {
        assert_eq!(
            Money::new(dec!(2.345)).checked_round(RoundingMode::HalfUp),
            Some(Money::new(dec!(2.35)))
        );
        // 28 integer digits leave no room for two decimal places.
        assert!(Money::new(Decimal::MAX)
            .checked_round(RoundingMode::HalfUp)
            .is_none());
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 10.10 × 5% = 0.505 → 0.51
        let amount = Money::new(dec!(10.10));
        assert_eq!(
            amount.percentage(dec!(0.05), RoundingMode::HalfUp).to_string(),
            "0.51"
        );
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::new(dec!(10.00));
        let b = Money::new(dec!(2.50));
        assert_eq!((a + b).amount(), dec!(12.50));
        assert_eq!((a - b).amount(), dec!(7.50));

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.to_string(), "15.00");
    }

    #[test]
    fn test_min_and_sign_checks() {
        let small = Money::new(dec!(1));
        let large = Money::new(dec!(2));
        assert_eq!(small.min(large), small);
        assert_eq!(large.min(small), small);

        assert!(small.is_positive());
        assert!(!Money::zero().is_positive());
        assert!(Money::new(dec!(-0.01)).is_negative());
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Money::new(dec!(75.00))).unwrap();
        assert_eq!(json, "\"75.00\"");
    }
}
