//! # Discount Cap Policies
//!
//! A cap policy bounds the total discount of an order as a function of its
//! pre-discount net. It only clamps magnitude; it never adds or removes a
//! discount label.
//!
//! ```text
//! raw discount ──► CapPolicy::apply(net, raw) ──► total discount
//!                         │
//!                         └─ PercentCapPolicy: min(raw, net × rate)
//! ```

use rust_decimal::Decimal;

use crate::money::{Money, RoundingMode};

/// Default cap: 30% of the pre-discount net.
pub const DEFAULT_CAP_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

/// Strategy bounding the total discount.
///
/// Implementations must return a value in `0..=net_before_discount`. A
/// capping policy is also expected to return at most `raw_discount`.
pub trait CapPolicy: Send + Sync {
    fn apply(&self, net_before_discount: Money, raw_discount: Money) -> Money;
}

/// Caps the discount at a fixed fraction of the pre-discount net.
///
/// ## Example
/// ```rust
/// use checkout_core::cap::{CapPolicy, PercentCapPolicy};
/// use checkout_core::money::Money;
/// use rust_decimal::Decimal;
///
/// let cap = PercentCapPolicy::new(Decimal::new(2, 2)); // 2%
/// let net = Money::new(Decimal::new(2500, 0));
/// let raw = Money::new(Decimal::new(75, 0));
/// assert_eq!(cap.apply(net, raw).to_string(), "50.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentCapPolicy {
    rate: Decimal,
}

impl PercentCapPolicy {
    /// Creates a policy with `rate` as a fraction (0.30 = 30%).
    ///
    /// The rate is clamped into `0..=1` so the cap can never exceed the net.
    pub fn new(rate: Decimal) -> Self {
        PercentCapPolicy {
            rate: rate.clamp(Decimal::ZERO, Decimal::ONE),
        }
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Largest discount this policy allows for `net_before_discount`.
    pub fn limit(&self, net_before_discount: Money) -> Money {
        net_before_discount.percentage(self.rate, RoundingMode::HalfUp)
    }
}

impl Default for PercentCapPolicy {
    fn default() -> Self {
        PercentCapPolicy::new(DEFAULT_CAP_RATE)
    }
}

impl CapPolicy for PercentCapPolicy {
    fn apply(&self, net_before_discount: Money, raw_discount: Money) -> Money {
        let capped = raw_discount
            .min(self.limit(net_before_discount))
            .max(Money::zero());
        capped.round(RoundingMode::HalfUp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_rate_is_thirty_percent() {
        assert_eq!(PercentCapPolicy::default().rate(), dec!(0.30));
    }

    #[test]
    fn test_raw_below_cap_passes_through() {
        let cap = PercentCapPolicy::default();
        let capped = cap.apply(Money::new(dec!(2500.00)), Money::new(dec!(75.00)));
        assert_eq!(capped.to_string(), "75.00");
    }

    #[test]
    fn test_raw_above_cap_is_clamped() {
        let cap = PercentCapPolicy::default();
        let capped = cap.apply(Money::new(dec!(1000.00)), Money::new(dec!(400.00)));
        assert_eq!(capped.to_string(), "300.00");
    }

    #[test]
    fn test_zero_raw_stays_zero() {
        let cap = PercentCapPolicy::default();
        let capped = cap.apply(Money::new(dec!(1500.00)), Money::zero());
        assert!(capped.is_zero());
        assert_eq!(capped.to_string(), "0.00");
    }

    #[test]
    fn test_rate_is_clamped_to_net() {
        let cap = PercentCapPolicy::new(dec!(1.5));
        assert_eq!(cap.rate(), Decimal::ONE);
        let capped = cap.apply(Money::new(dec!(100.00)), Money::new(dec!(250.00)));
        assert_eq!(capped.to_string(), "100.00");

        assert_eq!(PercentCapPolicy::new(dec!(-0.1)).rate(), Decimal::ZERO);
    }
}
