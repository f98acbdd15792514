//! # Discount Engine
//!
//! Applies the three discount rules in a fixed cascade, then the cap policy.
//!
//! ## Cascade
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Discount Cascade                                  │
//! │                                                                         │
//! │  net before discount                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  VOLUME       Σ round2(subtotal × 5%) for lines with qty >= 10          │
//! │       │       after_volume = net - volume                               │
//! │       ▼                                                                 │
//! │  MULTI_ITEM   round2(after_volume × 2%) if line count >= 3              │
//! │       │       after_multi = after_volume - multi                        │
//! │       ▼                                                                 │
//! │  HIGH_AMOUNT  round2(after_multi × 3%) if after_multi >= 100000         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  raw = volume + multi + high                                            │
//! │  total = cap.apply(net, raw)                                            │
//! │  net after discount = net - total                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each stage rounds before feeding the next; a single final rounding gives
//! different boundary amounts. Thresholds are inclusive.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cap::CapPolicy;
use crate::money::Money;
use crate::pricing::{PricedOrder, PRICING_ROUNDING};
use crate::types::DiscountType;

// =============================================================================
// Rules
// =============================================================================

/// Thresholds and rates of the discount cascade.
///
/// Defaults are the production policy; overrides exist for configuration
/// and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountRules {
    /// Minimum line quantity for the volume discount.
    pub volume_min_qty: i64,
    pub volume_rate: Decimal,
    /// Minimum number of order lines for the multi-item discount.
    pub multi_item_min_lines: usize,
    pub multi_item_rate: Decimal,
    /// Minimum running net (after volume and multi-item) for the
    /// high-amount discount.
    pub high_amount_threshold: Decimal,
    pub high_amount_rate: Decimal,
}

impl Default for DiscountRules {
    fn default() -> Self {
        DiscountRules {
            volume_min_qty: 10,
            volume_rate: Decimal::new(5, 2),
            multi_item_min_lines: 3,
            multi_item_rate: Decimal::new(2, 2),
            high_amount_threshold: Decimal::new(100_000, 0),
            high_amount_rate: Decimal::new(3, 2),
        }
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// Every intermediate amount of one discount run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountBreakdown {
    pub volume: Money,
    pub multi_item: Money,
    pub high_amount: Money,
    /// `volume + multi_item + high_amount` before the cap.
    pub raw: Money,
    /// Discount after the cap.
    pub total: Money,
    pub net_after_discount: Money,
    /// Labels of the rules that produced a positive amount, in rule order.
    pub applied: Vec<DiscountType>,
}

// =============================================================================
// Engine
// =============================================================================

/// Stateless discount calculator.
#[derive(Debug, Clone, Default)]
pub struct DiscountEngine {
    rules: DiscountRules,
}

impl DiscountEngine {
    pub fn new(rules: DiscountRules) -> Self {
        DiscountEngine { rules }
    }

    pub fn rules(&self) -> &DiscountRules {
        &self.rules
    }

    /// Volume discount, accumulated per qualifying line.
    fn volume(&self, order: &PricedOrder) -> Money {
        order
            .lines
            .iter()
            .filter(|line| line.qty >= self.rules.volume_min_qty)
            .map(|line| line.subtotal.percentage(self.rules.volume_rate, PRICING_ROUNDING))
            .sum::<Money>()
            .round(PRICING_ROUNDING)
    }

    fn multi_item(&self, line_count: usize, after_volume: Money) -> Money {
        if line_count >= self.rules.multi_item_min_lines {
            after_volume.percentage(self.rules.multi_item_rate, PRICING_ROUNDING)
        } else {
            Money::zero()
        }
    }

    fn high_amount(&self, after_multi_item: Money) -> Money {
        if after_multi_item.amount() >= self.rules.high_amount_threshold {
            after_multi_item.percentage(self.rules.high_amount_rate, PRICING_ROUNDING)
        } else {
            Money::zero()
        }
    }

    /// Runs the cascade on `order` and caps the result with `cap`.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::cap::PercentCapPolicy;
    /// use checkout_core::discount::DiscountEngine;
    /// use checkout_core::money::Money;
    /// use checkout_core::pricing::{PricedLine, PricedOrder};
    /// use checkout_core::types::DiscountType;
    /// use rust_decimal::Decimal;
    ///
    /// let line = |id: &str, qty: i64, subtotal: i64| PricedLine {
    ///     product_id: id.to_string(),
    ///     qty,
    ///     unit_price: Money::new(Decimal::from(subtotal / qty)),
    ///     subtotal: Money::new(Decimal::new(subtotal * 100, 2)),
    /// };
    /// let order = PricedOrder {
    ///     lines: vec![line("A", 15, 1500), line("B", 5, 1000)],
    ///     net_before_discount: Money::new(Decimal::new(250000, 2)),
    /// };
    ///
    /// let breakdown = DiscountEngine::default().apply(&order, &PercentCapPolicy::default());
    /// assert_eq!(breakdown.total.to_string(), "75.00");
    /// assert_eq!(breakdown.applied, vec![DiscountType::Volume]);
    /// ```
    pub fn apply(&self, order: &PricedOrder, cap: &dyn CapPolicy) -> DiscountBreakdown {
        let net = order.net_before_discount;
        let mut applied = Vec::with_capacity(3);

        let volume = self.volume(order);
        if volume.is_positive() {
            applied.push(DiscountType::Volume);
        }
        let after_volume = (net - volume).round(PRICING_ROUNDING);

        let multi_item = self.multi_item(order.line_count(), after_volume);
        if multi_item.is_positive() {
            applied.push(DiscountType::MultiItem);
        }
        let after_multi_item = (after_volume - multi_item).round(PRICING_ROUNDING);

        let high_amount = self.high_amount(after_multi_item);
        if high_amount.is_positive() {
            applied.push(DiscountType::HighAmount);
        }

        let raw = (volume + multi_item + high_amount).round(PRICING_ROUNDING);
        let total = cap.apply(net, raw).round(PRICING_ROUNDING);
        let net_after_discount = (net - total).round(PRICING_ROUNDING);

        DiscountBreakdown {
            volume,
            multi_item,
            high_amount,
            raw,
            total,
            net_after_discount,
            applied,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
