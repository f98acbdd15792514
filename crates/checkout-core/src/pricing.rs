//! # Line Pricing
//!
//! Turns resolved lines into per-line subtotals and the pre-discount net.
//!
//! ```text
//! unit_price × qty ──round(HALF_UP, 2)──► line subtotal ──Σ──► net before discount
//! ```
//!
//! Line pricing always rounds HALF_UP. The request's rounding mode only
//! reaches the tax collaborator.

use crate::error::{CheckoutResult, OrderError};
use crate::money::{Money, RoundingMode};
use crate::validation::ResolvedLine;

/// Rounding used for line subtotals and discount amounts.
pub const PRICING_ROUNDING: RoundingMode = RoundingMode::HalfUp;

/// A priced order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product_id: String,
    pub qty: i64,
    pub unit_price: Money,
    /// `unit_price × qty`, scale 2.
    pub subtotal: Money,
}

/// All priced lines plus their sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedOrder {
    /// Same order as the request lines.
    pub lines: Vec<PricedLine>,
    pub net_before_discount: Money,
}

impl PricedOrder {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Prices a single line.
///
/// ## Errors
/// [`OrderError::AmountOutOfRange`] when the subtotal overflows or cannot
/// carry two decimal places.
pub fn price_line(resolved: &ResolvedLine<'_>) -> CheckoutResult<PricedLine> {
    let unit_price = resolved.product.unit_price;
    let qty = resolved.line.qty;

    let subtotal = unit_price
        .multiply_quantity(qty)
        .and_then(|amount| amount.checked_round(PRICING_ROUNDING))
        .ok_or_else(|| {
            OrderError::AmountOutOfRange(format!("subtotal of {}", resolved.line.product_id))
        })?;

    Ok(PricedLine {
        product_id: resolved.line.product_id.clone(),
        qty,
        unit_price,
        subtotal,
    })
}

/// Prices every line and sums the subtotals.
pub fn price_lines(lines: &[ResolvedLine<'_>]) -> CheckoutResult<PricedOrder> {
    let lines = lines.iter().map(price_line).collect::<CheckoutResult<Vec<_>>>()?;
    let net_before_discount = lines
        .iter()
        .try_fold(Money::zero(), |net, line| net.checked_add(line.subtotal))
        .and_then(|net| net.checked_round(PRICING_ROUNDING))
        .ok_or_else(|| OrderError::AmountOutOfRange("net before discount".to_string()))?;

    Ok(PricedOrder {
        lines,
        net_before_discount,
    })
}
