//! # Domain Types
//!
//! Request, catalog and result types for order placement.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  OrderRequest   │   │    Product      │   │  OrderResult    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  region         │   │  id             │   │  net before     │       │
//! │  │  rounding_mode  │   │  unit_price     │   │  discount       │       │
//! │  │  lines ─────┐   │   └─────────────────┘   │  net after      │       │
//! │  └─────────────┼───┘                         │  tax, gross     │       │
//! │                ▼                             │  applied ───┐   │       │
//! │  ┌─────────────────┐                         └─────────────┼───┘       │
//! │  │   OrderLine     │                                       ▼           │
//! │  │  product_id     │                         ┌─────────────────┐       │
//! │  │  qty            │                         │  DiscountType   │       │
//! │  └─────────────────┘                         │  VOLUME         │       │
//! │                                              │  MULTI_ITEM     │       │
//! │                                              │  HIGH_AMOUNT    │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every value here is built per call and owned by that call; nothing is
//! shared between orders.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::{Money, RoundingMode};

// =============================================================================
// Product
// =============================================================================

/// A catalog entry as returned by the product repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier referenced by order lines.
    pub id: String,

    /// Non-negative unit price. May carry any scale (0.333 is valid).
    pub unit_price: Money,
}

impl Product {
    pub fn new(id: impl Into<String>, unit_price: Money) -> Self {
        Product {
            id: id.into(),
            unit_price,
        }
    }
}

// =============================================================================
// Order Request
// =============================================================================

/// One (product, quantity) pair within an order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    /// Requested quantity. Signed so that zero/negative input reaches
    /// validation instead of failing deserialization.
    pub qty: i64,
}

impl OrderLine {
    pub fn new(product_id: impl Into<String>, qty: i64) -> Self {
        OrderLine {
            product_id: product_id.into(),
            qty,
        }
    }
}

/// An incoming checkout order.
///
/// `region` and `lines` are optional on purpose: a missing field is a
/// validation failure with a reason tag, not a deserialization error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(default)]
    pub region: Option<String>,

    /// Handed to the tax collaborator unchanged.
    #[serde(default)]
    pub rounding_mode: RoundingMode,

    #[serde(default)]
    pub lines: Option<Vec<OrderLine>>,
}

impl OrderRequest {
    /// Builds a request with region and lines present.
    pub fn new(region: impl Into<String>, rounding_mode: RoundingMode, lines: Vec<OrderLine>) -> Self {
        OrderRequest {
            region: Some(region.into()),
            rounding_mode,
            lines: Some(lines),
        }
    }

    /// Lines as a slice; absent lines read as empty.
    pub fn lines(&self) -> &[OrderLine] {
        self.lines.as_deref().unwrap_or(&[])
    }
}

// =============================================================================
// Discount Type
// =============================================================================

/// Label recording that a discount rule contributed a positive amount.
///
/// Declaration order is rule order; `applied_discounts` lists labels in
/// this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// A line with a large quantity.
    Volume,
    /// Many distinct lines in one order.
    MultiItem,
    /// Large order value after the earlier discounts.
    HighAmount,
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountType::Volume => write!(f, "VOLUME"),
            DiscountType::MultiItem => write!(f, "MULTI_ITEM"),
            DiscountType::HighAmount => write!(f, "HIGH_AMOUNT"),
        }
    }
}

// =============================================================================
// Order Result
// =============================================================================

/// Fully itemized outcome of a placed order.
///
/// All amounts carry two decimal places except `total_gross`, whose scale
/// is whatever the tax collaborator returns (zero-decimal currencies).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResult {
    pub total_net_before_discount: Money,
    pub total_discount: Money,
    pub total_net_after_discount: Money,
    pub total_tax: Money,
    pub total_gross: Money,
    pub applied_discounts: Vec<DiscountType>,
}

// =============================================================================
// Unit Tests
// =============================================================================
