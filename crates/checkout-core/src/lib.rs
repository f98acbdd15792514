//! # checkout-core: Order Placement Pipeline
//!
//! This crate computes the priced outcome of a checkout order. It contains
//! the decision logic only; catalog, inventory and tax are injected.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             Caller (service, job, dev binary)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ OrderRequest                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ checkout-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │validation │─►│  pricing  │─►│ discount  │─►│  service  │  │   │
//! │  │   │  checks   │  │ subtotals │  │ cascade + │  │ tax, stock│  │   │
//! │  │   │           │  │           │  │    cap    │  │  result   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └─────┬─────┘  │   │
//! │  │                                                      │        │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                  │ ports  │   │
//! │  └──────────────────────────────────────────────────────┼────────┘   │
//! │                                                         │            │
//! │  ┌──────────────────────────────────────────────────────▼────────┐   │
//! │  │   checkout-adapters: catalog, inventory, tax table, config    │   │
//! │  └───────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Decimal `Money` and `RoundingMode`
//! - [`types`] - Request, product and result types
//! - [`error`] - Invalid requests and collaborator errors
//! - [`validation`] - Request validation in precedence order
//! - [`pricing`] - Line subtotals and pre-discount net
//! - [`cap`] - Discount cap policies
//! - [`discount`] - Cascading discount rules
//! - [`ports`] - Collaborator traits
//! - [`service`] - The order placement pipeline
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::money::{Money, RoundingMode};
//! use checkout_core::cap::{CapPolicy, PercentCapPolicy};
//! use rust_decimal::Decimal;
//!
//! // Default cap: 30% of the pre-discount net
//! let cap = PercentCapPolicy::default();
//! let net = Money::new(Decimal::new(1000, 0));
//! let capped = cap.apply(net, Money::new(Decimal::new(450, 0)));
//! assert_eq!(capped.to_string(), "300.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cap;
pub mod discount;
pub mod error;
pub mod money;
pub mod ports;
pub mod pricing;
pub mod service;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cap::{CapPolicy, PercentCapPolicy, DEFAULT_CAP_RATE};
pub use discount::{DiscountBreakdown, DiscountEngine, DiscountRules};
pub use error::{CheckoutResult, InvalidRequest, InventoryError, OrderError, TaxError};
pub use money::{Money, RoundingMode};
pub use ports::{InventoryService, ProductRepository, TaxCalculator};
pub use service::OrderService;
pub use types::*;
