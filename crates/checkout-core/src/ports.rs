//! # Ports
//!
//! Collaborator contracts the order pipeline depends on. Implementations
//! live outside this crate (see `checkout-adapters`) or in tests.
//!
//! ```text
//! OrderService ──► ProductRepository::find_by_id   (validation)
//!              ──► TaxCalculator::calc_tax_amount  (tax, 1st)
//!              ──► TaxCalculator::add_tax          (tax, 2nd)
//!              ──► InventoryService::reserve       (per line, last)
//! ```
//!
//! All calls are blocking. Timeouts, retries and atomicity across calls are
//! the implementation's business, not the pipeline's.

use crate::error::{InventoryError, TaxError};
use crate::money::{Money, RoundingMode};
use crate::types::Product;

/// Read access to the product catalog.
pub trait ProductRepository: Send + Sync {
    /// Looks a product up by id. Absence is `None`, never an error.
    fn find_by_id(&self, product_id: &str) -> Option<Product>;
}

/// Stock reservation.
pub trait InventoryService: Send + Sync {
    /// Reserves `qty` units of `product_id`.
    fn reserve(&self, product_id: &str, qty: i64) -> Result<(), InventoryError>;
}

/// Tax computation for a net amount.
pub trait TaxCalculator: Send + Sync {
    /// Tax owed on `net_amount` in `region`.
    fn calc_tax_amount(
        &self,
        net_amount: Money,
        region: &str,
        rounding_mode: RoundingMode,
    ) -> Result<Money, TaxError>;

    /// `net_amount` with tax added.
    fn add_tax(
        &self,
        net_amount: Money,
        region: &str,
        rounding_mode: RoundingMode,
    ) -> Result<Money, TaxError>;
}
