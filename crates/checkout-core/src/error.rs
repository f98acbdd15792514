//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  OrderError            - What `place_order` returns                     │
//! │  ├── InvalidRequest    - Caller error, never retried                    │
//! │  │   ├── Lines           reason "lines"                                 │
//! │  │   ├── Qty             reason "qty"                                   │
//! │  │   ├── Region          reason "region"                                │
//! │  │   └── ProductNotFound reason "product"                               │
//! │  ├── Inventory         - Raised by InventoryService::reserve            │
//! │  ├── Tax               - Raised by TaxCalculator                        │
//! │  └── AmountOutOfRange  - Line or order total too large, never retried   │
//! │                                                                         │
//! │  Collaborator errors pass through unchanged (transparent).              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, region)
//! 3. Every invalid request carries a machine-checkable reason tag

use thiserror::Error;

// =============================================================================
// Invalid Request
// =============================================================================

/// Structural or business precondition failure of an order request.
///
/// Variants are listed in the order the validator checks them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    /// `lines` is absent or empty.
    #[error("lines must not be null or empty")]
    Lines,

    /// Some line has a zero or negative quantity.
    #[error("qty must be positive, got {qty} for {product_id}")]
    Qty { product_id: String, qty: i64 },

    /// `region` is absent, empty or whitespace only.
    #[error("region must not be null or blank")]
    Region,

    /// A line references a product the catalog does not know.
    #[error("product not found: {0}")]
    ProductNotFound(String),
}

impl InvalidRequest {
    /// Machine-checkable reason tag.
    pub const fn reason(&self) -> &'static str {
        match self {
            InvalidRequest::Lines => "lines",
            InvalidRequest::Qty { .. } => "qty",
            InvalidRequest::Region => "region",
            InvalidRequest::ProductNotFound(_) => "product",
        }
    }
}

// =============================================================================
// Collaborator Errors
// =============================================================================

/// Failure reported by an inventory collaborator while reserving stock.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Not enough stock to cover the reservation.
    #[error("Insufficient stock for {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// The inventory store has no record for the product.
    #[error("No inventory record for product: {0}")]
    UnknownProduct(String),

    /// The inventory backend could not be reached or refused the call.
    #[error("Inventory unavailable: {0}")]
    Unavailable(String),
}

/// Failure reported by a tax collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxError {
    /// No tax rule is configured for the region.
    #[error("No tax rate configured for region: {0}")]
    UnknownRegion(String),

    /// The tax backend could not be reached or refused the call.
    #[error("Tax calculation unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Order Error
// =============================================================================

/// Everything that can abort `OrderService::place_order`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Request rejected before any inventory or tax call.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] InvalidRequest),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Tax(#[from] TaxError),

    /// An amount exceeded what two-place decimal money can hold.
    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),
}

impl OrderError {
    /// Reason tag when this is a request error.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            OrderError::InvalidRequest(invalid) => Some(invalid.reason()),
            _ => None,
        }
    }

    /// Invalid requests fail the same way every time. Collaborator errors
    /// may succeed on a later call, but the core itself never retries.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            OrderError::InvalidRequest(_) | OrderError::AmountOutOfRange(_)
        )
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with OrderError.
pub type CheckoutResult<T> = Result<T, OrderError>;

// =============================================================================
// Unit Tests
// =============================================================================
