//! # Inventory Ledger
//!
//! In-memory stock levels with check-and-reserve.
//!
//! ## Reservation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  reserve("COKE", 3)                                                 │
//! │       │                                                             │
//! │       ▼  (write lock held for check AND decrement)                  │
//! │  available = 5 ── 5 >= 3 ──► available = 2 ──► Ok                  │
//! │               └── 5 <  3 ──► InsufficientStock, stock untouched     │
//! │                                                                     │
//! │  Products without a stock record:                                   │
//! │    track_untracked = false → always reservable (no stock tracking)  │
//! │    track_untracked = true  → UnknownProduct                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Check and decrement happen under one lock, so two orders can never both
//! take the last unit. Reservations made by one order are not released if a
//! later line of the same order fails.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use checkout_core::{InventoryError, InventoryService};
use tracing::debug;

#[derive(Debug, Default)]
pub struct InMemoryInventory {
    stock: RwLock<HashMap<String, i64>>,
    /// Reject products without a stock record instead of treating them as
    /// untracked.
    track_untracked: bool,
}

impl InMemoryInventory {
    /// Ledger where products without a stock record are always reservable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger where every product must have a stock record.
    pub fn strict() -> Self {
        InMemoryInventory {
            track_untracked: true,
            ..Self::default()
        }
    }

    /// Seeds stock levels.
    pub fn with_stock(self, stock: impl IntoIterator<Item = (String, i64)>) -> Self {
        for (product_id, available) in stock {
            self.set_stock(&product_id, available);
        }
        self
    }

    /// Sets the absolute stock level of a product.
    pub fn set_stock(&self, product_id: &str, available: i64) {
        debug!(id = %product_id, available, "Setting stock");
        self.stock
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product_id.to_string(), available);
    }

    /// Current stock level, `None` when the product is untracked.
    pub fn available(&self, product_id: &str) -> Option<i64> {
        self.stock
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(product_id)
            .copied()
    }
}

impl InventoryService for InMemoryInventory {
    fn reserve(&self, product_id: &str, qty: i64) -> Result<(), InventoryError> {
        let mut stock = self.stock.write().unwrap_or_else(PoisonError::into_inner);

        let Some(available) = stock.get_mut(product_id) else {
            if self.track_untracked {
                return Err(InventoryError::UnknownProduct(product_id.to_string()));
            }
            debug!(id = %product_id, qty, "Untracked product, reservation accepted");
            return Ok(());
        };

        if *available < qty {
            return Err(InventoryError::InsufficientStock {
                product_id: product_id.to_string(),
                available: *available,
                requested: qty,
            });
        }

        *available -= qty;
        debug!(id = %product_id, qty, remaining = *available, "Stock reserved");
        Ok(())
    }
}
