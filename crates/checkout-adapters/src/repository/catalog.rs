//! # Product Catalog
//!
//! In-memory product lookup keyed by product id.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use checkout_core::{Product, ProductRepository};
use tracing::debug;

/// Thread-safe in-memory catalog.
///
/// ## Usage
/// ```rust
/// use checkout_adapters::InMemoryCatalog;
/// use checkout_core::{Money, Product, ProductRepository};
/// use rust_decimal::Decimal;
///
/// let catalog = InMemoryCatalog::from_products(vec![
///     Product::new("COKE-330", Money::new(Decimal::new(199, 2))),
/// ]);
/// assert!(catalog.find_by_id("COKE-330").is_some());
/// assert!(catalog.find_by_id("PEPSI-330").is_none());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<String, Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from products; a later duplicate id replaces an
    /// earlier one.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let catalog = Self::new();
        for product in products {
            catalog.upsert(product);
        }
        catalog
    }

    /// Inserts or replaces a product. Returns the replaced entry.
    pub fn upsert(&self, product: Product) -> Option<Product> {
        debug!(id = %product.id, price = %product.unit_price, "Upserting product");
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product.id.clone(), product)
    }

    pub fn remove(&self, product_id: &str) -> Option<Product> {
        debug!(id = %product_id, "Removing product");
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(product_id)
    }

    pub fn len(&self) -> usize {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProductRepository for InMemoryCatalog {
    fn find_by_id(&self, product_id: &str) -> Option<Product> {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(product_id)
            .cloned()
    }
}
