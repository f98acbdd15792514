//! # checkout-adapters: Reference Collaborators
//!
//! In-memory implementations of the checkout-core ports plus the
//! `checkout.toml` configuration that seeds them.
//!
//! ## Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout.toml + env ──► CheckoutConfig::load()                        │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                          build_service(&config)                         │
//! │                                  │                                      │
//! │        ┌─────────────────┬───────┴─────────┬──────────────────┐        │
//! │        ▼                 ▼                 ▼                  ▼        │
//! │  InMemoryCatalog  InMemoryInventory  RegionalTaxTable  PercentCapPolicy│
//! │        └─────────────────┴───────┬─────────┴──────────────────┘        │
//! │                                  ▼                                      │
//! │                    OrderService::place_order(&request)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - `checkout.toml` loading, validation and env overrides
//! - [`error`] - Configuration errors
//! - [`repository`] - In-memory catalog and inventory
//! - [`tax`] - Per-region flat tax table

pub mod config;
pub mod error;
pub mod repository;
pub mod tax;

use std::sync::Arc;

use checkout_core::OrderService;
use tracing::info;

pub use config::CheckoutConfig;
pub use error::{ConfigError, ConfigResult};
pub use repository::{InMemoryCatalog, InMemoryInventory};
pub use tax::{RegionTax, RegionalTaxTable};

/// An order service backed by the in-memory collaborators.
pub type InMemoryOrderService = OrderService<InMemoryCatalog, InMemoryInventory, RegionalTaxTable>;

/// Builds an order service from configuration.
pub fn build_service(config: &CheckoutConfig) -> InMemoryOrderService {
    let catalog = Arc::new(config.catalog());
    let inventory = Arc::new(config.inventory());
    let tax = Arc::new(config.tax_table());

    info!(
        products = catalog.len(),
        regions = config.tax.regions.len(),
        cap_rate = %config.discount.cap_rate,
        "Order service ready"
    );

    OrderService::new(catalog, inventory, tax)
        .with_cap_policy(Arc::new(config.cap_policy()))
        .with_discount_rules(config.discount.rules.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{
        DiscountType, InventoryError, Money, OrderError, OrderLine, OrderRequest, RoundingMode,
    };
    use rust_decimal_macros::dec;

    const STORE: &str = r#"
        [discount]
        cap_rate = "0.30"

        [tax.regions.JP]
        rate = "0.10"
        gross_scale = 0

        [[catalog.products]]
        id = "A"
        unit_price = "100"

        [[catalog.products]]
        id = "B"
        unit_price = "200"

        [[catalog.products]]
        id = "C"
        unit_price = "300"

        [[inventory.stock]]
        product_id = "A"
        available = 15
    "#;

    fn request(lines: Vec<OrderLine>) -> OrderRequest {
        OrderRequest::new("JP", RoundingMode::HalfUp, lines)
    }

    #[test]
    fn test_configured_service_places_order() {
        let config = CheckoutConfig::from_toml(STORE).unwrap();
        let service = build_service(&config);

        let result = service
            .place_order(&request(vec![
                OrderLine::new("A", 10),
                OrderLine::new("B", 1),
                OrderLine::new("C", 1),
            ]))
            .unwrap();

        // 1000 + 200 + 300 = 1500; VOLUME 50.00, MULTI_ITEM 29.00
        assert_eq!(result.total_net_before_discount, Money::new(dec!(1500)));
        assert_eq!(result.total_discount.to_string(), "79.00");
        assert_eq!(result.total_net_after_discount.to_string(), "1421.00");
        assert_eq!(result.total_tax.to_string(), "150.00");
        assert_eq!(result.total_gross.to_string(), "1650");
        assert_eq!(
            result.applied_discounts,
            vec![DiscountType::Volume, DiscountType::MultiItem]
        );
    }

    #[test]
    fn test_configured_stock_is_consumed() {
        let config = CheckoutConfig::from_toml(STORE).unwrap();
        let service = build_service(&config);
        let order = request(vec![OrderLine::new("A", 10)]);

        assert!(service.place_order(&order).is_ok());
        let err = service.place_order(&order).unwrap_err();
        assert_eq!(
            err,
            OrderError::Inventory(InventoryError::InsufficientStock {
                product_id: "A".to_string(),
                available: 5,
                requested: 10,
            })
        );
    }

    #[test]
    fn test_configured_rules_reach_the_engine() {
        let mut config = CheckoutConfig::from_toml(STORE).unwrap();
        config.discount.rules.volume_min_qty = 20;
        let service = build_service(&config);
        assert_eq!(service.discount_rules().volume_min_qty, 20);

        let result = service
            .place_order(&request(vec![OrderLine::new("A", 10)]))
            .unwrap();
        assert!(result.applied_discounts.is_empty());
    }
}
