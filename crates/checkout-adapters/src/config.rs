//! # Checkout Configuration
//!
//! Discount policy, tax table and seed data for the reference collaborators.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CHECKOUT_CAP_RATE=0.25                                             │
//! │     CHECKOUT_STRICT_INVENTORY=true                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/checkout-pricing/checkout.toml (Linux)                   │
//! │     ~/Library/Application Support/com.checkout.pricing/checkout.toml   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     30% cap, VOLUME 10+/5%, MULTI_ITEM 3+/2%, HIGH_AMOUNT 100000+/3%   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [discount]
//! cap_rate = "0.30"
//!
//! [discount.rules]
//! volume_min_qty = 10
//! volume_rate = "0.05"
//!
//! [tax.regions.JP]
//! rate = "0.10"
//! gross_scale = 0
//!
//! [[catalog.products]]
//! id = "COKE-330"
//! unit_price = "1.99"
//!
//! [inventory]
//! strict = false
//!
//! [[inventory.stock]]
//! product_id = "COKE-330"
//! available = 120
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use checkout_core::{DiscountRules, Money, PercentCapPolicy, Product, DEFAULT_CAP_RATE};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::repository::{InMemoryCatalog, InMemoryInventory};
use crate::tax::{RegionTax, RegionalTaxTable};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "CHECKOUT_CONFIG";

// =============================================================================
// Discount Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSettings {
    /// Largest total discount as a fraction of the pre-discount net.
    #[serde(default = "default_cap_rate")]
    pub cap_rate: Decimal,

    #[serde(default)]
    pub rules: DiscountRules,
}

fn default_cap_rate() -> Decimal {
    DEFAULT_CAP_RATE
}

impl Default for DiscountSettings {
    fn default() -> Self {
        DiscountSettings {
            cap_rate: default_cap_rate(),
            rules: DiscountRules::default(),
        }
    }
}

// =============================================================================
// Tax Settings
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSettings {
    /// Region code → flat tax settings.
    #[serde(default)]
    pub regions: BTreeMap<String, RegionTax>,
}

// =============================================================================
// Seed Data
// =============================================================================

/// A catalog entry to load at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSeed {
    pub id: String,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default)]
    pub products: Vec<ProductSeed>,
}

/// A stock level to load at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSeed {
    pub product_id: String,
    pub available: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySettings {
    /// Reject reservations for products without a stock record.
    #[serde(default)]
    pub strict: bool,

    #[serde(default)]
    pub stock: Vec<StockSeed>,
}

// =============================================================================
// Checkout Config
// =============================================================================

/// Complete configuration of the checkout adapters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub discount: DiscountSettings,

    #[serde(default)]
    pub tax: TaxSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub inventory: InventorySettings,
}

impl CheckoutConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default path)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading checkout config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load checkout config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Does not apply environment overrides.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::SaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        info!(?path, "Checkout config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        check_fraction("discount.cap_rate", self.discount.cap_rate)?;

        let rules = &self.discount.rules;
        check_fraction("discount.rules.volume_rate", rules.volume_rate)?;
        check_fraction("discount.rules.multi_item_rate", rules.multi_item_rate)?;
        check_fraction("discount.rules.high_amount_rate", rules.high_amount_rate)?;
        if rules.volume_min_qty < 1 {
            return Err(ConfigError::Invalid(
                "discount.rules.volume_min_qty must be at least 1".into(),
            ));
        }
        if rules.multi_item_min_lines < 1 {
            return Err(ConfigError::Invalid(
                "discount.rules.multi_item_min_lines must be at least 1".into(),
            ));
        }
        if rules.high_amount_threshold.is_sign_negative() {
            return Err(ConfigError::Invalid(
                "discount.rules.high_amount_threshold must not be negative".into(),
            ));
        }

        for (region, tax) in &self.tax.regions {
            if region.trim().is_empty() {
                return Err(ConfigError::Invalid("tax region code must not be blank".into()));
            }
            if tax.rate.is_sign_negative() {
                return Err(ConfigError::Invalid(format!(
                    "tax rate for {} must not be negative",
                    region
                )));
            }
        }

        for product in &self.catalog.products {
            if product.id.trim().is_empty() {
                return Err(ConfigError::Invalid("catalog product id must not be blank".into()));
            }
            if product.unit_price.is_sign_negative() {
                return Err(ConfigError::Invalid(format!(
                    "unit price of {} must not be negative",
                    product.id
                )));
            }
        }

        for stock in &self.inventory.stock {
            if stock.available < 0 {
                return Err(ConfigError::Invalid(format!(
                    "stock of {} must not be negative",
                    stock.product_id
                )));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup` (environment in production).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(rate) = lookup("CHECKOUT_CAP_RATE") {
            match rate.trim().parse::<Decimal>() {
                Ok(parsed) => {
                    debug!(cap_rate = %parsed, "Overriding cap rate from environment");
                    self.discount.cap_rate = parsed;
                }
                Err(_) => warn!(value = %rate, "Ignoring unparsable CHECKOUT_CAP_RATE"),
            }
        }

        if let Some(strict) = lookup("CHECKOUT_STRICT_INVENTORY") {
            match strict.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.inventory.strict = true,
                "0" | "false" | "no" => self.inventory.strict = false,
                _ => warn!(value = %strict, "Unknown CHECKOUT_STRICT_INVENTORY value"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        directories::ProjectDirs::from("com", "checkout", "pricing")
            .map(|dirs| dirs.config_dir().join("checkout.toml"))
    }

    // =========================================================================
    // Collaborator Builders
    // =========================================================================

    pub fn cap_policy(&self) -> PercentCapPolicy {
        PercentCapPolicy::new(self.discount.cap_rate)
    }

    pub fn catalog(&self) -> InMemoryCatalog {
        InMemoryCatalog::from_products(
            self.catalog
                .products
                .iter()
                .map(|seed| Product::new(seed.id.clone(), Money::new(seed.unit_price))),
        )
    }

    pub fn inventory(&self) -> InMemoryInventory {
        let ledger = if self.inventory.strict {
            InMemoryInventory::strict()
        } else {
            InMemoryInventory::new()
        };
        ledger.with_stock(
            self.inventory
                .stock
                .iter()
                .map(|seed| (seed.product_id.clone(), seed.available)),
        )
    }

    pub fn tax_table(&self) -> RegionalTaxTable {
        RegionalTaxTable::from_regions(&self.tax.regions)
    }
}

fn check_fraction(field: &str, value: Decimal) -> ConfigResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(ConfigError::Invalid(format!(
            "{} must be between 0 and 1, got {}",
            field, value
        )));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{InventoryService, ProductRepository, RoundingMode, TaxCalculator};
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"
        [discount]
        cap_rate = "0.25"

        [discount.rules]
        volume_min_qty = 12

        [tax.regions.JP]
        rate = "0.10"
        gross_scale = 0

        [tax.regions.US-TX]
        rate = "0.0825"

        [[catalog.products]]
        id = "COKE-330"
        unit_price = "1.99"

        [[catalog.products]]
        id = "CHIPS"
        unit_price = 3

        [inventory]
        strict = true

        [[inventory.stock]]
        product_id = "COKE-330"
        available = 120
    "#;

    #[test]
    fn test_default_config() {
        let config = CheckoutConfig::default();
        assert_eq!(config.discount.cap_rate, dec!(0.30));
        assert_eq!(config.discount.rules, DiscountRules::default());
        assert!(config.tax.regions.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_sample() {
        let config = CheckoutConfig::from_toml(SAMPLE).unwrap();
        assert!(config.validate().is_ok());

        assert_eq!(config.discount.cap_rate, dec!(0.25));
        assert_eq!(config.discount.rules.volume_min_qty, 12);
        // Unspecified rule fields keep their defaults.
        assert_eq!(config.discount.rules.volume_rate, dec!(0.05));
        assert_eq!(config.discount.rules.multi_item_min_lines, 3);

        assert_eq!(config.tax.regions["JP"].gross_scale, 0);
        assert_eq!(config.tax.regions["US-TX"].gross_scale, 2);
        assert_eq!(config.catalog.products.len(), 2);
        assert_eq!(config.catalog.products[1].unit_price, dec!(3));
        assert!(config.inventory.strict);
    }

    #[test]
    fn test_builders_wire_seed_data() {
        let config = CheckoutConfig::from_toml(SAMPLE).unwrap();

        let catalog = config.catalog();
        assert_eq!(
            catalog.find_by_id("COKE-330").unwrap().unit_price,
            Money::new(dec!(1.99))
        );

        let inventory = config.inventory();
        assert_eq!(inventory.available("COKE-330"), Some(120));
        assert!(inventory.reserve("CHIPS", 1).is_err());

        let tax = config.tax_table();
        let gross = tax
            .add_tax(Money::new(dec!(100.00)), "jp", RoundingMode::HalfUp)
            .unwrap();
        assert_eq!(gross.to_string(), "110");

        assert_eq!(config.cap_policy().rate(), dec!(0.25));
    }

    #[test]
    fn test_validation_rejects_out_of_range_values() {
        let mut config = CheckoutConfig::default();
        config.discount.cap_rate = dec!(1.5);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = CheckoutConfig::default();
        config.discount.rules.volume_min_qty = 0;
        assert!(config.validate().is_err());

        let mut config = CheckoutConfig::default();
        config.catalog.products.push(ProductSeed {
            id: "A".to_string(),
            unit_price: dec!(-1),
        });
        assert!(config.validate().is_err());

        let mut config = CheckoutConfig::default();
        config.inventory.stock.push(StockSeed {
            product_id: "A".to_string(),
            available: -5,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = CheckoutConfig::default();
        config.apply_overrides(|key| match key {
            "CHECKOUT_CAP_RATE" => Some("0.02".to_string()),
            "CHECKOUT_STRICT_INVENTORY" => Some("yes".to_string()),
            _ => None,
        });
        assert_eq!(config.discount.cap_rate, dec!(0.02));
        assert!(config.inventory.strict);
    }

    #[test]
    fn test_unparsable_override_is_ignored() {
        let mut config = CheckoutConfig::default();
        config.apply_overrides(|key| (key == "CHECKOUT_CAP_RATE").then(|| "lots".to_string()));
        assert_eq!(config.discount.cap_rate, dec!(0.30));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("checkout.toml");

        let config = CheckoutConfig::from_toml(SAMPLE).unwrap();
        config.save(Some(path.clone())).unwrap();

        let loaded = CheckoutConfig::from_toml(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkout.toml");
        std::fs::write(&path, "[discount]\ncap_rate = \"2\"\n").unwrap();

        let err = CheckoutConfig::load(Some(path.clone())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let fallback = CheckoutConfig::load_or_default(Some(path));
        assert_eq!(fallback, CheckoutConfig::default());
    }
}
