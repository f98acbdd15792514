//! # Regional Tax Table
//!
//! A flat tax rate per region, standing in for a real tax engine.
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calc_tax_amount(net, region, mode)                                     │
//! │      tax = round(net × rate, 2, mode)                                   │
//! │                                                                         │
//! │  add_tax(net, region, mode)                                             │
//! │      gross = round(net + tax, gross_scale, mode)                        │
//! │                                                                         │
//! │  Example: net 1500.00, rate 0.10, gross_scale 0                         │
//! │      tax   = 150.00                                                     │
//! │      gross = 1650                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `gross_scale` lets zero-decimal currencies (JPY, KRW) report a whole
//! gross amount while tax stays at two places.

use std::collections::HashMap;

use checkout_core::money::MONEY_SCALE;
use checkout_core::{Money, RoundingMode, TaxCalculator, TaxError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tax settings of one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionTax {
    /// Fractional rate (0.10 = 10%).
    pub rate: Decimal,

    /// Decimal places of the gross amount.
    #[serde(default = "default_gross_scale")]
    pub gross_scale: u32,
}

fn default_gross_scale() -> u32 {
    MONEY_SCALE
}

impl RegionTax {
    pub fn new(rate: Decimal) -> Self {
        RegionTax {
            rate,
            gross_scale: default_gross_scale(),
        }
    }

    pub fn with_gross_scale(mut self, gross_scale: u32) -> Self {
        self.gross_scale = gross_scale;
        self
    }
}

/// Per-region flat tax. Region codes are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct RegionalTaxTable {
    regions: HashMap<String, RegionTax>,
}

impl RegionalTaxTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: &str, tax: RegionTax) -> Self {
        self.regions.insert(normalize(region), tax);
        self
    }

    pub fn from_regions<'a>(regions: impl IntoIterator<Item = (&'a String, &'a RegionTax)>) -> Self {
        regions
            .into_iter()
            .fold(Self::new(), |table, (region, tax)| table.with_region(region, *tax))
    }

    pub fn region(&self, region: &str) -> Result<&RegionTax, TaxError> {
        self.regions
            .get(&normalize(region))
            .ok_or_else(|| TaxError::UnknownRegion(region.to_string()))
    }
}

fn normalize(region: &str) -> String {
    region.trim().to_uppercase()
}

impl TaxCalculator for RegionalTaxTable {
    fn calc_tax_amount(
        &self,
        net_amount: Money,
        region: &str,
        rounding_mode: RoundingMode,
    ) -> Result<Money, TaxError> {
        let tax = self.region(region)?;
        let amount = net_amount.percentage(tax.rate, rounding_mode);
        debug!(region = %region, rate = %tax.rate, net = %net_amount, tax = %amount, "Tax amount");
        Ok(amount)
    }

    fn add_tax(
        &self,
        net_amount: Money,
        region: &str,
        rounding_mode: RoundingMode,
    ) -> Result<Money, TaxError> {
        let tax = self.region(region)?;
        let amount = self.calc_tax_amount(net_amount, region, rounding_mode)?;
        Ok((net_amount + amount).round_to_scale(tax.gross_scale, rounding_mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> RegionalTaxTable {
        RegionalTaxTable::new()
            .with_region("US-TX", RegionTax::new(dec!(0.0825)))
            .with_region("JP", RegionTax::new(dec!(0.10)).with_gross_scale(0))
    }

    #[test]
    fn test_tax_uses_request_rounding_mode() {
        // 10.00 × 8.25% = 0.825
        let net = Money::new(dec!(10.00));
        let up = table().calc_tax_amount(net, "US-TX", RoundingMode::HalfUp).unwrap();
        let even = table().calc_tax_amount(net, "US-TX", RoundingMode::HalfEven).unwrap();
        assert_eq!(up.to_string(), "0.83");
        assert_eq!(even.to_string(), "0.82");
    }

    #[test]
    fn test_gross_scale_zero() {
        let net = Money::new(dec!(1234.50));
        let gross = table().add_tax(net, "jp", RoundingMode::HalfUp).unwrap();
        // 1234.50 + 123.45 = 1357.95 → 1358
        assert_eq!(gross.to_string(), "1358");
    }

    #[test]
    fn test_gross_default_scale_two() {
        let net = Money::new(dec!(10.00));
        let gross = table().add_tax(net, "US-TX", RoundingMode::HalfUp).unwrap();
        assert_eq!(gross.to_string(), "10.83");
    }

    #[test]
    fn test_unknown_region() {
        let err = table()
            .calc_tax_amount(Money::zero(), "ZZ", RoundingMode::HalfUp)
            .unwrap_err();
        assert_eq!(err, TaxError::UnknownRegion("ZZ".to_string()));
    }
}
