//! # Validation Module
//!
//! Request validation for order placement. Runs before any pricing and
//! before any inventory or tax call.
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Precedence                              │
//! │                                                                         │
//! │  1. lines   absent or empty?            → InvalidRequest::Lines         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  2. qty     ANY line qty <= 0?          → InvalidRequest::Qty           │
//! │           │   (all lines checked before moving on)                      │
//! │           ▼                                                             │
//! │  3. region  absent / blank?             → InvalidRequest::Region        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  4. product each line, request order    → InvalidRequest::ProductNotFound│
//! │           │   (first missing id wins)                                   │
//! │           ▼                                                             │
//! │     ValidatedOrder (products resolved once, reused by pricing)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A later category is never reported while an earlier one fails, even if
//! the offending line for the later category comes first in the request.

use crate::error::InvalidRequest;
use crate::money::RoundingMode;
use crate::ports::ProductRepository;
use crate::types::{OrderLine, OrderRequest, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, InvalidRequest>;

/// A line paired with the catalog entry it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLine<'a> {
    pub line: &'a OrderLine,
    pub product: Product,
}

/// An order request that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder<'a> {
    pub region: &'a str,
    pub rounding_mode: RoundingMode,
    /// Same order as the request lines.
    pub lines: Vec<ResolvedLine<'a>>,
}

// =============================================================================
// Individual Checks
// =============================================================================

/// Lines must be present and non-empty. Absent lines arrive as an empty
/// slice via [`OrderRequest::lines`].
pub fn validate_lines(lines: &[OrderLine]) -> ValidationResult<&[OrderLine]> {
    if lines.is_empty() {
        return Err(InvalidRequest::Lines);
    }
    Ok(lines)
}

/// Every quantity must be strictly positive.
///
/// ## Example
/// ```rust
/// use checkout_core::types::OrderLine;
/// use checkout_core::validation::validate_quantities;
///
/// assert!(validate_quantities(&[OrderLine::new("A", 1)]).is_ok());
/// assert!(validate_quantities(&[OrderLine::new("A", 1), OrderLine::new("B", 0)]).is_err());
/// ```
pub fn validate_quantities(lines: &[OrderLine]) -> ValidationResult<()> {
    match lines.iter().find(|line| line.qty <= 0) {
        Some(line) => Err(InvalidRequest::Qty {
            product_id: line.product_id.clone(),
            qty: line.qty,
        }),
        None => Ok(()),
    }
}

/// Region must be present and contain a non-whitespace character.
pub fn validate_region(region: Option<&str>) -> ValidationResult<&str> {
    match region {
        Some(region) if !region.trim().is_empty() => Ok(region),
        _ => Err(InvalidRequest::Region),
    }
}

/// Looks every line's product up, in request order.
///
/// Stops at the first unknown id; lines after it are not looked up.
pub fn resolve_products<'a>(
    lines: &'a [OrderLine],
    catalog: &dyn ProductRepository,
) -> ValidationResult<Vec<ResolvedLine<'a>>> {
    lines
        .iter()
        .map(|line| {
            catalog
                .find_by_id(&line.product_id)
                .map(|product| ResolvedLine { line, product })
                .ok_or_else(|| InvalidRequest::ProductNotFound(line.product_id.clone()))
        })
        .collect()
}

// =============================================================================
// Request Validator
// =============================================================================

/// Runs all checks in precedence order.
///
/// The catalog is only read, and only once every structural check passed.
pub fn validate_request<'a>(
    request: &'a OrderRequest,
    catalog: &dyn ProductRepository,
) -> ValidationResult<ValidatedOrder<'a>> {
    let lines = validate_lines(request.lines())?;
    validate_quantities(lines)?;
    let region = validate_region(request.region.as_deref())?;
    let lines = resolve_products(lines, catalog)?;

    Ok(ValidatedOrder {
        region,
        rounding_mode: request.rounding_mode,
        lines,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct Catalog {
        products: HashMap<String, Product>,
        lookups: Mutex<Vec<String>>,
    }

    impl Catalog {
        fn with(ids: &[&str]) -> Self {
            Catalog {
                products: ids
                    .iter()
                    .map(|id| (id.to_string(), Product::new(*id, Money::new(dec!(100)))))
                    .collect(),
                lookups: Mutex::new(Vec::new()),
            }
        }

        fn lookups(&self) -> Vec<String> {
            self.lookups.lock().unwrap().clone()
        }
    }

    impl ProductRepository for Catalog {
        fn find_by_id(&self, product_id: &str) -> Option<Product> {
            self.lookups.lock().unwrap().push(product_id.to_string());
            self.products.get(product_id).cloned()
        }
    }

    fn request(region: Option<&str>, lines: Option<Vec<OrderLine>>) -> OrderRequest {
        OrderRequest {
            region: region.map(str::to_string),
            rounding_mode: RoundingMode::HalfUp,
            lines,
        }
    }

    #[test]
    fn test_lines_absent_or_empty() {
        let catalog = Catalog::with(&["A"]);

        let err = validate_request(&request(Some("JP"), None), &catalog).unwrap_err();
        assert_eq!(err, InvalidRequest::Lines);

        let err = validate_request(&request(Some("JP"), Some(vec![])), &catalog).unwrap_err();
        assert_eq!(err, InvalidRequest::Lines);

        assert!(catalog.lookups().is_empty());
    }

    #[test]
    fn test_qty_checked_before_region() {
        let catalog = Catalog::with(&["A"]);
        let req = request(None, Some(vec![OrderLine::new("A", 0)]));

        let err = validate_request(&req, &catalog).unwrap_err();
        assert_eq!(err.reason(), "qty");
        assert!(catalog.lookups().is_empty());
    }

    #[test]
    fn test_qty_checked_across_all_lines_before_products() {
        // First line references an unknown product, last line has qty -1:
        // the qty category is reported first.
        let catalog = Catalog::with(&["A"]);
        let req = request(
            Some("JP"),
            Some(vec![
                OrderLine::new("MISSING", 1),
                OrderLine::new("A", 2),
                OrderLine::new("A", -1),
            ]),
        );

        let err = validate_request(&req, &catalog).unwrap_err();
        assert_eq!(
            err,
            InvalidRequest::Qty {
                product_id: "A".to_string(),
                qty: -1
            }
        );
        assert!(catalog.lookups().is_empty());
    }

    #[test]
    fn test_region_blank_variants() {
        let catalog = Catalog::with(&["A"]);
        for region in [None, Some(""), Some("   "), Some("\t\n")] {
            let req = request(region, Some(vec![OrderLine::new("A", 1)]));
            let err = validate_request(&req, &catalog).unwrap_err();
            assert_eq!(err, InvalidRequest::Region, "region {:?}", region);
        }
        assert!(catalog.lookups().is_empty());
    }

    #[test]
    fn test_first_missing_product_wins() {
        let catalog = Catalog::with(&["A"]);
        let req = request(
            Some("JP"),
            Some(vec![
                OrderLine::new("A", 1),
                OrderLine::new("X", 1),
                OrderLine::new("Y", 1),
            ]),
        );

        let err = validate_request(&req, &catalog).unwrap_err();
        assert_eq!(err.to_string(), "product not found: X");
        assert_eq!(catalog.lookups(), vec!["A", "X"]);
    }

    #[test]
    fn test_valid_request_resolves_products_once_in_order() {
        let catalog = Catalog::with(&["A", "B"]);
        let req = request(
            Some("JP"),
            Some(vec![OrderLine::new("B", 5), OrderLine::new("A", 3)]),
        );

        let validated = validate_request(&req, &catalog).unwrap();
        assert_eq!(validated.region, "JP");
        assert_eq!(validated.rounding_mode, RoundingMode::HalfUp);
        let ids: Vec<&str> = validated
            .lines
            .iter()
            .map(|resolved| resolved.product.id.as_str())
            .collect();
        assert_eq!(ids, vec!["B", "A"]);
        assert_eq!(catalog.lookups(), vec!["B", "A"]);
    }
}
