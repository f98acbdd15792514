//! # Order Service
//!
//! The order placement use case: the only entry point that touches
//! collaborators.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        place_order(request)                             │
//! │                                                                         │
//! │  1. validate   ── catalog lookups only ──────────► InvalidRequest       │
//! │       │                                                                 │
//! │  2. price      ── HALF_UP line subtotals ────────► AmountOutOfRange     │
//! │       │                                                                 │
//! │  3. discount   ── VOLUME → MULTI_ITEM → HIGH_AMOUNT → cap               │
//! │       │                                                                 │
//! │  4. tax        ── calc_tax_amount, then add_tax ─► TaxError             │
//! │       │           (base: net BEFORE discount)                           │
//! │  5. reserve    ── one call per line, line order ─► InventoryError       │
//! │       │                                                                 │
//! │  6. OrderResult                                                         │
//! │                                                                         │
//! │  Any failure aborts the remaining stages. Completed stages are not      │
//! │  undone: a failed reservation leaves earlier reservations in place.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service keeps no mutable state; one instance can serve any number of
//! calls, concurrently if the collaborators allow it.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cap::{CapPolicy, PercentCapPolicy};
use crate::discount::{DiscountEngine, DiscountRules};
use crate::error::{CheckoutResult, OrderError};
use crate::money::Money;
use crate::ports::{InventoryService, ProductRepository, TaxCalculator};
use crate::pricing::{price_lines, PricedOrder};
use crate::types::{OrderRequest, OrderResult};
use crate::validation::validate_request;

/// Order placement orchestrator.
///
/// ## Usage
/// ```rust,ignore
/// let service = OrderService::new(catalog, inventory, tax)
///     .with_cap_policy(Arc::new(PercentCapPolicy::new(dec!(0.25))));
///
/// let result = service.place_order(&request)?;
/// println!("{} {:?}", result.total_gross, result.applied_discounts);
/// ```
pub struct OrderService<P, I, T>
where
    P: ProductRepository,
    I: InventoryService,
    T: TaxCalculator,
{
    products: Arc<P>,
    inventory: Arc<I>,
    tax: Arc<T>,
    cap_policy: Arc<dyn CapPolicy>,
    discounts: DiscountEngine,
}

impl<P, I, T> OrderService<P, I, T>
where
    P: ProductRepository,
    I: InventoryService,
    T: TaxCalculator,
{
    /// Creates a service with the default 30% cap and default discount rules.
    pub fn new(products: Arc<P>, inventory: Arc<I>, tax: Arc<T>) -> Self {
        OrderService {
            products,
            inventory,
            tax,
            cap_policy: Arc::new(PercentCapPolicy::default()),
            discounts: DiscountEngine::default(),
        }
    }

    /// Replaces the cap policy.
    pub fn with_cap_policy(mut self, cap_policy: Arc<dyn CapPolicy>) -> Self {
        self.cap_policy = cap_policy;
        self
    }

    /// Replaces the discount thresholds and rates.
    pub fn with_discount_rules(mut self, rules: DiscountRules) -> Self {
        self.discounts = DiscountEngine::new(rules);
        self
    }

    pub fn discount_rules(&self) -> &DiscountRules {
        self.discounts.rules()
    }

    /// Prices, taxes and reserves one order.
    ///
    /// ## Errors
    /// - [`OrderError::InvalidRequest`] before any inventory or tax call
    /// - [`OrderError::AmountOutOfRange`] when a subtotal or the net
    ///   overflows, before any inventory or tax call
    /// - [`OrderError::Tax`] after pricing, before any reservation
    /// - [`OrderError::Inventory`] after tax, possibly after earlier lines
    ///   were already reserved
    pub fn place_order(&self, request: &OrderRequest) -> CheckoutResult<OrderResult> {
        let result = self.run(request);
        if let Err(e) = &result {
            warn!(error = %e, reason = ?e.reason(), "Order rejected");
        }
        result
    }

    fn run(&self, request: &OrderRequest) -> CheckoutResult<OrderResult> {
        let validated = validate_request(request, self.products.as_ref())?;
        debug!(
            region = %validated.region,
            lines = validated.lines.len(),
            "Order request validated"
        );

        let priced: PricedOrder = price_lines(&validated.lines)?;
        let net_before_discount = priced.net_before_discount;
        debug!(net = %net_before_discount, "Lines priced");

        let discount = self.discounts.apply(&priced, self.cap_policy.as_ref());
        debug!(
            raw = %discount.raw,
            capped = %discount.total,
            applied = ?discount.applied,
            "Discounts applied"
        );

        let (total_tax, total_gross) =
            self.compute_tax(net_before_discount, validated.region, request)?;

        for line in &priced.lines {
            self.inventory.reserve(&line.product_id, line.qty)?;
            debug!(product_id = %line.product_id, qty = line.qty, "Inventory reserved");
        }

        info!(
            region = %validated.region,
            net = %net_before_discount,
            discount = %discount.total,
            gross = %total_gross,
            "Order placed"
        );

        Ok(OrderResult {
            total_net_before_discount: net_before_discount,
            total_discount: discount.total,
            total_net_after_discount: discount.net_after_discount,
            total_tax,
            total_gross,
            applied_discounts: discount.applied,
        })
    }

    /// Tax amount first, gross second, both on the pre-discount net.
    fn compute_tax(
        &self,
        net_before_discount: Money,
        region: &str,
        request: &OrderRequest,
    ) -> Result<(Money, Money), OrderError> {
        let mode = request.rounding_mode;
        let tax = self.tax.calc_tax_amount(net_before_discount, region, mode)?;
        let gross = self.tax.add_tax(net_before_discount, region, mode)?;
        debug!(tax = %tax, gross = %gross, mode = %mode, "Tax computed");
        Ok((tax, gross))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
