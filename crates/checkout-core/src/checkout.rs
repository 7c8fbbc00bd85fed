//! # Checkout
//!
//! Scans products into a basket and prices it against a fixed rule set.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Checkout::new(rules) ─── rules are immutable from here on             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  scan(product) × N ────► basket: +1 qty or new LineItem                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal()       = Σ unit × qty                                       │
//! │  discount_cents() = Σ items Σ rules rule.discount_cents(item)          │
//! │  total()          = subtotal − discount      (not clamped)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  finalize_order() ────► Order snapshot ────► render_receipt()          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stacking
//! Several rules may target the same SKU. They all apply and their discounts
//! add up; each rule clamps itself at zero but the sum is not re-clamped, so
//! `total()` can go negative.

use crate::basket::Basket;
use crate::money::Money;
use crate::order::Order;
use crate::rules::{DiscountRule, PricingRule};
use crate::types::{LineItem, Product};
use crate::DEFAULT_CURRENCY_SYMBOL;

/// One pricing session: a rule set and the basket being built.
///
/// Not synchronized; keep each instance to a single session.
#[derive(Debug, Clone)]
pub struct Checkout {
    pricing_rules: Vec<PricingRule>,
    basket: Basket,
}

impl Checkout {
    /// Starts a checkout with an empty basket.
    pub fn new(pricing_rules: Vec<PricingRule>) -> Self {
        Checkout {
            pricing_rules,
            basket: Basket::new(),
        }
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - SKU already in basket: quantity + 1
    /// - SKU not in basket: new line with quantity 1
    pub fn scan(&mut self, product: &Product) {
        if let Some(item) = self.basket.find_by_sku_mut(&product.sku) {
            item.quantity += 1;
            return;
        }

        self.basket.add(LineItem::from_product(product));
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn rules(&self) -> &[PricingRule] {
        &self.pricing_rules
    }

    /// Price of everything scanned, before discounts.
    pub fn subtotal(&self) -> i64 {
        self.basket.total_price_cents()
    }

    /// Sum of every rule's discount over every line.
    pub fn discount_cents(&self) -> i64 {
        self.basket
            .items()
            .iter()
            .flat_map(|item| {
                self.pricing_rules
                    .iter()
                    .map(move |rule| Money::from_cents(rule.discount_cents(item)))
            })
            .sum::<Money>()
            .cents()
    }

    /// Subtotal minus discount.
    pub fn total(&self) -> i64 {
        (Money::from_cents(self.subtotal()) - Money::from_cents(self.discount_cents())).cents()
    }

    /// Freezes the current basket and totals into an [`Order`].
    pub fn finalize_order(&self) -> Order {
        Order::new(
            self.basket.items().to_vec(),
            self.subtotal(),
            self.discount_cents(),
            self.total(),
        )
    }

    /// Finalizes and renders the receipt with the default currency symbol.
    pub fn receipt(&self) -> String {
        self.finalize_order()
            .render_receipt(DEFAULT_CURRENCY_SYMBOL)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
