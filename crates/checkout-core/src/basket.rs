//! # Basket
//!
//! The ordered collection of line items being priced.
//!
//! ## Invariants
//! - SKUs are unique within a basket
//! - Insertion order is first-scan order
//! - Every quantity is ≥ 1
//!
//! The basket itself does not merge duplicates; [`Checkout::scan`] looks the
//! SKU up first and only calls [`Basket::add`] for new SKUs.
//!
//! [`Checkout::scan`]: crate::checkout::Checkout::scan

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::LineItem;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    items: Vec<LineItem>,
}

impl Basket {
    /// Creates a new empty basket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line item.
    pub fn add(&mut self, item: LineItem) {
        debug_assert!(
            self.find_by_sku(&item.sku).is_none(),
            "duplicate sku {} in basket",
            item.sku
        );
        self.items.push(item);
    }

    pub fn find_by_sku(&self, sku: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.sku == sku)
    }

    pub fn find_by_sku_mut(&mut self, sku: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| i.sku == sku)
    }

    /// Line items in first-scan order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct SKUs.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Σ unit price × quantity, before discounts.
    pub fn total_price_cents(&self) -> i64 {
        self.items
            .iter()
            .map(LineItem::line_total)
            .sum::<Money>()
            .cents()
    }
}
