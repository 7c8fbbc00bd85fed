//! # Domain Types
//!
//! The catalog item as scanned ([`Product`]) and its aggregated basket entry
//! ([`LineItem`]).
//!
//! ## Type Relationship
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────┐   scan()    ┌─────────────────┐                   │
//! │  │    Product      │ ──────────► │    LineItem     │                   │
//! │  │  ─────────────  │  first scan │  ─────────────  │                   │
//! │  │  sku            │  creates,   │  sku            │                   │
//! │  │  name           │  repeats    │  name           │                   │
//! │  │  price_cents    │  increment  │  unit_price     │                   │
//! │  └─────────────────┘             │  quantity ≥ 1   │                   │
//! │                                  └─────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog item as scanned at the till.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name shown on the receipt.
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,
}

impl Product {
    pub fn new(sku: impl Into<String>, name: impl Into<String>, price_cents: i64) -> Self {
        Product {
            sku: sku.into(),
            name: name.into(),
            price_cents,
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One basket entry per distinct SKU.
///
/// Uses the snapshot pattern: SKU, name and price are copied from the
/// product on the first scan and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// SKU at time of first scan (frozen).
    pub sku: String,
    /// Product name at time of first scan (frozen).
    pub name: String,
    /// Unit price in cents at time of first scan (frozen).
    pub unit_price_cents: i64,
    /// Number of units scanned, always ≥ 1.
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line item with the given quantity.
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        unit_price_cents: i64,
        quantity: i64,
    ) -> Self {
        LineItem {
            sku: sku.into(),
            name: name.into(),
            unit_price_cents,
            quantity,
        }
    }

    /// Creates the first line for a freshly scanned product (quantity 1).
    pub fn from_product(product: &Product) -> Self {
        LineItem::new(
            product.sku.clone(),
            product.name.clone(),
            product.price_cents,
            1,
        )
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.line_total().cents()
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
