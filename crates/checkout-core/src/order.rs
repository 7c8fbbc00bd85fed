//! # Order
//!
//! The frozen result of a checkout, ready to print.
//!
//! ## Receipt Layout
//! ```text
//! +--------------+--------+----------+
//! | Item         | Price  | Quantity |
//! +--------------+--------+----------+
//! | Green Tea    |  £3.11 |        2 |   ◄── one row per line item
//! | Strawberries |  £5.00 |        1 |       (unit price, not line total)
//! | Coffee       | £11.23 |        1 |
//! +--------------+--------+----------+
//! | Subtotal     | £22.45 |          |
//! | Discount     |  £3.11 |          |
//! | Total        | £19.34 |          |
//! +--------------+--------+----------+
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::table::{Alignment, Table};
use crate::types::LineItem;

/// Snapshot of a basket and its totals at finalize time.
///
/// Built once by [`Checkout::finalize_order`](crate::Checkout::finalize_order)
/// and not mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: Uuid,
    pub items: Vec<LineItem>,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    /// When the order was finalized.
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        items: Vec<LineItem>,
        subtotal_cents: i64,
        discount_cents: i64,
        total_cents: i64,
    ) -> Self {
        Order {
            id: Uuid::new_v4(),
            items,
            subtotal_cents,
            discount_cents,
            total_cents,
            created_at: Utc::now(),
        }
    }

    /// Renders the receipt table using `currency_symbol` for every amount.
    pub fn render_receipt(&self, currency_symbol: &str) -> String {
        let fmt = |cents: i64| Money::from_cents(cents).format_with_symbol(currency_symbol);

        let mut table = Table::new(["Item", "Price", "Quantity"]);

        for item in &self.items {
            table.add_row([
                item.name.clone(),
                fmt(item.unit_price_cents),
                item.quantity.to_string(),
            ]);
        }

        table
            .add_separator()
            .add_row(["Subtotal".to_string(), fmt(self.subtotal_cents), String::new()])
            .add_row(["Discount".to_string(), fmt(self.discount_cents), String::new()])
            .add_row(["Total".to_string(), fmt(self.total_cents), String::new()])
            .align_column(1, Alignment::Right)
            .align_column(2, Alignment::Right);

        table.render()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
