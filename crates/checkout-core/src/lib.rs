//! # checkout-core: Pure Pricing Logic
//!
//! This crate is the **heart** of the checkout. It contains the basket,
//! the discount rules and the rule factory as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (`checkout`)                        │   │
//! │  │          scan GR1 SR1 ... ──► receipt on stdout                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               checkout-rules (YAML loader, engine)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Vec<RuleConfigEntry>                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ checkout-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  factory  │  │   rules   │  │  basket   │  │   order   │  │   │
//! │  │   │ validate  │─►│ BOGO      │  │ LineItem  │  │ receipt   │  │   │
//! │  │   │ construct │  │ Volume*   │  │ totals    │  │ table     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`fraction`] - Exact rational numbers for fractional discounts
//! - [`types`] - Product and LineItem
//! - [`rules`] - The discount rule variants
//! - [`factory`] - Validates raw rule entries and builds rules
//! - [`basket`] - Line item accumulation
//! - [`checkout`] - Scan, subtotal, discount, total
//! - [`order`] - Order snapshot and receipt
//! - [`table`] - Bordered text tables
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{Checkout, PricingRule, Product};
//!
//! let rules = vec![PricingRule::buy_one_get_one_free("GR1")];
//! let mut checkout = Checkout::new(rules);
//!
//! let tea = Product::new("GR1", "Green Tea", 311);
//! checkout.scan(&tea);
//! checkout.scan(&tea);
//!
//! assert_eq!(checkout.subtotal(), 622);
//! assert_eq!(checkout.discount_cents(), 311);
//! assert_eq!(checkout.total(), 311);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod checkout;
pub mod error;
pub mod factory;
pub mod fraction;
pub mod money;
pub mod order;
pub mod rules;
pub mod table;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use basket::Basket;
pub use checkout::Checkout;
pub use error::{FieldErrors, RuleError, RuleResult};
pub use factory::{create_rules, RuleConfigEntry};
pub use fraction::Fraction;
pub use money::Money;
pub use order::Order;
pub use rules::{
    BuyOneGetOneFree, DiscountRule, PricingRule, VolumeFixedPrice, VolumeFraction,
};
pub use types::{LineItem, Product};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency symbol used when rendering money without an explicit symbol.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "£";
