//! # checkout-rules: Rules File Loading
//!
//! Reads the YAML rules file, filters inactive entries and feeds the rest to
//! the core rule factory.
//!
//! ## Modules
//!
//! - [`loader`] - YAML parsing, shape checks, active filtering
//! - [`engine`] - [`DiscountEngine`]: a validated rule set
//! - [`error`] - [`ConfigError`]
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::Product;
//! use checkout_rules::DiscountEngine;
//!
//! let engine = DiscountEngine::from_yaml(
//!     "rules:\n  - {type: buy_one_get_one_free, sku: GR1, active: true}\n",
//! )?;
//!
//! let mut checkout = engine.checkout();
//! let tea = Product::new("GR1", "Green Tea", 311);
//! checkout.scan(&tea);
//! checkout.scan(&tea);
//! assert_eq!(checkout.total(), 311);
//! # Ok::<(), checkout_rules::ConfigError>(())
//! ```

pub mod engine;
pub mod error;
pub mod loader;

pub use engine::DiscountEngine;
pub use error::{ConfigError, ConfigResult};
pub use loader::{load, load_str};

/// Rules file used when nothing else is configured, relative to the
/// working directory.
pub const DEFAULT_RULES_PATH: &str = "config/discounts.yml";
