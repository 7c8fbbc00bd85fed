//! # Discount Engine
//!
//! Loader and factory glued together: one call turns a rules file into a
//! ready-to-use rule set, and hands out checkouts that share it.
//!
//! ```text
//! discounts.yml ──► loader::load ──► create_rules ──► DiscountEngine
//!                                                          │
//!                                        checkout() ◄──────┘ (clones rules)
//! ```

use std::path::{Path, PathBuf};

use checkout_core::{create_rules, Checkout, PricingRule, RuleConfigEntry};
use tracing::info;

use crate::error::ConfigResult;
use crate::loader;

/// A validated, immutable rule set.
#[derive(Debug, Clone, Default)]
pub struct DiscountEngine {
    rules: Vec<PricingRule>,
    source: Option<PathBuf>,
}

impl DiscountEngine {
    /// Loads and validates the rules at `path`.
    ///
    /// A missing file gives an engine with no rules. Any invalid entry
    /// fails the whole load.
    pub fn new(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let entries = loader::load(path)?;
        let rules = create_rules(&entries)?;

        info!(?path, rules = rules.len(), "Discount engine ready");

        Ok(DiscountEngine {
            rules,
            source: Some(path.to_path_buf()),
        })
    }

    /// Builds an engine from a YAML document in memory.
    pub fn from_yaml(contents: &str) -> ConfigResult<Self> {
        let entries = loader::load_str(contents)?;
        Self::from_entries(&entries)
    }

    /// Builds an engine from already-filtered entries.
    pub fn from_entries(entries: &[RuleConfigEntry]) -> ConfigResult<Self> {
        Ok(DiscountEngine {
            rules: create_rules(entries)?,
            source: None,
        })
    }

    pub fn rules(&self) -> &[PricingRule] {
        &self.rules
    }

    /// The file the rules came from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Starts a fresh checkout over this rule set.
    pub fn checkout(&self) -> Checkout {
        Checkout::new(self.rules.clone())
    }
}
