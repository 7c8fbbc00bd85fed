//! # CLI Settings
//!
//! Where the rules live, which symbol to print and what the till can scan.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (--rules)                  (applied by main)    │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     CHECKOUT_RULES_PATH=/etc/checkout/discounts.yml                    │
//! │     CHECKOUT_CURRENCY_SYMBOL=€                                         │
//! │                                                                         │
//! │  3. TOML Settings File (--config, or the platform default)             │
//! │     ~/.config/checkout/settings.toml (Linux)                           │
//! │                                                                         │
//! │  4. Default Values                                                     │
//! │     config/discounts.yml, £, GR1 / SR1 / CF1 catalog                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Settings File Format
//! ```toml
//! rules_path = "config/discounts.yml"
//! currency_symbol = "£"
//!
//! [[catalog]]
//! sku = "GR1"
//! name = "Green Tea"
//! price_cents = 311
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use checkout_core::{Product, DEFAULT_CURRENCY_SYMBOL};
use checkout_rules::DEFAULT_RULES_PATH;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const RULES_PATH_ENV: &str = "CHECKOUT_RULES_PATH";
pub const CURRENCY_SYMBOL_ENV: &str = "CHECKOUT_CURRENCY_SYMBOL";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliSettings {
    /// Rules file handed to the discount engine.
    #[serde(default = "default_rules_path")]
    pub rules_path: PathBuf,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Products the till knows about.
    #[serde(default = "default_catalog")]
    pub catalog: Vec<Product>,
}

fn default_rules_path() -> PathBuf {
    PathBuf::from(DEFAULT_RULES_PATH)
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_catalog() -> Vec<Product> {
    vec![
        Product::new("GR1", "Green Tea", 311),
        Product::new("SR1", "Strawberries", 500),
        Product::new("CF1", "Coffee", 1123),
    ]
}

impl Default for CliSettings {
    fn default() -> Self {
        CliSettings {
            rules_path: default_rules_path(),
            currency_symbol: default_currency_symbol(),
            catalog: default_catalog(),
        }
    }
}

impl CliSettings {
    /// Loads settings from file and environment on top of the defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Settings file (`config_path`, else the platform default)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SettingsResult<Self> {
        let mut settings = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading settings from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Settings file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        settings.apply_overrides(|key| std::env::var(key).ok());
        settings.validate()?;

        Ok(settings)
    }

    fn from_file(path: &Path) -> SettingsResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies overrides from `lookup` (the process environment in `load`).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(RULES_PATH_ENV) {
            debug!(rules_path = %path, "Overriding rules path from environment");
            self.rules_path = PathBuf::from(path);
        }

        if let Some(symbol) = lookup(CURRENCY_SYMBOL_ENV) {
            debug!(symbol = %symbol, "Overriding currency symbol from environment");
            self.currency_symbol = symbol;
        }
    }

    pub fn validate(&self) -> SettingsResult<()> {
        if self.currency_symbol.is_empty() {
            return Err(SettingsError::Invalid(
                "currency_symbol must not be empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for product in &self.catalog {
            if !seen.insert(product.sku.as_str()) {
                return Err(SettingsError::Invalid(format!(
                    "duplicate catalog sku: {}",
                    product.sku
                )));
            }
            if product.price_cents < 0 {
                return Err(SettingsError::Invalid(format!(
                    "price of {} must not be negative",
                    product.sku
                )));
            }
        }

        Ok(())
    }

    /// Returns the default settings file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "checkout", "checkout")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
    }

    pub fn find_product(&self, sku: &str) -> Option<&Product> {
        self.catalog.iter().find(|p| p.sku == sku)
    }
}
