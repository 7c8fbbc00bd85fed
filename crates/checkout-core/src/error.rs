//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  └── RuleError                                                         │
//! │      ├── UnknownRuleType  - `type` not one the factory knows           │
//! │      └── Invalid          - field → reasons (FieldErrors)              │
//! │                                                                         │
//! │  checkout-rules errors (separate crate)                                │
//! │  └── ConfigError          - Io, Parse, Format, Rule(RuleError)         │
//! │                                                                         │
//! │  Flow: FieldErrors → RuleError → ConfigError → CLI (anyhow)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Once rules are built, pricing cannot fail: an unknown SKU simply gets no
//! discount.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Field Errors
// =============================================================================

/// Validation failures for one rule entry, keyed by field name.
///
/// Several fields can fail at once; each may carry several reasons.
/// Fields are kept sorted so messages are stable.
///
/// ## Display
/// ```text
/// {fixed_price: ["must be greater than 0"], sku: ["is missing"]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a reason against a field.
    pub fn add(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(reason.into());
    }

    /// Reasons recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Failing field names in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (field, reasons)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: [")?;
            for (j, reason) in reasons.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{reason:?}")?;
            }
            f.write_str("]")?;
        }
        f.write_str("}")
    }
}

// =============================================================================
// Rule Error
// =============================================================================

/// Errors raised while turning raw rule entries into rules.
///
/// Both variants abort the whole batch: the factory never returns a
/// partial rule set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The entry's `type` is not a known rule type.
    ///
    /// Carries the offending type string verbatim.
    #[error("Unknown rule type: {0}")]
    UnknownRuleType(String),

    /// One or more fields failed validation.
    #[error("Invalid rule configuration: {0}")]
    Invalid(FieldErrors),
}

impl From<FieldErrors> for RuleError {
    fn from(errors: FieldErrors) -> Self {
        RuleError::Invalid(errors)
    }
}

/// Convenience type alias for Results with RuleError.
pub type RuleResult<T> = Result<T, RuleError>;

// =============================================================================
// Unit Tests
// =============================================================================
