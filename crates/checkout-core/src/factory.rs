//! # Rule Factory
//!
//! Validates loosely-typed rule entries and builds [`PricingRule`]s.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Rule Construction                                  │
//! │                                                                         │
//! │  RuleConfigEntry (untyped JSON map)                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  `type` present and a string? ──no──► Invalid { type: [...] }          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  RuleType::from_str ────────unknown──► UnknownRuleType("<type>")       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Per-type field checks (all fields, errors collected)                  │
//! │           │                                                             │
//! │           ├── any failure ──► Invalid { field: [reasons] }             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  PricingRule                                                           │
//! │                                                                         │
//! │  The first failing entry aborts the whole batch.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Field Requirements
//! | type                    | fields                                        |
//! |-------------------------|-----------------------------------------------|
//! | `buy_one_get_one_free`  | sku, active                                   |
//! | `volume_fixed_price`    | sku, active, minimum_quantity, fixed_price    |
//! | `fractional_percentage` | sku, active, minimum_quantity, fraction       |
//!
//! `id` is optional everywhere but must be a non-empty string when given.
//!
//! ## Usage
//! ```rust
//! use checkout_core::factory::{create_rules, RuleConfigEntry};
//! use serde_json::json;
//!
//! let entries: Vec<RuleConfigEntry> = vec![
//!     json!({"type": "buy_one_get_one_free", "sku": "GR1", "active": true})
//!         .try_into()
//!         .unwrap(),
//! ];
//!
//! let rules = create_rules(&entries).unwrap();
//! assert_eq!(rules.len(), 1);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FieldErrors, RuleError, RuleResult};
use crate::fraction::Fraction;
use crate::rules::PricingRule;

// =============================================================================
// Reasons
// =============================================================================

const IS_MISSING: &str = "is missing";
const MUST_BE_FILLED: &str = "must be filled";
const MUST_BE_STRING: &str = "must be a string";
const MUST_BE_INTEGER: &str = "must be an integer";
const MUST_BE_BOOLEAN: &str = "must be boolean";
const MUST_BE_POSITIVE: &str = "must be greater than 0";
const MUST_BE_FRACTION: &str = "must be a valid fraction (e.g., \"2/3\")";
const MUST_BE_PROPER_FRACTION: &str = "must be between 0 and 1";

// =============================================================================
// Rule Config Entry
// =============================================================================

/// One raw rule definition: string keys mapped to untyped values.
///
/// Only lives between loading and rule construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleConfigEntry(Map<String, Value>);

impl RuleConfigEntry {
    pub fn new(fields: Map<String, Value>) -> Self {
        RuleConfigEntry(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The `type` value when it is a string.
    pub fn rule_type(&self) -> Option<&str> {
        self.get("type").and_then(Value::as_str)
    }

    /// The optional `id` value when it is a string.
    pub fn id(&self) -> Option<&str> {
        self.get("id").and_then(Value::as_str)
    }

    /// Activation filter: anything but absent, `null` or `false` counts.
    pub fn is_active(&self) -> bool {
        !matches!(self.get("active"), None | Some(Value::Null) | Some(Value::Bool(false)))
    }

}

impl From<Map<String, Value>> for RuleConfigEntry {
    fn from(fields: Map<String, Value>) -> Self {
        RuleConfigEntry(fields)
    }
}

/// Only JSON objects are entries; anything else is handed back.
impl TryFrom<Value> for RuleConfigEntry {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(RuleConfigEntry(fields)),
            other => Err(other),
        }
    }
}

// =============================================================================
// Rule Type
// =============================================================================

/// The `type` strings the factory understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleType {
    BuyOneGetOneFree,
    VolumeFixedPrice,
    FractionalPercentage,
}

impl RuleType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RuleType::BuyOneGetOneFree => "buy_one_get_one_free",
            RuleType::VolumeFixedPrice => "volume_fixed_price",
            RuleType::FractionalPercentage => "fractional_percentage",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy_one_get_one_free" => Ok(RuleType::BuyOneGetOneFree),
            "volume_fixed_price" => Ok(RuleType::VolumeFixedPrice),
            "fractional_percentage" => Ok(RuleType::FractionalPercentage),
            other => Err(RuleError::UnknownRuleType(other.to_string())),
        }
    }
}

// =============================================================================
// Field Validator
// =============================================================================

/// Walks one entry's fields and collects every failure before reporting.
struct FieldValidator<'a> {
    entry: &'a RuleConfigEntry,
    errors: FieldErrors,
}

impl<'a> FieldValidator<'a> {
    fn new(entry: &'a RuleConfigEntry) -> Self {
        FieldValidator {
            entry,
            errors: FieldErrors::new(),
        }
    }

    /// Looks the field up, recording `is missing` / `must be filled`.
    fn present(&mut self, field: &str) -> Option<&'a Value> {
        match self.entry.get(field) {
            None => {
                self.errors.add(field, IS_MISSING);
                None
            }
            Some(Value::Null) => {
                self.errors.add(field, MUST_BE_FILLED);
                None
            }
            Some(value) => Some(value),
        }
    }

    fn string_value(&mut self, field: &str, value: &'a Value) -> Option<&'a str> {
        match value.as_str() {
            Some("") => {
                self.errors.add(field, MUST_BE_FILLED);
                None
            }
            Some(s) => Some(s),
            None => {
                self.errors.add(field, MUST_BE_STRING);
                None
            }
        }
    }

    fn required_string(&mut self, field: &str) -> Option<&'a str> {
        let value = self.present(field)?;
        self.string_value(field, value)
    }

    fn optional_string(&mut self, field: &str) -> Option<&'a str> {
        let value = self.entry.get(field)?;
        if value.is_null() {
            self.errors.add(field, MUST_BE_FILLED);
            return None;
        }
        self.string_value(field, value)
    }

    fn required_bool(&mut self, field: &str) -> Option<bool> {
        let value = self.present(field)?;
        match value.as_bool() {
            Some(b) => Some(b),
            None => {
                self.errors.add(field, MUST_BE_BOOLEAN);
                None
            }
        }
    }

    fn required_positive_integer(&mut self, field: &str) -> Option<i64> {
        let value = self.present(field)?;
        match value.as_i64() {
            Some(n) if n > 0 => Some(n),
            Some(_) => {
                self.errors.add(field, MUST_BE_POSITIVE);
                None
            }
            None => {
                self.errors.add(field, MUST_BE_INTEGER);
                None
            }
        }
    }

    fn required_fraction(&mut self, field: &str) -> Option<Fraction> {
        let raw = self.required_string(field)?;
        match raw.parse::<Fraction>() {
            Ok(fraction) if fraction.is_proper_positive() => Some(fraction),
            Ok(_) => {
                self.errors.add(field, MUST_BE_PROPER_FRACTION);
                None
            }
            Err(_) => {
                self.errors.add(field, MUST_BE_FRACTION);
                None
            }
        }
    }

    /// Fields every rule type shares: sku, active, optional id.
    fn common(&mut self) -> Option<&'a str> {
        let sku = self.required_string("sku");
        self.required_bool("active");
        self.optional_string("id");
        sku
    }

    fn finish(self) -> Result<(), FieldErrors> {
        self.errors.into_result()
    }
}

// =============================================================================
// Construction
// =============================================================================

fn rule_type_of(entry: &RuleConfigEntry) -> RuleResult<RuleType> {
    let mut errors = FieldErrors::new();

    match entry.get("type") {
        None => errors.add("type", IS_MISSING),
        Some(Value::Null) => errors.add("type", MUST_BE_FILLED),
        Some(Value::String(s)) => return s.parse(),
        Some(_) => errors.add("type", MUST_BE_STRING),
    }

    Err(RuleError::Invalid(errors))
}

/// Validates one entry and builds its rule.
///
/// ## Errors
/// - [`RuleError::UnknownRuleType`] when `type` is a string the factory
///   does not know
/// - [`RuleError::Invalid`] with every failing field otherwise
pub fn create_rule(entry: &RuleConfigEntry) -> RuleResult<PricingRule> {
    let rule_type = rule_type_of(entry)?;
    let mut v = FieldValidator::new(entry);

    let rule = match rule_type {
        RuleType::BuyOneGetOneFree => {
            let sku = v.common();
            sku.map(|sku| PricingRule::buy_one_get_one_free(sku))
        }
        RuleType::VolumeFixedPrice => {
            let sku = v.common();
            let minimum_quantity = v.required_positive_integer("minimum_quantity");
            let fixed_price = v.required_positive_integer("fixed_price");
            match (sku, minimum_quantity, fixed_price) {
                (Some(sku), Some(min), Some(price)) => {
                    Some(PricingRule::volume_fixed_price(sku, min, price))
                }
                _ => None,
            }
        }
        RuleType::FractionalPercentage => {
            let sku = v.common();
            let minimum_quantity = v.required_positive_integer("minimum_quantity");
            let fraction = v.required_fraction("fraction");
            match (sku, minimum_quantity, fraction) {
                (Some(sku), Some(min), Some(fraction)) => {
                    Some(PricingRule::volume_fraction(sku, min, fraction))
                }
                _ => None,
            }
        }
    };

    v.finish()?;
    // finish() only passes when every field produced a value
    rule.ok_or_else(|| RuleError::Invalid(FieldErrors::new()))
}

/// Builds one rule per entry, in order.
///
/// Stops at the first invalid entry; no partial rule set is returned.
///
/// ## Example
/// ```rust
/// use checkout_core::factory::{create_rules, RuleConfigEntry};
/// use checkout_core::RuleError;
/// use serde_json::json;
///
/// let entries: Vec<RuleConfigEntry> = vec![json!({"type": "TYPE"}).try_into().unwrap()];
///
/// let err = create_rules(&entries).unwrap_err();
/// assert_eq!(err, RuleError::UnknownRuleType("TYPE".to_string()));
/// ```
pub fn create_rules<'a, I>(entries: I) -> RuleResult<Vec<PricingRule>>
where
    I: IntoIterator<Item = &'a RuleConfigEntry>,
{
    entries.into_iter().map(create_rule).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::DiscountRule;
    use serde_json::json;

    fn entry(value: Value) -> RuleConfigEntry {
        RuleConfigEntry::try_from(value).unwrap()
    }

    fn invalid(value: Value) -> FieldErrors {
        match create_rule(&entry(value)) {
            Err(RuleError::Invalid(errors)) => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_carries_literal_string() {
        let err = create_rule(&entry(json!({"type": "TYPE"}))).unwrap_err();
        assert_eq!(err, RuleError::UnknownRuleType("TYPE".to_string()));
        assert!(err.to_string().contains("TYPE"));
    }

    #[test]
    fn test_missing_type() {
        let errors = invalid(json!({"sku": "SKU", "active": true}));
        assert_eq!(errors.get("type"), Some(&[IS_MISSING.to_string()][..]));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_non_string_type() {
        let errors = invalid(json!({"type": 7, "sku": "SKU", "active": true}));
        assert_eq!(errors.get("type"), Some(&[MUST_BE_STRING.to_string()][..]));
    }

    // -------------------------------------------------------------------------
    // Buy one get one free
    // -------------------------------------------------------------------------

    #[test]
    fn test_valid_bogo_rule() {
        let rule = create_rule(&entry(json!({
            "type": "buy_one_get_one_free",
            "sku": "SKU",
            "active": true,
            "id": "bogo-1"
        })))
        .unwrap();

        assert_eq!(rule, PricingRule::buy_one_get_one_free("SKU"));
        assert_eq!(rule.sku(), "SKU");
    }

    #[test]
    fn test_bogo_missing_sku() {
        let errors = invalid(json!({"type": "buy_one_get_one_free", "active": true}));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["sku"]);
        assert_eq!(errors.get("sku"), Some(&[IS_MISSING.to_string()][..]));
    }

    #[test]
    fn test_bogo_empty_sku() {
        let errors = invalid(json!({"type": "buy_one_get_one_free", "sku": "", "active": true}));
        assert_eq!(errors.to_string(), r#"{sku: ["must be filled"]}"#);
    }

    #[test]
    fn test_blank_sku_counts_as_filled() {
        let rule = create_rule(&entry(
            json!({"type": "buy_one_get_one_free", "sku": "  ", "active": true}),
        ))
        .unwrap();
        assert_eq!(rule.sku(), "  ");
    }

    #[test]
    fn test_bogo_missing_active() {
        let errors = invalid(json!({"type": "buy_one_get_one_free", "sku": "SKU"}));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["active"]);
    }

    #[test]
    fn test_bogo_wrong_type_active() {
        let errors = invalid(json!({
            "type": "buy_one_get_one_free",
            "sku": "SKU",
            "active": "wrong"
        }));
        assert_eq!(errors.get("active"), Some(&[MUST_BE_BOOLEAN.to_string()][..]));
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let errors = invalid(json!({
            "type": "buy_one_get_one_free",
            "sku": "SKU",
            "active": true,
            "id": ""
        }));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["id"]);
    }

    // -------------------------------------------------------------------------
    // Volume fixed price
    // -------------------------------------------------------------------------

    #[test]
    fn test_valid_volume_fixed_price_rule() {
        let rule = create_rule(&entry(json!({
            "type": "volume_fixed_price",
            "sku": "SKU",
            "active": true,
            "minimum_quantity": 2,
            "fixed_price": 150
        })))
        .unwrap();

        assert_eq!(rule, PricingRule::volume_fixed_price("SKU", 2, 150));
    }

    #[test]
    fn test_fixed_price_missing_minimum_quantity() {
        let errors = invalid(json!({
            "type": "volume_fixed_price",
            "sku": "SKU",
            "active": true,
            "fixed_price": 150
        }));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["minimum_quantity"]);
    }

    #[test]
    fn test_fixed_price_invalid_price_type() {
        let errors = invalid(json!({
            "type": "volume_fixed_price",
            "sku": "SKU",
            "active": true,
            "minimum_quantity": 2,
            "fixed_price": "invalid"
        }));
        assert_eq!(errors.get("fixed_price"), Some(&[MUST_BE_INTEGER.to_string()][..]));
    }

    #[test]
    fn test_fixed_price_negative_price() {
        let errors = invalid(json!({
            "type": "volume_fixed_price",
            "sku": "SKU",
            "active": true,
            "minimum_quantity": 2,
            "fixed_price": -150
        }));
        assert_eq!(errors.get("fixed_price"), Some(&[MUST_BE_POSITIVE.to_string()][..]));
    }

    #[test]
    fn test_fixed_price_reports_every_failing_field() {
        let errors = invalid(json!({
            "type": "volume_fixed_price",
            "active": true,
            "minimum_quantity": 0,
            "fixed_price": 1.5
        }));
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["fixed_price", "minimum_quantity", "sku"]
        );
    }

    // -------------------------------------------------------------------------
    // Fractional percentage
    // -------------------------------------------------------------------------

    #[test]
    fn test_valid_fractional_rule() {
        let rule = create_rule(&entry(json!({
            "type": "fractional_percentage",
            "sku": "SKU",
            "active": true,
            "minimum_quantity": 2,
            "fraction": "2/3"
        })))
        .unwrap();

        assert_eq!(
            rule,
            PricingRule::volume_fraction("SKU", 2, "2/3".parse().unwrap())
        );
    }

    #[test]
    fn test_fractional_missing_fraction() {
        let errors = invalid(json!({
            "type": "fractional_percentage",
            "sku": "SKU",
            "active": true,
            "minimum_quantity": 2
        }));
        assert_eq!(errors.to_string(), r#"{fraction: ["is missing"]}"#);
    }

    #[test]
    fn test_fractional_invalid_fraction() {
        let errors = invalid(json!({
            "type": "fractional_percentage",
            "sku": "SKU",
            "active": true,
            "minimum_quantity": 2,
            "fraction": "invalid"
        }));
        assert_eq!(
            errors.to_string(),
            r#"{fraction: ["must be a valid fraction (e.g., \"2/3\")"]}"#
        );
    }

    #[test]
    fn test_fractional_out_of_range() {
        for fraction in ["3/2", "0", "-1/3", "1"] {
            let errors = invalid(json!({
                "type": "fractional_percentage",
                "sku": "SKU",
                "active": true,
                "minimum_quantity": 2,
                "fraction": fraction
            }));
            assert_eq!(
                errors.get("fraction"),
                Some(&[MUST_BE_PROPER_FRACTION.to_string()][..]),
                "fraction {fraction}"
            );
        }
    }

    // -------------------------------------------------------------------------
    // Batches
    // -------------------------------------------------------------------------

    #[test]
    fn test_create_rules_preserves_order() {
        let entries = vec![
            entry(json!({"type": "fractional_percentage", "sku": "CF1", "active": true,
                         "minimum_quantity": 3, "fraction": "2/3"})),
            entry(json!({"type": "buy_one_get_one_free", "sku": "GR1", "active": true})),
            entry(json!({"type": "volume_fixed_price", "sku": "SR1", "active": true,
                         "minimum_quantity": 3, "fixed_price": 450})),
        ];

        let rules = create_rules(&entries).unwrap();
        let skus: Vec<_> = rules.iter().map(|r| r.sku()).collect();
        assert_eq!(skus, vec!["CF1", "GR1", "SR1"]);
    }

    #[test]
    fn test_create_rules_fails_fast() {
        let entries = vec![
            entry(json!({"type": "buy_one_get_one_free", "sku": "GR1", "active": true})),
            entry(json!({"type": "mystery", "sku": "X", "active": true})),
            entry(json!({"type": "buy_one_get_one_free", "active": true})),
        ];

        let err = create_rules(&entries).unwrap_err();
        assert_eq!(err, RuleError::UnknownRuleType("mystery".to_string()));
    }

    #[test]
    fn test_entry_activation() {
        assert!(entry(json!({"active": true})).is_active());
        assert!(entry(json!({"active": "yes"})).is_active());
        assert!(!entry(json!({"active": false})).is_active());
        assert!(!entry(json!({"active": null})).is_active());
        assert!(!entry(json!({})).is_active());
    }

    #[test]
    fn test_rule_type_round_trip() {
        for kind in [
            RuleType::BuyOneGetOneFree,
            RuleType::VolumeFixedPrice,
            RuleType::FractionalPercentage,
        ] {
            assert_eq!(kind.as_str().parse::<RuleType>().unwrap(), kind);
        }
    }
}
