//! # Rules Loader
//!
//! Reads the rules document and returns the active raw entries.
//!
//! ## Load Steps
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  path does not exist ───────────────────────────► Ok([])               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  read file ─────────── I/O failure ─────────────► ConfigError::Io      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse YAML ────────── syntax error ────────────► ConfigError::Parse   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  root is { rules: [mapping, ...] }? ── no ──────► ConfigError::Format  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  keep entries whose `active` is truthy, in file order                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## File Format
//! ```yaml
//! rules:
//!   - id: green-tea-bogo
//!     type: buy_one_get_one_free
//!     sku: GR1
//!     active: true
//!   - type: volume_fixed_price
//!     sku: SR1
//!     active: true
//!     minimum_quantity: 3
//!     fixed_price: 450
//! ```
//!
//! Field validation is not done here; that is the factory's job.

use std::path::Path;

use checkout_core::RuleConfigEntry;
use serde_json::{Map, Number, Value};
use serde_yaml::Value as Yaml;
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};

/// Loads the active rule entries from `path`.
///
/// A missing file is not an error: it yields no rules.
pub fn load(path: impl AsRef<Path>) -> ConfigResult<Vec<RuleConfigEntry>> {
    let path = path.as_ref();

    if !path.exists() {
        debug!(?path, "Rules file not found, no discounts configured");
        return Ok(Vec::new());
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = load_str(&contents)?;
    info!(?path, active = entries.len(), "Loaded rules file");

    Ok(entries)
}

/// Same as [`load`] for a document already in memory.
pub fn load_str(contents: &str) -> ConfigResult<Vec<RuleConfigEntry>> {
    if contents.trim().is_empty() {
        return Err(ConfigError::expected_rules_array());
    }

    let document = yaml_to_json(serde_yaml::from_str(contents)?)?;

    let rules = match document {
        Value::Object(mut root) => match root.remove("rules") {
            Some(Value::Array(rules)) => rules,
            _ => return Err(ConfigError::expected_rules_array()),
        },
        _ => return Err(ConfigError::expected_rules_array()),
    };

    let total = rules.len();
    let mut active = Vec::with_capacity(total);

    for (index, raw) in rules.into_iter().enumerate() {
        let entry = RuleConfigEntry::try_from(raw).map_err(|_| {
            ConfigError::Format(format!("expected rule #{} to be a mapping", index + 1))
        })?;

        if entry.is_active() {
            active.push(entry);
        } else {
            debug!(
                index,
                id = entry.id().unwrap_or("-"),
                rule_type = entry.rule_type().unwrap_or("-"),
                "Skipping inactive rule"
            );
        }
    }

    debug!(total, active = active.len(), "Filtered rule entries");
    Ok(active)
}

/// Converts a YAML tree to the JSON tree rule entries are built from.
///
/// Scalar mapping keys (`1: x`, `true: y`) become their string form; tags
/// are dropped.
fn yaml_to_json(value: Yaml) -> ConfigResult<Value> {
    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => number_to_json(&n)?,
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<ConfigResult<_>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                object.insert(mapping_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn number_to_json(n: &serde_yaml::Number) -> ConfigResult<Value> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Value::from(u));
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| ConfigError::Format(format!("unsupported number: {n}")))
}

fn mapping_key(key: Yaml) -> ConfigResult<String> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => mapping_key(tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => Err(ConfigError::Format(
            "mapping keys must be scalars".to_string(),
        )),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
