//! # Config Error Types
//!
//! Everything that can go wrong between a rules file on disk and a rule set.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Loading Error Categories                          │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │      File       │  │    Document     │  │        Rules            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Io             │  │  Parse          │  │  Rule(UnknownRuleType)  │ │
//! │  │  (not "missing" │  │  Format         │  │  Rule(Invalid)          │ │
//! │  │   - that is Ok) │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is fatal to loading: the engine is either built with the
//! full rule set or not at all.

use std::path::PathBuf;

use checkout_core::RuleError;
use thiserror::Error;

/// Result type alias for loading operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not syntactically valid YAML.
    #[error("Failed to parse YAML file: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The document parsed but is not `{ rules: [ {..}, .. ] }`.
    #[error("Invalid configuration format: {0}")]
    Format(String),

    /// A rule entry failed validation.
    #[error(transparent)]
    Rule(#[from] RuleError),
}

impl ConfigError {
    pub(crate) fn expected_rules_array() -> Self {
        ConfigError::Format("expected 'rules' array".to_string())
    }

    /// True for the document-level errors (`Parse`, `Format`).
    pub fn is_document_error(&self) -> bool {
        matches!(self, ConfigError::Parse(_) | ConfigError::Format(_))
    }
}
