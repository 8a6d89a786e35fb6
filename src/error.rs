//! Error types for search and resolution
//!
//! Every public operation returns a typed outcome; nothing degrades to a
//! silent default except the documented case where every trigram lookup
//! fails (the search then reports zero candidates).

use thiserror::Error;

use crate::index::StoreError;

/// Outcome of a failed `search` / `resolve_by_name` call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// Rejected before any store I/O
    #[error("Search term too short: '{normalized}' has fewer than {min_len} letters")]
    TermTooShort { normalized: String, min_len: usize },

    #[error("No match for '{term}'")]
    NotFound { term: String },

    /// Resolve path only: no single candidate is a clear winner
    #[error("Ambiguous name '{term}', candidates: {}", .alternatives.join(", "))]
    Ambiguous {
        term: String,
        alternatives: Vec<String>,
    },

    /// The index pointed at an ID the catalog does not have
    #[error("Integrity error: entity '{entity_id}' is indexed but missing from the catalog")]
    Integrity { entity_id: String },

    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),

    /// The whole call exceeded its deadline; partial results were discarded
    #[error("Search timed out after {elapsed_ms}ms")]
    TimedOut { elapsed_ms: u64 },
}

impl ResolveError {
    /// Short machine-readable code, e.g. for API error extensions
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::TermTooShort { .. } => "TERM_TOO_SHORT",
            ResolveError::NotFound { .. } => "NOT_FOUND",
            ResolveError::Ambiguous { .. } => "AMBIGUOUS",
            ResolveError::Integrity { .. } => "INTEGRITY_ERROR",
            ResolveError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            ResolveError::TimedOut { .. } => "TIMED_OUT",
        }
    }

    /// Whether this is a caller-input problem rather than a system fault
    pub fn is_validation(&self) -> bool {
        matches!(self, ResolveError::TermTooShort { .. })
    }
}

/// Errors loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Unknown domain '{0}'")]
    UnknownDomain(String),
}
