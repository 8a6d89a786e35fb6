//! Resolver configuration parsing
//!
//! Loads search settings, disambiguation policy and per-domain store
//! namespaces from YAML. Every field has a default, so a missing section
//! (or an empty file) yields the standard policy:
//!
//! ```yaml
//! policy:
//!   min_confidence: 0.6
//!   min_margin: 0.2
//!   max_alternatives: 3
//! search:
//!   min_term_len: 3
//!   max_concurrent_lookups: 8
//!   timeout_ms: 2000
//!   max_results: 25
//! domains:
//!   cards:
//!     index_namespace: card-name-trigrams
//!     catalog_namespace: cards
//!   artists:
//!     index_namespace: artist-name-trigrams
//!     catalog_namespace: artists
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::search::DisambiguationPolicy;
use crate::text::TRIGRAM_LEN;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ResolverConfig {
    pub policy: DisambiguationPolicy,
    pub search: SearchConfig,
    pub domains: HashMap<String, DomainConfig>,
}

/// Settings for the search path
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Shortest normalized term accepted
    pub min_term_len: usize,
    /// Trigram lookups in flight per call
    pub max_concurrent_lookups: usize,
    /// Deadline for a whole call; 0 disables it
    pub timeout_ms: u64,
    /// Cap on suggestions returned by `search`
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_term_len: TRIGRAM_LEN,
            max_concurrent_lookups: 8,
            timeout_ms: 2_000,
            max_results: 25,
        }
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

/// Store namespaces for one catalog domain
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DomainConfig {
    /// Container holding `(trigram, partition)` documents
    pub index_namespace: String,
    /// Container holding entity records (partition = ID)
    pub catalog_namespace: String,
}

impl DomainConfig {
    pub fn new(index_namespace: impl Into<String>, catalog_namespace: impl Into<String>) -> Self {
        Self {
            index_namespace: index_namespace.into(),
            catalog_namespace: catalog_namespace.into(),
        }
    }
}

/// Nickname of the card-name domain
pub const CARDS_DOMAIN: &str = "cards";
/// Nickname of the artist domain
pub const ARTISTS_DOMAIN: &str = "artists";

fn default_domains() -> HashMap<String, DomainConfig> {
    HashMap::from([
        (
            CARDS_DOMAIN.to_string(),
            DomainConfig::new("card-name-trigrams", "cards"),
        ),
        (
            ARTISTS_DOMAIN.to_string(),
            DomainConfig::new("artist-name-trigrams", "artists"),
        ),
    ])
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            policy: DisambiguationPolicy::default(),
            search: SearchConfig::default(),
            domains: default_domains(),
        }
    }
}

impl ResolverConfig {
    /// Load and validate configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load and validate configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ResolverConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy.validate()?;

        if self.search.min_term_len < TRIGRAM_LEN {
            return Err(ConfigError::Invalid {
                field: "search.min_term_len",
                reason: format!("must be at least {TRIGRAM_LEN}"),
            });
        }
        if self.search.max_concurrent_lookups == 0 {
            return Err(ConfigError::Invalid {
                field: "search.max_concurrent_lookups",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.search.max_results == 0 {
            return Err(ConfigError::Invalid {
                field: "search.max_results",
                reason: "must be at least 1".to_string(),
            });
        }
        for (name, domain) in &self.domains {
            if domain.index_namespace.is_empty() || domain.catalog_namespace.is_empty() {
                return Err(ConfigError::Invalid {
                    field: "domains",
                    reason: format!("domain '{name}' has an empty namespace"),
                });
            }
        }
        Ok(())
    }

    /// Get a domain's namespaces by nickname
    pub fn domain(&self, nickname: &str) -> Result<&DomainConfig, ConfigError> {
        self.domains
            .get(nickname)
            .ok_or_else(|| ConfigError::UnknownDomain(nickname.to_string()))
    }
}
