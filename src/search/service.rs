//! Generic trigram search and name resolution service
//!
//! One implementation serves every catalog domain. It is parameterised by
//! the candidate-record shape `C`, the catalog record type `R`, and the
//! store namespaces in [`DomainConfig`].
//!
//! ```text
//! raw text ─► normalize ─► trigrams ─► MatchAggregator ⇄ TrigramIndexStore
//!                                            │
//!                                            ▼
//!                                          rank ─► search results
//!                                            │
//!                                            ▼
//!                                   DisambiguationPolicy ─► CatalogStore
//! ```
//!
//! The service holds no per-call state. Each call owns its count map, so
//! concurrent calls need no locking. The configured timeout covers the
//! whole call; dropping the returned future cancels it, and in both cases
//! nothing partial is returned.

use std::future::Future;
use std::sync::Arc;
use tokio::time::Instant;

use crate::config::{DomainConfig, ResolverConfig, SearchConfig};
use crate::error::{ConfigError, ResolveError};
use crate::index::{CandidateRecord, CatalogStore, TrigramIndexStore};
use crate::search::aggregate::MatchAggregator;
use crate::search::disambiguate::{Disambiguation, DisambiguationPolicy};
use crate::search::rank::rank;
use crate::search::types::{RankedSearch, SearchHit};
use crate::text::{distinct_trigrams, normalize_name, trigram_count, TRIGRAM_LEN};

/// Search-as-you-type and name→entity resolution over one domain
pub struct TrigramSearchService<C: CandidateRecord, R> {
    domain: DomainConfig,
    index: Arc<dyn TrigramIndexStore<C>>,
    catalog: Arc<dyn CatalogStore<R>>,
    search: SearchConfig,
    policy: DisambiguationPolicy,
}

impl<C: CandidateRecord, R: Send + 'static> TrigramSearchService<C, R> {
    /// Create a service with default search settings and policy
    pub fn new(
        domain: DomainConfig,
        index: Arc<dyn TrigramIndexStore<C>>,
        catalog: Arc<dyn CatalogStore<R>>,
    ) -> Self {
        Self {
            domain,
            index,
            catalog,
            search: SearchConfig::default(),
            policy: DisambiguationPolicy::default(),
        }
    }

    /// Create a service for the domain `nickname` of a loaded config
    pub fn from_config(
        config: &ResolverConfig,
        nickname: &str,
        index: Arc<dyn TrigramIndexStore<C>>,
        catalog: Arc<dyn CatalogStore<R>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let domain = config.domain(nickname)?.clone();
        Ok(Self::new(domain, index, catalog)
            .with_search_config(config.search.clone())
            .with_policy(config.policy))
    }

    pub fn with_search_config(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_policy(mut self, policy: DisambiguationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn domain(&self) -> &DomainConfig {
        &self.domain
    }

    pub fn policy(&self) -> &DisambiguationPolicy {
        &self.policy
    }

    /// Ranked suggestions for a partially typed name
    ///
    /// Fails with `TermTooShort` before any I/O when the normalized term is
    /// shorter than the configured minimum. No matches is an empty list.
    pub async fn search(&self, raw_term: &str) -> Result<Vec<SearchHit>, ResolveError> {
        let ranked = self.ranked(raw_term).await?;
        Ok(ranked
            .matches
            .into_iter()
            .take(self.search.max_results)
            .map(SearchHit::from)
            .collect())
    }

    /// Full ranking with match counts
    pub async fn ranked(&self, raw_term: &str) -> Result<RankedSearch, ResolveError> {
        let normalized = self.prepare(raw_term)?;
        self.with_deadline(self.run_search(normalized)).await
    }

    /// Run search and the disambiguation policy, without reading the catalog
    pub async fn disambiguate(&self, raw_name: &str) -> Result<Disambiguation, ResolveError> {
        let normalized = self.prepare(raw_name)?;
        self.with_deadline(self.run_disambiguation(normalized)).await
    }

    /// Resolve a human-entered name to exactly one catalog record
    pub async fn resolve_by_name(&self, raw_name: &str) -> Result<R, ResolveError> {
        let normalized = self.prepare(raw_name)?;
        self.with_deadline(self.run_resolve(raw_name, normalized)).await
    }

    /// Point-read a resolved entity from the catalog
    ///
    /// A missing document means the trigram index references an ID the
    /// catalog no longer has, which is reported as an integrity error.
    pub async fn fetch_entity(&self, entity_id: &str) -> Result<R, ResolveError> {
        match self
            .catalog
            .point_read(&self.domain.catalog_namespace, entity_id)
            .await
        {
            Ok(Some(record)) => Ok(record),
            Ok(None) => {
                tracing::error!(
                    namespace = %self.domain.catalog_namespace,
                    entity_id,
                    "Indexed entity missing from catalog"
                );
                Err(ResolveError::Integrity {
                    entity_id: entity_id.to_string(),
                })
            }
            Err(e) => {
                tracing::error!(
                    namespace = %self.domain.catalog_namespace,
                    entity_id,
                    error = %e,
                    "Catalog point read failed"
                );
                Err(ResolveError::StoreUnavailable(e))
            }
        }
    }

    fn prepare(&self, raw_term: &str) -> Result<String, ResolveError> {
        let normalized = normalize_name(raw_term);
        // A term without a full trigram can never be looked up
        let min_len = self.search.min_term_len.max(TRIGRAM_LEN);
        if normalized.len() < min_len {
            return Err(ResolveError::TermTooShort { normalized, min_len });
        }
        Ok(normalized)
    }

    async fn run_search(&self, normalized: String) -> Result<RankedSearch, ResolveError> {
        let start = Instant::now();
        let trigrams = distinct_trigrams(&normalized);

        let aggregator = MatchAggregator::new(
            self.index.as_ref(),
            &self.domain.index_namespace,
            self.search.max_concurrent_lookups,
        );
        let aggregation = aggregator.aggregate(&normalized, &trigrams).await;
        let matches = rank(aggregation.matches.into_values());

        tracing::debug!(
            namespace = %self.domain.index_namespace,
            query = %normalized,
            trigrams = trigram_count(&normalized),
            distinct_trigrams = trigrams.len(),
            candidates = matches.len(),
            failed_lookups = aggregation.failed_lookups,
            rejected = aggregation.rejected,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Trigram search complete"
        );

        Ok(RankedSearch {
            total_trigrams: trigrams.len(),
            normalized_query: normalized,
            matches,
            failed_lookups: aggregation.failed_lookups,
        })
    }

    async fn run_disambiguation(&self, normalized: String) -> Result<Disambiguation, ResolveError> {
        let ranked = self.run_search(normalized).await?;
        Ok(self.policy.decide(&ranked.matches, ranked.total_trigrams))
    }

    async fn run_resolve(&self, raw_name: &str, normalized: String) -> Result<R, ResolveError> {
        match self.run_disambiguation(normalized).await? {
            Disambiguation::Resolved {
                entity_id,
                confidence,
                ..
            } => {
                tracing::debug!(
                    namespace = %self.domain.catalog_namespace,
                    name = %raw_name,
                    entity_id = %entity_id,
                    confidence,
                    "Name resolved"
                );
                self.fetch_entity(&entity_id).await
            }
            Disambiguation::Ambiguous {
                alternatives,
                confidence,
                runner_up_confidence,
            } => {
                tracing::debug!(
                    name = %raw_name,
                    confidence,
                    runner_up_confidence,
                    alternatives = alternatives.len(),
                    "Name is ambiguous"
                );
                Err(ResolveError::Ambiguous {
                    term: raw_name.to_string(),
                    alternatives,
                })
            }
            Disambiguation::NotFound => Err(ResolveError::NotFound {
                term: raw_name.to_string(),
            }),
        }
    }

    async fn with_deadline<T>(
        &self,
        work: impl Future<Output = Result<T, ResolveError>>,
    ) -> Result<T, ResolveError> {
        let Some(limit) = self.search.timeout() else {
            return work.await;
        };
        let start = Instant::now();
        match tokio::time::timeout(limit, work).await {
            Ok(result) => result,
            Err(_) => {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                tracing::warn!(
                    namespace = %self.domain.index_namespace,
                    elapsed_ms,
                    "Search call timed out, discarding partial results"
                );
                Err(ResolveError::TimedOut { elapsed_ms })
            }
        }
    }
}
