//! Core traits and types for the partitioned store abstraction
//!
//! The trigram index and the entity catalog live in an external,
//! partitioned document store that is populated by the ingestion
//! pipeline. This module defines the read-side contracts the search
//! engine needs so that different store clients (the in-memory store,
//! a remote document database) can be used interchangeably.

use async_trait::async_trait;

/// A candidate entity listed in a trigram index document
///
/// Implemented once per catalog domain (card names, artist names) so the
/// search engine can stay generic over the record shape.
pub trait CandidateRecord: Clone + Send + Sync + 'static {
    /// Stable entity ID, also the catalog partition key
    fn entity_id(&self) -> &str;
    /// Name after [`normalize_name`](crate::text::normalize_name)
    fn normalized_name(&self) -> &str;
    /// Human-readable name (for UI)
    fn display_name(&self) -> &str;
}

/// A full catalog record, stored under its own ID as partition key
pub trait EntityRecord: Clone + Send + Sync + 'static {
    fn entity_id(&self) -> &str;
}

/// Read access to the trigram index
///
/// Documents are keyed by `(trigram, partition)` where the partition is
/// the trigram's first character. Implementations must be Send + Sync for
/// use in async contexts.
#[async_trait]
pub trait TrigramIndexStore<C: CandidateRecord>: Send + Sync {
    /// Fetch the candidates listed under `trigram` in `partition`
    ///
    /// Implementations should only return candidates whose normalized
    /// name contains `normalized_query`. Callers re-check containment, so
    /// a store that cannot filter server-side may return the whole document.
    async fn query_partition(
        &self,
        namespace: &str,
        partition: char,
        trigram: &str,
        normalized_query: &str,
    ) -> Result<Vec<C>, StoreError>;
}

/// Point reads against the entity catalog (partition key = entity ID)
#[async_trait]
pub trait CatalogStore<R>: Send + Sync {
    /// Fetch a single entity record
    ///
    /// Returns `Ok(None)` when no document exists for `entity_id`.
    async fn point_read(&self, namespace: &str, entity_id: &str) -> Result<Option<R>, StoreError>;
}

/// Errors raised by a store client
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Unknown namespace: {0}")]
    UnknownNamespace(String),
    #[error("Store not ready: {0}")]
    NotReady(String),
    #[error("Request failed: {0}")]
    Request(String),
}
