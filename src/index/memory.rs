//! In-memory partitioned store
//!
//! Mirrors the layout of the remote document store: one trigram index
//! document per `(trigram, first letter)` pair, and one catalog document
//! per entity ID. Used by the CLI over a YAML catalog and by tests.
//!
//! `refresh` stands in for the ingestion pipeline. It replaces a whole
//! namespace at once, so readers never observe a half-built index.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::index::traits::{
    CandidateRecord, CatalogStore, EntityRecord, StoreError, TrigramIndexStore,
};
use crate::text::{distinct_trigrams, partition_key};

/// Document key inside a namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DocumentKey {
    trigram: String,
    partition: char,
}

/// Counts reported after a refresh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshStats {
    /// Candidates written
    pub candidates: usize,
    /// Distinct `(trigram, partition)` documents
    pub documents: usize,
    /// Candidates skipped because their normalized name is shorter than a trigram
    pub skipped: usize,
}

/// Trigram index held in RAM, keyed by namespace
pub struct MemoryTrigramIndex<C> {
    namespaces: RwLock<HashMap<String, HashMap<DocumentKey, Vec<C>>>>,
    ready: AtomicBool,
}

impl<C: CandidateRecord> Default for MemoryTrigramIndex<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CandidateRecord> MemoryTrigramIndex<C> {
    pub fn new() -> Self {
        Self {
            namespaces: RwLock::new(HashMap::new()),
            ready: AtomicBool::new(false),
        }
    }

    /// Rebuild a namespace from candidate records
    ///
    /// Each candidate is listed once in the document of every distinct
    /// trigram of its normalized name. Duplicate entity IDs keep the
    /// first occurrence.
    pub async fn refresh(&self, namespace: &str, candidates: Vec<C>) -> RefreshStats {
        let start = std::time::Instant::now();
        let mut documents: HashMap<DocumentKey, Vec<C>> = HashMap::new();
        let mut seen_ids = HashSet::new();
        let mut stats = RefreshStats::default();

        for candidate in candidates {
            if !seen_ids.insert(candidate.entity_id().to_string()) {
                continue;
            }
            let grams = distinct_trigrams(candidate.normalized_name());
            if grams.is_empty() {
                stats.skipped += 1;
                continue;
            }
            for trigram in grams {
                let Some(partition) = partition_key(trigram) else {
                    continue;
                };
                documents
                    .entry(DocumentKey {
                        trigram: trigram.to_string(),
                        partition,
                    })
                    .or_default()
                    .push(candidate.clone());
            }
            stats.candidates += 1;
        }
        stats.documents = documents.len();

        self.namespaces
            .write()
            .await
            .insert(namespace.to_string(), documents);
        self.ready.store(true, Ordering::SeqCst);

        tracing::info!(
            namespace,
            candidates = stats.candidates,
            documents = stats.documents,
            skipped = stats.skipped,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Trigram index refreshed"
        );
        stats
    }

    /// Whether any namespace has been populated
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<C: CandidateRecord> TrigramIndexStore<C> for MemoryTrigramIndex<C> {
    async fn query_partition(
        &self,
        namespace: &str,
        partition: char,
        trigram: &str,
        normalized_query: &str,
    ) -> Result<Vec<C>, StoreError> {
        if !self.is_ready() {
            return Err(StoreError::NotReady(namespace.to_string()));
        }
        let namespaces = self.namespaces.read().await;
        let documents = namespaces
            .get(namespace)
            .ok_or_else(|| StoreError::UnknownNamespace(namespace.to_string()))?;

        let key = DocumentKey {
            trigram: trigram.to_string(),
            partition,
        };
        Ok(documents
            .get(&key)
            .map(|candidates| {
                candidates
                    .iter()
                    .filter(|c| c.normalized_name().contains(normalized_query))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Entity catalog held in RAM, one document per ID
pub struct MemoryCatalog<R> {
    namespaces: RwLock<HashMap<String, HashMap<String, R>>>,
    ready: AtomicBool,
}

impl<R: EntityRecord> Default for MemoryCatalog<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: EntityRecord> MemoryCatalog<R> {
    pub fn new() -> Self {
        Self {
            namespaces: RwLock::new(HashMap::new()),
            ready: AtomicBool::new(false),
        }
    }

    /// Replace a namespace's records, returning how many were stored
    pub async fn refresh(&self, namespace: &str, records: Vec<R>) -> usize {
        let documents: HashMap<String, R> = records
            .into_iter()
            .map(|r| (r.entity_id().to_string(), r))
            .collect();
        let count = documents.len();
        self.namespaces
            .write()
            .await
            .insert(namespace.to_string(), documents);
        self.ready.store(true, Ordering::SeqCst);
        tracing::info!(namespace, records = count, "Catalog refreshed");
        count
    }

    /// Drop a single record, e.g. to simulate catalog drift
    pub async fn remove(&self, namespace: &str, entity_id: &str) -> Option<R> {
        self.namespaces
            .write()
            .await
            .get_mut(namespace)
            .and_then(|docs| docs.remove(entity_id))
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<R: EntityRecord> CatalogStore<R> for MemoryCatalog<R> {
    async fn point_read(&self, namespace: &str, entity_id: &str) -> Result<Option<R>, StoreError> {
        if !self.is_ready() {
            return Err(StoreError::NotReady(namespace.to_string()));
        }
        let namespaces = self.namespaces.read().await;
        let documents = namespaces
            .get(namespace)
            .ok_or_else(|| StoreError::UnknownNamespace(namespace.to_string()))?;
        Ok(documents.get(entity_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::cards::{CardCandidate, CardRecord};

    fn card(id: &str, name: &str) -> CardCandidate {
        CardCandidate::from_name(id, name)
    }

    #[tokio::test]
    async fn test_index_not_ready_initially() {
        let index: MemoryTrigramIndex<CardCandidate> = MemoryTrigramIndex::new();
        assert!(!index.is_ready());
        let err = index.query_partition("cards", 'b', "bol", "bolt").await;
        assert!(matches!(err, Err(StoreError::NotReady(_))));
    }

    #[tokio::test]
    async fn test_refresh_writes_one_document_per_trigram() {
        let index = MemoryTrigramIndex::new();
        let stats = index
            .refresh("cards", vec![card("c1", "Bolt"), card("c2", "Ox")])
            .await;

        assert!(index.is_ready());
        assert_eq!(stats.candidates, 1);
        assert_eq!(stats.skipped, 1);
        // "bolt" -> "bol", "olt"
        assert_eq!(stats.documents, 2);
    }

    #[tokio::test]
    async fn test_query_scoped_to_partition() {
        let index = MemoryTrigramIndex::new();
        index
            .refresh(
                "cards",
                vec![card("c1", "Lightning Bolt"), card("c2", "Boltwave")],
            )
            .await;

        let hits = index.query_partition("cards", 'b', "bol", "bol").await.unwrap();
        assert_eq!(hits.len(), 2);

        // Right trigram, wrong partition: no such document
        let miss = index.query_partition("cards", 'x', "bol", "bol").await.unwrap();
        assert!(miss.is_empty());
    }

    #[tokio::test]
    async fn test_query_applies_containment_filter() {
        let index = MemoryTrigramIndex::new();
        index
            .refresh(
                "cards",
                vec![card("c1", "Lightning Bolt"), card("c2", "Bolas's Citadel")],
            )
            .await;

        // Both list "bol", only one contains the whole query
        let hits = index
            .query_partition("cards", 'b', "bol", "bolt")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].display_name(), "Lightning Bolt");
    }

    #[tokio::test]
    async fn test_unknown_namespace() {
        let index = MemoryTrigramIndex::new();
        index.refresh("cards", vec![card("c1", "Bolt")]).await;
        let err = index.query_partition("artists", 'b', "bol", "bol").await;
        assert_eq!(err, Err(StoreError::UnknownNamespace("artists".to_string())));
    }

    #[tokio::test]
    async fn test_catalog_point_read() {
        let catalog = MemoryCatalog::new();
        catalog
            .refresh("cards", vec![CardRecord::new("c1", "Lightning Bolt")])
            .await;

        let found = catalog.point_read("cards", "c1").await.unwrap();
        assert_eq!(found.map(|r| r.name), Some("Lightning Bolt".to_string()));
        assert!(catalog.point_read("cards", "c2").await.unwrap().is_none());

        catalog.remove("cards", "c1").await;
        assert!(catalog.point_read("cards", "c1").await.unwrap().is_none());
    }
}
