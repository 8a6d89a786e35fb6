//! Match aggregation over the partitioned trigram index
//!
//! One lookup per distinct query trigram, fanned out with bounded
//! concurrency. Results are merged into a call-local count map as they
//! arrive; merging is commutative, so arrival order never changes the
//! final counts.
//!
//! A trigram hit only proves a 3-letter overlap. Every returned candidate
//! is re-checked for containment of the whole normalized query before it
//! is counted, whether or not the store already filtered server-side.

use futures::stream::{self, StreamExt};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::index::{CandidateRecord, StoreError, TrigramIndexStore};
use crate::search::types::CandidateMatch;
use crate::text::partition_key;

/// Per-call aggregate, keyed by entity ID
#[derive(Debug, Default)]
pub struct Aggregation {
    pub matches: HashMap<String, CandidateMatch>,
    /// Lookups issued
    pub lookups: usize,
    /// Lookups that returned a store error
    pub failed_lookups: usize,
    /// Candidates dropped by the containment check
    pub rejected: usize,
}

impl Aggregation {
    /// True when lookups were issued and every one of them failed
    pub fn all_failed(&self) -> bool {
        self.lookups > 0 && self.failed_lookups == self.lookups
    }
}

/// Issues trigram lookups for one namespace and counts matches
pub struct MatchAggregator<'a, C: CandidateRecord> {
    store: &'a dyn TrigramIndexStore<C>,
    namespace: &'a str,
    max_concurrent: usize,
}

impl<'a, C: CandidateRecord> MatchAggregator<'a, C> {
    pub fn new(
        store: &'a dyn TrigramIndexStore<C>,
        namespace: &'a str,
        max_concurrent: usize,
    ) -> Self {
        Self {
            store,
            namespace,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Count, for every candidate containing `normalized_query`, how many
    /// of `trigrams` returned it
    ///
    /// `trigrams` should already be distinct. A failed lookup is logged and
    /// skipped; the remaining trigrams still count.
    pub async fn aggregate(&self, normalized_query: &str, trigrams: &[&str]) -> Aggregation {
        let mut aggregation = Aggregation::default();

        let mut lookups = stream::iter(trigrams.iter().copied())
            .map(|trigram| async move {
                let result = self.lookup(trigram, normalized_query).await;
                (trigram, result)
            })
            .buffer_unordered(self.max_concurrent);

        while let Some((trigram, result)) = lookups.next().await {
            aggregation.lookups += 1;
            match result {
                Ok(candidates) => {
                    Self::merge(&mut aggregation, normalized_query, candidates);
                }
                Err(e) => {
                    aggregation.failed_lookups += 1;
                    tracing::warn!(
                        namespace = %self.namespace,
                        trigram,
                        error = %e,
                        "Trigram lookup failed, continuing with partial coverage"
                    );
                }
            }
        }

        if aggregation.all_failed() {
            tracing::warn!(
                namespace = %self.namespace,
                query = %normalized_query,
                lookups = aggregation.lookups,
                "All trigram lookups failed, reporting no candidates"
            );
        }

        aggregation
    }

    async fn lookup(&self, trigram: &str, normalized_query: &str) -> Result<Vec<C>, StoreError> {
        let Some(partition) = partition_key(trigram) else {
            return Ok(Vec::new());
        };
        self.store
            .query_partition(self.namespace, partition, trigram, normalized_query)
            .await
    }

    fn merge(aggregation: &mut Aggregation, normalized_query: &str, candidates: Vec<C>) {
        // An entity listed twice in one document still counts once for this trigram
        let mut seen_in_lookup = HashSet::new();

        for candidate in candidates {
            if !candidate.normalized_name().contains(normalized_query) {
                aggregation.rejected += 1;
                continue;
            }
            if !seen_in_lookup.insert(candidate.entity_id().to_string()) {
                continue;
            }
            match aggregation.matches.entry(candidate.entity_id().to_string()) {
                Entry::Occupied(mut entry) => entry.get_mut().match_count += 1,
                Entry::Vacant(entry) => {
                    entry.insert(CandidateMatch::new(
                        candidate.entity_id(),
                        candidate.display_name(),
                        1,
                    ));
                }
            }
        }
    }
}
