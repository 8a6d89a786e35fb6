//! Result types shared by the search pipeline

use serde::Serialize;

/// A candidate touched by at least one query trigram
///
/// Lives for a single search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateMatch {
    pub entity_id: String,
    pub display_name: String,
    /// Distinct query trigrams whose lookup returned this candidate
    pub match_count: usize,
}

impl CandidateMatch {
    pub fn new(
        entity_id: impl Into<String>,
        display_name: impl Into<String>,
        match_count: usize,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            display_name: display_name.into(),
            match_count,
        }
    }
}

/// A suggestion returned by `search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub display_name: String,
}

impl From<CandidateMatch> for SearchHit {
    fn from(m: CandidateMatch) -> Self {
        Self {
            id: m.entity_id,
            display_name: m.display_name,
        }
    }
}

/// Full ranking for one query, with the numbers the disambiguator needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSearch {
    pub normalized_query: String,
    /// Distinct trigrams in the query (T)
    pub total_trigrams: usize,
    /// Ranked best first
    pub matches: Vec<CandidateMatch>,
    /// Trigram lookups that failed and were skipped
    pub failed_lookups: usize,
}

impl RankedSearch {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn top(&self) -> Option<&CandidateMatch> {
        self.matches.first()
    }
}
