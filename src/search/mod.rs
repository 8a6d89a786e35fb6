//! Trigram search pipeline: aggregate, rank, disambiguate, resolve

pub mod aggregate;
pub mod disambiguate;
pub mod rank;
pub mod service;
pub mod types;

pub use aggregate::{Aggregation, MatchAggregator};
pub use disambiguate::{
    confidence, Disambiguation, DisambiguationPolicy, DEFAULT_MAX_ALTERNATIVES,
    DEFAULT_MIN_CONFIDENCE, DEFAULT_MIN_MARGIN,
};
pub use rank::{compare_matches, rank};
pub use service::TrigramSearchService;
pub use types::{CandidateMatch, RankedSearch, SearchHit};
