//! Name Resolver - Trigram fuzzy search and name disambiguation
//!
//! Resolves free-text names (card names, artist bylines) against a
//! catalog held in a partitioned document store. It serves two needs:
//! ranked search-as-you-type suggestions, and resolving a hand-typed name
//! to exactly one catalog entity when the match is clear enough.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Consumers: API layer, CLI, batch ingestion checks              │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │              TrigramSearchService<Candidate, Record>            │
//! │     normalize → trigrams → aggregate → rank → disambiguate      │
//! └─────────────────────────────────────────────────────────────────┘
//!                  │                                │
//!                  ▼                                ▼
//! ┌───────────────────────────────┐  ┌──────────────────────────────┐
//! │  Trigram index                │  │  Entity catalog              │
//! │  (trigram, first letter)      │  │  (entity id = partition)     │
//! └───────────────────────────────┘  └──────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use name_resolver::{ArtistSearchService, MemoryCatalog, MemoryTrigramIndex, ResolverConfig};
//!
//! let config = ResolverConfig::from_file("config/resolver.yaml")?;
//! let service = ArtistSearchService::from_config(&config, "artists", index, catalog)?;
//!
//! let suggestions = service.search("mckin").await?;
//! let artist = service.resolve_by_name("Seb McKinnon").await?;
//! ```

pub mod config;
pub mod domains;
pub mod error;
pub mod index;
pub mod search;
pub mod text;

// Re-export main types
pub use config::{DomainConfig, ResolverConfig, SearchConfig};
pub use domains::{
    ArtistCandidate, ArtistRecord, ArtistSearchService, CardCandidate, CardRecord,
    CardSearchService,
};
pub use error::{ConfigError, ResolveError};
pub use index::{
    CandidateRecord, CatalogStore, EntityRecord, MemoryCatalog, MemoryTrigramIndex, StoreError,
    TrigramIndexStore,
};
pub use search::{
    CandidateMatch, Disambiguation, DisambiguationPolicy, RankedSearch, SearchHit,
    TrigramSearchService,
};
pub use text::{normalize_name, trigrams};
