//! Concrete catalog domains served by the generic search service

pub mod artists;
pub mod cards;

pub use artists::{ArtistCandidate, ArtistRecord, ArtistSearchService};
pub use cards::{CardCandidate, CardRecord, CardSearchService};
