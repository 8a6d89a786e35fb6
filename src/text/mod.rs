//! Text canonicalization and trigram decomposition

pub mod normalize;
pub mod trigram;

pub use normalize::normalize_name;
pub use trigram::{distinct_trigrams, partition_key, trigram_count, trigrams, TRIGRAM_LEN};
