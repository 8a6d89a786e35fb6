//! Partitioned store contracts and the in-memory implementation

pub mod memory;
pub mod traits;

pub use memory::{MemoryCatalog, MemoryTrigramIndex, RefreshStats};
pub use traits::{CandidateRecord, CatalogStore, EntityRecord, StoreError, TrigramIndexStore};
