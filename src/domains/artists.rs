//! Artist-name domain
//!
//! Artist bylines are typed by hand on cards and vary in spelling, which
//! makes this the main consumer of `resolve_by_name`.

use serde::{Deserialize, Serialize};

use crate::index::{CandidateRecord, EntityRecord};
use crate::search::TrigramSearchService;
use crate::text::normalize_name;

/// Trigram index entry for an artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistCandidate {
    pub artist_id: String,
    pub normalized_name: String,
    pub display_name: String,
}

impl ArtistCandidate {
    pub fn from_name(artist_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            artist_id: artist_id.into(),
            normalized_name: normalize_name(&display_name),
            display_name,
        }
    }
}

impl CandidateRecord for ArtistCandidate {
    fn entity_id(&self) -> &str {
        &self.artist_id
    }

    fn normalized_name(&self) -> &str {
        &self.normalized_name
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Catalog record for an artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub card_count: u32,
}

impl ArtistRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            card_count: 0,
        }
    }

    pub fn candidate(&self) -> ArtistCandidate {
        ArtistCandidate::from_name(&self.id, &self.name)
    }
}

impl EntityRecord for ArtistRecord {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

/// Search and resolution over artist names
pub type ArtistSearchService = TrigramSearchService<ArtistCandidate, ArtistRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_from_record() {
        let record = ArtistRecord::new("a-7", "Seb McKinnon");
        let candidate = record.candidate();
        assert_eq!(candidate.entity_id(), "a-7");
        assert_eq!(candidate.normalized_name(), "sebmckinnon");
        assert_eq!(candidate.display_name(), "Seb McKinnon");
    }

    #[test]
    fn test_card_count_defaults_to_zero() {
        let record: ArtistRecord = serde_yaml::from_str("id: a-1\nname: Rebecca Guay\n").unwrap();
        assert_eq!(record.card_count, 0);
        assert_eq!(EntityRecord::entity_id(&record), "a-1");
    }
}
