//! Card-name domain
//!
//! Candidates are listed in the `cards` trigram namespace; full records
//! live in the card catalog.

use serde::{Deserialize, Serialize};

use crate::index::{CandidateRecord, EntityRecord};
use crate::search::TrigramSearchService;
use crate::text::normalize_name;

/// Trigram index entry for a card name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCandidate {
    pub card_id: String,
    pub normalized_name: String,
    pub display_name: String,
}

impl CardCandidate {
    /// Build an index entry, normalizing the display name
    pub fn from_name(card_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            card_id: card_id.into(),
            normalized_name: normalize_name(&display_name),
            display_name,
        }
    }
}

impl CandidateRecord for CardCandidate {
    fn entity_id(&self) -> &str {
        &self.card_id
    }

    fn normalized_name(&self) -> &str {
        &self.normalized_name
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Catalog record for a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artist_ids: Vec<String>,
}

impl CardRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            type_line: None,
            mana_cost: None,
            artist_ids: Vec::new(),
        }
    }

    /// The trigram index entry derived from this record
    pub fn candidate(&self) -> CardCandidate {
        CardCandidate::from_name(&self.id, &self.name)
    }
}

impl EntityRecord for CardRecord {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

/// Search and resolution over card names
pub type CardSearchService = TrigramSearchService<CardCandidate, CardRecord>;
