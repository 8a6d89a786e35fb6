//! Deterministic ranking of aggregated matches
//!
//! Order: `match_count` descending, then `display_name` ascending
//! (ordinal, case-sensitive byte compare), then `entity_id` ascending.
//! The last key makes the order total even when two entities share a
//! display name.

use std::cmp::Ordering;

use crate::search::types::CandidateMatch;

/// Compare two matches in ranking order (best first)
pub fn compare_matches(a: &CandidateMatch, b: &CandidateMatch) -> Ordering {
    b.match_count
        .cmp(&a.match_count)
        .then_with(|| a.display_name.cmp(&b.display_name))
        .then_with(|| a.entity_id.cmp(&b.entity_id))
}

/// Rank matches best first
pub fn rank(matches: impl IntoIterator<Item = CandidateMatch>) -> Vec<CandidateMatch> {
    let mut ranked: Vec<CandidateMatch> = matches.into_iter().collect();
    ranked.sort_by(compare_matches);
    ranked
}
