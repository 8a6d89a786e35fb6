//! Confidence-based disambiguation
//!
//! Turns a ranked candidate list into a single resolution, an ambiguous
//! outcome with alternatives, or not-found. Confidence of a candidate is
//! `match_count / T`, with T the number of distinct query trigrams.
//!
//! Rules:
//! 1. No candidates → `NotFound`
//! 2. Top confidence ≥ `min_confidence` and either no runner-up or a
//!    margin over the runner-up ≥ `min_margin` → `Resolved`
//! 3. Otherwise → `Ambiguous` with the top `max_alternatives` names
//!
//! The default thresholds (0.6 / 0.2 / 3) are empirical and have not been
//! calibrated against query logs; they are configurable per deployment.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::search::types::CandidateMatch;

// ---------------------------------------------------------------------------
// Policy Constants
// ---------------------------------------------------------------------------

/// Top candidate must reach this confidence to auto-resolve.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.6;

/// Required lead of the top candidate over the runner-up.
pub const DEFAULT_MIN_MARGIN: f64 = 0.2;

/// Alternatives carried by an ambiguous outcome.
pub const DEFAULT_MAX_ALTERNATIVES: usize = 3;

/// Slack for comparing ratios against thresholds, so 0.7 - 0.5 counts as 0.2.
const SCORE_EPSILON: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Tunable thresholds for the resolve path
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisambiguationPolicy {
    pub min_confidence: f64,
    pub min_margin: f64,
    pub max_alternatives: usize,
}

impl Default for DisambiguationPolicy {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            min_margin: DEFAULT_MIN_MARGIN,
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
        }
    }
}

/// Outcome of disambiguation for one resolve call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Disambiguation {
    /// Clear winner
    Resolved {
        entity_id: String,
        display_name: String,
        confidence: f64,
    },

    /// No clear winner; the caller should present the alternatives
    Ambiguous {
        alternatives: Vec<String>,
        confidence: f64,
        runner_up_confidence: f64,
    },

    NotFound,
}

impl Disambiguation {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Disambiguation::Resolved { .. })
    }

    pub fn resolved_id(&self) -> Option<&str> {
        match self {
            Disambiguation::Resolved { entity_id, .. } => Some(entity_id),
            _ => None,
        }
    }
}

/// Fraction of query trigrams a candidate matched; 0 when T is 0.
pub fn confidence(match_count: usize, total_trigrams: usize) -> f64 {
    if total_trigrams == 0 {
        return 0.0;
    }
    match_count as f64 / total_trigrams as f64
}

impl DisambiguationPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::Invalid {
                field: "policy.min_confidence",
                reason: format!("{} is outside [0, 1]", self.min_confidence),
            });
        }
        if !(0.0..=1.0).contains(&self.min_margin) {
            return Err(ConfigError::Invalid {
                field: "policy.min_margin",
                reason: format!("{} is outside [0, 1]", self.min_margin),
            });
        }
        if self.max_alternatives == 0 {
            return Err(ConfigError::Invalid {
                field: "policy.max_alternatives",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Decide on a ranked candidate list (best first)
    pub fn decide(&self, ranked: &[CandidateMatch], total_trigrams: usize) -> Disambiguation {
        let Some(top) = ranked.first() else {
            return Disambiguation::NotFound;
        };

        let top_confidence = confidence(top.match_count, total_trigrams);
        let runner_up_confidence = ranked
            .get(1)
            .map(|m| confidence(m.match_count, total_trigrams))
            .unwrap_or(0.0);

        let confident = top_confidence + SCORE_EPSILON >= self.min_confidence;
        let clear_lead = ranked.len() < 2
            || (top_confidence - runner_up_confidence) + SCORE_EPSILON >= self.min_margin;

        if confident && clear_lead {
            return Disambiguation::Resolved {
                entity_id: top.entity_id.clone(),
                display_name: top.display_name.clone(),
                confidence: top_confidence,
            };
        }

        Disambiguation::Ambiguous {
            alternatives: ranked
                .iter()
                .take(self.max_alternatives)
                .map(|m| m.display_name.clone())
                .collect(),
            confidence: top_confidence,
            runner_up_confidence,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_match(id: &str, count: usize) -> CandidateMatch {
        CandidateMatch::new(id, format!("Name {id}"), count)
    }

    fn policy() -> DisambiguationPolicy {
        DisambiguationPolicy::default()
    }

    #[test]
    fn test_empty_is_not_found() {
        assert_eq!(policy().decide(&[], 3), Disambiguation::NotFound);
    }

    #[test]
    fn test_exact_threshold_without_runner_up_resolves() {
        // 3 / 5 = 0.6
        let outcome = policy().decide(&[make_match("a", 3)], 5);
        assert_eq!(outcome.resolved_id(), Some("a"));
    }

    #[test]
    fn test_just_below_threshold_is_ambiguous() {
        // 59 / 100 = 0.59
        let outcome = policy().decide(&[make_match("a", 59)], 100);
        match outcome {
            Disambiguation::Ambiguous {
                alternatives,
                confidence,
                runner_up_confidence,
            } => {
                assert_eq!(alternatives, vec!["Name a".to_string()]);
                assert!((confidence - 0.59).abs() < 1e-12);
                assert_eq!(runner_up_confidence, 0.0);
            }
            other => panic!("Expected Ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn test_narrow_margin_is_ambiguous() {
        // 0.80 vs 0.65: margin 0.15
        let ranked = [make_match("a", 16), make_match("b", 13)];
        let outcome = policy().decide(&ranked, 20);
        assert!(matches!(outcome, Disambiguation::Ambiguous { .. }));
    }

    #[test]
    fn test_wide_margin_resolves() {
        // 0.8 vs 0.5: margin 0.3
        let ranked = [make_match("a", 8), make_match("b", 5)];
        let outcome = policy().decide(&ranked, 10);
        assert_eq!(outcome.resolved_id(), Some("a"));
    }

    #[test]
    fn test_margin_exactly_at_threshold_resolves() {
        // 0.7 - 0.5 is 0.19999999999999996 in f64
        let ranked = [make_match("a", 7), make_match("b", 5)];
        let outcome = policy().decide(&ranked, 10);
        assert!(outcome.is_resolved());
    }

    #[test]
    fn test_equal_scores_are_ambiguous() {
        let ranked = [make_match("a", 1), make_match("b", 1)];
        match policy().decide(&ranked, 1) {
            Disambiguation::Ambiguous {
                alternatives,
                confidence,
                runner_up_confidence,
            } => {
                assert_eq!(alternatives.len(), 2);
                assert_eq!(confidence, 1.0);
                assert_eq!(runner_up_confidence, 1.0);
            }
            other => panic!("Expected Ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn test_alternatives_capped() {
        let ranked: Vec<_> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|id| make_match(id, 2))
            .collect();
        match policy().decide(&ranked, 2) {
            Disambiguation::Ambiguous { alternatives, .. } => {
                assert_eq!(alternatives, vec!["Name a", "Name b", "Name c"]);
            }
            other => panic!("Expected Ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_policy() {
        let strict = DisambiguationPolicy {
            min_confidence: 0.9,
            min_margin: 0.5,
            max_alternatives: 1,
        };
        let ranked = [make_match("a", 8), make_match("b", 5)];
        match strict.decide(&ranked, 10) {
            Disambiguation::Ambiguous { alternatives, .. } => {
                assert_eq!(alternatives, vec!["Name a"]);
            }
            other => panic!("Expected Ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_trigrams_never_resolves() {
        let outcome = policy().decide(&[make_match("a", 1)], 0);
        assert!(!outcome.is_resolved());
    }

    #[test]
    fn test_validate_bounds() {
        assert!(policy().validate().is_ok());
        let bad = DisambiguationPolicy {
            max_alternatives: 0,
            ..policy()
        };
        assert!(bad.validate().is_err());
    }
}
