//! Trigram decomposition
//!
//! Slides a 3-character window across normalized text. For text of
//! length N (N >= 3) exactly N-2 trigrams are produced; shorter text
//! produces none.

use std::collections::HashSet;

/// Width of the sliding window.
pub const TRIGRAM_LEN: usize = 3;

/// Produce the ordered, overlapping trigrams of normalized text.
///
/// Expects the output of [`normalize_name`](super::normalize_name), which is
/// pure ASCII, so byte windows and character windows coincide.
///
/// # Example
///
/// ```
/// use name_resolver::text::trigrams;
///
/// assert_eq!(trigrams("bolt"), vec!["bol", "olt"]);
/// assert!(trigrams("xx").is_empty());
/// ```
pub fn trigrams(normalized: &str) -> Vec<&str> {
    if !normalized.is_ascii() {
        return normalized_char_trigrams(normalized);
    }
    if normalized.len() < TRIGRAM_LEN {
        return Vec::new();
    }
    (0..=normalized.len() - TRIGRAM_LEN)
        .map(|i| &normalized[i..i + TRIGRAM_LEN])
        .collect()
}

/// Trigrams with repeats removed, keeping first-occurrence order.
///
/// "aaaa" yields `["aaa"]` where [`trigrams`] yields `["aaa", "aaa"]`.
pub fn distinct_trigrams(normalized: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    trigrams(normalized)
        .into_iter()
        .filter(|t| seen.insert(*t))
        .collect()
}

/// Number of trigrams [`trigrams`] would produce, without allocating.
pub fn trigram_count(normalized: &str) -> usize {
    normalized.chars().count().saturating_sub(TRIGRAM_LEN - 1)
}

/// Partition key for a trigram: its first character.
///
/// Returns `None` for an empty string.
pub fn partition_key(trigram: &str) -> Option<char> {
    trigram.chars().next()
}

// Fallback for callers that pass text which did not go through the
// normalizer; slices on char boundaries instead of bytes.
fn normalized_char_trigrams(text: &str) -> Vec<&str> {
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    if bounds.len() <= TRIGRAM_LEN {
        return Vec::new();
    }
    bounds
        .windows(TRIGRAM_LEN + 1)
        .map(|w| &text[w[0]..w[TRIGRAM_LEN]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sliding_window() {
        assert_eq!(trigrams("bolt"), vec!["bol", "olt"]);
        assert_eq!(
            trigrams("lightning"),
            vec!["lig", "igh", "ght", "htn", "tni", "nin", "ing"]
        );
    }

    #[test]
    fn test_short_text_has_no_trigrams() {
        assert!(trigrams("").is_empty());
        assert!(trigrams("x").is_empty());
        assert!(trigrams("xx").is_empty());
        assert_eq!(trigrams("xyz"), vec!["xyz"]);
    }

    #[test]
    fn test_count_matches_generation() {
        for text in ["", "a", "ab", "abc", "abcd", "sebmckinnon"] {
            assert_eq!(trigram_count(text), trigrams(text).len(), "text = {text:?}");
        }
    }

    #[test]
    fn test_distinct_trigrams_drop_repeats() {
        assert_eq!(trigrams("aaaa"), vec!["aaa", "aaa"]);
        assert_eq!(distinct_trigrams("aaaa"), vec!["aaa"]);
        assert_eq!(distinct_trigrams("abcabc"), vec!["abc", "bca", "cab"]);
    }

    #[test]
    fn test_partition_key_is_first_char() {
        assert_eq!(partition_key("bol"), Some('b'));
        assert_eq!(partition_key(""), None);
    }

    #[test]
    fn test_non_ascii_input_slices_on_char_boundaries() {
        assert_eq!(trigrams("éabc"), vec!["éab", "abc"]);
        assert_eq!(trigram_count("éabc"), 2);
    }
}
