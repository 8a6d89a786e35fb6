//! Text normalization for name matching
//!
//! Canonicalizes free-text names so that matching is insensitive to case,
//! punctuation, whitespace and digits:
//! - Unicode NFC composition (a letter typed with a combining accent
//!   becomes one precomposed character)
//! - Lowercase conversion
//! - Everything that is not an ASCII letter is dropped
//!
//! Accented letters are dropped rather than transliterated, so
//! "Séb" normalizes to "sb" however the accent was typed. Compatibility
//! forms (ligatures, circled or full-width letters) are not folded and
//! are dropped too. The catalog ingestion side applies the same function,
//! which keeps query and index consistent.

use unicode_normalization::UnicodeNormalization;

/// Normalize a raw name for trigram matching.
///
/// The output contains only `a-z`. Empty input yields empty output.
///
/// # Examples
///
/// ```
/// use name_resolver::text::normalize_name;
///
/// assert_eq!(normalize_name("Lightning Bolt"), "lightningbolt");
/// assert_eq!(normalize_name("Seb McKinnon"), "sebmckinnon");
/// assert_eq!(normalize_name("Borrowing 100,000 Arrows"), "borrowingarrows");
/// ```
pub fn normalize_name(raw: &str) -> String {
    raw.nfc()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_whitespace() {
        assert_eq!(normalize_name("Lightning Bolt"), "lightningbolt");
        assert_eq!(normalize_name("  BOLT  "), "bolt");
    }

    #[test]
    fn test_strips_punctuation_and_digits() {
        assert_eq!(normalize_name("Jace, the Mind-Sculptor"), "jacethemindsculptor");
        assert_eq!(normalize_name("R2-D2"), "rd");
        assert_eq!(normalize_name("1996"), "");
    }

    #[test]
    fn test_diacritics_are_dropped_not_transliterated() {
        assert_eq!(normalize_name("Séance"), "sance");
        // Decomposed form composes under NFC and is dropped the same way
        assert_eq!(normalize_name("Se\u{301}ance"), "sance");
        assert_eq!(normalize_name("Æther Vial"), "thervial");
    }

    #[test]
    fn test_compatibility_forms_are_dropped_not_folded() {
        assert_eq!(normalize_name("ﬁre"), "re");
        assert_eq!(normalize_name("ℌello"), "ello");
        assert_eq!(normalize_name("ⓑⓞⓛⓣ"), "");
        assert_eq!(normalize_name("Ｂｏｌｔ"), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name(" \t\n"), "");
    }
}
