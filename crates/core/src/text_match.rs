//! Text matching primitives for filter predicates.
//!
//! Provides a single, canonical implementation used by both field filter
//! strategies (prefix and multi-word), ensuring identical case handling
//! across them.
//!
//! # Smart case
//!
//! Matching is **case-insensitive** when the filter text is entirely
//! lowercase, **case-sensitive** otherwise. "Entirely lowercase" means the
//! text is unchanged by lowercasing, so digits and punctuation do not force
//! sensitivity.
//!
//! # Prefix matching
//!
//! A value matches when it starts with the filter text, after smart-case
//! normalization.
//!
//! # Multi-word matching
//!
//! The filter text is split on whitespace; every non-empty word must occur
//! as a substring of the search text, in any order. A filter that splits to
//! zero words (empty or all-whitespace text) therefore matches everything.

use alloc::string::String;

/// Returns true if matching against `filter` should ignore case.
///
/// ```
/// use prism_core::text_match::is_case_insensitive;
/// assert!(is_case_insensitive("abc"));
/// assert!(is_case_insensitive("abc123"));
/// assert!(!is_case_insensitive("Abc"));
/// ```
pub fn is_case_insensitive(filter: &str) -> bool {
    filter.chars().all(|c| !c.is_uppercase())
}

/// Smart-case prefix test.
///
/// ```
/// use prism_core::text_match::prefix_match;
/// assert!(prefix_match("ABCdef", "abc"));
/// assert!(!prefix_match("abcdef", "Abc"));
/// assert!(prefix_match("Abcdef", "Abc"));
/// ```
pub fn prefix_match(value: &str, filter: &str) -> bool {
    if is_case_insensitive(filter) {
        lowered(value).starts_with(&lowered(filter))
    } else {
        value.starts_with(filter)
    }
}

/// Smart-case multi-word substring test.
///
/// Every whitespace-separated word of `filter` must be a substring of
/// `text`, regardless of order. Zero words match everything.
///
/// ```
/// use prism_core::text_match::word_match;
/// assert!(word_match("red light", "red l"));
/// assert!(word_match("red light", "l red"));
/// assert!(!word_match("red light", "green"));
/// assert!(word_match("red light", "   "));
/// ```
pub fn word_match(text: &str, filter: &str) -> bool {
    if is_case_insensitive(filter) {
        let text = lowered(text);
        words_contained(&text, &lowered(filter))
    } else {
        words_contained(text, filter)
    }
}

fn words_contained(text: &str, filter: &str) -> bool {
    filter.split_whitespace().all(|word| text.contains(word))
}

fn lowered(s: &str) -> String {
    s.to_lowercase()
}

// =========================================================================
// Tests
// =========================================================================
