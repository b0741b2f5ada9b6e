//! Field string filter policies.
//!
//! Both built-in text matching strategies share one state shape: the set of
//! item fields to search, the current filter text, and what an empty filter
//! means. They differ only in how the text is compared: exact smart-case
//! prefix, or multi-word substring.

use crate::policy::ViewPolicy;
use prism_core::text_match::{prefix_match, word_match};
use prism_core::FieldAccess;

/// How the filter text is compared against field values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchKind {
    /// Any selected field value starts with the filter text (smart case).
    Prefix,
    /// Every whitespace-separated word of the filter text occurs somewhere
    /// in the concatenated field values (smart case, order-independent).
    Words,
}

/// A view policy matching the filter text against item fields.
///
/// With an empty filter text, `accept_all_when_empty` decides membership
/// wholesale. A non-empty but all-whitespace text under [`MatchKind::Words`]
/// splits to zero words and matches everything; this mirrors the behavior of
/// the system this engine was modeled on and is deliberately not "fixed".
#[derive(Clone, Debug)]
pub struct FieldFilter {
    fields: Vec<String>,
    text: String,
    accept_all_when_empty: bool,
    kind: MatchKind,
}

impl FieldFilter {
    /// Creates a smart-case prefix filter over the given fields.
    pub fn prefix<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        Self::new(fields, MatchKind::Prefix)
    }

    /// Creates a multi-word substring filter over the given fields.
    pub fn words<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        Self::new(fields, MatchKind::Words)
    }

    fn new<I, F>(fields: I, kind: MatchKind) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            text: String::new(),
            accept_all_when_empty: true,
            kind,
        }
    }

    /// Sets what an empty filter text means: `true` (the default) shows
    /// everything, `false` shows nothing until text is entered.
    pub fn accept_all_when_empty(mut self, accept_all: bool) -> Self {
        self.accept_all_when_empty = accept_all;
        self
    }

    /// Returns the match kind.
    #[inline]
    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    /// Returns the selected field names.
    #[inline]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the current filter text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the filter text. Returns true if it changed.
    pub fn set_text(&mut self, text: &str) -> bool {
        if text == self.text {
            false
        } else {
            self.text = text.to_owned();
            true
        }
    }

    /// Evaluates the filter against one item.
    pub fn matches<T: FieldAccess>(&self, item: &T) -> bool {
        if self.text.is_empty() {
            return self.accept_all_when_empty;
        }

        match self.kind {
            MatchKind::Prefix => self
                .fields
                .iter()
                .any(|field| match item.field(field) {
                    Some(value) => prefix_match(value, &self.text),
                    None => false,
                }),
            MatchKind::Words => {
                let text = self
                    .fields
                    .iter()
                    .filter_map(|field| item.field(field))
                    .collect::<Vec<_>>()
                    .join(" ");
                word_match(&text, &self.text)
            }
        }
    }
}

impl<T: FieldAccess> ViewPolicy<T> for FieldFilter {
    fn convert(&self, raw: T) -> T {
        raw
    }

    fn accept(&self, item: &T) -> bool {
        self.matches(item)
    }

    fn filter_text(&self) -> Option<&str> {
        Some(self.text())
    }

    fn set_filter_text(&mut self, text: &str) -> bool {
        self.set_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
    struct Member {
        display_name: String,
        id: String,
    }

    impl Member {
        fn new(display_name: &str, id: &str) -> Self {
            Self {
                display_name: display_name.into(),
                id: id.into(),
            }
        }
    }

    impl FieldAccess for Member {
        fn field(&self, name: &str) -> Option<&str> {
            match name {
                "display_name" => Some(&self.display_name),
                "id" => Some(&self.id),
                _ => None,
            }
        }
    }

    fn with_text(mut filter: FieldFilter, text: &str) -> FieldFilter {
        assert!(ViewPolicy::<Member>::set_filter_text(&mut filter, text));
        filter
    }

    #[test]
    fn test_prefix_smart_case() {
        let filter = with_text(FieldFilter::prefix(["display_name"]), "abc");
        assert!(filter.matches(&Member::new("ABCdef", "@x")));
        assert!(filter.matches(&Member::new("abcdef", "@x")));

        let filter = with_text(FieldFilter::prefix(["display_name"]), "Abc");
        assert!(!filter.matches(&Member::new("abcdef", "@x")));
        assert!(filter.matches(&Member::new("Abcdef", "@x")));
    }

    #[test]
    fn test_prefix_any_field_suffices() {
        let filter = with_text(FieldFilter::prefix(["display_name", "id"]), "@al");
        assert!(filter.matches(&Member::new("Alice", "@alice:x")));
        assert!(!filter.matches(&Member::new("Alice", "@bob:x")));
    }

    #[test]
    fn test_words_all_must_match() {
        let filter = with_text(FieldFilter::words(["display_name"]), "red l");
        assert!(filter.matches(&Member::new("red light", "@x")));
        assert!(filter.matches(&Member::new("light red", "@x")));
        assert!(!filter.matches(&Member::new("red", "@x")));
        assert!(!filter.matches(&Member::new("green", "@x")));
    }

    #[test]
    fn test_words_span_fields() {
        // Words may match across the concatenated field values.
        let filter = with_text(FieldFilter::words(["display_name", "id"]), "alice @x");
        assert!(filter.matches(&Member::new("alice", "@x:server")));
    }

    #[test]
    fn test_empty_text_policy() {
        let accept_all = FieldFilter::prefix(["display_name"]);
        assert!(accept_all.matches(&Member::new("anyone", "@x")));

        let accept_none = FieldFilter::prefix(["display_name"]).accept_all_when_empty(false);
        assert!(!accept_none.matches(&Member::new("anyone", "@x")));
    }

    #[test]
    fn test_whitespace_only_words_match_everything() {
        // Non-empty text, zero words: matches regardless of
        // accept_all_when_empty. Kept identical to the source behavior.
        let filter = with_text(
            FieldFilter::words(["display_name"]).accept_all_when_empty(false),
            "   ",
        );
        assert!(filter.matches(&Member::new("anyone", "@x")));
    }

    #[test]
    fn test_set_filter_text_reports_change() {
        let mut filter = FieldFilter::prefix(["display_name"]);
        assert!(ViewPolicy::<Member>::set_filter_text(&mut filter, "a"));
        assert!(!ViewPolicy::<Member>::set_filter_text(&mut filter, "a"));
        assert!(ViewPolicy::<Member>::set_filter_text(&mut filter, ""));
        assert_eq!(ViewPolicy::<Member>::filter_text(&filter), Some(""));
    }

    #[test]
    fn test_missing_field_never_matches() {
        let filter = with_text(FieldFilter::prefix(["avatar_url"]), "http");
        assert!(!filter.matches(&Member::new("http", "@x")));
    }
}
