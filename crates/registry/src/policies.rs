//! Policies for the specialized registry views.

use prism_core::{CollectionId, FieldAccess};
use prism_view::{FieldFilter, ViewPolicy};

/// Accepts every item, but only from per-owner sub-collections carrying a
/// given tag. Used by the aggregate view to multiplex one sub-collection
/// kind across all owners while ignoring its other sources.
#[derive(Clone, Debug)]
pub struct AggregatePolicy {
    tag: String,
}

impl AggregatePolicy {
    /// Creates a policy admitting `Owned { tag, .. }` sources.
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl<T> ViewPolicy<T> for AggregatePolicy {
    fn accept_source(&self, source: &CollectionId) -> bool {
        matches!(source, CollectionId::Owned { tag, .. } if *tag == self.tag)
    }

    fn convert(&self, raw: T) -> T {
        raw
    }
}

/// A field filter bound to exactly one source collection.
///
/// Scoped views (per-room member lists) share their room's member store with
/// any other consumer; the gate makes sure no other source leaks in even if
/// the view is wired to more stores later.
#[derive(Clone, Debug)]
pub struct ScopedFieldPolicy {
    source: CollectionId,
    filter: FieldFilter,
}

impl ScopedFieldPolicy {
    /// Creates a policy admitting only `source`, filtering with `filter`.
    pub fn new(source: CollectionId, filter: FieldFilter) -> Self {
        Self { source, filter }
    }
}

impl<T: FieldAccess> ViewPolicy<T> for ScopedFieldPolicy {
    fn accept_source(&self, source: &CollectionId) -> bool {
        *source == self.source
    }

    fn convert(&self, raw: T) -> T {
        raw
    }

    fn accept(&self, item: &T) -> bool {
        self.filter.matches(item)
    }

    fn filter_text(&self) -> Option<&str> {
        Some(self.filter.text())
    }

    fn set_filter_text(&mut self, text: &str) -> bool {
        self.filter.set_text(text)
    }
}
