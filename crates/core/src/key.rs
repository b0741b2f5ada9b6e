//! Compound keys for filtered views.
//!
//! A view tracks items from several sources at once, so a local key alone is
//! not unique. The compound key pairs the originating source's identifier
//! with the item's local key.

use crate::id::CollectionId;
use core::fmt;

/// Compound key uniquely identifying an item within a filtered view.
///
/// `source` is the identifier of the originating source collection. It is
/// `None` only for manually seeded single-source views; event-driven
/// insertions always record their source.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompoundKey<K> {
    source: Option<CollectionId>,
    key: K,
}

impl<K> CompoundKey<K> {
    /// Creates a compound key.
    pub fn new(source: Option<CollectionId>, key: K) -> Self {
        Self { source, key }
    }

    /// Creates a compound key for the given source.
    pub fn from_source(source: &CollectionId, key: K) -> Self {
        Self {
            source: Some(source.clone()),
            key,
        }
    }

    /// Returns the source identifier, if recorded.
    #[inline]
    pub fn source(&self) -> Option<&CollectionId> {
        self.source.as_ref()
    }

    /// Returns the local key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns true if this key originated from `source`.
    pub fn is_from(&self, source: &CollectionId) -> bool {
        self.source.as_ref() == Some(source)
    }
}

impl<K: fmt::Display> fmt::Display for CompoundKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}/{}", source, self.key),
            None => write!(f, "{}", self.key),
        }
    }
}
