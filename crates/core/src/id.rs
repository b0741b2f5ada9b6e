//! Collection identifiers.
//!
//! A `CollectionId` names a collection: a keyed store, a filtered view, or a
//! registry entry. Identifiers come in three shapes matching how collections
//! are addressed: a plain name, a per-owner sub-collection, or a collection
//! scoped to an (owner, scope) pair.

use alloc::string::String;
use core::fmt;

/// Identifier for a collection.
///
/// The three shapes correspond to the key forms the registry resolves:
///
/// - `Name`: a plain identifier such as `"accounts"`.
/// - `Owned`: a per-owner sub-collection such as `(user_id, "rooms")`.
/// - `Scoped`: a collection scoped to an owner and a scope, such as
///   `(user_id, room_id, "members")`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CollectionId {
    /// A plain named collection.
    Name(String),
    /// A sub-collection belonging to one owner.
    Owned {
        owner: String,
        tag: String,
    },
    /// A collection scoped to an (owner, scope) pair.
    Scoped {
        owner: String,
        scope: String,
        tag: String,
    },
}

impl CollectionId {
    /// Creates a plain named identifier.
    pub fn name(name: impl Into<String>) -> Self {
        CollectionId::Name(name.into())
    }

    /// Creates a per-owner identifier.
    pub fn owned(owner: impl Into<String>, tag: impl Into<String>) -> Self {
        CollectionId::Owned {
            owner: owner.into(),
            tag: tag.into(),
        }
    }

    /// Creates an (owner, scope) identifier.
    pub fn scoped(
        owner: impl Into<String>,
        scope: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        CollectionId::Scoped {
            owner: owner.into(),
            scope: scope.into(),
            tag: tag.into(),
        }
    }

    /// Returns the tag of a structured identifier, or the name itself.
    pub fn tag(&self) -> &str {
        match self {
            CollectionId::Name(name) => name,
            CollectionId::Owned { tag, .. } => tag,
            CollectionId::Scoped { tag, .. } => tag,
        }
    }

    /// Returns the owner component, if this identifier has one.
    pub fn owner(&self) -> Option<&str> {
        match self {
            CollectionId::Name(_) => None,
            CollectionId::Owned { owner, .. } => Some(owner),
            CollectionId::Scoped { owner, .. } => Some(owner),
        }
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionId::Name(name) => write!(f, "{}", name),
            CollectionId::Owned { owner, tag } => write!(f, "({}, {})", owner, tag),
            CollectionId::Scoped { owner, scope, tag } => {
                write!(f, "({}, {}, {})", owner, scope, tag)
            }
        }
    }
}
