//! Prism Registry - Lazy, dispatch-based collection registry.
//!
//! A `CollectionRegistry` hands out collections by `CollectionId`. Unknown
//! keys are resolved on first access through a fixed, ordered set of
//! structural rules (the key's shape decides whether a plain store, a
//! filtered view, or a composed view over another entry gets built) and the
//! result is memoized for the registry's lifetime.
//!
//! Dependencies between entries resolve recursively through the same
//! registry, so a view built over another entry's contents shares that entry
//! rather than constructing a private copy.
//!
//! # Example
//!
//! ```ignore
//! use prism_core::CollectionId;
//! use prism_registry::CollectionRegistry;
//!
//! let registry: CollectionRegistry<Member> = CollectionRegistry::new();
//!
//! // First access constructs; second returns the same entry.
//! let members = registry.get_or_create(
//!     &CollectionId::scoped("@a:x", "!r:x", "filtered_members"),
//! )?;
//! ```

mod handle;
mod policies;
mod registry;

pub use handle::{CollectionHandle, ComposedView, RegistryView};
pub use policies::{AggregatePolicy, ScopedFieldPolicy};
pub use registry::{
    CollectionRegistry, ALL_ROOMS, AUTOCOMPLETED_MEMBERS, FILTERED_HOMESERVERS, FILTERED_MEMBERS,
    MATCHING_ACCOUNTS,
};
