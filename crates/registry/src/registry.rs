//! The collection registry.
//!
//! This module provides `CollectionRegistry`, which resolves collection
//! identifiers to memoized entries, constructing them on first access from
//! the shape of the key.

use crate::handle::{CollectionHandle, ComposedView, RegistryView};
use crate::policies::{AggregatePolicy, ScopedFieldPolicy};
use hashbrown::HashMap;
use parking_lot::Mutex;
use prism_core::{CollectionId, Error, FieldAccess, Item, Result};
use prism_store::KeyedStore;
use prism_view::{BoxPolicy, FieldFilter, FilteredView};
use std::sync::Arc;

/// Reserved key: the aggregate view over every owner's room collection.
pub const ALL_ROOMS: &str = "all_rooms";
/// Reserved key: text-matched view over [`ALL_ROOMS`].
pub const MATCHING_ACCOUNTS: &str = "matching_accounts";
/// Reserved key: standalone homeserver-matching view; sources attach later.
pub const FILTERED_HOMESERVERS: &str = "filtered_homeservers";
/// Reserved tag: per-room member list matched by display name prefix.
pub const FILTERED_MEMBERS: &str = "filtered_members";
/// Reserved tag: per-room member completions; empty filter shows nothing.
pub const AUTOCOMPLETED_MEMBERS: &str = "autocompleted_members";

const ACCOUNTS: &str = "accounts";
const ROOMS_TAG: &str = "rooms";
const MEMBERS_TAG: &str = "members";

/// A lazy registry of collections.
///
/// Indexing is one operation: [`get_or_create`](Self::get_or_create) returns
/// the memoized entry or resolves the key against an ordered, fixed set of
/// structural rules, stores the result, and returns it. Entries live as long
/// as the registry; there is no eviction.
///
/// The whole check-construct-store sequence runs under one registry-wide
/// lock, so two concurrent first accesses of the same key construct exactly
/// one entry. Dependencies between entries resolve recursively inside that
/// lock, through the same resolution path.
pub struct CollectionRegistry<T> {
    entries: Mutex<HashMap<CollectionId, CollectionHandle<T>>>,
}

impl<T> Default for CollectionRegistry<T>
where
    T: Item + FieldAccess,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CollectionRegistry<T>
where
    T: Item + FieldAccess,
{
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the entry for `key`, constructing and memoizing it on first
    /// access.
    ///
    /// Resolution rules, first match wins:
    ///
    /// 1. `"all_rooms"`: aggregate view admitting every
    ///    `(owner, "rooms")` source; resolves and watches `"accounts"`
    ///    (whose own events the policy gates out).
    /// 2. `"matching_accounts"`: multi-word view over rule 1's result.
    /// 3. `"filtered_homeservers"`: prefix view with no source bound yet.
    /// 4. `(owner, room, "filtered_members")`: prefix view over that
    ///    room's member store.
    /// 5. `(owner, room, "autocompleted_members")`: multi-word view over
    ///    the same store, showing nothing until text is entered.
    /// 6. anything else: a plain keyed store tagged with the key.
    pub fn get_or_create(&self, key: &CollectionId) -> Result<CollectionHandle<T>> {
        let mut entries = self.entries.lock();
        Self::resolve(&mut entries, key)
    }

    /// Returns true if the key has been constructed already.
    pub fn contains(&self, key: &CollectionId) -> bool {
        self.entries.lock().contains_key(key)
    }

    /// Returns the number of constructed entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing has been constructed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn resolve(
        entries: &mut HashMap<CollectionId, CollectionHandle<T>>,
        key: &CollectionId,
    ) -> Result<CollectionHandle<T>> {
        if let Some(handle) = entries.get(key) {
            return Ok(handle.clone());
        }

        let handle = Self::construct(entries, key)?;
        entries.insert(key.clone(), handle.clone());
        tracing::debug!(key = %key, "collection constructed");
        Ok(handle)
    }

    fn construct(
        entries: &mut HashMap<CollectionId, CollectionHandle<T>>,
        key: &CollectionId,
    ) -> Result<CollectionHandle<T>> {
        match key {
            CollectionId::Name(name) if name == ALL_ROOMS => {
                let accounts = Self::resolve(entries, &CollectionId::name(ACCOUNTS))?;
                let accounts = Self::expect_store(&accounts, key)?;
                let view: Arc<RegistryView<T>> = Arc::new(FilteredView::new(
                    key.clone(),
                    Box::new(AggregatePolicy::new(ROOMS_TAG)) as BoxPolicy<T>,
                ));
                accounts.attach(&view);
                Ok(CollectionHandle::View(view))
            }
            CollectionId::Name(name) if name == MATCHING_ACCOUNTS => {
                let all_rooms = Self::resolve(entries, &CollectionId::name(ALL_ROOMS))?;
                let all_rooms = all_rooms
                    .as_view()
                    .ok_or_else(|| Error::construction(key, "dependency is not a view"))?;
                let view: Arc<ComposedView<T>> = Arc::new(FilteredView::new(
                    key.clone(),
                    Box::new(FieldFilter::words(["display_name"])) as BoxPolicy<T>,
                ));
                all_rooms.visible().attach(&view);
                Ok(CollectionHandle::Composed(view))
            }
            CollectionId::Name(name) if name == FILTERED_HOMESERVERS => {
                let view: Arc<RegistryView<T>> = Arc::new(FilteredView::new(
                    key.clone(),
                    Box::new(FieldFilter::prefix(["name"])) as BoxPolicy<T>,
                ));
                Ok(CollectionHandle::View(view))
            }
            CollectionId::Scoped { owner, scope, tag } if tag == FILTERED_MEMBERS => {
                let members_id = CollectionId::scoped(owner.clone(), scope.clone(), MEMBERS_TAG);
                let members = Self::resolve(entries, &members_id)?;
                let members = Self::expect_store(&members, key)?;
                let view: Arc<RegistryView<T>> = Arc::new(FilteredView::new(
                    key.clone(),
                    Box::new(ScopedFieldPolicy::new(
                        members_id,
                        FieldFilter::prefix(["display_name"]),
                    )) as BoxPolicy<T>,
                ));
                members.attach(&view);
                Ok(CollectionHandle::View(view))
            }
            CollectionId::Scoped { owner, scope, tag } if tag == AUTOCOMPLETED_MEMBERS => {
                let members_id = CollectionId::scoped(owner.clone(), scope.clone(), MEMBERS_TAG);
                let members = Self::resolve(entries, &members_id)?;
                let members = Self::expect_store(&members, key)?;
                let view: Arc<RegistryView<T>> = Arc::new(FilteredView::new(
                    key.clone(),
                    Box::new(ScopedFieldPolicy::new(
                        members_id,
                        FieldFilter::words(["display_name"]).accept_all_when_empty(false),
                    )) as BoxPolicy<T>,
                ));
                members.attach(&view);
                Ok(CollectionHandle::View(view))
            }
            _ => {
                Self::validate(key)?;
                Ok(CollectionHandle::Store(Arc::new(KeyedStore::new(
                    key.clone(),
                ))))
            }
        }
    }

    fn expect_store<'a>(
        handle: &'a CollectionHandle<T>,
        key: &CollectionId,
    ) -> Result<&'a Arc<KeyedStore<String, T>>> {
        handle
            .as_store()
            .ok_or_else(|| Error::construction(key, "dependency is not a store"))
    }

    fn validate(key: &CollectionId) -> Result<()> {
        let malformed = match key {
            CollectionId::Name(name) => name.is_empty(),
            CollectionId::Owned { owner, tag } => owner.is_empty() || tag.is_empty(),
            CollectionId::Scoped { owner, scope, tag } => {
                owner.is_empty() || scope.is_empty() || tag.is_empty()
            }
        };
        if malformed {
            Err(Error::construction(key, "empty key component"))
        } else {
            Ok(())
        }
    }
}
