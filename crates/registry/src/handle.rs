//! Registry entry handles.

use prism_core::{CollectionId, CompoundKey};
use prism_store::KeyedStore;
use prism_view::{BoxPolicy, FilteredView};
use std::sync::Arc;

/// A registry view keyed directly by source-local string keys.
pub type RegistryView<T> = FilteredView<String, T, T, BoxPolicy<T>>;

/// A registry view layered over another entry's visible partition, so its
/// local keys are the upstream view's compound keys.
pub type ComposedView<T> = FilteredView<CompoundKey<String>, T, T, BoxPolicy<T>>;

/// Handle to a registry entry. Clones share the entry.
pub enum CollectionHandle<T> {
    /// A plain keyed store (the default rule).
    Store(Arc<KeyedStore<String, T>>),
    /// A filtered view over stores.
    View(Arc<RegistryView<T>>),
    /// A filtered view over another view.
    Composed(Arc<ComposedView<T>>),
}

impl<T> Clone for CollectionHandle<T> {
    fn clone(&self) -> Self {
        match self {
            CollectionHandle::Store(store) => CollectionHandle::Store(store.clone()),
            CollectionHandle::View(view) => CollectionHandle::View(view.clone()),
            CollectionHandle::Composed(view) => CollectionHandle::Composed(view.clone()),
        }
    }
}

impl<T> std::fmt::Debug for CollectionHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            CollectionHandle::Store(_) => "Store",
            CollectionHandle::View(_) => "View",
            CollectionHandle::Composed(_) => "Composed",
        };
        f.debug_tuple(kind).finish()
    }
}

impl<T> CollectionHandle<T> {
    /// Returns the entry's identifier.
    pub fn id(&self) -> &CollectionId
    where
        T: prism_core::Item,
    {
        match self {
            CollectionHandle::Store(store) => store.id(),
            CollectionHandle::View(view) => view.id(),
            CollectionHandle::Composed(view) => view.id(),
        }
    }

    /// Returns the store, if this entry is one.
    pub fn as_store(&self) -> Option<&Arc<KeyedStore<String, T>>> {
        match self {
            CollectionHandle::Store(store) => Some(store),
            _ => None,
        }
    }

    /// Returns the view, if this entry is a store-backed view.
    pub fn as_view(&self) -> Option<&Arc<RegistryView<T>>> {
        match self {
            CollectionHandle::View(view) => Some(view),
            _ => None,
        }
    }

    /// Returns the view, if this entry is a view-over-view.
    pub fn as_composed(&self) -> Option<&Arc<ComposedView<T>>> {
        match self {
            CollectionHandle::Composed(view) => Some(view),
            _ => None,
        }
    }
}
