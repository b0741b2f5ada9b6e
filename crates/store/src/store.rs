//! Keyed item storage.
//!
//! This module provides the `KeyedStore` struct, an ordered mapping from key
//! to item with synchronous event delivery to subscribers.

use crate::subscriber::{StoreSubscriber, SubscriberId};
use parking_lot::Mutex;
use prism_core::{CollectionId, Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};

/// An ordered, thread-safe mapping from key to item.
///
/// Iteration follows key order; that order is the "natural order" consumers
/// read. Every mutation runs under one exclusive lock per store and delivers
/// events to subscribers before the lock is released, so subscribers observe
/// mutations in the order they happened.
///
/// Subscribers are held weakly: dropping the subscriber is enough to stop
/// delivery, and dead entries are pruned on the next notification.
pub struct KeyedStore<K, T> {
    id: CollectionId,
    inner: Mutex<Inner<K, T>>,
}

struct Inner<K, T> {
    entries: BTreeMap<K, T>,
    subscribers: Vec<(SubscriberId, Weak<dyn StoreSubscriber<K, T>>)>,
    next_subscriber: SubscriberId,
}

impl<K, T> Inner<K, T> {
    /// Prunes dead subscribers and upgrades the rest.
    fn live_subscribers(&mut self) -> Vec<Arc<dyn StoreSubscriber<K, T>>> {
        self.subscribers.retain(|(_, weak)| weak.strong_count() > 0);
        self.subscribers
            .iter()
            .filter_map(|(_, weak)| weak.upgrade())
            .collect()
    }
}

impl<K, T> KeyedStore<K, T>
where
    K: Ord + Clone + fmt::Debug,
    T: Clone,
{
    /// Creates an empty store with the given identifier.
    pub fn new(id: CollectionId) -> Self {
        Self {
            id,
            inner: Mutex::new(Inner {
                entries: BTreeMap::new(),
                subscribers: Vec::new(),
                next_subscriber: 1,
            }),
        }
    }

    /// Returns the store's identifier.
    #[inline]
    pub fn id(&self) -> &CollectionId {
        &self.id
    }

    /// Inserts an item, replacing any previous item under the same key.
    ///
    /// Returns the previous item. Fires a set event.
    pub fn insert(&self, key: K, item: T) -> Option<T> {
        let mut inner = self.inner.lock();
        let previous = inner.entries.insert(key.clone(), item.clone());
        for subscriber in inner.live_subscribers() {
            subscriber.on_set(&self.id, &key, &item);
        }
        previous
    }

    /// Removes a key, failing if it is absent.
    ///
    /// Fires a deleted event; a subscriber error propagates to the caller
    /// (remaining subscribers are not notified).
    pub fn remove(&self, key: &K) -> Result<T> {
        let mut inner = self.inner.lock();
        let item = inner
            .entries
            .remove(key)
            .ok_or_else(|| Error::not_found(&self.id, format!("{:?}", key)))?;
        for subscriber in inner.live_subscribers() {
            subscriber.on_deleted(&self.id, key)?;
        }
        Ok(item)
    }

    /// Removes a key if present; absent keys are not an error.
    ///
    /// Fires a deleted event only when something was removed.
    pub fn take(&self, key: &K) -> Result<Option<T>> {
        let mut inner = self.inner.lock();
        match inner.entries.remove(key) {
            Some(item) => {
                for subscriber in inner.live_subscribers() {
                    subscriber.on_deleted(&self.id, key)?;
                }
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    /// Removes several keys as one grouped operation.
    ///
    /// All removals are applied before any deleted event fires, so no event
    /// consumer can observe a half-removed batch. Absent keys are skipped.
    /// Returns the removed pairs in the order given.
    pub fn remove_many(&self, keys: &[K]) -> Result<Vec<(K, T)>> {
        let mut inner = self.inner.lock();
        let mut removed = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(item) = inner.entries.remove(key) {
                removed.push((key.clone(), item));
            }
        }
        let subscribers = inner.live_subscribers();
        for (key, _) in &removed {
            for subscriber in &subscribers {
                subscriber.on_deleted(&self.id, key)?;
            }
        }
        tracing::trace!(store = %self.id, count = removed.len(), "batch removal");
        Ok(removed)
    }

    /// Removes every entry. Fires a single cleared event, even when empty.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        for subscriber in inner.live_subscribers() {
            subscriber.on_cleared(&self.id);
        }
        tracing::trace!(store = %self.id, "cleared");
    }

    /// Gets an item by key.
    pub fn get(&self, key: &K) -> Option<T> {
        self.inner.lock().entries.get(key).cloned()
    }

    /// Returns true if the key is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.lock().entries.contains_key(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Returns all entries in key order.
    pub fn snapshot(&self) -> Vec<(K, T)> {
        self.inner
            .lock()
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Subscribes to future events.
    ///
    /// The subscriber is held weakly; keep the `Arc` alive to keep receiving
    /// events. Returns an ID usable with [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe<U>(&self, subscriber: &Arc<U>) -> SubscriberId
    where
        U: StoreSubscriber<K, T> + 'static,
    {
        let mut inner = self.inner.lock();
        let id = inner.next_subscriber;
        inner.next_subscriber += 1;
        let arc: Arc<dyn StoreSubscriber<K, T>> = subscriber.clone();
        let weak: Weak<dyn StoreSubscriber<K, T>> = Arc::downgrade(&arc);
        inner.subscribers.push((id, weak));
        id
    }

    /// Subscribes with replay: every current entry is delivered to the new
    /// subscriber as a set event, then live events follow.
    ///
    /// Replay and registration happen in one lock scope, so no event is
    /// missed or duplicated in between.
    pub fn attach<U>(&self, subscriber: &Arc<U>) -> SubscriberId
    where
        U: StoreSubscriber<K, T> + 'static,
    {
        let mut inner = self.inner.lock();
        for (key, item) in &inner.entries {
            subscriber.on_set(&self.id, key, item);
        }
        let id = inner.next_subscriber;
        inner.next_subscriber += 1;
        let arc: Arc<dyn StoreSubscriber<K, T>> = subscriber.clone();
        let weak: Weak<dyn StoreSubscriber<K, T>> = Arc::downgrade(&arc);
        inner.subscribers.push((id, weak));
        id
    }

    /// Unsubscribes by ID.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sub_id, _)| *sub_id != id);
        inner.subscribers.len() != before
    }

    /// Returns the number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .subscribers
            .iter()
            .filter(|(_, weak)| weak.strong_count() > 0)
            .count()
    }
}
