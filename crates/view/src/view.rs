//! The filtered view engine.
//!
//! A `FilteredView` maintains two disjoint partitions over everything its
//! sources have shown it: `visible` (items the policy accepts) and
//! `filtered_out` (items it rejects, retained so they can be restored on
//! re-filter without re-fetching from the source). The visible partition is
//! itself a `KeyedStore`, so a view can serve as the source of another view.

use crate::listener::{ChangeListeners, ListenerId};
use crate::policy::ViewPolicy;
use hashbrown::HashMap;
use parking_lot::Mutex;
use prism_core::{CollectionId, CompoundKey, Error, Item, Result};
use prism_store::{KeyedStore, StoreSubscriber};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

/// A live filtered view over one or more keyed stores.
///
/// A view is bound to its sources with `source.attach(&view)`, which replays
/// the source's current entries as set events and then delivers live ones. A
/// view must not be attached to itself or to any view downstream of itself.
///
/// Every mutating operation (`on_set`/`on_deleted`/`on_cleared` event
/// handling, `refilter`, `set_filter_text`) runs under one exclusive lock
/// per view, held for the operation's full duration, so concurrent writers
/// are serialized and both partitions are observed consistently. The lock is
/// per-view; independent views mutate concurrently.
///
/// Per compound key the view is a three-state machine: absent, visible, or
/// hidden. A set event decides between visible and hidden; further set
/// events and `refilter` move keys between those two; delete and clear
/// events return keys to absent. No other transition exists.
///
/// Type parameters: `K` is the sources' local key type, `S` the item type
/// sources deliver, `T` the item type the view stores (converted by the
/// policy `P`; identical to `S` for most views).
pub struct FilteredView<K, S, T, P> {
    visible: Arc<KeyedStore<CompoundKey<K>, T>>,
    state: Mutex<ViewState<K, T, P>>,
    _source: PhantomData<fn(S)>,
}

struct ViewState<K, T, P> {
    policy: P,
    filtered_out: HashMap<CompoundKey<K>, T>,
    listeners: ChangeListeners,
}

impl<K, S, T, P> FilteredView<K, S, T, P>
where
    K: Ord + Clone + Hash + fmt::Debug + Send + 'static,
    S: Clone + Send + 'static,
    T: Item,
    P: ViewPolicy<S, T> + 'static,
{
    /// Creates a view with the given identity and policy, bound to no
    /// source yet.
    pub fn new(id: CollectionId, policy: P) -> Self {
        Self {
            visible: Arc::new(KeyedStore::new(id)),
            state: Mutex::new(ViewState {
                policy,
                filtered_out: HashMap::new(),
                listeners: ChangeListeners::new(),
            }),
            _source: PhantomData,
        }
    }

    /// Returns the view's identifier.
    #[inline]
    pub fn id(&self) -> &CollectionId {
        self.visible.id()
    }

    /// Returns the visible partition as a store handle.
    ///
    /// Consumers iterate it read-only in key order; other views may watch it
    /// (view composition). Do not mutate it directly; its contents are a
    /// pure projection of source events.
    #[inline]
    pub fn visible(&self) -> &Arc<KeyedStore<CompoundKey<K>, T>> {
        &self.visible
    }

    /// Adds a change listener, fired once after every operation that may
    /// have changed visible membership. Listeners receive no diff; they
    /// re-read the view.
    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.state.lock().listeners.add(listener)
    }

    /// Removes a change listener by ID.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.state.lock().listeners.remove(id)
    }

    /// Returns the number of visible items.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Returns true if no item is visible.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Gets a visible item by compound key.
    pub fn get(&self, key: &CompoundKey<K>) -> Option<T> {
        self.visible.get(key)
    }

    /// Returns true if the compound key is visible.
    pub fn contains(&self, key: &CompoundKey<K>) -> bool {
        self.visible.contains_key(key)
    }

    /// Returns the visible items in key order.
    pub fn snapshot(&self) -> Vec<(CompoundKey<K>, T)> {
        self.visible.snapshot()
    }

    /// Returns the number of filtered-out items.
    pub fn filtered_out_len(&self) -> usize {
        self.state.lock().filtered_out.len()
    }

    /// Returns the filtered-out items, in no particular order.
    pub fn filtered_out_snapshot(&self) -> Vec<(CompoundKey<K>, T)> {
        self.state
            .lock()
            .filtered_out
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns the policy's filter text, if it has one.
    pub fn filter_text(&self) -> Option<String> {
        self.state.lock().policy.filter_text().map(str::to_owned)
    }

    /// Replaces the policy's filter text and recomputes membership.
    ///
    /// Setting the current value is a no-op: no re-filter, no notification.
    /// On change, the re-filter runs under the same lock acquisition, so the
    /// new text and the new membership become observable together.
    pub fn set_filter_text(&self, text: &str) {
        let mut state = self.state.lock();
        if state.policy.set_filter_text(text) {
            self.refilter_with(&mut state, None);
        }
    }

    /// Re-evaluates every known item against the current policy.
    ///
    /// Idempotent: with no intervening source or policy change, a second
    /// call moves nothing and notifies nobody.
    pub fn refilter(&self) {
        let mut state = self.state.lock();
        self.refilter_with(&mut state, None);
    }

    /// Re-evaluates only the items matching `only_if`.
    pub fn refilter_if<F>(&self, only_if: F)
    where
        F: Fn(&T) -> bool,
    {
        let mut state = self.state.lock();
        self.refilter_with(&mut state, Some(&only_if));
    }

    fn refilter_with(&self, state: &mut ViewState<K, T, P>, only_if: Option<&dyn Fn(&T) -> bool>) {
        // Visible items are evaluated in item order (key as tie-break) so
        // the pass is deterministic and reproducible.
        let mut entries = self.visible.snapshot();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

        let mut take_out = Vec::new();
        for (key, item) in &entries {
            if let Some(pred) = only_if {
                if !pred(item) {
                    continue;
                }
            }
            if !state.policy.accept(item) {
                take_out.push((key.clone(), item.clone()));
            }
        }

        // Rejected items have no meaningful order.
        let mut bring_back = Vec::new();
        for (key, item) in &state.filtered_out {
            if let Some(pred) = only_if {
                if !pred(item) {
                    continue;
                }
            }
            if state.policy.accept(item) {
                bring_back.push(key.clone());
            }
        }

        let moved = take_out.len() + bring_back.len();

        // Take-out lands in filtered_out before the grouped removal, so the
        // partitions stay complete even if a downstream consumer rejects a
        // removal mid-batch.
        let take_out_keys: Vec<CompoundKey<K>> =
            take_out.iter().map(|(key, _)| key.clone()).collect();
        for (key, item) in take_out {
            state.filtered_out.insert(key, item);
        }
        if let Err(err) = self.visible.remove_many(&take_out_keys) {
            tracing::error!(view = %self.id(), error = %err, "downstream rejected batch removal");
        }

        for key in bring_back {
            if let Some(item) = state.filtered_out.remove(&key) {
                self.visible.insert(key, item);
            }
        }

        if moved > 0 {
            tracing::debug!(
                view = %self.id(),
                taken_out = take_out_keys.len(),
                moved,
                "refiltered"
            );
            state.listeners.notify_all();
        }
    }
}

impl<K, S, T, P> StoreSubscriber<K, S> for FilteredView<K, S, T, P>
where
    K: Ord + Clone + Hash + fmt::Debug + Send + 'static,
    S: Clone + Send + 'static,
    T: Item,
    P: ViewPolicy<S, T> + 'static,
{
    fn on_set(&self, source: &CollectionId, key: &K, raw: &S) {
        let mut state = self.state.lock();
        if !state.policy.accept_source(source) {
            return;
        }

        let item = state.policy.convert(raw.clone());
        let compound = CompoundKey::from_source(source, key.clone());

        if state.policy.accept(&item) {
            state.filtered_out.remove(&compound);
            self.visible.insert(compound, item);
        } else {
            if let Err(err) = self.visible.take(&compound) {
                tracing::error!(view = %self.id(), error = %err, "downstream rejected removal");
            }
            state.filtered_out.insert(compound, item);
        }

        state.listeners.notify_all();
    }

    fn on_deleted(&self, source: &CollectionId, key: &K) -> Result<()> {
        let mut state = self.state.lock();
        if !state.policy.accept_source(source) {
            return Ok(());
        }

        let compound = CompoundKey::from_source(source, key.clone());
        if self.visible.take(&compound)?.is_none()
            && state.filtered_out.remove(&compound).is_none()
        {
            return Err(Error::not_tracked(self.id(), format!("{:?}", key)));
        }

        state.listeners.notify_all();
        Ok(())
    }

    fn on_cleared(&self, source: &CollectionId) {
        let mut state = self.state.lock();
        if !state.policy.accept_source(source) {
            return;
        }

        let doomed: Vec<CompoundKey<K>> = self
            .visible
            .snapshot()
            .into_iter()
            .map(|(key, _)| key)
            .filter(|key| key.is_from(source))
            .collect();
        if let Err(err) = self.visible.remove_many(&doomed) {
            tracing::error!(view = %self.id(), error = %err, "downstream rejected batch removal");
        }
        state.filtered_out.retain(|key, _| !key.is_from(source));

        // A clear happened; listeners hear about it even if this view
        // tracked nothing from that source.
        state.listeners.notify_all();
    }
}
