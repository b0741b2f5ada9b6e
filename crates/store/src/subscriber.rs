//! Store event subscription interface.

use prism_core::{CollectionId, Result};

/// Unique identifier for a store subscription.
pub type SubscriberId = u64;

/// Receiver of a store's mutation events.
///
/// Events are delivered synchronously, in mutation order, while the emitting
/// store's lock is held. Callbacks must not re-enter the emitting store.
///
/// `source` is always the emitting store's identifier, so one subscriber can
/// watch several stores and tell their events apart.
pub trait StoreSubscriber<K, T>: Send + Sync {
    /// A key was inserted or its item replaced.
    fn on_set(&self, source: &CollectionId, key: &K, item: &T);

    /// A key was removed.
    ///
    /// A subscriber tracking the store's contents may fail here when the key
    /// is unknown to it; the error propagates to the caller of the store
    /// mutation that produced the event.
    fn on_deleted(&self, source: &CollectionId, key: &K) -> Result<()>;

    /// The store was cleared. Fired once per `clear()` call.
    fn on_cleared(&self, source: &CollectionId);
}
