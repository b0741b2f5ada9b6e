//! Change listeners for filtered views.
//!
//! Listeners carry no diff payload: a notification means "the visible set
//! may have changed, re-read it". This keeps the consumer contract minimal
//! and lets the view fire exactly once per top-level operation no matter how
//! many partition mutations it performed.

use hashbrown::HashMap;

/// Unique identifier for a change listener.
pub type ListenerId = u64;

type Listener = Box<dyn Fn() + Send + Sync>;

/// A set of zero-argument change callbacks.
pub struct ChangeListeners {
    listeners: HashMap<ListenerId, Listener>,
    next_id: ListenerId,
}

impl Default for ChangeListeners {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeListeners {
    /// Creates an empty listener set.
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            next_id: 1,
        }
    }

    /// Adds a listener. Returns an ID usable with [`remove`](Self::remove).
    pub fn add<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Removes a listener by ID.
    ///
    /// Returns true if the listener was found and removed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Invokes every listener once.
    pub fn notify_all(&self) {
        for listener in self.listeners.values() {
            listener();
        }
    }

    /// Returns the number of listeners.
    #[inline]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns true if there are no listeners.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_add_and_notify() {
        let mut listeners = ChangeListeners::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c1 = count.clone();
        let c2 = count.clone();
        listeners.add(move || {
            c1.fetch_add(1, Ordering::SeqCst);
        });
        listeners.add(move || {
            c2.fetch_add(10, Ordering::SeqCst);
        });

        listeners.notify_all();
        assert_eq!(count.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn test_remove() {
        let mut listeners = ChangeListeners::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        let id = listeners.add(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));

        listeners.notify_all();
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_ids_unique() {
        let mut listeners = ChangeListeners::new();
        let a = listeners.add(|| {});
        let b = listeners.add(|| {});
        assert_ne!(a, b);
        assert_eq!(listeners.len(), 2);
    }
}
