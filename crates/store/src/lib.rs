//! Prism Store - Observable keyed item store.
//!
//! This crate implements the source collection side of the Prism engine:
//! `KeyedStore`, an ordered, thread-safe mapping from key to item that
//! delivers set/deleted/cleared events to weakly-held subscribers.
//!
//! # Core Concepts
//!
//! - `KeyedStore`: the mapping itself, tagged with a `CollectionId`
//! - `StoreSubscriber`: the event interface views implement
//! - `attach()`: subscribe with replay of current entries, so late
//!   subscribers see the full state as set events before live ones
//!
//! # Example
//!
//! ```ignore
//! use prism_core::CollectionId;
//! use prism_store::KeyedStore;
//!
//! let store: KeyedStore<String, Room> = KeyedStore::new(CollectionId::name("rooms"));
//! store.insert("!a:x".into(), room);
//! for (key, room) in store.snapshot() {
//!     // iteration in key order
//! }
//! ```

mod store;
mod subscriber;

pub use store::KeyedStore;
pub use subscriber::{StoreSubscriber, SubscriberId};
