//! Prism Core - Core types for the Prism live view engine.
//!
//! This crate provides the foundational types shared by every Prism crate:
//!
//! - `CollectionId`: identifies a collection (a store, a view, a registry entry)
//! - `CompoundKey`: `(source, local key)` pair uniquely identifying an item
//!   within a filtered view
//! - `Item` / `FieldAccess`: the two capabilities the engine requires of the
//!   values it tracks
//! - `text_match`: smart-case prefix and multi-word substring predicates
//! - `Error`: error types for store, view and registry operations
//!
//! # Example
//!
//! ```rust
//! use prism_core::{CollectionId, CompoundKey};
//!
//! let source = CollectionId::owned("@alice:example.org", "rooms");
//! let key = CompoundKey::new(Some(source.clone()), "!room:example.org".to_string());
//!
//! assert_eq!(key.source(), Some(&source));
//! assert_eq!(key.key().as_str(), "!room:example.org");
//! ```

#![no_std]

extern crate alloc;

mod error;
mod id;
mod item;
mod key;
pub mod text_match;

pub use error::{Error, Result};
pub use id::CollectionId;
pub use item::{FieldAccess, Item};
pub use key::CompoundKey;
