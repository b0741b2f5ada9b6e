//! Prism View - Incrementally maintained filtered views.
//!
//! This crate implements the filtering engine at the heart of Prism. A
//! `FilteredView` subscribes to one or more keyed stores and maintains two
//! disjoint partitions of everything it has seen: the items its policy
//! currently accepts (`visible`) and the items it rejects (`filtered_out`).
//! Source events re-evaluate only the affected item; `refilter` re-evaluates
//! everything against the current policy and moves items between partitions
//! in batches.
//!
//! # Core Concepts
//!
//! - `ViewPolicy`: the capability interface a view variant implements
//!   (source gate, item transform, acceptance, optional filter text)
//! - `FilteredView`: the two-partition engine; its visible partition is
//!   itself a `KeyedStore`, so views compose and consumers get ordered
//!   iteration plus per-key events for free
//! - `FieldFilter`: the two built-in text matching policies (smart-case
//!   prefix, multi-word substring)
//! - `ChangeListeners`: zero-argument "something changed" notifications;
//!   consumers re-read the view
//!
//! # Example
//!
//! ```ignore
//! use prism_view::{FieldFilter, FilteredView};
//!
//! let view = Arc::new(FilteredView::new(
//!     CollectionId::name("filtered_members"),
//!     FieldFilter::prefix(["display_name"]),
//! ));
//! members_store.attach(&view); // replay current entries, then live events
//! view.set_filter_text("ali"); // smart-case prefix, auto-refilters
//! ```

mod field_filter;
mod listener;
mod policy;
mod view;

pub use field_filter::{FieldFilter, MatchKind};
pub use listener::{ChangeListeners, ListenerId};
pub use policy::{BoxPolicy, Passthrough, ViewPolicy};
pub use view::FilteredView;
