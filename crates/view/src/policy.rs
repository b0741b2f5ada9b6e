//! View policies.
//!
//! A policy is the capability interface a concrete view variant implements:
//! which sources it listens to, how incoming items are reshaped, and which
//! items belong in the visible partition. Policies with a filter text also
//! expose it here so the view can offer a uniform text setter.

use prism_core::CollectionId;

/// The capability interface of a filtered view.
///
/// `S` is the item type the sources provide, `T` the type the view stores;
/// they coincide for most views.
///
/// `accept` must be a pure function of the item and the policy's current
/// state. When that state changes (e.g. new filter text), membership is
/// recomputed by an explicit `refilter`, never implicitly.
pub trait ViewPolicy<S, T = S>: Send {
    /// Whether events from `source` are processed at all. Default: all
    /// sources accepted.
    fn accept_source(&self, _source: &CollectionId) -> bool {
        true
    }

    /// Transform applied to an incoming item before acceptance and storage.
    fn convert(&self, raw: S) -> T;

    /// Whether an item belongs in the visible partition. Default: accept
    /// everything.
    fn accept(&self, _item: &T) -> bool {
        true
    }

    /// The current filter text, for policies that have one.
    fn filter_text(&self) -> Option<&str> {
        None
    }

    /// Replaces the filter text. Returns true if the text changed, in which
    /// case the caller must refilter. Default: no text capability, never
    /// changes.
    fn set_filter_text(&mut self, _text: &str) -> bool {
        false
    }
}

/// A boxed, type-erased policy, for registries holding views with
/// heterogeneous policies under one handle type.
pub type BoxPolicy<S, T = S> = Box<dyn ViewPolicy<S, T>>;

impl<S, T> ViewPolicy<S, T> for BoxPolicy<S, T> {
    fn accept_source(&self, source: &CollectionId) -> bool {
        (**self).accept_source(source)
    }

    fn convert(&self, raw: S) -> T {
        (**self).convert(raw)
    }

    fn accept(&self, item: &T) -> bool {
        (**self).accept(item)
    }

    fn filter_text(&self) -> Option<&str> {
        (**self).filter_text()
    }

    fn set_filter_text(&mut self, text: &str) -> bool {
        (**self).set_filter_text(text)
    }
}

/// The identity policy: every source, every item, unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl<T> ViewPolicy<T> for Passthrough {
    fn convert(&self, raw: T) -> T {
        raw
    }
}
