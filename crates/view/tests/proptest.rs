//! Property-based tests for prism-view using proptest.

use prism_core::{CollectionId, CompoundKey, FieldAccess};
use prism_store::KeyedStore;
use prism_view::{FieldFilter, FilteredView};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Card {
    label: String,
}

impl FieldAccess for Card {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "label" => Some(&self.label),
            _ => None,
        }
    }
}

const LABELS: &[&str] = &["Alice", "alice", "Bob", "BOB", "Anna banana", ""];
const FILTERS: &[&str] = &["", "a", "A", "b", "  "];

#[derive(Clone, Debug)]
enum Op {
    Set(u8, usize),
    Delete(u8),
    Clear,
    Refilter,
    Filter(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..12, 0usize..LABELS.len()).prop_map(|(k, l)| Op::Set(k, l)),
        (0u8..12).prop_map(Op::Delete),
        Just(Op::Clear),
        Just(Op::Refilter),
        (0usize..FILTERS.len()).prop_map(Op::Filter),
    ]
}

type CardView = FilteredView<String, Card, Card, FieldFilter>;

fn accepted(label: &str, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    prism_core::text_match::prefix_match(label, filter)
}

fn check_invariants(
    view: &CardView,
    source: &CollectionId,
    live: &HashMap<u8, usize>,
    filter: &str,
) {
    let visible: HashSet<CompoundKey<String>> =
        view.snapshot().into_iter().map(|(k, _)| k).collect();
    let hidden: HashSet<CompoundKey<String>> = view
        .filtered_out_snapshot()
        .into_iter()
        .map(|(k, _)| k)
        .collect();

    // Partition invariant: disjoint, union = live keys.
    assert!(visible.is_disjoint(&hidden));
    assert_eq!(visible.len() + hidden.len(), live.len());

    // Acceptance correctness per key.
    for (key, &label_idx) in live {
        let compound = CompoundKey::from_source(source, format!("k{}", key));
        if accepted(LABELS[label_idx], filter) {
            assert!(visible.contains(&compound), "key {} should be visible", key);
        } else {
            assert!(hidden.contains(&compound), "key {} should be hidden", key);
        }
    }
}

proptest! {
    /// After every event the two partitions stay disjoint, cover exactly the
    /// live keys, and each key sits on the side its label's acceptance says.
    #[test]
    fn partitions_stay_consistent(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let store: Arc<KeyedStore<String, Card>> =
            Arc::new(KeyedStore::new(CollectionId::name("cards")));
        let view: Arc<CardView> = Arc::new(FilteredView::new(
            CollectionId::name("matching_cards"),
            FieldFilter::prefix(["label"]),
        ));
        store.attach(&view);

        let mut live: HashMap<u8, usize> = HashMap::new();
        let mut filter = "";

        for op in ops {
            match op {
                Op::Set(key, label_idx) => {
                    store.insert(format!("k{}", key), Card { label: LABELS[label_idx].into() });
                    live.insert(key, label_idx);
                }
                Op::Delete(key) => {
                    let result = store.remove(&format!("k{}", key));
                    prop_assert_eq!(result.is_ok(), live.remove(&key).is_some());
                }
                Op::Clear => {
                    store.clear();
                    live.clear();
                }
                Op::Refilter => view.refilter(),
                Op::Filter(idx) => {
                    filter = FILTERS[idx];
                    view.set_filter_text(filter);
                }
            }
            check_invariants(&view, store.id(), &live, filter);
        }
    }

    /// A second refilter with nothing changed in between moves nothing and
    /// stays silent.
    #[test]
    fn refilter_is_idempotent(
        labels in prop::collection::vec(0usize..LABELS.len(), 0..20),
        filter_idx in 0usize..FILTERS.len(),
    ) {
        let store: Arc<KeyedStore<String, Card>> =
            Arc::new(KeyedStore::new(CollectionId::name("cards")));
        let view: Arc<CardView> = Arc::new(FilteredView::new(
            CollectionId::name("matching_cards"),
            FieldFilter::prefix(["label"]),
        ));
        store.attach(&view);

        for (i, label_idx) in labels.iter().enumerate() {
            store.insert(format!("k{}", i), Card { label: LABELS[*label_idx].into() });
        }
        view.set_filter_text(FILTERS[filter_idx]);

        let before = (view.len(), view.filtered_out_len());
        let notifications = Arc::new(AtomicUsize::new(0));
        let counter = notifications.clone();
        view.add_listener(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        view.refilter();
        view.refilter();

        prop_assert_eq!((view.len(), view.filtered_out_len()), before);
        prop_assert_eq!(notifications.load(Ordering::SeqCst), 0);
    }
}
