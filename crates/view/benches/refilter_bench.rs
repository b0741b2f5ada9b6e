//! Benchmarks for the prism-view refilter path.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use prism_core::{CollectionId, FieldAccess};
use prism_store::KeyedStore;
use prism_view::{FieldFilter, FilteredView};
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

type CardView = FilteredView<String, Card, Card, FieldFilter>;

fn populated_view(size: usize) -> Arc<CardView> {
    let store: Arc<KeyedStore<String, Card>> =
        Arc::new(KeyedStore::new(CollectionId::name("cards")));
    let view: Arc<CardView> = Arc::new(FilteredView::new(
        CollectionId::name("matching_cards"),
        FieldFilter::prefix(["label"]),
    ));
    store.attach(&view);

    for i in 0..size {
        let label = if i % 2 == 0 { "alpha" } else { "beta" };
        store.insert(format!("k{}", i), Card {
            label: format!("{}{}", label, i),
        });
    }
    view
}

fn bench_refilter_steady(c: &mut Criterion) {
    let mut group = c.benchmark_group("refilter/steady");

    for size in [10, 100, 1000] {
        let view = populated_view(size);
        view.set_filter_text("alpha");

        // Nothing moves; measures the evaluation sweep alone.
        group.bench_with_input(BenchmarkId::from_parameter(size), &view, |b, view| {
            b.iter(|| view.refilter())
        });
    }

    group.finish();
}

fn bench_refilter_full_swap(c: &mut Criterion) {
    let mut group = c.benchmark_group("refilter/full_swap");

    for size in [10, 100, 1000] {
        let view = populated_view(size);

        // Every toggle moves half the items out and the other half back.
        group.bench_with_input(BenchmarkId::from_parameter(size), &view, |b, view| {
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                view.set_filter_text(if flip { "alpha" } else { "beta" });
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_refilter_steady, bench_refilter_full_swap);
criterion_main!(benches);
