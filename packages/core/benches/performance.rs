//! Performance benchmarks for the notes pane query pipeline
//!
//! Run with: `cargo bench -p leonardo-core`
//!
//! These benchmarks measure the paths hit on every keystroke and toggle:
//! - Text + tag search over a large store
//! - Full search → sort → pin pipeline per sort criterion
//! - View projection (cards, tag preview, selection)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use leonardo_core::{run_pipeline, search, NewNote, NoteFlag, NoteQuery, NoteStore, SortCriterion};
use std::collections::BTreeSet;

const TAG_POOL: [&str; 8] = [
    "AI", "UI", "React", "Design", "Canvas", "Leonardo", "research", "bug",
];

/// Generate a store with N notes, every fifth pinned
fn generate_store(note_count: usize) -> NoteStore {
    let mut store = NoteStore::new();
    for i in 0..note_count {
        let tags = [TAG_POOL[i % TAG_POOL.len()], TAG_POOL[(i * 3 + 1) % TAG_POOL.len()]];
        let id = store.create_note(
            NewNote::new(
                format!("Note {} about {}", i, tags[0]),
                format!(
                    "This is content paragraph {} with some descriptive text about {}.",
                    i, tags[1]
                ),
            )
            .with_tags(tags),
        );
        if i % 5 == 0 {
            store.toggle_flag(&id, NoteFlag::Pinned);
        }
    }
    store
}

fn bench_search(c: &mut Criterion) {
    let store = generate_store(1000);
    let active: BTreeSet<String> = ["React", "bug"].iter().map(|s| s.to_string()).collect();

    c.bench_function("search_text_1000", |b| {
        b.iter(|| search(black_box(store.notes()), black_box("descriptive"), &BTreeSet::new()))
    });

    c.bench_function("search_text_and_tags_1000", |b| {
        b.iter(|| search(black_box(store.notes()), black_box("about"), black_box(&active)))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let store = generate_store(1000);
    let query = NoteQuery::text("content").with_tags(["AI", "Design"]);

    let mut group = c.benchmark_group("pipeline_1000");
    for criterion in [SortCriterion::Updated, SortCriterion::Created, SortCriterion::Title] {
        group.bench_with_input(
            BenchmarkId::from_parameter(criterion),
            &criterion,
            |b, &criterion| b.iter(|| run_pipeline(black_box(store.notes()), &query, criterion)),
        );
    }
    group.finish();
}

fn bench_view(c: &mut Criterion) {
    let mut store = generate_store(1000);
    if let Some(id) = store.notes().get(500).map(|n| n.id.clone()) {
        store.select_note(id);
    }
    let query = NoteQuery::new();

    c.bench_function("view_projection_1000", |b| {
        b.iter(|| store.view(black_box(&query), SortCriterion::Updated))
    });
}

criterion_group!(benches, bench_search, bench_pipeline, bench_view);
criterion_main!(benches);
