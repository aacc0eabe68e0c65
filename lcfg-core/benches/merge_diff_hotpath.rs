use criterion::{criterion_group, criterion_main, Criterion};
use lcfg_core::{Component, DiffComponent, Resource};
use std::hint::black_box;

fn synthetic_component(name: &str, offset: i64, priority_bump: i64) -> Component {
    let c = Component::new(name).expect("valid component name");
    for i in 0..200 {
        let r = Resource::new(&format!("res_{i}")).expect("valid resource name");
        r.set_value(&format!("value_{}", i + offset)).expect("value validates");
        r.set_priority(i % 5 + priority_bump);
        c.append(r);
    }
    c
}

fn bench_merge_component(c: &mut Criterion) {
    let base = synthetic_component("net", 0, 0);
    // Strictly higher priority so every resource merges via REPLACED, not CONFLICT.
    let incoming = synthetic_component("net", 1, 10);

    c.bench_function("component/merge_component", |b| {
        b.iter(|| {
            let target = synthetic_component("net", 0, 0);
            let _ = target.merge_component(black_box(&incoming));
            black_box(target.len());
        });
    });

    black_box(base.len());
}

fn bench_diff_component(c: &mut Criterion) {
    let old = synthetic_component("net", 0, 0);
    let new = synthetic_component("net", 1, 0);

    c.bench_function("component/diff_component", |b| {
        b.iter(|| {
            let diff = DiffComponent::diff(black_box(&old), black_box(&new));
            black_box(diff.aggregate());
        });
    });
}

fn bench_quickdiff_component(c: &mut Criterion) {
    let old = synthetic_component("net", 0, 0);
    let new = synthetic_component("net", 1, 0);

    c.bench_function("component/quickdiff_component", |b| {
        b.iter(|| {
            black_box(DiffComponent::quickdiff(black_box(&old), black_box(&new)));
        });
    });
}

criterion_group!(benches, bench_merge_component, bench_diff_component, bench_quickdiff_component);
criterion_main!(benches);
