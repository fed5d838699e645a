use criterion::{Criterion, criterion_group, criterion_main};
mod common;

fn bench_safely_modifiable(c: &mut Criterion) {
    let mut group = c.benchmark_group("safely_modifiable");
    group.sample_size(20);

    let (doc, texts) = common::generate_document(200);
    let disjoint = common::word_tails(&doc, &texts);
    let overlapping = common::overlapping_spans(&doc, &texts, 3);

    group.bench_function("disjoint", |b| {
        b.iter(|| std::hint::black_box(disjoint.safely_modifiable(std::hint::black_box(&doc))));
    });

    group.bench_function("overlapping", |b| {
        b.iter(|| std::hint::black_box(overlapping.safely_modifiable(std::hint::black_box(&doc))));
    });

    group.finish();
}

fn bench_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("edits");
    group.sample_size(10);

    let (doc, texts) = common::generate_document(100);
    let overlapping = common::overlapping_spans(&doc, &texts, 3);
    let tails = common::word_tails(&doc, &texts);

    group.bench_function("parents_coalescing", |b| {
        b.iter(|| {
            let mut d = doc.clone();
            std::hint::black_box(overlapping.parents(std::hint::black_box(&mut d)));
        });
    });

    group.bench_function("remove", |b| {
        b.iter(|| {
            let mut d = doc.clone();
            overlapping.safely_modifiable(&d).remove(&mut d);
            std::hint::black_box(&d);
        });
    });

    group.bench_function("wrap", |b| {
        b.iter(|| {
            let mut d = doc.clone();
            let wrappers = tails.safely_modifiable(&d).wrap(&mut d, "<mark>").unwrap();
            std::hint::black_box(wrappers);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_safely_modifiable, bench_edits);
criterion_main!(benches);
