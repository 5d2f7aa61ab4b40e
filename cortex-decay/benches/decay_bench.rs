use chrono::{Duration, Utc};
use cortex_core::models::{Engram, EngramMetadata};
use cortex_decay::{DecayContext, DecayEngine};
use criterion::{criterion_group, criterion_main, Criterion};

fn make_engrams(count: usize) -> Vec<Engram> {
    (0..count)
        .map(|i| {
            let mut e = Engram::new(format!("eng-{i:04}"), "Test content", EngramMetadata::new("bench"));
            e.last_used = Utc::now() - Duration::days((i % 90) as i64);
            e.usage_count = (i * 3) as u64;
            e
        })
        .collect()
}

fn decay_benchmarks(c: &mut Criterion) {
    let engine = DecayEngine::new();
    let ctx = DecayContext::default();

    let mut engrams_1k = make_engrams(1000);
    c.bench_function("decay_1k_engrams", |b| {
        b.iter(|| engine.process_batch(&mut engrams_1k, &ctx))
    });

    let mut engrams_10k = make_engrams(10_000);
    c.bench_function("decay_10k_engrams", |b| {
        b.iter(|| engine.process_batch(&mut engrams_10k, &ctx))
    });
}

criterion_group!(benches, decay_benchmarks);
criterion_main!(benches);
