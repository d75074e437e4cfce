//! Benchmarks for the syllable boundary partition search, the system's only
//! combinatorial hot spot.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use monosyl_rs::core::config::PartitionConfig;
use monosyl_rs::phonology::partition::{PartitionScorer, Partitions};
use monosyl_rs::phonology::segmentation::segment;

fn bench_partition_enumeration(c: &mut Criterion) {
    c.bench_function("enumerate 12 phonemes / 4 groups", |b| {
        b.iter(|| {
            let count = Partitions::new(black_box(12), black_box(4)).count();
            black_box(count)
        })
    });
}

fn bench_partition_scoring(c: &mut Criterion) {
    let config = PartitionConfig::default();
    let scorer = PartitionScorer::new(&config);
    // "communication" scale: 12 phonemes into 5 groups.
    let phonemes = segment("kəmjunɪkeɪʃən");
    let reference: Vec<String> = ["com", "mu", "ni", "ca", "tion"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    c.bench_function("score communication-sized word", |b| {
        b.iter(|| {
            let best = scorer.best_partition(black_box(&phonemes), &[], black_box(&reference));
            black_box(best)
        })
    });
}

criterion_group!(benches, bench_partition_enumeration, bench_partition_scoring);
criterion_main!(benches);
