//! Lanai Benchmarks
//!
//! Benchmarks for the trie operations, implemented with the Criterion
//! framework.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode, Throughput,
};
use std::time::Duration;

use lanai_lib::bench::generate_words;
use lanai_lib::data_structures::lanai_trie::{BulkInsertOptions, LanaiTrie};

/// Benchmark insertion, sequential and batched
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("lanai_trie_insert");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    for size in [1_000, 10_000, 100_000].iter() {
        let words = generate_words(*size, 42);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &words, |b, words| {
            b.iter(|| {
                let mut trie = LanaiTrie::new();
                for word in words {
                    trie.insert(black_box(word));
                }
                trie
            });
        });

        group.bench_with_input(BenchmarkId::new("insert_all", size), &words, |b, words| {
            let options = BulkInsertOptions::new().with_chunk_size(1_000);
            b.iter(|| {
                let mut trie = LanaiTrie::new();
                trie.insert_all(black_box(words), &options).unwrap();
                trie
            });
        });
    }

    group.finish();
}

/// Benchmark the query operations against a fixed dictionary
fn bench_queries(c: &mut Criterion) {
    let words = generate_words(50_000, 7);
    let trie: LanaiTrie = words.iter().collect();
    let sample = &words[words.len() / 2];

    let mut group = c.benchmark_group("lanai_trie_query");
    group.measurement_time(Duration::from_secs(2));

    group.bench_function("search", |b| b.iter(|| trie.search(black_box(sample))));
    group.bench_function("autocomplete", |b| {
        b.iter(|| trie.autocomplete(black_box(&sample[..2])))
    });

    for distance in [1usize, 2] {
        group.bench_with_input(BenchmarkId::new("fuzzy", distance), &distance, |b, &d| {
            b.iter(|| trie.fuzzy_search(black_box(sample), d))
        });
    }

    group.bench_function("wildcard", |b| {
        b.iter(|| trie.wildcard_search(black_box("a.c..")))
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_queries);
criterion_main!(benches);
