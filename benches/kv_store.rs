//! Throughput benchmarks for the in-memory key-value store.
//!
//! Benchmarks:
//! - Single-threaded get/set
//! - Read-heavy mixed workload across threads (90% reads)
//!
//! Run with:
//! ```bash
//! cargo bench --bench kv_store
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use recordkv::services::kv::KvStore;
use std::hint::black_box;
use std::time::Duration;

fn seeded_store(entries: usize) -> KvStore {
    KvStore::with_entries((0..entries).map(|i| (format!("key_{i}"), format!("value_{i}"))))
}

fn single_thread_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("kv_single_thread");
    let store = seeded_store(1_000);

    group.bench_function("get_hit", |b| {
        b.iter(|| black_box(store.get(black_box("key_500"))));
    });

    group.bench_function("get_miss", |b| {
        b.iter(|| black_box(store.get(black_box("absent"))));
    });

    group.bench_function("set_overwrite", |b| {
        b.iter(|| store.set(black_box("key_500"), black_box("updated")));
    });

    group.finish();
}

fn concurrent_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("kv_concurrent");
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(50);

    for num_threads in [2, 4, 8] {
        group.throughput(Throughput::Elements((num_threads * 100) as u64));
        group.bench_with_input(
            BenchmarkId::new("read_heavy", num_threads),
            &num_threads,
            |b, &num_threads| {
                let store = seeded_store(50);

                b.iter(|| {
                    let handles: Vec<_> = (0..num_threads)
                        .map(|t| {
                            let store = store.clone();
                            std::thread::spawn(move || {
                                for i in 0..100 {
                                    let key = format!("key_{}", (t * 100 + i) % 50);
                                    if i % 10 == 0 {
                                        store.set(key, "written");
                                    } else {
                                        black_box(store.get(&key));
                                    }
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        handle.join().unwrap();
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, single_thread_benchmarks, concurrent_benchmarks);
criterion_main!(benches);
