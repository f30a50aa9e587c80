use std::hint::black_box;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use bucket_guard_core::buckets::{LeakyBucket, TokenBucket};
use criterion::{criterion_group, criterion_main, Criterion};

fn uncontended(c: &mut Criterion) {
    let leaky = LeakyBucket::new(1e12, 1e9);
    c.bench_function("leaky_add_now", |b| {
        b.iter(|| black_box(leaky.add_now(black_box(1))))
    });

    let token = TokenBucket::new(1e12, 1e9);
    c.bench_function("token_take_now", |b| {
        b.iter(|| black_box(token.take_now(black_box(1))))
    });

    let fixed = TokenBucket::new(100.0, 20.0);
    let t0 = Instant::now();
    c.bench_function("token_take_rejected", |b| {
        b.iter(|| black_box(fixed.take(black_box(101), t0)))
    });
}

fn contended(c: &mut Criterion) {
    c.bench_function("token_take_4_threads", |b| {
        b.iter_custom(|iters| {
            let bucket = Arc::new(TokenBucket::new(1e12, 1e9));
            let start = Instant::now();
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let bucket = bucket.clone();
                    thread::spawn(move || {
                        for _ in 0..iters {
                            let _ = black_box(bucket.take_now(1));
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
            start.elapsed()
        })
    });
}

criterion_group!(benches, uncontended, contended);
criterion_main!(benches);
