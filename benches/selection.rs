use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use floe::engine::facts::{FactKey, MissRecord, RoundMode, adjust_weights, fact_pool, pick_question};

fn bench_fact_pool(c: &mut Criterion) {
    let history: Vec<MissRecord> = (0..50)
        .map(|i| MissRecord {
            fact: FactKey {
                a: 2 + (i % 8) as u8,
                b: 1 + (i % 10) as u8,
            },
            wrong_answer: 0,
            timestamp: chrono::Utc::now(),
        })
        .collect();

    c.bench_function("fact_pool_mixed_seeded", |b| {
        b.iter(|| fact_pool(RoundMode::Mixed, black_box(&history)))
    });

    c.bench_function("fact_pool_boss", |b| {
        b.iter(|| fact_pool(RoundMode::Boss, black_box(&history)))
    });
}

fn bench_pick_question(c: &mut Criterion) {
    let pool = fact_pool(RoundMode::Mixed, &[]);
    let mut rng = SmallRng::seed_from_u64(42);

    c.bench_function("pick_question_mixed", |b| {
        b.iter(|| pick_question(black_box(&pool), &mut rng))
    });
}

fn bench_adjust_weights(c: &mut Criterion) {
    let pool = fact_pool(RoundMode::Mixed, &[]);
    let key = FactKey { a: 7, b: 8 };

    c.bench_function("adjust_weights_mixed", |b| {
        b.iter(|| adjust_weights(black_box(&pool), key, false))
    });
}

criterion_group!(benches, bench_fact_pool, bench_pick_question, bench_adjust_weights);
criterion_main!(benches);
