use chrono::{DateTime, Utc};
use rand::Rng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

pub const MAX_WEIGHT: f64 = 8.0;
pub const MISS_MULTIPLIER: f64 = 2.0;
pub const CORRECT_DECAY: f64 = 0.7;

pub const DRILL_QUESTION_CAP: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactKey {
    pub a: u8,
    pub b: u8,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MissRecord {
    pub fact: FactKey,
    #[serde(default)]
    pub wrong_answer: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeightedFact {
    pub a: u8,
    pub b: u8,
    pub answer: u32,
    pub weight: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub a: u8,
    pub b: u8,
    pub answer: u32,
    pub text: String,
}

impl Question {
    fn from_fact(a: u8, b: u8, answer: u32) -> Self {
        Self {
            a,
            b,
            answer,
            text: format!("{a} × {b}"),
        }
    }

    pub fn key(&self) -> FactKey {
        FactKey {
            a: self.a,
            b: self.b,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundMode {
    Single { table: u8 },
    Mixed,
    Boss,
}

fn fact(a: u8, b: u8) -> WeightedFact {
    WeightedFact {
        a,
        b,
        answer: a as u32 * b as u32,
        weight: 1.0,
    }
}

/// Build the weighted pool for one round. Boss pools derive entirely from the
/// miss history (deduplicated, first-occurrence order) and may be empty; the
/// caller keeps boss mode unavailable in that case.
pub fn fact_pool(mode: RoundMode, miss_history: &[MissRecord]) -> Vec<WeightedFact> {
    let mut facts: Vec<WeightedFact> = match mode {
        RoundMode::Boss => {
            let mut seen: Vec<FactKey> = Vec::new();
            let mut pool = Vec::new();
            for miss in miss_history {
                if !seen.contains(&miss.fact) {
                    seen.push(miss.fact);
                    pool.push(fact(miss.fact.a, miss.fact.b));
                }
            }
            return pool;
        }
        RoundMode::Single { table } => (1..=10).map(|b| fact(table, b)).collect(),
        RoundMode::Mixed => (2..=9)
            .flat_map(|a| (1..=10).map(move |b| fact(a, b)))
            .collect(),
    };

    // One-time seeding from history: repeat offenders start heavy.
    if !miss_history.is_empty() {
        for f in &mut facts {
            let count = miss_history
                .iter()
                .filter(|m| m.fact.a == f.a && m.fact.b == f.b)
                .count();
            if count > 0 {
                f.weight = MISS_MULTIPLIER.powi(count as i32).min(MAX_WEIGHT);
            }
        }
    }

    facts
}

/// Weight-proportional sampling. Falls back to the last fact if rounding
/// exhausts the pool without a hit.
///
/// Panics on an empty pool; every mode except boss produces a fixed non-empty
/// pool, and boss rounds with no history never start.
pub fn pick_question(pool: &[WeightedFact], rng: &mut SmallRng) -> Question {
    let total: f64 = pool.iter().map(|f| f.weight).sum();
    let mut roll = rng.gen_range(0.0..total);
    for f in pool {
        roll -= f.weight;
        if roll <= 0.0 {
            return Question::from_fact(f.a, f.b, f.answer);
        }
    }
    let last = &pool[pool.len() - 1];
    Question::from_fact(last.a, last.b, last.answer)
}

/// Returns a new pool with only the matching fact's weight changed.
pub fn adjust_weights(pool: &[WeightedFact], key: FactKey, is_correct: bool) -> Vec<WeightedFact> {
    pool.iter()
        .map(|f| {
            if f.a == key.a && f.b == key.b {
                let weight = if is_correct {
                    (f.weight * CORRECT_DECAY).max(1.0)
                } else {
                    (f.weight * MISS_MULTIPLIER).min(MAX_WEIGHT)
                };
                WeightedFact { weight, ..f.clone() }
            } else {
                f.clone()
            }
        })
        .collect()
}

/// Deduplicate a round's misses by fact, preserving first-occurrence order,
/// capped at `max`.
pub fn miss_drill_questions(round_misses: &[Question], max: usize) -> Vec<Question> {
    let mut seen: Vec<FactKey> = Vec::new();
    let mut unique = Vec::new();
    for miss in round_misses {
        if !seen.contains(&miss.key()) {
            seen.push(miss.key());
            unique.push(miss.clone());
        }
    }
    unique.truncate(max);
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn miss(a: u8, b: u8) -> MissRecord {
        MissRecord {
            fact: FactKey { a, b },
            wrong_answer: 0,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn single_pool_covers_one_table() {
        let pool = fact_pool(RoundMode::Single { table: 7 }, &[]);
        assert_eq!(pool.len(), 10);
        for (i, f) in pool.iter().enumerate() {
            assert_eq!(f.a, 7);
            assert_eq!(f.b, i as u8 + 1);
            assert_eq!(f.answer, 7 * (i as u32 + 1));
            assert_eq!(f.weight, 1.0);
        }
    }

    #[test]
    fn mixed_pool_has_eighty_unique_facts() {
        let pool = fact_pool(RoundMode::Mixed, &[]);
        assert_eq!(pool.len(), 80);
        let mut keys: Vec<(u8, u8)> = pool.iter().map(|f| (f.a, f.b)).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 80);
        assert!(pool.iter().all(|f| (2..=9).contains(&f.a)));
        assert!(pool.iter().all(|f| (1..=10).contains(&f.b)));
    }

    #[test]
    fn boss_pool_dedups_history_in_order() {
        let history = vec![miss(7, 8), miss(3, 4), miss(7, 8), miss(6, 6)];
        let pool = fact_pool(RoundMode::Boss, &history);
        let keys: Vec<(u8, u8)> = pool.iter().map(|f| (f.a, f.b)).collect();
        assert_eq!(keys, vec![(7, 8), (3, 4), (6, 6)]);
    }

    #[test]
    fn boss_pool_empty_without_history() {
        assert!(fact_pool(RoundMode::Boss, &[]).is_empty());
    }

    #[test]
    fn seeding_doubles_per_miss_capped_at_max() {
        let history = vec![
            miss(7, 8),
            miss(7, 8),
            miss(7, 9),
            miss(7, 8),
            miss(7, 8),
        ];
        // 7x8 missed 4 times -> 2^4 = 16, capped at 8. 7x9 missed once -> 2.
        let pool = fact_pool(RoundMode::Single { table: 7 }, &history);
        let w78 = pool.iter().find(|f| f.b == 8).unwrap().weight;
        let w79 = pool.iter().find(|f| f.b == 9).unwrap().weight;
        let w71 = pool.iter().find(|f| f.b == 1).unwrap().weight;
        assert_eq!(w78, MAX_WEIGHT);
        assert_eq!(w79, 2.0);
        assert_eq!(w71, 1.0);
    }

    #[test]
    fn heavy_fact_dominates_selection() {
        let pool = vec![
            WeightedFact { a: 7, b: 8, answer: 56, weight: 8.0 },
            WeightedFact { a: 2, b: 2, answer: 4, weight: 1.0 },
        ];
        let mut rng = SmallRng::seed_from_u64(42);
        let heavy = (0..1000)
            .filter(|_| pick_question(&pool, &mut rng).a == 7)
            .count();
        // Expected ~889 of 1000; allow a generous statistical margin.
        assert!(heavy > 700, "heavy fact drawn only {heavy}/1000 times");
    }

    #[test]
    fn pick_never_fails_on_single_fact_pool() {
        let pool = vec![WeightedFact { a: 3, b: 3, answer: 9, weight: 1.0 }];
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(pick_question(&pool, &mut rng).answer, 9);
        }
    }

    #[test]
    fn wrong_answer_doubles_weight_capped() {
        let pool = fact_pool(RoundMode::Single { table: 6 }, &[]);
        let key = FactKey { a: 6, b: 4 };
        let mut adjusted = adjust_weights(&pool, key, false);
        assert_eq!(adjusted.iter().find(|f| f.b == 4).unwrap().weight, 2.0);
        for _ in 0..5 {
            adjusted = adjust_weights(&adjusted, key, false);
        }
        assert_eq!(adjusted.iter().find(|f| f.b == 4).unwrap().weight, MAX_WEIGHT);
    }

    #[test]
    fn correct_answer_decays_toward_floor() {
        let mut pool = fact_pool(RoundMode::Single { table: 6 }, &[]);
        pool[3].weight = 2.0;
        let key = FactKey { a: 6, b: 4 };
        let adjusted = adjust_weights(&pool, key, true);
        assert_eq!(adjusted.iter().find(|f| f.b == 4).unwrap().weight, 1.4);
        let again = adjust_weights(&adjusted, key, true);
        // 1.4 * 0.7 = 0.98 floors at 1.0
        assert_eq!(again.iter().find(|f| f.b == 4).unwrap().weight, 1.0);
    }

    #[test]
    fn adjust_leaves_other_facts_untouched() {
        let pool = fact_pool(RoundMode::Mixed, &[]);
        let adjusted = adjust_weights(&pool, FactKey { a: 5, b: 5 }, false);
        for (before, after) in pool.iter().zip(&adjusted) {
            if before.a == 5 && before.b == 5 {
                assert_eq!(after.weight, 2.0);
            } else {
                assert_eq!(before, after);
            }
        }
        // Original pool untouched.
        assert!(pool.iter().all(|f| f.weight == 1.0));
    }

    #[test]
    fn drill_questions_dedup_preserve_order_and_cap() {
        let q = |a: u8, b: u8| Question::from_fact(a, b, a as u32 * b as u32);
        let misses = vec![q(9, 9), q(3, 4), q(9, 9), q(5, 6), q(3, 4)];
        let drill = miss_drill_questions(&misses, DRILL_QUESTION_CAP);
        let keys: Vec<(u8, u8)> = drill.iter().map(|d| (d.a, d.b)).collect();
        assert_eq!(keys, vec![(9, 9), (3, 4), (5, 6)]);

        let many: Vec<Question> = (1..=10).flat_map(|a| (1..=10).map(move |b| q(a, b))).collect();
        assert_eq!(miss_drill_questions(&many, DRILL_QUESTION_CAP).len(), 10);
    }

    #[test]
    fn question_text_uses_multiplication_sign() {
        let pool = fact_pool(RoundMode::Single { table: 4 }, &[]);
        let mut rng = SmallRng::seed_from_u64(1);
        let q = pick_question(&pool, &mut rng);
        assert_eq!(q.text, format!("{} × {}", q.a, q.b));
    }
}
