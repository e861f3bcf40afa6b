use std::fs;

use tempfile::TempDir;

use chrono::Utc;

use floe::engine::difficulty::DifficultyState;
use floe::engine::facts::{FactKey, MissRecord};
use floe::store::kv::{FileStore, KeyValueStore};
use floe::store::schema::{CosmeticCategory, MathSection, MultiplicationData, SessionData};
use floe::store::session_store::{SESSION_KEY, SessionStore};

fn file_store(dir: &TempDir) -> FileStore {
    FileStore::with_base_dir(dir.path().to_path_buf()).unwrap()
}

#[test]
fn session_survives_process_restart() {
    let dir = TempDir::new().unwrap();

    {
        let mut store = SessionStore::new(Box::new(file_store(&dir)));
        store.set_user_name("Nina").unwrap();
        store.add_tokens(9).unwrap();
        store.purchase("snowflake-scarf", 4).unwrap();
        store.equip(CosmeticCategory::Scarf, "snowflake-scarf").unwrap();
        store
            .set_section(
                MathSection::Multiplication,
                DifficultyState {
                    level: 2,
                    consecutive_correct: 3,
                    consecutive_wrong: 0,
                },
            )
            .unwrap();
    }

    // A second store over the same directory sees everything.
    let store = SessionStore::new(Box::new(file_store(&dir)));
    let data = store.data();
    assert_eq!(data.user_name, "Nina");
    assert_eq!(data.tokens, 5);
    assert_eq!(data.purchased_items, vec!["snowflake-scarf"]);
    assert_eq!(data.equipped.scarf.as_deref(), Some("snowflake-scarf"));
    assert_eq!(data.sections.multiplication.level, 2);
}

#[test]
fn corrupt_record_on_disk_reinitializes_to_defaults() {
    let dir = TempDir::new().unwrap();
    {
        let mut kv = file_store(&dir);
        kv.set(SESSION_KEY, "{\"tokens\": \"not a number\"").unwrap();
    }

    let store = SessionStore::new(Box::new(file_store(&dir)));
    assert_eq!(store.data().tokens, 0);
    assert_eq!(store.data().sections.addition.level, 1);
}

#[test]
fn record_from_an_older_build_backfills_new_fields() {
    let dir = TempDir::new().unwrap();
    {
        // No area-perimeter section, no accessory slot, no multiplication
        // block: the shape an early release would have written.
        let old = r#"{
            "user_name": "Pip",
            "tokens": 4,
            "purchased_items": [],
            "equipped": { "hat": null, "scarf": null, "background": "northern-lights" },
            "sections": {
                "addition": { "level": 2, "consecutive_correct": 0, "consecutive_wrong": 1 },
                "subtraction": { "level": 1, "consecutive_correct": 0, "consecutive_wrong": 0 },
                "multiplication": { "level": 1, "consecutive_correct": 4, "consecutive_wrong": 0 },
                "skip-counting": { "level": 1, "consecutive_correct": 0, "consecutive_wrong": 0 }
            }
        }"#;
        let mut kv = file_store(&dir);
        kv.set(SESSION_KEY, old).unwrap();
    }

    let store = SessionStore::new(Box::new(file_store(&dir)));
    let data = store.data();
    assert_eq!(data.user_name, "Pip");
    assert_eq!(data.sections.addition.level, 2);
    assert_eq!(data.sections.area_perimeter.level, 1);
    assert!(data.equipped.accessory.is_none());
    assert_eq!(
        data.equipped.background.as_deref(),
        Some("northern-lights")
    );
    assert_eq!(data.multiplication.best_scores.boss, 0);
    assert!(data.multiplication.miss_history.is_empty());
}

#[test]
fn purchase_guard_holds_across_the_file_store() {
    let dir = TempDir::new().unwrap();
    let mut store = SessionStore::new(Box::new(file_store(&dir)));

    store.add_tokens(3).unwrap();
    store.purchase("polar-bear-hat", 8).unwrap();
    assert_eq!(store.data().tokens, 3);
    assert!(store.data().purchased_items.is_empty());

    store.add_tokens(5).unwrap();
    store.purchase("polar-bear-hat", 8).unwrap();
    assert_eq!(store.data().tokens, 0);
    assert_eq!(store.data().purchased_items, vec!["polar-bear-hat"]);
}

#[test]
fn multiplication_data_round_trips_through_disk() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = SessionStore::new(Box::new(file_store(&dir)));
        let mut mult = MultiplicationData::default();
        mult.best_scores.single.insert(7, 18);
        mult.miss_history.push(MissRecord {
            fact: FactKey { a: 7, b: 8 },
            wrong_answer: 54,
            timestamp: Utc::now(),
        });
        store.set_multiplication(mult).unwrap();
    }

    let store = SessionStore::new(Box::new(file_store(&dir)));
    let mult = &store.data().multiplication;
    assert_eq!(mult.best_scores.single[&7], 18);
    assert_eq!(mult.miss_history.len(), 1);
    assert_eq!(mult.miss_history[0].fact, FactKey { a: 7, b: 8 });
    assert_eq!(mult.miss_history[0].wrong_answer, 54);
}

#[test]
fn reset_removes_the_record_file() {
    let dir = TempDir::new().unwrap();
    let mut store = SessionStore::new(Box::new(file_store(&dir)));
    store.add_tokens(2).unwrap();
    assert!(dir.path().join("session.json").exists());

    store.reset().unwrap();
    assert!(!dir.path().join("session.json").exists());
    assert_eq!(store.data().tokens, 0);
}

#[test]
fn persisted_layout_matches_the_documented_shape() {
    let dir = TempDir::new().unwrap();
    let mut store = SessionStore::new(Box::new(file_store(&dir)));
    store.add_tokens(1).unwrap();

    let raw = fs::read_to_string(dir.path().join("session.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value.get("user_name").is_some());
    assert!(value.get("tokens").is_some());
    assert!(value["equipped"].get("hat").is_some());
    assert!(value["sections"].get("skip-counting").is_some());
    assert!(value["sections"].get("area-perimeter").is_some());
    assert!(value["multiplication"].get("best_scores").is_some());
    assert!(value["multiplication"].get("miss_history").is_some());

    // Round-trips through the public schema type.
    let parsed: SessionData = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.tokens, 1);
}
