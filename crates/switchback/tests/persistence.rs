mod common;

use common::{sample_config, MemoryProvider, RecordingLauncher};
use switchback_core::{Engine, LAST_USED_KEY};
use switchback_store::{JsonFileStore, KeyValueStore, MemoryStore};
use tempfile::TempDir;

#[test]
fn test_launch_history_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");
    let mut launcher = RecordingLauncher::default();

    {
        let store = JsonFileStore::open(&path).unwrap();
        let mut engine = Engine::new(sample_config(), MemoryProvider::default(), store);
        engine.launch(&mut launcher, "com.netflix.ninja", 1_000).unwrap();
        engine.launch(&mut launcher, "com.plexapp.android", 2_000).unwrap();
    }

    let store = JsonFileStore::open(&path).unwrap();
    let mut engine = Engine::new(sample_config(), MemoryProvider::default(), store);
    let history = engine.launch_history();
    let snapshot = history.snapshot().unwrap();

    assert_eq!(snapshot.last.as_deref(), Some("com.plexapp.android"));
    assert_eq!(snapshot.previous.as_deref(), Some("com.netflix.ninja"));
    assert_eq!(history.last_used_at("com.netflix.ninja").unwrap(), Some(1_000));
}

#[test]
fn test_exclusions_seeded_once_and_persisted() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");

    {
        let store = JsonFileStore::open(&path).unwrap();
        let mut engine = Engine::new(sample_config(), MemoryProvider::default(), store);
        let mut exclusions = engine.exclusions();
        assert!(exclusions.is_excluded("com.google.android.tvlauncher").unwrap());
        exclusions.remove("com.google.android.tvlauncher").unwrap();
    }

    // A removed default must not come back on the next first read
    let store = JsonFileStore::open(&path).unwrap();
    let mut engine = Engine::new(sample_config(), MemoryProvider::default(), store);
    assert!(!engine
        .exclusions()
        .is_excluded("com.google.android.tvlauncher")
        .unwrap());
}

#[test]
fn test_exclusion_round_trip() {
    let mut engine = Engine::new(sample_config(), MemoryProvider::default(), MemoryStore::new());
    let mut exclusions = engine.exclusions();

    assert!(exclusions.add("com.example.ads").unwrap());
    assert!(exclusions.is_excluded("com.example.ads").unwrap());
    assert!(exclusions.remove("com.example.ads").unwrap());
    assert!(!exclusions.is_excluded("com.example.ads").unwrap());
}

#[test]
fn test_repeated_reads_seed_once() {
    let mut engine = Engine::new(sample_config(), MemoryProvider::default(), MemoryStore::new());
    for _ in 0..5 {
        engine.exclusions().all().unwrap();
    }
    assert_eq!(engine.store().writes(), 1);
}

#[test]
fn test_store_document_is_plain_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");
    let mut launcher = RecordingLauncher::default();

    let store = JsonFileStore::open(&path).unwrap();
    let mut engine = Engine::new(sample_config(), MemoryProvider::default(), store);
    engine.launch(&mut launcher, "com.netflix.ninja", 5).unwrap();

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["lastPackage"], "com.netflix.ninja");
    assert_eq!(doc[LAST_USED_KEY]["com.netflix.ninja"], 5);
    assert!(engine.store().get_text("previousPackage").unwrap().is_none());
}
