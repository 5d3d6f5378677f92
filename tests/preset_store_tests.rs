// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for preset persistence

use fill_light::constants::PRESETS_KEY;
use fill_light::errors::PresetError;
use fill_light::presets::{FileStore, LoadOutcome, MemoryStore, ScalarStore};
use fill_light::{FillColor, PresetStore};
use uuid::Uuid;

#[test]
fn test_warm_preset_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = PresetStore::new(FileStore::new(dir.path()));
    store
        .save(FillColor::new(1.0, 0.5, 0.2, 1.0), 0.8)
        .unwrap();

    assert_eq!(store.len(), 1);
    let saved = store.presets()[0].clone();
    assert_eq!(
        (saved.red, saved.green, saved.blue, saved.alpha, saved.brightness),
        (1.0, 0.5, 0.2, 1.0, 0.8)
    );
    assert_ne!(saved.id(), Uuid::nil());

    let mut reloaded = PresetStore::new(FileStore::new(dir.path()));
    assert_eq!(reloaded.load(), LoadOutcome::Loaded(1));
    assert_eq!(reloaded.presets(), &[saved]);
}

#[test]
fn test_round_trip_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = PresetStore::new(FileStore::new(dir.path()));
    for step in 0..5 {
        let value = step as f64 / 4.0;
        store.save(FillColor::new(value, 1.0 - value, 0.5, 1.0), value).unwrap();
    }

    let mut reloaded = PresetStore::new(FileStore::new(dir.path()));
    assert_eq!(reloaded.load(), LoadOutcome::Loaded(5));
    assert_eq!(reloaded.presets(), store.presets());
}

#[test]
fn test_delete_keeps_remaining_order() {
    let mut store = PresetStore::new(MemoryStore::new());
    store.save(FillColor::new(1.0, 0.0, 0.0, 1.0), 1.0).unwrap();
    store.save(FillColor::new(0.0, 1.0, 0.0, 1.0), 1.0).unwrap();
    let first = store.presets()[0].id();
    let second = store.presets()[1].id();

    store.delete(first).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.presets()[0].id(), second);
}

#[test]
fn test_delete_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = PresetStore::new(FileStore::new(dir.path()));
    store.save(FillColor::new(1.0, 0.0, 0.0, 1.0), 0.6).unwrap();
    store.save(FillColor::new(0.0, 0.0, 1.0, 1.0), 0.9).unwrap();
    let first = store.presets()[0].id();
    let second = store.presets()[1].clone();

    store.delete(first).unwrap();

    let mut reloaded = PresetStore::new(FileStore::new(dir.path()));
    assert_eq!(reloaded.load(), LoadOutcome::Loaded(1));
    assert_eq!(reloaded.presets(), &[second]);
}

#[test]
fn test_delete_nonexistent_changes_nothing() {
    let mut store = PresetStore::new(MemoryStore::new());
    store.save(FillColor::default(), 1.0).unwrap();
    let before = store.presets().to_vec();

    store.delete(Uuid::new_v4()).unwrap();

    assert_eq!(store.presets(), before.as_slice());
}

#[test]
fn test_corrupt_blob_loads_as_empty() {
    let mut storage = MemoryStore::new();
    storage.set_data(PRESETS_KEY, b"{\"not\": \"a list\"}").unwrap();

    let mut store = PresetStore::new(storage);
    assert!(matches!(
        store.load(),
        LoadOutcome::Corrupt(PresetError::Decode(_))
    ));
    assert!(store.is_empty());
}

#[test]
fn test_apply_is_idempotent() {
    let mut store = PresetStore::new(MemoryStore::new());
    store.save(FillColor::new(0.9, 0.8, 0.7, 0.6), 0.4).unwrap();
    let preset = store.presets()[0].clone();

    let first = store.apply(&preset);
    let second = store.apply(&preset);

    assert_eq!(first, second);
    assert_eq!(first, (FillColor::new(0.9, 0.8, 0.7, 0.6), 0.4));
    assert_eq!(store.len(), 1);
}
