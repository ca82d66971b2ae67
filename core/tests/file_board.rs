//! Board behavior against the on-disk storage backend

use queuezero_core::{
    Board, FileStorage, KeyValueStorage, ManualClock, STORAGE_KEY, Severity, seed_locations,
};
use tempfile::TempDir;

const T0: i64 = 1_700_000_000_000;

#[test]
fn test_reports_survive_restart() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::in_dir(dir.path(), "storage.json");

    {
        let mut board = Board::open(storage.clone(), ManualClock::new(T0));
        board.report(1, 2).unwrap();
        board.report(1, 4).unwrap();
    }

    let board = Board::open(storage, ManualClock::new(T0 + 5 * 60_000));
    assert_eq!(board.locations()[1].waits, vec![18, 2, 4]);

    let row = &board.summaries()[1];
    assert_eq!(row.average, 8);
    assert_eq!(row.severity, Severity::Low);
    assert_eq!(row.staleness, "Updated 5 minutes ago");
}

#[test]
fn test_stored_format_is_plain_location_array() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::in_dir(dir.path(), "storage.json");
    let board = Board::open(storage, ManualClock::new(T0));

    let raw = board.storage().get_item(STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value[0];
    assert_eq!(first["name"], "Coffee Shop");
    assert_eq!(first["waits"], serde_json::json!([5]));
    assert_eq!(first["lastUpdated"], T0);
    assert_eq!(first.as_object().unwrap().len(), 3);
}

#[test]
fn test_corrupt_slot_is_replaced_by_seed() {
    let dir = TempDir::new().unwrap();
    let mut storage = FileStorage::in_dir(dir.path(), "storage.json");
    storage
        .set_item(STORAGE_KEY, r#"[{"name":"Gym","waits":"lots","lastUpdated":1}]"#)
        .unwrap();

    let board = Board::open(storage.clone(), ManualClock::new(T0));
    assert_eq!(board.locations(), seed_locations(T0).as_slice());

    let reloaded = Board::open(storage, ManualClock::new(T0 + 1));
    assert_eq!(reloaded.locations(), seed_locations(T0).as_slice());
}

#[test]
fn test_unreadable_storage_file_falls_back_to_seed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "[1, 2").unwrap();

    let board = Board::open(FileStorage::new(&path), ManualClock::new(T0));
    assert_eq!(board.locations(), seed_locations(T0).as_slice());

    // Write-back on open replaced the broken file
    let storage = FileStorage::new(&path);
    assert!(storage.get_item(STORAGE_KEY).unwrap().is_some());
}
