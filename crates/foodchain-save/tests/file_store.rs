//! Integration tests for the file-backed save store.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use foodchain_save::{FileSaveStore, SaveError, SaveStore, load_snapshot, save_snapshot};
use foodchain_types::{HealthStatus, InstanceId, OrganismInstance, SessionSnapshot, SpeciesId, TrophicLevel};

fn snapshot(day: u32) -> SessionSnapshot {
    SessionSnapshot {
        current_day: day,
        total_score: 10,
        active: true,
        next_instance_id: InstanceId(2),
        organisms: vec![OrganismInstance {
            id: InstanceId(1),
            species: SpeciesId::new("clover"),
            level: TrophicLevel::Producer,
            slot: 12,
            health: HealthStatus::Healthy,
            day_added: 1,
        }],
        occupied_slots: BTreeMap::from([(12, InstanceId(1))]),
    }
}

#[test]
fn directory_is_created_on_first_write() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested").join("saves");
    let mut store = FileSaveStore::new(&nested);

    save_snapshot(&mut store, "autosave", &snapshot(2)).unwrap();
    assert!(nested.join("autosave.json").exists());
    assert!(!nested.join("autosave.json.tmp").exists());
}

#[test]
fn overwrite_replaces_previous_save() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileSaveStore::new(dir.path());

    save_snapshot(&mut store, "slot", &snapshot(2)).unwrap();
    save_snapshot(&mut store, "slot", &snapshot(5)).unwrap();

    let loaded = load_snapshot(&store, "slot").unwrap().unwrap();
    assert_eq!(loaded.current_day, 5);
}

#[test]
fn missing_file_reads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSaveStore::new(dir.path());
    assert!(load_snapshot(&store, "absent").unwrap().is_none());
}

#[test]
fn delete_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileSaveStore::new(dir.path());
    save_snapshot(&mut store, "slot", &snapshot(1)).unwrap();

    assert!(store.delete("slot").unwrap());
    assert!(!store.delete("slot").unwrap());
    assert!(load_snapshot(&store, "slot").unwrap().is_none());
}

#[test]
fn truncated_file_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("slot.json"), b"{\"version\":1,\"sta").unwrap();
    let store = FileSaveStore::new(dir.path());

    let result = load_snapshot(&store, "slot");
    assert!(matches!(result, Err(SaveError::Corrupt { .. })));
}

#[test]
fn failed_rename_cleans_up_the_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    // A non-empty directory where the save file should go blocks the rename.
    let target = dir.path().join("slot.json");
    std::fs::create_dir(&target).unwrap();
    std::fs::write(target.join("keep"), b"x").unwrap();
    let mut store = FileSaveStore::new(dir.path());

    let result = store.write("slot", b"{}");
    assert!(matches!(result, Err(SaveError::Unavailable { .. })));
    assert!(!dir.path().join("slot.json.tmp").exists());
    assert!(target.is_dir());
}

#[test]
fn unwritable_directory_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let mut store = FileSaveStore::new(blocker.join("saves"));

    let result = store.write("slot", b"{}");
    assert!(matches!(result, Err(SaveError::Unavailable { .. })));
}
