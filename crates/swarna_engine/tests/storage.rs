use std::collections::BTreeMap;
use std::fs;

use swarna_core::{
    keys, AlgorithmMode, QueryController, SearchPhase, SessionState, SessionStore, TabStorage,
};
use swarna_engine::FileTabStorage;
use tempfile::TempDir;

#[test]
fn creates_missing_state_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("state");
    assert!(!dir.exists());

    let mut storage = FileTabStorage::open(&dir, "1").unwrap();
    storage.set(keys::QUERY, "batik".to_string()).unwrap();

    assert!(dir.is_dir());
    assert!(storage.path().is_file());
}

#[test]
fn writes_reach_the_file() {
    let temp = TempDir::new().unwrap();
    let mut storage = FileTabStorage::open(temp.path(), "42").unwrap();
    storage.set(keys::QUERY, "tari saman".to_string()).unwrap();
    storage.set(keys::PAGE_INDEX, "2".to_string()).unwrap();
    storage.remove(keys::PAGE_INDEX).unwrap();

    let on_disk: BTreeMap<String, String> =
        ron::from_str(&fs::read_to_string(storage.path()).unwrap()).unwrap();
    assert_eq!(on_disk.get(keys::QUERY).map(String::as_str), Some("tari saman"));
    assert_eq!(on_disk.get(keys::PAGE_INDEX), None);
    assert_eq!(storage.get(keys::QUERY).as_deref(), Some("tari saman"));
}

#[test]
fn leftover_file_is_not_restored() {
    let temp = TempDir::new().unwrap();
    {
        // A tab that crashed with a detail page open.
        let mut crashed = FileTabStorage::open(temp.path(), "42").unwrap();
        crashed.set(keys::QUERY, "kecak".to_string()).unwrap();
        crashed.set(keys::HAS_SEARCHED, "true".to_string()).unwrap();
        crashed.set(keys::RESTORE_FLAG, "true".to_string()).unwrap();
    }
    assert!(temp.path().join("tab-42.ron").is_file());

    let storage = FileTabStorage::open(temp.path(), "42").unwrap();
    assert!(!storage.path().exists());
    assert_eq!(storage.get(keys::RESTORE_FLAG), None);
    assert_eq!(storage.get(keys::QUERY), None);

    let controller = QueryController::mount(storage);
    assert_eq!(controller.state().session(), &SessionState::default());
    assert_eq!(controller.state().phase(), SearchPhase::Idle);
}

#[test]
fn failed_batch_keeps_previous_session() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("state");
    let mut store = SessionStore::new(FileTabStorage::open(&dir, "5").unwrap());
    let first = SessionState {
        query: "angklung".to_string(),
        has_searched: true,
        ..SessionState::default()
    };
    store.save(&first).unwrap();

    fs::remove_dir_all(&dir).unwrap();
    let second = SessionState {
        query: "batik".to_string(),
        page_index: 1,
        ..first.clone()
    };

    assert!(store.save(&second).is_err());
    assert_eq!(store.storage().get(keys::QUERY).as_deref(), Some("angklung"));
    assert_eq!(store.storage().get(keys::PAGE_INDEX).as_deref(), Some("0"));
}

#[test]
fn discard_removes_the_file() {
    let temp = TempDir::new().unwrap();
    let mut storage = FileTabStorage::open(temp.path(), "7").unwrap();
    storage.set(keys::RESTORE_FLAG, "true".to_string()).unwrap();
    let path = storage.path().to_path_buf();

    storage.discard().unwrap();

    assert!(!path.exists());
}

#[test]
fn unreadable_file_starts_empty() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("tab-9.ron"), "{ not ron").unwrap();

    let storage = FileTabStorage::open(temp.path(), "9").unwrap();

    assert_eq!(storage.get(keys::QUERY), None);
}

#[test]
fn file_path_instead_of_dir_is_an_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    assert!(FileTabStorage::open(&file_path, "1").is_err());
}

#[test]
fn session_round_trips_through_file_storage() {
    let temp = TempDir::new().unwrap();
    let mut controller = QueryController::mount(FileTabStorage::open(temp.path(), "1").unwrap());
    controller.switch_mode(AlgorithmMode::Tfidf);
    controller.submit("batik");

    let mut store = SessionStore::new(controller.unmount());
    let loaded: SessionState = store.load();
    assert_eq!(loaded.query, "batik");
    assert_eq!(loaded.active_mode, AlgorithmMode::Tfidf);
    assert_eq!(loaded.page_index, 0);
}
