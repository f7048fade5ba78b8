//! Saved-game files and the SQLite catalogue.

use chrono::{Duration, TimeZone, Utc};
use savegame_core::{
    game::StandardBoardProjector,
    sample::sample_game,
    store::{self, saved_game_file_name, SaveStore},
    GameState, SnapshotModel, MODEL_VERSION,
};
use std::path::PathBuf;

fn model(seed: u64) -> SnapshotModel {
    let started = Utc.with_ymd_and_hms(2024, 1, 10, 19, 0, 0).unwrap();
    let game = sample_game(seed, 4, started);
    SnapshotModel::capture(&game, &StandardBoardProjector).expect("capture")
}

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("savegame-test-{}", uuid::Uuid::new_v4()))
}

fn migrated_store() -> SaveStore {
    let store = SaveStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store
}

#[test]
fn file_round_trip() {
    let dir = scratch_dir();
    let saved = model(3);

    for pretty in [true, false] {
        let path = store::save_to_file(&saved, &dir, pretty).expect("save");
        assert!(path.ends_with("sample-3.game.json"), "path: {}", path.display());
        let loaded = store::load_from_file(&path).expect("load");
        assert_eq!(loaded, saved, "pretty={pretty}");
    }

    std::fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn file_names_are_sanitized() {
    assert_eq!(saved_game_file_name("Friday night: 4p"), "Friday_night__4p.game.json");
    assert_eq!(saved_game_file_name("../etc/passwd"), "___etc_passwd.game.json");
}

#[test]
fn loading_a_missing_file_is_an_io_error() {
    let err = store::load_from_file(&scratch_dir().join("nope.game.json")).unwrap_err();
    assert!(matches!(err, savegame_core::SaveGameError::Io(_)), "got {err}");
}

#[test]
fn catalogue_round_trip() {
    let store = migrated_store();
    let saved = model(11);
    let at = Utc.with_ymd_and_hms(2024, 1, 10, 21, 0, 0).unwrap();

    let id = store.insert_saved_game(&saved, at).expect("insert");
    let loaded = store.load_saved_game(&id).expect("query").expect("row exists");
    assert_eq!(loaded, saved);

    let rows = store.list_saved_games().expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);
    assert_eq!(rows[0].game_name, "sample-11");
    assert_eq!(rows[0].model_version, MODEL_VERSION);
    assert_eq!(rows[0].game_state, saved.game_state);
    assert_eq!(rows[0].saved_at, at);
    assert_eq!(rows[0].size_bytes, saved.to_json().expect("json").len());
}

#[test]
fn latest_save_wins() {
    let store = migrated_store();
    let at = Utc.with_ymd_and_hms(2024, 1, 10, 21, 0, 0).unwrap();

    let mut early = model(5);
    early.game_state = GameState::ROLL_OR_CARD;
    early.current_dice = 0;
    let mut late = early.clone();
    late.game_state = GameState::PLAY1;
    late.current_dice = 6;

    store.insert_saved_game(&late, at + Duration::minutes(5)).expect("insert late");
    store.insert_saved_game(&early, at).expect("insert early");
    store.insert_saved_game(&model(6), at + Duration::hours(1)).expect("insert other game");

    let latest = store
        .latest_for_game("sample-5")
        .expect("query")
        .expect("game has saves");
    assert_eq!(latest.game_state, GameState::PLAY1);
    assert_eq!(latest.current_dice, 6);

    assert!(store.latest_for_game("never-saved").expect("query").is_none());

    let names: Vec<String> = store
        .list_saved_games()
        .expect("list")
        .into_iter()
        .map(|row| row.game_name)
        .collect();
    assert_eq!(names, vec!["sample-6", "sample-5", "sample-5"], "newest first");
}

#[test]
fn delete_removes_one_row() {
    let store = migrated_store();
    let id = store.insert_saved_game(&model(8), Utc::now()).expect("insert");

    assert!(store.delete_saved_game(&id).expect("delete"));
    assert!(!store.delete_saved_game(&id).expect("second delete"), "already gone");
    assert!(store.list_saved_games().expect("list").is_empty());
}

#[test]
fn migration_is_idempotent() {
    let store = migrated_store();
    store.migrate().expect("second migration");
}

#[test]
fn file_backed_catalogue_round_trip() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).expect("scratch dir");
    let db = dir.join("saved_games.db");
    let saved = model(12);

    {
        let store = SaveStore::open(db.to_str().expect("utf-8 path")).expect("open");
        store.migrate().expect("migration");
        store.insert_saved_game(&saved, Utc::now()).expect("insert");
    }

    let reopened = SaveStore::open(db.to_str().expect("utf-8 path")).expect("reopen");
    let latest = reopened
        .latest_for_game("sample-12")
        .expect("query")
        .expect("save survives reopening");
    assert_eq!(latest, saved);

    drop(reopened);
    std::fs::remove_dir_all(&dir).expect("cleanup");
}
