//! THE MOST IMPORTANT TEST IN THE PROJECT.
//!
//! Capture a game, write it out, read it back, load and resume it.
//! The resumed game must equal the original, field for field.
//! Any divergence means saved games silently lose state.

use chrono::{DateTime, Duration, TimeZone, Utc};
use savegame_core::{
    clock::FixedClock,
    game::{Game, StandardBoardProjector},
    loader::create_loaded_game_at,
    sample::sample_game,
    SnapshotModel,
};

fn started() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 29, 21, 15, 0).unwrap()
}

fn save_and_restore(game: &Game, clock: &FixedClock) -> Game {
    let model =
        SnapshotModel::capture_at(game, &StandardBoardProjector, clock).expect("capture");
    let json = model.to_json().expect("to json");
    let loaded = SnapshotModel::from_json(&json).expect("from json");
    assert_eq!(loaded, model, "model changed on its way through JSON");

    let mut restored = create_loaded_game_at(&loaded, clock).expect("load");
    loaded.resume_play(&mut restored, false).expect("resume");
    restored
}

#[test]
fn resumed_game_equals_original() {
    let clock = FixedClock::new(started() + Duration::seconds(1_500));

    for seed in 0..48u64 {
        for players in [2, 3, 4, 5, 6] {
            let original = sample_game(seed, players, started());
            let restored = save_and_restore(&original, &clock);

            assert_eq!(
                restored.players.len(),
                original.players.len(),
                "seed {seed}/{players}: seat count"
            );
            for (a, b) in original.players.iter().zip(&restored.players) {
                assert_eq!(a, b, "seed {seed}/{players}: seat {} diverged", a.number);
            }
            assert_eq!(restored.board, original.board, "seed {seed}/{players}: board");
            assert_eq!(restored, original, "seed {seed}/{players}: game diverged");
        }
    }
}

#[test]
fn second_save_matches_first() {
    let mut clock = FixedClock::new(started() + Duration::seconds(600));
    let original = sample_game(0xDEAD_BEEF, 4, started());

    let first = SnapshotModel::capture_at(&original, &StandardBoardProjector, &clock)
        .expect("first capture");
    let restored = save_and_restore(&original, &clock);
    let second = SnapshotModel::capture_at(&restored, &StandardBoardProjector, &clock)
        .expect("second capture");
    assert_eq!(
        first.to_json().expect("json"),
        second.to_json().expect("json"),
        "saving a restored game must reproduce the same file"
    );

    clock.advance_millis(2_499);
    let later = SnapshotModel::capture_at(&restored, &StandardBoardProjector, &clock)
        .expect("later capture");
    assert_eq!(later.game_duration_seconds, first.game_duration_seconds + 2);
}

#[test]
fn same_seed_produces_identical_saves() {
    let clock = FixedClock::new(started() + Duration::seconds(42));
    let a = sample_game(7, 5, started());
    let b = sample_game(7, 5, started());

    let json_a = SnapshotModel::capture_at(&a, &StandardBoardProjector, &clock)
        .and_then(|m| m.to_json())
        .expect("save a");
    let json_b = SnapshotModel::capture_at(&b, &StandardBoardProjector, &clock)
        .and_then(|m| m.to_json())
        .expect("save b");
    assert_eq!(json_a, json_b);
}
