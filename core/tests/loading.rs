//! Reading saved games back: validation and placeholder wiring.

use chrono::{Duration, TimeZone, Utc};
use savegame_core::{
    board::{BoardEncodingFormat, GeneralLayout, PotentialSettlements},
    card::{DevCardType, InventoryState},
    clock::FixedClock,
    element::ResourceType,
    game::{Game, StandardBoardProjector},
    loader::{create_loaded_game, create_loaded_game_at},
    options::OptionValue,
    piece::{PieceType, PlayingPiece},
    sample::sample_game,
    BoardLayout, GameState, LiveSession, SaveGameError, SeatSelector, SeatView, SnapshotModel,
    MODEL_VERSION,
};
use serde_json::{json, Value};

fn started() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 14, 9, 30, 0).unwrap()
}

/// A captured sample on the large sea board.
fn sea_model() -> SnapshotModel {
    let game = (0..64)
        .map(|seed| sample_game(seed, 4, started()))
        .find(|g| g.board.encoding_format == BoardEncodingFormat::Large)
        .expect("some seed picks the sea board");
    SnapshotModel::capture(&game, &StandardBoardProjector).expect("capture")
}

fn model_json(model: &SnapshotModel) -> Value {
    serde_json::from_str(&model.to_json().expect("to json")).expect("valid json")
}

fn reload(value: &Value) -> Result<SnapshotModel, SaveGameError> {
    SnapshotModel::from_json(&value.to_string())
}

#[test]
fn other_model_versions_are_refused() {
    let mut value = model_json(&sea_model());
    for version in [MODEL_VERSION - 1, MODEL_VERSION + 1] {
        value["model_version"] = json!(version);
        let err = reload(&value).unwrap_err();
        assert!(
            matches!(err, SaveGameError::IncompatibleVersion { found, .. } if found == version),
            "version {version}: got {err}"
        );
    }
}

#[test]
fn games_needing_a_newer_engine_are_refused() {
    let mut value = model_json(&sea_model());
    value["game_min_version"] = json!(9900);
    let err = reload(&value).unwrap_err();
    assert!(matches!(err, SaveGameError::EngineTooOld { required: 9900, .. }), "got {err}");
}

#[test]
fn unknown_fields_are_ignored() {
    let model = sea_model();
    let mut value = model_json(&model);
    value["saved_by"] = json!("a newer build");
    value["player_seats"][0]["favourite_colour"] = json!("teal");

    let loaded = reload(&value).expect("extra fields are fine");
    assert_eq!(loaded, model);
}

#[test]
fn missing_optional_fields_take_defaults() {
    let mut value = model_json(&sea_model());
    let root = value.as_object_mut().expect("object");
    root.remove("game_options");
    root.remove("constraints");
    let seat = value["player_seats"][0].as_object_mut().expect("seat object");
    seat.remove("robot_class");
    seat.remove("new_dev_cards");

    let loaded = reload(&value).expect("defaults apply");
    assert_eq!(loaded.game_options, None);
    assert!(loaded.constraints.is_empty());
    assert!(loaded.player_seats[0].new_dev_cards.is_empty());
}

#[test]
fn odd_element_lists_are_rejected() {
    let mut value = model_json(&sea_model());
    value["player_seats"][0]["elements"] = json!([1, 2, 4]);
    let err = reload(&value).unwrap_err();
    assert!(matches!(err, SaveGameError::Serialization(_)), "got {err}");
}

#[test]
fn vacant_seat_with_pieces_is_rejected() {
    let mut model = sea_model();
    let last = model.player_seats.len() - 1;
    model.player_seats[last] = savegame_core::SeatSnapshot::vacant();
    model.player_seats[last]
        .pieces
        .push(PlayingPiece::new(PieceType::Road, 0x33, last));

    let err = model.check_loadable().unwrap_err();
    assert!(matches!(err, SaveGameError::InvalidSnapshot { .. }), "got {err}");
}

#[test]
fn pieces_owned_by_another_seat_are_rejected() {
    let mut model = sea_model();
    model.player_seats[0]
        .pieces
        .push(PlayingPiece::new(PieceType::Road, 0x33, 1));
    assert!(model.check_loadable().is_err());
}

#[test]
fn current_player_must_be_a_seat() {
    let mut model = sea_model();
    model.current_player_number = model.player_seats.len() as i32;
    assert!(model.check_loadable().is_err());
    model.current_player_number = -1;
    model.check_loadable().expect("-1 means no current player");
}

fn assert_invalid(model: &SnapshotModel, what: &str) {
    let err = model.check_loadable().unwrap_err();
    assert!(matches!(err, SaveGameError::InvalidSnapshot { .. }), "{what}: got {err}");
}

#[test]
fn blank_game_name_is_rejected() {
    for name in ["", "   "] {
        let mut model = sea_model();
        model.game_name = name.to_string();
        assert_invalid(&model, "blank name");
    }
}

#[test]
fn model_without_seats_is_rejected() {
    let mut model = sea_model();
    model.player_seats.clear();
    model.current_player_number = -1;
    assert_invalid(&model, "no seats");
}

#[test]
fn unresumable_states_are_rejected() {
    for state in [
        GameState::NEW,
        GameState::START3B,
        GameState::LOADING,
        GameState::LOADING_RESUMING,
    ] {
        let mut model = sea_model();
        model.game_state = state;
        assert_invalid(&model, &format!("state {state}"));
    }

    let mut model = sea_model();
    model.game_state = GameState::OVER;
    model.check_loadable().expect("finished games load");
}

#[test]
fn negative_duration_is_rejected() {
    let mut model = sea_model();
    model.game_duration_seconds = -1;
    assert_invalid(&model, "negative duration");
}

#[test]
fn potentials_for_a_missing_seat_are_rejected() {
    let mut model = sea_model();
    let seats = model.player_seats.len();
    model.board_info.player_potentials.push(PotentialSettlements {
        player_number: SeatSelector::Seat(seats),
        ..PotentialSettlements::default()
    });
    assert_invalid(&model, "potentials past the last seat");
}

fn set_first_selector(value: &mut Value, code: i32) {
    let potentials = value["board_info"]["player_potentials"]
        .as_array_mut()
        .expect("potentials array");
    assert!(!potentials.is_empty(), "sample boards carry potentials");
    potentials[0]["player_number"] = json!(code);
}

#[test]
fn negative_seat_selectors_other_than_all_are_rejected() {
    let mut value = model_json(&sea_model());
    for code in [-2, -7] {
        set_first_selector(&mut value, code);
        let err = reload(&value).unwrap_err();
        assert!(matches!(err, SaveGameError::Serialization(_)), "selector {code}: got {err}");
    }

    set_first_selector(&mut value, -1);
    reload(&value).expect("-1 selects every seat");
}

#[test]
fn general_layout_needs_hex_and_number_parts() {
    let mut model = sea_model();
    if let BoardLayout::Layout2(layout) = &mut model.board_info.layout {
        layout.parts.remove(GeneralLayout::NUMBER_LAYOUT);
    }
    let err = create_loaded_game(&model).unwrap_err();
    assert!(err.to_string().contains("NL"), "got {err}");
}

#[test]
fn placeholder_is_wired_from_the_model() {
    let model = sea_model();
    let now = started() + Duration::hours(3);
    let clock = FixedClock::new(now);
    let game: Game = create_loaded_game_at(&model, &clock).expect("load");

    assert_eq!(game.state, GameState::LOADING);
    assert_eq!(game.name, model.game_name);
    assert_eq!(
        game.start_time,
        now - Duration::seconds(i64::from(model.game_duration_seconds))
    );
    assert!(game.has_sea_board());
    assert_eq!(game.max_players(), model.player_seats.len());
    assert_eq!(
        game.options.as_ref().and_then(|o| o.get("SBL")),
        Some(&OptionValue::Bool(true))
    );

    for (pn, seat) in model.player_seats.iter().enumerate() {
        assert_eq!(game.is_seat_vacant(pn), seat.is_seat_vacant, "seat {pn}");
        if seat.is_seat_vacant {
            continue;
        }
        let player = game.player(pn).expect("player");
        for resource in ResourceType::ALL {
            let element = savegame_core::element::ElementType::for_resource(resource);
            assert_eq!(
                Some(player.resource_amount(resource)),
                seat.elements.get(element),
                "seat {pn}: {resource:?}"
            );
        }
        assert_eq!(player.pieces, seat.pieces, "seat {pn}: pieces");
        assert_eq!(player.fortress, seat.fortress_piece, "seat {pn}: fortress");
    }
}

#[test]
fn old_cards_split_into_playable_and_kept() {
    let mut model = sea_model();
    model.player_seats[0].old_dev_cards = vec![DevCardType::Knight, DevCardType::Temple];
    model.player_seats[0].new_dev_cards = vec![DevCardType::Monopoly];

    let game = create_loaded_game(&model).expect("load");
    let player = game.player(0).expect("seat 0");
    let cards = |state| -> Vec<InventoryState> {
        player.inventory_by_state(state).into_iter().map(|item| item.state).collect()
    };
    assert_eq!(cards(InventoryState::New).len(), 1);
    assert_eq!(cards(InventoryState::Playable).len(), 1, "knight stays playable");
    assert_eq!(cards(InventoryState::Kept).len(), 1, "temple is a kept VP card");
}
