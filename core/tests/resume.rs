//! Resuming loaded games: phase guard and constraints.

use chrono::{TimeZone, Utc};
use savegame_core::{
    board::BoardEncodingFormat,
    game::{Board, Game, StandardBoardProjector},
    loader::create_loaded_game,
    Constraint, GameState, LiveSession, ResumeConstraint, SaveGameError, SnapshotModel,
};

fn saved_game() -> SnapshotModel {
    let started = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let mut board = Board::new(BoardEncodingFormat::Original);
    board.hex_layout = vec![0, 3, 3, 5, 0];
    board.number_layout = vec![-1, 4, 9, 10, -1];
    board.robber_hex = 0x77;

    let mut game = Game::new("resume-test", 4, board, started);
    game.sit_down(0, "Ada").expect("seat 0");
    let robot = game.sit_down(2, "droid").expect("seat 2");
    robot.is_robot = true;
    robot.is_built_in_robot = true;
    robot.robot_class = Some("builtin.Robot".into());
    game.state = GameState::PLAY1;
    game.current_player_number = 2;
    game.current_dice = 8;

    SnapshotModel::capture(&game, &StandardBoardProjector).expect("capture")
}

#[test]
fn resume_restores_saved_state() {
    let model = saved_game();
    let mut game = create_loaded_game(&model).expect("load");
    assert_eq!(game.game_state(), GameState::LOADING, "placeholder starts in LOADING");

    let resumed = model.resume_play(&mut game, false).expect("resume");
    assert_eq!(resumed.game_state(), GameState::PLAY1);
    assert_eq!(game.current_player_number, 2);
    assert_eq!(game.current_dice, 8);
}

#[test]
fn resume_outside_loading_is_rejected() {
    let model = saved_game();
    for state in [GameState::NEW, GameState::ROLL_OR_CARD, GameState::LOADING_RESUMING] {
        let mut game = create_loaded_game(&model).expect("load");
        game.state = state;

        let err = model.resume_play(&mut game, true).unwrap_err();
        assert!(
            matches!(err, SaveGameError::WrongPhase { actual, .. } if actual == state),
            "state {state}: got {err}"
        );
        assert_eq!(game.state, state, "state {state} must be left alone");
    }
}

#[test]
fn satisfied_constraints_allow_resume() {
    let mut model = saved_game();
    model.constraints.push(Constraint::SeatHuman { seat: 0 });
    model.constraints.push(Constraint::SeatVacant { seat: 1 });
    model.constraints.push(Constraint::SeatRobotClass {
        seat:  2,
        class: "builtin.Robot".into(),
    });

    let mut game = create_loaded_game(&model).expect("load");
    model.resume_play(&mut game, false).expect("all constraints hold");
    assert_eq!(game.state, GameState::PLAY1);
}

#[test]
fn violated_constraint_leaves_game_loading() {
    let mut model = saved_game();
    model.constraints.push(Constraint::SeatRobot { seat: 0 });

    let mut game = create_loaded_game(&model).expect("load");
    let err = model.resume_play(&mut game, false).unwrap_err();
    match err {
        SaveGameError::ConstraintViolation { name, .. } => assert_eq!(name, "seat_robot"),
        other => panic!("expected ConstraintViolation, got {other}"),
    }
    assert_eq!(game.state, GameState::LOADING, "failed resume stays in LOADING");

    model
        .resume_play(&mut game, true)
        .expect("ignoring constraints resumes anyway");
    assert_eq!(game.state, GameState::PLAY1);
}

#[test]
fn constraint_on_missing_seat_fails() {
    let mut model = saved_game();
    model.constraints.push(Constraint::SeatVacant { seat: 9 });
    let mut game = create_loaded_game(&model).expect("load");
    let err = model.resume_play(&mut game, false).unwrap_err();
    assert!(matches!(err, SaveGameError::ConstraintViolation { .. }), "got {err}");
}

struct NeedsSeatedPlayers(usize);

impl ResumeConstraint for NeedsSeatedPlayers {
    fn name(&self) -> &str {
        "needs_seated_players"
    }

    fn check(&self, session: &dyn LiveSession) -> Result<(), String> {
        let seated = (0..session.max_players())
            .filter(|&pn| !session.is_seat_vacant(pn))
            .count();
        if seated >= self.0 {
            Ok(())
        } else {
            Err(format!("{seated} seated, need {}", self.0))
        }
    }
}

#[test]
fn runtime_constraints_run_after_stored_ones() {
    let model = saved_game();

    let mut game = create_loaded_game(&model).expect("load");
    let err = model
        .resume_play_with(&mut game, false, &[&NeedsSeatedPlayers(3)])
        .unwrap_err();
    match err {
        SaveGameError::ConstraintViolation { name, reason } => {
            assert_eq!(name, "needs_seated_players");
            assert!(reason.contains("2 seated"), "reason: {reason}");
        }
        other => panic!("expected ConstraintViolation, got {other}"),
    }

    model
        .resume_play_with(&mut game, false, &[&NeedsSeatedPlayers(2)])
        .expect("two seated players is enough");
    assert_eq!(game.state, GameState::PLAY1);
}

#[test]
fn constraints_survive_json() {
    let mut model = saved_game();
    model.constraints.push(Constraint::SeatBuiltInRobot { seat: 2 });
    let json = model.to_json().expect("to json");
    assert!(json.contains(r#""kind":"seat_built_in_robot""#), "json: {json}");

    let loaded = SnapshotModel::from_json(&json).expect("from json");
    assert_eq!(loaded.constraints, model.constraints);
}
