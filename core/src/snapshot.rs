//! Saved-game model: the complete state of a game, to and from JSON.
//!
//! Save: call [`SnapshotModel::capture`] on a game at `ROLL_OR_CARD` or later.
//! Load: [`SnapshotModel::from_json`], wire the model into a placeholder game
//! in `LOADING` state (see `loader`), then [`SnapshotModel::resume_play`].
//!
//! This standalone model is flatter than the live game's object graph and
//! does not depend on how the game stores its data.

use crate::{
    board::{BoardProjector, BoardSnapshot},
    clock::{elapsed_seconds, Clock, SystemClock},
    constraint::{ConstraintSet, ResumeConstraint},
    error::{SaveGameError, SaveResult},
    seat::SeatSnapshot,
    session::LiveSession,
    types::{GameState, SeatSelector, Version},
};
use serde::{Deserialize, Serialize};

/// Current model version: 2300 for v2.3.00.
pub const MODEL_VERSION: Version = 2300;

/// Oldest model version this build can load.
pub const MIN_LOADABLE_MODEL_VERSION: Version = 2300;

/// Version of the game engine in this build, same form as `MODEL_VERSION`.
/// Saved games requiring a newer client than this can't be resumed here.
pub const ENGINE_VERSION: Version = 2300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotModel {
    /// Model version when saved.
    pub model_version:         Version,
    /// Game's minimum client version when saved.
    pub game_min_version:      Version,
    pub game_name:             String,
    /// Packed game options, or `None` for defaults.
    #[serde(default)]
    pub game_options:          Option<String>,
    pub game_duration_seconds: i32,
    /// Current player's seat number, or -1.
    pub current_player_number: i32,
    pub game_state:            GameState,
    pub current_dice:          i32,
    pub board_info:            BoardSnapshot,
    /// One entry per seat, vacant or not. Length is the game's max players.
    pub player_seats:          Vec<SeatSnapshot>,
    #[serde(default, skip_serializing_if = "ConstraintSet::is_empty")]
    pub constraints:           ConstraintSet,
}

impl SnapshotModel {
    /// Capture `session` using the system clock. See [`SnapshotModel::capture_at`].
    pub fn capture<S, P>(session: &S, projector: &P) -> SaveResult<Self>
    where
        S: LiveSession + ?Sized,
        P: BoardProjector<S> + ?Sized,
    {
        Self::capture_at(session, projector, &SystemClock)
    }

    /// Capture a game for saving. Read-only: `session` is never modified.
    ///
    /// Fails with `InvalidState` if the game is still in initial placement
    /// (or is itself a load placeholder), and with `UnsupportedLayout` if
    /// the projector returns a layout shape this model doesn't know.
    pub fn capture_at<S, P, C>(session: &S, projector: &P, clock: &C) -> SaveResult<Self>
    where
        S: LiveSession + ?Sized,
        P: BoardProjector<S> + ?Sized,
        C: Clock + ?Sized,
    {
        let game_state = session.game_state();
        if !game_state.is_savable() {
            log::warn!(
                "game '{}': can't save in state {game_state}",
                session.name()
            );
            return Err(SaveGameError::InvalidState {
                actual:  game_state,
                minimum: GameState::ROLL_OR_CARD,
            });
        }

        let board_info = BoardSnapshot::capture(session, projector)?;

        let max_players = session.max_players();
        let has_sea_board = session.has_sea_board();
        let player_seats = (0..max_players)
            .map(|pn| {
                let player = session
                    .seat(pn)
                    .ok_or(SaveGameError::MissingSeat { seat: pn, max_players })?;
                SeatSnapshot::capture(pn, player, session.is_seat_vacant(pn), has_sea_board)
            })
            .collect::<SaveResult<Vec<_>>>()?;

        let model = Self {
            model_version:         MODEL_VERSION,
            game_min_version:      session.client_version_min_required(),
            game_name:             session.name().to_string(),
            game_options:          session.game_options().map(|opts| opts.pack()),
            game_duration_seconds: elapsed_seconds(session.start_time(), clock.now()),
            current_player_number: session.current_player_number(),
            game_state,
            current_dice:          session.current_dice(),
            board_info,
            player_seats,
            constraints:           ConstraintSet::new(),
        };

        log::debug!(
            "game '{}': captured state {game_state}, {} seats, {}s elapsed",
            model.game_name,
            model.player_seats.len(),
            model.game_duration_seconds
        );
        Ok(model)
    }

    /// Resume a loaded game. See [`SnapshotModel::resume_play_with`].
    pub fn resume_play<'a, S>(
        &self,
        session: &'a mut S,
        ignore_constraints: bool,
    ) -> SaveResult<&'a mut S>
    where
        S: LiveSession,
    {
        self.resume_play_with(session, ignore_constraints, &[])
    }

    /// Resume play of a game loaded from this model: check constraints,
    /// then restore the saved game state.
    ///
    /// `session` must be the placeholder built from this model, still in
    /// `LOADING`. Everything except the state code is expected to be wired
    /// in already. On any error the session stays in `LOADING`, so the
    /// caller can fix the seats and try again, or discard it.
    pub fn resume_play_with<'a, S>(
        &self,
        session: &'a mut S,
        ignore_constraints: bool,
        extra: &[&dyn ResumeConstraint],
    ) -> SaveResult<&'a mut S>
    where
        S: LiveSession,
    {
        let current = session.game_state();
        if current != GameState::LOADING {
            return Err(SaveGameError::WrongPhase {
                actual:   current,
                expected: GameState::LOADING,
            });
        }

        if ignore_constraints {
            log::info!(
                "game '{}': resuming without checking {} constraint(s)",
                session.name(),
                self.constraints.len() + extra.len()
            );
        } else {
            self.constraints.check_all(&*session, extra)?;
        }

        session.set_game_state(self.game_state);
        log::info!("game '{}': resumed in state {}", session.name(), self.game_state);
        Ok(session)
    }

    /// Check a deserialized model before building a game from it.
    pub fn check_loadable(&self) -> SaveResult<()> {
        if !(MIN_LOADABLE_MODEL_VERSION..=MODEL_VERSION).contains(&self.model_version) {
            return Err(SaveGameError::IncompatibleVersion {
                found: self.model_version,
                min:   MIN_LOADABLE_MODEL_VERSION,
                max:   MODEL_VERSION,
            });
        }
        if self.game_min_version > ENGINE_VERSION {
            return Err(SaveGameError::EngineTooOld {
                required: self.game_min_version,
                engine:   ENGINE_VERSION,
            });
        }
        if self.game_name.trim().is_empty() {
            return Err(SaveGameError::invalid("game name is empty"));
        }

        let seats = self.player_seats.len();
        if seats == 0 {
            return Err(SaveGameError::invalid("no player seats"));
        }
        if self.current_player_number < -1 || self.current_player_number >= seats as i32 {
            return Err(SaveGameError::invalid(format!(
                "current player {} out of range for {seats} seats",
                self.current_player_number
            )));
        }
        if !self.game_state.is_savable() {
            return Err(SaveGameError::invalid(format!(
                "game state {} can't be resumed",
                self.game_state
            )));
        }
        if self.game_duration_seconds < 0 {
            return Err(SaveGameError::invalid("negative game duration"));
        }

        for potentials in &self.board_info.player_potentials {
            if let SeatSelector::Seat(pn) = potentials.player_number {
                if pn >= seats {
                    return Err(SaveGameError::invalid(format!(
                        "potential settlements for seat {pn}, but only {seats} seats"
                    )));
                }
            }
        }

        for (pn, seat) in self.player_seats.iter().enumerate() {
            if seat.is_seat_vacant && seat.has_gameplay_data() {
                return Err(SaveGameError::invalid(format!(
                    "seat {pn} is vacant but has pieces, cards or elements"
                )));
            }
            let misowned = seat
                .pieces
                .iter()
                .chain(seat.fortress_piece.iter())
                .find(|piece| piece.player_number != pn);
            if let Some(piece) = misowned {
                return Err(SaveGameError::invalid(format!(
                    "seat {pn} lists a {:?} owned by seat {}",
                    piece.piece_type, piece.player_number
                )));
            }
        }
        Ok(())
    }

    /// Parse and check a saved game. Unknown fields are ignored.
    pub fn from_json(json: &str) -> SaveResult<Self> {
        let model: Self = serde_json::from_str(json)?;
        model.check_loadable()?;
        Ok(model)
    }

    pub fn to_json(&self) -> SaveResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> SaveResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
