//! In-memory game session.
//!
//! A plain data model of one game: seats, board, turn state. It implements
//! [`LiveSession`] so it can be captured and resumed, and it is what the
//! loader builds from a saved game.

pub mod board;
pub mod player;

pub use board::{Board, StandardBoardProjector};
pub use player::{Inventory, Player, ResourceSet};

use crate::{
    error::{SaveGameError, SaveResult},
    options::GameOptions,
    session::{LiveSession, SeatView},
    types::{GameState, SeatNumber, Version},
};
use chrono::{DateTime, Utc};

/// Client version required by a game using only the original board.
pub const BASE_CLIENT_VERSION: Version = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub name:                        String,
    pub options:                     Option<GameOptions>,
    pub start_time:                  DateTime<Utc>,
    /// Seat number, or -1 before the first turn.
    pub current_player_number:       i32,
    pub state:                       GameState,
    pub client_version_min_required: Version,
    pub current_dice:                i32,
    pub board:                       Board,
    pub players:                     Vec<Player>,
    vacant:                          Vec<bool>,
}

impl Game {
    /// A new game in state `NEW` with every seat vacant.
    pub fn new(
        name: impl Into<String>,
        max_players: usize,
        board: Board,
        start_time: DateTime<Utc>,
    ) -> Self {
        let has_sea = board.encoding_format.has_sea();
        Self {
            name: name.into(),
            options: None,
            start_time,
            current_player_number: -1,
            state: GameState::NEW,
            client_version_min_required: BASE_CLIENT_VERSION,
            current_dice: 0,
            board,
            players: (0..max_players).map(|pn| Player::new(pn, has_sea)).collect(),
            vacant: vec![true; max_players],
        }
    }

    pub fn max_players(&self) -> usize {
        self.players.len()
    }

    pub fn has_sea_board(&self) -> bool {
        self.board.encoding_format.has_sea()
    }

    /// Seat a named player, marking the seat occupied.
    pub fn sit_down(&mut self, seat: SeatNumber, name: impl Into<String>) -> SaveResult<&mut Player> {
        let max_players = self.max_players();
        let player = self
            .players
            .get_mut(seat)
            .ok_or(SaveGameError::MissingSeat { seat, max_players })?;
        player.name = Some(name.into());
        self.vacant[seat] = false;
        Ok(player)
    }

    pub fn set_seat_vacant(&mut self, seat: SeatNumber, vacant: bool) {
        if let Some(slot) = self.vacant.get_mut(seat) {
            *slot = vacant;
        }
    }

    pub fn player(&self, seat: SeatNumber) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn player_mut(&mut self, seat: SeatNumber) -> Option<&mut Player> {
        self.players.get_mut(seat)
    }

    /// Occupied seats, in seat order.
    pub fn seated_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !self.vacant[p.number])
    }
}

impl LiveSession for Game {
    fn name(&self) -> &str {
        &self.name
    }

    fn game_options(&self) -> Option<&GameOptions> {
        self.options.as_ref()
    }

    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    fn current_player_number(&self) -> i32 {
        self.current_player_number
    }

    fn game_state(&self) -> GameState {
        self.state
    }

    fn set_game_state(&mut self, state: GameState) {
        log::debug!("game '{}': state {} -> {state}", self.name, self.state);
        self.state = state;
    }

    fn client_version_min_required(&self) -> Version {
        self.client_version_min_required
    }

    fn current_dice(&self) -> i32 {
        self.current_dice
    }

    fn max_players(&self) -> usize {
        Game::max_players(self)
    }

    fn has_sea_board(&self) -> bool {
        Game::has_sea_board(self)
    }

    fn is_seat_vacant(&self, seat: SeatNumber) -> bool {
        self.vacant.get(seat).copied().unwrap_or(true)
    }

    fn seat(&self, seat: SeatNumber) -> Option<&dyn SeatView> {
        self.players.get(seat).map(|p| p as &dyn SeatView)
    }
}
