//! The live-game interface that capture reads and resume updates.
//!
//! RULE: The snapshot model only sees a game through these traits.
//! It never depends on a concrete game type's internal layout.
//!
//! Callers must keep gameplay from mutating the session while a capture
//! or resume runs (pause turn timers, stop processing moves). Neither
//! operation locks anything itself.

use crate::{
    card::{InventoryItem, InventoryState},
    element::ResourceType,
    options::GameOptions,
    piece::{PieceType, PlayingPiece},
    types::{GameState, SeatNumber, Version},
};
use chrono::{DateTime, Utc};

/// A running (or placeholder) game session.
pub trait LiveSession {
    fn name(&self) -> &str;

    /// Game options, or `None` for all defaults.
    fn game_options(&self) -> Option<&GameOptions>;

    fn start_time(&self) -> DateTime<Utc>;

    /// Current player's seat number, or -1 if none.
    fn current_player_number(&self) -> i32;

    fn game_state(&self) -> GameState;

    /// The only mutation the snapshot model performs, during resume.
    fn set_game_state(&mut self, state: GameState);

    /// Oldest client version able to join, given the features in use.
    fn client_version_min_required(&self) -> Version;

    /// Last dice total, or 0 / -1 when not rolled this turn.
    fn current_dice(&self) -> i32;

    fn max_players(&self) -> usize;

    fn has_sea_board(&self) -> bool;

    fn is_seat_vacant(&self, seat: SeatNumber) -> bool;

    /// The player object at `seat`, vacant or not. `None` past `max_players`.
    fn seat(&self, seat: SeatNumber) -> Option<&dyn SeatView>;
}

/// Read access to one seat's player.
pub trait SeatView {
    /// Player name, or `None` for a never-occupied seat.
    fn name(&self) -> Option<&str>;

    fn total_vp(&self) -> i32;

    fn is_robot(&self) -> bool;

    fn is_built_in_robot(&self) -> bool;

    /// Class of automated player in this seat, if it reports one.
    fn robot_class(&self) -> Option<&str> {
        None
    }

    fn face_id(&self) -> i32;

    fn resource_amount(&self, resource: ResourceType) -> i32;

    fn num_knights(&self) -> i32;

    /// Pieces of this type still available to build.
    fn num_pieces(&self, piece: PieceType) -> i32;

    fn num_warships(&self) -> i32;

    fn inventory_by_state(&self, state: InventoryState) -> Vec<InventoryItem>;

    /// Pieces on the board, in placement order.
    fn pieces(&self) -> &[PlayingPiece];

    fn fortress(&self) -> Option<&PlayingPiece>;
}
