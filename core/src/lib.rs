//! Saved-game snapshots for turn-based board-game sessions.
//!
//! A running game is captured into a [`snapshot::SnapshotModel`]: a flat,
//! versioned structure holding the board, every seat and the turn/dice state.
//! The model serializes to JSON, and after loading it is wired back into a
//! placeholder game (see [`loader`]) and resumed in its original state.
//!
//! RULE: capture never mutates the live session, and resume only changes
//! the game state code. Everything else is wiring done by the loader.

pub mod board;
pub mod card;
pub mod clock;
pub mod config;
pub mod constraint;
pub mod element;
pub mod error;
pub mod game;
pub mod loader;
pub mod options;
pub mod piece;
pub mod sample;
pub mod seat;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod types;

pub use board::{BoardLayout, BoardProjector, BoardSnapshot, LayoutMessage};
pub use constraint::{Constraint, ConstraintSet, ResumeConstraint};
pub use error::{SaveGameError, SaveResult};
pub use seat::SeatSnapshot;
pub use session::{LiveSession, SeatView};
pub use snapshot::{SnapshotModel, MODEL_VERSION};
pub use types::{GameState, SeatSelector};
