use crate::types::{GameState, SeatNumber, Version};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveGameError {
    #[error("Game state {actual} is not savable: saving needs {minimum} or later, outside loading")]
    InvalidState { actual: GameState, minimum: GameState },

    #[error("Unexpected board layout message type {message_type} ({type_name})")]
    UnsupportedLayout { message_type: i32, type_name: String },

    #[error("Cannot resume: game state is {actual}, expected {expected}")]
    WrongPhase { actual: GameState, expected: GameState },

    #[error("Resume constraint '{name}' not met: {reason}")]
    ConstraintViolation { name: String, reason: String },

    #[error("Seat {seat} holds inventory item type {item_type}, which saved games cannot store")]
    UnsupportedInventoryItem { seat: SeatNumber, item_type: i32 },

    #[error("Seat {seat} not found (max players: {max_players})")]
    MissingSeat { seat: SeatNumber, max_players: usize },

    #[error("Saved game model version {found} not loadable (supported: {min}..={max})")]
    IncompatibleVersion { found: Version, min: Version, max: Version },

    #[error("Saved game requires version {required}, this build is {engine}")]
    EngineTooOld { required: Version, engine: Version },

    #[error("Invalid saved game: {reason}")]
    InvalidSnapshot { reason: String },

    #[error("Invalid game options '{packed}': {reason}")]
    InvalidOptions { packed: String, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SaveGameError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot { reason: reason.into() }
    }
}

pub type SaveResult<T> = Result<T, SaveGameError>;
