//! Playing pieces placed on the board.

use crate::types::{Coord, SeatNumber};
use serde::{Deserialize, Serialize};

/// Piece type codes. Persisted, never renumber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum PieceType {
    Road,
    Settlement,
    City,
    Ship,
    Fortress,
    Village,
}

impl PieceType {
    /// Piece types a player builds from a limited stock, lowest rank first.
    pub const BUILDABLE: [Self; 4] = [Self::Road, Self::Settlement, Self::City, Self::Ship];

    pub const fn code(self) -> i32 {
        match self {
            Self::Road       => 0,
            Self::Settlement => 1,
            Self::City       => 2,
            Self::Ship       => 3,
            Self::Fortress   => 4,
            Self::Village    => 5,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::Road,
            1 => Self::Settlement,
            2 => Self::City,
            3 => Self::Ship,
            4 => Self::Fortress,
            5 => Self::Village,
            _ => return None,
        })
    }
}

impl From<PieceType> for i32 {
    fn from(piece: PieceType) -> Self {
        piece.code()
    }
}

impl TryFrom<i32> for PieceType {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown piece type {code}"))
    }
}

/// One piece on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayingPiece {
    pub piece_type:    PieceType,
    pub coord:         Coord,
    pub player_number: SeatNumber,
    /// Fortress strength or village cloth count; absent for other pieces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_value: Option<i32>,
}

impl PlayingPiece {
    pub fn new(piece_type: PieceType, coord: Coord, player_number: SeatNumber) -> Self {
        Self {
            piece_type,
            coord,
            player_number,
            special_value: None,
        }
    }

    pub fn fortress(coord: Coord, player_number: SeatNumber, strength: i32) -> Self {
        Self {
            piece_type: PieceType::Fortress,
            coord,
            player_number,
            special_value: Some(strength),
        }
    }
}
