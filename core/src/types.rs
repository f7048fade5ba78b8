//! Shared primitive types used across the save-game model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seat index within a game, `0..max_players`.
pub type SeatNumber = usize;

/// A board coordinate: hex, node or edge. Its meaning depends on the
/// board's encoding format.
pub type Coord = i32;

/// A version number in `2300` = v2.3.00 form.
pub type Version = i32;

/// Game phase code.
/// Codes are persisted in saved games. Never renumber, only append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameState(pub i32);

impl GameState {
    // ── Setup ─────────────────────────────────────
    pub const NEW:     Self = Self(0);
    pub const READY:   Self = Self(1);
    pub const START1A: Self = Self(5);
    pub const START1B: Self = Self(6);
    pub const START2A: Self = Self(10);
    pub const START2B: Self = Self(11);
    pub const START3A: Self = Self(12);
    pub const START3B: Self = Self(13);

    // ── Normal play ───────────────────────────────
    pub const ROLL_OR_CARD:       Self = Self(15);
    pub const PLAY1:              Self = Self(20);
    pub const PLACING_ROAD:       Self = Self(30);
    pub const PLACING_SETTLEMENT: Self = Self(31);
    pub const PLACING_CITY:       Self = Self(32);
    pub const PLACING_ROBBER:     Self = Self(33);
    pub const PLACING_PIRATE:     Self = Self(34);
    pub const PLACING_SHIP:       Self = Self(35);
    pub const PLACING_FREE_ROAD1: Self = Self(40);
    pub const PLACING_FREE_ROAD2: Self = Self(41);
    pub const PLACING_INV_ITEM:   Self = Self(42);

    pub const WAITING_FOR_DISCARDS:              Self = Self(50);
    pub const WAITING_FOR_ROB_CHOOSE_PLAYER:     Self = Self(51);
    pub const WAITING_FOR_DISCOVERY:             Self = Self(52);
    pub const WAITING_FOR_MONOPOLY:              Self = Self(53);
    pub const WAITING_FOR_ROBBER_OR_PIRATE:      Self = Self(54);
    pub const WAITING_FOR_ROB_CLOTH_OR_RESOURCE: Self = Self(55);
    pub const WAITING_FOR_PICK_GOLD_RESOURCE:    Self = Self(56);
    pub const SPECIAL_BUILDING:                  Self = Self(100);

    // ── Save/load and end of game ─────────────────
    /// A game built from a saved-game file, waiting for resume.
    pub const LOADING:          Self = Self(990);
    pub const LOADING_RESUMING: Self = Self(992);
    pub const OVER:             Self = Self(1000);

    pub const fn code(self) -> i32 {
        self.0
    }

    /// True while a loaded game waits to be resumed.
    pub fn is_loading(self) -> bool {
        self == Self::LOADING || self == Self::LOADING_RESUMING
    }

    /// Initial placement is over and the game is not a load placeholder.
    pub fn is_savable(self) -> bool {
        self >= Self::ROLL_OR_CARD && !self.is_loading()
    }

    fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::NEW => "new",
            Self::READY => "ready",
            Self::START1A => "start1a",
            Self::START1B => "start1b",
            Self::START2A => "start2a",
            Self::START2B => "start2b",
            Self::START3A => "start3a",
            Self::START3B => "start3b",
            Self::ROLL_OR_CARD => "roll_or_card",
            Self::PLAY1 => "play1",
            Self::PLACING_ROAD => "placing_road",
            Self::PLACING_SETTLEMENT => "placing_settlement",
            Self::PLACING_CITY => "placing_city",
            Self::PLACING_ROBBER => "placing_robber",
            Self::PLACING_PIRATE => "placing_pirate",
            Self::PLACING_SHIP => "placing_ship",
            Self::PLACING_FREE_ROAD1 => "placing_free_road1",
            Self::PLACING_FREE_ROAD2 => "placing_free_road2",
            Self::PLACING_INV_ITEM => "placing_inv_item",
            Self::WAITING_FOR_DISCARDS => "waiting_for_discards",
            Self::WAITING_FOR_ROB_CHOOSE_PLAYER => "waiting_for_rob_choose_player",
            Self::WAITING_FOR_DISCOVERY => "waiting_for_discovery",
            Self::WAITING_FOR_MONOPOLY => "waiting_for_monopoly",
            Self::WAITING_FOR_ROBBER_OR_PIRATE => "waiting_for_robber_or_pirate",
            Self::WAITING_FOR_ROB_CLOTH_OR_RESOURCE => "waiting_for_rob_cloth_or_resource",
            Self::WAITING_FOR_PICK_GOLD_RESOURCE => "waiting_for_pick_gold_resource",
            Self::SPECIAL_BUILDING => "special_building",
            Self::LOADING => "loading",
            Self::LOADING_RESUMING => "loading_resuming",
            Self::OVER => "over",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Which seats a potentials record applies to.
/// Persisted as the seat number, or `-1` for every seat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum SeatSelector {
    #[default]
    All,
    Seat(SeatNumber),
}

impl TryFrom<i32> for SeatSelector {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(Self::All),
            _ => usize::try_from(code)
                .map(Self::Seat)
                .map_err(|_| format!("invalid seat selector {code}")),
        }
    }
}

impl From<SeatSelector> for i32 {
    fn from(selector: SeatSelector) -> Self {
        match selector {
            SeatSelector::All => -1,
            SeatSelector::Seat(seat) => seat as i32,
        }
    }
}
