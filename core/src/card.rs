//! Development cards and the inventory items that hold them.

use serde::{Deserialize, Serialize};

/// Development card type codes. Persisted, never renumber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum DevCardType {
    /// A card whose type other players can't see.
    Unknown,
    Roads,
    Discovery,
    Monopoly,
    Capitol,
    Market,
    University,
    Temple,
    Chapel,
    Knight,
}

impl DevCardType {
    pub const fn code(self) -> i32 {
        match self {
            Self::Unknown    => 0,
            Self::Roads      => 1,
            Self::Discovery  => 2,
            Self::Monopoly   => 3,
            Self::Capitol    => 4,
            Self::Market     => 5,
            Self::University => 6,
            Self::Temple     => 7,
            Self::Chapel     => 8,
            Self::Knight     => 9,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::Unknown,
            1 => Self::Roads,
            2 => Self::Discovery,
            3 => Self::Monopoly,
            4 => Self::Capitol,
            5 => Self::Market,
            6 => Self::University,
            7 => Self::Temple,
            8 => Self::Chapel,
            9 => Self::Knight,
            _ => return None,
        })
    }

    /// Victory-point cards are kept until the end of the game, never played.
    pub const fn is_vp_card(self) -> bool {
        matches!(
            self,
            Self::Capitol | Self::Market | Self::University | Self::Temple | Self::Chapel
        )
    }
}

impl From<DevCardType> for i32 {
    fn from(card: DevCardType) -> Self {
        card.code()
    }
}

impl TryFrom<i32> for DevCardType {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown dev card type {code}"))
    }
}

/// Where an inventory item is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryState {
    /// Received this turn, not yet playable.
    New,
    Playable,
    /// Kept until end of game (victory-point cards).
    Kept,
}

impl InventoryState {
    pub const fn code(self) -> i32 {
        match self {
            Self::New      => 1,
            Self::Playable => 2,
            Self::Kept     => 3,
        }
    }
}

/// What an inventory item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    DevCard { card: DevCardType },
    /// Scenario-specific item (port to place, trade promise, ...).
    Special { item_type: i32 },
}

impl ItemKind {
    pub const fn item_type(self) -> i32 {
        match self {
            Self::DevCard { card } => card.code(),
            Self::Special { item_type } => item_type,
        }
    }
}

/// One item in a player's inventory, with its lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryItem {
    pub kind:  ItemKind,
    pub state: InventoryState,
}

impl InventoryItem {
    pub fn dev_card(card: DevCardType, state: InventoryState) -> Self {
        Self {
            kind: ItemKind::DevCard { card },
            state,
        }
    }

    pub fn special(item_type: i32, state: InventoryState) -> Self {
        Self {
            kind: ItemKind::Special { item_type },
            state,
        }
    }
}
