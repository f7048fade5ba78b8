//! One seat's state in a saved game.

use crate::{
    card::{DevCardType, InventoryState, ItemKind},
    element::{ElementType, PlayerElements, ResourceType},
    error::{SaveGameError, SaveResult},
    piece::{PieceType, PlayingPiece},
    session::SeatView,
    types::SeatNumber,
};
use serde::{Deserialize, Serialize};

/// Face shown for a seat nobody has sat in.
pub const DEFAULT_FACE_ID: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSnapshot {
    pub name:              Option<String>,
    pub is_seat_vacant:    bool,
    pub total_vp:          i32,
    pub is_robot:          bool,
    pub is_built_in_robot: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robot_class:       Option<String>,
    pub face_id:           i32,

    /// Resource counts, knights, remaining pieces and scenario counters,
    /// in capture order. See [`SeatSnapshot::capture`].
    #[serde(default)]
    pub elements: PlayerElements,

    /// Dev cards received this turn, not yet playable.
    #[serde(default)]
    pub new_dev_cards: Vec<DevCardType>,

    /// Dev cards from earlier turns: playable ones, then kept ones.
    #[serde(default)]
    pub old_dev_cards: Vec<DevCardType>,

    #[serde(default)]
    pub pieces: Vec<PlayingPiece>,

    /// Seat's fortress, if it owns one. Not part of `pieces`.
    #[serde(default)]
    pub fortress_piece: Option<PlayingPiece>,
}

impl SeatSnapshot {
    /// An empty seat slot.
    pub fn vacant() -> Self {
        Self {
            name:              None,
            is_seat_vacant:    true,
            total_vp:          0,
            is_robot:          false,
            is_built_in_robot: false,
            robot_class:       None,
            face_id:           DEFAULT_FACE_ID,
            elements:          PlayerElements::new(),
            new_dev_cards:     Vec::new(),
            old_dev_cards:     Vec::new(),
            pieces:            Vec::new(),
            fortress_piece:    None,
        }
    }

    /// Capture one seat.
    ///
    /// Element order is fixed:
    /// 1. every resource type in ascending code order, `Unknown` included
    /// 2. knights
    /// 3. remaining pieces from ships (sea board only) or cities down to roads
    /// 4. warships, only if non-zero
    ///
    /// Fails with `UnsupportedInventoryItem` if the seat holds any inventory
    /// item other than a dev card: saving it would drop part of the hand.
    pub fn capture<V>(
        seat: SeatNumber,
        player: &V,
        is_vacant: bool,
        has_sea_board: bool,
    ) -> SaveResult<Self>
    where
        V: SeatView + ?Sized,
    {
        if is_vacant {
            return Ok(Self::vacant());
        }

        let mut elements = PlayerElements::new();
        for resource in ResourceType::ALL {
            elements.push(
                ElementType::for_resource(resource),
                player.resource_amount(resource),
            );
        }
        elements.push(ElementType::NumKnights, player.num_knights());

        let top = if has_sea_board { PieceType::Ship } else { PieceType::City };
        for piece in PieceType::BUILDABLE.iter().rev().filter(|p| **p <= top) {
            if let Some(element) = ElementType::for_remaining_pieces(*piece) {
                elements.push(element, player.num_pieces(*piece));
            }
        }

        let warships = player.num_warships();
        if warships != 0 {
            elements.push(ElementType::ScenarioWarshipCount, warships);
        }

        let new_dev_cards = dev_cards(seat, player, &[InventoryState::New])?;
        let old_dev_cards =
            dev_cards(seat, player, &[InventoryState::Playable, InventoryState::Kept])?;

        Ok(Self {
            name:              player.name().map(str::to_string),
            is_seat_vacant:    false,
            total_vp:          player.total_vp(),
            is_robot:          player.is_robot(),
            is_built_in_robot: player.is_built_in_robot(),
            robot_class:       player.robot_class().map(str::to_string),
            face_id:           player.face_id(),
            elements,
            new_dev_cards,
            old_dev_cards,
            pieces:            player.pieces().to_vec(),
            fortress_piece:    player.fortress().cloned(),
        })
    }

    /// True if any field that only an occupied seat can have is set.
    pub fn has_gameplay_data(&self) -> bool {
        !self.elements.is_empty()
            || !self.new_dev_cards.is_empty()
            || !self.old_dev_cards.is_empty()
            || !self.pieces.is_empty()
            || self.fortress_piece.is_some()
    }
}

fn dev_cards<V>(
    seat: SeatNumber,
    player: &V,
    states: &[InventoryState],
) -> SaveResult<Vec<DevCardType>>
where
    V: SeatView + ?Sized,
{
    let mut cards = Vec::new();
    for &state in states {
        for item in player.inventory_by_state(state) {
            match item.kind {
                ItemKind::DevCard { card } => cards.push(card),
                ItemKind::Special { item_type } => {
                    log::warn!(
                        "seat {seat}: inventory item type {item_type} ({state:?}) can't be saved"
                    );
                    return Err(SaveGameError::UnsupportedInventoryItem { seat, item_type });
                }
            }
        }
    }
    Ok(cards)
}
