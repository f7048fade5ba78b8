//! A seat's player in the in-memory game.

use crate::{
    card::{DevCardType, InventoryItem, InventoryState, ItemKind},
    element::ResourceType,
    piece::{PieceType, PlayingPiece},
    seat::DEFAULT_FACE_ID,
    session::SeatView,
    types::{Coord, SeatNumber},
};

/// Starting stock of each buildable piece type.
pub const STARTING_ROADS:       i32 = 15;
pub const STARTING_SETTLEMENTS: i32 = 5;
pub const STARTING_CITIES:      i32 = 4;
pub const STARTING_SHIPS:       i32 = 15;

/// Resource counts by type, `Unknown` included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSet {
    amounts: [i32; 6],
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(&self, resource: ResourceType) -> i32 {
        self.amounts[resource.index()]
    }

    pub fn set_amount(&mut self, resource: ResourceType, amount: i32) {
        self.amounts[resource.index()] = amount;
    }

    pub fn add(&mut self, resource: ResourceType, amount: i32) {
        self.amounts[resource.index()] += amount;
    }

    pub fn total(&self) -> i32 {
        self.amounts.iter().sum()
    }
}

/// Items in a player's hand, one list per lifecycle state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    new:      Vec<ItemKind>,
    playable: Vec<ItemKind>,
    kept:     Vec<ItemKind>,
}

impl Inventory {
    pub fn add(&mut self, kind: ItemKind, state: InventoryState) {
        self.list_mut(state).push(kind);
    }

    pub fn add_dev_card(&mut self, card: DevCardType, state: InventoryState) {
        self.add(ItemKind::DevCard { card }, state);
    }

    pub fn by_state(&self, state: InventoryState) -> Vec<InventoryItem> {
        let list = match state {
            InventoryState::New => &self.new,
            InventoryState::Playable => &self.playable,
            InventoryState::Kept => &self.kept,
        };
        list.iter().map(|&kind| InventoryItem { kind, state }).collect()
    }

    pub fn len(&self) -> usize {
        self.new.len() + self.playable.len() + self.kept.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn list_mut(&mut self, state: InventoryState) -> &mut Vec<ItemKind> {
        match state {
            InventoryState::New => &mut self.new,
            InventoryState::Playable => &mut self.playable,
            InventoryState::Kept => &mut self.kept,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub number:                SeatNumber,
    pub name:                  Option<String>,
    pub total_vp:              i32,
    pub is_robot:              bool,
    pub is_built_in_robot:     bool,
    pub robot_class:           Option<String>,
    pub face_id:               i32,
    pub resources:             ResourceSet,
    pub num_knights:           i32,
    /// Remaining stock, indexed by `PieceType::BUILDABLE` order.
    remaining:                 [i32; 4],
    pub num_warships:          i32,
    pub inventory:             Inventory,
    pub pieces:                Vec<PlayingPiece>,
    pub fortress:              Option<PlayingPiece>,
    pub potential_settlements: Vec<Coord>,
    /// Sea edges where this player may place ships, by coastline segment.
    pub legal_sea_edges:       Vec<Vec<Coord>>,
}

impl Player {
    /// A fresh player with full piece stock. Ships only on sea boards.
    pub fn new(number: SeatNumber, has_sea_board: bool) -> Self {
        let ships = if has_sea_board { STARTING_SHIPS } else { 0 };
        Self {
            number,
            name:                  None,
            total_vp:              0,
            is_robot:              false,
            is_built_in_robot:     false,
            robot_class:           None,
            face_id:               DEFAULT_FACE_ID,
            resources:             ResourceSet::new(),
            num_knights:           0,
            remaining:             [STARTING_ROADS, STARTING_SETTLEMENTS, STARTING_CITIES, ships],
            num_warships:          0,
            inventory:             Inventory::default(),
            pieces:                Vec::new(),
            fortress:              None,
            potential_settlements: Vec::new(),
            legal_sea_edges:       Vec::new(),
        }
    }

    pub fn remaining_pieces(&self, piece: PieceType) -> i32 {
        match piece {
            PieceType::Road       => self.remaining[0],
            PieceType::Settlement => self.remaining[1],
            PieceType::City       => self.remaining[2],
            PieceType::Ship       => self.remaining[3],
            PieceType::Fortress | PieceType::Village => 0,
        }
    }

    /// Set the remaining stock of a buildable piece type. Other types are ignored.
    pub fn set_remaining_pieces(&mut self, piece: PieceType, count: i32) {
        let slot = match piece {
            PieceType::Road       => 0,
            PieceType::Settlement => 1,
            PieceType::City       => 2,
            PieceType::Ship       => 3,
            PieceType::Fortress | PieceType::Village => return,
        };
        self.remaining[slot] = count;
    }

    /// Place a piece, taking it from stock. A city replaces the
    /// settlement at the same node, which goes back to stock.
    pub fn place_piece(&mut self, piece: PlayingPiece) {
        let piece_type = piece.piece_type;
        if piece_type == PieceType::City {
            if let Some(idx) = self.pieces.iter().position(|p| {
                p.piece_type == PieceType::Settlement && p.coord == piece.coord
            }) {
                self.pieces.remove(idx);
                let settlements = self.remaining_pieces(PieceType::Settlement);
                self.set_remaining_pieces(PieceType::Settlement, settlements + 1);
            }
        }
        let left = self.remaining_pieces(piece_type);
        self.set_remaining_pieces(piece_type, left - 1);
        self.pieces.push(piece);
    }
}

impl SeatView for Player {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn total_vp(&self) -> i32 {
        self.total_vp
    }

    fn is_robot(&self) -> bool {
        self.is_robot
    }

    fn is_built_in_robot(&self) -> bool {
        self.is_built_in_robot
    }

    fn robot_class(&self) -> Option<&str> {
        self.robot_class.as_deref()
    }

    fn face_id(&self) -> i32 {
        self.face_id
    }

    fn resource_amount(&self, resource: ResourceType) -> i32 {
        self.resources.amount(resource)
    }

    fn num_knights(&self) -> i32 {
        self.num_knights
    }

    fn num_pieces(&self, piece: PieceType) -> i32 {
        self.remaining_pieces(piece)
    }

    fn num_warships(&self) -> i32 {
        self.num_warships
    }

    fn inventory_by_state(&self, state: InventoryState) -> Vec<InventoryItem> {
        self.inventory.by_state(state)
    }

    fn pieces(&self) -> &[PlayingPiece] {
        &self.pieces
    }

    fn fortress(&self) -> Option<&PlayingPiece> {
        self.fortress.as_ref()
    }
}
