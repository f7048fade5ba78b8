//! In-memory board and the projector that turns it into layout messages.

use super::{Game, Player};
use crate::{
    board::{
        BoardEncodingFormat, BoardLayout, BoardProjector, GeneralLayout, LayoutMessage,
        LayoutPart, OriginalLayout, PotentialSettlements,
    },
    error::{SaveGameError, SaveResult},
    types::{Coord, SeatSelector},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub encoding_format:        BoardEncodingFormat,
    pub hex_layout:             Vec<i32>,
    pub number_layout:          Vec<i32>,
    pub robber_hex:             Coord,
    /// Port types and facings. Original boards encode ports in `hex_layout`.
    pub port_layout:            Vec<i32>,
    /// Land hex coordinates, large boards only.
    pub land_hexes:             Vec<Coord>,
    /// 0 when the board has no pirate.
    pub pirate_hex:             Coord,
    /// Land areas for initial placement; 0 when the board has none.
    pub land_area_count:        i32,
    pub starting_land_area:     i32,
    pub land_areas_legal_nodes: Vec<Vec<Coord>>,
}

impl Board {
    pub fn new(encoding_format: BoardEncodingFormat) -> Self {
        Self {
            encoding_format,
            hex_layout:             Vec::new(),
            number_layout:          Vec::new(),
            robber_hex:             -1,
            port_layout:            Vec::new(),
            land_hexes:             Vec::new(),
            pirate_hex:             0,
            land_area_count:        0,
            starting_land_area:     0,
            land_areas_legal_nodes: Vec::new(),
        }
    }

    /// Layout message for this board: original boards use the positional
    /// shape, all others the named-parts shape.
    pub fn layout_message(&self) -> LayoutMessage {
        if self.encoding_format == BoardEncodingFormat::Original {
            return LayoutMessage::Layout(OriginalLayout {
                hex_layout:    self.hex_layout.clone(),
                number_layout: self.number_layout.clone(),
                robber_hex:    self.robber_hex,
            });
        }

        let mut layout = GeneralLayout::new(self.encoding_format);
        let parts = &mut layout.parts;
        parts.insert(GeneralLayout::HEX_LAYOUT.into(), LayoutPart::IntArray(self.hex_layout.clone()));
        parts.insert(GeneralLayout::NUMBER_LAYOUT.into(), LayoutPart::IntArray(self.number_layout.clone()));
        parts.insert(GeneralLayout::ROBBER_HEX.into(), LayoutPart::Int(self.robber_hex));
        if !self.port_layout.is_empty() {
            parts.insert(GeneralLayout::PORT_LAYOUT.into(), LayoutPart::IntArray(self.port_layout.clone()));
        }
        if !self.land_hexes.is_empty() {
            parts.insert(GeneralLayout::LAND_HEXES.into(), LayoutPart::IntArray(self.land_hexes.clone()));
        }
        if self.pirate_hex != 0 {
            parts.insert(GeneralLayout::PIRATE_HEX.into(), LayoutPart::Int(self.pirate_hex));
        }
        LayoutMessage::Layout2(layout)
    }

    /// Take the land-area fields from a saved potentials record.
    pub fn restore_land_areas(&mut self, record: &PotentialSettlements) {
        self.land_area_count = record.land_area_count;
        self.starting_land_area = record.starting_land_area;
        self.land_areas_legal_nodes = record.land_areas_legal_nodes.clone();
    }

    /// Rebuild a board from a saved layout. Land areas come from the
    /// potentials records, see [`Board::restore_land_areas`].
    pub fn from_layout(layout: &BoardLayout) -> SaveResult<Self> {
        match layout {
            BoardLayout::Layout1(original) => Ok(Self {
                hex_layout:    original.hex_layout.clone(),
                number_layout: original.number_layout.clone(),
                robber_hex:    original.robber_hex,
                ..Self::new(BoardEncodingFormat::Original)
            }),
            BoardLayout::Layout2(general) => {
                let required = |key: &str| {
                    general.array_part(key).map(<[i32]>::to_vec).ok_or_else(|| {
                        SaveGameError::invalid(format!("board layout is missing part '{key}'"))
                    })
                };
                let optional = |key: &str| general.array_part(key).map(<[i32]>::to_vec);
                Ok(Self {
                    encoding_format: general.encoding_format,
                    hex_layout:      required(GeneralLayout::HEX_LAYOUT)?,
                    number_layout:   required(GeneralLayout::NUMBER_LAYOUT)?,
                    robber_hex:      general.int_part(GeneralLayout::ROBBER_HEX).unwrap_or(-1),
                    port_layout:     optional(GeneralLayout::PORT_LAYOUT).unwrap_or_default(),
                    land_hexes:      optional(GeneralLayout::LAND_HEXES).unwrap_or_default(),
                    pirate_hex:      general.int_part(GeneralLayout::PIRATE_HEX).unwrap_or(0),
                    ..Self::new(general.encoding_format)
                })
            }
        }
    }
}

/// Board projector for [`Game`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBoardProjector;

impl BoardProjector<Game> for StandardBoardProjector {
    fn layout_message(&self, game: &Game) -> LayoutMessage {
        game.board.layout_message()
    }

    fn potentials(&self, game: &Game, seats: SeatSelector) -> Vec<PotentialSettlements> {
        let board = &game.board;
        let record = |player_number: SeatSelector, player: &Player| PotentialSettlements {
            player_number,
            nodes:                  player.potential_settlements.clone(),
            land_area_count:        board.land_area_count,
            starting_land_area:     board.starting_land_area,
            land_areas_legal_nodes: board.land_areas_legal_nodes.clone(),
            legal_sea_edges:        player.legal_sea_edges.clone(),
        };

        match seats {
            SeatSelector::Seat(pn) => game
                .players
                .get(pn)
                .map(|p| vec![record(seats, p)])
                .unwrap_or_default(),
            SeatSelector::All => {
                let Some(first) = game.players.first() else {
                    return Vec::new();
                };
                let shared = game.players.iter().all(|p| {
                    p.potential_settlements == first.potential_settlements
                        && p.legal_sea_edges == first.legal_sea_edges
                });
                if shared {
                    vec![record(SeatSelector::All, first)]
                } else {
                    game.players
                        .iter()
                        .map(|p| record(SeatSelector::Seat(p.number), p))
                        .collect()
                }
            }
        }
    }
}
