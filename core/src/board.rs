//! Board layout and potential settlement locations.
//!
//! The layout itself is produced by a [`BoardProjector`], which knows the
//! board's encoding. The snapshot only accepts the two message shapes it
//! understands and stores exactly one of them.

use crate::{
    error::{SaveGameError, SaveResult},
    session::LiveSession,
    types::{Coord, SeatSelector},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Message type code of an original-format layout message.
pub const BOARD_LAYOUT_MESSAGE: i32 = 1014;
/// Message type code of a generalized layout message.
pub const BOARD_LAYOUT2_MESSAGE: i32 = 1082;

/// Board encoding formats. Each uses its own coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum BoardEncodingFormat {
    /// Classic 4-player board.
    Original,
    /// 6-player extension board.
    SixPlayer,
    /// Large board with sea, used by scenarios.
    Large,
}

impl BoardEncodingFormat {
    pub const fn code(self) -> i32 {
        match self {
            Self::Original  => 1,
            Self::SixPlayer => 2,
            Self::Large     => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            1 => Self::Original,
            2 => Self::SixPlayer,
            3 => Self::Large,
            _ => return None,
        })
    }

    pub const fn has_sea(self) -> bool {
        matches!(self, Self::Large)
    }
}

impl From<BoardEncodingFormat> for i32 {
    fn from(format: BoardEncodingFormat) -> Self {
        format.code()
    }
}

impl TryFrom<i32> for BoardEncodingFormat {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown board encoding format {code}"))
    }
}

/// Positional layout of an original-format board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalLayout {
    pub hex_layout:    Vec<i32>,
    pub number_layout: Vec<i32>,
    pub robber_hex:    Coord,
}

/// One named part of a generalized layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutPart {
    Int(i32),
    IntArray(Vec<i32>),
    Text(String),
}

/// Layout as named parts plus the encoding format they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralLayout {
    pub encoding_format: BoardEncodingFormat,
    pub parts:           BTreeMap<String, LayoutPart>,
}

impl GeneralLayout {
    pub const HEX_LAYOUT:    &'static str = "HL";
    pub const NUMBER_LAYOUT: &'static str = "NL";
    pub const ROBBER_HEX:    &'static str = "RH";
    pub const PORT_LAYOUT:   &'static str = "PL";
    pub const LAND_HEXES:    &'static str = "LH";
    pub const PIRATE_HEX:    &'static str = "PH";

    pub fn new(encoding_format: BoardEncodingFormat) -> Self {
        Self {
            encoding_format,
            parts: BTreeMap::new(),
        }
    }

    pub fn int_part(&self, key: &str) -> Option<i32> {
        match self.parts.get(key) {
            Some(LayoutPart::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn array_part(&self, key: &str) -> Option<&[i32]> {
        match self.parts.get(key) {
            Some(LayoutPart::IntArray(values)) => Some(values.as_slice()),
            _ => None,
        }
    }
}

/// What a board projector returns for a session's layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutMessage {
    Layout(OriginalLayout),
    Layout2(GeneralLayout),
    /// Some other message shape, from a newer board subsystem.
    Other { message_type: i32, type_name: String },
}

impl LayoutMessage {
    pub fn message_type(&self) -> i32 {
        match self {
            Self::Layout(_) => BOARD_LAYOUT_MESSAGE,
            Self::Layout2(_) => BOARD_LAYOUT2_MESSAGE,
            Self::Other { message_type, .. } => *message_type,
        }
    }
}

/// Potential settlement nodes for one seat, or for every seat at once.
///
/// Boards split into land areas also carry the legal nodes per area, and
/// sea boards the edges where the seat may place ships.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotentialSettlements {
    pub player_number:          SeatSelector,
    #[serde(default)]
    pub nodes:                  Vec<Coord>,
    /// 0 unless the board is split into land areas.
    #[serde(default)]
    pub land_area_count:        i32,
    #[serde(default)]
    pub starting_land_area:     i32,
    /// Legal nodes of each land area, indexed by area number.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub land_areas_legal_nodes: Vec<Vec<Coord>>,
    /// Legal ship edges, grouped by the seat's coastline segments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub legal_sea_edges:        Vec<Vec<Coord>>,
}

/// Produces format-specific board data for a session.
pub trait BoardProjector<S: LiveSession + ?Sized> {
    fn layout_message(&self, session: &S) -> LayoutMessage;

    /// Either one record per seat, or one record with `SeatSelector::All`
    /// when every seat has the same potentials.
    fn potentials(&self, session: &S, seats: SeatSelector) -> Vec<PotentialSettlements>;
}

/// Exactly one of the two layout shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardLayout {
    Layout1(OriginalLayout),
    Layout2(GeneralLayout),
}

/// Board layout and contents, as stored in a saved game.
///
/// Board height and width aren't stored: they follow from the encoding format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub layout:            BoardLayout,
    #[serde(default)]
    pub player_potentials: Vec<PotentialSettlements>,
}

impl BoardSnapshot {
    /// Capture the layout and every seat's potentials from one board state.
    pub fn capture<S, P>(session: &S, projector: &P) -> SaveResult<Self>
    where
        S: LiveSession + ?Sized,
        P: BoardProjector<S> + ?Sized,
    {
        let layout = match projector.layout_message(session) {
            LayoutMessage::Layout(layout) => BoardLayout::Layout1(layout),
            LayoutMessage::Layout2(layout) => BoardLayout::Layout2(layout),
            LayoutMessage::Other { message_type, type_name } => {
                log::warn!(
                    "game '{}': unexpected board layout message {message_type} ({type_name})",
                    session.name()
                );
                return Err(SaveGameError::UnsupportedLayout { message_type, type_name });
            }
        };

        let player_potentials = projector.potentials(session, SeatSelector::All);

        Ok(Self {
            layout,
            player_potentials,
        })
    }

    pub fn encoding_format(&self) -> BoardEncodingFormat {
        match &self.layout {
            BoardLayout::Layout1(_) => BoardEncodingFormat::Original,
            BoardLayout::Layout2(layout) => layout.encoding_format,
        }
    }
}
