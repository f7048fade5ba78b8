//! Player element tags and the ordered (tag, value) list kept per seat.
//!
//! RULE: Tag codes are persisted. Never renumber, only append.
//!
//! In memory the list is typed pairs. Only at the serde boundary is it
//! flattened to `[tag, value, tag, value, ...]`, so the persisted length
//! is always even.

use crate::piece::PieceType;
use serde::{Deserialize, Serialize};

/// Resource types, in ascending code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceType {
    Clay,
    Ore,
    Sheep,
    Wheat,
    Wood,
    /// Resources whose type other players can't see.
    Unknown,
}

impl ResourceType {
    pub const ALL: [Self; 6] = [
        Self::Clay,
        Self::Ore,
        Self::Sheep,
        Self::Wheat,
        Self::Wood,
        Self::Unknown,
    ];

    pub const fn code(self) -> i32 {
        match self {
            Self::Clay    => 1,
            Self::Ore     => 2,
            Self::Sheep   => 3,
            Self::Wheat   => 4,
            Self::Wood    => 5,
            Self::Unknown => 6,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self.code() as usize - 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementType {
    Clay,
    Ore,
    Sheep,
    Wheat,
    Wood,
    UnknownResource,
    Roads,
    Settlements,
    Cities,
    Ships,
    NumKnights,
    ScenarioWarshipCount,
}

impl ElementType {
    pub const fn code(self) -> i32 {
        match self {
            Self::Clay                 => 1,
            Self::Ore                  => 2,
            Self::Sheep                => 3,
            Self::Wheat                => 4,
            Self::Wood                 => 5,
            Self::UnknownResource      => 6,
            Self::Roads                => 10,
            Self::Settlements          => 11,
            Self::Cities               => 12,
            Self::Ships                => 13,
            Self::NumKnights           => 15,
            Self::ScenarioWarshipCount => 23,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            1  => Self::Clay,
            2  => Self::Ore,
            3  => Self::Sheep,
            4  => Self::Wheat,
            5  => Self::Wood,
            6  => Self::UnknownResource,
            10 => Self::Roads,
            11 => Self::Settlements,
            12 => Self::Cities,
            13 => Self::Ships,
            15 => Self::NumKnights,
            23 => Self::ScenarioWarshipCount,
            _ => return None,
        })
    }

    /// Resource element codes equal their resource type codes.
    pub const fn for_resource(resource: ResourceType) -> Self {
        match resource {
            ResourceType::Clay    => Self::Clay,
            ResourceType::Ore     => Self::Ore,
            ResourceType::Sheep   => Self::Sheep,
            ResourceType::Wheat   => Self::Wheat,
            ResourceType::Wood    => Self::Wood,
            ResourceType::Unknown => Self::UnknownResource,
        }
    }

    pub const fn resource(self) -> Option<ResourceType> {
        match self {
            Self::Clay            => Some(ResourceType::Clay),
            Self::Ore             => Some(ResourceType::Ore),
            Self::Sheep           => Some(ResourceType::Sheep),
            Self::Wheat           => Some(ResourceType::Wheat),
            Self::Wood            => Some(ResourceType::Wood),
            Self::UnknownResource => Some(ResourceType::Unknown),
            _ => None,
        }
    }

    /// Element holding the remaining stock of a buildable piece type.
    pub const fn for_remaining_pieces(piece: PieceType) -> Option<Self> {
        match piece {
            PieceType::Road       => Some(Self::Roads),
            PieceType::Settlement => Some(Self::Settlements),
            PieceType::City       => Some(Self::Cities),
            PieceType::Ship       => Some(Self::Ships),
            PieceType::Fortress | PieceType::Village => None,
        }
    }

    pub const fn remaining_pieces(self) -> Option<PieceType> {
        match self {
            Self::Roads       => Some(PieceType::Road),
            Self::Settlements => Some(PieceType::Settlement),
            Self::Cities      => Some(PieceType::City),
            Self::Ships       => Some(PieceType::Ship),
            _ => None,
        }
    }
}

/// Ordered (tag, value) pairs: resource counts, knights, remaining pieces
/// and scenario counters. Consumers look values up by tag; the order is the
/// capture order and is kept as-is through serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<i32>", try_from = "Vec<i32>")]
pub struct PlayerElements {
    pairs: Vec<(ElementType, i32)>,
}

impl PlayerElements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: ElementType, value: i32) {
        self.pairs.push((element, value));
    }

    /// Value of the first pair with this tag.
    pub fn get(&self, element: ElementType) -> Option<i32> {
        self.pairs
            .iter()
            .find(|(tag, _)| *tag == element)
            .map(|&(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementType, i32)> + '_ {
        self.pairs.iter().copied()
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The persisted form: tag, value, tag, value, ...
    pub fn to_flat(&self) -> Vec<i32> {
        self.pairs
            .iter()
            .flat_map(|&(tag, value)| [tag.code(), value])
            .collect()
    }
}

impl From<PlayerElements> for Vec<i32> {
    fn from(elements: PlayerElements) -> Self {
        elements.to_flat()
    }
}

impl TryFrom<Vec<i32>> for PlayerElements {
    type Error = String;

    fn try_from(flat: Vec<i32>) -> Result<Self, Self::Error> {
        if flat.len() % 2 != 0 {
            return Err(format!(
                "elements must be (type, value) pairs, got odd length {}",
                flat.len()
            ));
        }
        let pairs = flat
            .chunks_exact(2)
            .map(|pair| {
                ElementType::from_code(pair[0])
                    .map(|tag| (tag, pair[1]))
                    .ok_or_else(|| format!("unknown player element type {}", pair[0]))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { pairs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_form_keeps_pair_order() {
        let mut elements = PlayerElements::new();
        elements.push(ElementType::Wood, 1);
        elements.push(ElementType::Clay, 2);
        elements.push(ElementType::Roads, 14);

        assert_eq!(elements.to_flat(), vec![5, 1, 1, 2, 10, 14]);
        assert_eq!(elements.get(ElementType::Clay), Some(2));
        assert_eq!(elements.get(ElementType::Ships), None);
    }

    #[test]
    fn odd_length_is_rejected() {
        let err = PlayerElements::try_from(vec![1, 2, 3]).unwrap_err();
        assert!(err.contains("odd length"), "unexpected error: {err}");
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = PlayerElements::try_from(vec![1, 2, 99, 0]).unwrap_err();
        assert!(err.contains("99"), "unexpected error: {err}");
    }
}
