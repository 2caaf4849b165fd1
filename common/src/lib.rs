//====================================================================

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

//====================================================================

pub use rustc_hash::{FxHashMap, FxHashSet};

//====================================================================

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum PositionGroup {
    A,
    B,
    C,
}

impl PositionGroup {
    pub const ALL: [PositionGroup; 3] = [PositionGroup::A, PositionGroup::B, PositionGroup::C];

    #[inline]
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL
            .into_iter()
            .filter(move |position| position.group() == *self)
    }
}

impl Display for PositionGroup {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PositionGroup::A => "A",
            PositionGroup::B => "B",
            PositionGroup::C => "C",
        };
        write!(f, "{}", name)
    }
}

//====================================================================

/// One of the twelve named squad slots.
///
/// Declaration order is the enumeration order used everywhere a roster is
/// walked (`PA1, PA2, .. PC4`), so the derived `Ord` doubles as that order.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "PA1")]
    A1,
    #[serde(rename = "PA2")]
    A2,
    #[serde(rename = "PA3")]
    A3,
    #[serde(rename = "PA4")]
    A4,
    #[serde(rename = "PB1")]
    B1,
    #[serde(rename = "PB2")]
    B2,
    #[serde(rename = "PB3")]
    B3,
    #[serde(rename = "PB4")]
    B4,
    #[serde(rename = "PC1")]
    C1,
    #[serde(rename = "PC2")]
    C2,
    #[serde(rename = "PC3")]
    C3,
    #[serde(rename = "PC4")]
    C4,
}

impl Position {
    pub const COUNT: usize = 12;

    pub const ALL: [Position; Self::COUNT] = [
        Position::A1,
        Position::A2,
        Position::A3,
        Position::A4,
        Position::B1,
        Position::B2,
        Position::B3,
        Position::B4,
        Position::C1,
        Position::C2,
        Position::C3,
        Position::C4,
    ];

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn group(&self) -> PositionGroup {
        match self.index() / 4 {
            0 => PositionGroup::A,
            1 => PositionGroup::B,
            _ => PositionGroup::C,
        }
    }

    /// Slot number within the group, starting at 1.
    #[inline]
    pub fn slot(&self) -> u8 {
        (self.index() % 4) as u8 + 1
    }

    pub fn key(&self) -> &'static str {
        match self {
            Position::A1 => "PA1",
            Position::A2 => "PA2",
            Position::A3 => "PA3",
            Position::A4 => "PA4",
            Position::B1 => "PB1",
            Position::B2 => "PB2",
            Position::B3 => "PB3",
            Position::B4 => "PB4",
            Position::C1 => "PC1",
            Position::C2 => "PC2",
            Position::C3 => "PC3",
            Position::C4 => "PC4",
        }
    }
}

impl Display for Position {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownPosition(pub String);

impl Display for UnknownPosition {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown position '{}'", self.0)
    }
}

impl std::error::Error for UnknownPosition {}

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|position| position.key() == s)
            .ok_or_else(|| UnknownPosition(s.into()))
    }
}

//====================================================================


//====================================================================
