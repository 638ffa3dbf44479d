//! Observation stations (boards) and their alliances.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The side a board scouts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alliance {
    Red,
    Blue,
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Red => "red",
            Self::Blue => "blue",
        };
        write!(f, "{s}")
    }
}

/// A scouting position. `RX` and `BX` watch a whole alliance rather than one robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Board {
    #[default]
    R1,
    R2,
    R3,
    B1,
    B2,
    B3,
    RX,
    BX,
}

impl Board {
    /// Every board, in selection order.
    pub const ALL: [Self; 8] = [
        Self::R1,
        Self::R2,
        Self::R3,
        Self::B1,
        Self::B2,
        Self::B3,
        Self::RX,
        Self::BX,
    ];

    /// The name used on the wire.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::R1 => "R1",
            Self::R2 => "R2",
            Self::R3 => "R3",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::B3 => "B3",
            Self::RX => "RX",
            Self::BX => "BX",
        }
    }

    #[must_use]
    pub const fn alliance(&self) -> Alliance {
        match self {
            Self::R1 | Self::R2 | Self::R3 | Self::RX => Alliance::Red,
            Self::B1 | Self::B2 | Self::B3 | Self::BX => Alliance::Blue,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Board {
    type Err = UnknownBoard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|board| board.name() == s)
            .ok_or_else(|| UnknownBoard(s.to_string()))
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown board names.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown board: {0}")]
pub struct UnknownBoard(String);
