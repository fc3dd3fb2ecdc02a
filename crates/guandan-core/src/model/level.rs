use super::error::CardError;
use super::rank::Rank;
use core::fmt;
use serde::{Deserialize, Serialize};

/// The wild rank of the current round. Cards of this rank sit just below the jokers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Level(Rank);

impl Level {
    pub const fn new(rank: Rank) -> Option<Self> {
        if rank.is_joker() {
            None
        } else {
            Some(Self(rank))
        }
    }

    /// Decodes the wire level: 2..=13 map to their rank, 14 (and the legacy 1) to the ace.
    pub fn from_wire(level: i64) -> Result<Self, CardError> {
        match level {
            1 | 14 => Ok(Self(Rank::Ace)),
            2..=13 => Rank::from_number(level as u8)
                .map(Self)
                .ok_or(CardError::LevelOutOfRange { level }),
            _ => Err(CardError::LevelOutOfRange { level }),
        }
    }

    pub const fn rank(self) -> Rank {
        self.0
    }

    pub const fn wire(self) -> u8 {
        match self.0 {
            Rank::Ace => 14,
            rank => rank.number(),
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Self(Rank::Two)
    }
}

impl TryFrom<i64> for Level {
    type Error = CardError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_wire(value)
    }
}

impl From<Level> for i64 {
    fn from(level: Level) -> Self {
        level.wire() as i64
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {}", self.0)
    }
}
