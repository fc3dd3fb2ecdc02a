use core::fmt;
use serde::{Deserialize, Serialize};

/// Card colour as it appears on the wire. Jokers carry their own marker instead of a suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Spade = 0,
    Heart = 1,
    Club = 2,
    Diamond = 3,
    Joker = 4,
}

impl Suit {
    pub const REGULAR: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Club, Suit::Diamond];

    pub const fn is_joker(self) -> bool {
        matches!(self, Suit::Joker)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Suit::Spade => "Spade",
            Suit::Heart => "Heart",
            Suit::Club => "Club",
            Suit::Diamond => "Diamond",
            Suit::Joker => "Joker",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Spade => "S",
            Suit::Heart => "H",
            Suit::Club => "C",
            Suit::Diamond => "D",
            Suit::Joker => "*",
        };
        f.write_str(symbol)
    }
}
