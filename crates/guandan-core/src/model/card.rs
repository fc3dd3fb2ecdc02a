use crate::model::error::CardError;
use crate::model::level::Level;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

pub const RED_JOKER_VALUE: u8 = 100;
pub const BLACK_JOKER_VALUE: u8 = 99;
/// Comparison value of any card matching the level rank.
pub const WILD_VALUE: u8 = 50;
pub const ACE_VALUE: u8 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "WireCard", into = "WireCard")]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Builds a card without checking that jokers carry the joker suit; use
    /// [`Card::try_new`] for anything that did not come from a literal.
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn try_new(suit: Suit, number: u8) -> Result<Self, CardError> {
        let rank = Rank::from_number(number).ok_or(CardError::UnknownNumber { number })?;
        if rank.is_joker() != suit.is_joker() {
            return Err(CardError::SuitMismatch { suit, rank });
        }
        Ok(Self { rank, suit })
    }

    pub const fn black_joker() -> Self {
        Self::new(Rank::BlackJoker, Suit::Joker)
    }

    pub const fn red_joker() -> Self {
        Self::new(Rank::RedJoker, Suit::Joker)
    }

    pub const fn is_joker(self) -> bool {
        self.rank.is_joker()
    }

    pub fn is_level(self, level: Level) -> bool {
        !self.is_joker() && self.rank == level.rank()
    }

    /// Comparison value under `level`: jokers, then level cards, then ace down to two.
    pub fn value(self, level: Level) -> u8 {
        match self.rank {
            Rank::RedJoker => RED_JOKER_VALUE,
            Rank::BlackJoker => BLACK_JOKER_VALUE,
            _ if self.is_level(level) => WILD_VALUE,
            Rank::Ace => ACE_VALUE,
            rank => rank.number(),
        }
    }

    /// Position used when checking runs. Level cards and aces both sit on top (14),
    /// jokers never take part in a run.
    pub fn run_value(self, level: Level) -> Option<u8> {
        if self.is_joker() {
            return None;
        }
        match self.value(level) {
            WILD_VALUE => Some(ACE_VALUE),
            value => Some(value),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_joker() {
            write!(f, "{}", self.rank)
        } else {
            write!(f, "{}{}", self.rank, self.suit)
        }
    }
}

/// `{"color": "Spade", "number": 1}` as exchanged with the table server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireCard {
    pub color: Suit,
    pub number: u8,
}

impl TryFrom<WireCard> for Card {
    type Error = CardError;

    fn try_from(wire: WireCard) -> Result<Self, Self::Error> {
        Card::try_new(wire.color, wire.number)
    }
}

impl From<Card> for WireCard {
    fn from(card: Card) -> Self {
        WireCard {
            color: card.suit,
            number: card.rank.number(),
        }
    }
}
