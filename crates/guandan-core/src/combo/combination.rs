use super::kind::ComboKind;
use crate::model::card::Card;
use crate::model::level::Level;
use core::fmt;

/// Main value carried by the joker bomb.
pub const JOKER_BOMB_VALUE: u16 = 1000;

/// A classified set of cards. Cards are kept sorted so equal plays compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Combination {
    kind: ComboKind,
    cards: Vec<Card>,
    main_value: u16,
    length: u8,
}

impl Combination {
    pub(crate) fn new(kind: ComboKind, mut cards: Vec<Card>, main_value: u16, length: u8) -> Self {
        cards.sort_unstable();
        Self {
            kind,
            cards,
            main_value,
            length,
        }
    }

    pub fn pass() -> Self {
        Self::new(ComboKind::Pass, Vec::new(), 0, 0)
    }

    pub fn kind(&self) -> ComboKind {
        self.kind
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Rank used to order combinations of the same kind and length.
    pub fn main_value(&self) -> u16 {
        self.main_value
    }

    /// Card count for bombs, rank groups for runs, 1 for the fixed shapes.
    pub fn length(&self) -> u8 {
        self.length
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_pass(&self) -> bool {
        self.kind == ComboKind::Pass
    }

    pub fn is_bomb(&self) -> bool {
        self.kind.is_bomb()
    }

    /// Sum of comparison values, used to find the "smallest" of several plays.
    pub fn total_value(&self, level: Level) -> u32 {
        self.cards.iter().map(|c| c.value(level) as u32).sum()
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.kind)?;
        for (index, card) in self.cards.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str("]")
    }
}
