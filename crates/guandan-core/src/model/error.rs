use super::rank::Rank;
use super::suit::Suit;
use thiserror::Error;

/// Rejections raised while decoding cards or levels from external input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("unknown card number {number}")]
    UnknownNumber { number: u8 },
    #[error("{rank:?} cannot be combined with suit {suit:?}")]
    SuitMismatch { suit: Suit, rank: Rank },
    #[error("level {level} outside 2..=14")]
    LevelOutOfRange { level: i64 },
}
