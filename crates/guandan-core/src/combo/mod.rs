//! Combinations: classification, ordering and enumeration.
//!
//! - `classify`: card set to typed [`Combination`].
//! - `compare`: strength ordering, including the bomb hierarchy.
//! - `generate`: every play a hand can make against a target.

pub mod classify;
pub mod combination;
pub mod compare;
pub mod generate;
pub mod kind;
pub mod runs;

pub use classify::classify;
pub use combination::{Combination, JOKER_BOMB_VALUE};
pub use compare::{JOKER_BOMB_RANK, STRAIGHT_FLUSH_BASE, beats, bomb_rank, is_bomb};
pub use generate::{DEFAULT_MAX_COMBINATIONS, GenerateLimit, Generated, generate, generate_shape};
pub use kind::ComboKind;
