pub mod card;
pub mod deck;
pub mod error;
pub mod hand;
pub mod level;
pub mod rank;
pub mod suit;
