pub mod combo;
pub mod model;

pub use combo::{Combination, ComboKind};
pub use model::card::Card;
pub use model::hand::Hand;
pub use model::level::Level;
