use core::fmt;
use serde::{Deserialize, Serialize};

/// Every shape a play can take. `Pass` is the sentinel for "nothing on the table".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComboKind {
    Pass,
    Single,
    Pair,
    Triple,
    FullHouse,
    Straight,
    PairStraight,
    TripleStraight,
    Bomb,
    StraightFlush,
    JokerBomb,
}

impl ComboKind {
    pub const ALL: [ComboKind; 11] = [
        ComboKind::Pass,
        ComboKind::Single,
        ComboKind::Pair,
        ComboKind::Triple,
        ComboKind::FullHouse,
        ComboKind::Straight,
        ComboKind::PairStraight,
        ComboKind::TripleStraight,
        ComboKind::Bomb,
        ComboKind::StraightFlush,
        ComboKind::JokerBomb,
    ];

    pub const fn is_bomb(self) -> bool {
        matches!(
            self,
            ComboKind::Bomb | ComboKind::StraightFlush | ComboKind::JokerBomb
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ComboKind::Pass => "pass",
            ComboKind::Single => "single",
            ComboKind::Pair => "pair",
            ComboKind::Triple => "triple",
            ComboKind::FullHouse => "full_house",
            ComboKind::Straight => "straight",
            ComboKind::PairStraight => "pair_straight",
            ComboKind::TripleStraight => "triple_straight",
            ComboKind::Bomb => "bomb",
            ComboKind::StraightFlush => "straight_flush",
            ComboKind::JokerBomb => "joker_bomb",
        }
    }
}

impl fmt::Display for ComboKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
