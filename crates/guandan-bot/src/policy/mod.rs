mod heuristic;

pub use heuristic::HeuristicPolicy;

use crate::bot::StrategyParams;
use guandan_core::combo::Combination;
use guandan_core::model::card::Card;
use guandan_core::model::hand::Hand;
use guandan_core::model::level::Level;
use serde::Serialize;

/// Context provided to policies for one decision.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    pub hand: &'a Hand,
    /// Cards on the table; empty when leading.
    pub last_play: &'a [Card],
    pub level: Level,
    pub params: &'a StrategyParams,
}

/// Why the engine settled on its play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    Opening,
    InvalidLastPlay,
    NoBeatingPlay,
    OverPassThreshold,
    Played,
}

impl DecisionReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            DecisionReason::Opening => "opening",
            DecisionReason::InvalidLastPlay => "invalid_last_play",
            DecisionReason::NoBeatingPlay => "no_beating_play",
            DecisionReason::OverPassThreshold => "over_pass_threshold",
            DecisionReason::Played => "played",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecisionStats {
    /// Plays enumerated against the table.
    pub candidates: usize,
    /// Of those, plays that beat it.
    pub beating: usize,
    pub truncated: bool,
    pub elapsed_us: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// The play; `Pass` when declining.
    pub play: Combination,
    pub reason: DecisionReason,
    /// Cost of the best answer when one was priced.
    pub cost: Option<f32>,
    pub stats: DecisionStats,
}

impl Decision {
    pub fn cards(&self) -> &[Card] {
        self.play.cards()
    }

    pub fn is_pass(&self) -> bool {
        self.play.is_pass()
    }
}

/// Unified interface for play decisions.
pub trait Policy: Send + Sync {
    fn decide(&self, ctx: &PolicyContext<'_>) -> Decision;
}
