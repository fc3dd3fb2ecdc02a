mod analysis;
mod cost;
mod opening;
mod params;
mod play;

pub use analysis::{Structure, StructureKind, analyze};
pub use cost::{CostBreakdown, CostModel, HandProfile, MAX_QUALITY, base_cost, stage_cost};
pub use opening::OpeningPlanner;
pub use params::{
    CostWeights, OpeningShape, ProtectionWeights, QualityWeights, StageThresholds,
    StrategyFeatures, StrategyParams,
};
pub use play::{ResponseChoice, ResponsePlanner, ScoredPlay, type_priority};

use guandan_core::model::card::Card;
use guandan_core::model::hand::Hand;
use guandan_core::model::level::Level;

/// Everything a planner needs for one decision.
#[derive(Debug, Clone, Copy)]
pub struct BotContext<'a> {
    pub hand: &'a Hand,
    pub level: Level,
    pub params: &'a StrategyParams,
}

impl<'a> BotContext<'a> {
    pub fn new(hand: &'a Hand, level: Level, params: &'a StrategyParams) -> Self {
        Self {
            hand,
            level,
            params,
        }
    }

    pub fn pair_count(&self) -> usize {
        count_pairs(self.hand, self.level)
    }

    pub fn single_count(&self) -> usize {
        count_singles(self.hand, self.level)
    }

    pub fn isolated_cards(&self) -> Vec<Card> {
        isolated_cards(self.hand, self.level, self.params.isolated_threshold)
    }
}

/// Disjoint pairs the hand could form, per value group.
pub fn count_pairs(hand: &Hand, level: Level) -> usize {
    hand.groups(level)
        .values()
        .filter(|cards| cards.len() >= 2)
        .map(|cards| cards.len() / 2)
        .sum()
}

/// Cards left unpaired once every group is split into pairs.
pub fn count_singles(hand: &Hand, level: Level) -> usize {
    hand.groups(level)
        .values()
        .map(|cards| if cards.len() == 1 { 1 } else { cards.len() % 2 })
        .sum()
}

/// Cards whose value group holds at most `threshold` cards.
pub fn isolated_cards(hand: &Hand, level: Level, threshold: usize) -> Vec<Card> {
    hand.groups(level)
        .into_values()
        .filter(|cards| cards.len() <= threshold)
        .flatten()
        .collect()
}
