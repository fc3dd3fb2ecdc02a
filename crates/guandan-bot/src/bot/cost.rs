use super::analysis::{Structure, analyze};
use super::isolated_cards;
use super::params::{StageThresholds, StrategyParams};
use guandan_core::combo::{Combination, ComboKind};
use guandan_core::model::card::Card;
use guandan_core::model::hand::Hand;
use guandan_core::model::level::Level;
use std::collections::BTreeMap;

pub const MAX_QUALITY: f32 = 100.0;
const BALANCE_FACTOR: f32 = 2.0;
const STAGE_RUN_BONUS: f32 = -5.0;
const STAGE_EARLY_SINGLE: f32 = 10.0;
const STAGE_MID_SINGLE: f32 = 5.0;

/// Components of a play's cost. `total` is what selection compares.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostBreakdown {
    pub base: f32,
    pub breaking: f32,
    pub balance: f32,
    pub stage: f32,
    pub total: f32,
}

/// A hand analysed once so that many candidates can be priced against it.
#[derive(Debug, Clone)]
pub struct HandProfile<'a> {
    hand: &'a Hand,
    structures: Vec<Structure>,
    quality: f32,
}

impl<'a> HandProfile<'a> {
    pub fn hand(&self) -> &'a Hand {
        self.hand
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    pub fn quality(&self) -> f32 {
        self.quality
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CostModel<'p> {
    params: &'p StrategyParams,
    level: Level,
}

impl<'p> CostModel<'p> {
    pub fn new(params: &'p StrategyParams, level: Level) -> Self {
        Self { params, level }
    }

    pub fn profile<'h>(&self, hand: &'h Hand) -> HandProfile<'h> {
        let structures = analyze(hand, self.level);
        let quality = self.quality_of(hand, &structures);
        HandProfile {
            hand,
            structures,
            quality,
        }
    }

    /// Cost of `candidate` against the analysed hand. Bombs are free.
    pub fn evaluate(&self, candidate: &Combination, profile: &HandProfile<'_>) -> CostBreakdown {
        if candidate.is_bomb() {
            return CostBreakdown::default();
        }

        let breaking = self.break_cost(candidate.cards(), profile.structures());
        if !self.params.features.hand_balance {
            return CostBreakdown {
                breaking,
                total: breaking,
                ..CostBreakdown::default()
            };
        }

        let kind = candidate.kind();
        let base = base_cost(kind);
        let after = profile.hand.without(candidate.cards());
        let balance = (profile.quality - self.hand_quality(&after)).max(0.0) * BALANCE_FACTOR;
        let stage = stage_cost(kind, profile.hand.len(), &self.params.stage);

        let weights = &self.params.cost_weights;
        CostBreakdown {
            base,
            breaking,
            balance,
            stage,
            total: base * weights.base
                + breaking * weights.breaking
                + balance * weights.balance
                + stage * weights.stage,
        }
    }

    pub fn cost(&self, candidate: &Combination, hand: &Hand) -> f32 {
        self.evaluate(candidate, &self.profile(hand)).total
    }

    /// Heaviest structure the play would split. The worst single loss, not the sum.
    pub fn break_cost(&self, played: &[Card], structures: &[Structure]) -> f32 {
        structures
            .iter()
            .filter(|structure| structure.is_broken_by(played))
            .map(|structure| self.params.protection.weight(structure.kind))
            .fold(0.0, f32::max)
    }

    /// Hand quality in `0..=100`; an empty hand is perfect.
    pub fn hand_quality(&self, hand: &Hand) -> f32 {
        if hand.is_empty() {
            return MAX_QUALITY;
        }
        let structures = analyze(hand, self.level);
        self.quality_of(hand, &structures)
    }

    fn quality_of(&self, hand: &Hand, structures: &[Structure]) -> f32 {
        if hand.is_empty() {
            return MAX_QUALITY;
        }
        let weights = &self.params.quality_weights;
        let complete: Vec<&Structure> = structures
            .iter()
            .filter(|structure| structure.kind.is_complete())
            .collect();

        let covered = covered_cards(&complete).min(hand.len()) as f32;
        let completeness =
            (weights.completeness * covered / hand.len() as f32).min(weights.completeness);

        let isolated = isolated_cards(hand, self.level, self.params.isolated_threshold).len();
        let bombs = structures
            .iter()
            .filter(|structure| structure.kind.is_bomb())
            .count();
        let steps = self.estimate_steps(hand, &complete);
        let tempo = (weights.completeness - weights.steps_factor * steps as f32).max(0.0);

        let score = completeness - weights.isolated_penalty * isolated as f32
            + weights.bomb_bonus * bombs as f32
            + tempo;
        score.clamp(0.0, MAX_QUALITY)
    }

    /// Plays needed to empty the hand: disjoint complete structures, most valuable first,
    /// then the leftovers a few cards at a time.
    fn estimate_steps(&self, hand: &Hand, complete: &[&Structure]) -> usize {
        let mut ordered: Vec<&Structure> = complete.to_vec();
        ordered.sort_by(|a, b| {
            let wa = self.params.protection.weight(a.kind);
            let wb = self.params.protection.weight(b.kind);
            wb.total_cmp(&wa).then(b.len().cmp(&a.len()))
        });

        let mut pool = hand.cards().to_vec();
        let mut steps = 0;
        for structure in ordered {
            if take_all(&mut pool, &structure.cards) {
                steps += 1;
            }
        }
        let per_step = self.params.quality_weights.cards_per_step.max(1);
        steps + pool.len().div_ceil(per_step)
    }
}

pub fn base_cost(kind: ComboKind) -> f32 {
    match kind {
        ComboKind::Single => 5.0,
        ComboKind::Pair => 3.0,
        ComboKind::Triple => 2.0,
        ComboKind::Bomb | ComboKind::StraightFlush | ComboKind::JokerBomb | ComboKind::Pass => 0.0,
        ComboKind::FullHouse
        | ComboKind::Straight
        | ComboKind::PairStraight
        | ComboKind::TripleStraight => 1.0,
    }
}

/// Early on, runs are encouraged and singles discouraged; late in the hand nothing applies.
pub fn stage_cost(kind: ComboKind, hand_len: usize, stage: &StageThresholds) -> f32 {
    if hand_len > stage.early_cards {
        match kind {
            ComboKind::Straight | ComboKind::PairStraight | ComboKind::TripleStraight => {
                STAGE_RUN_BONUS
            }
            ComboKind::Single => STAGE_EARLY_SINGLE,
            _ => 0.0,
        }
    } else if hand_len > stage.mid_cards && kind == ComboKind::Single {
        STAGE_MID_SINGLE
    } else {
        0.0
    }
}

/// Distinct cards inside at least one structure, duplicates counted up to their copies.
fn covered_cards(structures: &[&Structure]) -> usize {
    let mut covered: BTreeMap<Card, usize> = BTreeMap::new();
    for structure in structures {
        let mut counts: BTreeMap<Card, usize> = BTreeMap::new();
        for &card in &structure.cards {
            *counts.entry(card).or_default() += 1;
        }
        for (card, count) in counts {
            let slot = covered.entry(card).or_default();
            *slot = (*slot).max(count);
        }
    }
    covered.values().sum()
}

fn take_all(pool: &mut Vec<Card>, cards: &[Card]) -> bool {
    let mut rest = pool.clone();
    for card in cards {
        match rest.iter().position(|c| c == card) {
            Some(index) => {
                rest.swap_remove(index);
            }
            None => return false,
        }
    }
    *pool = rest;
    true
}
