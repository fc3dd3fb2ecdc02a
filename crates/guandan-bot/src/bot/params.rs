use super::analysis::StructureKind;
use guandan_core::combo::ComboKind;
use guandan_core::combo::DEFAULT_MAX_COMBINATIONS;
use serde::{Deserialize, Serialize};

/// Tunable strategy parameters for the heuristic engine.
///
/// Every field has a default matching the shipped tuning, so a config file only needs the
/// values it changes. The struct is read-only during a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrategyParams {
    /// Cheapest acceptable play above which the engine passes instead (default: 125)
    pub pass_cost: f32,

    /// Value groups this small count as isolated (default: 2)
    pub isolated_threshold: usize,

    /// Pairs needed before an opening lead is a pair (default: 3)
    pub min_pairs_to_lead_pair: usize,

    /// Enumeration cap per decision (default: 50000)
    pub max_candidates: usize,

    /// Shapes tried in order when leading.
    pub opening_priority: Vec<OpeningShape>,

    pub features: StrategyFeatures,
    pub cost_weights: CostWeights,
    pub quality_weights: QualityWeights,
    pub stage: StageThresholds,
    pub protection: ProtectionWeights,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            pass_cost: 125.0,
            isolated_threshold: 2,
            min_pairs_to_lead_pair: 3,
            max_candidates: DEFAULT_MAX_COMBINATIONS,
            opening_priority: OpeningShape::DEFAULT_ORDER.to_vec(),
            features: StrategyFeatures::default(),
            cost_weights: CostWeights::default(),
            quality_weights: QualityWeights::default(),
            stage: StageThresholds::default(),
            protection: ProtectionWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrategyFeatures {
    /// Lead with structures instead of the lowest card.
    pub smart_opening: bool,
    /// Score plays with the weighted base/break/balance/stage sum.
    pub hand_balance: bool,
}

impl Default for StrategyFeatures {
    fn default() -> Self {
        Self {
            smart_opening: true,
            hand_balance: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostWeights {
    pub base: f32,
    #[serde(rename = "break")]
    pub breaking: f32,
    pub balance: f32,
    pub stage: f32,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            base: 1.0,
            breaking: 2.0,
            balance: 1.5,
            stage: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QualityWeights {
    /// Ceiling for the completeness term and for the tempo term.
    pub completeness: f32,
    pub isolated_penalty: f32,
    pub bomb_bonus: f32,
    pub steps_factor: f32,
    /// Leftover cards assumed to go out per play.
    pub cards_per_step: usize,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            completeness: 40.0,
            isolated_penalty: 5.0,
            bomb_bonus: 20.0,
            steps_factor: 5.0,
            cards_per_step: 3,
        }
    }
}

/// Hand sizes separating the early, middle and late game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageThresholds {
    pub early_cards: usize,
    pub mid_cards: usize,
}

impl Default for StageThresholds {
    fn default() -> Self {
        Self {
            early_cards: 15,
            mid_cards: 8,
        }
    }
}

/// Cost charged for breaking each kind of structure held in hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProtectionWeights {
    pub joker_bomb: f32,
    pub bomb_six_plus: f32,
    pub bomb_five: f32,
    pub bomb_four: f32,
    pub straight_flush: f32,
    pub triple_straight: f32,
    pub pair_straight: f32,
    pub straight: f32,
    pub full_house: f32,
    pub triple: f32,
    pub pair: f32,
}

impl Default for ProtectionWeights {
    fn default() -> Self {
        Self {
            joker_bomb: 10_000.0,
            bomb_six_plus: 2_000.0,
            bomb_five: 1_500.0,
            bomb_four: 1_000.0,
            straight_flush: 800.0,
            triple_straight: 300.0,
            pair_straight: 200.0,
            straight: 150.0,
            full_house: 100.0,
            triple: 50.0,
            pair: 10.0,
        }
    }
}

impl ProtectionWeights {
    pub fn weight(&self, kind: StructureKind) -> f32 {
        match kind {
            StructureKind::JokerBomb => self.joker_bomb,
            StructureKind::BombSixPlus => self.bomb_six_plus,
            StructureKind::BombFive => self.bomb_five,
            StructureKind::BombFour => self.bomb_four,
            StructureKind::StraightFlush => self.straight_flush,
            StructureKind::TripleStraight => self.triple_straight,
            StructureKind::PairStraight => self.pair_straight,
            StructureKind::Straight => self.straight,
            StructureKind::FullHouse => self.full_house,
            StructureKind::Triple => self.triple,
            StructureKind::Pair => self.pair,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f32)> {
        [
            ("joker_bomb", self.joker_bomb),
            ("bomb_six_plus", self.bomb_six_plus),
            ("bomb_five", self.bomb_five),
            ("bomb_four", self.bomb_four),
            ("straight_flush", self.straight_flush),
            ("triple_straight", self.triple_straight),
            ("pair_straight", self.pair_straight),
            ("straight", self.straight),
            ("full_house", self.full_house),
            ("triple", self.triple),
            ("pair", self.pair),
        ]
        .into_iter()
    }
}

/// Shapes the opening planner may lead with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningShape {
    Straight,
    PairStraight,
    TripleStraight,
    FullHouse,
    Triple,
    Pair,
    Single,
}

impl OpeningShape {
    pub const DEFAULT_ORDER: [OpeningShape; 7] = [
        OpeningShape::Straight,
        OpeningShape::PairStraight,
        OpeningShape::TripleStraight,
        OpeningShape::FullHouse,
        OpeningShape::Triple,
        OpeningShape::Pair,
        OpeningShape::Single,
    ];

    pub const fn kind(self) -> ComboKind {
        match self {
            OpeningShape::Straight => ComboKind::Straight,
            OpeningShape::PairStraight => ComboKind::PairStraight,
            OpeningShape::TripleStraight => ComboKind::TripleStraight,
            OpeningShape::FullHouse => ComboKind::FullHouse,
            OpeningShape::Triple => ComboKind::Triple,
            OpeningShape::Pair => ComboKind::Pair,
            OpeningShape::Single => ComboKind::Single,
        }
    }

    /// Structure detected in hand for this shape; singles are picked separately.
    pub const fn structure(self) -> Option<StructureKind> {
        match self {
            OpeningShape::Straight => Some(StructureKind::Straight),
            OpeningShape::PairStraight => Some(StructureKind::PairStraight),
            OpeningShape::TripleStraight => Some(StructureKind::TripleStraight),
            OpeningShape::FullHouse => Some(StructureKind::FullHouse),
            OpeningShape::Triple => Some(StructureKind::Triple),
            OpeningShape::Pair => Some(StructureKind::Pair),
            OpeningShape::Single => None,
        }
    }
}
