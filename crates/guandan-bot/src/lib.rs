pub mod bot;
pub mod policy;

pub use bot::{
    BotContext, CostBreakdown, CostModel, OpeningPlanner, OpeningShape, ResponsePlanner,
    StrategyFeatures, StrategyParams,
};
pub use policy::{Decision, DecisionReason, DecisionStats, HeuristicPolicy, Policy, PolicyContext};
