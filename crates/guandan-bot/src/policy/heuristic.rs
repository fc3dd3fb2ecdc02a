use super::{Decision, DecisionReason, DecisionStats, Policy, PolicyContext};
use crate::bot::{BotContext, OpeningPlanner, ResponseChoice, ResponsePlanner};
use guandan_core::combo::{Combination, GenerateLimit, beats, classify, generate};
use std::time::Instant;
use tracing::{Level, event};

/// The single-ply heuristic engine: classify, enumerate, filter, price and select.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self
    }

    fn respond(&self, ctx: &PolicyContext<'_>, bot_ctx: &BotContext<'_>) -> Decision {
        let Some(target) = classify(ctx.last_play, ctx.level) else {
            return pass(DecisionReason::InvalidLastPlay, None, DecisionStats::default());
        };

        let limit = GenerateLimit::new(ctx.params.max_candidates);
        let generated = generate(ctx.hand, &target, ctx.level, limit);
        let mut stats = DecisionStats {
            candidates: generated.len(),
            truncated: generated.truncated,
            ..DecisionStats::default()
        };
        if generated.truncated {
            event!(
                target: "guandan_bot::generate",
                Level::WARN,
                hand_size = ctx.hand.len(),
                table = %target,
                limit = limit.max_combinations,
                "candidate enumeration truncated"
            );
        }

        let beating: Vec<Combination> = generated
            .combinations
            .into_iter()
            .filter(|candidate| beats(candidate, &target))
            .collect();
        stats.beating = beating.len();

        match ResponsePlanner::choose(beating, bot_ctx) {
            ResponseChoice::Nothing => pass(DecisionReason::NoBeatingPlay, None, stats),
            ResponseChoice::TooCostly(best) => pass(
                DecisionReason::OverPassThreshold,
                Some(best.cost.total),
                stats,
            ),
            ResponseChoice::Play(chosen) => Decision {
                play: chosen.combination,
                reason: DecisionReason::Played,
                cost: Some(chosen.cost.total),
                stats,
            },
        }
    }
}

impl Policy for HeuristicPolicy {
    fn decide(&self, ctx: &PolicyContext<'_>) -> Decision {
        let started = Instant::now();
        let bot_ctx = BotContext::new(ctx.hand, ctx.level, ctx.params);

        let mut decision = if ctx.last_play.is_empty() {
            Decision {
                play: OpeningPlanner::choose(&bot_ctx),
                reason: DecisionReason::Opening,
                cost: None,
                stats: DecisionStats::default(),
            }
        } else {
            self.respond(ctx, &bot_ctx)
        };

        decision.stats.elapsed_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        log_decision(ctx, &decision);
        decision
    }
}

fn pass(reason: DecisionReason, cost: Option<f32>, stats: DecisionStats) -> Decision {
    Decision {
        play: Combination::pass(),
        reason,
        cost,
        stats,
    }
}

fn log_decision(ctx: &PolicyContext<'_>, decision: &Decision) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let last_play = if ctx.last_play.is_empty() {
        "none".to_string()
    } else {
        classify(ctx.last_play, ctx.level)
            .map(|combo| combo.kind().to_string())
            .unwrap_or_else(|| "invalid".to_string())
    };

    event!(
        target: "guandan_bot::decision",
        Level::INFO,
        level = %ctx.level,
        hand_size = ctx.hand.len(),
        last_play = %last_play,
        candidates = decision.stats.candidates,
        beating = decision.stats.beating,
        truncated = decision.stats.truncated,
        chosen = %decision.play,
        cost = decision.cost.unwrap_or(0.0),
        elapsed_us = decision.stats.elapsed_us,
        reason = decision.reason.as_str(),
    );
}
