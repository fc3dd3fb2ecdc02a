use super::BotContext;
use super::analysis::{Structure, StructureKind, analyze};
use super::params::OpeningShape;
use guandan_core::combo::{Combination, classify};
use guandan_core::model::card::Card;

/// Picks a lead when there is nothing on the table.
pub struct OpeningPlanner;

impl OpeningPlanner {
    pub fn choose(ctx: &BotContext<'_>) -> Combination {
        if ctx.hand.is_empty() {
            return Combination::pass();
        }
        if !ctx.params.features.smart_opening {
            return Self::lowest(ctx);
        }

        let structures = analyze(ctx.hand, ctx.level);
        for &shape in &ctx.params.opening_priority {
            let Some(kind) = shape.structure() else {
                return Self::lowest_isolated(ctx);
            };
            if shape == OpeningShape::Pair && !Self::leads_pairs(ctx) {
                continue;
            }
            if let Some(combo) = Self::smallest(&structures, kind, ctx) {
                return combo;
            }
        }
        Self::lowest_isolated(ctx)
    }

    /// Pairs lead only when the hand is pair-heavy and holds enough of them.
    fn leads_pairs(ctx: &BotContext<'_>) -> bool {
        let pairs = ctx.pair_count();
        pairs >= ctx.single_count() && pairs >= ctx.params.min_pairs_to_lead_pair
    }

    fn smallest(
        structures: &[Structure],
        kind: StructureKind,
        ctx: &BotContext<'_>,
    ) -> Option<Combination> {
        structures
            .iter()
            .filter(|structure| structure.kind == kind)
            .min_by_key(|structure| structure.total_value(ctx.level))
            .and_then(|structure| classify(&structure.cards, ctx.level))
    }

    fn lowest_isolated(ctx: &BotContext<'_>) -> Combination {
        let isolated = ctx
            .isolated_cards()
            .into_iter()
            .min_by_key(|card| (card.value(ctx.level), card.suit));
        match isolated.or_else(|| ctx.hand.lowest(ctx.level)) {
            Some(card) => single(card, ctx),
            None => Combination::pass(),
        }
    }

    fn lowest(ctx: &BotContext<'_>) -> Combination {
        match ctx.hand.lowest(ctx.level) {
            Some(card) => single(card, ctx),
            None => Combination::pass(),
        }
    }
}

fn single(card: Card, ctx: &BotContext<'_>) -> Combination {
    classify(&[card], ctx.level).unwrap_or_else(Combination::pass)
}
