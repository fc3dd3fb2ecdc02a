use super::BotContext;
use super::cost::{CostBreakdown, CostModel};
use guandan_core::combo::{Combination, ComboKind};

/// A beating candidate with its price.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPlay {
    pub combination: Combination,
    pub cost: CostBreakdown,
    pub priority: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseChoice {
    Play(ScoredPlay),
    /// The cheapest answer costs more than the pass threshold.
    TooCostly(ScoredPlay),
    Nothing,
}

/// Chooses among plays that beat the table.
pub struct ResponsePlanner;

impl ResponsePlanner {
    pub fn choose(beating: Vec<Combination>, ctx: &BotContext<'_>) -> ResponseChoice {
        if beating.is_empty() {
            return ResponseChoice::Nothing;
        }

        let model = CostModel::new(ctx.params, ctx.level);
        let profile = model.profile(ctx.hand);
        let pairs = ctx.pair_count();
        let singles = ctx.single_count();

        let (bombs, plain): (Vec<ScoredPlay>, Vec<ScoredPlay>) = beating
            .into_iter()
            .map(|combination| ScoredPlay {
                cost: model.evaluate(&combination, &profile),
                priority: type_priority(combination.kind(), pairs, singles),
                combination,
            })
            .partition(|play| play.combination.is_bomb());

        let best_plain = plain.into_iter().min_by(|a, b| {
            a.cost
                .total
                .total_cmp(&b.cost.total)
                .then(a.priority.cmp(&b.priority))
                .then(a.combination.main_value().cmp(&b.combination.main_value()))
        });
        let best_bomb = bombs.into_iter().min_by(|a, b| {
            a.cost
                .total
                .total_cmp(&b.cost.total)
                .then(a.combination.bomb_rank().cmp(&b.combination.bomb_rank()))
        });

        // Bombs skip the base and stage charges, so the two groups meet on break cost.
        let chosen = match (best_plain, best_bomb) {
            (Some(plain), Some(bomb)) if bomb.cost.breaking < plain.cost.breaking => bomb,
            (Some(plain), _) => plain,
            (None, Some(bomb)) => bomb,
            (None, None) => return ResponseChoice::Nothing,
        };

        if chosen.cost.total > ctx.params.pass_cost {
            ResponseChoice::TooCostly(chosen)
        } else {
            ResponseChoice::Play(chosen)
        }
    }
}

/// Tie-break order between equally priced plays; lower goes first. Pairs and singles
/// trade places depending on which the hand holds more of.
pub fn type_priority(kind: ComboKind, pairs: usize, singles: usize) -> u8 {
    match kind {
        ComboKind::Straight => 1,
        ComboKind::TripleStraight => 2,
        ComboKind::PairStraight => 3,
        ComboKind::FullHouse => 4,
        ComboKind::Triple => 5,
        ComboKind::Pair if pairs >= singles => 6,
        ComboKind::Single if singles >= pairs => 6,
        ComboKind::Pair | ComboKind::Single => 7,
        ComboKind::Pass | ComboKind::Bomb | ComboKind::StraightFlush | ComboKind::JokerBomb => 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::StrategyParams;
    use guandan_core::combo::classify;
    use guandan_core::model::card::Card;
    use guandan_core::model::hand::Hand;
    use guandan_core::model::level::Level;
    use guandan_core::model::rank::Rank;
    use guandan_core::model::suit::Suit;

    fn c(number: u8, suit: Suit) -> Card {
        Card::new(Rank::from_number(number).unwrap(), suit)
    }

    fn combo(cards: &[Card]) -> Combination {
        classify(cards, Level::default()).unwrap()
    }

    #[test]
    fn priorities_prefer_runs() {
        assert!(
            type_priority(ComboKind::Straight, 0, 0) < type_priority(ComboKind::Triple, 0, 0)
        );
        assert_eq!(type_priority(ComboKind::Pair, 3, 1), 6);
        assert_eq!(type_priority(ComboKind::Single, 3, 1), 7);
        assert_eq!(type_priority(ComboKind::Single, 2, 2), 6);
        assert_eq!(type_priority(ComboKind::Pair, 2, 2), 6);
    }

    #[test]
    fn empty_candidates_mean_nothing() {
        let params = StrategyParams::default();
        let hand = Hand::new();
        let ctx = BotContext::new(&hand, Level::default(), &params);
        assert_eq!(ResponsePlanner::choose(Vec::new(), &ctx), ResponseChoice::Nothing);
    }

    #[test]
    fn lowest_cost_then_lowest_value_wins() {
        let params = StrategyParams::default();
        let hand = Hand::with_cards(vec![c(9, Suit::Spade), c(12, Suit::Heart)]);
        let ctx = BotContext::new(&hand, Level::default(), &params);
        let candidates = vec![combo(&[c(12, Suit::Heart)]), combo(&[c(9, Suit::Spade)])];
        match ResponsePlanner::choose(candidates, &ctx) {
            ResponseChoice::Play(play) => {
                assert_eq!(play.combination.cards(), &[c(9, Suit::Spade)])
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn expensive_answers_become_passes() {
        let mut params = StrategyParams::default();
        params.features.hand_balance = false;
        let hand = Hand::with_cards(
            [Suit::Spade, Suit::Heart, Suit::Club]
                .into_iter()
                .map(|s| c(11, s))
                .chain([c(11, Suit::Diamond)])
                .collect(),
        );
        let ctx = BotContext::new(&hand, Level::default(), &params);
        let single = combo(&[c(11, Suit::Club)]);
        assert!(matches!(
            ResponsePlanner::choose(vec![single], &ctx),
            ResponseChoice::TooCostly(play) if play.cost.total == 1_000.0
        ));
    }

    #[test]
    fn bomb_only_wins_when_strictly_cheaper() {
        let mut params = StrategyParams::default();
        params.features.hand_balance = false;
        let fives: Vec<Card> = [Suit::Spade, Suit::Heart, Suit::Club, Suit::Diamond]
            .into_iter()
            .map(|s| c(5, s))
            .collect();
        let mut cards = fives.clone();
        cards.push(c(13, Suit::Heart));
        let hand = Hand::with_cards(cards);
        let ctx = BotContext::new(&hand, Level::default(), &params);

        let king = combo(&[c(13, Suit::Heart)]);
        let bomb = combo(&fives);
        // Both cost 0 without hand balance: the non-bomb keeps the tie.
        match ResponsePlanner::choose(vec![bomb, king.clone()], &ctx) {
            ResponseChoice::Play(play) => assert_eq!(play.combination, king),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn free_plain_answer_keeps_the_bomb_with_hand_balance() {
        let params = StrategyParams::default();
        let nines: Vec<Card> = [Suit::Spade, Suit::Heart, Suit::Club, Suit::Diamond]
            .into_iter()
            .map(|s| c(9, s))
            .collect();
        let mut cards = nines.clone();
        cards.push(c(13, Suit::Heart));
        let hand = Hand::with_cards(cards);
        let ctx = BotContext::new(&hand, Level::default(), &params);

        let king = combo(&[c(13, Suit::Heart)]);
        let bomb = combo(&nines);
        match ResponsePlanner::choose(vec![bomb, king.clone()], &ctx) {
            ResponseChoice::Play(play) => {
                assert_eq!(play.combination, king);
                assert!(play.cost.total > 0.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
