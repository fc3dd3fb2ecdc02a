use super::combination::{Combination, JOKER_BOMB_VALUE};
use super::kind::ComboKind;
use super::runs::is_consecutive;
use crate::model::card::Card;
use crate::model::level::Level;
use std::collections::BTreeMap;

pub const MIN_STRAIGHT_LEN: usize = 5;
pub const MIN_PAIR_STRAIGHT_GROUPS: usize = 3;
pub const MIN_TRIPLE_STRAIGHT_GROUPS: usize = 2;
pub const MIN_BOMB_LEN: usize = 4;

/// Classifies `cards` under `level`. The empty set is `Pass`; `None` means the cards form
/// no legal play.
pub fn classify(cards: &[Card], level: Level) -> Option<Combination> {
    if cards.is_empty() {
        return Some(Combination::pass());
    }

    let n = cards.len();
    if n == 4 && cards.iter().all(|c| c.is_joker()) {
        return Some(Combination::new(
            ComboKind::JokerBomb,
            cards.to_vec(),
            JOKER_BOMB_VALUE,
            4,
        ));
    }

    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for card in cards {
        *counts.entry(card.value(level)).or_default() += 1;
    }
    let mut sizes: Vec<usize> = counts.values().copied().collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    let lowest = counts.keys().next().copied()? as u16;

    let fixed = |kind: ComboKind, main_value: u16, length: usize| {
        Some(Combination::new(kind, cards.to_vec(), main_value, length as u8))
    };

    match (n, sizes.as_slice()) {
        (1, _) => fixed(ComboKind::Single, lowest, 1),
        (2, [2]) => fixed(ComboKind::Pair, lowest, 1),
        (3, [3]) => fixed(ComboKind::Triple, lowest, 1),
        (_, [size]) if *size >= MIN_BOMB_LEN => fixed(ComboKind::Bomb, lowest, n),
        (5, [3, 2]) => {
            let triple = counts
                .iter()
                .find_map(|(&value, &count)| (count == 3).then_some(value))?;
            fixed(ComboKind::FullHouse, triple as u16, 1)
        }
        _ => classify_run(cards, level),
    }
}

fn classify_run(cards: &[Card], level: Level) -> Option<Combination> {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for card in cards {
        *counts.entry(card.run_value(level)?).or_default() += 1;
    }

    let values: Vec<u8> = counts.keys().copied().collect();
    if !is_consecutive(&values) {
        return None;
    }

    let mut widths = counts.values().copied();
    let width = widths.next()?;
    if widths.any(|w| w != width) {
        return None;
    }

    let groups = values.len();
    let top = *values.last()? as u16;
    let kind = match width {
        1 if cards.len() >= MIN_STRAIGHT_LEN => {
            let suit = cards[0].suit;
            if cards.iter().all(|c| c.suit == suit) {
                ComboKind::StraightFlush
            } else {
                ComboKind::Straight
            }
        }
        2 if groups >= MIN_PAIR_STRAIGHT_GROUPS => ComboKind::PairStraight,
        3 if groups >= MIN_TRIPLE_STRAIGHT_GROUPS => ComboKind::TripleStraight,
        _ => return None,
    };

    Some(Combination::new(kind, cards.to_vec(), top, groups as u8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn lvl(rank: Rank) -> Level {
        Level::new(rank).unwrap()
    }

    fn c(number: u8, suit: Suit) -> Card {
        Card::new(Rank::from_number(number).unwrap(), suit)
    }

    fn kind_of(cards: &[Card], level: Level) -> Option<ComboKind> {
        classify(cards, level).map(|combo| combo.kind())
    }

    #[test]
    fn empty_set_is_pass() {
        let combo = classify(&[], lvl(Rank::Two)).unwrap();
        assert!(combo.is_pass());
        assert_eq!(combo.len(), 0);
    }

    #[test]
    fn four_jokers_form_the_joker_bomb() {
        let cards = [
            Card::black_joker(),
            Card::black_joker(),
            Card::red_joker(),
            Card::red_joker(),
        ];
        let combo = classify(&cards, lvl(Rank::Two)).unwrap();
        assert_eq!(combo.kind(), ComboKind::JokerBomb);
        assert_eq!(combo.length(), 4);
    }

    #[test]
    fn singles_pairs_and_triples_use_level_values() {
        let level = lvl(Rank::Eight);
        let single = classify(&[c(8, Suit::Heart)], level).unwrap();
        assert_eq!(single.kind(), ComboKind::Single);
        assert_eq!(single.main_value(), 50);

        let pair = classify(&[c(1, Suit::Heart), c(1, Suit::Club)], level).unwrap();
        assert_eq!(pair.kind(), ComboKind::Pair);
        assert_eq!(pair.main_value(), 14);

        let triple = classify(&[c(4, Suit::Heart), c(4, Suit::Club), c(4, Suit::Spade)], level);
        assert_eq!(triple.map(|t| t.main_value()), Some(4));
    }

    #[test]
    fn mixed_joker_pair_is_invalid() {
        let cards = [Card::black_joker(), Card::red_joker()];
        assert_eq!(kind_of(&cards, lvl(Rank::Two)), None);
        let reds = [Card::red_joker(), Card::red_joker()];
        assert_eq!(kind_of(&reds, lvl(Rank::Two)), Some(ComboKind::Pair));
    }

    #[test]
    fn bombs_record_their_size() {
        let cards: Vec<Card> = [Suit::Spade, Suit::Heart, Suit::Club, Suit::Diamond, Suit::Spade]
            .into_iter()
            .map(|s| c(9, s))
            .collect();
        let combo = classify(&cards, lvl(Rank::Two)).unwrap();
        assert_eq!(combo.kind(), ComboKind::Bomb);
        assert_eq!(combo.length(), 5);
        assert_eq!(combo.main_value(), 9);
    }

    #[test]
    fn full_house_takes_triple_value() {
        let cards = [
            c(3, Suit::Spade),
            c(3, Suit::Heart),
            c(12, Suit::Club),
            c(12, Suit::Spade),
            c(12, Suit::Heart),
        ];
        let combo = classify(&cards, lvl(Rank::Two)).unwrap();
        assert_eq!(combo.kind(), ComboKind::FullHouse);
        assert_eq!(combo.main_value(), 12);
    }

    #[test]
    fn straight_and_straight_flush() {
        let level = lvl(Rank::Two);
        let mixed = [
            c(6, Suit::Spade),
            c(7, Suit::Heart),
            c(8, Suit::Spade),
            c(9, Suit::Spade),
            c(10, Suit::Spade),
        ];
        let straight = classify(&mixed, level).unwrap();
        assert_eq!(straight.kind(), ComboKind::Straight);
        assert_eq!(straight.main_value(), 10);
        assert_eq!(straight.length(), 5);

        let flush: Vec<Card> = (6..=10).map(|n| c(n, Suit::Club)).collect();
        assert_eq!(kind_of(&flush, level), Some(ComboKind::StraightFlush));
    }

    #[test]
    fn ace_only_runs_high() {
        let level = lvl(Rank::Seven);
        let high = [
            c(10, Suit::Spade),
            c(11, Suit::Heart),
            c(12, Suit::Spade),
            c(13, Suit::Spade),
            c(1, Suit::Club),
        ];
        assert_eq!(
            classify(&high, level).map(|s| s.main_value()),
            Some(14)
        );
        let low = [
            c(1, Suit::Spade),
            c(2, Suit::Heart),
            c(3, Suit::Spade),
            c(4, Suit::Spade),
            c(5, Suit::Club),
        ];
        assert_eq!(kind_of(&low, level), None);
    }

    #[test]
    fn level_cards_sit_on_top_of_runs() {
        // With level five, 5 stands in the ace slot: 10-J-Q-K-5 is a straight.
        let level = lvl(Rank::Five);
        let cards = [
            c(10, Suit::Spade),
            c(11, Suit::Heart),
            c(12, Suit::Spade),
            c(13, Suit::Spade),
            c(5, Suit::Club),
        ];
        let combo = classify(&cards, level).unwrap();
        assert_eq!(combo.kind(), ComboKind::Straight);
        assert_eq!(combo.main_value(), 14);

        let gapped = [
            c(3, Suit::Spade),
            c(4, Suit::Heart),
            c(5, Suit::Spade),
            c(6, Suit::Spade),
            c(7, Suit::Club),
        ];
        assert_eq!(kind_of(&gapped, level), None);
    }

    #[test]
    fn jokers_never_join_runs() {
        let cards = [
            c(10, Suit::Spade),
            c(11, Suit::Heart),
            c(12, Suit::Spade),
            c(13, Suit::Spade),
            Card::red_joker(),
        ];
        assert_eq!(kind_of(&cards, lvl(Rank::Two)), None);
    }

    #[test]
    fn pair_and_triple_straights() {
        let level = lvl(Rank::Two);
        let pairs = [
            c(3, Suit::Spade),
            c(3, Suit::Heart),
            c(4, Suit::Spade),
            c(4, Suit::Club),
            c(5, Suit::Diamond),
            c(5, Suit::Heart),
        ];
        let combo = classify(&pairs, level).unwrap();
        assert_eq!(combo.kind(), ComboKind::PairStraight);
        assert_eq!(combo.length(), 3);
        assert_eq!(combo.main_value(), 5);

        let two_pairs = &pairs[..4];
        assert_eq!(kind_of(two_pairs, level), None);

        let triples = [
            c(8, Suit::Spade),
            c(8, Suit::Heart),
            c(8, Suit::Club),
            c(9, Suit::Spade),
            c(9, Suit::Heart),
            c(9, Suit::Diamond),
        ];
        let combo = classify(&triples, level).unwrap();
        assert_eq!(combo.kind(), ComboKind::TripleStraight);
        assert_eq!(combo.length(), 2);
        assert_eq!(combo.main_value(), 9);
    }

    #[test]
    fn uneven_groups_are_rejected() {
        let cards = [
            c(3, Suit::Spade),
            c(3, Suit::Heart),
            c(4, Suit::Spade),
            c(5, Suit::Club),
            c(6, Suit::Diamond),
            c(7, Suit::Heart),
        ];
        assert_eq!(kind_of(&cards, lvl(Rank::Two)), None);
    }
}
