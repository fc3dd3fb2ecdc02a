//! Enumerates the plays a hand can make against a combination on the table.

use super::classify::{MIN_BOMB_LEN, MIN_STRAIGHT_LEN, classify};
use super::combination::Combination;
use super::kind::ComboKind;
use super::runs::{windows, windows_from};
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::level::Level;
use crate::model::suit::Suit;
use std::collections::{BTreeMap, BTreeSet, HashSet};

pub const DEFAULT_MAX_COMBINATIONS: usize = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateLimit {
    pub max_combinations: usize,
}

impl GenerateLimit {
    pub const fn new(max_combinations: usize) -> Self {
        Self { max_combinations }
    }
}

impl Default for GenerateLimit {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COMBINATIONS)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generated {
    pub combinations: Vec<Combination>,
    /// Set when enumeration stopped at the limit.
    pub truncated: bool,
}

impl Generated {
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }
}

/// Every play of the target's kind and span, plus every bomb when the target is not one.
/// The result is not filtered by strength; see [`crate::combo::compare::beats`].
///
/// Bombs are collected first so that a capped enumeration still offers them.
pub fn generate(
    hand: &Hand,
    target: &Combination,
    level: Level,
    limit: GenerateLimit,
) -> Generated {
    let mut collector = Collector::new(level, limit);
    if !target.is_bomb() {
        collect_bombs(hand, &mut collector);
    }
    collect_shape(hand, target.kind(), target.length() as usize, &mut collector);
    collector.finish()
}

/// Every play of one shape. `length` is the span for runs and ignored otherwise; any bomb
/// kind yields the whole bomb inventory.
pub fn generate_shape(
    hand: &Hand,
    kind: ComboKind,
    length: usize,
    level: Level,
    limit: GenerateLimit,
) -> Generated {
    let mut collector = Collector::new(level, limit);
    collect_shape(hand, kind, length, &mut collector);
    collector.finish()
}

fn collect_shape(hand: &Hand, kind: ComboKind, length: usize, collector: &mut Collector) {
    match kind {
        ComboKind::Pass => {}
        ComboKind::Single => collect_same_value(hand, 1, kind, collector),
        ComboKind::Pair => collect_same_value(hand, 2, kind, collector),
        ComboKind::Triple => collect_same_value(hand, 3, kind, collector),
        ComboKind::FullHouse => collect_full_houses(hand, collector),
        ComboKind::Straight => collect_runs(hand, 1, length, kind, collector),
        ComboKind::PairStraight => collect_runs(hand, 2, length, kind, collector),
        ComboKind::TripleStraight => collect_runs(hand, 3, length, kind, collector),
        ComboKind::Bomb | ComboKind::StraightFlush | ComboKind::JokerBomb => {
            collect_bombs(hand, collector)
        }
    }
}

fn collect_same_value(hand: &Hand, size: usize, kind: ComboKind, collector: &mut Collector) {
    for cards in hand.groups(collector.level).values() {
        if cards.len() < size {
            continue;
        }
        for subset in multisets(&stock(cards), size) {
            collector.offer(subset, |k| k == kind);
        }
    }
}

fn collect_full_houses(hand: &Hand, collector: &mut Collector) {
    let groups = hand.groups(collector.level);
    for (&triple_value, triple_cards) in &groups {
        if triple_cards.len() < 3 {
            continue;
        }
        let triples = multisets(&stock(triple_cards), 3);
        for (&pair_value, pair_cards) in &groups {
            if pair_value == triple_value || pair_cards.len() < 2 {
                continue;
            }
            let pairs = multisets(&stock(pair_cards), 2);
            for triple in &triples {
                for pair in &pairs {
                    if collector.is_full() {
                        return;
                    }
                    let mut cards = triple.clone();
                    cards.extend_from_slice(pair);
                    collector.offer(cards, |k| k == ComboKind::FullHouse);
                }
            }
        }
    }
}

fn collect_runs(
    hand: &Hand,
    width: usize,
    span: usize,
    kind: ComboKind,
    collector: &mut Collector,
) {
    let mut by_run_value: BTreeMap<u8, Vec<Card>> = BTreeMap::new();
    for &card in hand.iter() {
        if let Some(value) = card.run_value(collector.level) {
            by_run_value.entry(value).or_default().push(card);
        }
    }
    by_run_value.retain(|_, cards| cards.len() >= width);

    let values: Vec<u8> = by_run_value.keys().copied().collect();
    for window in windows(&values, span) {
        let slots: Vec<Vec<Vec<Card>>> = window
            .iter()
            .filter_map(|value| by_run_value.get(value))
            .map(|cards| multisets(&stock(cards), width))
            .collect();
        let mut current = Vec::with_capacity(span * width);
        offer_product(&slots, &mut current, collector, kind);
    }
}

fn collect_bombs(hand: &Hand, collector: &mut Collector) {
    for cards in hand.groups(collector.level).values() {
        if cards.len() < MIN_BOMB_LEN || cards[0].is_joker() {
            continue;
        }
        let stock = stock(cards);
        for size in MIN_BOMB_LEN..=cards.len() {
            for subset in multisets(&stock, size) {
                collector.offer(subset, |k| k == ComboKind::Bomb);
            }
        }
    }

    collect_straight_flushes(hand, collector);

    let jokers = hand.jokers();
    if jokers.len() == 4 {
        collector.offer(jokers, |k| k == ComboKind::JokerBomb);
    }
}

fn collect_straight_flushes(hand: &Hand, collector: &mut Collector) {
    for suit in Suit::REGULAR {
        let mut slots: BTreeMap<u8, BTreeSet<Card>> = BTreeMap::new();
        for &card in hand.iter().filter(|c| c.suit == suit) {
            if let Some(value) = card.run_value(collector.level) {
                slots.entry(value).or_default().insert(card);
            }
        }

        let values: Vec<u8> = slots.keys().copied().collect();
        for window in windows_from(&values, MIN_STRAIGHT_LEN) {
            // One card per slot; the top slot may offer both the ace and the level card.
            let options: Vec<Vec<Vec<Card>>> = window
                .iter()
                .filter_map(|value| slots.get(value))
                .map(|cards| cards.iter().map(|&card| vec![card]).collect())
                .collect();
            let mut current = Vec::with_capacity(window.len());
            offer_product(&options, &mut current, collector, ComboKind::StraightFlush);
        }
    }
}

fn offer_product(
    slots: &[Vec<Vec<Card>>],
    current: &mut Vec<Card>,
    collector: &mut Collector,
    kind: ComboKind,
) {
    if collector.is_full() {
        return;
    }
    match slots.split_first() {
        None => collector.offer(current.clone(), |k| k == kind),
        Some((options, rest)) => {
            for option in options {
                current.extend_from_slice(option);
                offer_product(rest, current, collector, kind);
                current.truncate(current.len() - option.len());
            }
        }
    }
}

/// Distinct cards of a group with their copy counts.
fn stock(cards: &[Card]) -> Vec<(Card, usize)> {
    let mut counts: BTreeMap<Card, usize> = BTreeMap::new();
    for &card in cards {
        *counts.entry(card).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// Every distinct sub-multiset of `size` cards.
fn multisets(stock: &[(Card, usize)], size: usize) -> Vec<Vec<Card>> {
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(size);
    pick(stock, size, &mut current, &mut out);
    out
}

fn pick(stock: &[(Card, usize)], size: usize, current: &mut Vec<Card>, out: &mut Vec<Vec<Card>>) {
    if size == 0 {
        out.push(current.clone());
        return;
    }
    let Some((&(card, available), rest)) = stock.split_first() else {
        return;
    };
    for take in (0..=available.min(size)).rev() {
        current.extend(std::iter::repeat(card).take(take));
        pick(rest, size - take, current, out);
        current.truncate(current.len() - take);
    }
}

struct Collector {
    level: Level,
    max_combinations: usize,
    seen: HashSet<Vec<Card>>,
    combinations: Vec<Combination>,
    truncated: bool,
}

impl Collector {
    fn new(level: Level, limit: GenerateLimit) -> Self {
        Self {
            level,
            max_combinations: limit.max_combinations,
            seen: HashSet::new(),
            combinations: Vec::new(),
            truncated: false,
        }
    }

    fn is_full(&self) -> bool {
        self.truncated
    }

    fn offer(&mut self, mut cards: Vec<Card>, keep: impl Fn(ComboKind) -> bool) {
        if self.truncated {
            return;
        }
        cards.sort_unstable();
        if self.seen.contains(&cards) {
            return;
        }
        let Some(combo) = classify(&cards, self.level) else {
            return;
        };
        // A rejected shape may still be wanted by another pass (flushes found as straights).
        if !keep(combo.kind()) {
            return;
        }
        if self.combinations.len() >= self.max_combinations {
            self.truncated = true;
            return;
        }
        self.seen.insert(cards);
        self.combinations.push(combo);
    }

    fn finish(self) -> Generated {
        Generated {
            combinations: self.combinations,
            truncated: self.truncated,
        }
    }
}
