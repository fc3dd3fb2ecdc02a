//! Detection of the structures a hand holds, used to price what a play would break.

use guandan_core::combo::runs::windows_from;
use guandan_core::model::card::Card;
use guandan_core::model::hand::Hand;
use guandan_core::model::level::Level;
use guandan_core::model::suit::Suit;
use std::collections::BTreeMap;

const MIN_STRAIGHT_SPAN: usize = 5;
const MIN_PAIR_STRAIGHT_SPAN: usize = 3;
const MIN_TRIPLE_STRAIGHT_SPAN: usize = 2;
const MIN_BOMB_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureKind {
    JokerBomb,
    BombSixPlus,
    BombFive,
    BombFour,
    StraightFlush,
    TripleStraight,
    PairStraight,
    Straight,
    FullHouse,
    Triple,
    Pair,
}

impl StructureKind {
    /// Everything except bare pairs and triples.
    pub const fn is_complete(self) -> bool {
        !matches!(self, StructureKind::Triple | StructureKind::Pair)
    }

    pub const fn is_bomb(self) -> bool {
        matches!(
            self,
            StructureKind::JokerBomb
                | StructureKind::BombSixPlus
                | StructureKind::BombFive
                | StructureKind::BombFour
        )
    }

    fn for_bomb_size(size: usize) -> Self {
        match size {
            0..=4 => StructureKind::BombFour,
            5 => StructureKind::BombFive,
            _ => StructureKind::BombSixPlus,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    pub kind: StructureKind,
    pub cards: Vec<Card>,
}

impl Structure {
    fn new(kind: StructureKind, cards: Vec<Card>) -> Self {
        Self { kind, cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn total_value(&self, level: Level) -> u32 {
        self.cards.iter().map(|c| c.value(level) as u32).sum()
    }

    /// Cards shared with `played`, counting duplicate copies once each.
    pub fn overlap(&self, played: &[Card]) -> usize {
        let mut remaining = played.to_vec();
        self.cards
            .iter()
            .filter(|card| match remaining.iter().position(|c| c == *card) {
                Some(index) => {
                    remaining.swap_remove(index);
                    true
                }
                None => false,
            })
            .count()
    }

    /// Some but not all of the structure would leave the hand.
    pub fn is_broken_by(&self, played: &[Card]) -> bool {
        let shared = self.overlap(played);
        shared > 0 && shared < self.cards.len()
    }
}

/// Lists every structure in `hand`. Each value contributes its first cards as
/// representatives; runs are listed for every span at or above their minimum.
pub fn analyze(hand: &Hand, level: Level) -> Vec<Structure> {
    let mut found = Vec::new();
    let groups = hand.groups(level);

    let jokers = hand.jokers();
    if jokers.len() == 4 {
        found.push(Structure::new(StructureKind::JokerBomb, jokers));
    }

    for cards in groups.values() {
        if cards.len() >= MIN_BOMB_SIZE && !cards[0].is_joker() {
            found.push(Structure::new(
                StructureKind::for_bomb_size(cards.len()),
                cards.clone(),
            ));
        }
    }

    for suit in Suit::REGULAR {
        let suited = run_groups(hand.iter().filter(|c| c.suit == suit), level);
        push_runs(&suited, 1, MIN_STRAIGHT_SPAN, StructureKind::StraightFlush, &mut found);
    }

    let runs = run_groups(hand.iter(), level);
    push_runs(&runs, 3, MIN_TRIPLE_STRAIGHT_SPAN, StructureKind::TripleStraight, &mut found);
    push_runs(&runs, 2, MIN_PAIR_STRAIGHT_SPAN, StructureKind::PairStraight, &mut found);
    push_runs(&runs, 1, MIN_STRAIGHT_SPAN, StructureKind::Straight, &mut found);

    for (&triple_value, triple) in &groups {
        if !(3..MIN_BOMB_SIZE).contains(&triple.len()) {
            continue;
        }
        for (&pair_value, pair) in &groups {
            if pair_value == triple_value || !(2..MIN_BOMB_SIZE).contains(&pair.len()) {
                continue;
            }
            let mut cards = triple[..3].to_vec();
            cards.extend_from_slice(&pair[..2]);
            found.push(Structure::new(StructureKind::FullHouse, cards));
        }
    }

    for cards in groups.values() {
        if cards.len() == 3 {
            found.push(Structure::new(StructureKind::Triple, cards.clone()));
        }
    }
    for cards in groups.values() {
        if (2..MIN_BOMB_SIZE).contains(&cards.len()) {
            found.push(Structure::new(StructureKind::Pair, cards[..2].to_vec()));
        }
    }

    found
}

fn run_groups<'a>(
    cards: impl Iterator<Item = &'a Card>,
    level: Level,
) -> BTreeMap<u8, Vec<Card>> {
    let mut groups: BTreeMap<u8, Vec<Card>> = BTreeMap::new();
    for &card in cards {
        if let Some(value) = card.run_value(level) {
            groups.entry(value).or_default().push(card);
        }
    }
    groups
}

fn push_runs(
    groups: &BTreeMap<u8, Vec<Card>>,
    width: usize,
    min_span: usize,
    kind: StructureKind,
    found: &mut Vec<Structure>,
) {
    let values: Vec<u8> = groups
        .iter()
        .filter(|(_, cards)| cards.len() >= width)
        .map(|(&value, _)| value)
        .collect();
    for window in windows_from(&values, min_span) {
        let cards: Vec<Card> = window
            .iter()
            .filter_map(|value| groups.get(value))
            .flat_map(|cards| cards[..width].iter().copied())
            .collect();
        found.push(Structure::new(kind, cards));
    }
}
