use crate::model::card::Card;
use crate::model::level::Level;
use std::collections::BTreeMap;
use std::vec::Vec;

/// A player's cards. Two decks are in play, so identical cards may appear twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    /// Removes a single copy of `card`.
    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    /// Copy of this hand with one copy of every played card taken out.
    pub fn without(&self, played: &[Card]) -> Hand {
        let mut remaining = self.clone();
        for &card in played {
            remaining.remove(card);
        }
        remaining
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// True when every card of `cards` can be taken from this hand, copies included.
    pub fn contains_all(&self, cards: &[Card]) -> bool {
        let mut remaining = self.cards.clone();
        cards.iter().all(|card| {
            match remaining.iter().position(|c| c == card) {
                Some(index) => {
                    remaining.swap_remove(index);
                    true
                }
                None => false,
            }
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn jokers(&self) -> Vec<Card> {
        self.cards.iter().copied().filter(|c| c.is_joker()).collect()
    }

    /// Cards grouped by comparison value, lowest value first.
    pub fn groups(&self, level: Level) -> BTreeMap<u8, Vec<Card>> {
        let mut groups: BTreeMap<u8, Vec<Card>> = BTreeMap::new();
        for &card in &self.cards {
            groups.entry(card.value(level)).or_default().push(card);
        }
        groups
    }

    /// The lowest-valued card under `level`.
    pub fn lowest(&self, level: Level) -> Option<Card> {
        self.cards.iter().copied().min_by_key(|c| (c.value(level), c.suit))
    }

    fn sort(&mut self) {
        self.cards
            .sort_by(|a, b| a.suit.cmp(&b.suit).then(a.rank.cmp(&b.rank)));
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Hand::with_cards(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::level::Level;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn add_and_remove_single_copy() {
        let card = Card::new(Rank::Three, Suit::Club);
        let mut hand = Hand::with_cards(vec![card, card]);
        assert!(hand.remove(card));
        assert!(hand.contains(card));
        assert_eq!(hand.len(), 1);
        assert!(hand.remove(card));
        assert!(!hand.remove(card));
    }

    #[test]
    fn without_leaves_original_untouched() {
        let a = Card::new(Rank::Four, Suit::Heart);
        let b = Card::new(Rank::Nine, Suit::Spade);
        let hand = Hand::with_cards(vec![a, a, b]);
        let rest = hand.without(&[a, b]);
        assert_eq!(rest.cards(), &[a]);
        assert_eq!(hand.len(), 3);
    }

    #[test]
    fn contains_all_respects_copies() {
        let a = Card::new(Rank::Four, Suit::Heart);
        let hand = Hand::with_cards(vec![a, Card::red_joker()]);
        assert!(hand.contains_all(&[a, Card::red_joker()]));
        assert!(!hand.contains_all(&[a, a]));
    }

    #[test]
    fn groups_use_level_values() {
        let level = Level::new(Rank::Three).unwrap();
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Three, Suit::Club),
            Card::new(Rank::Three, Suit::Heart),
            Card::new(Rank::Ace, Suit::Spade),
            Card::red_joker(),
        ]);
        let groups = hand.groups(level);
        let values: Vec<u8> = groups.keys().copied().collect();
        assert_eq!(values, vec![14, 50, 100]);
        assert_eq!(groups[&50].len(), 2);
    }

    #[test]
    fn lowest_ignores_suit_order() {
        let level = Level::default();
        let hand = Hand::with_cards(vec![
            Card::new(Rank::King, Suit::Spade),
            Card::new(Rank::Four, Suit::Diamond),
            Card::new(Rank::Two, Suit::Club),
        ]);
        // Twos are the level, so the four is the lowest card.
        assert_eq!(hand.lowest(level), Some(Card::new(Rank::Four, Suit::Diamond)));
    }
}
