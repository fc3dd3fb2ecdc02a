use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::suit::Suit;
use crate::model::rank::Rank;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const SEATS: usize = 4;
pub const HAND_SIZE: usize = 27;

/// Two standard decks plus their four jokers: 108 cards, 27 per seat.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn double() -> Self {
        let mut cards = Vec::with_capacity(SEATS * HAND_SIZE);
        for _ in 0..2 {
            for suit in Suit::REGULAR.iter().copied() {
                for rank in Rank::ORDERED.iter().copied() {
                    cards.push(Card::new(rank, suit));
                }
            }
            cards.push(Card::black_joker());
            cards.push(Card::red_joker());
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::double();
        deck.cards.shuffle(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Deals the shoe round-robin into four hands.
    pub fn deal(&self) -> [Hand; SEATS] {
        let mut piles: [Vec<Card>; SEATS] = Default::default();
        for (index, card) in self.cards.iter().copied().enumerate() {
            piles[index % SEATS].push(card);
        }
        piles.map(Hand::with_cards)
    }
}
