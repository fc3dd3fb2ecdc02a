use super::combination::Combination;
use super::kind::ComboKind;
use crate::model::card::ACE_VALUE;

pub const JOKER_BOMB_RANK: u32 = 10_000;
/// Straight flushes rank between five-card and six-card bombs.
pub const STRAIGHT_FLUSH_BASE: u32 = 550;
const BOMB_RANK_PER_CARD: u32 = 100;

pub fn is_bomb(combo: &Combination) -> bool {
    combo.kind().is_bomb()
}

/// Position of a bomb in the bomb hierarchy; 0 for anything that is not a bomb.
///
/// A k-card bomb ranks `100k + main_value`, a straight flush `550 + main_value` and the
/// joker bomb sits above everything. Straight flush main values top out at the ace slot
/// (14), so their band (556..=564) never reaches the six-card bombs (602 and up).
pub fn bomb_rank(combo: &Combination) -> u32 {
    match combo.kind() {
        ComboKind::JokerBomb => JOKER_BOMB_RANK,
        ComboKind::StraightFlush => {
            debug_assert!(combo.main_value() <= ACE_VALUE as u16);
            STRAIGHT_FLUSH_BASE + combo.main_value() as u32
        }
        ComboKind::Bomb => BOMB_RANK_PER_CARD * combo.length() as u32 + combo.main_value() as u32,
        _ => 0,
    }
}

/// True when `play` may be laid on top of `table`. Strict: equal plays never beat.
pub fn beats(play: &Combination, table: &Combination) -> bool {
    if play.is_pass() {
        return false;
    }
    if table.is_pass() {
        return true;
    }

    match (is_bomb(play), is_bomb(table)) {
        (true, false) => true,
        (false, true) => false,
        (true, true) => bomb_rank(play) > bomb_rank(table),
        (false, false) => {
            play.kind() == table.kind()
                && play.length() == table.length()
                && play.main_value() > table.main_value()
        }
    }
}

impl Combination {
    pub fn beats(&self, table: &Combination) -> bool {
        beats(self, table)
    }

    pub fn bomb_rank(&self) -> u32 {
        bomb_rank(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combo::classify::classify;
    use crate::model::card::Card;
    use crate::model::level::Level;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn level() -> Level {
        Level::new(Rank::Two).unwrap()
    }

    fn c(number: u8, suit: Suit) -> Card {
        Card::new(Rank::from_number(number).unwrap(), suit)
    }

    fn combo(cards: &[Card]) -> Combination {
        classify(cards, level()).expect("valid combination")
    }

    fn bomb(number: u8, size: usize) -> Combination {
        let suits = [Suit::Spade, Suit::Heart, Suit::Club, Suit::Diamond];
        let cards: Vec<Card> = (0..size).map(|i| c(number, suits[i % 4])).collect();
        combo(&cards)
    }

    fn straight_flush(top: u8) -> Combination {
        let cards: Vec<Card> = (top - 4..=top)
            .map(|n| if n == 14 { c(1, Suit::Heart) } else { c(n, Suit::Heart) })
            .collect();
        combo(&cards)
    }

    #[test]
    fn pass_never_beats_and_is_always_beaten() {
        let single = combo(&[c(3, Suit::Spade)]);
        assert!(!beats(&Combination::pass(), &single));
        assert!(!beats(&Combination::pass(), &Combination::pass()));
        assert!(beats(&single, &Combination::pass()));
    }

    #[test]
    fn same_kind_compares_main_value_strictly() {
        let seven = combo(&[c(7, Suit::Spade)]);
        let other_seven = combo(&[c(7, Suit::Heart)]);
        let nine = combo(&[c(9, Suit::Club)]);
        assert!(nine.beats(&seven));
        assert!(!seven.beats(&nine));
        assert!(!seven.beats(&other_seven));
        assert!(!other_seven.beats(&seven));
    }

    #[test]
    fn different_kinds_or_lengths_never_beat() {
        let pair = combo(&[c(9, Suit::Spade), c(9, Suit::Heart)]);
        let single = combo(&[c(3, Suit::Spade)]);
        assert!(!pair.beats(&single));
        assert!(!single.beats(&pair));

        let five: Vec<Card> = [3, 4, 5, 6, 7]
            .iter()
            .enumerate()
            .map(|(i, &n)| c(n, if i == 0 { Suit::Club } else { Suit::Spade }))
            .collect();
        let six: Vec<Card> = [8, 9, 10, 11, 12, 13]
            .iter()
            .enumerate()
            .map(|(i, &n)| c(n, if i == 0 { Suit::Club } else { Suit::Spade }))
            .collect();
        assert!(!combo(&six).beats(&combo(&five)));
    }

    #[test]
    fn bombs_beat_everything_else() {
        let four = bomb(3, 4);
        let pair = combo(&[c(1, Suit::Spade), c(1, Suit::Heart)]);
        assert!(four.beats(&pair));
        assert!(!pair.beats(&four));
    }

    #[test]
    fn bomb_hierarchy_is_strict_across_bands() {
        let ladder = [
            bomb(13, 4).bomb_rank(),
            bomb(3, 5).bomb_rank(),
            bomb(1, 5).bomb_rank(),
            straight_flush(7).bomb_rank(),
            straight_flush(14).bomb_rank(),
            bomb(3, 6).bomb_rank(),
            bomb(3, 7).bomb_rank(),
            bomb(3, 8).bomb_rank(),
        ];
        for pair in ladder.windows(2) {
            assert!(pair[0] < pair[1], "{ladder:?}");
        }
    }

    #[test]
    fn level_bombs_stay_inside_their_band() {
        // Twos are the level: a five-card bomb of twos ranks 550, still below any flush.
        let level_five = bomb(2, 5);
        assert_eq!(level_five.main_value(), 50);
        assert!(level_five.bomb_rank() < straight_flush(7).bomb_rank());
        assert!(bomb(2, 6).bomb_rank() > straight_flush(14).bomb_rank());
    }

    #[test]
    fn joker_bomb_is_unbeatable() {
        let jokers = combo(&[
            Card::black_joker(),
            Card::black_joker(),
            Card::red_joker(),
            Card::red_joker(),
        ]);
        assert_eq!(jokers.bomb_rank(), JOKER_BOMB_RANK);
        assert!(jokers.beats(&bomb(1, 8)));
        assert!(!bomb(1, 8).beats(&jokers));
        assert!(!jokers.beats(&jokers));
    }

    #[test]
    fn straight_flush_sits_between_five_and_six_card_bombs() {
        let flush = straight_flush(10);
        let five = bomb(9, 5);
        assert!(flush.beats(&five));
        assert!(!five.beats(&flush));
        assert!(flush.beats(&bomb(9, 4)));
        assert!(bomb(3, 6).beats(&flush));
    }
}
