use crate::error::DeckError;
use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

pub const CARDS_PER_SUIT: usize = Rank::ORDERED.len();
pub const MAX_PLAYERS: usize = Suit::CATALOG.len();

/// The canonical deck for a table: suits in catalog order, ranks ascending
/// within each suit. Every shuffle trace is measured against this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn canonical(player_count: usize) -> Result<Self, DeckError> {
        check_player_count(player_count)?;
        let mut cards = Vec::with_capacity(CARDS_PER_SUIT * player_count);
        for suit in Suit::CATALOG[..player_count].iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Ok(Self { cards })
    }

    pub fn shuffled_with_seed(player_count: usize, seed: u64) -> Result<Self, DeckError> {
        let mut deck = Self::canonical(player_count)?;
        let mut rng = StdRng::seed_from_u64(seed);
        deck.cards.shuffle(&mut rng);
        Ok(deck)
    }

    /// Cards of the table's deck that are not in `drawn`, in canonical order.
    pub fn remaining(player_count: usize, drawn: &[Card]) -> Result<BTreeSet<Card>, DeckError> {
        let mut left: BTreeSet<Card> = Self::canonical(player_count)?.cards.into_iter().collect();
        for card in drawn {
            if !left.remove(card) {
                return Err(DeckError::UnknownDraw(*card));
            }
        }
        Ok(left)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

/// Shorthand for the canonical card list of a table.
pub fn build_deck(player_count: usize) -> Result<Vec<Card>, DeckError> {
    Deck::canonical(player_count).map(Deck::into_cards)
}

/// Seat that draws next when `remaining` cards are still face down.
pub fn seat_for_draw(player_count: usize, remaining: usize) -> usize {
    if player_count == 0 {
        return 0;
    }
    (player_count - remaining % player_count) % player_count
}

pub(crate) fn check_player_count(player_count: usize) -> Result<(), DeckError> {
    if (1..=MAX_PLAYERS).contains(&player_count) {
        Ok(())
    } else {
        Err(DeckError::InvalidPlayerCount {
            count: player_count,
            max: MAX_PLAYERS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Deck, build_deck, seat_for_draw};
    use crate::error::DeckError;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use std::collections::HashSet;

    #[test]
    fn canonical_deck_has_thirteen_unique_cards_per_player() {
        for players in 1..=6 {
            let cards = build_deck(players).unwrap();
            assert_eq!(cards.len(), 13 * players);
            let unique: HashSet<Card> = cards.iter().copied().collect();
            assert_eq!(unique.len(), cards.len());
            assert!(cards.iter().all(|c| c.suit.index() < players));
        }
    }

    #[test]
    fn canonical_order_is_suit_major_rank_minor() {
        let cards = build_deck(2).unwrap();
        assert_eq!(cards[0], Card::new(Rank::Two, Suit::Spades));
        assert_eq!(cards[12], Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(cards[13], Card::new(Rank::Two, Suit::Clubs));
        assert_eq!(cards[25], Card::new(Rank::Ace, Suit::Clubs));
    }

    #[test]
    fn canonical_deck_is_deterministic() {
        assert_eq!(build_deck(6).unwrap(), build_deck(6).unwrap());
    }

    #[test]
    fn player_count_out_of_range_is_rejected() {
        assert_eq!(
            build_deck(0),
            Err(DeckError::InvalidPlayerCount { count: 0, max: 6 })
        );
        assert_eq!(
            build_deck(7),
            Err(DeckError::InvalidPlayerCount { count: 7, max: 6 })
        );
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(4, 42).unwrap();
        let deck_b = Deck::shuffled_with_seed(4, 42).unwrap();
        assert_eq!(deck_a.cards(), deck_b.cards());
        assert_eq!(deck_a.cards().len(), 52);
    }

    #[test]
    fn remaining_excludes_drawn_cards() {
        let ace = Card::new(Rank::Ace, Suit::Spades);
        let left = Deck::remaining(1, &[ace]).unwrap();
        assert_eq!(left.len(), 12);
        assert!(!left.contains(&ace));
    }

    #[test]
    fn remaining_rejects_foreign_and_repeated_draws() {
        let foreign = Card::new(Rank::Two, Suit::Hearts);
        assert_eq!(
            Deck::remaining(2, &[foreign]),
            Err(DeckError::UnknownDraw(foreign))
        );
        let ace = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(
            Deck::remaining(2, &[ace, ace]),
            Err(DeckError::UnknownDraw(ace))
        );
    }

    #[test]
    fn seats_rotate_from_first_player() {
        // 3 players, 39 cards: first draw is seat 0.
        assert_eq!(seat_for_draw(3, 39), 0);
        assert_eq!(seat_for_draw(3, 38), 1);
        assert_eq!(seat_for_draw(3, 37), 2);
        assert_eq!(seat_for_draw(3, 36), 0);
        assert_eq!(seat_for_draw(1, 5), 0);
    }
}
