use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::PokerError;

/// A French deck that owns its random source, so a given seed always yields
/// the same sequence of shuffles.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Deck seeded from the thread-local entropy source.
    pub fn new() -> Self {
        Self::from_rng(ChaCha20Rng::from_rng(&mut rand::rng()))
    }

    pub fn new_with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: ChaCha20Rng) -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(52),
            rng,
        };
        deck.reset_and_shuffle();
        deck
    }

    /// Restores all 52 cards and shuffles them.
    pub fn reset_and_shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
    }

    /// Removes and returns the top (last) card.
    pub fn draw(&mut self) -> Result<Card, PokerError> {
        self.cards.pop().ok_or(PokerError::NotEnoughCards)
    }

    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, PokerError> {
        if n > self.cards.len() {
            return Err(PokerError::NotEnoughCards);
        }
        (0..n).map(|_| self.draw()).collect()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
