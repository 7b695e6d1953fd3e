use tracing::debug;

use crate::deck::Deck;
use crate::errors::PokerError;
use crate::hand::HandValue;
use crate::player::HandHolder;

/// One dealt hand: a deck and the players in playing order.
///
/// The round borrows its players, so hands dealt here stay with the players
/// (and their table) once the round is dropped.
///
/// # Examples
///
/// ```
/// use bluff_engine::deck::Deck;
/// use bluff_engine::player::{HandHolder, Player};
/// use bluff_engine::round::Round;
///
/// let mut players = vec![Player::new("Chris", 100), Player::new("Sam", 100)];
/// let mut round = Round::new(players.iter_mut().collect(), 5, Deck::new_with_seed(7));
/// round.new_hand().expect("deck has enough cards");
///
/// assert!(round.players().iter().all(|p| p.hand().len() == 5));
/// assert_eq!(round.deck().len(), 42);
/// assert!(round.winner().is_some());
/// ```
#[derive(Debug)]
pub struct Round<'a, P: HandHolder> {
    players: Vec<&'a mut P>,
    deck: Deck,
    n_starting_cards: usize,
}

impl<'a, P: HandHolder> Round<'a, P> {
    pub fn new(players: Vec<&'a mut P>, n_starting_cards: usize, deck: Deck) -> Self {
        Self {
            players,
            deck,
            n_starting_cards,
        }
    }

    pub fn players(&self) -> &[&'a mut P] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [&'a mut P] {
        &mut self.players
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn n_starting_cards(&self) -> usize {
        self.n_starting_cards
    }

    /// Draws `n_cards` for the player at `player` (index in playing order).
    pub fn deal(&mut self, player: usize, n_cards: usize) -> Result<(), PokerError> {
        let seats = self.players.len();
        let target = self
            .players
            .get_mut(player)
            .ok_or(PokerError::InvalidSeat {
                seat: player,
                seats,
            })?;
        let cards = self.deck.draw_n(n_cards)?;
        target.hand_mut().extend(cards);
        Ok(())
    }

    pub fn deal_to_all(&mut self, n_cards: usize) -> Result<(), PokerError> {
        for i in 0..self.players.len() {
            self.deal(i, n_cards)?;
        }
        Ok(())
    }

    /// Starts over: empty hands, a full reshuffled deck and fresh starting cards.
    pub fn new_hand(&mut self) -> Result<(), PokerError> {
        for p in self.players.iter_mut() {
            p.clear_hand();
        }
        self.deck.reset_and_shuffle();
        self.deal_to_all(self.n_starting_cards)?;
        debug!(
            players = self.players.len(),
            cards = self.n_starting_cards,
            "dealt new hand"
        );
        Ok(())
    }

    pub fn values(&self) -> Vec<HandValue> {
        self.players.iter().map(|p| p.hand().value()).collect()
    }

    /// Index of the strongest hand. Ties go to the earliest player in
    /// playing order; see [`Round::winners`] for every tied player.
    pub fn winner(&self) -> Option<usize> {
        let values = self.values();
        let best = values.iter().max()?;
        values.iter().position(|v| v == best)
    }

    pub fn winners(&self) -> Vec<usize> {
        let values = self.values();
        match values.iter().max() {
            Some(best) => values
                .iter()
                .enumerate()
                .filter(|(_, v)| *v == best)
                .map(|(i, _)| i)
                .collect(),
            None => Vec::new(),
        }
    }
}
