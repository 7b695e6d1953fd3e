use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::PokerError;
use crate::hand::Hand;

/// Anything that can sit at a table and be dealt cards.
pub trait HandHolder {
    fn name(&self) -> &str;
    fn hand(&self) -> &Hand;
    fn hand_mut(&mut self) -> &mut Hand;

    fn add_cards<I: IntoIterator<Item = Card>>(&mut self, cards: I)
    where
        Self: Sized,
    {
        self.hand_mut().extend(cards);
    }

    /// Drops every card the holder has been dealt.
    fn clear_hand(&mut self) {
        self.hand_mut().clear();
    }
}

/// A poker player: name, chip (or point) stack and the current hand.
/// The stack is unsigned, so it can never drop below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    chips: u64,
    hand: Hand,
}

impl Player {
    pub fn new(name: impl Into<String>, chips: u64) -> Self {
        Self {
            name: name.into(),
            chips,
            hand: Hand::new(),
        }
    }

    pub fn chips(&self) -> u64 {
        self.chips
    }

    pub fn set_chips(&mut self, chips: u64) {
        self.chips = chips;
    }

    pub fn add_chips(&mut self, amount: u64) {
        self.chips = self.chips.saturating_add(amount);
    }

    pub fn remove_chips(&mut self, amount: u64) -> Result<(), PokerError> {
        if amount > self.chips {
            return Err(PokerError::InsufficientChips {
                requested: amount,
                available: self.chips,
            });
        }
        self.chips -= amount;
        Ok(())
    }

    /// Replaces the whole hand, e.g. to set up a known showdown.
    pub fn set_hand(&mut self, hand: Hand) {
        self.hand = hand;
    }
}

impl HandHolder for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn hand(&self) -> &Hand {
        &self.hand
    }

    fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }
}
