use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PokerError;

/// One of the four suits of a French deck.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Spades (s)
    Spades,
    /// Hearts (h)
    Hearts,
    /// Clubs (c)
    Clubs,
    /// Diamonds (d)
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    /// Lower-case abbreviation used in card strings.
    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
        }
    }

    /// Case-insensitive suit lookup.
    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            's' => Some(Suit::Spades),
            'h' => Some(Suit::Hearts),
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            _ => None,
        }
    }
}

/// Face value of a card, Two through Ace.
/// The discriminant is the numerical rank used by hand evaluation (T=10 … A=14).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub fn numerical(self) -> u8 {
        self as u8
    }

    pub fn from_numerical(v: u8) -> Option<Rank> {
        match v {
            2..=14 => Some(Rank::ALL[(v - 2) as usize]),
            _ => None,
        }
    }

    /// Upper-case abbreviation used in card strings.
    pub fn symbol(self) -> char {
        match self {
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            r => char::from(b'0' + r.numerical()),
        }
    }

    /// Case-insensitive rank lookup.
    pub fn from_char(c: char) -> Option<Rank> {
        match c.to_ascii_uppercase() {
            d @ '2'..='9' => Rank::from_numerical(d as u8 - b'0'),
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }
}

/// A single playing card. Immutable once built; two cards are the same card
/// when rank and suit match.
///
/// ```
/// use bluff_engine::cards::{Card, Rank, Suit};
///
/// let card: Card = "aS".parse().unwrap();
/// assert_eq!(card, Card::new(Rank::Ace, Suit::Spades));
/// assert_eq!(card.to_string(), "As");
/// assert_eq!(card.numerical_rank(), 14);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Parses a two-character abbreviation such as `"As"`, `"sa"` or `"TD"`.
    ///
    /// Exactly one rank character and exactly one suit character are
    /// required, in either order.
    pub fn from_abbreviation(abbreviation: &str) -> Result<Self, PokerError> {
        let invalid = || PokerError::InvalidAbbreviation(abbreviation.to_string());
        let chars: Vec<char> = abbreviation.chars().collect();
        if chars.len() != 2 {
            return Err(invalid());
        }
        let ranks: Vec<Rank> = chars.iter().filter_map(|&c| Rank::from_char(c)).collect();
        let suits: Vec<Suit> = chars.iter().filter_map(|&c| Suit::from_char(c)).collect();
        match (ranks.as_slice(), suits.as_slice()) {
            ([rank], [suit]) => Ok(Card::new(*rank, *suit)),
            _ => Err(invalid()),
        }
    }

    pub fn numerical_rank(&self) -> u8 {
        self.rank.numerical()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = PokerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Card::from_abbreviation(s)
    }
}

impl TryFrom<&str> for Card {
    type Error = PokerError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Card::from_abbreviation(s)
    }
}

impl TryFrom<String> for Card {
    type Error = PokerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Card::from_abbreviation(&s)
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

/// The 52 cards in rank-major order (2s 2h 2c 2d 3s …).
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &r in &Rank::ALL {
        for &s in &Suit::ALL {
            v.push(Card::new(r, s));
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_symbols_round_trip() {
        for r in Rank::ALL {
            assert_eq!(Rank::from_char(r.symbol()), Some(r));
            assert_eq!(Rank::from_char(r.symbol().to_ascii_lowercase()), Some(r));
        }
    }

    #[test]
    fn rejects_two_ranks_or_two_suits() {
        assert!(Card::from_abbreviation("AK").is_err());
        assert!(Card::from_abbreviation("sh").is_err());
        assert!(Card::from_abbreviation("1s").is_err());
        assert!(Card::from_abbreviation("10s").is_err());
        assert!(Card::from_abbreviation("").is_err());
    }

    #[test]
    fn full_deck_is_unique() {
        let mut deck = full_deck();
        deck.sort();
        deck.dedup();
        assert_eq!(deck.len(), 52);
    }
}
