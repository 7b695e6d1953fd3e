//! Chinese poker: thirteen cards split into a 3-card top hand and 5-card
//! middle and bottom hands, each scored against its own royalty table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::errors::PokerError;
use crate::hand::{Category, Hand, HandValue};
use crate::player::{HandHolder, Player};

/// The three hands a Chinese poker player sets.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    Middle,
    Bottom,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Top, Position::Middle, Position::Bottom];

    /// Number of cards the hand holds once set.
    pub fn capacity(self) -> usize {
        match self {
            Position::Top => 3,
            Position::Middle | Position::Bottom => 5,
        }
    }

    pub fn royalty_table(self) -> RoyaltyTable {
        match self {
            Position::Top => RoyaltyTable::top(),
            Position::Middle => RoyaltyTable::middle(),
            Position::Bottom => RoyaltyTable::bottom(),
        }
    }
}

impl FromStr for Position {
    type Err = PokerError;

    /// Loose match: anything mentioning "top", "mid" or "bot".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        if lower.contains("top") {
            Ok(Position::Top)
        } else if lower.contains("mid") {
            Ok(Position::Middle)
        } else if lower.contains("bot") {
            Ok(Position::Bottom)
        } else {
            Err(PokerError::InvalidHandTarget(s.to_string()))
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Top => f.write_str("top"),
            Position::Middle => f.write_str("middle"),
            Position::Bottom => f.write_str("bottom"),
        }
    }
}

/// Bonus points keyed by strength thresholds. A hand scores the bonus of the
/// highest threshold its value strictly exceeds, or zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoyaltyTable {
    // Sorted by threshold, ascending.
    entries: Vec<(HandValue, u32)>,
}

impl RoyaltyTable {
    pub fn new(mut entries: Vec<(HandValue, u32)>) -> Self {
        entries.sort_by_key(|(threshold, _)| *threshold);
        Self { entries }
    }

    /// Pairs of sixes through aces, then any three of a kind.
    pub fn top() -> Self {
        let mut entries = Vec::with_capacity(22);
        let pairs = Rank::ALL.iter().filter(|r| **r >= Rank::Six);
        for (points, rank) in (1..).zip(pairs) {
            let code = u128::from(rank.numerical());
            entries.push((HandValue::with_code(Category::Pair, code), points));
        }
        for (points, rank) in (10..).zip(Rank::ALL.iter()) {
            let code = u128::from(rank.numerical());
            entries.push((HandValue::with_code(Category::ThreeOfAKind, code), points));
        }
        Self::new(entries)
    }

    pub fn middle() -> Self {
        Self::new(vec![
            (HandValue::with_code(Category::ThreeOfAKind, 2), 2),
            (HandValue::with_code(Category::Straight, 2), 4),
            (HandValue::with_code(Category::Flush, 2), 8),
            (HandValue::with_code(Category::FullHouse, 2), 12),
            (HandValue::with_code(Category::FourOfAKind, 2), 20),
            (HandValue::with_code(Category::StraightFlush, 2), 30),
            (Category::RoyalStraightFlush.floor(), 50),
        ])
    }

    pub fn bottom() -> Self {
        Self::new(vec![
            (HandValue::with_code(Category::Straight, 2), 2),
            (HandValue::with_code(Category::Flush, 2), 4),
            (HandValue::with_code(Category::FullHouse, 2), 6),
            (HandValue::with_code(Category::FourOfAKind, 2), 10),
            (HandValue::with_code(Category::StraightFlush, 2), 15),
            (Category::RoyalStraightFlush.floor(), 25),
        ])
    }

    pub fn entries(&self) -> &[(HandValue, u32)] {
        &self.entries
    }

    pub fn points_for(&self, value: HandValue) -> u32 {
        self.entries
            .iter()
            .rev()
            .find(|(threshold, _)| value > *threshold)
            .map_or(0, |(_, points)| *points)
    }

    pub fn royalties(&self, hand: &Hand) -> u32 {
        self.points_for(hand.value())
    }
}

/// A Chinese poker player: the 13 dealt cards live in the inner player's
/// hand and are placed one by one into the three positional hands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChinesePlayer {
    player: Player,
    top: Hand,
    middle: Hand,
    bottom: Hand,
}

impl ChinesePlayer {
    pub fn new(name: impl Into<String>, points: u64) -> Self {
        Self {
            player: Player::new(name, points),
            top: Hand::new(),
            middle: Hand::new(),
            bottom: Hand::new(),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn points(&self) -> u64 {
        self.player.chips()
    }

    pub fn hand_at(&self, position: Position) -> &Hand {
        match position {
            Position::Top => &self.top,
            Position::Middle => &self.middle,
            Position::Bottom => &self.bottom,
        }
    }

    pub fn hand_at_mut(&mut self, position: Position) -> &mut Hand {
        match position {
            Position::Top => &mut self.top,
            Position::Middle => &mut self.middle,
            Position::Bottom => &mut self.bottom,
        }
    }

    pub fn top_hand(&self) -> &Hand {
        &self.top
    }

    pub fn middle_hand(&self) -> &Hand {
        &self.middle
    }

    pub fn bottom_hand(&self) -> &Hand {
        &self.bottom
    }

    pub fn set_hand_at(&mut self, position: Position, hand: Hand) {
        *self.hand_at_mut(position) = hand;
    }

    /// Adds `card` to the hand named by `target` ("top", "middle", "bottom"
    /// or anything containing "top"/"mid"/"bot"). A full hand rejects it.
    pub fn place_card(&mut self, card: Card, target: &str) -> Result<(), PokerError> {
        let position: Position = target.parse()?;
        let capacity = position.capacity();
        let hand = self.hand_at_mut(position);
        if hand.len() >= capacity {
            return Err(PokerError::HandFull {
                hand: position.to_string(),
                capacity,
            });
        }
        hand.add(card);
        Ok(())
    }

    pub fn royalties_at(&self, position: Position) -> u32 {
        position.royalty_table().royalties(self.hand_at(position))
    }

    pub fn royalties(&self) -> u32 {
        Position::ALL.iter().map(|&p| self.royalties_at(p)).sum()
    }

    /// A set of hands is fouled when a lower row is weaker than the row above it.
    pub fn is_fouled(&self) -> bool {
        self.bottom.value() < self.middle.value() || self.middle.value() < self.top.value()
    }
}

impl HandHolder for ChinesePlayer {
    fn name(&self) -> &str {
        self.player.name()
    }

    fn hand(&self) -> &Hand {
        self.player.hand()
    }

    fn hand_mut(&mut self) -> &mut Hand {
        self.player.hand_mut()
    }

    fn clear_hand(&mut self) {
        self.player.clear_hand();
        self.top.clear();
        self.middle.clear();
        self.bottom.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_table_has_pairs_then_trips() {
        let table = RoyaltyTable::top();
        assert_eq!(table.entries().len(), 22);
        assert_eq!(table.entries()[0], (HandValue(6 * 10u128.pow(10)), 1));
        assert_eq!(table.entries()[8], (HandValue(14 * 10u128.pow(10)), 9));
        assert_eq!(table.entries()[9], (HandValue(2 * 10u128.pow(16)), 10));
        assert_eq!(table.entries()[21], (HandValue(14 * 10u128.pow(16)), 22));
    }

    #[test]
    fn threshold_itself_scores_lower_bonus() {
        let table = RoyaltyTable::middle();
        let trips = HandValue::with_code(Category::ThreeOfAKind, 2);
        assert_eq!(table.points_for(trips), 0);
        assert_eq!(table.points_for(HandValue(trips.0 + 1)), 2);
    }

    #[test]
    fn position_matching_is_loose() {
        assert_eq!("TOP".parse::<Position>().unwrap(), Position::Top);
        assert_eq!("mid".parse::<Position>().unwrap(), Position::Middle);
        assert_eq!("Bottom".parse::<Position>().unwrap(), Position::Bottom);
        assert!("side".parse::<Position>().is_err());
    }
}
