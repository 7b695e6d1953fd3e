use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};
use crate::errors::PokerError;
use crate::hand::parse_cards;

use super::ranking;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suitedness {
    Pair,
    Suited,
    Offsuit,
}

/// One of the 169 starting-hand classes, e.g. `AA`, `AKs` or `T9o`.
///
/// Parsing is forgiving about case and rank order, and a non-pair without a
/// suffix reads as offsuit:
///
/// ```
/// use bluff_engine::equity::HandClass;
///
/// let class: HandClass = "qj".parse().unwrap();
/// assert_eq!(class.to_string(), "QJo");
/// assert_eq!("t9S".parse::<HandClass>().unwrap().to_string(), "T9s");
/// assert!("AAs".parse::<HandClass>().is_err());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HandClass {
    high: Rank,
    low: Rank,
    kind: Suitedness,
}

impl HandClass {
    /// Builds a class from two ranks in any order. Equal ranks always make a
    /// pair and ignore `suited`.
    pub fn new(a: Rank, b: Rank, suited: bool) -> Self {
        let (high, low) = if a >= b { (a, b) } else { (b, a) };
        let kind = if high == low {
            Suitedness::Pair
        } else if suited {
            Suitedness::Suited
        } else {
            Suitedness::Offsuit
        };
        Self { high, low, kind }
    }

    /// The class a concrete starting hand belongs to.
    pub fn of(hole: &HoleCards) -> Self {
        let [a, b] = hole.cards();
        Self::new(a.rank, b.rank, a.suit == b.suit)
    }

    pub fn high(&self) -> Rank {
        self.high
    }

    pub fn low(&self) -> Rank {
        self.low
    }

    pub fn kind(&self) -> Suitedness {
        self.kind
    }

    pub fn is_pair(&self) -> bool {
        self.kind == Suitedness::Pair
    }

    pub fn combos(&self) -> usize {
        match self.kind {
            Suitedness::Pair => 6,
            Suitedness::Suited => 4,
            Suitedness::Offsuit => 12,
        }
    }

    /// Every concrete hand in the class.
    pub fn hole_cards(&self) -> Vec<HoleCards> {
        let mut out = Vec::with_capacity(self.combos());
        match self.kind {
            Suitedness::Pair => {
                for (i, &s1) in Suit::ALL.iter().enumerate() {
                    for &s2 in &Suit::ALL[i + 1..] {
                        out.push(HoleCards::ordered(
                            Card::new(self.high, s1),
                            Card::new(self.low, s2),
                        ));
                    }
                }
            }
            Suitedness::Suited => {
                for &s in &Suit::ALL {
                    out.push(HoleCards::ordered(
                        Card::new(self.high, s),
                        Card::new(self.low, s),
                    ));
                }
            }
            Suitedness::Offsuit => {
                for &s1 in &Suit::ALL {
                    for &s2 in Suit::ALL.iter().filter(|&&s| s != s1) {
                        out.push(HoleCards::ordered(
                            Card::new(self.high, s1),
                            Card::new(self.low, s2),
                        ));
                    }
                }
            }
        }
        out
    }

    /// This class and the classes that dominate it by rank.
    ///
    /// Pairs take every higher pair. Non-pairs keep their suitedness and
    /// take every class whose high card is at least this one's and whose
    /// kicker lies between this one's kicker and its own high card, so `K9s`
    /// yields `K9s KTs KJs KQs A9s ATs AJs AQs AKs`.
    pub fn higher_or_equal(&self) -> Vec<HandClass> {
        let ranks = Rank::ALL.iter().copied();
        if self.is_pair() {
            return ranks
                .filter(|&r| r >= self.high)
                .map(|r| HandClass::new(r, r, false))
                .collect();
        }
        let suited = self.kind == Suitedness::Suited;
        let mut out = Vec::new();
        for high in ranks.filter(|&r| r >= self.high) {
            for low in Rank::ALL.iter().copied() {
                if low >= self.low && low < high {
                    out.push(HandClass::new(high, low, suited));
                }
            }
        }
        out
    }

    /// Share of all 1326 starting hands, in percent, at least as strong as
    /// this class in the preflop ranking.
    pub fn percentile(&self) -> f64 {
        ranking::percentile_of(self)
    }

    /// The strongest class whose percentile reaches `percent`, so
    /// `from_percentile(c.percentile()) == c` for every class.
    pub fn from_percentile(percent: f64) -> HandClass {
        ranking::class_at(percent)
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high.symbol(), self.low.symbol())?;
        match self.kind {
            Suitedness::Pair => Ok(()),
            Suitedness::Suited => f.write_str("s"),
            Suitedness::Offsuit => f.write_str("o"),
        }
    }
}

impl FromStr for HandClass {
    type Err = PokerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PokerError::InvalidRange(s.to_string());
        let chars: Vec<char> = s.trim().chars().collect();
        let (a, b, suffix) = match chars.as_slice() {
            [a, b] => (*a, *b, None),
            [a, b, suffix] => (*a, *b, Some(suffix.to_ascii_lowercase())),
            _ => return Err(invalid()),
        };
        let a = Rank::from_char(a).ok_or_else(invalid)?;
        let b = Rank::from_char(b).ok_or_else(invalid)?;
        match (a == b, suffix) {
            (_, None | Some('o')) => Ok(HandClass::new(a, b, false)),
            (false, Some('s')) => Ok(HandClass::new(a, b, true)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for HandClass {
    type Error = PokerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<HandClass> for String {
    fn from(class: HandClass) -> Self {
        class.to_string()
    }
}

/// Two distinct hole cards, kept higher card first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HoleCards {
    high: Card,
    low: Card,
}

impl HoleCards {
    pub fn new(a: Card, b: Card) -> Result<Self, PokerError> {
        if a == b {
            return Err(PokerError::InvalidRange(format!("{a}{b}")));
        }
        Ok(Self::ordered(a, b))
    }

    fn ordered(a: Card, b: Card) -> Self {
        if a >= b {
            Self { high: a, low: b }
        } else {
            Self { high: b, low: a }
        }
    }

    pub fn cards(&self) -> [Card; 2] {
        [self.high, self.low]
    }

    pub fn high(&self) -> Card {
        self.high
    }

    pub fn low(&self) -> Card {
        self.low
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.high == *card || self.low == *card
    }

    pub fn overlaps(&self, other: &HoleCards) -> bool {
        self.contains(&other.high) || self.contains(&other.low)
    }

    pub fn class(&self) -> HandClass {
        HandClass::of(self)
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high, self.low)
    }
}

impl FromStr for HoleCards {
    type Err = PokerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_cards(s)?.as_slice() {
            [a, b] => HoleCards::new(*a, *b),
            _ => Err(PokerError::InvalidRange(s.to_string())),
        }
    }
}

impl TryFrom<String> for HoleCards {
    type Error = PokerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<HoleCards> for String {
    fn from(hole: HoleCards) -> Self {
        hole.to_string()
    }
}

/// An ordered set of concrete starting hands without duplicates.
///
/// ```
/// use bluff_engine::equity::Range;
///
/// assert_eq!(Range::parse("KK").unwrap().len(), 6);
/// assert_eq!(Range::parse("KK+ AKs").unwrap().len(), 16);
/// assert_eq!(Range::parse("AsKd, QQ").unwrap().len(), 7);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    hands: Vec<HoleCards>,
}

impl Range {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_class(class: &HandClass) -> Self {
        class.hole_cards().into_iter().collect()
    }

    pub fn from_classes<'a, I>(classes: I) -> Self
    where
        I: IntoIterator<Item = &'a HandClass>,
    {
        classes.into_iter().flat_map(HandClass::hole_cards).collect()
    }

    /// Reads a range description: tokens separated by spaces or commas, each
    /// a concrete hand (`AsKd`), a class (`AKs`, `TT`) or a class with a
    /// trailing `+` for [`HandClass::higher_or_equal`].
    pub fn parse(description: &str) -> Result<Self, PokerError> {
        Self::parse_with(description, false)
    }

    /// Like [`Range::parse`], but every class token is read as if it had a
    /// trailing `+`.
    pub fn parse_higher_or_equal(description: &str) -> Result<Self, PokerError> {
        Self::parse_with(description, true)
    }

    fn parse_with(description: &str, always_expand: bool) -> Result<Self, PokerError> {
        let mut range = Range::new();
        let tokens = description
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty());
        for token in tokens {
            if token.chars().count() == 4 {
                if let Ok(hole) = token.parse::<HoleCards>() {
                    range.insert(hole);
                    continue;
                }
            }
            let (class_token, plus) = match token.strip_suffix('+') {
                Some(rest) => (rest, true),
                None => (token, false),
            };
            let class: HandClass = class_token
                .parse()
                .map_err(|_| PokerError::InvalidRange(token.to_string()))?;
            if plus || always_expand {
                range.extend(class.higher_or_equal().iter().flat_map(HandClass::hole_cards));
            } else {
                range.extend(class.hole_cards());
            }
        }
        if range.is_empty() {
            return Err(PokerError::InvalidRange(description.to_string()));
        }
        Ok(range)
    }

    /// Every hand in the top `percent` of the preflop ranking. `percent` is
    /// clamped to `0.5..=100`, so the range always holds at least aces.
    pub fn top_percent(percent: f64) -> Self {
        Self::from_classes(ranking::top_classes(percent).iter())
    }

    /// Adds `hole` unless it is already present.
    pub fn insert(&mut self, hole: HoleCards) -> bool {
        if self.hands.contains(&hole) {
            return false;
        }
        self.hands.push(hole);
        true
    }

    /// The same range without hands that use any of the `dead` cards.
    pub fn excluding(&self, dead: &[Card]) -> Range {
        Range {
            hands: self
                .hands
                .iter()
                .filter(|h| !dead.iter().any(|c| h.contains(c)))
                .copied()
                .collect(),
        }
    }

    pub fn hands(&self) -> &[HoleCards] {
        &self.hands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HoleCards> {
        self.hands.iter()
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn contains(&self, hole: &HoleCards) -> bool {
        self.hands.contains(hole)
    }

    /// Distinct classes in the range, in first-seen order.
    pub fn classes(&self) -> Vec<HandClass> {
        let mut seen = HashSet::new();
        self.hands
            .iter()
            .map(HoleCards::class)
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

impl FromStr for Range {
    type Err = PokerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Range::parse(s)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.hands.iter().map(HoleCards::to_string).collect();
        f.write_str(&labels.join(" "))
    }
}

impl FromIterator<HoleCards> for Range {
    fn from_iter<I: IntoIterator<Item = HoleCards>>(iter: I) -> Self {
        let mut range = Range::new();
        range.extend(iter);
        range
    }
}

impl Extend<HoleCards> for Range {
    fn extend<I: IntoIterator<Item = HoleCards>>(&mut self, iter: I) {
        for hole in iter {
            self.insert(hole);
        }
    }
}

impl<'a> IntoIterator for &'a Range {
    type Item = &'a HoleCards;
    type IntoIter = std::slice::Iter<'a, HoleCards>;

    fn into_iter(self) -> Self::IntoIter {
        self.hands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_normalization() {
        for (input, expected) in [
            ("AK", "AKo"),
            ("Qj", "QJo"),
            ("t9O", "T9o"),
            ("KA", "AKo"),
            ("ka", "AKo"),
            ("AA", "AA"),
            ("AAo", "AA"),
            ("56s", "65s"),
        ] {
            assert_eq!(input.parse::<HandClass>().unwrap().to_string(), expected);
        }
        for bad in ["AAs", "A", "AKx", "AKs+", "1K", "AKso"] {
            assert!(bad.parse::<HandClass>().is_err(), "{bad}");
        }
    }

    #[test]
    fn class_expansions_are_distinct_and_sized() {
        for class in ["AA", "AKs", "72o"] {
            let class: HandClass = class.parse().unwrap();
            let holes = class.hole_cards();
            let unique: HashSet<_> = holes.iter().collect();
            assert_eq!(holes.len(), class.combos());
            assert_eq!(unique.len(), class.combos());
            assert!(holes.iter().all(|h| h.class() == class));
        }
    }

    #[test]
    fn hole_cards_are_ordered_high_first() {
        let hole: HoleCards = "2dAs".parse().unwrap();
        assert_eq!(hole.to_string(), "As2d");
        assert!("AsAs".parse::<HoleCards>().is_err());
    }
}
