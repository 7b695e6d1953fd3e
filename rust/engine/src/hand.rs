use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};
use crate::errors::PokerError;

/// Number of cards whose ranks take part in the high-card group.
pub const ACTIVE_CARDS: usize = 5;

// Decimal position of the lowest digit of each code group. From the most
// significant group down:
//
//   SS QQ FFFF LL TT RR WWWW PP HHHHHHHHHH
//
//   S straight flush, Q quads, F full house, L flush, T straight,
//   R three of a kind, W two pairs, P pair, H high card (five ranks).
const HIGH_CARD_POS: u32 = 0;
const PAIR_POS: u32 = 10;
const TWO_PAIRS_POS: u32 = 12;
const THREE_OF_A_KIND_POS: u32 = 16;
const STRAIGHT_POS: u32 = 18;
const FLUSH_POS: u32 = 20;
const FULL_HOUSE_POS: u32 = 22;
const FOUR_OF_A_KIND_POS: u32 = 26;
const STRAIGHT_FLUSH_POS: u32 = 28;

const fn pow10(exp: u32) -> u128 {
    10u128.pow(exp)
}

/// Hand ranking categories, weakest first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    HighCard,
    Pair,
    TwoPairs,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalStraightFlush,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPairs,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
        Category::RoyalStraightFlush,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "high_card",
            Category::Pair => "pair",
            Category::TwoPairs => "two_pairs",
            Category::ThreeOfAKind => "three_of_a_kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full_house",
            Category::FourOfAKind => "four_of_a_kind",
            Category::StraightFlush => "straight_flush",
            Category::RoyalStraightFlush => "royal_straight_flush",
        }
    }

    /// Decimal position of the category's code group inside a [`HandValue`].
    pub fn position(self) -> u32 {
        match self {
            Category::HighCard => HIGH_CARD_POS,
            Category::Pair => PAIR_POS,
            Category::TwoPairs => TWO_PAIRS_POS,
            Category::ThreeOfAKind => THREE_OF_A_KIND_POS,
            Category::Straight => STRAIGHT_POS,
            Category::Flush => FLUSH_POS,
            Category::FullHouse => FULL_HOUSE_POS,
            Category::FourOfAKind => FOUR_OF_A_KIND_POS,
            Category::StraightFlush | Category::RoyalStraightFlush => STRAIGHT_FLUSH_POS,
        }
    }

    /// Smallest value belonging to this category. Categories occupy
    /// contiguous half-open ranges `[floor, next floor)` covering every value.
    pub fn floor(self) -> HandValue {
        match self {
            Category::HighCard => HandValue(0),
            Category::RoyalStraightFlush => {
                HandValue(u128::from(Rank::Ace.numerical()) * pow10(STRAIGHT_FLUSH_POS))
            }
            c => HandValue(pow10(c.position())),
        }
    }

    /// Exclusive upper bound, `None` for the top category.
    pub fn ceiling(self) -> Option<HandValue> {
        let next = self as usize + 1;
        Category::ALL.get(next).map(|c| c.floor())
    }

    pub fn of(value: HandValue) -> Category {
        Category::ALL
            .iter()
            .rev()
            .copied()
            .find(|c| c.floor() <= value)
            .unwrap_or(Category::HighCard)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Total-order hand strength. Bigger is better.
#[derive(
    Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct HandValue(pub u128);

impl HandValue {
    /// Value of a bare code placed in the category's group, e.g.
    /// `with_code(Category::Pair, 6)` is the lowest possible pair of sixes.
    pub fn with_code(category: Category, code: u128) -> HandValue {
        HandValue(code * pow10(category.position()))
    }

    pub fn get(self) -> u128 {
        self.0
    }

    pub fn category(self) -> Category {
        Category::of(self)
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-category codes for one evaluation pass; `None` marks a category the
/// cards do not make.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Codes {
    straight_flush: Option<u8>,
    four_of_a_kind: Option<u8>,
    full_house: Option<(u8, u8)>,
    flush: Option<u8>,
    straight: Option<u8>,
    three_of_a_kind: Option<u8>,
    two_pairs: Option<(u8, u8)>,
    pair: Option<u8>,
    high_card: [u8; ACTIVE_CARDS],
}

impl Codes {
    fn from_cards(cards: &[Card]) -> Self {
        let mut rank_counts = [0usize; 15]; // 2..14 used
        let mut by_suit: [Vec<u8>; 4] = [vec![], vec![], vec![], vec![]];
        let mut ranks = Vec::with_capacity(cards.len());
        for c in cards {
            let r = c.numerical_rank();
            rank_counts[r as usize] += 1;
            by_suit[suit_index(c.suit)].push(r);
            ranks.push(r);
        }

        let quads = ranks_with_count(&rank_counts, 4);
        let trips = ranks_with_count(&rank_counts, 3);
        let pairs = ranks_with_count(&rank_counts, 2);

        let flush_suits: Vec<&Vec<u8>> = by_suit.iter().filter(|s| s.len() >= 5).collect();
        let flush = flush_suits
            .iter()
            .filter_map(|s| s.iter().max().copied())
            .max();
        let straight = detect_straight_high(&ranks);
        // Both predicates must hold on their own before the suited run is checked.
        let straight_flush = match (straight, flush) {
            (Some(_), Some(_)) => flush_suits
                .iter()
                .filter_map(|s| detect_straight_high(s))
                .max(),
            _ => None,
        };

        let full_house = trips.first().and_then(|&t| {
            (2..=14u8)
                .rev()
                .find(|&r| r != t && (2..=3).contains(&rank_counts[r as usize]))
                .map(|p| (t, p))
        });

        let mut high_card = [0u8; ACTIVE_CARDS];
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        for (slot, r) in high_card.iter_mut().zip(ranks.iter()) {
            *slot = *r;
        }

        Codes {
            straight_flush,
            four_of_a_kind: quads.first().copied(),
            full_house,
            flush,
            straight,
            three_of_a_kind: trips.first().copied(),
            two_pairs: if pairs.len() >= 2 {
                Some((pairs[0], pairs[1]))
            } else {
                None
            },
            pair: if pairs.len() == 1 { Some(pairs[0]) } else { None },
            high_card,
        }
    }

    fn value(&self) -> HandValue {
        let high = self
            .high_card
            .iter()
            .fold(0u128, |acc, &r| acc * 100 + u128::from(r));
        HandValue(
            single(self.straight_flush, STRAIGHT_FLUSH_POS)
                + single(self.four_of_a_kind, FOUR_OF_A_KIND_POS)
                + double(self.full_house, FULL_HOUSE_POS)
                + single(self.flush, FLUSH_POS)
                + single(self.straight, STRAIGHT_POS)
                + single(self.three_of_a_kind, THREE_OF_A_KIND_POS)
                + double(self.two_pairs, TWO_PAIRS_POS)
                + single(self.pair, PAIR_POS)
                + high * pow10(HIGH_CARD_POS),
        )
    }
}

fn single(code: Option<u8>, pos: u32) -> u128 {
    code.map_or(0, |r| u128::from(r) * pow10(pos))
}

fn double(code: Option<(u8, u8)>, pos: u32) -> u128 {
    code.map_or(0, |(a, b)| (u128::from(a) * 100 + u128::from(b)) * pow10(pos))
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Spades => 0,
        Suit::Hearts => 1,
        Suit::Clubs => 2,
        Suit::Diamonds => 3,
    }
}

/// Ranks appearing exactly `count` times, highest first.
fn ranks_with_count(rank_counts: &[usize; 15], count: usize) -> Vec<u8> {
    (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] == count)
        .collect()
}

/// Top rank of the highest run of five or more consecutive ranks. Aces also
/// count as 1 so the wheel (A-2-3-4-5) is a five-high straight.
fn detect_straight_high(ranks: &[u8]) -> Option<u8> {
    let mut v = ranks.to_vec();
    if v.contains(&14) {
        v.push(1);
    }
    v.sort_unstable();
    v.dedup();

    let mut run = 0;
    let mut best_high = None;
    let mut prev: Option<u8> = None;
    for &r in &v {
        run = match prev {
            Some(p) if r == p + 1 => run + 1,
            _ => 1,
        };
        if run >= 5 {
            best_high = Some(r);
        }
        prev = Some(r);
    }
    best_high
}

/// Encodes any number of cards into a [`HandValue`].
///
/// Fewer than five cards are valued as if the missing cards were blanks and
/// extra cards only drop out of the high-card group, so partial and 7-card
/// hands live on the same scale as regular 5-card hands.
///
/// A straight flush needs the run inside the flush suit. With more than five
/// cards, a straight and a flush in different cards only score as a flush.
pub fn evaluate(cards: &[Card]) -> HandValue {
    Codes::from_cards(cards).value()
}

/// Value of the strongest five-card subset. Five or fewer cards are
/// evaluated as they are.
pub fn evaluate_best_five(cards: &[Card]) -> HandValue {
    let n = cards.len();
    if n <= ACTIVE_CARDS {
        return evaluate(cards);
    }
    // Lexicographic walk over the C(n, 5) index combinations.
    let mut picks: [usize; ACTIVE_CARDS] = std::array::from_fn(|i| i);
    let mut subset = [cards[0]; ACTIVE_CARDS];
    let mut best = HandValue(0);
    loop {
        for (slot, &i) in subset.iter_mut().zip(picks.iter()) {
            *slot = cards[i];
        }
        best = best.max(evaluate(&subset));

        let Some(pos) = (0..ACTIVE_CARDS)
            .rev()
            .find(|&k| picks[k] < n - ACTIVE_CARDS + k)
        else {
            break;
        };
        let start = picks[pos] + 1;
        for (offset, pick) in picks[pos..].iter_mut().enumerate() {
            *pick = start + offset;
        }
    }
    best
}

pub fn compare_hands(a: &Hand, b: &Hand) -> Ordering {
    a.value().cmp(&b.value())
}

/// Splits hand text into cards. Tokens are separated by spaces or commas and
/// each token is a run of two-character cards, so `"AdKs"`, `"Ad Ks"` and
/// `"Ad,Ks"` all read the same.
pub fn parse_cards(text: &str) -> Result<Vec<Card>, PokerError> {
    let mut cards = Vec::new();
    for token in text.split(|c: char| c.is_whitespace() || c == ',') {
        if token.is_empty() {
            continue;
        }
        let chars: Vec<char> = token.chars().collect();
        if chars.len() % 2 != 0 {
            return Err(PokerError::InvalidAbbreviation(token.to_string()));
        }
        for pair in chars.chunks(2) {
            let abbreviation: String = pair.iter().collect();
            cards.push(Card::from_abbreviation(&abbreviation)?);
        }
    }
    Ok(cards)
}

/// An ordered collection of cards with an on-demand strength value.
///
/// ```
/// use bluff_engine::hand::{Category, Hand};
///
/// let wheel: Hand = "Ad 2s 3c 4c 5h".parse().unwrap();
/// assert_eq!(wheel.category(), Category::Straight);
///
/// let broadway: Hand = "AdKsQcJcTh".parse().unwrap();
/// assert!(broadway.value() > wheel.value());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards<I: IntoIterator<Item = Card>>(cards: I) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Builds a hand from several text fragments, e.g. `["Ad", "Ks Tc", "6c2h"]`.
    pub fn from_strs<I, S>(parts: I) -> Result<Self, PokerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut hand = Hand::new();
        for part in parts {
            hand.add_str(part.as_ref())?;
        }
        Ok(hand)
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn add_str(&mut self, text: &str) -> Result<(), PokerError> {
        self.cards.extend(parse_cards(text)?);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Swaps the card at `index`, returning the old one. Out of bounds leaves
    /// the hand untouched and returns `None`.
    pub fn replace(&mut self, index: usize, card: Card) -> Option<Card> {
        self.cards
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, card))
    }

    pub fn remove(&mut self, index: usize) -> Option<Card> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn ranks(&self) -> Vec<Rank> {
        self.cards.iter().map(|c| c.rank).collect()
    }

    pub fn suits(&self) -> Vec<Suit> {
        self.cards.iter().map(|c| c.suit).collect()
    }

    pub fn numerical_ranks(&self) -> Vec<u8> {
        self.cards.iter().map(|c| c.numerical_rank()).collect()
    }

    pub fn value(&self) -> HandValue {
        evaluate(&self.cards)
    }

    pub fn category(&self) -> Category {
        self.value().category()
    }

    pub fn name(&self) -> &'static str {
        self.category().name()
    }

    pub fn is_high_card(&self) -> bool {
        self.category() == Category::HighCard
    }

    pub fn is_pair(&self) -> bool {
        self.category() == Category::Pair
    }

    pub fn is_two_pairs(&self) -> bool {
        self.category() == Category::TwoPairs
    }

    pub fn is_three_of_a_kind(&self) -> bool {
        self.category() == Category::ThreeOfAKind
    }

    pub fn is_straight(&self) -> bool {
        self.category() == Category::Straight
    }

    pub fn is_flush(&self) -> bool {
        self.category() == Category::Flush
    }

    pub fn is_full_house(&self) -> bool {
        self.category() == Category::FullHouse
    }

    pub fn is_four_of_a_kind(&self) -> bool {
        self.category() == Category::FourOfAKind
    }

    pub fn is_straight_flush(&self) -> bool {
        self.category() == Category::StraightFlush
    }

    pub fn is_royal_straight_flush(&self) -> bool {
        self.category() == Category::RoyalStraightFlush
    }

    fn sorted_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.cards.iter().map(|c| c.to_string()).collect();
        labels.sort();
        labels
    }
}

impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.sorted_labels() == other.sorted_labels()
    }
}

impl Eq for Hand {}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sorted_labels().join(" "))
    }
}

impl FromStr for Hand {
    type Err = PokerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Hand::from_cards(parse_cards(s)?))
    }
}

impl TryFrom<String> for Hand {
    type Error = PokerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Hand> for String {
    fn from(hand: Hand) -> Self {
        hand.to_string()
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Hand::from_cards(iter)
    }
}

impl Extend<Card> for Hand {
    fn extend<I: IntoIterator<Item = Card>>(&mut self, iter: I) {
        self.cards.extend(iter);
    }
}

impl Index<usize> for Hand {
    type Output = Card;

    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}

impl<'a> IntoIterator for &'a Hand {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
