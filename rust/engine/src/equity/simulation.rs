use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cards::{full_deck, Card};
use crate::config::EngineConfig;
use crate::errors::PokerError;
use crate::hand::{evaluate, evaluate_best_five, HandValue};

use super::range::{HoleCards, Range};

/// Trials per RNG stream. Each batch is one unit of parallel work.
pub const BATCH_SIZE: usize = 1000;
pub const BOARD_CARDS: usize = 5;
const MAX_DEAL_ATTEMPTS: usize = 10_000;

/// How a player's seven cards are scored at showdown.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Showdown {
    /// All seven cards evaluated as one hand.
    #[default]
    Direct,
    /// The best five-card subset of the seven.
    BestFive,
}

impl Showdown {
    pub fn value(self, hole: &HoleCards, board: &[Card]) -> HandValue {
        let mut cards = Vec::with_capacity(2 + board.len());
        cards.extend(hole.cards());
        cards.extend_from_slice(board);
        match self {
            Showdown::Direct => evaluate(&cards),
            Showdown::BestFive => evaluate_best_five(&cards),
        }
    }
}

/// Outcome of a simulation, one entry per range in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityReport {
    pub trials: usize,
    /// Trials the range won outright.
    pub wins: Vec<u64>,
    /// Trials the range split with others.
    pub ties: Vec<u64>,
    pub equities: Vec<f64>,
}

impl EquityReport {
    pub fn equity(&self, range: usize) -> Option<f64> {
        self.equities.get(range).copied()
    }
}

#[derive(Debug, Clone)]
struct Tally {
    wins: Vec<u64>,
    ties: Vec<u64>,
    shares: Vec<f64>,
}

impl Tally {
    fn new(n: usize) -> Self {
        Self {
            wins: vec![0; n],
            ties: vec![0; n],
            shares: vec![0.0; n],
        }
    }

    fn record(&mut self, values: &[HandValue]) {
        let Some(best) = values.iter().max() else {
            return;
        };
        let winners: Vec<usize> = (0..values.len()).filter(|&i| values[i] == *best).collect();
        if let [only] = winners.as_slice() {
            self.wins[*only] += 1;
            return;
        }
        let share = 1.0 / winners.len() as f64;
        for &i in &winners {
            self.ties[i] += 1;
            self.shares[i] += share;
        }
    }

    fn merge(&mut self, other: &Tally) {
        for i in 0..self.wins.len() {
            self.wins[i] += other.wins[i];
            self.ties[i] += other.ties[i];
            self.shares[i] += other.shares[i];
        }
    }
}

/// Monte-Carlo equity of two or more ranges against each other.
///
/// A fixed seed makes the result independent of whether batches run on the
/// rayon pool or on the calling thread.
///
/// ```
/// use bluff_engine::equity::{Range, Simulation};
///
/// let aces = Range::parse("AA").unwrap();
/// let kings = Range::parse("KK").unwrap();
/// let report = Simulation::new(2_000).with_seed(7).run(&[aces, kings]).unwrap();
///
/// assert!(report.equities[0] > 0.7);
/// assert!((report.equities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simulation {
    trials: usize,
    seed: Option<u64>,
    parallel: bool,
    showdown: Showdown,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl Simulation {
    pub fn new(trials: usize) -> Self {
        Self {
            trials,
            seed: None,
            parallel: true,
            showdown: Showdown::Direct,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            trials: config.trials,
            seed: config.seed,
            parallel: config.parallel,
            showdown: config.showdown,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_showdown(mut self, showdown: Showdown) -> Self {
        self.showdown = showdown;
        self
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn showdown(&self) -> Showdown {
        self.showdown
    }

    pub fn run(&self, ranges: &[Range]) -> Result<EquityReport, PokerError> {
        if ranges.len() < 2 {
            return Err(PokerError::NotEnoughRanges(ranges.len()));
        }
        if self.trials == 0 {
            return Err(PokerError::NoTrials);
        }
        let ranges = remove_fixed_cards(ranges)?;
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());

        let n_batches = self.trials.div_ceil(BATCH_SIZE);
        let batch = |idx: usize| {
            let size = BATCH_SIZE.min(self.trials - idx * BATCH_SIZE);
            run_batch(&ranges, seed, idx as u64, size, self.showdown)
        };
        let tallies: Vec<Tally> = if self.parallel {
            (0..n_batches)
                .into_par_iter()
                .map(batch)
                .collect::<Result<_, _>>()?
        } else {
            (0..n_batches).map(batch).collect::<Result<_, _>>()?
        };

        // Summed in batch order so float totals do not depend on scheduling.
        let mut total = Tally::new(ranges.len());
        for tally in &tallies {
            total.merge(tally);
        }

        let trials = self.trials as f64;
        let equities: Vec<f64> = total
            .wins
            .iter()
            .zip(&total.shares)
            .map(|(&w, &s)| (w as f64 + s) / trials)
            .collect();
        info!(
            trials = self.trials,
            ranges = ranges.len(),
            batches = n_batches,
            ?equities,
            "equity simulation finished"
        );
        Ok(EquityReport {
            trials: self.trials,
            wins: total.wins,
            ties: total.ties,
            equities,
        })
    }
}

/// Cards of single-hand ranges can never appear in any other range.
fn remove_fixed_cards(ranges: &[Range]) -> Result<Vec<Range>, PokerError> {
    let fixed: Vec<Option<[Card; 2]>> = ranges
        .iter()
        .map(|r| match r.hands() {
            [only] => Some(only.cards()),
            _ => None,
        })
        .collect();

    ranges
        .iter()
        .enumerate()
        .map(|(i, range)| {
            let dead: Vec<Card> = fixed
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .filter_map(|(_, cards)| *cards)
                .flatten()
                .collect();
            let live = range.excluding(&dead);
            if live.is_empty() {
                return Err(PokerError::EmptyRange(i));
            }
            Ok(live)
        })
        .collect()
}

fn run_batch(
    ranges: &[Range],
    seed: u64,
    stream: u64,
    size: usize,
    showdown: Showdown,
) -> Result<Tally, PokerError> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(stream);

    let all_cards = full_deck();
    let mut tally = Tally::new(ranges.len());
    let mut deck: Vec<Card> = Vec::with_capacity(all_cards.len());
    let mut values: Vec<HandValue> = Vec::with_capacity(ranges.len());

    for _ in 0..size {
        let holes = deal_holes(ranges, &mut rng)?;
        deck.clear();
        deck.extend(
            all_cards
                .iter()
                .filter(|c| !holes.iter().any(|h| h.contains(c))),
        );
        let (board, _) = deck.partial_shuffle(&mut rng, BOARD_CARDS);

        values.clear();
        values.extend(holes.iter().map(|h| showdown.value(h, board)));
        tally.record(&values);
    }
    Ok(tally)
}

/// One hand per range with no shared cards, by rejection sampling.
fn deal_holes(ranges: &[Range], rng: &mut ChaCha20Rng) -> Result<Vec<HoleCards>, PokerError> {
    let mut holes = Vec::with_capacity(ranges.len());
    for _ in 0..MAX_DEAL_ATTEMPTS {
        holes.clear();
        for range in ranges {
            let hands = range.hands();
            let pick = hands[rng.random_range(0..hands.len())];
            if holes.iter().any(|h: &HoleCards| h.overlaps(&pick)) {
                break;
            }
            holes.push(pick);
        }
        if holes.len() == ranges.len() {
            return Ok(holes);
        }
    }
    warn!(
        ranges = ranges.len(),
        attempts = MAX_DEAL_ATTEMPTS,
        "could not deal non-overlapping hands"
    );
    Err(PokerError::RangeConflict)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(desc: &str) -> Range {
        Range::parse(desc).unwrap()
    }

    #[test]
    fn split_pot_shares_are_even() {
        let mut tally = Tally::new(3);
        tally.record(&[HandValue(5), HandValue(9), HandValue(9)]);
        tally.record(&[HandValue(7), HandValue(1), HandValue(1)]);
        assert_eq!(tally.wins, vec![1, 0, 0]);
        assert_eq!(tally.ties, vec![0, 1, 1]);
        assert_eq!(tally.shares, vec![0.0, 0.5, 0.5]);
    }

    #[test]
    fn fixed_hands_are_removed_from_other_ranges() {
        let ranges = remove_fixed_cards(&[range("AsAh"), range("AA"), range("KK")]).unwrap();
        assert_eq!(ranges[0].len(), 1);
        assert_eq!(ranges[1].len(), 1);
        assert_eq!(ranges[2].len(), 6);
    }

    #[test]
    fn fixed_hand_can_empty_a_range() {
        let err = remove_fixed_cards(&[range("AsKs"), range("AsKd, KsAd")]);
        assert_eq!(err, Err(PokerError::EmptyRange(1)));
    }

    #[test]
    fn impossible_deal_is_a_conflict() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let ranges = [range("AA"), range("AA"), range("AA")];
        assert_eq!(
            deal_holes(&ranges, &mut rng),
            Err(PokerError::RangeConflict)
        );
    }
}
