//! Starting-hand ranges and Monte-Carlo equity between them.
//!
//! ```
//! use bluff_engine::equity::{equity_from_specs, RangeSpec};
//!
//! let specs = [RangeSpec::from("QQ+"), RangeSpec::Percentile(20.0)];
//! let report = equity_from_specs(&specs, 1_000).unwrap();
//! assert_eq!(report.equities.len(), 2);
//! ```

mod range;
pub mod ranking;
mod simulation;

pub use range::{HandClass, HoleCards, Range, Suitedness};
pub use simulation::{EquityReport, Showdown, Simulation, BATCH_SIZE, BOARD_CARDS};

use serde::{Deserialize, Serialize};

use crate::errors::PokerError;

/// A range given either as text or as the top percentage of starting hands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeSpec {
    Description(String),
    Percentile(f64),
}

impl RangeSpec {
    /// Descriptions expand every class to its higher-or-equal set.
    pub fn to_range(&self) -> Result<Range, PokerError> {
        match self {
            RangeSpec::Description(desc) => Range::parse_higher_or_equal(desc),
            RangeSpec::Percentile(p) => Ok(Range::top_percent(*p)),
        }
    }
}

impl From<&str> for RangeSpec {
    fn from(desc: &str) -> Self {
        RangeSpec::Description(desc.to_string())
    }
}

impl From<f64> for RangeSpec {
    fn from(percent: f64) -> Self {
        RangeSpec::Percentile(percent)
    }
}

/// Equity of each description against the others over `trials` random boards.
pub fn equity(descriptions: &[&str], trials: usize) -> Result<Vec<f64>, PokerError> {
    let specs: Vec<RangeSpec> = descriptions.iter().map(|d| RangeSpec::from(*d)).collect();
    equity_from_specs(&specs, trials).map(|report| report.equities)
}

pub fn equity_from_specs(specs: &[RangeSpec], trials: usize) -> Result<EquityReport, PokerError> {
    let ranges = specs
        .iter()
        .map(RangeSpec::to_range)
        .collect::<Result<Vec<_>, _>>()?;
    Simulation::new(trials).run(&ranges)
}

/// Hero's equity heads-up against each villain in turn.
pub fn eval_ranges(hero: &str, villains: &[&str], trials: usize) -> Result<Vec<f64>, PokerError> {
    villains
        .iter()
        .map(|&villain| {
            let specs = [RangeSpec::from(hero), RangeSpec::from(villain)];
            let report = equity_from_specs(&specs, trials)?;
            Ok(report.equity(0).unwrap_or_default())
        })
        .collect()
}
