//! Preflop strength ranking of the 169 starting-hand classes, strongest
//! first, with cumulative-combination percentiles.

use std::sync::LazyLock;

use crate::cards::Rank;

use super::range::HandClass;

/// Number of distinct two-card starting hands.
pub const TOTAL_COMBOS: usize = 1326;

/// Smallest share accepted by [`super::Range::top_percent`].
pub const MIN_TOP_PERCENT: f64 = 0.5;

const RANKING: &str = "\
    AA KK QQ JJ TT 99 88 AKs 77 AQs AJs AKo ATs AQo AJo KQs 66 A9s ATo KJs \
    A8s KTs KQo A7s A9o KJo 55 QJs K9s A5s A6s A8o KTo QTs A4s A7o K8s A3s \
    QJo K9o A5o A6o Q9s K7s JTs A2s QTo 44 A4o K6s K8o Q8s A3o K5s J9s Q9o \
    JTo K7o A2o K4s Q7s K6o K3s T9s J8s 33 Q6s Q8o K5o J9o K2s Q5s T8s K4o \
    J7s Q4s Q7o T9o J8o K3o Q6o Q3s 98s T7s J6s K2o 22 Q2s Q5o J5s T8o J7o \
    Q4o 97s J4s T6s J3s Q3o 98o 87s T7o J6o 96s J2s Q2o T5s J5o T4s 97o 86s \
    J4o T6o 95s T3s 76s J3o 87o T2s 85s 96o J2o T5o 94s 75s T4o 93s 86o 65s \
    84s 95o T3o 92s 76o 74s T2o 54s 85o 64s 83s 94o 75o 82s 73s 93o 65o 53s \
    63s 84o 92o 43s 74o 72s 54o 64o 52s 62s 83o 42s 82o 73o 53o 63o 32s 43o \
    72o 52o 62o 42o 32o";

static TABLE: LazyLock<Vec<(HandClass, f64)>> = LazyLock::new(|| {
    let mut cumulative = 0;
    RANKING
        .split_whitespace()
        .filter_map(|token| token.parse::<HandClass>().ok())
        .map(|class| {
            cumulative += class.combos();
            (class, cumulative as f64 / TOTAL_COMBOS as f64 * 100.0)
        })
        .collect()
});

/// Classes with their cumulative percentile, strongest first.
pub fn table() -> &'static [(HandClass, f64)] {
    &TABLE
}

pub(crate) fn percentile_of(class: &HandClass) -> f64 {
    TABLE
        .iter()
        .find(|(c, _)| c == class)
        .map_or(100.0, |(_, p)| *p)
}

pub(crate) fn class_at(percent: f64) -> HandClass {
    let percent = clamp_percent(percent, 0.0);
    TABLE
        .iter()
        .find(|(_, p)| *p >= percent)
        .or_else(|| TABLE.last())
        .map(|(c, _)| *c)
        .unwrap_or_else(|| HandClass::new(Rank::Ace, Rank::Ace, false))
}

pub(crate) fn top_classes(percent: f64) -> Vec<HandClass> {
    let percent = clamp_percent(percent, MIN_TOP_PERCENT);
    // Aces sit below the 0.5% floor, so the result is never empty.
    TABLE
        .iter()
        .take_while(|(_, p)| *p <= percent)
        .map(|(c, _)| *c)
        .collect()
}

fn clamp_percent(percent: f64, min: f64) -> f64 {
    if percent.is_nan() {
        return 100.0;
    }
    percent.clamp(min, 100.0)
}
