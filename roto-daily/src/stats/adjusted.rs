// Regression-adjusted rate statistics.
//
// Each rate adds a fixed prior to numerator and denominator, pulling small
// samples toward a league-average line. Batters get +10 hits over +40 at-bats;
// pitchers get a 7-inning (21-out) prior of 3 earned runs, 9 walks+hits and
// 6 strikeouts.

use serde::{Deserialize, Serialize};

use super::{BatterLine, PitcherLine};

const PRIOR_HITS: f64 = 10.0;
const PRIOR_AT_BATS: f64 = 40.0;

const PRIOR_OUTS: f64 = 21.0;
const PRIOR_EARNED_RUNS: f64 = 3.0;
const PRIOR_WALKS_HITS: f64 = 9.0;
const PRIOR_STRIKEOUTS: f64 = 6.0;

/// ERA of the prior line alone (81/21).
pub const BASE_ERA: f64 = PRIOR_EARNED_RUNS * 27.0 / PRIOR_OUTS;
/// WHIP of the prior line alone (9/7).
pub const BASE_WHIP: f64 = PRIOR_WALKS_HITS * 3.0 / PRIOR_OUTS;
/// K/9 of the prior line alone (162/21).
pub const BASE_K9: f64 = PRIOR_STRIKEOUTS * 27.0 / PRIOR_OUTS;

/// A batter line with its shrunk batting average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedBatterStat {
    #[serde(flatten)]
    pub line: BatterLine,
    pub w_avg: f64,
}

/// A pitcher line with its shrunk ERA, WHIP and K/9.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedPitcherStat {
    #[serde(flatten)]
    pub line: PitcherLine,
    pub w_era: f64,
    pub w_whip: f64,
    pub w_k9: f64,
}

/// `(hits + 10) / (ab + 40)`
pub fn weighted_avg(line: &BatterLine) -> f64 {
    (line.hits as f64 + PRIOR_HITS) / (line.ab as f64 + PRIOR_AT_BATS)
}

/// `(earned_runs + 3) * 27 / (outs + 21)`
pub fn weighted_era(line: &PitcherLine) -> f64 {
    (line.earned_runs as f64 + PRIOR_EARNED_RUNS) * 27.0 / shrunk_outs(line)
}

/// `(walks + hits + 9) * 3 / (outs + 21)`
pub fn weighted_whip(line: &PitcherLine) -> f64 {
    (line.walks as f64 + line.hits as f64 + PRIOR_WALKS_HITS) * 3.0 / shrunk_outs(line)
}

/// `(strikeouts + 6) * 27 / (outs + 21)`
pub fn weighted_k9(line: &PitcherLine) -> f64 {
    (line.strikeouts as f64 + PRIOR_STRIKEOUTS) * 27.0 / shrunk_outs(line)
}

fn shrunk_outs(line: &PitcherLine) -> f64 {
    line.outs as f64 + PRIOR_OUTS
}

pub fn adjust_batter(line: &BatterLine) -> AdjustedBatterStat {
    AdjustedBatterStat {
        w_avg: weighted_avg(line),
        line: line.clone(),
    }
}

pub fn adjust_pitcher(line: &PitcherLine) -> AdjustedPitcherStat {
    AdjustedPitcherStat {
        w_era: weighted_era(line),
        w_whip: weighted_whip(line),
        w_k9: weighted_k9(line),
        line: line.clone(),
    }
}
