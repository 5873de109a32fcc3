// Free-agent selection: unrostered players who did something worth reporting.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::stats::adjusted::{
    adjust_batter, adjust_pitcher, AdjustedBatterStat, AdjustedPitcherStat, BASE_ERA, BASE_K9,
    BASE_WHIP,
};
use crate::stats::{DayStats, PlayerDailyStat};

/// Report wrapper around one player's adjusted day line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeAgent<T> {
    pub name: String,
    pub team: String,
    pub position: String,
    pub day_stats: T,
}

/// Notable free agents for one date, split by role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreeAgentPool {
    pub batters: BTreeMap<u32, FreeAgent<AdjustedBatterStat>>,
    pub pitchers: BTreeMap<u32, FreeAgent<AdjustedPitcherStat>>,
}

impl FreeAgentPool {
    pub fn len(&self) -> usize {
        self.batters.len() + self.pitchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batters.is_empty() && self.pitchers.is_empty()
    }
}

/// A batter is worth reporting after producing a run, RBI or steal, or after
/// a multi-hit game.
pub fn is_notable_batter(stat: &AdjustedBatterStat) -> bool {
    let line = &stat.line;
    line.runs > 0 || line.rbis > 0 || line.sb > 0 || line.hits > 1
}

/// A pitcher is worth reporting with a win or save, or when all three
/// adjusted rates strictly beat the prior line.
pub fn is_notable_pitcher(stat: &AdjustedPitcherStat) -> bool {
    let line = &stat.line;
    if line.win > 0 || line.save > 0 {
        return true;
    }
    stat.w_era < BASE_ERA && stat.w_whip < BASE_WHIP && stat.w_k9 > BASE_K9
}

/// Pick the notable free agents out of a day's stats.
///
/// Players on untracked teams and rostered players are dropped first; every
/// remaining player gets adjusted stats before the inclusion thresholds run.
pub fn select_free_agents(
    day: &DayStats,
    rostered: &HashSet<u32>,
    tracked_teams: &HashSet<String>,
) -> FreeAgentPool {
    let mut pool = FreeAgentPool::default();

    for (&id, stat) in day {
        if !tracked_teams.contains(stat.team()) {
            debug!("skipping {} ({}): team not tracked", stat.name(), stat.team());
            continue;
        }
        if rostered.contains(&id) {
            continue;
        }

        match stat {
            PlayerDailyStat::Batter(line) => {
                let adjusted = adjust_batter(line);
                if is_notable_batter(&adjusted) {
                    pool.batters.insert(id, wrap(stat, adjusted));
                }
            }
            PlayerDailyStat::Pitcher(line) => {
                let adjusted = adjust_pitcher(line);
                if is_notable_pitcher(&adjusted) {
                    pool.pitchers.insert(id, wrap(stat, adjusted));
                }
            }
        }
    }

    info!(
        "Selected {} free-agent batters and {} pitchers",
        pool.batters.len(),
        pool.pitchers.len()
    );
    pool
}

fn wrap<T>(stat: &PlayerDailyStat, day_stats: T) -> FreeAgent<T> {
    FreeAgent {
        name: stat.name().to_string(),
        team: stat.team().to_string(),
        position: stat.pos().to_string(),
        day_stats,
    }
}
