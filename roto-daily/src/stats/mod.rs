// Typed per-player daily statistics and the date-scoped aggregate.

pub mod adjusted;
pub mod aggregate;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One batter's line from a single box score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatterLine {
    pub name: String,
    pub team: String,
    pub pos: String,
    pub ab: u32,
    pub runs: u32,
    pub hits: u32,
    pub rbis: u32,
    pub hr: u32,
    /// Zero until the stolen-base narrative has been reconciled.
    pub sb: u32,
}

/// One pitcher's line from a single box score.
///
/// `win` and `save` are independent flags; nothing stops both being set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitcherLine {
    pub name: String,
    pub team: String,
    pub pos: String,
    pub win: u32,
    pub save: u32,
    pub outs: u32,
    pub hits: u32,
    pub earned_runs: u32,
    pub walks: u32,
    pub strikeouts: u32,
}

/// A player's statistics for one day.
///
/// Persisted untagged so the JSON shape is the bare record; a record is a
/// pitcher line exactly when it carries a `save` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerDailyStat {
    Pitcher(PitcherLine),
    Batter(BatterLine),
}

impl PlayerDailyStat {
    pub fn name(&self) -> &str {
        match self {
            PlayerDailyStat::Batter(b) => &b.name,
            PlayerDailyStat::Pitcher(p) => &p.name,
        }
    }

    pub fn team(&self) -> &str {
        match self {
            PlayerDailyStat::Batter(b) => &b.team,
            PlayerDailyStat::Pitcher(p) => &p.team,
        }
    }

    pub fn pos(&self) -> &str {
        match self {
            PlayerDailyStat::Batter(b) => &b.pos,
            PlayerDailyStat::Pitcher(p) => &p.pos,
        }
    }

    pub fn is_pitcher(&self) -> bool {
        matches!(self, PlayerDailyStat::Pitcher(_))
    }
}

/// Player id -> statistics for every player seen on one date.
pub type DayStats = BTreeMap<u32, PlayerDailyStat>;
