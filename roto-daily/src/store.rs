// JSON persistence for day stats, league snapshots and report inputs.
//
// Every artifact is written once per date; callers check `exists` and reuse
// what is already on disk.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::free_agents::FreeAgentPool;
use crate::league::{DailySheet, League};
use crate::stats::DayStats;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The data directory and the file naming scheme inside it.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Store { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn day_stats_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("stats_on_{}.json", date.format("%Y%m%d")))
    }

    /// Roster snapshot for the scoring period starting on `period_start`.
    pub fn league_path(&self, period_start: NaiveDate) -> PathBuf {
        self.dir.join(format!("league-{}.json", period_start.format("%Y-%m-%d")))
    }

    pub fn daily_sheet_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("rteams_on_{}.json", date.format("%Y%m%d")))
    }

    pub fn free_agents_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("free_agents_on_{}.json", date.format("%Y%m%d")))
    }

    pub fn load_day_stats(&self, date: NaiveDate) -> Result<DayStats, StoreError> {
        load_json(&self.day_stats_path(date))
    }

    pub fn save_day_stats(&self, date: NaiveDate, stats: &DayStats) -> Result<PathBuf, StoreError> {
        let path = self.day_stats_path(date);
        save_json(&path, stats)?;
        Ok(path)
    }

    pub fn load_league(&self, period_start: NaiveDate) -> Result<League, StoreError> {
        load_json(&self.league_path(period_start))
    }

    pub fn save_daily_sheet(&self, date: NaiveDate, sheet: &DailySheet) -> Result<PathBuf, StoreError> {
        let path = self.daily_sheet_path(date);
        save_json(&path, sheet)?;
        Ok(path)
    }

    pub fn load_free_agents(&self, date: NaiveDate) -> Result<FreeAgentPool, StoreError> {
        load_json(&self.free_agents_path(date))
    }

    pub fn save_free_agents(&self, date: NaiveDate, pool: &FreeAgentPool) -> Result<PathBuf, StoreError> {
        let path = self.free_agents_path(date);
        save_json(&path, pool)?;
        Ok(path)
    }
}

/// Tracked team abbreviations, stored as a JSON array of strings.
pub fn load_team_abbreviations(path: &Path) -> Result<HashSet<String>, StoreError> {
    let teams: Vec<String> = load_json(path)?;
    Ok(teams.into_iter().map(|t| t.trim().to_string()).collect())
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| StoreError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Pretty-print `value` to `path`, creating parent directories.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let text = serde_json::to_string_pretty(value).map_err(|e| StoreError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::write(path, text).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
