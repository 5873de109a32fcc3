// Daily run: box scores -> day stats -> roster sheet -> free agents.
//
// Each stage reuses its output file if a previous run already wrote it.

use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::boxscore::{self, GameId, RawBoxScore};
use crate::config::Config;
use crate::free_agents::{self, FreeAgentPool};
use crate::league;
use crate::report;
use crate::source::BoxScoreSource;
use crate::stats::aggregate::aggregate;
use crate::stats::DayStats;
use crate::store::{self, Store};

/// What a daily run produced.
#[derive(Debug, Clone)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub players: usize,
    pub free_agents: FreeAgentPool,
}

/// Parse every tracked game in `box_scores` and fold them into one day.
///
/// Games where neither side is tracked are skipped. Any parse failure aborts
/// the whole day.
pub fn build_day_stats(box_scores: &[RawBoxScore], tracked: &HashSet<String>) -> Result<DayStats> {
    let mut games = Vec::with_capacity(box_scores.len());
    for raw in box_scores {
        let game: GameId = raw
            .game_id
            .parse()
            .with_context(|| format!("bad game id in box score `{}`", raw.game_id))?;
        if !game.involves_any(|team| tracked.contains(team)) {
            debug!("skipping {}: no tracked team", game);
            continue;
        }
        let stats = boxscore::parse_box_score(raw)
            .with_context(|| format!("failed to parse box score {}", raw.game_id))?;
        games.push(stats);
    }
    Ok(aggregate(games))
}

/// Load the day's stats from disk, or build and save them.
pub fn day_stats_for(
    store: &Store,
    source: &dyn BoxScoreSource,
    date: NaiveDate,
    tracked: &HashSet<String>,
) -> Result<DayStats> {
    let path = store.day_stats_path(date);
    if path.exists() {
        info!("{} already exists, skipping box scores", path.display());
        return store
            .load_day_stats(date)
            .with_context(|| format!("failed to load day stats for {date}"));
    }

    let box_scores = source
        .box_scores_on(date)
        .with_context(|| format!("failed to read box scores for {date}"))?;
    let stats = build_day_stats(&box_scores, tracked)?;
    store.save_day_stats(date, &stats)?;
    info!("Saved {} player lines to {}", stats.len(), path.display());
    Ok(stats)
}

/// Run the whole day: stats, per-team sheet, free agents and CSV reports.
pub fn run_day(config: &Config, source: &dyn BoxScoreSource, date: NaiveDate) -> Result<DaySummary> {
    let store = Store::new(config.data_dir());
    let tracked = store::load_team_abbreviations(&config.abbreviations_path())
        .context("failed to load tracked team abbreviations")?;

    let day = day_stats_for(&store, source, date, &tracked)?;

    let period = league::period_start(date, config.league.period_start);
    let roster = store
        .load_league(period)
        .with_context(|| format!("failed to load league rosters for period starting {period}"))?;

    let sheet_path = store.daily_sheet_path(date);
    if sheet_path.exists() {
        info!("{} already exists, skipping", sheet_path.display());
    } else {
        store.save_daily_sheet(date, &league::daily_sheet(&roster, &day))?;
        info!("Wrote {}", sheet_path.display());
    }

    let pool_path = store.free_agents_path(date);
    let pool = if pool_path.exists() {
        info!("{} already exists, skipping", pool_path.display());
        store
            .load_free_agents(date)
            .with_context(|| format!("failed to load free agents for {date}"))?
    } else {
        let rostered = league::rostered_ids(&roster);
        let pool = free_agents::select_free_agents(&day, &rostered, &tracked);
        store.save_free_agents(date, &pool)?;
        info!("Wrote {}", pool_path.display());
        pool
    };

    let (batters, pitchers) = report::report_paths(config.report_dir(), date);
    if batters.exists() && pitchers.exists() {
        info!("{} and {} already exist, skipping", batters.display(), pitchers.display());
    } else {
        report::write_reports(config.report_dir(), date, &pool)
            .context("failed to write free-agent reports")?;
        info!("Wrote {} and {}", batters.display(), pitchers.display());
    }

    Ok(DaySummary {
        date,
        players: day.len(),
        free_agents: pool,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxscore::RawRow;

    fn tracked() -> HashSet<String> {
        ["NYY".to_string()].into()
    }

    fn game(id: &str, player: &str) -> RawBoxScore {
        RawBoxScore {
            game_id: id.into(),
            rows: vec![
                RawRow::new(1, [id]),
                RawRow::new(1, [player, "Some Body LF", "4", "1", "1", "0", "-"]),
            ],
            page_text: String::new(),
        }
    }

    #[test]
    fn untracked_games_are_skipped() {
        let games = vec![
            game("MLB_20220414_NYY@BOS", "1"),
            game("MLB_20220414_LAD@SF", "2"),
        ];
        let day = build_day_stats(&games, &tracked()).unwrap();
        assert_eq!(day.keys().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn parse_failure_names_the_game() {
        let mut bad = game("MLB_20220414_NYY@BOS", "1");
        bad.rows[1].cells[2] = "four".into();
        let err = build_day_stats(&[bad], &tracked()).unwrap_err();
        assert!(format!("{err:#}").contains("MLB_20220414_NYY@BOS"));
    }

    #[test]
    fn bad_game_id_is_an_error() {
        let err = build_day_stats(&[game("garbage", "1")], &tracked()).unwrap_err();
        assert!(format!("{err:#}").contains("garbage"));
    }
}
