// Fantasy league rosters and the per-team daily sheet.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::stats::{DayStats, PlayerDailyStat};

/// A rostered player as listed on a fantasy team page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub team: String,
    pub position: String,
}

/// One fantasy team's roster for a scoring period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FantasyTeam {
    pub team_name: String,
    #[serde(default)]
    pub batters: BTreeMap<u32, RosterEntry>,
    #[serde(default)]
    pub pitchers: BTreeMap<u32, RosterEntry>,
    #[serde(default)]
    pub reserves: BTreeMap<u32, RosterEntry>,
}

/// Every fantasy team in the league, keyed by team name.
pub type League = BTreeMap<String, FantasyTeam>;

/// Ids of every player on any roster, reserves included.
pub fn rostered_ids(league: &League) -> HashSet<u32> {
    league
        .values()
        .flat_map(|team| {
            team.batters
                .keys()
                .chain(team.pitchers.keys())
                .chain(team.reserves.keys())
        })
        .copied()
        .collect()
}

/// First day of the scoring period containing `date`: the latest `start`
/// weekday on or before it.
pub fn period_start(date: NaiveDate, start: Weekday) -> NaiveDate {
    let back = (7 + date.weekday().num_days_from_monday() - start.num_days_from_monday()) % 7;
    date - Duration::days(i64::from(back))
}

// ---------------------------------------------------------------------------
// Daily sheet
// ---------------------------------------------------------------------------

/// A rostered player with whatever they did on the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    #[serde(flatten)]
    pub player: RosterEntry,
    /// `None` when the player did not appear in any box score.
    pub day_stats: Option<PlayerDailyStat>,
}

/// One fantasy team's active players with their day lines attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTeam {
    pub team_name: String,
    pub batters: BTreeMap<u32, DailyEntry>,
    pub pitchers: BTreeMap<u32, DailyEntry>,
    pub reserves: BTreeMap<u32, RosterEntry>,
}

pub type DailySheet = BTreeMap<String, DailyTeam>;

/// Attach each active player's day line. Reserves are carried over without
/// stats since they do not score.
pub fn daily_sheet(league: &League, day: &DayStats) -> DailySheet {
    let attach = |players: &BTreeMap<u32, RosterEntry>| -> BTreeMap<u32, DailyEntry> {
        players
            .iter()
            .map(|(id, player)| {
                let entry = DailyEntry {
                    player: player.clone(),
                    day_stats: day.get(id).cloned(),
                };
                (*id, entry)
            })
            .collect()
    };

    league
        .iter()
        .map(|(key, team)| {
            let daily = DailyTeam {
                team_name: team.team_name.clone(),
                batters: attach(&team.batters),
                pitchers: attach(&team.pitchers),
                reserves: team.reserves.clone(),
            };
            (key.clone(), daily)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::BatterLine;

    fn entry(name: &str, position: &str) -> RosterEntry {
        RosterEntry {
            name: name.into(),
            team: "NYY".into(),
            position: position.into(),
        }
    }

    fn league() -> League {
        let mut league = League::new();
        league.insert(
            "Sluggers".into(),
            FantasyTeam {
                team_name: "Sluggers".into(),
                batters: [(1, entry("Jane Doe", "SS"))].into(),
                pitchers: [(2, entry("Ace Arm", "P"))].into(),
                reserves: [(3, entry("Bench Guy", "C"))].into(),
            },
        );
        league.insert(
            "Aces".into(),
            FantasyTeam {
                team_name: "Aces".into(),
                batters: [(4, entry("Sam Hill", "1B"))].into(),
                pitchers: BTreeMap::new(),
                reserves: BTreeMap::new(),
            },
        );
        league
    }

    #[test]
    fn rostered_ids_cover_every_list() {
        let ids = rostered_ids(&league());
        assert_eq!(ids, HashSet::from([1, 2, 3, 4]));
    }

    #[test]
    fn league_json_with_string_keys_loads() {
        let json = r#"{"Sluggers": {"team_name": "Sluggers",
            "batters": {"592450": {"position": "RF", "team": "NYY", "name": "Jane Doe"}},
            "pitchers": {}, "reserves": {}}}"#;
        let league: League = serde_json::from_str(json).unwrap();
        assert!(rostered_ids(&league).contains(&592450));
    }

    #[test]
    fn period_starts_on_most_recent_wednesday() {
        let wed = NaiveDate::from_ymd_opt(2022, 4, 13).unwrap();
        for offset in 0..7 {
            let day = wed + Duration::days(offset);
            assert_eq!(period_start(day, Weekday::Wed), wed, "offset {offset}");
        }
        let tue = NaiveDate::from_ymd_opt(2022, 4, 12).unwrap();
        assert_eq!(
            period_start(tue, Weekday::Wed),
            NaiveDate::from_ymd_opt(2022, 4, 6).unwrap()
        );
    }

    #[test]
    fn period_start_with_monday_anchor() {
        let sun = NaiveDate::from_ymd_opt(2022, 4, 17).unwrap();
        assert_eq!(
            period_start(sun, Weekday::Mon),
            NaiveDate::from_ymd_opt(2022, 4, 11).unwrap()
        );
    }

    #[test]
    fn daily_sheet_attaches_stats_or_none() {
        let mut day = DayStats::new();
        day.insert(
            1,
            PlayerDailyStat::Batter(BatterLine {
                name: "Jane Doe".into(),
                team: "NYY".into(),
                pos: "SS".into(),
                ab: 4,
                runs: 1,
                hits: 2,
                rbis: 1,
                hr: 0,
                sb: 0,
            }),
        );
        let line = day[&1].clone();
        day.insert(3, line);

        let sheet = daily_sheet(&league(), &day);
        let sluggers = &sheet["Sluggers"];
        assert!(sluggers.batters[&1].day_stats.is_some());
        assert!(sluggers.pitchers[&2].day_stats.is_none());
        assert_eq!(sluggers.reserves[&3].name, "Bench Guy");
        assert!(sheet["Aces"].batters[&4].day_stats.is_none());
    }

    #[test]
    fn daily_entry_json_is_flat() {
        let sheet = daily_sheet(&league(), &DayStats::new());
        let value = serde_json::to_value(&sheet).unwrap();
        let jane = &value["Sluggers"]["batters"]["1"];
        assert_eq!(jane["name"], "Jane Doe");
        assert!(jane["day_stats"].is_null());
    }
}
