// Box-score parsing: scraped table rows in, typed player lines out.
//
// A box score arrives as the rows of its batting and pitching tables, each
// tagged with the table's slot on the page, plus the page's flattened text
// for the stolen-base narrative. Parsing is two-phase: the section scanner
// builds every player line, then the stolen-base reconciler runs over the
// finished lines.

pub mod classify;
pub mod player;
pub mod stolen_bases;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::stats::{DayStats, PlayerDailyStat};
use classify::{RowKind, SectionScanner};

/// Every game id starts with this league marker.
pub const GAME_ID_PREFIX: &str = "MLB";

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// One scraped table row. For player rows the first cell is the player id
/// lifted from the name link; the rest are the cell texts in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// Position of the source table on the page.
    pub slot: usize,
    #[serde(default)]
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new<I, S>(slot: usize, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RawRow {
            slot,
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

/// Everything the retrieval layer hands over for one game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBoxScore {
    pub game_id: String,
    pub rows: Vec<RawRow>,
    /// Page text with element boundaries joined by `#`.
    #[serde(default)]
    pub page_text: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum BoxScoreError {
    #[error("malformed game id `{0}`")]
    InvalidGameId(String),

    #[error("player row has no id cell")]
    MissingPlayerId,

    #[error("player id `{0}` is not an integer")]
    InvalidPlayerId(String),

    #[error("row for player {player_id} has {found} cells, expected at least {expected}")]
    ShortRow {
        player_id: u32,
        expected: usize,
        found: usize,
    },

    #[error("player {player_id}: {column} value `{value}` is not a count")]
    InvalidStat {
        player_id: u32,
        column: &'static str,
        value: String,
    },

    #[error("player {player_id}: innings `{value}` is not <full>.<partial>")]
    InvalidInnings { player_id: u32, value: String },

    #[error("player {player_id}: batter cell `{value}` has no position")]
    MissingPosition { player_id: u32, value: String },

    #[error("player row found before any section header")]
    RowBeforeHeader,
}

// ---------------------------------------------------------------------------
// Game ids
// ---------------------------------------------------------------------------

/// A parsed game id of the form `MLB_<YYYYMMDD>_<AWAY>@<HOME>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameId {
    pub date: NaiveDate,
    pub away: String,
    pub home: String,
}

impl GameId {
    /// True if either side is one of the tracked teams.
    pub fn involves_any<F>(&self, mut tracked: F) -> bool
    where
        F: FnMut(&str) -> bool,
    {
        tracked(&self.away) || tracked(&self.home)
    }
}

impl FromStr for GameId {
    type Err = BoxScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoxScoreError::InvalidGameId(s.to_string());
        let trimmed = s.trim().trim_matches('/');

        let mut parts = trimmed.split('_');
        if parts.next() != Some(GAME_ID_PREFIX) {
            return Err(invalid());
        }
        let date = parts
            .next()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y%m%d").ok())
            .ok_or_else(invalid)?;
        let matchup = parts.next_back().ok_or_else(invalid)?;
        let (away, home) = matchup.split_once('@').ok_or_else(invalid)?;
        if away.is_empty() || home.is_empty() {
            return Err(invalid());
        }

        Ok(GameId {
            date,
            away: away.to_string(),
            home: home.to_string(),
        })
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}@{}",
            GAME_ID_PREFIX,
            self.date.format("%Y%m%d"),
            self.away,
            self.home
        )
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse one box score into its player lines, in row order, with stolen
/// bases already credited.
pub fn parse_lines(raw: &RawBoxScore) -> Result<Vec<(u32, PlayerDailyStat)>, BoxScoreError> {
    let mut scanner = SectionScanner::new();
    let mut lines = Vec::new();
    let mut narrative: Option<Vec<String>> = None;

    for row in &raw.rows {
        match classify::classify(&row.cells) {
            RowKind::Empty => {}
            RowKind::Header(cell) => {
                let game: GameId = cell.parse()?;
                scanner.enter(&game, row.slot);
            }
            RowKind::StolenBases(payload) => {
                narrative = Some(payload.to_vec());
            }
            RowKind::Player(cells) => {
                let section = scanner.section().ok_or(BoxScoreError::RowBeforeHeader)?;
                lines.push(player::build_record(cells, section)?);
            }
        }
    }

    let lists = match narrative {
        Some(payload) => payload,
        None => stolen_bases::extract_lists(&raw.page_text),
    };
    debug!(
        "{}: {} player lines, {} stolen-base lists",
        raw.game_id,
        lines.len(),
        lists.len()
    );

    Ok(stolen_bases::reconcile(lines, stolen_bases::first_half(&lists)))
}

/// Parse one box score into a map keyed by player id.
pub fn parse_box_score(raw: &RawBoxScore) -> Result<DayStats, BoxScoreError> {
    Ok(parse_lines(raw)?.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::PlayerDailyStat;

    const GAME: &str = "MLB_20220414_NYY@BOS";

    fn sample_box_score() -> RawBoxScore {
        RawBoxScore {
            game_id: GAME.into(),
            rows: vec![
                RawRow::new(1, [GAME]),
                RawRow::new(1, ["101", "Jane Doe SS", "4", "1", "2", "0", "-"]),
                RawRow::new(1, ["102", "a- John Roe PH", "1", "0", "0", "0", "-"]),
                RawRow::new(3, [GAME]),
                RawRow::new(3, ["201", "Sam Hill 1B", "4", "2", "3", "4", "1"]),
                RawRow { slot: 3, cells: vec![] },
                RawRow::new(5, [GAME]),
                RawRow::new(5, ["301", "Ace Arm (W, 2-0)", "6.2", "4", "1", "1", "2", "8"]),
                RawRow::new(7, [GAME]),
                RawRow::new(7, ["401", "Late Guy (S, 3)", "1.0", "0", "0", "0", "0", "2"]),
            ],
            page_text: "Box#BASERUNNING#SB#: Jane Doe 2 (3, 2nd base off Ace Arm).#CS#x\
                        #BASERUNNING#SB#: Jane Doe 2 (3, 2nd base off Ace Arm).#End"
                .into(),
        }
    }

    #[test]
    fn game_id_parses_teams_and_date() {
        let game: GameId = GAME.parse().unwrap();
        assert_eq!(game.away, "NYY");
        assert_eq!(game.home, "BOS");
        assert_eq!(game.date, NaiveDate::from_ymd_opt(2022, 4, 14).unwrap());
        assert_eq!(game.to_string(), GAME);
    }

    #[test]
    fn game_id_tolerates_link_slashes() {
        let game: GameId = "MLB_20220414_NYY@BOS/".parse().unwrap();
        assert_eq!(game.home, "BOS");
    }

    #[test]
    fn game_id_rejects_garbage() {
        assert!("NFL_20220414_NYY@BOS".parse::<GameId>().is_err());
        assert!("MLB_2022041_NYY@BOS".parse::<GameId>().is_err());
        assert!("MLB_20220414_NYYBOS".parse::<GameId>().is_err());
        assert!("MLB_20220414_@BOS".parse::<GameId>().is_err());
    }

    #[test]
    fn involves_any_checks_both_sides() {
        let game: GameId = GAME.parse().unwrap();
        assert!(game.involves_any(|t| t == "BOS"));
        assert!(!game.involves_any(|t| t == "TOR"));
    }

    #[test]
    fn full_box_score_parses_sections_and_teams() {
        let stats = parse_box_score(&sample_box_score()).unwrap();
        assert_eq!(stats.len(), 5);

        match &stats[&101] {
            PlayerDailyStat::Batter(b) => {
                assert_eq!(b.team, "NYY");
                assert_eq!(b.pos, "SS");
                assert_eq!(b.hr, 0);
                assert_eq!(b.sb, 2);
            }
            other => panic!("expected batter, got {other:?}"),
        }
        match &stats[&102] {
            PlayerDailyStat::Batter(b) => {
                assert_eq!(b.name, "John Roe");
                assert_eq!(b.sb, 0);
            }
            other => panic!("expected batter, got {other:?}"),
        }
        assert_eq!(stats[&201].team(), "BOS");

        match &stats[&301] {
            PlayerDailyStat::Pitcher(p) => {
                assert_eq!(p.team, "NYY");
                assert_eq!(p.outs, 20);
                assert_eq!(p.win, 1);
                assert_eq!(p.save, 0);
            }
            other => panic!("expected pitcher, got {other:?}"),
        }
        match &stats[&401] {
            PlayerDailyStat::Pitcher(p) => {
                assert_eq!(p.team, "BOS");
                assert_eq!(p.save, 1);
                assert_eq!(p.outs, 3);
            }
            other => panic!("expected pitcher, got {other:?}"),
        }
    }

    #[test]
    fn narrative_row_in_rows_wins_over_page_text() {
        let mut raw = sample_box_score();
        raw.rows.push(RawRow::new(
            7,
            ["BASERUNNING", "Sam Hill 3", "Sam Hill 3"],
        ));
        let stats = parse_box_score(&raw).unwrap();
        match (&stats[&201], &stats[&101]) {
            (PlayerDailyStat::Batter(hill), PlayerDailyStat::Batter(doe)) => {
                assert_eq!(hill.sb, 3);
                assert_eq!(doe.sb, 0);
            }
            other => panic!("expected batters, got {other:?}"),
        }
    }

    #[test]
    fn narrative_row_label_lead_matches_page_text() {
        let mut raw = sample_box_score();
        raw.page_text.clear();
        raw.rows.push(RawRow::new(
            7,
            ["BASERUNNING", ": Jane Doe 2", ": Jane Doe 2"],
        ));
        let stats = parse_box_score(&raw).unwrap();
        match &stats[&101] {
            PlayerDailyStat::Batter(doe) => assert_eq!(doe.sb, 2),
            other => panic!("expected batter, got {other:?}"),
        }
    }

    #[test]
    fn player_row_before_header_is_an_error() {
        let raw = RawBoxScore {
            game_id: GAME.into(),
            rows: vec![RawRow::new(1, ["101", "Jane Doe SS", "4", "1", "2", "0", "-"])],
            page_text: String::new(),
        };
        assert!(matches!(
            parse_box_score(&raw),
            Err(BoxScoreError::RowBeforeHeader)
        ));
    }

    #[test]
    fn bad_stat_cell_fails_the_whole_box_score() {
        let mut raw = sample_box_score();
        raw.rows[2] = RawRow::new(1, ["102", "John Roe PH", "x", "0", "0", "0", "-"]);
        let err = parse_box_score(&raw).unwrap_err();
        assert!(matches!(err, BoxScoreError::InvalidStat { player_id: 102, .. }));
    }

    #[test]
    fn raw_box_score_json_shape() {
        let json = r#"{"game_id":"MLB_20220414_NYY@BOS",
            "rows":[{"slot":1,"cells":["MLB_20220414_NYY@BOS"]},{"slot":1}]}"#;
        let raw: RawBoxScore = serde_json::from_str(json).unwrap();
        assert_eq!(raw.rows.len(), 2);
        assert!(raw.rows[1].cells.is_empty());
        assert!(raw.page_text.is_empty());
    }
}
