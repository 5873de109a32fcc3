// Builds a typed player line from one classified data row.

use super::classify::Section;
use super::BoxScoreError;
use crate::stats::{BatterLine, PitcherLine, PlayerDailyStat};

/// Box scores print a dash when a batter has no home runs.
const NO_DATA: &str = "-";

const PITCHER_POS: &str = "P";

// Column offsets, counting the player id cell as column 0.
const NAME: usize = 1;

const BAT_AB: usize = 2;
const BAT_RUNS: usize = 3;
const BAT_HITS: usize = 4;
const BAT_RBIS: usize = 5;
const BAT_HR: usize = 6;

const PIT_INNINGS: usize = 2;
const PIT_HITS: usize = 3;
const PIT_EARNED_RUNS: usize = 5;
const PIT_WALKS: usize = 6;
const PIT_STRIKEOUTS: usize = 7;

/// Build the `(player id, line)` pair for a row in the given section.
pub fn build_record(
    cells: &[String],
    section: &Section,
) -> Result<(u32, PlayerDailyStat), BoxScoreError> {
    let id_cell = cells.first().ok_or(BoxScoreError::MissingPlayerId)?;
    let player_id = id_cell
        .trim()
        .parse::<u32>()
        .map_err(|_| BoxScoreError::InvalidPlayerId(id_cell.clone()))?;

    let stat = match section {
        Section::Batting { team } => PlayerDailyStat::Batter(batter_line(player_id, cells, team)?),
        Section::Pitching { team } => PlayerDailyStat::Pitcher(pitcher_line(player_id, cells, team)?),
    };
    Ok((player_id, stat))
}

fn batter_line(player_id: u32, cells: &[String], team: &str) -> Result<BatterLine, BoxScoreError> {
    ensure_len(player_id, cells, BAT_HR + 1)?;

    let label = cells[NAME].trim();
    let (name, pos) = label
        .rsplit_once(' ')
        .ok_or_else(|| BoxScoreError::MissingPosition {
            player_id,
            value: label.to_string(),
        })?;

    let hr_cell = &cells[BAT_HR];
    let hr = parse_home_runs(hr_cell).ok_or_else(|| BoxScoreError::InvalidStat {
        player_id,
        column: "HR",
        value: hr_cell.clone(),
    })?;

    Ok(BatterLine {
        name: remove_dash(name).to_string(),
        team: team.to_string(),
        pos: pos.to_string(),
        ab: count(player_id, cells, BAT_AB, "AB")?,
        runs: count(player_id, cells, BAT_RUNS, "R")?,
        hits: count(player_id, cells, BAT_HITS, "H")?,
        rbis: count(player_id, cells, BAT_RBIS, "RBI")?,
        hr,
        sb: 0,
    })
}

fn pitcher_line(player_id: u32, cells: &[String], team: &str) -> Result<PitcherLine, BoxScoreError> {
    ensure_len(player_id, cells, PIT_STRIKEOUTS + 1)?;

    // "Name (W, 3-1)": the decision, if any, follows the parenthesis.
    let label = &cells[NAME];
    let (name_part, decision) = match label.split_once('(') {
        Some((name, rest)) => (name, Some(rest)),
        None => (label.as_str(), None),
    };
    let win = u32::from(decision.is_some_and(|d| d.starts_with('W')));
    let save = u32::from(decision.is_some_and(|d| d.starts_with('S')));

    let innings = &cells[PIT_INNINGS];
    let outs = parse_outs(innings).ok_or_else(|| BoxScoreError::InvalidInnings {
        player_id,
        value: innings.clone(),
    })?;

    Ok(PitcherLine {
        name: remove_dash(name_part.trim()).to_string(),
        team: team.to_string(),
        pos: PITCHER_POS.to_string(),
        win,
        save,
        outs,
        hits: count(player_id, cells, PIT_HITS, "H")?,
        earned_runs: count(player_id, cells, PIT_EARNED_RUNS, "ER")?,
        walks: count(player_id, cells, PIT_WALKS, "BB")?,
        strikeouts: count(player_id, cells, PIT_STRIKEOUTS, "K")?,
    })
}

/// Strip a substitution marker: if the first word ends in a dash, drop it.
pub fn remove_dash(name: &str) -> &str {
    match name.split_once(' ') {
        Some((first, rest)) if first.ends_with('-') => rest,
        Some(_) => name,
        None if name.ends_with('-') => "",
        None => name,
    }
}

/// Innings pitched as `<full>.<partial>` converted to outs.
///
/// The partial digit counts outs in the unfinished inning, so only 0..=2 is
/// valid.
pub fn parse_outs(innings: &str) -> Option<u32> {
    let (full, partial) = innings.trim().split_once('.')?;
    let full = parse_digits(full)?;
    let partial = parse_digits(partial)?;
    if partial > 2 {
        return None;
    }
    full.checked_mul(3)?.checked_add(partial)
}

/// Home runs, with the no-data dash meaning zero.
pub fn parse_home_runs(cell: &str) -> Option<u32> {
    let cell = cell.trim();
    if cell == NO_DATA {
        return Some(0);
    }
    parse_digits(cell)
}

/// Unsigned count made only of ASCII digits. Signs are rejected even though
/// `u32::from_str` would take a leading `+`.
fn parse_digits(cell: &str) -> Option<u32> {
    if cell.is_empty() || !cell.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    cell.parse().ok()
}

fn ensure_len(player_id: u32, cells: &[String], expected: usize) -> Result<(), BoxScoreError> {
    if cells.len() < expected {
        return Err(BoxScoreError::ShortRow {
            player_id,
            expected,
            found: cells.len(),
        });
    }
    Ok(())
}

fn count(
    player_id: u32,
    cells: &[String],
    idx: usize,
    column: &'static str,
) -> Result<u32, BoxScoreError> {
    let value = &cells[idx];
    parse_digits(value.trim()).ok_or_else(|| BoxScoreError::InvalidStat {
        player_id,
        column,
        value: value.clone(),
    })
}
