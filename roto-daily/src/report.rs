// CSV export of the free-agent pool.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::free_agents::FreeAgentPool;

const BATTER_HEADER: [&str; 9] = [
    "NAME", "TEAM", "POSITION", "AT BATS", "AVG", "RUNS", "RBIS", "HR", "SB",
];

const PITCHER_HEADER: [&str; 8] = [
    "NAME", "TEAM", "WIN", "SAVE", "INNINGS", "ERA", "WHIP", "K/9",
];

// Rows serialize positionally under the headers above.
#[derive(Debug, Serialize)]
struct BatterRow<'a> {
    name: &'a str,
    team: &'a str,
    position: &'a str,
    at_bats: u32,
    avg: String,
    runs: u32,
    rbis: u32,
    hr: u32,
    sb: u32,
}

#[derive(Debug, Serialize)]
struct PitcherRow<'a> {
    name: &'a str,
    team: &'a str,
    win: u32,
    save: u32,
    innings: String,
    era: String,
    whip: String,
    k9: String,
}

/// Outs back to box-score innings notation, e.g. 20 -> "6.2".
pub fn format_innings(outs: u32) -> String {
    format!("{}.{}", outs / 3, outs % 3)
}

/// Write the batter table as CSV with a header row.
pub fn write_batters<W: Write>(out: W, pool: &FreeAgentPool) -> Result<(), csv::Error> {
    let mut wtr = headed_writer(out, &BATTER_HEADER)?;
    for fa in pool.batters.values() {
        let line = &fa.day_stats.line;
        wtr.serialize(BatterRow {
            name: &fa.name,
            team: &fa.team,
            position: &fa.position,
            at_bats: line.ab,
            avg: format!("{:.3}", fa.day_stats.w_avg),
            runs: line.runs,
            rbis: line.rbis,
            hr: line.hr,
            sb: line.sb,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the pitcher table as CSV with a header row.
pub fn write_pitchers<W: Write>(out: W, pool: &FreeAgentPool) -> Result<(), csv::Error> {
    let mut wtr = headed_writer(out, &PITCHER_HEADER)?;
    for fa in pool.pitchers.values() {
        let stat = &fa.day_stats;
        wtr.serialize(PitcherRow {
            name: &fa.name,
            team: &fa.team,
            win: stat.line.win,
            save: stat.line.save,
            innings: format_innings(stat.line.outs),
            era: format!("{:.2}", stat.w_era),
            whip: format!("{:.2}", stat.w_whip),
            k9: format!("{:.2}", stat.w_k9),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// The header goes out even when no rows follow.
fn headed_writer<W: Write>(out: W, header: &[&str]) -> Result<csv::Writer<W>, csv::Error> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(header)?;
    Ok(wtr)
}

/// Batter and pitcher report paths for `date` under `dir`.
pub fn report_paths(dir: &Path, date: NaiveDate) -> (PathBuf, PathBuf) {
    let stamp = date.format("%Y%m%d");
    (
        dir.join(format!("free_agent_batters_{stamp}.csv")),
        dir.join(format!("free_agent_pitchers_{stamp}.csv")),
    )
}

/// Write both tables under `dir`; returns the two file paths.
pub fn write_reports(
    dir: &Path,
    date: NaiveDate,
    pool: &FreeAgentPool,
) -> Result<(PathBuf, PathBuf), csv::Error> {
    std::fs::create_dir_all(dir)?;
    let (batters, pitchers) = report_paths(dir, date);
    write_batters(std::fs::File::create(&batters)?, pool)?;
    write_pitchers(std::fs::File::create(&pitchers)?, pool)?;

    Ok((batters, pitchers))
}
