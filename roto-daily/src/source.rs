// Where raw box scores come from.
//
// Fetching pages is someone else's job; this module only defines the seam and
// a reader for the JSON dumps the fetcher leaves on disk.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::boxscore::RawBoxScore;

/// Supplies every raw box score played on a date.
pub trait BoxScoreSource {
    fn box_scores_on(&self, date: NaiveDate) -> Result<Vec<RawBoxScore>>;
}

/// Reads `<root>/<YYYYMMDD>/*.json`, one box score per file, in file-name
/// order.
#[derive(Debug, Clone)]
pub struct RawDirSource {
    root: PathBuf,
}

impl RawDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        RawDirSource { root: root.into() }
    }

    pub fn dir_for(&self, date: NaiveDate) -> PathBuf {
        self.root.join(date.format("%Y%m%d").to_string())
    }
}

impl BoxScoreSource for RawDirSource {
    fn box_scores_on(&self, date: NaiveDate) -> Result<Vec<RawBoxScore>> {
        let dir = self.dir_for(date);
        if !dir.is_dir() {
            warn!("No raw box scores for {} (looked in {})", date, dir.display());
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&dir).with_context(|| format!("failed to list {}", dir.display()))? {
            let path = entry
                .with_context(|| format!("failed to read entry in {}", dir.display()))?
                .path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut box_scores = Vec::with_capacity(paths.len());
        for path in &paths {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let raw: RawBoxScore = serde_json::from_str(&text)
                .with_context(|| format!("malformed raw box score {}", path.display()))?;
            box_scores.push(raw);
        }

        info!("Read {} raw box scores for {}", box_scores.len(), date);
        Ok(box_scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 4, 14).unwrap()
    }

    #[test]
    fn missing_date_directory_yields_nothing() {
        let tmp = std::env::temp_dir().join("roto_source_missing");
        let _ = fs::remove_dir_all(&tmp);
        let source = RawDirSource::new(&tmp);
        assert!(source.box_scores_on(date()).unwrap().is_empty());
    }

    #[test]
    fn reads_json_files_in_name_order() {
        let tmp = std::env::temp_dir().join("roto_source_order");
        let _ = fs::remove_dir_all(&tmp);
        let source = RawDirSource::new(&tmp);
        let dir = source.dir_for(date());
        fs::create_dir_all(&dir).unwrap();

        fs::write(
            dir.join("b.json"),
            r#"{"game_id": "MLB_20220414_TOR@NYY", "rows": []}"#,
        )
        .unwrap();
        fs::write(
            dir.join("a.json"),
            r#"{"game_id": "MLB_20220414_BAL@BOS", "rows": []}"#,
        )
        .unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let games = source.box_scores_on(date()).unwrap();
        let ids: Vec<_> = games.iter().map(|g| g.game_id.as_str()).collect();
        assert_eq!(ids, ["MLB_20220414_BAL@BOS", "MLB_20220414_TOR@NYY"]);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn malformed_dump_is_an_error() {
        let tmp = std::env::temp_dir().join("roto_source_malformed");
        let _ = fs::remove_dir_all(&tmp);
        let source = RawDirSource::new(&tmp);
        let dir = source.dir_for(date());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("x.json"), "[1, 2").unwrap();

        let err = source.box_scores_on(date()).unwrap_err();
        assert!(format!("{err:#}").contains("malformed raw box score"));

        let _ = fs::remove_dir_all(&tmp);
    }
}
