// Folds per-box-score stat maps into one map for the whole date.

use tracing::debug;

use super::DayStats;

/// Merge one box score's records into the accumulated day.
///
/// A player should appear in at most one game per day; if an id does repeat,
/// the later box score's record replaces the earlier one.
pub fn merge(mut day: DayStats, game: DayStats) -> DayStats {
    for (id, stat) in game {
        if let Some(previous) = day.insert(id, stat) {
            debug!("player {} ({}) seen in two box scores, keeping the later line", id, previous.name());
        }
    }
    day
}

/// Fold every box score on a date into a single map keyed by player id.
pub fn aggregate<I>(games: I) -> DayStats
where
    I: IntoIterator<Item = DayStats>,
{
    games.into_iter().fold(DayStats::new(), merge)
}
