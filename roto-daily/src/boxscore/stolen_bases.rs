// Stolen-base narrative: extraction from page text and reconciliation onto
// batter lines by name.
//
// The narrative lists steals per team as free text ("Jane Doe, John Smith 2
// (5, 2nd base off ...)"). Names are the only join key, so matching is
// best-effort: first exact name match wins and misses are dropped.

use tracing::debug;

use crate::stats::PlayerDailyStat;

/// Section label that precedes each team's baserunning notes. Also used as
/// the first cell of a pre-split narrative row.
pub const MARKER: &str = "BASERUNNING";

/// The stolen-base label as it appears in `#`-joined page text.
const SB_LABEL: &str = "#SB#";

const CELL_SEP: char = '#';
const CHUNK_SEP: &str = ", ";

/// One player's stolen-base credit from the narrative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StolenBaseEvent {
    pub name: String,
    pub count: u32,
}

/// Pull each team's stolen-base list out of the flattened page text.
///
/// Returns nothing when the page has no baserunning section.
pub fn extract_lists(page_text: &str) -> Vec<String> {
    page_text
        .split(MARKER)
        .skip(1)
        .filter_map(|fragment| {
            let start = fragment.find(SB_LABEL)? + SB_LABEL.len();
            let rest = &fragment[start..];
            let end = rest.find(CELL_SEP).unwrap_or(rest.len());
            Some(rest[..end].to_string())
        })
        .collect()
}

/// The page prints every baserunning block twice; keep the first copy.
pub fn first_half(lists: &[String]) -> &[String] {
    &lists[..lists.len() / 2]
}

/// Drop the separator between the "SB" label and the first name.
fn strip_label_lead(list: &str) -> &str {
    list.trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace())
}

/// Split one team's list into per-player events.
///
/// Lists from page text and from narrative rows both still carry the
/// separator after the label.
pub fn parse_list(list: &str) -> Vec<StolenBaseEvent> {
    strip_label_lead(list)
        .split(CHUNK_SEP)
        .filter_map(parse_chunk)
        .collect()
}

/// Parse "Name", "Name 2" or "Name 2 (3, 2nd base off ...)".
///
/// The parenthetical is caught-stealing and season totals; it is discarded.
/// A trailing number is the count, otherwise the count is one. Counts too
/// large for `u32` are capped.
pub fn parse_chunk(chunk: &str) -> Option<StolenBaseEvent> {
    let text = chunk.split('(').next().unwrap_or_default().trim();
    if text.is_empty() {
        return None;
    }

    let event = match text.rsplit_once(' ') {
        Some((name, last)) if is_count(last) => StolenBaseEvent {
            name: name.trim_end().to_string(),
            count: last.parse().unwrap_or(u32::MAX),
        },
        _ => StolenBaseEvent {
            name: text.to_string(),
            count: 1,
        },
    };
    Some(event)
}

fn is_count(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

/// Credit stolen bases onto the batter lines of one box score.
///
/// Lines are searched in row order; the first batter whose name matches
/// exactly gets `sb = count`. Unmatched names are dropped.
pub fn reconcile(
    mut lines: Vec<(u32, PlayerDailyStat)>,
    lists: &[String],
) -> Vec<(u32, PlayerDailyStat)> {
    for event in lists.iter().flat_map(|list| parse_list(list)) {
        let batter = lines.iter_mut().find_map(|(_, stat)| match stat {
            PlayerDailyStat::Batter(b) if b.name == event.name => Some(b),
            _ => None,
        });
        match batter {
            Some(b) => b.sb = event.count,
            None => debug!("no batter named '{}' for {} stolen base(s)", event.name, event.count),
        }
    }
    lines
}
