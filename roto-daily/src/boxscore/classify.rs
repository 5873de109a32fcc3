// Row classification and the batter/pitcher section state machine.

use super::{GameId, GAME_ID_PREFIX};
use super::stolen_bases::MARKER;

/// Table slots at or above this index hold pitching lines.
const FIRST_PITCHING_SLOT: usize = 4;

/// What a scraped row is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind<'a> {
    /// No cells; dropped.
    Empty,
    /// A game-id marker that opens a new section. Holds the marker cell.
    Header(&'a str),
    /// The stolen-base narrative marker. Holds the cells after the marker.
    StolenBases(&'a [String]),
    /// A player line, id cell first.
    Player(&'a [String]),
}

pub fn classify(cells: &[String]) -> RowKind<'_> {
    match cells {
        [] => RowKind::Empty,
        [only] if only.starts_with(GAME_ID_PREFIX) => RowKind::Header(only),
        [first, rest @ ..] if first == MARKER => RowKind::StolenBases(rest),
        _ => RowKind::Player(cells),
    }
}

/// The section a player row belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Batting { team: String },
    Pitching { team: String },
}

impl Section {
    /// Decide the section a header opens from the table slot it sits in.
    ///
    /// Batting and pitching tables each come as an away/home pair; slots
    /// with `slot % 4 == 1` are the away side.
    pub fn for_slot(game: &GameId, slot: usize) -> Section {
        let team = if slot % 4 == 1 {
            game.away.clone()
        } else {
            game.home.clone()
        };
        if slot < FIRST_PITCHING_SLOT {
            Section::Batting { team }
        } else {
            Section::Pitching { team }
        }
    }

    pub fn team(&self) -> &str {
        match self {
            Section::Batting { team } | Section::Pitching { team } => team,
        }
    }
}

/// Scanner state carried from row to row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SectionScanner {
    #[default]
    AwaitingHeader,
    InSection(Section),
}

impl SectionScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A header row switches team and mode for every row until the next one.
    pub fn enter(&mut self, game: &GameId, slot: usize) {
        *self = SectionScanner::InSection(Section::for_slot(game, slot));
    }

    pub fn section(&self) -> Option<&Section> {
        match self {
            SectionScanner::AwaitingHeader => None,
            SectionScanner::InSection(section) => Some(section),
        }
    }
}
