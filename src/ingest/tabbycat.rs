//! Parsers for tab-separated exports from the tab system
//!
//! Every export starts with a header row, which is skipped.

use crate::error::{RatingError, Result};
use crate::ingest::names::normalize_name;
use crate::rating::performance::PerformanceTable;
use crate::types::{PerformanceRecord, RankedGroup, Roster, TeamRanks, TEAMS_PER_MATCH};
use tracing::debug;

/// Speaker tab columns
const SPEAKER_NAME_COLUMN: usize = 1;
const SPEAKER_TEAM_COLUMN: usize = 3;
const FIRST_SCORE_COLUMN: usize = 4;

/// Roster and speaker results read from one speaker tab
#[derive(Debug, Clone, Default)]
pub struct SpeakerTab {
    pub roster: Roster,
    pub performance: PerformanceTable,
}

/// Data rows with their 1-based line numbers
fn data_rows(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| (index + 1, line.split('\t').map(str::trim).collect()))
}

fn parse_error(source_name: &str, line: usize, reason: impl Into<String>) -> anyhow::Error {
    RatingError::Parse {
        source_name: source_name.to_string(),
        line,
        reason: reason.into(),
    }
    .into()
}

/// Parse a speaker tab with `rounds` per-round score columns.
///
/// Scores that are not integers (e.g. a missed round) count as 0 and an
/// unreadable average as 0.0.
pub fn parse_speaker_tab(text: &str, rounds: usize, source_name: &str) -> Result<SpeakerTab> {
    let mut tab = SpeakerTab::default();

    for (line, row) in data_rows(text) {
        if row.len() <= SPEAKER_TEAM_COLUMN {
            return Err(parse_error(
                source_name,
                line,
                format!("expected at least {} columns", SPEAKER_TEAM_COLUMN + 1),
            ));
        }

        let name = normalize_name(row[SPEAKER_NAME_COLUMN]);
        if name.is_empty() {
            debug!("Skipping unnamed speaker on line {} of {}", line, source_name);
            continue;
        }
        let team = row[SPEAKER_TEAM_COLUMN].to_string();
        let scores: Vec<i32> = (FIRST_SCORE_COLUMN..FIRST_SCORE_COLUMN + rounds)
            .map(|column| {
                row.get(column)
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(0)
            })
            .collect();
        let average = row
            .get(FIRST_SCORE_COLUMN + rounds)
            .and_then(|value| value.parse().ok())
            .unwrap_or(0.0);

        tab.roster.insert(name.clone(), team.clone());
        tab.performance
            .insert(name, PerformanceRecord::new(team, scores, average));
    }

    debug!(
        "Parsed {} speakers from {}",
        tab.performance.len(),
        source_name
    );
    Ok(tab)
}

/// Convert a placing such as `1st` or `3rd` to its number
pub fn parse_ordinal(value: &str) -> Option<u32> {
    match value.trim() {
        "1st" => Some(1),
        "2nd" => Some(2),
        "3rd" => Some(3),
        "4th" => Some(4),
        _ => None,
    }
}

/// Parse one round's team results: team name in column 0, placing in
/// column 2 when the export includes institutions, column 1 otherwise.
pub fn parse_team_ranks(
    text: &str,
    include_institution: bool,
    source_name: &str,
) -> Result<TeamRanks> {
    let rank_column = if include_institution { 2 } else { 1 };
    let mut ranks = TeamRanks::new();

    for (line, row) in data_rows(text) {
        let value = row
            .get(rank_column)
            .ok_or_else(|| parse_error(source_name, line, "missing rank column"))?;
        let rank = parse_ordinal(value)
            .ok_or_else(|| parse_error(source_name, line, format!("invalid rank {:?}", value)))?;
        ranks.insert(row[0].to_string(), rank);
    }

    Ok(ranks)
}

/// Parse one round's draw: the four team names of a match in columns 1 to 4
pub fn parse_debates(text: &str, source_name: &str) -> Result<Vec<RankedGroup>> {
    let mut groups = Vec::new();

    for (line, row) in data_rows(text) {
        let teams = row.get(1..=TEAMS_PER_MATCH).ok_or_else(|| {
            parse_error(
                source_name,
                line,
                format!("expected {} team columns", TEAMS_PER_MATCH),
            )
        })?;
        groups.push(RankedGroup::new(teams.iter().copied()));
    }

    Ok(groups)
}
