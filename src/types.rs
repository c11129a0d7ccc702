//! Common types used throughout the rating engine

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Normalized competitor name, unique across the rating table
pub type CompetitorId = String;

/// Team name exactly as it appears in the tab export
pub type TeamId = String;

/// Rank lookup for one round: team -> place in its match (1 = first)
pub type TeamRanks = HashMap<TeamId, u32>;

/// Number of teams in every match
pub const TEAMS_PER_MATCH: usize = 4;

/// Ordered (winner, loser) outcome, for teams or for individual entrants
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing<T> {
    pub winner: T,
    pub loser: T,
}

impl<T> Pairing<T> {
    pub fn new(winner: T, loser: T) -> Self {
        Self { winner, loser }
    }
}

/// Placeholder slot used when a team's roster is missing members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwingSlot {
    /// First stand-in for a team with no known members
    First,
    /// Second stand-in for a team with no known members
    Second,
    /// Stand-in partner for a team with a single known member
    Single,
}

impl std::fmt::Display for SwingSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwingSlot::First => write!(f, "UNKNOWN SWING 1"),
            SwingSlot::Second => write!(f, "UNKNOWN SWING 2"),
            SwingSlot::Single => write!(f, "UNKNOWN SINGLE SWING1"),
        }
    }
}

/// One side of an individual pairing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entrant {
    /// A competitor listed on the roster
    Competitor(CompetitorId),
    /// A synthesized stand-in; never rated, never stored
    Swing(SwingSlot),
}

impl Entrant {
    pub fn competitor(id: impl Into<CompetitorId>) -> Self {
        Entrant::Competitor(id.into())
    }

    /// Identity usable for table lookups, `None` for swings
    pub fn competitor_id(&self) -> Option<&str> {
        match self {
            Entrant::Competitor(id) => Some(id),
            Entrant::Swing(_) => None,
        }
    }

    pub fn is_swing(&self) -> bool {
        matches!(self, Entrant::Swing(_))
    }
}

impl std::fmt::Display for Entrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entrant::Competitor(id) => write!(f, "{}", id),
            Entrant::Swing(slot) => write!(f, "{}", slot),
        }
    }
}

/// Teams that met in one match; ranks are looked up separately per round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedGroup {
    pub teams: Vec<TeamId>,
}

impl RankedGroup {
    pub fn new<I, S>(teams: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TeamId>,
    {
        Self {
            teams: teams.into_iter().map(Into::into).collect(),
        }
    }
}

/// Per-competitor speaker results for the whole tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub team: TeamId,
    /// One score per round, in round order
    pub scores: Vec<i32>,
    pub average: f64,
}

impl PerformanceRecord {
    pub fn new(team: impl Into<TeamId>, scores: Vec<i32>, average: f64) -> Self {
        Self {
            team: team.into(),
            scores,
            average,
        }
    }

    /// Score for a 1-based round; rounds without a recorded score count as 0
    pub fn round_score(&self, round: usize) -> i32 {
        round
            .checked_sub(1)
            .and_then(|index| self.scores.get(index))
            .copied()
            .unwrap_or(0)
    }
}

/// Competitor -> team assignments in stable insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    entries: Vec<(CompetitorId, TeamId)>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a competitor to a team; a reassignment keeps the original position
    pub fn insert(&mut self, competitor: impl Into<CompetitorId>, team: impl Into<TeamId>) {
        let competitor = competitor.into();
        let team = team.into();
        match self.entries.iter_mut().find(|(id, _)| *id == competitor) {
            Some(entry) => entry.1 = team,
            None => self.entries.push((competitor, team)),
        }
    }

    pub fn team_of(&self, competitor: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| id == competitor)
            .map(|(_, team)| team.as_str())
    }

    /// Members of a team in roster order
    pub fn members_of<'a>(&'a self, team: &'a str) -> impl Iterator<Item = &'a CompetitorId> + 'a {
        self.entries
            .iter()
            .filter(move |(_, t)| t == team)
            .map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CompetitorId, &TeamId)> {
        self.entries.iter().map(|(id, team)| (id, team))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C, T> FromIterator<(C, T)> for Roster
where
    C: Into<CompetitorId>,
    T: Into<TeamId>,
{
    fn from_iter<I: IntoIterator<Item = (C, T)>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for (competitor, team) in iter {
            roster.insert(competitor, team);
        }
        roster
    }
}
