//! Rating a whole tournament, one round after another
//!
//! Each round's output table is the next round's input, so rounds are
//! processed strictly in order and the table is threaded through as a value.

use crate::error::Result;
use crate::ingest::provider::{RoundData, RoundSource};
use crate::ingest::tabbycat::SpeakerTab;
use crate::pairing::{expand_pairings, team_pairings_for_round};
use crate::rating::calculator::{RatingCalculator, RoundOutcome};
use crate::rating::table::RatingTable;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// What happened in one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub round: usize,
    pub matches: usize,
    pub team_pairings: usize,
    pub individual_pairings: usize,
    /// Distinct rated competitors who played this round
    pub competitors_rated: usize,
}

/// Final table plus per-round summaries
#[derive(Debug, Clone)]
pub struct TournamentReport {
    pub table: RatingTable,
    /// Competitors added from the speaker tab before round 1
    pub enrolled: usize,
    pub rounds: Vec<RoundSummary>,
}

/// Sequential fold of rounds over a rating table
pub struct Tournament {
    calculator: Box<dyn RatingCalculator>,
    rounds: usize,
}

impl Tournament {
    pub fn new(calculator: Box<dyn RatingCalculator>, rounds: usize) -> Self {
        Self { calculator, rounds }
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Add every speaker-tab competitor missing from the table
    pub fn enroll(&self, table: &mut RatingTable, tab: &SpeakerTab) -> usize {
        let initial_rating = self.calculator.initial_rating();
        let mut enrolled = 0;
        for (competitor, _) in tab.roster.iter() {
            if table.enroll(competitor, initial_rating) {
                enrolled += 1;
            }
        }
        if enrolled > 0 {
            info!(
                "Enrolled {} new competitors at {}",
                enrolled, initial_rating
            );
        }
        enrolled
    }

    /// Rate a single round against the given table
    pub fn rate_round(
        &self,
        round: usize,
        data: &RoundData,
        tab: &SpeakerTab,
        table: &RatingTable,
    ) -> Result<(RoundOutcome, RoundSummary)> {
        let team_pairings = team_pairings_for_round(&data.groups, &data.ranks)?;
        let pairings = expand_pairings(&team_pairings, &tab.roster);
        debug!(
            "Round {}: {} matches, {} team pairings, {} individual pairings",
            round,
            data.groups.len(),
            team_pairings.len(),
            pairings.len()
        );

        let outcome = self
            .calculator
            .apply_round(&pairings, table, &tab.performance, round)?;

        let rated: BTreeSet<&str> = outcome
            .changes
            .iter()
            .flat_map(|change| [&change.winner, &change.loser])
            .filter_map(|entrant| entrant.competitor_id())
            .filter(|id| table.contains(id))
            .collect();

        let summary = RoundSummary {
            round,
            matches: data.groups.len(),
            team_pairings: team_pairings.len(),
            individual_pairings: pairings.len(),
            competitors_rated: rated.len(),
        };
        Ok((outcome, summary))
    }

    /// Enroll the speaker tab, then fold every round over `table`
    pub fn run(&self, source: &dyn RoundSource, mut table: RatingTable) -> Result<TournamentReport> {
        let tab = source.speaker_tab()?;
        let enrolled = self.enroll(&mut table, &tab);

        let mut rounds = Vec::with_capacity(self.rounds);
        for round in 1..=self.rounds {
            let data = source.round(round)?;
            let (outcome, summary) = self.rate_round(round, &data, &tab, &table)?;
            info!(
                "Round {} rated: {} matches, {} competitors updated",
                round, summary.matches, summary.competitors_rated
            );
            table = outcome.table;
            rounds.push(summary);
        }

        Ok(TournamentReport {
            table,
            enrolled,
            rounds,
        })
    }
}
