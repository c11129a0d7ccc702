//! Elo rating engine with dynamic K-factor and speaker modifier
//!
//! Pairings are applied one after another to a working copy of the table,
//! so a pairing sees the ratings left by every earlier pairing of the round.

use crate::config::RatingConfig;
use crate::error::RatingError;
use crate::rating::calculator::{PairingChange, RatingCalculator, RoundOutcome};
use crate::rating::k_factor::k_factor;
use crate::rating::performance::PerformanceTable;
use crate::rating::table::{RatingEntry, RatingTable, Standing};
use crate::types::{Entrant, Pairing};
use tracing::debug;

/// Rating assumed for a side that is not in the table
pub const UNKNOWN_RATING: f64 = 1000.0;

/// Logistic term shared by the winner's gain and the loser's loss
pub fn expected_gain(winner_rating: f64, loser_rating: f64) -> f64 {
    1.0 - 1.0 / (1.0 + 10f64.powf((winner_rating - loser_rating) / 400.0))
}

/// Elo rating calculator implementation
#[derive(Debug, Clone, Default)]
pub struct EloRatingCalculator {
    config: RatingConfig,
}

impl EloRatingCalculator {
    /// Create a new Elo rating calculator
    pub fn new(config: RatingConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Comparison rating and K-factor for one side of a pairing
    fn side(&self, standing: Standing) -> (f64, u32) {
        match standing {
            Standing::Known(entry) => (
                entry.rating,
                k_factor(&self.config, entry.rating, entry.experience),
            ),
            Standing::Unknown => (UNKNOWN_RATING, 0),
        }
    }

    fn modifier(
        &self,
        entrant: &Entrant,
        performance: &PerformanceTable,
        won: bool,
        round: usize,
    ) -> f64 {
        entrant
            .competitor_id()
            .map_or(1.0, |id| performance.modifier(id, won, round))
    }

    /// Apply a single pairing to the working table
    fn apply_pairing(
        &self,
        pairing: &Pairing<Entrant>,
        table: &mut RatingTable,
        performance: &PerformanceTable,
        round: usize,
    ) -> crate::error::Result<PairingChange> {
        let winner_standing = table.standing(&pairing.winner);
        let loser_standing = table.standing(&pairing.loser);
        let (winner_rating, winner_k) = self.side(winner_standing);
        let (loser_rating, loser_k) = self.side(loser_standing);

        let gain = expected_gain(winner_rating, loser_rating);
        let winner_delta = gain
            * f64::from(winner_k)
            * self.modifier(&pairing.winner, performance, true, round);
        let loser_delta = gain
            * f64::from(loser_k)
            * self.modifier(&pairing.loser, performance, false, round);

        if !(winner_delta >= 0.0 && loser_delta >= 0.0) {
            return Err(RatingError::InvariantViolation {
                winner: pairing.winner.to_string(),
                loser: pairing.loser.to_string(),
                winner_delta,
                loser_delta,
            }
            .into());
        }

        if let (Standing::Known(entry), Some(id)) =
            (winner_standing, pairing.winner.competitor_id())
        {
            table.insert(
                id,
                RatingEntry::new(entry.rating + winner_delta, entry.experience + 1),
            );
        }
        if let (Standing::Known(entry), Some(id)) = (loser_standing, pairing.loser.competitor_id())
        {
            table.insert(
                id,
                RatingEntry::new(entry.rating - loser_delta, entry.experience + 1),
            );
        }

        debug!(
            "Round {}: {} over {} (+{:.3} / -{:.3})",
            round, pairing.winner, pairing.loser, winner_delta, loser_delta
        );

        Ok(PairingChange {
            winner: pairing.winner.clone(),
            loser: pairing.loser.clone(),
            winner_delta,
            loser_delta,
        })
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn apply_round(
        &self,
        pairings: &[Pairing<Entrant>],
        table: &RatingTable,
        performance: &PerformanceTable,
        round: usize,
    ) -> crate::error::Result<RoundOutcome> {
        if round == 0 {
            return Err(RatingError::InvalidRound {
                round,
                reason: "rounds are numbered from 1".to_string(),
            }
            .into());
        }

        let mut working = table.clone();
        let mut changes = Vec::with_capacity(pairings.len());
        for pairing in pairings {
            changes.push(self.apply_pairing(pairing, &mut working, performance, round)?);
        }

        Ok(RoundOutcome {
            table: working,
            changes,
        })
    }

    fn initial_rating(&self) -> f64 {
        self.config.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }

    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()> {
        let new_config: RatingConfig = serde_json::from_value(config).map_err(|e| {
            RatingError::ConfigurationError {
                message: format!("Invalid rating configuration: {}", e),
            }
        })?;

        new_config.validate()?;
        self.config = new_config;
        Ok(())
    }
}
