//! Rating calculator trait and implementations
//!
//! This module defines the interface the round driver uses to turn one
//! round's individual pairings into the next rating table.

use crate::rating::performance::PerformanceTable;
use crate::rating::table::RatingTable;
use crate::types::{Entrant, Pairing};
use serde::{Deserialize, Serialize};

/// Rating movement produced by one individual pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingChange {
    pub winner: Entrant,
    pub loser: Entrant,
    /// Points added to the winner (zero when the winner is not rated)
    pub winner_delta: f64,
    /// Points removed from the loser (zero when the loser is not rated)
    pub loser_delta: f64,
}

/// Result of rating one round
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    /// Independent copy of the input table with this round applied
    pub table: RatingTable,
    /// One entry per input pairing, in input order
    pub changes: Vec<PairingChange>,
}

/// Trait for calculating rating changes after a round
pub trait RatingCalculator {
    /// Apply one round of individual pairings to a rating table
    ///
    /// # Arguments
    /// * `pairings` - (winner, loser) pairs in the order they must be applied
    /// * `table` - ratings before the round; never modified
    /// * `performance` - speaker results used for the performance modifier
    /// * `round` - 1-based round index
    fn apply_round(
        &self,
        pairings: &[Pairing<Entrant>],
        table: &RatingTable,
        performance: &PerformanceTable,
        round: usize,
    ) -> crate::error::Result<RoundOutcome>;

    /// Rating given to newly enrolled competitors
    fn initial_rating(&self) -> f64;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;

    /// Update configuration from JSON
    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()>;
}

/// Calculator that leaves every rating untouched, for validating inputs
#[derive(Debug, Clone)]
pub struct NoOpRatingCalculator {
    initial_rating: f64,
}

impl NoOpRatingCalculator {
    /// Create a new no-op rating calculator
    pub fn new(initial_rating: f64) -> Self {
        Self { initial_rating }
    }
}

impl Default for NoOpRatingCalculator {
    fn default() -> Self {
        Self::new(1000.0)
    }
}

impl RatingCalculator for NoOpRatingCalculator {
    fn apply_round(
        &self,
        pairings: &[Pairing<Entrant>],
        table: &RatingTable,
        _performance: &PerformanceTable,
        _round: usize,
    ) -> crate::error::Result<RoundOutcome> {
        let changes = pairings
            .iter()
            .map(|pairing| PairingChange {
                winner: pairing.winner.clone(),
                loser: pairing.loser.clone(),
                winner_delta: 0.0,
                loser_delta: 0.0,
            })
            .collect();

        Ok(RoundOutcome {
            table: table.clone(),
            changes,
        })
    }

    fn initial_rating(&self) -> f64 {
        self.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "no_op",
            "initial_rating": self.initial_rating,
        })
    }

    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()> {
        if let Some(rating) = config.get("initial_rating").and_then(|v| v.as_f64()) {
            self.initial_rating = rating;
        }
        Ok(())
    }
}
