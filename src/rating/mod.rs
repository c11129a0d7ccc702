//! Individual Elo ratings from team results
//!
//! This module provides the K-factor policy, the speaker performance
//! modifier, the rating table and the engine that applies a round to it.

pub mod calculator;
pub mod elo;
pub mod k_factor;
pub mod performance;
pub mod storage;
pub mod table;

// Re-export commonly used types
pub use calculator::{NoOpRatingCalculator, PairingChange, RatingCalculator, RoundOutcome};
pub use elo::EloRatingCalculator;
pub use k_factor::k_factor;
pub use performance::PerformanceTable;
pub use storage::{FileRatingStorage, InMemoryRatingStorage, RatingStorage};
pub use table::{RatingEntry, RatingTable, Standing};
