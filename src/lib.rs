//! Tab Rating - individual Elo ratings for four-team debate tournaments
//!
//! This crate turns per-match team placings into individual rating changes:
//! ranked matches become pairwise wins, team wins become competitor wins,
//! and an Elo engine with a dynamic K-factor and a speaker-score modifier
//! applies them round by round.

pub mod config;
pub mod error;
pub mod ingest;
pub mod pairing;
pub mod rating;
pub mod tournament;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use rating::{EloRatingCalculator, RatingCalculator, RatingTable};
pub use tournament::{Tournament, TournamentReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
