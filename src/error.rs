//! Error types for the rating engine
//!
//! Typed failures are raised as `RatingError` and carried through
//! `anyhow::Result`, so callers can `downcast_ref` when they need to tell
//! an input problem from a computation fault.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// What kind of record an unknown identity was looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Team,
    Competitor,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Team => write!(f, "team"),
            EntityKind::Competitor => write!(f, "competitor"),
        }
    }
}

/// Custom error types for rating computation and its inputs
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("Unknown {kind}: {name} has no rank or roster entry")]
    UnknownEntity { kind: EntityKind, name: String },

    #[error("Invalid ranked group: {reason}")]
    InvalidRankedGroup { reason: String },

    #[error(
        "Negative rating delta for {winner} over {loser}: winner={winner_delta} loser={loser_delta}"
    )]
    InvariantViolation {
        winner: String,
        loser: String,
        winner_delta: f64,
        loser_delta: f64,
    },

    #[error("Invalid round {round}: {reason}")]
    InvalidRound { round: usize, reason: String },

    #[error("Parse error in {source_name} line {line}: {reason}")]
    Parse {
        source_name: String,
        line: usize,
        reason: String,
    },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
