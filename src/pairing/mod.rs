//! Turning ranked matches into pairwise outcomes
//!
//! Team ranks are first expanded into every implied team-over-team win,
//! then each team win is spread over the individual competitors involved.

pub mod ranks;
pub mod roster;

// Re-export commonly used functions
pub use ranks::{team_pairings, team_pairings_for_round};
pub use roster::{expand_pairing, expand_pairings};
