//! Reading tournament data exported from the tab system
//!
//! Parsing, name normalization and the round-by-round data source live here;
//! the rating engine only ever sees the structured records these produce.

pub mod names;
pub mod provider;
pub mod tabbycat;

// Re-export commonly used types
pub use names::normalize_name;
pub use provider::{RoundData, RoundSource, TabDirectorySource};
pub use tabbycat::{parse_debates, parse_speaker_tab, parse_team_ranks, SpeakerTab};
