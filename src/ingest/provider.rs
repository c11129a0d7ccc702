//! Round data source trait and implementations
//!
//! The round driver pulls its inputs through [`RoundSource`], so ratings can
//! be computed from exported files or from data assembled in memory.

use crate::error::{RatingError, Result};
use crate::ingest::tabbycat::{parse_debates, parse_speaker_tab, parse_team_ranks, SpeakerTab};
use crate::types::{RankedGroup, TeamRanks};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Matches and results of one round
#[derive(Debug, Clone, Default)]
pub struct RoundData {
    pub groups: Vec<RankedGroup>,
    pub ranks: TeamRanks,
}

/// Trait for supplying tournament data to the round driver
pub trait RoundSource {
    /// Roster and speaker results for the whole tournament
    fn speaker_tab(&self) -> Result<SpeakerTab>;

    /// Matches and team ranks of a 1-based round
    fn round(&self, round: usize) -> Result<RoundData>;
}

/// Reads exports saved into one directory:
/// the speaker tab plus `teams_ranks_round_{n}.csv` and
/// `teams_debates_round_{n}.csv` for every round
#[derive(Debug, Clone)]
pub struct TabDirectorySource {
    dir: PathBuf,
    speaker_tab_file: String,
    rounds: usize,
    ranks_include_institution: bool,
}

impl TabDirectorySource {
    pub fn new(
        dir: impl Into<PathBuf>,
        speaker_tab_file: impl Into<String>,
        rounds: usize,
        ranks_include_institution: bool,
    ) -> Self {
        Self {
            dir: dir.into(),
            speaker_tab_file: speaker_tab_file.into(),
            rounds,
            ranks_include_institution,
        }
    }

    pub fn ranks_path(&self, round: usize) -> PathBuf {
        self.dir.join(format!("teams_ranks_round_{}.csv", round))
    }

    pub fn debates_path(&self, round: usize) -> PathBuf {
        self.dir.join(format!("teams_debates_round_{}.csv", round))
    }

    fn read(path: &Path) -> Result<String> {
        debug!("Reading {}", path.display());
        let text = fs::read_to_string(path).map_err(|e| RatingError::Storage {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Ok(text)
    }
}

impl RoundSource for TabDirectorySource {
    fn speaker_tab(&self) -> Result<SpeakerTab> {
        let path = self.dir.join(&self.speaker_tab_file);
        let text = Self::read(&path)?;
        parse_speaker_tab(&text, self.rounds, &path.display().to_string())
    }

    fn round(&self, round: usize) -> Result<RoundData> {
        let ranks_path = self.ranks_path(round);
        let ranks = parse_team_ranks(
            &Self::read(&ranks_path)?,
            self.ranks_include_institution,
            &ranks_path.display().to_string(),
        )?;

        let debates_path = self.debates_path(round);
        let groups = parse_debates(
            &Self::read(&debates_path)?,
            &debates_path.display().to_string(),
        )?;

        Ok(RoundData { groups, ranks })
    }
}
