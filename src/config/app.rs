//! Main application configuration
//!
//! This module defines the primary configuration structures for tab-rating,
//! including TOML and environment variable loading and validation.

use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub tournament: TournamentSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Where the tournament data lives and how it is laid out
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentSettings {
    /// Number of rated rounds
    pub rounds: usize,
    /// Directory holding the speaker tab and per-round exports
    pub data_dir: PathBuf,
    /// Speaker tab file name inside `data_dir`
    pub speaker_tab_file: String,
    /// Ratings file read before the run and overwritten after it
    pub ratings_file: PathBuf,
    /// Directory for timestamped copies of the result
    pub archive_dir: Option<PathBuf>,
    /// Team rank exports carry an institution column before the rank
    pub ranks_include_institution: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "tab-rating".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            rounds: 5,
            data_dir: PathBuf::from("tournament_files"),
            speaker_tab_file: "speakers.csv".to_string(),
            ratings_file: PathBuf::from("elo.csv"),
            archive_dir: None,
            ranks_include_institution: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still override it
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Rating settings
        if let Ok(rating) = env::var("INITIAL_RATING") {
            self.rating.initial_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid INITIAL_RATING value: {}", rating))?;
        }
        if let Ok(base_k) = env::var("BASE_K_FACTOR") {
            self.rating.base_k = base_k
                .parse()
                .map_err(|_| anyhow!("Invalid BASE_K_FACTOR value: {}", base_k))?;
        }

        // Tournament settings
        if let Ok(rounds) = env::var("TOURNAMENT_ROUNDS") {
            self.tournament.rounds = rounds
                .parse()
                .map_err(|_| anyhow!("Invalid TOURNAMENT_ROUNDS value: {}", rounds))?;
        }
        if let Ok(dir) = env::var("TOURNAMENT_DATA_DIR") {
            self.tournament.data_dir = PathBuf::from(dir);
        }
        if let Ok(file) = env::var("SPEAKER_TAB_FILE") {
            self.tournament.speaker_tab_file = file;
        }
        if let Ok(file) = env::var("RATINGS_FILE") {
            self.tournament.ratings_file = PathBuf::from(file);
        }
        if let Ok(dir) = env::var("ARCHIVE_DIR") {
            self.tournament.archive_dir = Some(PathBuf::from(dir));
        }
        if let Ok(flag) = env::var("RANKS_INCLUDE_INSTITUTION") {
            self.tournament.ranks_include_institution = flag
                .parse()
                .map_err(|_| anyhow!("Invalid RANKS_INCLUDE_INSTITUTION value: {}", flag))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    config.rating.validate()?;

    // Validate tournament settings
    if config.tournament.rounds == 0 {
        return Err(anyhow!("Tournament must have at least one round"));
    }
    if config.tournament.speaker_tab_file.is_empty() {
        return Err(anyhow!("Speaker tab file name cannot be empty"));
    }
    if config.tournament.ratings_file.as_os_str().is_empty() {
        return Err(anyhow!("Ratings file path cannot be empty"));
    }

    Ok(())
}
