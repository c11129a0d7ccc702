//! Rating system configuration

use crate::error::{RatingError, Result};
use serde::{Deserialize, Serialize};

/// Experience tier: competitors with fewer than `below` rated matches get
/// their K-factor scaled by `multiplier`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperienceTier {
    pub below: u32,
    pub multiplier: f64,
}

/// Parameters of the K-factor policy and the starting rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Rating given to competitors enrolled from the speaker tab
    pub initial_rating: f64,
    pub base_k: u32,
    pub high_rating_threshold: f64,
    pub high_rating_penalty: u32,
    pub mid_rating_threshold: f64,
    pub mid_rating_penalty: u32,
    /// Checked in order; the first tier that applies wins
    pub experience_tiers: Vec<ExperienceTier>,
    pub veteran_multiplier: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            initial_rating: 1000.0,
            base_k: 30,
            high_rating_threshold: 1500.0,
            high_rating_penalty: 10,
            mid_rating_threshold: 1250.0,
            mid_rating_penalty: 5,
            experience_tiers: vec![
                ExperienceTier {
                    below: 5,
                    multiplier: 3.0,
                },
                ExperienceTier {
                    below: 10,
                    multiplier: 2.0,
                },
                ExperienceTier {
                    below: 20,
                    multiplier: 1.5,
                },
            ],
            veteran_multiplier: 1.0,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.initial_rating.is_finite() {
            return Err(config_error("Initial rating must be finite"));
        }

        if self.high_rating_threshold <= self.mid_rating_threshold {
            return Err(config_error(
                "High rating threshold must be above the mid rating threshold",
            ));
        }

        if self.high_rating_penalty > self.base_k || self.mid_rating_penalty > self.base_k {
            return Err(config_error("Rating penalties cannot exceed the base K-factor"));
        }

        if self.high_rating_penalty < self.mid_rating_penalty {
            return Err(config_error(
                "High rating penalty must be at least the mid rating penalty",
            ));
        }

        if self
            .experience_tiers
            .windows(2)
            .any(|pair| pair[0].below >= pair[1].below || pair[0].multiplier < pair[1].multiplier)
        {
            return Err(config_error(
                "Experience tiers must be ascending with non-increasing multipliers",
            ));
        }

        if let Some(last) = self.experience_tiers.last() {
            if self.veteran_multiplier > last.multiplier {
                return Err(config_error(
                    "Veteran multiplier cannot exceed the last experience tier",
                ));
            }
        }

        let multipliers = self
            .experience_tiers
            .iter()
            .map(|tier| tier.multiplier)
            .chain(std::iter::once(self.veteran_multiplier));
        for multiplier in multipliers {
            if !(multiplier > 0.0 && multiplier.is_finite()) {
                return Err(config_error("K-factor multipliers must be positive"));
            }
        }

        Ok(())
    }
}

fn config_error(message: &str) -> anyhow::Error {
    RatingError::ConfigurationError {
        message: message.to_string(),
    }
    .into()
}
