//! Configuration management for tab-rating
//!
//! This module handles configuration loading from TOML files or environment
//! variables, validation, and default values.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings, TournamentSettings};
pub use rating::{ExperienceTier, RatingConfig};
