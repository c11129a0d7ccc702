//! Confidence-factor (K-factor) policy

use crate::config::RatingConfig;

/// K-factor for a competitor with the given rating and number of rated matches.
///
/// Higher ratings lower the base value, fewer matches scale it up. The scaled
/// value is truncated toward zero.
pub fn k_factor(config: &RatingConfig, rating: f64, experience: u32) -> u32 {
    let mut base = config.base_k;
    if rating > config.high_rating_threshold {
        base = base.saturating_sub(config.high_rating_penalty);
    } else if rating > config.mid_rating_threshold {
        base = base.saturating_sub(config.mid_rating_penalty);
    }

    let multiplier = config
        .experience_tiers
        .iter()
        .find(|tier| experience < tier.below)
        .map(|tier| tier.multiplier)
        .unwrap_or(config.veteran_multiplier);

    (base as f64 * multiplier) as u32
}
