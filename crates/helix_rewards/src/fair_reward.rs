//! # Fair Reward Calculator
//!
//! **Level- and rarity-scaled rewards with bounded variance**
//!
//! ```text
//! reward = base_value[type] * rarity_multiplier[rarity] * variance * (1 + level_bonus)
//!
//! variance    ~ U[0.8, 1.2]                      (one draw per call)
//! level_bonus = ln(max(level, 1) + 1) * 0.5      (concave: diminishing returns)
//! ```
//!
//! The result is rounded to two decimals. The function is total: levels
//! below 1 behave as level 1, and unknown tiers or kinds use the fallback
//! values from [`RewardConfig`]. An unvalidated variance range never panics;
//! see [`VarianceRange::sample`](crate::config::VarianceRange::sample).

use rand::Rng;

use crate::config::RewardConfig;
use crate::rarity::{Rarity, RewardType};

/// Rounds to two decimal places.
#[inline]
#[must_use]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The deterministic part of the level bonus, `ln(max(level, 1) + 1) * scale`.
#[inline]
#[must_use]
pub fn level_bonus(config: &RewardConfig, player_level: i64) -> f64 {
    let effective_level = player_level.max(1) as f64;
    (effective_level + 1.0).ln() * config.level_bonus_scale
}

/// Reward before variance and rounding.
///
/// Multiply by the variance range bounds to get the
/// extremes [`fair_reward`] can return.
#[must_use]
pub fn expected_reward(
    config: &RewardConfig,
    player_level: i64,
    rarity: Option<Rarity>,
    reward_type: Option<RewardType>,
) -> f64 {
    config.base_value(reward_type)
        * config.rarity_multiplier(rarity)
        * (1.0 + level_bonus(config, player_level))
}

/// Computes a fair reward amount. Consumes exactly one draw from `rng`.
#[must_use]
pub fn fair_reward<R: Rng + ?Sized>(
    config: &RewardConfig,
    rng: &mut R,
    player_level: i64,
    rarity: Option<Rarity>,
    reward_type: Option<RewardType>,
) -> f64 {
    let variance = config.variance.sample(rng);
    round2(expected_reward(config, player_level, rarity, reward_type) * variance)
}

/// Computes a fair reward from raw tier and kind names.
///
/// Unrecognised names degrade to the fallback multiplier and base value.
#[must_use]
pub fn fair_reward_by_name<R: Rng + ?Sized>(
    config: &RewardConfig,
    rng: &mut R,
    player_level: i64,
    rarity: &str,
    reward_type: &str,
) -> f64 {
    let parsed_rarity = Rarity::from_name(rarity);
    if parsed_rarity.is_none() {
        tracing::debug!("Unknown rarity '{}', using fallback multiplier", rarity);
    }
    let parsed_type = RewardType::from_name(reward_type);
    if parsed_type.is_none() {
        tracing::debug!("Unknown reward type '{}', using fallback base value", reward_type);
    }

    fair_reward(config, rng, player_level, parsed_rarity, parsed_type)
}
