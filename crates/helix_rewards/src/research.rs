//! # Research Contributions
//!
//! A player's contribution to disease research is their base contribution
//! plus the unique-build bonus for the elements they crafted with.

use serde::{Deserialize, Serialize};

use crate::config::UniqueBuildConfig;
use crate::error::{RewardError, RewardOutcome};
use crate::synergy::unique_build_bonus_for;

/// Breakdown of one research contribution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResearchContribution {
    /// Amount the player contributed directly.
    pub base_contribution: f64,
    /// Bonus from the elements used.
    pub unique_build_bonus: f64,
    /// `base_contribution + unique_build_bonus`.
    pub total_contribution: f64,
}

impl ResearchContribution {
    /// Computes a contribution.
    ///
    /// # Errors
    ///
    /// Returns [`RewardError::InvalidContribution`] if `base_contribution` is
    /// negative or not finite.
    pub fn compute<S: AsRef<str>>(
        config: &UniqueBuildConfig,
        base_contribution: f64,
        elements_used: &[S],
    ) -> RewardOutcome<Self> {
        if !base_contribution.is_finite() || base_contribution < 0.0 {
            return Err(RewardError::InvalidContribution(base_contribution));
        }

        let unique_build_bonus = unique_build_bonus_for(config, elements_used);
        Ok(Self {
            base_contribution,
            unique_build_bonus,
            total_contribution: base_contribution + unique_build_bonus,
        })
    }
}
