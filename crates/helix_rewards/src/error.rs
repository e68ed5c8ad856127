//! # Reward Error Types
//!
//! All errors that can occur in the reward engine.
//!
//! Unknown rarity or reward-type names are **not** errors, and neither is an
//! empty loot table. Both degrade to documented defaults.

use thiserror::Error;

/// Errors that can occur in the reward engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RewardError {
    /// A loot entry failed validation.
    #[error("invalid loot entry '{item}': {reason}")]
    InvalidLootEntry {
        /// The item identifier of the offending entry.
        item: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The luck-adjusted weights of a table do not sum to a finite number.
    #[error("loot table weights overflow: adjusted total is {0}")]
    WeightOverflow(f64),

    /// A research contribution amount was negative or not finite.
    #[error("invalid research contribution: {0}")]
    InvalidContribution(f64),

    /// Invalid balance configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The balance file could not be read.
    #[error("cannot read configuration '{path}': {message}")]
    ConfigIo {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O error message.
        message: String,
    },
}

impl RewardError {
    /// Shorthand for an [`RewardError::InvalidLootEntry`].
    pub(crate) fn invalid_entry(item: &str, reason: impl Into<String>) -> Self {
        Self::InvalidLootEntry {
            item: item.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for reward operations.
///
/// Named `RewardOutcome` because [`crate::RewardResult`] is the loot roll value type.
pub type RewardOutcome<T> = Result<T, RewardError>;
