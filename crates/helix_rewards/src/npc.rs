//! # NPC Interaction Rewards
//!
//! An NPC pays out according to its role and rarity. The role doubles as
//! the reward kind (`"coins"`, `"aid"`, ...). Roles that are not reward
//! kinds, such as a merchant's `"trade"`, still pay, at the fallback base
//! value.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::RewardEngine;

/// Reward-giving side of an NPC.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcRewarder {
    /// Display name.
    pub name: String,
    /// Role, used as the reward kind.
    pub role: String,
    /// Rarity tier name.
    #[serde(default = "default_rarity")]
    pub rarity: String,
}

fn default_rarity() -> String {
    "common".to_string()
}

/// What a player receives from one interaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NpcReward {
    /// Reward kind, echoed from the NPC role.
    #[serde(rename = "type")]
    pub reward_type: String,
    /// Fair reward amount.
    pub amount: f64,
}

impl NpcRewarder {
    /// Creates a common NPC.
    #[must_use]
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            rarity: default_rarity(),
        }
    }

    /// Sets the rarity tier name.
    #[must_use]
    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = rarity.into();
        self
    }

    /// Rewards a player for interacting with this NPC.
    pub fn interact<R: Rng>(&self, engine: &mut RewardEngine<R>, player_level: i64) -> NpcReward {
        let amount = engine.calculate_fair_reward(player_level, &self.rarity, &self.role);
        tracing::debug!(
            "NPC '{}' ({} {}) paid {:.2} to a level {} player",
            self.name,
            self.rarity,
            self.role,
            amount,
            player_level
        );

        NpcReward {
            reward_type: self.role.clone(),
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RewardConfig;

    #[test]
    fn test_interaction_pays_role() {
        let mut engine = RewardEngine::seeded(RewardConfig::default(), 17).unwrap();
        let npc = NpcRewarder::new("Reward Giver", "coins");

        let reward = npc.interact(&mut engine, 5);
        assert_eq!(reward.reward_type, "coins");
        assert!(reward.amount > 0.0);
    }

    #[test]
    fn test_non_reward_role_still_pays() {
        let mut engine = RewardEngine::seeded(RewardConfig::default(), 17).unwrap();
        let merchant = NpcRewarder::new("Merchant", "trade").with_rarity("rare");

        let reward = merchant.interact(&mut engine, 1);
        assert_eq!(reward.reward_type, "trade");
        assert!(reward.amount > 0.0);
    }

    #[test]
    fn test_rarer_npcs_pay_more_on_average() {
        let mut engine = RewardEngine::seeded(RewardConfig::default(), 23).unwrap();
        let common = NpcRewarder::new("Helper", "aid");
        let legendary = NpcRewarder::new("Sage", "aid").with_rarity("legendary");

        let mut total = |npc: &NpcRewarder| -> f64 {
            (0..100).map(|_| npc.interact(&mut engine, 10).amount).sum()
        };
        let common_total = total(&common);
        let legendary_total = total(&legendary);
        assert!(legendary_total > common_total);
    }
}
