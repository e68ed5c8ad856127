//! # Helix Reward Engine
//!
//! Fair rewards, weighted loot rolls and unique-build bonuses for the Helix
//! game backend.
//!
//! ## Design Principles
//!
//! 1. **Total over inputs** - unknown tiers and kinds degrade to defaults, never error
//! 2. **Bounded randomness** - ±20% variance on rewards, luck capped at 2× on rare+ weights
//! 3. **Injected randomness** - every draw goes through an engine-owned generator
//! 4. **External configuration** - all balance data in TOML files
//!
//! ## Thread Safety
//!
//! Give each worker its own [`RewardEngine`] (see [`RewardEngine::workers`]),
//! or share one [`SharedRewardEngine`] behind an `Arc`.
//!
//! ## Example
//!
//! ```rust
//! use helix_rewards::{LootEntry, Rarity, RewardConfig, RewardEngine};
//!
//! let mut engine = RewardEngine::seeded(RewardConfig::default(), 42)?;
//!
//! let coins = engine.calculate_fair_reward(5, "rare", "coins");
//! assert!(coins > 0.0);
//!
//! let entries = vec![
//!     LootEntry::new("scrap", 90.0)?.with_amounts(1, 5)?,
//!     LootEntry::new("relic", 10.0)?.with_rarity(Rarity::Legendary),
//! ];
//! let drop = engine.select_weighted_reward(&entries, 1.5)?;
//! assert!(drop.is_some());
//!
//! let bonus = engine.calculate_unique_build_bonus(&["organic", "catalyst"]);
//! assert!(bonus > 0.0);
//! # Ok::<(), helix_rewards::RewardError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod engine;
pub mod error;
pub mod fair_reward;
pub mod loot;
pub mod npc;
pub mod rarity;
pub mod research;
pub mod synergy;

pub use config::{RewardConfig, SynergyRule, UniqueBuildConfig};
pub use engine::{RewardEngine, SharedRewardEngine};
pub use error::{RewardError, RewardOutcome};
pub use loot::{LootEntry, LootTable, RewardResult, DEFAULT_PLAYER_LUCK};
pub use npc::{NpcReward, NpcRewarder};
pub use rarity::{Rarity, RewardType};
pub use research::ResearchContribution;
pub use synergy::ElementCombination;
