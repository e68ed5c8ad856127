//! # Reward Engine
//!
//! Binds a validated [`RewardConfig`] to an explicit random source.
//!
//! ## Thread Safety
//!
//! The engine never touches global random state. Two ways to use it from
//! many request workers:
//!
//! ```text
//! RewardEngine        one per worker, &mut self, no locking
//!   ├─ workers(n)     n engines on independent ChaCha streams of one seed
//!   └─ fork()         child engine seeded from the parent's stream
//!
//! SharedRewardEngine  one per process behind an Arc, &self,
//!                     generator advanced under a parking_lot::Mutex
//! ```
//!
//! All engines derived from one another share the config through an `Arc`.

use parking_lot::Mutex;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

use crate::config::RewardConfig;
use crate::error::RewardOutcome;
use crate::fair_reward::{fair_reward, fair_reward_by_name};
use crate::loot::{select_weighted, LootEntry, LootTable, RewardResult};
use crate::rarity::{Rarity, RewardType};
use crate::research::ResearchContribution;
use crate::synergy::unique_build_bonus_for;

/// Reward engine owning its random generator.
///
/// Not `Clone`: a copy would replay the same draws. Use
/// [`RewardEngine::fork`] or [`RewardEngine::workers`] for another engine.
#[derive(Debug)]
pub struct RewardEngine<R = ChaCha8Rng> {
    config: Arc<RewardConfig>,
    rng: R,
}

impl RewardEngine<ChaCha8Rng> {
    /// Creates an engine seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RewardError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: RewardConfig) -> RewardOutcome<Self> {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Creates a deterministic engine. Same seed, same sequence of rewards.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RewardError::InvalidConfig`] if `config` fails validation.
    pub fn seeded(config: RewardConfig, seed: u64) -> RewardOutcome<Self> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates `count` engines on distinct ChaCha streams of one seed.
    ///
    /// Worker `i` always reproduces the same sequence for a given seed, and no
    /// two workers share a sequence.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RewardError::InvalidConfig`] if `config` fails validation.
    pub fn workers(config: RewardConfig, seed: u64, count: usize) -> RewardOutcome<Vec<Self>> {
        config.validate()?;
        let config = Arc::new(config);

        Ok((0..count as u64)
            .map(|stream| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(stream);
                Self {
                    config: Arc::clone(&config),
                    rng,
                }
            })
            .collect())
    }
}

impl Default for RewardEngine<ChaCha8Rng> {
    fn default() -> Self {
        Self {
            config: Arc::new(RewardConfig::default()),
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl<R: Rng> RewardEngine<R> {
    /// Creates an engine around a caller-supplied generator.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RewardError::InvalidConfig`] if `config` fails validation.
    pub fn with_rng(config: RewardConfig, rng: R) -> RewardOutcome<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            rng,
        })
    }

    /// Balance configuration in use.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    /// Fair reward from raw tier and kind names. Unknown names use fallbacks.
    pub fn calculate_fair_reward(
        &mut self,
        player_level: i64,
        rarity: &str,
        reward_type: &str,
    ) -> f64 {
        fair_reward_by_name(&self.config, &mut self.rng, player_level, rarity, reward_type)
    }

    /// Fair reward from parsed tiers; `None` uses fallbacks.
    pub fn fair_reward(
        &mut self,
        player_level: i64,
        rarity: Option<Rarity>,
        reward_type: Option<RewardType>,
    ) -> f64 {
        fair_reward(&self.config, &mut self.rng, player_level, rarity, reward_type)
    }

    /// Luck-adjusted weighted pick over `entries`. `Ok(None)` only when empty.
    ///
    /// # Errors
    ///
    /// See [`select_weighted`].
    pub fn select_weighted_reward(
        &mut self,
        entries: &[LootEntry],
        player_luck: f64,
    ) -> RewardOutcome<Option<RewardResult>> {
        select_weighted(&self.config, &mut self.rng, entries, player_luck)
    }

    /// Rolls once on a table.
    ///
    /// # Errors
    ///
    /// See [`select_weighted`].
    pub fn roll_table(
        &mut self,
        table: &LootTable,
        player_luck: f64,
    ) -> RewardOutcome<Option<RewardResult>> {
        table.roll(&self.config, &mut self.rng, player_luck)
    }

    /// Unique-build bonus for element tags. Makes no random draw.
    #[must_use]
    pub fn calculate_unique_build_bonus<S: AsRef<str>>(&self, elements_used: &[S]) -> f64 {
        unique_build_bonus_for(&self.config.unique_build, elements_used)
    }

    /// Research contribution with its unique-build bonus.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RewardError::InvalidContribution`] for a negative or
    /// non-finite base.
    pub fn research_contribution<S: AsRef<str>>(
        &self,
        base_contribution: f64,
        elements_used: &[S],
    ) -> RewardOutcome<ResearchContribution> {
        ResearchContribution::compute(&self.config.unique_build, base_contribution, elements_used)
    }
}

impl<R: Rng + SeedableRng> RewardEngine<R> {
    /// Spawns a child engine seeded from this engine's next draw.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        let rng = R::seed_from_u64(self.rng.next_u64());
        Self {
            config: Arc::clone(&self.config),
            rng,
        }
    }
}

/// Reward engine usable through `&self` from many threads.
///
/// Every draw locks the generator, so concurrent callers observe one
/// interleaved sequence and never a repeated one. Hot paths that roll many
/// times per request should take a [`SharedRewardEngine::worker`] instead.
#[derive(Debug)]
pub struct SharedRewardEngine {
    config: Arc<RewardConfig>,
    rng: Mutex<ChaCha8Rng>,
}

impl SharedRewardEngine {
    /// Creates a shared engine seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RewardError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: RewardConfig) -> RewardOutcome<Self> {
        Self::from_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Creates a deterministic shared engine.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RewardError::InvalidConfig`] if `config` fails validation.
    pub fn seeded(config: RewardConfig, seed: u64) -> RewardOutcome<Self> {
        Self::from_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(config: RewardConfig, rng: ChaCha8Rng) -> RewardOutcome<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            rng: Mutex::new(rng),
        })
    }

    /// Balance configuration in use.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    /// Fair reward from raw tier and kind names.
    pub fn calculate_fair_reward(&self, player_level: i64, rarity: &str, reward_type: &str) -> f64 {
        let mut rng = self.rng.lock();
        fair_reward_by_name(&self.config, &mut *rng, player_level, rarity, reward_type)
    }

    /// Fair reward from parsed tiers.
    pub fn fair_reward(
        &self,
        player_level: i64,
        rarity: Option<Rarity>,
        reward_type: Option<RewardType>,
    ) -> f64 {
        let mut rng = self.rng.lock();
        fair_reward(&self.config, &mut *rng, player_level, rarity, reward_type)
    }

    /// Luck-adjusted weighted pick. The roll and the amount draw happen under one lock.
    ///
    /// # Errors
    ///
    /// See [`select_weighted`].
    pub fn select_weighted_reward(
        &self,
        entries: &[LootEntry],
        player_luck: f64,
    ) -> RewardOutcome<Option<RewardResult>> {
        let mut rng = self.rng.lock();
        select_weighted(&self.config, &mut *rng, entries, player_luck)
    }

    /// Rolls once on a table.
    ///
    /// # Errors
    ///
    /// See [`select_weighted`].
    pub fn roll_table(
        &self,
        table: &LootTable,
        player_luck: f64,
    ) -> RewardOutcome<Option<RewardResult>> {
        let mut rng = self.rng.lock();
        table.roll(&self.config, &mut *rng, player_luck)
    }

    /// Unique-build bonus. Does not lock: no random draw is involved.
    #[must_use]
    pub fn calculate_unique_build_bonus<S: AsRef<str>>(&self, elements_used: &[S]) -> f64 {
        unique_build_bonus_for(&self.config.unique_build, elements_used)
    }

    /// Takes a private engine for one worker thread, seeded from the shared stream.
    #[must_use]
    pub fn worker(&self) -> RewardEngine<ChaCha8Rng> {
        let seed = self.rng.lock().next_u64();
        RewardEngine {
            config: Arc::clone(&self.config),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}
