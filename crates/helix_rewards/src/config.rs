//! # Balance Configuration
//!
//! Every tunable number in the reward engine lives here.
//!
//! `RewardConfig::default()` carries the shipped balance. A TOML balance
//! file may override any subset of keys; keys it omits keep their defaults.
//! Files are loaded once at startup and validated before use.
//!
//! ```toml
//! max_luck_multiplier = 2.0
//!
//! [rarity_multipliers]
//! legendary = 10.0
//!
//! [[unique_build.synergies]]
//! elements = ["organic", "catalyst"]
//! bonus = 2.0
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{RewardError, RewardOutcome};
use crate::rarity::{Rarity, RewardType};

/// Reward multiplier per rarity tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RarityMultipliers {
    /// Common tier.
    pub common: f64,
    /// Uncommon tier.
    pub uncommon: f64,
    /// Rare tier.
    pub rare: f64,
    /// Epic tier.
    pub epic: f64,
    /// Legendary tier.
    pub legendary: f64,
    /// Used for unrecognised tier names.
    pub fallback: f64,
}

impl Default for RarityMultipliers {
    fn default() -> Self {
        Self {
            common: 1.0,
            uncommon: 1.5,
            rare: 2.5,
            epic: 4.0,
            legendary: 7.5,
            fallback: 1.0,
        }
    }
}

impl RarityMultipliers {
    /// Multiplier for a tier; `None` takes the fallback arm.
    #[inline]
    #[must_use]
    pub fn get(&self, rarity: Option<Rarity>) -> f64 {
        match rarity {
            Some(Rarity::Common) => self.common,
            Some(Rarity::Uncommon) => self.uncommon,
            Some(Rarity::Rare) => self.rare,
            Some(Rarity::Epic) => self.epic,
            Some(Rarity::Legendary) => self.legendary,
            None => self.fallback,
        }
    }

    fn values(&self) -> [(&'static str, f64); 6] {
        [
            ("common", self.common),
            ("uncommon", self.uncommon),
            ("rare", self.rare),
            ("epic", self.epic),
            ("legendary", self.legendary),
            ("fallback", self.fallback),
        ]
    }
}

/// Base reward value per reward kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BaseValues {
    /// Coins.
    pub coins: f64,
    /// Tools.
    pub tools: f64,
    /// Elements.
    pub elements: f64,
    /// Information.
    pub information: f64,
    /// Special files.
    pub special_files: f64,
    /// NFTs.
    pub nft: f64,
    /// Aid.
    pub aid: f64,
    /// Used for unrecognised reward kinds.
    pub fallback: f64,
}

impl Default for BaseValues {
    fn default() -> Self {
        Self {
            coins: 10.0,
            tools: 1.0,
            elements: 3.0,
            information: 5.0,
            special_files: 2.0,
            nft: 0.1,
            aid: 15.0,
            fallback: 5.0,
        }
    }
}

impl BaseValues {
    /// Base value for a reward kind; `None` takes the fallback arm.
    #[inline]
    #[must_use]
    pub fn get(&self, reward_type: Option<RewardType>) -> f64 {
        match reward_type {
            Some(RewardType::Coins) => self.coins,
            Some(RewardType::Tools) => self.tools,
            Some(RewardType::Elements) => self.elements,
            Some(RewardType::Information) => self.information,
            Some(RewardType::SpecialFiles) => self.special_files,
            Some(RewardType::Nft) => self.nft,
            Some(RewardType::Aid) => self.aid,
            None => self.fallback,
        }
    }

    fn values(&self) -> [(&'static str, f64); 8] {
        [
            ("coins", self.coins),
            ("tools", self.tools),
            ("elements", self.elements),
            ("information", self.information),
            ("special_files", self.special_files),
            ("nft", self.nft),
            ("aid", self.aid),
            ("fallback", self.fallback),
        ]
    }
}

/// Inclusive range the per-call variance factor is drawn from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VarianceRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Default for VarianceRange {
    fn default() -> Self {
        Self { min: 0.8, max: 1.2 }
    }
}

impl VarianceRange {
    /// Draws one variance factor. Always consumes exactly one draw.
    ///
    /// Bounds given in the wrong order are swapped. A range whose bounds or
    /// width are not finite yields `1.0`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let (low, high) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        if low.is_finite() && high.is_finite() && (high - low).is_finite() {
            rng.gen_range(low..=high)
        } else {
            let _: f64 = rng.gen();
            1.0
        }
    }
}

/// A known element combination and the bonus it grants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynergyRule {
    /// Element types that must all be present.
    pub elements: Vec<String>,
    /// Bonus granted when they are.
    pub bonus: f64,
}

impl SynergyRule {
    /// Creates a rule from element names.
    #[must_use]
    pub fn new(elements: &[&str], bonus: f64) -> Self {
        Self {
            elements: elements.iter().map(|e| (*e).to_string()).collect(),
            bonus,
        }
    }
}

/// Unique-build scoring parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UniqueBuildConfig {
    /// Bonus per element used (duplicates count).
    pub per_element_bonus: f64,
    /// Scale of the `ln(count + 1)` uniqueness factor.
    pub uniqueness_scale: f64,
    /// Known combinations. The best matching rule wins; bonuses never stack.
    pub synergies: Vec<SynergyRule>,
}

impl Default for UniqueBuildConfig {
    fn default() -> Self {
        Self {
            per_element_bonus: 0.5,
            uniqueness_scale: 0.3,
            synergies: vec![
                SynergyRule::new(&["organic", "catalyst"], 2.0),
                SynergyRule::new(&["biological", "synthetic"], 3.0),
                SynergyRule::new(&["energy", "compound"], 2.5),
                SynergyRule::new(&["organic", "biological", "catalyst"], 5.0),
                SynergyRule::new(&["synthetic", "energy", "compound"], 4.0),
            ],
        }
    }
}

/// Complete balance configuration for the reward engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewardConfig {
    /// Rarity multipliers.
    pub rarity_multipliers: RarityMultipliers,
    /// Base values per reward kind.
    pub base_values: BaseValues,
    /// Variance range applied to every fair reward.
    pub variance: VarianceRange,
    /// Scale of the `ln(level + 1)` level bonus.
    pub level_bonus_scale: f64,
    /// Cap on how much luck can multiply a rare-tier weight.
    pub max_luck_multiplier: f64,
    /// Unique-build scoring.
    pub unique_build: UniqueBuildConfig,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            rarity_multipliers: RarityMultipliers::default(),
            base_values: BaseValues::default(),
            variance: VarianceRange::default(),
            level_bonus_scale: 0.5,
            max_luck_multiplier: 2.0,
            unique_build: UniqueBuildConfig::default(),
        }
    }
}

impl RewardConfig {
    /// Parses and validates a TOML balance document.
    ///
    /// # Errors
    ///
    /// Returns [`RewardError::InvalidConfig`] on a parse failure, on an
    /// unknown key, or when validation fails.
    pub fn from_toml_str(source: &str) -> RewardOutcome<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| RewardError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML balance file.
    ///
    /// # Errors
    ///
    /// Returns [`RewardError::ConfigIo`] if the file cannot be read, otherwise
    /// the same errors as [`RewardConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> RewardOutcome<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| RewardError::ConfigIo {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&source)?;

        tracing::info!(
            "Loaded reward balance from {} ({} synergy rules, luck cap {:.2})",
            path.display(),
            config.unique_build.synergies.len(),
            config.max_luck_multiplier
        );

        Ok(config)
    }

    /// Checks that every number is usable.
    ///
    /// # Errors
    ///
    /// Returns [`RewardError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> RewardOutcome<()> {
        for (name, value) in self.rarity_multipliers.values() {
            require_positive(&format!("rarity_multipliers.{name}"), value)?;
        }
        for (name, value) in self.base_values.values() {
            require_positive(&format!("base_values.{name}"), value)?;
        }

        require_positive("variance.min", self.variance.min)?;
        require_positive("variance.max", self.variance.max)?;
        if self.variance.min > self.variance.max {
            return Err(RewardError::InvalidConfig(format!(
                "variance.min ({}) exceeds variance.max ({})",
                self.variance.min, self.variance.max
            )));
        }

        require_non_negative("level_bonus_scale", self.level_bonus_scale)?;

        if !self.max_luck_multiplier.is_finite() || self.max_luck_multiplier < 1.0 {
            return Err(RewardError::InvalidConfig(format!(
                "max_luck_multiplier must be a finite number >= 1.0, got {}",
                self.max_luck_multiplier
            )));
        }

        let build = &self.unique_build;
        require_non_negative("unique_build.per_element_bonus", build.per_element_bonus)?;
        require_non_negative("unique_build.uniqueness_scale", build.uniqueness_scale)?;
        for (i, rule) in build.synergies.iter().enumerate() {
            if rule.elements.is_empty() {
                return Err(RewardError::InvalidConfig(format!(
                    "unique_build.synergies[{i}] lists no elements"
                )));
            }
            require_non_negative(&format!("unique_build.synergies[{i}].bonus"), rule.bonus)?;
        }

        Ok(())
    }

    /// Multiplier for a rarity tier (fallback for `None`).
    #[inline]
    #[must_use]
    pub fn rarity_multiplier(&self, rarity: Option<Rarity>) -> f64 {
        self.rarity_multipliers.get(rarity)
    }

    /// Base value for a reward kind (fallback for `None`).
    #[inline]
    #[must_use]
    pub fn base_value(&self, reward_type: Option<RewardType>) -> f64 {
        self.base_values.get(reward_type)
    }
}

fn require_positive(field: &str, value: f64) -> RewardOutcome<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RewardError::InvalidConfig(format!(
            "{field} must be a finite number > 0, got {value}"
        )))
    }
}

fn require_non_negative(field: &str, value: f64) -> RewardOutcome<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RewardError::InvalidConfig(format!(
            "{field} must be a finite number >= 0, got {value}"
        )))
    }
}
