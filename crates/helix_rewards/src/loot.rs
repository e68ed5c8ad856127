//! # Weighted Loot Selection
//!
//! **Cumulative-weight picks with capped luck**
//!
//! ## Luck
//!
//! Player luck only touches rare-tier entries (rare, epic, legendary), and
//! only when it exceeds `1.0`:
//!
//! ```text
//! adjusted_weight = weight * min(luck, max_luck_multiplier)   if rare+ and luck > 1.0
//!                 = weight                                    otherwise
//! ```
//!
//! With the default cap of `2.0`, no amount of luck makes a rare entry more
//! than twice as likely relative to its nominal weight. A cap that is not a
//! finite number counts as `1.0`, and a cap below `1.0` is raised to it.
//!
//! An entry's rarity is a tier name. Names outside the known tiers are kept
//! as written and carried onto the result, but never luck-adjusted.
//!
//! ## Selection
//!
//! `roll ~ U[0, adjusted_total)`. Walk the entries in order and pick the
//! first whose cumulative adjusted weight reaches `roll`. Each entry is
//! picked with probability `adjusted_weight / adjusted_total`. A roll that
//! outruns the walk through floating-point drift is clamped to the last
//! entry, so a non-empty table always produces a result.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::RewardConfig;
use crate::error::{RewardError, RewardOutcome};
use crate::rarity::Rarity;

/// Luck value that leaves all weights untouched.
pub const DEFAULT_PLAYER_LUCK: f64 = 1.0;

const fn one() -> u32 {
    1
}

fn common() -> String {
    Rarity::Common.name().to_string()
}

/// Luck cap as applied to weights: finite and at least `1.0`.
fn effective_luck_cap(max_luck_multiplier: f64) -> f64 {
    if max_luck_multiplier.is_finite() {
        max_luck_multiplier.max(1.0)
    } else {
        1.0
    }
}

/// A candidate reward with a selection weight and an amount range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LootEntry {
    /// Item identifier. Need not be unique within a table.
    pub item: String,
    /// Optional item category.
    #[serde(default)]
    pub item_type: Option<String>,
    /// Selection weight (must be finite and > 0).
    pub weight: f64,
    /// Rarity tier name; known rare+ tiers are luck-adjusted.
    #[serde(default = "common")]
    pub rarity: String,
    /// Minimum amount awarded.
    #[serde(default = "one")]
    pub min_amount: u32,
    /// Maximum amount awarded (inclusive).
    #[serde(default = "one")]
    pub max_amount: u32,
}

impl LootEntry {
    /// Creates a common entry awarding exactly one unit.
    ///
    /// # Errors
    ///
    /// Returns [`RewardError::InvalidLootEntry`] if `weight` is not a finite
    /// number greater than zero.
    pub fn new(item: impl Into<String>, weight: f64) -> RewardOutcome<Self> {
        let entry = Self {
            item: item.into(),
            item_type: None,
            weight,
            rarity: common(),
            min_amount: 1,
            max_amount: 1,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Sets the rarity tier.
    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity.name().to_string();
        self
    }

    /// Sets a rarity by name. Unknown names are kept and never luck-adjusted.
    #[must_use]
    pub fn with_rarity_name(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = rarity.into();
        self
    }

    /// The known tier named by `rarity`, if any.
    #[inline]
    #[must_use]
    pub fn tier(&self) -> Option<Rarity> {
        Rarity::from_name(&self.rarity)
    }

    /// Sets the item category.
    #[must_use]
    pub fn with_item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    /// Sets the inclusive amount range.
    ///
    /// # Errors
    ///
    /// Returns [`RewardError::InvalidLootEntry`] if `min_amount > max_amount`.
    pub fn with_amounts(mut self, min_amount: u32, max_amount: u32) -> RewardOutcome<Self> {
        self.min_amount = min_amount;
        self.max_amount = max_amount;
        self.validate()?;
        Ok(self)
    }

    /// Checks weight and amount bounds. Entries built through serde skip the
    /// constructor, so tables validate them on load.
    ///
    /// # Errors
    ///
    /// Returns [`RewardError::InvalidLootEntry`] describing the violation.
    pub fn validate(&self) -> RewardOutcome<()> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(RewardError::invalid_entry(
                &self.item,
                format!("weight must be a finite number > 0, got {}", self.weight),
            ));
        }
        if self.min_amount > self.max_amount {
            return Err(RewardError::invalid_entry(
                &self.item,
                format!(
                    "min_amount ({}) exceeds max_amount ({})",
                    self.min_amount, self.max_amount
                ),
            ));
        }
        Ok(())
    }

    /// Weight after luck adjustment.
    #[inline]
    #[must_use]
    pub fn adjusted_weight(&self, player_luck: f64, max_luck_multiplier: f64) -> f64 {
        let luck_affected = self.tier().is_some_and(Rarity::is_luck_affected);
        if luck_affected && player_luck > 1.0 {
            self.weight * player_luck.min(effective_luck_cap(max_luck_multiplier))
        } else {
            self.weight
        }
    }

    fn roll_amount<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min_amount..=self.max_amount)
    }

    fn to_result(&self, amount: u32) -> RewardResult {
        RewardResult {
            item: self.item.clone(),
            item_type: self.item_type.clone(),
            rarity: self.rarity.clone(),
            amount,
        }
    }
}

/// Outcome of a single loot roll. A fresh value per roll; storing it is the caller's job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardResult {
    /// Item awarded.
    pub item: String,
    /// Item category, if the entry had one.
    pub item_type: Option<String>,
    /// Rarity name of the entry that was selected.
    pub rarity: String,
    /// Amount awarded, within the entry's bounds.
    pub amount: u32,
}

/// A named, validated loot table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LootTable {
    /// Display name.
    pub name: String,
    /// Candidate entries, in roll order.
    pub entries: Vec<LootEntry>,
}

impl LootTable {
    /// Builds a table, validating every entry.
    ///
    /// # Errors
    ///
    /// Returns the first entry's [`RewardError::InvalidLootEntry`].
    pub fn new(name: impl Into<String>, entries: Vec<LootEntry>) -> RewardOutcome<Self> {
        let table = Self {
            name: name.into(),
            entries,
        };
        table.validate()?;
        Ok(table)
    }

    /// Parses and validates a TOML table definition.
    ///
    /// ```toml
    /// name = "Cave Chest"
    ///
    /// [[entries]]
    /// item = "coins"
    /// weight = 50
    /// max_amount = 10
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`RewardError::InvalidConfig`] on a parse error, or the first
    /// invalid entry.
    pub fn from_toml_str(source: &str) -> RewardOutcome<Self> {
        let table: Self =
            toml::from_str(source).map_err(|e| RewardError::InvalidConfig(e.to_string()))?;
        table.validate()?;
        for entry in table.entries.iter().filter(|e| e.tier().is_none()) {
            tracing::debug!(
                "Loot table '{}': entry '{}' has unknown rarity '{}'; luck will not apply",
                table.name,
                entry.item,
                entry.rarity
            );
        }
        Ok(table)
    }

    /// Validates every entry.
    ///
    /// # Errors
    ///
    /// Returns the first entry's [`RewardError::InvalidLootEntry`].
    pub fn validate(&self) -> RewardOutcome<()> {
        self.entries.iter().try_for_each(LootEntry::validate)
    }

    /// Sum of nominal (unadjusted) weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Rolls once on this table.
    ///
    /// # Errors
    ///
    /// See [`select_weighted`].
    pub fn roll<R: Rng + ?Sized>(
        &self,
        config: &RewardConfig,
        rng: &mut R,
        player_luck: f64,
    ) -> RewardOutcome<Option<RewardResult>> {
        select_weighted(config, rng, &self.entries, player_luck)
    }
}

/// Selects one entry by luck-adjusted weight and rolls its amount.
///
/// Returns `Ok(None)` only for an empty slice. Consumes two draws from
/// `rng` (roll, then amount) when an entry is selected.
///
/// # Errors
///
/// Returns [`RewardError::InvalidLootEntry`] if any entry is malformed, or
/// [`RewardError::WeightOverflow`] if the adjusted weights sum to infinity.
pub fn select_weighted<R: Rng + ?Sized>(
    config: &RewardConfig,
    rng: &mut R,
    entries: &[LootEntry],
    player_luck: f64,
) -> RewardOutcome<Option<RewardResult>> {
    let Some(last_index) = entries.len().checked_sub(1) else {
        return Ok(None);
    };

    for entry in entries {
        entry.validate()?;
    }

    let cap = config.max_luck_multiplier;
    let adjusted_total: f64 = entries
        .iter()
        .map(|e| e.adjusted_weight(player_luck, cap))
        .sum();
    if !adjusted_total.is_finite() {
        return Err(RewardError::WeightOverflow(adjusted_total));
    }

    let roll = rng.gen_range(0.0..adjusted_total);
    let mut cumulative = 0.0;
    let index = entries
        .iter()
        .position(|e| {
            cumulative += e.adjusted_weight(player_luck, cap);
            cumulative >= roll
        })
        .unwrap_or_else(|| {
            // Summation order drift: the walk total landed just below the roll
            tracing::warn!(
                "Loot roll {} exceeded cumulative weight {}; clamped to last entry",
                roll,
                cumulative
            );
            last_index
        });

    let entry = &entries[index];
    let amount = entry.roll_amount(rng);
    tracing::debug!(
        "Loot roll {:.4}/{:.4} (luck {:.2}) selected '{}' x{}",
        roll,
        adjusted_total,
        player_luck,
        entry.item,
        amount
    );

    Ok(Some(entry.to_result(amount)))
}
