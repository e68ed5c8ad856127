//! # Unique-Build Synergy Bonus
//!
//! Scores a crafting build by how many elements it uses and whether it
//! combines a known set of element types.
//!
//! ```text
//! base       = count * 0.5                 (duplicates count)
//! synergy    = max bonus over known rules that are subsets of the distinct types
//! uniqueness = ln(count + 1) * 0.3         (duplicates count)
//! total      = round2((base + synergy) * (1 + uniqueness))
//! ```
//!
//! Deterministic: no random draws.

use std::collections::BTreeSet;

use crate::config::{SynergyRule, UniqueBuildConfig};
use crate::fair_reward::round2;

/// The elements used in one build: the raw count plus the distinct types.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementCombination {
    count: usize,
    distinct: BTreeSet<String>,
}

impl ElementCombination {
    /// Collects element tags, duplicates allowed.
    #[must_use]
    pub fn new<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut combination = Self::default();
        for element in elements {
            combination.count += 1;
            combination.distinct.insert(element.as_ref().to_string());
        }
        combination
    }

    /// Number of elements used, duplicates included.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Distinct element types present.
    #[must_use]
    pub fn distinct(&self) -> &BTreeSet<String> {
        &self.distinct
    }

    /// Whether every element of `rule` is present.
    #[must_use]
    pub fn satisfies(&self, rule: &SynergyRule) -> bool {
        rule.elements.iter().all(|e| self.distinct.contains(e))
    }

    /// Best matching synergy bonus, or `0.0` when no rule matches.
    #[must_use]
    pub fn synergy_bonus(&self, rules: &[SynergyRule]) -> f64 {
        rules
            .iter()
            .filter(|rule| self.satisfies(rule))
            .map(|rule| rule.bonus)
            .fold(0.0, f64::max)
    }
}

/// Scores an element combination.
#[must_use]
pub fn unique_build_bonus(config: &UniqueBuildConfig, combination: &ElementCombination) -> f64 {
    if combination.count() == 0 {
        return 0.0;
    }

    let count = combination.count() as f64;
    let base_bonus = count * config.per_element_bonus;
    let synergy_bonus = combination.synergy_bonus(&config.synergies);
    let uniqueness = (count + 1.0).ln() * config.uniqueness_scale;

    round2((base_bonus + synergy_bonus) * (1.0 + uniqueness))
}

/// Scores a list of element tags.
#[must_use]
pub fn unique_build_bonus_for<S: AsRef<str>>(config: &UniqueBuildConfig, elements: &[S]) -> f64 {
    unique_build_bonus(config, &ElementCombination::new(elements))
}
