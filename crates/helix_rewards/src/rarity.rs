//! # Tiers
//!
//! Rarity tiers and reward kinds.
//!
//! Callers hand us names straight from request payloads. Parsing is
//! therefore fallible (`Option`), and every lookup table in
//! [`crate::config`] has a default arm for `None`. An unrecognised name can
//! never abort a reward computation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rarity tier for NPCs, items and loot entries.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Rarity {
    /// Common (default tier).
    #[default]
    Common = 0,
    /// Uncommon.
    Uncommon = 1,
    /// Rare - first tier affected by luck.
    Rare = 2,
    /// Epic.
    Epic = 3,
    /// Legendary.
    Legendary = 4,
}

impl Rarity {
    /// All tiers, lowest first.
    pub const ALL: [Self; 5] = [
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::Epic,
        Self::Legendary,
    ];

    /// Parses a tier name. Names are matched exactly (`"rare"`, not `"Rare"`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "common" => Some(Self::Common),
            "uncommon" => Some(Self::Uncommon),
            "rare" => Some(Self::Rare),
            "epic" => Some(Self::Epic),
            "legendary" => Some(Self::Legendary),
            _ => None,
        }
    }

    /// Canonical lowercase name.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }

    /// Whether player luck boosts entries of this tier (rare and above).
    #[inline]
    #[must_use]
    pub const fn is_luck_affected(self) -> bool {
        matches!(self, Self::Rare | Self::Epic | Self::Legendary)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of reward an NPC interaction pays out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardType {
    /// In-game currency.
    Coins,
    /// Crafting tools.
    Tools,
    /// Base crafting elements.
    Elements,
    /// Research information.
    Information,
    /// Special research files.
    SpecialFiles,
    /// Collectible tokens.
    Nft,
    /// Humanitarian aid packages.
    Aid,
}

impl RewardType {
    /// All reward kinds.
    pub const ALL: [Self; 7] = [
        Self::Coins,
        Self::Tools,
        Self::Elements,
        Self::Information,
        Self::SpecialFiles,
        Self::Nft,
        Self::Aid,
    ];

    /// Parses a reward kind name, matched exactly.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "coins" => Some(Self::Coins),
            "tools" => Some(Self::Tools),
            "elements" => Some(Self::Elements),
            "information" => Some(Self::Information),
            "special_files" => Some(Self::SpecialFiles),
            "nft" => Some(Self::Nft),
            "aid" => Some(Self::Aid),
            _ => None,
        }
    }

    /// Canonical snake_case name.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Coins => "coins",
            Self::Tools => "tools",
            Self::Elements => "elements",
            Self::Information => "information",
            Self::SpecialFiles => "special_files",
            Self::Nft => "nft",
            Self::Aid => "aid",
        }
    }
}

impl fmt::Display for RewardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
