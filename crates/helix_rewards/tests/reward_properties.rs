//! # Reward Engine Verification Tests
//!
//! Statistical and property checks for the three reward operations:
//!
//! 1. **Fair rewards**: monotonic in level and rarity, bounded variance
//! 2. **Loot rolls**: weights respected, luck helps rare tiers but is capped
//! 3. **Build bonus**: synergy ordering, deterministic
//!
//! Run with: cargo test -p helix_rewards --test reward_properties

use helix_rewards::{
    LootEntry, LootTable, Rarity, RewardConfig, RewardEngine, DEFAULT_PLAYER_LUCK,
};
use proptest::prelude::*;

const ELEMENTS: [&str; 6] = [
    "organic",
    "catalyst",
    "biological",
    "synthetic",
    "energy",
    "compound",
];

fn engine(seed: u64) -> RewardEngine {
    RewardEngine::seeded(RewardConfig::default(), seed).unwrap()
}

fn rare_count(engine: &mut RewardEngine, entries: &[LootEntry], luck: f64, rolls: u32) -> u32 {
    (0..rolls)
        .filter(|_| {
            engine
                .select_weighted_reward(entries, luck)
                .unwrap()
                .unwrap()
                .item
                == "rare"
        })
        .count() as u32
}

// ============================================================================
// FAIR REWARD
// ============================================================================

#[test]
fn verify_fair_reward_scales_with_level() {
    let mut engine = engine(1);
    let low: f64 = (0..100).map(|_| engine.calculate_fair_reward(1, "common", "coins")).sum();
    let high: f64 = (0..100).map(|_| engine.calculate_fair_reward(10, "common", "coins")).sum();
    assert!(high > low, "level 10 sum {high} should exceed level 1 sum {low}");
}

#[test]
fn verify_fair_reward_scales_with_rarity() {
    let mut engine = engine(2);
    let common: f64 = (0..100).map(|_| engine.calculate_fair_reward(5, "common", "coins")).sum();
    let legendary: f64 = (0..100)
        .map(|_| engine.calculate_fair_reward(5, "legendary", "coins"))
        .sum();
    assert!(legendary > common);
}

#[test]
fn verify_fair_reward_bounded() {
    let mut engine = engine(3);
    for _ in 0..1000 {
        let reward = engine.calculate_fair_reward(5, "common", "coins");
        assert!(reward > 0.0);
        assert!(reward < 100.0);
    }
}

#[test]
fn verify_rarity_tiers_strictly_ordered_in_expectation() {
    let mut engine = engine(4);
    let means: Vec<f64> = Rarity::ALL
        .iter()
        .map(|r| {
            let total: f64 = (0..500)
                .map(|_| engine.calculate_fair_reward(20, r.name(), "elements"))
                .sum();
            total / 500.0
        })
        .collect();

    for pair in means.windows(2) {
        assert!(pair[1] > pair[0], "tier means not increasing: {means:?}");
    }
}

// ============================================================================
// WEIGHTED LOOT
// ============================================================================

#[test]
fn verify_weighted_selection_respects_weights() {
    let mut engine = engine(5);
    let entries = [
        LootEntry::new("common", 90.0).unwrap(),
        LootEntry::new("rare", 10.0).unwrap().with_rarity(Rarity::Rare),
    ];

    let rare = rare_count(&mut engine, &entries, DEFAULT_PLAYER_LUCK, 1000);
    let common = 1000 - rare;
    assert!(common > rare * 5, "common={common} rare={rare}");
}

#[test]
fn verify_luck_increases_rare_but_is_capped() {
    let entries = [
        LootEntry::new("common", 50.0).unwrap(),
        LootEntry::new("rare", 50.0).unwrap().with_rarity(Rarity::Rare),
    ];

    // Independent engines so the three samples are independent
    let normal = rare_count(&mut engine(10), &entries, 1.0, 1000);
    let lucky = rare_count(&mut engine(11), &entries, 2.0, 1000);
    let very_lucky = rare_count(&mut engine(12), &entries, 10.0, 1000);

    // Expected: 500 at luck 1.0, 667 at the cap. Binomial sd ~15.
    assert!(lucky > normal, "lucky={lucky} normal={normal}");
    assert!(very_lucky > normal, "very_lucky={very_lucky} normal={normal}");
    assert!(
        lucky.abs_diff(very_lucky) < 75,
        "capped luck should be indistinguishable: {lucky} vs {very_lucky}"
    );
    assert!((600..=730).contains(&very_lucky), "very_lucky={very_lucky}");
}

#[test]
fn verify_empty_entries_yield_none() {
    let mut engine = engine(6);
    assert_eq!(engine.select_weighted_reward(&[], DEFAULT_PLAYER_LUCK), Ok(None));
    assert_eq!(engine.select_weighted_reward(&[], 5.0), Ok(None));
}

#[test]
fn verify_amount_within_bounds() {
    let mut engine = engine(7);
    let entries = [LootEntry::new("ore", 1.0).unwrap().with_amounts(1, 5).unwrap()];
    for _ in 0..1000 {
        let result = engine.select_weighted_reward(&entries, 1.0).unwrap().unwrap();
        assert!((1..=5).contains(&result.amount));
    }
}

#[test]
fn verify_single_entry_table_roll() {
    let mut engine = engine(8);
    let table = LootTable::new(
        "Roll Test",
        vec![LootEntry::new("test_item", 100.0)
            .unwrap()
            .with_amounts(1, 5)
            .unwrap()],
    )
    .unwrap();

    for _ in 0..200 {
        let result = engine.roll_table(&table, 1.0).unwrap().unwrap();
        assert_eq!(result.item, "test_item");
        assert_eq!(result.rarity, Rarity::Common.name());
        assert!((1..=5).contains(&result.amount));
    }
}

// ============================================================================
// UNIQUE BUILD BONUS
// ============================================================================

#[test]
fn verify_synergy_ordering() {
    let engine = engine(9);
    let single = engine.calculate_unique_build_bonus(&["organic"]);
    let pair = engine.calculate_unique_build_bonus(&["organic", "catalyst"]);
    let triple = engine.calculate_unique_build_bonus(&["organic", "biological", "catalyst"]);

    assert!(single < pair && pair < triple, "{single} {pair} {triple}");
    assert_eq!(engine.calculate_unique_build_bonus::<&str>(&[]), 0.0);
}

// ============================================================================
// PROPERTIES
// ============================================================================

fn rarity_strategy() -> impl Strategy<Value = Rarity> {
    prop::sample::select(Rarity::ALL.to_vec())
}

fn entry_strategy() -> impl Strategy<Value = LootEntry> {
    (0.01f64..1000.0, rarity_strategy(), 0u32..20, 0u32..20).prop_map(|(weight, rarity, a, b)| {
        LootEntry::new("item", weight)
            .unwrap()
            .with_rarity(rarity)
            .with_amounts(a.min(b), a.max(b))
            .unwrap()
    })
}

proptest! {
    #[test]
    fn prop_fair_reward_positive_and_banded(
        level in -1000i64..10_000,
        rarity in "[a-z_]{0,12}",
        kind in "[a-z_]{0,14}",
        seed in any::<u64>(),
    ) {
        let mut engine = engine(seed);
        let reward = engine.calculate_fair_reward(level, &rarity, &kind);
        prop_assert!(reward.is_finite());
        prop_assert!(reward > 0.0);

        let parsed_rarity = Rarity::from_name(&rarity);
        let parsed_kind = helix_rewards::RewardType::from_name(&kind);
        let expected = helix_rewards::fair_reward::expected_reward(
            engine.config(), level, parsed_rarity, parsed_kind,
        );
        prop_assert!(reward >= expected * 0.8 - 0.005 - 1e-9);
        prop_assert!(reward <= expected * 1.2 + 0.005 + 1e-9);
    }

    #[test]
    fn prop_levels_at_or_below_one_match_level_one(level in i64::MIN..=1, seed in any::<u64>()) {
        let a = engine(seed).calculate_fair_reward(level, "epic", "tools");
        let b = engine(seed).calculate_fair_reward(1, "epic", "tools");
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_selection_never_none_and_amount_in_bounds(
        entries in prop::collection::vec(entry_strategy(), 1..12),
        luck in 0.1f64..50.0,
        seed in any::<u64>(),
    ) {
        let mut engine = engine(seed);
        let result = engine.select_weighted_reward(&entries, luck).unwrap();
        prop_assert!(result.is_some());
        let result = result.unwrap();

        let lo = entries.iter().map(|e| e.min_amount).min().unwrap();
        let hi = entries.iter().map(|e| e.max_amount).max().unwrap();
        prop_assert!(result.amount >= lo && result.amount <= hi);
        prop_assert!(entries.iter().any(|e|
            e.rarity == result.rarity && (e.min_amount..=e.max_amount).contains(&result.amount)
        ));
    }

    #[test]
    fn prop_luck_adjustment_capped(weight in 0.01f64..1000.0, luck in 0.0f64..1000.0) {
        let rare = LootEntry::new("r", weight).unwrap().with_rarity(Rarity::Rare);
        let common = LootEntry::new("c", weight).unwrap();

        let adjusted = rare.adjusted_weight(luck, 2.0);
        prop_assert!(adjusted >= weight);
        prop_assert!(adjusted <= weight * 2.0);
        prop_assert_eq!(common.adjusted_weight(luck, 2.0), weight);
    }

    #[test]
    fn prop_build_bonus_deterministic_and_non_negative(
        elements in prop::collection::vec(
            prop::sample::select(ELEMENTS.iter().copied().chain(["inorganic"]).collect::<Vec<_>>()),
            0..10,
        ),
    ) {
        let a = engine(1).calculate_unique_build_bonus(&elements);
        let b = engine(2).calculate_unique_build_bonus(&elements);
        prop_assert_eq!(a, b);
        prop_assert!(a >= 0.0);
        prop_assert_eq!(a == 0.0, elements.is_empty());
    }

    #[test]
    fn prop_adding_an_element_never_lowers_bonus(
        elements in prop::collection::vec(
            prop::sample::select(ELEMENTS.to_vec()),
            0..8,
        ),
        extra in prop::sample::select(ELEMENTS.to_vec()),
    ) {
        let engine = engine(1);
        let before = engine.calculate_unique_build_bonus(&elements);
        let mut more = elements.clone();
        more.push(extra);
        prop_assert!(engine.calculate_unique_build_bonus(&more) >= before);
    }
}
