//! Integration test: character progression rules
//!
//! Leveling, equipment unlocks, the experience multiplier and hit points,
//! exercised through the public library API.

use times_table_quest::character::{load_progress, save_progress, xp_for_next_level};
use times_table_quest::core::constants::{MAX_LEVEL, PROGRESS_KEY};
use times_table_quest::{Character, KeyValueStore, MemoryStore, EQUIPMENT_TABLE};

// =============================================================================
// Leveling and unlocks
// =============================================================================

#[test]
fn test_every_unlock_happens_once_in_order_with_small_gains() {
    let mut character = Character::new();
    let mut seen = Vec::new();

    while character.level() < MAX_LEVEL {
        let gain = character.add_experience(20);
        seen.extend(gain.unlocked.iter().map(|e| e.unlock_level));
    }

    assert_eq!(seen, (2..=10).collect::<Vec<_>>());
}

#[test]
fn test_single_huge_gain_unlocks_everything_in_order() {
    let mut character = Character::new();
    let gain = character.add_experience(1_000_000);

    let levels: Vec<u32> = gain.unlocked.iter().map(|e| e.unlock_level).collect();
    assert_eq!(levels, (2..=10).collect::<Vec<_>>());
    assert_eq!(character.level(), 10);
    assert_eq!(gain.levels_gained, 9);
}

#[test]
fn test_equipment_always_matches_level() {
    let mut character = Character::new();
    for _ in 0..300 {
        character.add_experience(37);
        let expected: Vec<u32> = EQUIPMENT_TABLE
            .iter()
            .filter(|e| e.unlock_level <= character.level())
            .map(|e| e.unlock_level)
            .collect();
        let actual: Vec<u32> = character.equipment().iter().map(|e| e.unlock_level).collect();
        assert_eq!(actual, expected);
    }
}

#[test]
fn test_experience_stays_below_threshold_until_level_ten() {
    let mut character = Character::new();
    for _ in 0..500 {
        character.add_experience(20);
        if character.level() < MAX_LEVEL {
            assert!(character.experience() < character.experience_to_next_level());
        }
        assert!(character.level() <= MAX_LEVEL);
    }
}

#[test]
fn test_residual_experience_retained_at_cap() {
    let mut character = Character::new();
    character.add_experience(4500); // exactly enough for level 10
    assert_eq!(character.level(), 10);
    assert_eq!(character.experience(), 0);

    let gain = character.add_experience(2000);
    assert!(gain.unlocked.is_empty());
    assert_eq!(character.level(), 10);
    assert_eq!(character.experience(), gain.actual_experience);
    assert!(character.is_at_max_progression());
}

#[test]
fn test_threshold_grows_with_level() {
    assert_eq!(xp_for_next_level(1), 100);
    assert_eq!(xp_for_next_level(5), 500);
    assert_eq!(xp_for_next_level(10), 1000);
}

// =============================================================================
// Multiplier
// =============================================================================

#[test]
fn test_multiplier_is_one_without_equipment() {
    assert_eq!(Character::new().compute_experience_multiplier(), 1.0);
}

#[test]
fn test_multiplier_never_decreases_as_levels_rise() {
    let mut character = Character::new();
    let mut last = character.compute_experience_multiplier();
    while character.level() < MAX_LEVEL {
        character.add_experience(50);
        let current = character.compute_experience_multiplier();
        assert!(current >= last);
        last = current;
    }
}

#[test]
fn test_gain_is_floored_after_multiplier() {
    // Level 2: x1.10, so 15 base becomes 16.5 and floors to 16
    let mut character = Character::restore(2, 0, 100);
    let gain = character.add_experience(15);
    assert_eq!(gain.actual_experience, 16);
}

// =============================================================================
// Hit points
// =============================================================================

#[test]
fn test_seven_hits_of_fifteen_defeat_from_full() {
    let mut character = Character::new();
    let results: Vec<bool> = (0..7).map(|_| character.take_damage(15)).collect();
    assert_eq!(results, vec![false, false, false, false, false, false, true]);
    assert_eq!(character.current_hit_points(), 0);
    assert!(character.is_defeated());
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_progress_survives_store_roundtrip() {
    let mut store = MemoryStore::new();
    let mut character = Character::new();
    character.add_experience(777);
    character.take_damage(45);
    save_progress(&mut store, &character).unwrap();

    assert_eq!(load_progress(&store), character);
}

#[test]
fn test_garbage_progress_falls_back_to_defaults() {
    for raw in [
        "",
        "null",
        "[]",
        "{\"level\":\"three\"}",
        "{\"level\":11}",
        "{\"level\":2,\"experience\":5000,\"currentHitPoints\":100}",
    ] {
        let mut store = MemoryStore::new();
        store.set(PROGRESS_KEY, raw.to_string()).unwrap();
        assert_eq!(load_progress(&store), Character::new(), "input {:?}", raw);
    }
}
