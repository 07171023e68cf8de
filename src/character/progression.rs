//! Character progression: experience, leveling, hit points and unlocks.

use crate::core::constants::{MAX_HIT_POINTS, MAX_LEVEL, XP_PER_LEVEL_STEP};
use crate::items::equipment::{equipment_for_level, unlocked_through, Equipment};

/// Experience needed to clear `level`.
pub fn xp_for_next_level(level: u32) -> u64 {
    level as u64 * XP_PER_LEVEL_STEP
}

/// Outcome of one `add_experience` call.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceGain {
    /// Equipment unlocked by this call, in unlock order
    pub unlocked: Vec<&'static Equipment>,
    /// Experience actually credited after the multiplier
    pub actual_experience: u64,
    /// Multiplier in effect before this call's unlocks
    pub multiplier: f64,
    pub levels_gained: u32,
}

impl ExperienceGain {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// The player character.
///
/// Equipment is never stored independently of level: the unlocked set is
/// always exactly the table entries at or below the current level.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    level: u32,
    experience: u64,
    current_hit_points: u32,
    equipment: Vec<&'static Equipment>,
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

impl Character {
    pub fn new() -> Self {
        Self {
            level: 1,
            experience: 0,
            current_hit_points: MAX_HIT_POINTS,
            equipment: Vec::new(),
        }
    }

    /// Rebuilds a character from saved values, clamping anything out of range.
    ///
    /// Below level 10, experience stays under the current threshold. At
    /// level 10 any amount is kept so a finished run still reads as won.
    pub fn restore(level: u32, experience: u64, current_hit_points: u32) -> Self {
        let level = level.clamp(1, MAX_LEVEL);
        let experience = if level < MAX_LEVEL {
            experience.min(xp_for_next_level(level) - 1)
        } else {
            experience
        };
        Self {
            level,
            experience,
            current_hit_points: current_hit_points.min(MAX_HIT_POINTS),
            equipment: unlocked_through(level).collect(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u64 {
        self.experience
    }

    pub fn experience_to_next_level(&self) -> u64 {
        xp_for_next_level(self.level)
    }

    pub fn max_hit_points(&self) -> u32 {
        MAX_HIT_POINTS
    }

    pub fn current_hit_points(&self) -> u32 {
        self.current_hit_points
    }

    pub fn equipment(&self) -> &[&'static Equipment] {
        &self.equipment
    }

    pub fn is_defeated(&self) -> bool {
        self.current_hit_points == 0
    }

    fn bonus_percent(&self) -> u64 {
        self.equipment.iter().map(|e| e.bonus_percent as u64).sum()
    }

    /// 1.0 plus the bonus of every unlocked piece.
    pub fn compute_experience_multiplier(&self) -> f64 {
        (100 + self.bonus_percent()) as f64 / 100.0
    }

    /// Credits `base_amount` scaled by the current multiplier, then levels up
    /// as many times as the banked experience allows (stopping at level 10).
    ///
    /// The multiplier is taken before any unlock from this call applies.
    /// Integer percent math keeps e.g. 20 * 1.10 at exactly 22.
    pub fn add_experience(&mut self, base_amount: u64) -> ExperienceGain {
        let multiplier = self.compute_experience_multiplier();
        let actual_experience = base_amount * (100 + self.bonus_percent()) / 100;
        self.experience += actual_experience;

        let mut unlocked = Vec::new();
        let mut levels_gained = 0;

        while self.experience >= self.experience_to_next_level() && self.level < MAX_LEVEL {
            self.experience -= self.experience_to_next_level();
            self.level += 1;
            levels_gained += 1;

            if let Some(item) = equipment_for_level(self.level) {
                self.equipment.push(item);
                unlocked.push(item);
            }
        }

        ExperienceGain {
            unlocked,
            actual_experience,
            multiplier,
            levels_gained,
        }
    }

    /// True once level 10's threshold has been banked, not merely reached.
    pub fn is_at_max_progression(&self) -> bool {
        self.level >= MAX_LEVEL && self.experience >= self.experience_to_next_level()
    }

    /// Returns true if this brought hit points to zero.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.current_hit_points = self.current_hit_points.saturating_sub(amount);
        self.current_hit_points == 0
    }

    pub fn heal(&mut self, amount: u32) {
        self.current_hit_points = self
            .current_hit_points
            .saturating_add(amount)
            .min(MAX_HIT_POINTS);
    }

    pub fn reset_hit_points(&mut self) {
        self.current_hit_points = MAX_HIT_POINTS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_character_defaults() {
        let c = Character::new();
        assert_eq!(c.level(), 1);
        assert_eq!(c.experience(), 0);
        assert_eq!(c.current_hit_points(), 100);
        assert!(c.equipment().is_empty());
        assert_eq!(c.experience_to_next_level(), 100);
    }

    #[test]
    fn test_add_experience_below_threshold() {
        let mut c = Character::new();
        let gain = c.add_experience(20);
        assert_eq!(c.experience(), 20);
        assert_eq!(c.level(), 1);
        assert!(gain.unlocked.is_empty());
        assert_eq!(gain.actual_experience, 20);
        assert_eq!(gain.multiplier, 1.0);
    }

    #[test]
    fn test_five_correct_answers_reach_level_two() {
        let mut c = Character::new();
        for _ in 0..4 {
            assert!(c.add_experience(20).unlocked.is_empty());
        }
        let gain = c.add_experience(20);
        assert_eq!(c.level(), 2);
        assert_eq!(c.experience(), 0);
        assert_eq!(gain.unlocked.len(), 1);
        assert_eq!(gain.unlocked[0].unlock_level, 2);
    }

    #[test]
    fn test_multiplier_applies_only_to_later_calls() {
        let mut c = Character::new();
        let first = c.add_experience(100);
        assert_eq!(first.multiplier, 1.0);
        assert_eq!(first.actual_experience, 100);

        let second = c.add_experience(20);
        assert!((second.multiplier - 1.1).abs() < 1e-9);
        assert_eq!(second.actual_experience, 22);
        assert_eq!(c.experience(), 22);
    }

    #[test]
    fn test_large_gain_crosses_growing_thresholds() {
        let mut c = Character::new();
        let gain = c.add_experience(350);
        // 350 - 100 (L1) - 200 (L2) = 50 left, short of L3's 300
        assert_eq!(c.level(), 3);
        assert_eq!(c.experience(), 50);
        let levels: Vec<u32> = gain.unlocked.iter().map(|e| e.unlock_level).collect();
        assert_eq!(levels, vec![2, 3]);
        assert_eq!(gain.levels_gained, 2);
    }

    #[test]
    fn test_level_caps_at_ten_and_keeps_residual() {
        let mut c = Character::new();
        c.add_experience(100_000);
        assert_eq!(c.level(), 10);
        // Thresholds for levels 1..9 sum to 4500
        assert_eq!(c.experience(), 100_000 - 4500);
        assert_eq!(c.equipment().len(), 9);

        let before = c.experience();
        let gain = c.add_experience(10);
        assert!(gain.unlocked.is_empty());
        assert_eq!(c.level(), 10);
        assert_eq!(c.experience(), before + gain.actual_experience);
    }

    #[test]
    fn test_max_progression_needs_banked_threshold() {
        let mut c = Character::restore(10, 0, 100);
        assert!(!c.is_at_max_progression());
        c.add_experience(999);
        assert!(c.experience() >= 1000);
        assert!(c.is_at_max_progression());
    }

    #[test]
    fn test_multiplier_with_full_equipment() {
        let c = Character::restore(10, 0, 100);
        assert!((c.compute_experience_multiplier() - 2.55).abs() < 1e-9);
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut c = Character::new();
        for _ in 0..6 {
            assert!(!c.take_damage(15));
        }
        assert_eq!(c.current_hit_points(), 10);
        assert!(c.take_damage(15));
        assert_eq!(c.current_hit_points(), 0);
        assert!(c.take_damage(15));
        assert_eq!(c.current_hit_points(), 0);
    }

    #[test]
    fn test_heal_and_reset_hit_points() {
        let mut c = Character::new();
        c.take_damage(50);
        c.heal(20);
        assert_eq!(c.current_hit_points(), 70);
        c.heal(500);
        assert_eq!(c.current_hit_points(), 100);
        c.take_damage(100);
        c.reset_hit_points();
        assert_eq!(c.current_hit_points(), 100);
    }

    #[test]
    fn test_restore_clamps_and_rebuilds_equipment() {
        let c = Character::restore(42, 10, 500);
        assert_eq!(c.level(), 10);
        assert_eq!(c.current_hit_points(), 100);
        assert_eq!(c.equipment().len(), 9);

        let c = Character::restore(0, 0, 30);
        assert_eq!(c.level(), 1);
        assert!(c.equipment().is_empty());
    }

    #[test]
    fn test_restore_keeps_experience_below_threshold() {
        let c = Character::restore(2, 5_000, 100);
        assert_eq!(c.level(), 2);
        assert_eq!(c.experience(), 199);
        assert!(c.experience() < c.experience_to_next_level());

        let c = Character::restore(10, 5_000, 100);
        assert_eq!(c.experience(), 5_000);
        assert!(c.is_at_max_progression());
    }

    #[test]
    fn test_reset_clears_progress() {
        let mut c = Character::new();
        c.add_experience(1000);
        c.take_damage(40);
        c.reset();
        assert_eq!(c, Character::new());
    }
}
