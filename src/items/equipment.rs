//! Cosmetic equipment unlocked by leveling up.
//!
//! The unlock schedule is a fixed table keyed by level. Every level from 2
//! through 10 unlocks exactly one piece, and each piece adds a flat
//! percentage to the character's experience multiplier.

use std::fmt;

/// Body slot a piece of equipment is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotType {
    Weapon,
    Helmet,
    Armor,
    Shield,
    Cape,
    Crown,
}

impl SlotType {
    pub fn name(&self) -> &'static str {
        match self {
            SlotType::Weapon => "Weapon",
            SlotType::Helmet => "Helmet",
            SlotType::Armor => "Armor",
            SlotType::Shield => "Shield",
            SlotType::Cape => "Cape",
            SlotType::Crown => "Crown",
        }
    }
}

/// One entry of the unlock table.
#[derive(Debug, PartialEq, Eq)]
pub struct Equipment {
    /// Level at which this piece is unlocked (2-10)
    pub unlock_level: u32,
    pub name: &'static str,
    pub icon: &'static str,
    pub slot: SlotType,
    /// Renderer hint, e.g. "iron-sword"
    pub visual_style: &'static str,
    /// Experience bonus in whole percent (10 = +10%)
    pub bonus_percent: u32,
}

impl Equipment {
    /// Experience bonus as a fraction (0.10 - 0.30).
    pub fn experience_bonus(&self) -> f64 {
        self.bonus_percent as f64 / 100.0
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon, self.name)
    }
}

/// Unlock schedule, ascending by level. Bonuses never decrease.
pub static EQUIPMENT_TABLE: [Equipment; 9] = [
    Equipment {
        unlock_level: 2,
        name: "Wooden Sword",
        icon: "🗡️",
        slot: SlotType::Weapon,
        visual_style: "wooden-sword",
        bonus_percent: 10,
    },
    Equipment {
        unlock_level: 3,
        name: "Leather Hat",
        icon: "🎩",
        slot: SlotType::Helmet,
        visual_style: "leather-hat",
        bonus_percent: 10,
    },
    Equipment {
        unlock_level: 4,
        name: "Cloth Tunic",
        icon: "👕",
        slot: SlotType::Armor,
        visual_style: "cloth-armor",
        bonus_percent: 10,
    },
    Equipment {
        unlock_level: 5,
        name: "Iron Sword",
        icon: "⚔️",
        slot: SlotType::Weapon,
        visual_style: "iron-sword",
        bonus_percent: 15,
    },
    Equipment {
        unlock_level: 6,
        name: "Wooden Shield",
        icon: "🛡️",
        slot: SlotType::Shield,
        visual_style: "wooden-shield",
        bonus_percent: 15,
    },
    Equipment {
        unlock_level: 7,
        name: "Iron Helmet",
        icon: "🪖",
        slot: SlotType::Helmet,
        visual_style: "iron-helmet",
        bonus_percent: 20,
    },
    Equipment {
        unlock_level: 8,
        name: "Chain Mail",
        icon: "🧥",
        slot: SlotType::Armor,
        visual_style: "chain-armor",
        bonus_percent: 20,
    },
    Equipment {
        unlock_level: 9,
        name: "Magic Cape",
        icon: "🌟",
        slot: SlotType::Cape,
        visual_style: "magic-cape",
        bonus_percent: 25,
    },
    Equipment {
        unlock_level: 10,
        name: "Royal Crown",
        icon: "👑",
        slot: SlotType::Crown,
        visual_style: "king-crown",
        bonus_percent: 30,
    },
];

/// The piece unlocked on reaching `level`, if any.
pub fn equipment_for_level(level: u32) -> Option<&'static Equipment> {
    EQUIPMENT_TABLE.iter().find(|e| e.unlock_level == level)
}

/// Every piece a character of `level` owns, in unlock order.
pub fn unlocked_through(level: u32) -> impl Iterator<Item = &'static Equipment> {
    EQUIPMENT_TABLE
        .iter()
        .filter(move |e| e.unlock_level <= level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_levels_two_through_ten() {
        let levels: Vec<u32> = EQUIPMENT_TABLE.iter().map(|e| e.unlock_level).collect();
        assert_eq!(levels, (2..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_bonuses_are_monotonic_and_in_range() {
        for pair in EQUIPMENT_TABLE.windows(2) {
            assert!(pair[0].bonus_percent <= pair[1].bonus_percent);
        }
        for e in EQUIPMENT_TABLE.iter() {
            assert!((0.10..=0.30).contains(&e.experience_bonus()), "{}", e.name);
        }
    }

    #[test]
    fn test_equipment_for_level() {
        assert!(equipment_for_level(1).is_none());
        assert_eq!(equipment_for_level(2).unwrap().name, "Wooden Sword");
        assert_eq!(equipment_for_level(10).unwrap().slot, SlotType::Crown);
        assert!(equipment_for_level(11).is_none());
    }

    #[test]
    fn test_unlocked_through() {
        assert_eq!(unlocked_through(1).count(), 0);
        assert_eq!(unlocked_through(5).count(), 4);
        let last = unlocked_through(10).last().unwrap();
        assert_eq!(last.unlock_level, 10);
    }

    #[test]
    fn test_display_includes_icon_and_name() {
        let sword = equipment_for_level(5).unwrap();
        assert_eq!(sword.to_string(), "⚔️ Iron Sword");
    }

    #[test]
    fn test_slot_names_for_dialogs() {
        assert_eq!(equipment_for_level(2).unwrap().slot.name(), "Weapon");
        assert_eq!(equipment_for_level(6).unwrap().slot.name(), "Shield");
        assert_eq!(equipment_for_level(9).unwrap().slot.name(), "Cape");
    }
}
