//! Saving and loading the character progress snapshot.

use super::progression::{xp_for_next_level, Character};
use crate::core::constants::{MAX_HIT_POINTS, MAX_LEVEL, PROGRESS_KEY};
use crate::utils::persistence::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::io;

/// Serialized form of a character, stored under `gameProgress`.
///
/// Missing fields fall back to new-character values. Equipment is written
/// for readers of the raw store but rebuilt from `level` on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub experience: u64,
    #[serde(default)]
    pub current_hit_points: u32,
    /// Unlock levels of owned equipment
    #[serde(default)]
    pub equipment: Vec<u32>,
}

impl From<&Character> for ProgressSnapshot {
    fn from(character: &Character) -> Self {
        Self {
            level: character.level(),
            experience: character.experience(),
            current_hit_points: character.current_hit_points(),
            equipment: character
                .equipment()
                .iter()
                .map(|e| e.unlock_level)
                .collect(),
        }
    }
}

impl ProgressSnapshot {
    /// Converts back to a character. Zero level or hit points mean "unset"
    /// and take their defaults. A level above the cap, or experience that
    /// should already have leveled up, is rejected.
    pub fn into_character(self) -> Option<Character> {
        if self.level > MAX_LEVEL {
            return None;
        }
        let level = if self.level == 0 { 1 } else { self.level };
        if level < MAX_LEVEL && self.experience >= xp_for_next_level(level) {
            return None;
        }
        let hit_points = if self.current_hit_points == 0 {
            MAX_HIT_POINTS
        } else {
            self.current_hit_points
        };
        Some(Character::restore(level, self.experience, hit_points))
    }
}

/// Loads the saved character, or a fresh one if nothing usable is stored.
pub fn load_progress(store: &dyn KeyValueStore) -> Character {
    let Some(raw) = store.get(PROGRESS_KEY) else {
        return Character::new();
    };

    match serde_json::from_str::<ProgressSnapshot>(&raw) {
        Ok(snapshot) => snapshot.into_character().unwrap_or_else(|| {
            tracing::warn!("saved progress is out of range, starting fresh");
            Character::new()
        }),
        Err(e) => {
            tracing::warn!(error = %e, "saved progress is malformed, starting fresh");
            Character::new()
        }
    }
}

pub fn save_progress(store: &mut dyn KeyValueStore, character: &Character) -> io::Result<()> {
    let json = serde_json::to_string(&ProgressSnapshot::from(character))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    store.set(PROGRESS_KEY, json)
}
