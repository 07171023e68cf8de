//! Times Table Quest - multiplication drills with RPG progression.
//!
//! The library holds all game rules so they can be driven by any front end
//! and exercised in tests. The terminal UI lives in the binary.

pub mod character;
pub mod core;
pub mod items;
pub mod stage;
pub mod timer;
pub mod utils;

pub use crate::character::{Character, ExperienceGain};
pub use crate::core::{
    Cue, EffectSink, GameController, GameError, GameEvent, GameRules, RunStats, Screen,
    StageSummary,
};
pub use crate::items::{Equipment, SlotType, EQUIPMENT_TABLE};
pub use crate::stage::{Question, StageSession};
pub use crate::timer::{Clock, ManualClock, RunTimer, SystemClock};
pub use crate::utils::{FileStore, KeyValueStore, MemoryStore};
