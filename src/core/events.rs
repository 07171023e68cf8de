//! Events returned by the controller for the presentation layer to pace.
//!
//! The controller applies every state change immediately and hands back an
//! ordered list of what happened. The UI decides how long to linger on each
//! one; [`GameEvent::reveal_delay_ms`] gives the suggested pacing.

use super::constants::{
    DEFEAT_REVEAL_MS, LEVEL_UP_REVEAL_MS, NEXT_QUESTION_REVEAL_MS,
    VICTORY_REVEAL_MS,
};
use crate::items::equipment::Equipment;
use crate::stage::Question;

/// Correct/asked counters for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub total_correct: u32,
    pub total_asked: u32,
}

impl RunStats {
    /// Fraction answered correctly; 0.0 before any answer.
    pub fn accuracy(&self) -> f64 {
        if self.total_asked == 0 {
            0.0
        } else {
            self.total_correct as f64 / self.total_asked as f64
        }
    }
}

/// What the stage victory screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSummary {
    pub stage_number: u32,
    pub correct: u32,
    pub total: u32,
    pub hit_points: u32,
    pub max_hit_points: u32,
    pub level: u32,
}

/// Something that happened while handling one player action.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// An answer was scored. `expected` is shown when it was wrong.
    AnswerScored {
        correct: bool,
        given: u32,
        expected: u32,
        experience_gained: u64,
        multiplier: f64,
    },

    DamageTaken { amount: u32, remaining: u32 },

    /// One or more levels gained; `unlocked` lists the new equipment.
    LevelUp {
        level: u32,
        unlocked: Vec<&'static Equipment>,
    },

    NextQuestion(Question),

    StageComplete(StageSummary),

    Defeat { stage_number: u32 },

    UltimateVictory {
        elapsed_ms: u64,
        new_record: bool,
        stats: RunStats,
    },
}

/// Sound/effect cue for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Correct,
    Wrong,
    LevelUp,
    Victory,
    Defeat,
}

impl GameEvent {
    pub fn cue(&self) -> Option<Cue> {
        match self {
            GameEvent::AnswerScored { correct: true, .. } => Some(Cue::Correct),
            GameEvent::AnswerScored { correct: false, .. } => Some(Cue::Wrong),
            GameEvent::LevelUp { .. } => Some(Cue::LevelUp),
            GameEvent::StageComplete(_) | GameEvent::UltimateVictory { .. } => Some(Cue::Victory),
            GameEvent::Defeat { .. } => Some(Cue::Defeat),
            GameEvent::DamageTaken { .. } | GameEvent::NextQuestion(_) => None,
        }
    }

    /// Suggested delay after the answer before showing this event.
    pub fn reveal_delay_ms(&self) -> u64 {
        match self {
            GameEvent::AnswerScored { .. } | GameEvent::DamageTaken { .. } => 0,
            GameEvent::LevelUp { .. } => LEVEL_UP_REVEAL_MS,
            GameEvent::Defeat { .. } => DEFEAT_REVEAL_MS,
            GameEvent::StageComplete(_) | GameEvent::UltimateVictory { .. } => VICTORY_REVEAL_MS,
            GameEvent::NextQuestion(_) => NEXT_QUESTION_REVEAL_MS,
        }
    }

    /// Feedback line for scored answers.
    pub fn feedback(&self) -> Option<String> {
        match self {
            GameEvent::AnswerScored {
                correct: true,
                experience_gained,
                ..
            } => Some(format!("✅ Correct! +{} XP", experience_gained)),
            GameEvent::AnswerScored {
                correct: false,
                expected,
                ..
            } => Some(format!("❌ Wrong! The answer is {}", expected)),
            _ => None,
        }
    }
}

/// Receives effect cues (sound, flashes). Fire-and-forget.
pub trait EffectSink {
    fn play(&mut self, cue: Cue);
}

/// Sink that ignores every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEffects;

impl EffectSink for NoEffects {
    fn play(&mut self, _cue: Cue) {}
}
