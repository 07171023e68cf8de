// Character progression
pub const MAX_LEVEL: u32 = 10;
pub const MAX_HIT_POINTS: u32 = 100;
pub const XP_PER_LEVEL_STEP: u64 = 100;

// Scoring
pub const BASE_XP_PER_CORRECT: u64 = 20;
pub const DAMAGE_PER_WRONG: u32 = 15;

// Stages
pub const STAGE_COUNT: u32 = 9;
pub const QUESTIONS_PER_STAGE: u32 = 10;
pub const MIN_OPERAND: u32 = 1;
pub const MAX_OPERAND: u32 = 9;

// Persistence keys (shared with the browser build's localStorage layout)
pub const PROGRESS_KEY: &str = "gameProgress";
pub const BEST_TIME_KEY: &str = "bestTime";
pub const BEST_TIME_ACHIEVED_AT_KEY: &str = "bestTimeAchievedAt";

// Presentation pacing hints (the core never waits on these)
pub const FEEDBACK_DISPLAY_MS: u64 = 1000;
pub const LEVEL_UP_REVEAL_MS: u64 = 500;
pub const DEFEAT_REVEAL_MS: u64 = 800;
pub const VICTORY_REVEAL_MS: u64 = 1000;
pub const NEXT_QUESTION_REVEAL_MS: u64 = 1200;
pub const TIMER_REFRESH_MS: u64 = 100;

/// Scoring and stage-shape knobs used by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRules {
    /// Base experience for a correct answer, before the equipment multiplier
    pub xp_per_correct: u64,
    /// Hit points lost per wrong answer
    pub damage_per_wrong: u32,
    /// Questions in one stage attempt
    pub questions_per_stage: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            xp_per_correct: BASE_XP_PER_CORRECT,
            damage_per_wrong: DAMAGE_PER_WRONG,
            questions_per_stage: QUESTIONS_PER_STAGE,
        }
    }
}
