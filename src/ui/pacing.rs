//! Presentation-side state: typed input, feedback and event pacing.
//!
//! The controller has already applied each answer by the time events reach
//! here. This module only decides when the player gets to see them.

use std::collections::VecDeque;
use std::time::{Duration, Instant};
use times_table_quest::core::constants::FEEDBACK_DISPLAY_MS;
use times_table_quest::{GameEvent, Question, RunStats, StageSummary};

/// Longest answer the input box accepts (81 is the biggest product).
const MAX_INPUT_LEN: usize = 3;

pub struct Feedback {
    pub text: String,
    pub correct: bool,
    until: Instant,
}

/// Result of the finished run, kept for the victory screen.
#[derive(Clone, Copy)]
pub struct RunResult {
    pub elapsed_ms: u64,
    pub new_record: bool,
    pub stats: RunStats,
}

#[derive(Default)]
pub struct UiState {
    pub input: String,
    /// Highlighted stage on the select screen (1-9)
    pub stage_cursor: u32,
    pub notice: Option<String>,
    pub feedback: Option<Feedback>,
    /// Question on screen; lags the controller until its reveal time
    pub shown_question: Option<Question>,
    pub last_summary: Option<StageSummary>,
    pub run_result: Option<RunResult>,
    pending: VecDeque<(Instant, GameEvent)>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            stage_cursor: 1,
            ..Self::default()
        }
    }

    /// True while events from the last answer are still being revealed.
    pub fn is_revealing(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn push_digit(&mut self, c: char) {
        if c.is_ascii_digit() && self.input.len() < MAX_INPUT_LEN {
            self.input.push(c);
            self.notice = None;
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Called when a stage (re)starts so the first question shows at once.
    pub fn begin_stage(&mut self, question: Option<Question>) {
        self.input.clear();
        self.notice = None;
        self.feedback = None;
        self.pending.clear();
        self.shown_question = question;
    }

    /// Queues events at their suggested delays from `now`.
    pub fn schedule(&mut self, now: Instant, events: Vec<GameEvent>) {
        self.input.clear();
        self.notice = None;
        for event in events {
            let at = now + Duration::from_millis(event.reveal_delay_ms());
            self.pending.push_back((at, event));
        }
    }

    /// Applies every event whose time has come.
    pub fn tick(&mut self, now: Instant) {
        if self.feedback.as_ref().is_some_and(|f| f.until <= now) {
            self.feedback = None;
        }

        // Events were queued in order; reveal each once its own time passes
        while let Some((at, _)) = self.pending.front() {
            if *at > now {
                break;
            }
            if let Some((_, event)) = self.pending.pop_front() {
                self.reveal(now, event);
            }
        }
    }

    fn reveal(&mut self, now: Instant, event: GameEvent) {
        if let Some(text) = event.feedback() {
            let correct = matches!(event, GameEvent::AnswerScored { correct: true, .. });
            self.feedback = Some(Feedback {
                text,
                correct,
                until: now + Duration::from_millis(FEEDBACK_DISPLAY_MS),
            });
        }
        match event {
            GameEvent::NextQuestion(question) => self.shown_question = Some(question),
            GameEvent::StageComplete(summary) => self.last_summary = Some(summary),
            GameEvent::UltimateVictory {
                elapsed_ms,
                new_record,
                stats,
            } => {
                self.run_result = Some(RunResult {
                    elapsed_ms,
                    new_record,
                    stats,
                })
            }
            _ => {}
        }
    }
}
