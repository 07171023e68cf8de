//! Top-level game state machine.
//!
//! `GameController` owns the character, the active stage, the run timer and
//! the run counters. Every player action is a synchronous call that applies
//! its state change at once and returns the events the UI should present, in
//! order. Nothing here sleeps or schedules work.
//!
//! ```text
//! Start ─► StageSelect ─► InStage ─┬─► LevelUpPause ─► InStage | VictoryStage
//!   ▲          ▲   ▲               ├─► VictoryStage ─► InStage (next) | StageSelect
//!   │          │   └───────────────┼─► DefeatRun ─► InStage (retry) | StageSelect (restart)
//!   └──────────┴───────────────────┴─► UltimateVictory
//! ```

use super::constants::{GameRules, STAGE_COUNT};
use super::error::{AnswerError, GameError};
use super::events::{EffectSink, GameEvent, NoEffects, RunStats, StageSummary};
use crate::character::progression::Character;
use crate::character::save::{load_progress, save_progress};
use crate::items::equipment::Equipment;
use crate::stage::{is_valid_stage, parse_answer, StageSession};
use crate::timer::clock::{Clock, SystemClock};
use crate::timer::run_timer::RunTimer;
use crate::utils::persistence::KeyValueStore;
use rand::RngCore;
use tracing::{debug, info, warn};

/// Which screen the game is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Start,
    StageSelect,
    InStage,
    /// Showing newly unlocked equipment; resumes to InStage or VictoryStage
    LevelUpPause,
    VictoryStage,
    DefeatRun,
    UltimateVictory,
}

pub struct GameController {
    screen: Screen,
    after_level_up: Screen,
    character: Character,
    stage: Option<StageSession>,
    timer: RunTimer,
    stats: RunStats,
    rules: GameRules,
    last_unlocked: Vec<&'static Equipment>,
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    rng: Box<dyn RngCore>,
    effects: Box<dyn EffectSink>,
}

impl GameController {
    /// Builds a controller on the Start screen with saved progress and best
    /// time loaded from `store`.
    pub fn new(
        store: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
        rng: Box<dyn RngCore>,
    ) -> Self {
        let character = load_progress(store.as_ref());
        let timer = RunTimer::load(store.as_ref());
        Self {
            screen: Screen::Start,
            after_level_up: Screen::InStage,
            character,
            stage: None,
            timer,
            stats: RunStats::default(),
            rules: GameRules::default(),
            last_unlocked: Vec::new(),
            store,
            clock,
            rng,
            effects: Box::new(NoEffects),
        }
    }

    /// Real clock and thread-local randomness.
    pub fn with_store(store: Box<dyn KeyValueStore>) -> Self {
        Self::new(
            store,
            Box::new(SystemClock::new()),
            Box::new(rand::thread_rng()),
        )
    }

    pub fn with_rules(mut self, rules: GameRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_effects(mut self, effects: Box<dyn EffectSink>) -> Self {
        self.effects = effects;
        self
    }

    // === Read-only views for the presentation layer ===

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn stage(&self) -> Option<&StageSession> {
        self.stage.as_ref()
    }

    pub fn timer(&self) -> &RunTimer {
        &self.timer
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Equipment unlocked by the most recent level up.
    pub fn last_unlocked(&self) -> &[&'static Equipment] {
        &self.last_unlocked
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.timer.elapsed_at(self.clock.now_ms())
    }

    pub fn elapsed_display(&self) -> String {
        self.timer.display(self.clock.now_ms())
    }

    /// Summary of the current stage attempt, if one exists.
    pub fn stage_summary(&self) -> Option<StageSummary> {
        self.stage.as_ref().map(|stage| StageSummary {
            stage_number: stage.stage_number(),
            correct: stage.correct_count(),
            total: stage.total_questions(),
            hit_points: self.character.current_hit_points(),
            max_hit_points: self.character.max_hit_points(),
            level: self.character.level(),
        })
    }

    // === Player actions ===

    /// Wipes the character and starts a fresh run. Only runs started here
    /// (or through [`restart_run`](Self::restart_run)) can set a best time.
    pub fn start_new_game(&mut self) {
        self.character.reset();
        self.persist_character();
        self.begin_run(true);
        info!("new run started");
    }

    /// Starts an unranked run that keeps the saved character.
    ///
    /// A hero that has already banked level 10's threshold has nothing left
    /// to play for and is refused.
    pub fn continue_run(&mut self) -> Result<(), GameError> {
        self.require(&[Screen::Start], "continue")?;
        if self.character.is_at_max_progression() {
            return Err(GameError::AlreadyWon);
        }
        self.begin_run(false);
        info!(level = self.character.level(), "run continued from saved progress");
        Ok(())
    }

    /// True if [`continue_run`](Self::continue_run) would be accepted from
    /// the start screen.
    pub fn can_continue(&self) -> bool {
        !self.character.is_at_max_progression()
    }

    pub fn enter_stage(&mut self, stage_number: u32) -> Result<(), GameError> {
        if !is_valid_stage(stage_number) {
            return Err(GameError::StageOutOfRange(stage_number));
        }
        self.require(&[Screen::StageSelect], "enter a stage")?;
        self.begin_stage(stage_number);
        Ok(())
    }

    /// Scores `raw` against the current question.
    ///
    /// Empty or non-numeric input is rejected before anything changes and
    /// does not count as an asked question.
    pub fn submit_answer(&mut self, raw: &str) -> Result<Vec<GameEvent>, GameError> {
        self.require(&[Screen::InStage], "submit an answer")?;

        let stage = self.stage.as_mut().ok_or(AnswerError::NoActiveQuestion)?;
        if stage.is_complete() {
            return Err(AnswerError::NoActiveQuestion.into());
        }
        let given = parse_answer(raw)?;
        let expected = stage.current_question().answer;
        let correct = stage.score(given);
        let stage_number = stage.stage_number();

        self.stats.total_asked += 1;
        debug!(stage_number, given, expected, correct, "answer scored");

        let mut events = Vec::new();
        let mut leveled_up = false;

        if correct {
            self.stats.total_correct += 1;
            let gain = self.character.add_experience(self.rules.xp_per_correct);
            self.persist_character();
            events.push(GameEvent::AnswerScored {
                correct: true,
                given,
                expected,
                experience_gained: gain.actual_experience,
                multiplier: gain.multiplier,
            });

            if gain.leveled_up() {
                leveled_up = true;
                info!(
                    level = self.character.level(),
                    unlocked = gain.unlocked.len(),
                    "level up"
                );
                self.last_unlocked = gain.unlocked.clone();
                events.push(GameEvent::LevelUp {
                    level: self.character.level(),
                    unlocked: gain.unlocked,
                });
            }

            // Ultimate victory wins over anything the stage would do next
            if self.character.is_at_max_progression() {
                let victory = self.finish_with_ultimate_victory();
                events.push(victory);
                self.notify(&events);
                return Ok(events);
            }
        } else {
            let defeated = self.character.take_damage(self.rules.damage_per_wrong);
            self.persist_character();
            events.push(GameEvent::AnswerScored {
                correct: false,
                given,
                expected,
                experience_gained: 0,
                multiplier: self.character.compute_experience_multiplier(),
            });
            events.push(GameEvent::DamageTaken {
                amount: self.rules.damage_per_wrong,
                remaining: self.character.current_hit_points(),
            });

            if defeated {
                let elapsed_ms = self.timer.stop(self.clock.now_ms());
                self.screen = Screen::DefeatRun;
                info!(stage_number, elapsed_ms, "defeated");
                events.push(GameEvent::Defeat { stage_number });
                self.notify(&events);
                return Ok(events);
            }
        }

        let next = self.resolve_stage_progress(&mut events);
        if leveled_up {
            self.after_level_up = next;
            self.screen = Screen::LevelUpPause;
        } else {
            self.screen = next;
        }

        self.notify(&events);
        Ok(events)
    }

    /// Closes the level-up display and resumes where the answer left off.
    pub fn dismiss_level_up(&mut self) -> Result<(), GameError> {
        self.require(&[Screen::LevelUpPause], "dismiss the level up")?;
        self.screen = self.after_level_up;
        Ok(())
    }

    /// Moves on from a won stage: the next stage, or stage select after 9.
    pub fn advance_to_next_stage(&mut self) -> Result<(), GameError> {
        self.require(&[Screen::VictoryStage], "advance to the next stage")?;
        match self.stage.as_ref().map(StageSession::stage_number) {
            Some(n) if n < STAGE_COUNT => self.begin_stage(n + 1),
            _ => {
                self.stage = None;
                self.screen = Screen::StageSelect;
            }
        }
        Ok(())
    }

    /// Replays the lost stage. Level, equipment, run counters and elapsed
    /// time carry over; the timer picks up where it stopped.
    pub fn retry_stage(&mut self) -> Result<(), GameError> {
        self.require(&[Screen::DefeatRun], "retry the stage")?;
        let Some(stage_number) = self.stage.as_ref().map(StageSession::stage_number) else {
            self.screen = Screen::StageSelect;
            return Ok(());
        };
        self.timer.resume(self.clock.now_ms());
        self.begin_stage(stage_number);
        info!(stage_number, "retrying stage");
        Ok(())
    }

    /// Gives up after a defeat and starts over from level 1.
    pub fn restart_run(&mut self) -> Result<(), GameError> {
        self.require(&[Screen::DefeatRun], "restart the run")?;
        self.start_new_game();
        Ok(())
    }

    /// Abandons the current stage without touching progression.
    pub fn exit_to_stage_select(&mut self) -> Result<(), GameError> {
        self.require(
            &[Screen::InStage, Screen::LevelUpPause, Screen::VictoryStage],
            "leave the stage",
        )?;
        self.stage = None;
        self.screen = Screen::StageSelect;
        Ok(())
    }

    /// Back to the title screen. Ends (and stops timing) the current run.
    pub fn return_to_start(&mut self) -> Result<(), GameError> {
        self.require(
            &[Screen::StageSelect, Screen::UltimateVictory],
            "return to the start screen",
        )?;
        self.timer.stop(self.clock.now_ms());
        self.stage = None;
        self.screen = Screen::Start;
        Ok(())
    }

    /// Forgets saved progress and the best time.
    pub fn erase_saved_data(&mut self) {
        self.character.reset();
        self.persist_character();
        self.timer.reset();
        self.timer.clear_record(self.store.as_mut());
        self.stats = RunStats::default();
        self.stage = None;
        self.screen = Screen::Start;
        info!("saved progress and best time erased");
    }

    // === Internals ===

    fn require(&self, allowed: &[Screen], action: &'static str) -> Result<(), GameError> {
        if allowed.contains(&self.screen) {
            Ok(())
        } else {
            Err(GameError::InvalidTransition {
                action,
                screen: self.screen,
            })
        }
    }

    fn begin_run(&mut self, from_scratch: bool) {
        self.timer.reset();
        if from_scratch {
            self.timer.start(self.clock.now_ms());
        } else {
            self.timer.start_unranked(self.clock.now_ms());
        }
        self.stats = RunStats::default();
        self.stage = None;
        self.last_unlocked.clear();
        self.screen = Screen::StageSelect;
    }

    fn begin_stage(&mut self, stage_number: u32) {
        self.character.reset_hit_points();
        self.persist_character();
        self.stage = Some(StageSession::new(
            stage_number,
            self.rules.questions_per_stage,
            &mut self.rng,
        ));
        self.after_level_up = Screen::InStage;
        self.screen = Screen::InStage;
        info!(stage_number, "entered stage");
    }

    fn resolve_stage_progress(&mut self, events: &mut Vec<GameEvent>) -> Screen {
        let Some(stage) = self.stage.as_mut() else {
            return Screen::StageSelect;
        };
        if stage.is_complete() {
            events.push(GameEvent::StageComplete(StageSummary {
                stage_number: stage.stage_number(),
                correct: stage.correct_count(),
                total: stage.total_questions(),
                hit_points: self.character.current_hit_points(),
                max_hit_points: self.character.max_hit_points(),
                level: self.character.level(),
            }));
            Screen::VictoryStage
        } else {
            stage.generate_next_question(&mut self.rng);
            events.push(GameEvent::NextQuestion(*stage.current_question()));
            Screen::InStage
        }
    }

    fn finish_with_ultimate_victory(&mut self) -> GameEvent {
        let elapsed_ms = self.timer.stop(self.clock.now_ms());
        let new_record = self.timer.check_and_commit_record(self.store.as_mut());
        self.screen = Screen::UltimateVictory;
        info!(
            elapsed_ms,
            new_record,
            total_correct = self.stats.total_correct,
            total_asked = self.stats.total_asked,
            "ultimate victory"
        );
        GameEvent::UltimateVictory {
            elapsed_ms,
            new_record,
            stats: self.stats,
        }
    }

    fn persist_character(&mut self) {
        if let Err(e) = save_progress(self.store.as_mut(), &self.character) {
            warn!(error = %e, "failed to save progress; continuing in memory");
        }
    }

    fn notify(&mut self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(GameEvent::cue) {
            self.effects.play(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::clock::ManualClock;
    use crate::utils::persistence::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn controller() -> (GameController, ManualClock) {
        let clock = ManualClock::new(0);
        let game = GameController::new(
            Box::new(MemoryStore::new()),
            Box::new(clock.clone()),
            Box::new(StdRng::seed_from_u64(42)),
        );
        (game, clock)
    }

    fn current_answer(game: &GameController) -> String {
        game.stage().unwrap().current_question().answer.to_string()
    }

    fn wrong_answer(game: &GameController) -> String {
        (game.stage().unwrap().current_question().answer + 1).to_string()
    }

    #[test]
    fn test_starts_on_start_screen() {
        let (game, _) = controller();
        assert_eq!(game.screen(), Screen::Start);
        assert!(game.stage().is_none());
        assert!(!game.timer().is_running());
    }

    #[test]
    fn test_new_game_goes_to_stage_select_and_starts_timer() {
        let (mut game, clock) = controller();
        game.start_new_game();
        assert_eq!(game.screen(), Screen::StageSelect);
        clock.advance(1_500);
        assert_eq!(game.elapsed_ms(), 1_500);
    }

    #[test]
    fn test_enter_stage_out_of_range_is_rejected() {
        let (mut game, _) = controller();
        game.start_new_game();
        assert_eq!(game.enter_stage(0), Err(GameError::StageOutOfRange(0)));
        assert_eq!(game.enter_stage(10), Err(GameError::StageOutOfRange(10)));
        assert_eq!(game.screen(), Screen::StageSelect);
        assert!(game.stage().is_none());
    }

    #[test]
    fn test_enter_stage_requires_stage_select() {
        let (mut game, _) = controller();
        assert!(matches!(
            game.enter_stage(3),
            Err(GameError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_correct_answer_flow() {
        let (mut game, _) = controller();
        game.start_new_game();
        game.enter_stage(4).unwrap();

        let answer = current_answer(&game);
        let events = game.submit_answer(&answer).unwrap();

        assert!(matches!(
            events[0],
            GameEvent::AnswerScored {
                correct: true,
                experience_gained: 20,
                ..
            }
        ));
        assert!(matches!(events.last(), Some(GameEvent::NextQuestion(_))));
        assert_eq!(game.screen(), Screen::InStage);
        assert_eq!(game.character().experience(), 20);
        assert_eq!(game.stats().total_correct, 1);
        assert_eq!(game.stats().total_asked, 1);
    }

    #[test]
    fn test_invalid_input_changes_nothing() {
        let (mut game, _) = controller();
        game.start_new_game();
        game.enter_stage(2).unwrap();
        let before = *game.stage().unwrap().current_question();

        assert_eq!(
            game.submit_answer(""),
            Err(GameError::Answer(AnswerError::Empty))
        );
        assert!(game.submit_answer("abc").unwrap_err().is_retryable_input());
        assert_eq!(game.stats().total_asked, 0);
        assert_eq!(game.stage().unwrap().questions_asked(), 0);
        assert_eq!(*game.stage().unwrap().current_question(), before);
    }

    #[test]
    fn test_level_up_pauses_then_resumes() {
        let (mut game, _) = controller();
        game.start_new_game();
        game.enter_stage(1).unwrap();

        for _ in 0..4 {
            let answer = current_answer(&game);
            game.submit_answer(&answer).unwrap();
        }
        let answer = current_answer(&game);
        let events = game.submit_answer(&answer).unwrap();

        assert_eq!(game.screen(), Screen::LevelUpPause);
        assert_eq!(game.character().level(), 2);
        assert_eq!(game.last_unlocked().len(), 1);
        assert_eq!(events.len(), 3);
        assert!(matches!(events[1], GameEvent::LevelUp { level: 2, .. }));

        assert!(game.submit_answer("1").is_err());
        game.dismiss_level_up().unwrap();
        assert_eq!(game.screen(), Screen::InStage);
    }

    #[test]
    fn test_hit_points_reset_on_stage_entry() {
        let (mut game, _) = controller();
        game.start_new_game();
        game.enter_stage(5).unwrap();
        let wrong = wrong_answer(&game);
        game.submit_answer(&wrong).unwrap();
        assert_eq!(game.character().current_hit_points(), 85);

        game.exit_to_stage_select().unwrap();
        game.enter_stage(5).unwrap();
        assert_eq!(game.character().current_hit_points(), 100);
    }

    #[test]
    fn test_actions_from_wrong_screen_are_rejected() {
        let (mut game, _) = controller();
        assert!(game.retry_stage().is_err());
        assert!(game.restart_run().is_err());
        assert!(game.advance_to_next_stage().is_err());
        assert!(game.dismiss_level_up().is_err());
        assert!(game.exit_to_stage_select().is_err());
        assert_eq!(game.screen(), Screen::Start);
    }

    #[test]
    fn test_return_to_start_stops_timer() {
        let (mut game, clock) = controller();
        game.start_new_game();
        clock.advance(700);
        game.return_to_start().unwrap();
        clock.advance(5_000);
        assert_eq!(game.screen(), Screen::Start);
        assert_eq!(game.elapsed_ms(), 700);
    }

    fn controller_with_saved(level: u32, experience: u64) -> (GameController, ManualClock) {
        let mut store = MemoryStore::new();
        save_progress(&mut store, &Character::restore(level, experience, 100)).unwrap();
        let clock = ManualClock::new(0);
        let game = GameController::new(
            Box::new(store),
            Box::new(clock.clone()),
            Box::new(StdRng::seed_from_u64(42)),
        );
        (game, clock)
    }

    #[test]
    fn test_continue_refused_once_hero_has_won() {
        let (mut game, _) = controller_with_saved(10, 1_000);
        assert!(!game.can_continue());
        assert_eq!(game.continue_run(), Err(GameError::AlreadyWon));
        assert_eq!(game.screen(), Screen::Start);
        assert!(!game.timer().is_running());
    }

    #[test]
    fn test_continued_run_is_unranked() {
        let (mut game, _) = controller_with_saved(4, 10);
        assert!(game.can_continue());
        game.continue_run().unwrap();
        assert!(game.timer().is_running());
        assert!(!game.timer().is_record_eligible());

        game.return_to_start().unwrap();
        game.start_new_game();
        assert!(game.timer().is_record_eligible());
    }
}
