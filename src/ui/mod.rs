//! Terminal presentation layer.

mod dialogs;
pub mod game_common;
pub mod pacing;
mod stage_scene;
mod stage_select_scene;
mod start_scene;

use pacing::UiState;
use ratatui::Frame;
use times_table_quest::{GameController, Screen};

/// Draws whatever the controller's current screen calls for.
///
/// While the last answer is still being revealed the stage scene stays up,
/// so level-up, victory and defeat dialogs appear only after the feedback.
pub fn draw(frame: &mut Frame, game: &GameController, ui: &UiState) {
    let area = frame.size();

    if ui.is_revealing() && game.stage().is_some() {
        stage_scene::draw_stage(frame, area, game, ui);
        return;
    }

    match game.screen() {
        Screen::Start => start_scene::draw_start(frame, area, game),
        Screen::StageSelect => stage_select_scene::draw_stage_select(frame, area, game, ui),
        Screen::InStage => stage_scene::draw_stage(frame, area, game, ui),
        Screen::LevelUpPause => {
            stage_scene::draw_stage(frame, area, game, ui);
            dialogs::draw_level_up(frame, area, game);
        }
        Screen::VictoryStage => {
            stage_scene::draw_stage(frame, area, game, ui);
            dialogs::draw_stage_victory(frame, area, game, ui);
        }
        Screen::DefeatRun => {
            stage_scene::draw_stage(frame, area, game, ui);
            dialogs::draw_defeat(frame, area, game);
        }
        Screen::UltimateVictory => {
            stage_scene::draw_stage(frame, area, game, ui);
            dialogs::draw_ultimate_victory(frame, area, game, ui);
        }
    }
}
