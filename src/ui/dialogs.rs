//! Level-up, victory and defeat dialogs drawn over the stage scene.

use super::game_common::{render_modal, ModalTone};
use super::pacing::UiState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};
use times_table_quest::timer::format_duration;
use times_table_quest::GameController;

pub fn draw_level_up(frame: &mut Frame, area: Rect, game: &GameController) {
    let mut body = vec![Line::from(format!(
        "You reached level {}!",
        game.character().level()
    ))];
    for item in game.last_unlocked() {
        body.push(Line::from(Span::styled(
            format!(
                "Unlocked {}: {}  (+{}% XP)",
                item.slot.name(),
                item,
                item.bonus_percent
            ),
            Style::default().fg(Color::Cyan),
        )));
    }
    render_modal(
        frame,
        area,
        ModalTone::Reward,
        "⭐ LEVEL UP ⭐",
        body,
        &[("[Enter]", "Continue")],
    );
}

pub fn draw_stage_victory(frame: &mut Frame, area: Rect, game: &GameController, ui: &UiState) {
    let Some(summary) = ui.last_summary.or_else(|| game.stage_summary()) else {
        return;
    };
    let body = vec![
        Line::from(format!("✅ Correct: {}/{}", summary.correct, summary.total)),
        Line::from(format!(
            "❤️ Hit points left: {}/{}",
            summary.hit_points, summary.max_hit_points
        )),
        Line::from(format!("⭐ Level: {}", summary.level)),
    ];
    let next = if summary.stage_number < 9 {
        "Next stage"
    } else {
        "Stage select"
    };
    render_modal(
        frame,
        area,
        ModalTone::Win,
        &format!("Stage {} cleared!", summary.stage_number),
        body,
        &[("[Enter]", next), ("[Esc]", "Stage select")],
    );
}

pub fn draw_defeat(frame: &mut Frame, area: Rect, game: &GameController) {
    let body = vec![
        Line::from("Your hero ran out of hit points."),
        Line::from(format!(
            "Level {} and all gear are kept if you retry.",
            game.character().level()
        )),
    ];
    render_modal(
        frame,
        area,
        ModalTone::Loss,
        "💀 DEFEAT",
        body,
        &[("[R]", "Retry stage"), ("[N]", "New game")],
    );
}

pub fn draw_ultimate_victory(frame: &mut Frame, area: Rect, game: &GameController, ui: &UiState) {
    let Some(result) = ui.run_result else {
        return;
    };
    let mut body = vec![
        Line::from("Your hero has mastered every times table!"),
        Line::from(""),
        Line::from(format!("⏱️ Time: {}", format_duration(result.elapsed_ms))),
        Line::from(format!(
            "✅ Answers: {}/{} ({:.0}%)",
            result.stats.total_correct,
            result.stats.total_asked,
            result.stats.accuracy() * 100.0
        )),
    ];
    if result.new_record {
        body.push(Line::from(Span::styled(
            "🏆 New best time!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    } else if !game.timer().is_record_eligible() {
        body.push(Line::from("Continued runs are not ranked."));
    } else if let Some(best) = game.timer().best_time_ms() {
        body.push(Line::from(format!("Best time: {}", format_duration(best))));
    }
    render_modal(
        frame,
        area,
        ModalTone::Win,
        "👑 ULTIMATE VICTORY 👑",
        body,
        &[("[Enter]", "Title screen")],
    );
}
