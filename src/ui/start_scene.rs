use super::game_common::controls_line;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use times_table_quest::timer::format_duration;
use times_table_quest::GameController;

/// Title screen with saved progress and the best time.
pub fn draw_start(frame: &mut Frame, area: Rect, game: &GameController) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Times Table Quest ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let character = game.character();
    let best = match game.timer().best_time_ms() {
        Some(ms) => {
            let when = game
                .timer()
                .best_achieved_at()
                .map(|dt| format!(" (set {})", dt.format("%Y-%m-%d")))
                .unwrap_or_default();
            format!("Best time: {}{}", format_duration(ms), when)
        }
        None => "Best time: --:--.--".to_string(),
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "⚔️  Times Table Quest  ⚔️",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Answer multiplication questions to level up your hero."),
        Line::from("Reach level 10 and bank a full level of experience to win."),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Saved hero: level {} ({}/{} XP), {} items",
                character.level(),
                character.experience(),
                character.experience_to_next_level(),
                character.equipment().len()
            ),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(best, Style::default().fg(Color::Green))),
        Line::from(""),
        if game.can_continue() {
            controls_line(&[("[N]", "New game"), ("[C]", "Continue"), ("[Q]", "Quit")])
        } else {
            controls_line(&[("[N]", "New game"), ("[Q]", "Quit")])
        },
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
