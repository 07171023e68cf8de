use super::game_common::render_status_bar;
use super::pacing::UiState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use times_table_quest::stage::stage_icon;
use times_table_quest::GameController;

/// 3x3 grid of stages plus a status line.
pub fn draw_stage_select(frame: &mut Frame, area: Rect, game: &GameController, ui: &UiState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Choose a Stage ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(9), Constraint::Length(2)])
        .split(inner);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(v_chunks[0]);

    for (row_index, row_area) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(*row_area);

        for (col_index, cell) in cells.iter().enumerate() {
            let stage_number = (row_index * 3 + col_index + 1) as u32;
            let selected = stage_number == ui.stage_cursor;
            let border = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let card = Paragraph::new(vec![
                Line::from(stage_icon(stage_number)),
                Line::from(format!("Stage {}", stage_number)),
                Line::from(format!("{} times table", stage_number)),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border));
            frame.render_widget(card, *cell);
        }
    }

    let character = game.character();
    let status = match &ui.notice {
        Some(notice) => notice.clone(),
        None => format!(
            "Level {}  XP {}/{}  Time {}",
            character.level(),
            character.experience(),
            character.experience_to_next_level(),
            game.elapsed_display()
        ),
    };
    render_status_bar(
        frame,
        v_chunks[1],
        &status,
        Color::Cyan,
        &[
            ("[←↑→↓/1-9]", "Pick"),
            ("[Enter]", "Play"),
            ("[Esc]", "Title"),
        ],
    );
}
