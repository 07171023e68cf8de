use super::game_common::{create_game_layout, render_status_bar};
use super::pacing::UiState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use times_table_quest::stage::stage_title;
use times_table_quest::{Character, GameController};

const HERO_PANEL_WIDTH: u16 = 28;

/// Question, answer box and the hero panel.
pub fn draw_stage(frame: &mut Frame, area: Rect, game: &GameController, ui: &UiState) {
    let Some(stage) = game.stage() else {
        return;
    };

    let title = format!(" {} ", stage_title(stage.stage_number()));
    let layout = create_game_layout(frame, area, &title, Color::Cyan, HERO_PANEL_WIDTH);

    let question = ui
        .shown_question
        .as_ref()
        .map(|q| q.prompt())
        .unwrap_or_default();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            question,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Answer: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}_", ui.input),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
    ];

    if let Some(feedback) = &ui.feedback {
        let color = if feedback.correct {
            Color::Green
        } else {
            Color::Red
        };
        lines.push(Line::from(Span::styled(
            feedback.text.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    } else if let Some(notice) = &ui.notice {
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        layout.content,
    );

    let status = format!(
        "Question {}  Time {}",
        stage.progress_label(),
        game.elapsed_display()
    );
    render_status_bar(
        frame,
        layout.status_bar,
        &status,
        Color::Cyan,
        &[("[0-9]", "Type"), ("[Enter]", "Answer"), ("[Esc]", "Leave")],
    );

    draw_hero_panel(frame, layout.info_panel, game.character());
}

fn draw_hero_panel(frame: &mut Frame, area: Rect, character: &Character) {
    let block = Block::default()
        .title(" Hero ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(format!(
            "Level {}   XP x{:.2}",
            character.level(),
            character.compute_experience_multiplier()
        )),
        chunks[0],
    );

    let hp_ratio = character.current_hit_points() as f64 / character.max_hit_points() as f64;
    let hp_color = if hp_ratio > 0.5 {
        Color::Green
    } else if hp_ratio > 0.2 {
        Color::Yellow
    } else {
        Color::Red
    };
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(hp_color))
            .ratio(hp_ratio.clamp(0.0, 1.0))
            .label(format!(
                "HP {}/{}",
                character.current_hit_points(),
                character.max_hit_points()
            )),
        chunks[1],
    );

    let xp_ratio = character.experience() as f64 / character.experience_to_next_level() as f64;
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio(xp_ratio.clamp(0.0, 1.0))
            .label(format!(
                "XP {}/{}",
                character.experience(),
                character.experience_to_next_level()
            )),
        chunks[2],
    );

    let mut equipment_lines = Vec::new();
    if character.equipment().is_empty() {
        equipment_lines.push(Line::from(Span::styled(
            "Level up to unlock gear",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for item in character.equipment() {
            equipment_lines.push(Line::from(vec![
                Span::raw(format!("{} ", item.icon)),
                Span::raw(item.name),
                Span::styled(
                    format!(" +{}%", item.bonus_percent),
                    Style::default().fg(Color::Cyan),
                ),
            ]));
        }
    }
    frame.render_widget(Paragraph::new(equipment_lines), chunks[4]);
}
