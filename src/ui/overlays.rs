use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::app::is_valid_file_name;

pub const NEW_FILE_TITLE: &str = "Create new file";
pub const NEW_FILE_HINT: &str = "Name with extension, e.g. index.tsx";
pub const CONFLICT_TITLE: &str = "File name conflict";
pub const CONFLICT_MESSAGE: &str = "File with this name is already present in the workspace. Please create a file with a different name.";

const HINT_COLOR: Color = Color::Indexed(245);

pub(super) fn render_new_file_prompt(input: &str, frame: &mut Frame, area: Rect) {
    let popup = centered_popup_rect(area.width.saturating_sub(16).clamp(44, 64), 9, area);
    let valid = is_valid_file_name(input);

    let create_style = if valid {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(HINT_COLOR)
    };
    let lines = vec![
        Line::styled(NEW_FILE_HINT, Style::default().fg(HINT_COLOR)),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Yellow)),
            Span::raw(input.to_string()),
            Span::styled(" ", Style::default().bg(Color::White).fg(Color::Black)),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Enter: create", create_style),
            Span::styled("  Esc: cancel", Style::default().fg(HINT_COLOR)),
        ]),
    ];

    let block = Block::default()
        .title(NEW_FILE_TITLE)
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub(super) fn render_conflict_dialog(frame: &mut Frame, area: Rect) {
    let popup = centered_popup_rect(area.width.saturating_sub(16).clamp(44, 64), 10, area);

    let lines = vec![
        Line::raw(CONFLICT_MESSAGE),
        Line::raw(""),
        Line::styled(
            "Enter: okay",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let block = Block::default()
        .title(CONFLICT_TITLE)
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        popup,
    );
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
