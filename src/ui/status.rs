use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

const KEY_HINTS: &str = "Ctrl+N:new  Ctrl+W:close  Ctrl+Q:quit";

pub(super) fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let status = model.session.active().map_or_else(
        || format!(" {KEY_HINTS}"),
        |tab| {
            let buffer = tab.buffer();
            let selection = buffer.selection();
            let (line, col) = buffer.line_col(selection.cursor);
            let language = match buffer.language_id() {
                "" => "plain text",
                id => id,
            };
            let selected = if selection.is_caret() {
                String::new()
            } else {
                format!(" ({} selected)", selection.len())
            };
            format!(
                " {}  [{}]  Ln {}, Col {}{}  {}  {KEY_HINTS}",
                tab.name(),
                language,
                line + 1,
                col + 1,
                selected,
                model.engine.indent(),
            )
        },
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}
