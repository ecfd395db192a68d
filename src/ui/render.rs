use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::Model;
use crate::editor::{Buffer, Selection, byte_index};
use crate::highlight::{StyledSpan, TokenStyle, highlight};

use super::{TAB_DISPLAY_WIDTH, overlays, status, tab_strip};

pub const HEADER_TITLE: &str = "Prodios Code Editor";
pub const EMPTY_HINT: &str = "No open files. Press Ctrl+N to create one.";

/// The four horizontal bands of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRows {
    pub header: Rect,
    pub tabs: Rect,
    pub editor: Rect,
    pub status: Rect,
}

/// Split the screen into header, tab strip, editor surface and status bar.
pub fn screen_rows(area: Rect) -> ScreenRows {
    let row = |offset: u16| Rect {
        y: area.y + offset.min(area.height),
        height: u16::from(offset < area.height),
        ..area
    };
    let header = row(0);
    let tabs = row(1);
    let status = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: u16::from(area.height > 2),
        ..area
    };
    let editor = Rect {
        y: area.y + 2.min(area.height),
        height: area.height.saturating_sub(3),
        ..area
    };
    ScreenRows {
        header,
        tabs,
        editor,
        status,
    }
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let rows = screen_rows(area);

    render_header(frame, rows.header);
    tab_strip::render_tab_strip(model, frame, rows.tabs);
    match model.active_buffer() {
        Some(buffer) => render_editor(model, buffer, frame, rows.editor),
        None => render_empty_hint(frame, rows.editor),
    }
    status::render_status_bar(model, frame, rows.status);

    if model.conflict_visible {
        overlays::render_conflict_dialog(frame, area);
    } else if let Some(input) = model.new_file_prompt.as_deref() {
        overlays::render_new_file_prompt(input, frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(HEADER_TITLE)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(header, area);
}

fn render_empty_hint(frame: &mut Frame, area: Rect) {
    let top = area.height / 2;
    let hint_area = Rect {
        y: area.y + top,
        height: area.height.saturating_sub(top).min(1),
        ..area
    };
    let hint = Paragraph::new(EMPTY_HINT)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Clear, area);
    frame.render_widget(hint, hint_area);
}

fn render_editor(model: &Model, buffer: &Buffer, frame: &mut Frame, area: Rect) {
    let highlighted = highlight(buffer.text(), buffer.language_id());

    // Line number gutter width
    let total_lines = highlighted.line_count();
    let gutter_width = usize::from(line_number_width(total_lines));

    let visible_height = usize::from(area.height);
    let start = model.editor_scroll_offset.min(total_lines.saturating_sub(1));
    let end = (start + visible_height).min(total_lines);
    let selection = buffer.selection();

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_num = format!("{:>gutter_width$} ", line_idx + 1);
        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];
        let line_start = buffer.line_start(line_idx).unwrap_or_default();
        let styled = highlighted.line(line_idx).unwrap_or_default();
        spans.extend(editor_line_spans(styled, line_start, selection));
        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

/// Convert one highlighted line into terminal spans, overlaying the
/// selection (reversed) and the block caret.
///
/// `line_start` is the UTF-16 offset of the line's first character.
fn editor_line_spans(
    styled: &[StyledSpan],
    line_start: usize,
    selection: Selection,
) -> Vec<Span<'static>> {
    let caret_style = Style::default().bg(Color::White).fg(Color::Black);
    let mut out = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    let mut offset = line_start;

    for span in styled {
        let base = token_style(span.style);
        for ch in span.text.chars() {
            let style = if offset == selection.cursor {
                caret_style
            } else if offset >= selection.start() && offset < selection.end() {
                base.add_modifier(Modifier::REVERSED)
            } else {
                base
            };
            if style != run_style && !run.is_empty() {
                out.push(Span::styled(std::mem::take(&mut run), run_style));
            }
            run_style = style;
            push_display_char(&mut run, ch);
            offset += ch.len_utf16();
        }
    }
    if !run.is_empty() {
        out.push(Span::styled(run, run_style));
    }
    if offset == selection.cursor {
        out.push(Span::styled(" ", caret_style));
    }
    out
}

fn push_display_char(run: &mut String, ch: char) {
    if ch == '\t' {
        run.extend(std::iter::repeat_n(' ', TAB_DISPLAY_WIDTH));
    } else if ch.is_control() {
        run.push('\u{FFFD}');
    } else {
        run.push(ch);
    }
}

fn display_width(ch: char) -> usize {
    if ch == '\t' {
        TAB_DISPLAY_WIDTH
    } else {
        ch.width().unwrap_or(1)
    }
}

fn token_style(token: TokenStyle) -> Style {
    let mut style = Style::default();
    if let Some(fg) = token.fg {
        style = style.fg(Color::Rgb(fg.r, fg.g, fg.b));
    }
    if token.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if token.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if token.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Map a screen cell inside the editor surface to a UTF-16 caret offset.
///
/// Clicks past the end of a line land at its end; clicks below the last
/// line land at the end of the buffer.
pub fn editor_offset_at(model: &Model, area: Rect, column: u16, row: u16) -> Option<usize> {
    let buffer = model.active_buffer()?;
    let editor = screen_rows(area).editor;
    let inside = column >= editor.x
        && column < editor.x + editor.width
        && row >= editor.y
        && row < editor.y + editor.height;
    if !inside {
        return None;
    }

    let line_count = buffer.line_count();
    let line = model.editor_scroll_offset + usize::from(row - editor.y);
    if line >= line_count {
        return Some(buffer.len_utf16());
    }
    let gutter = usize::from(line_number_width(line_count)) + 1;
    let target = usize::from(column - editor.x).saturating_sub(gutter);

    let line_start = buffer.line_start(line)?;
    let text = buffer.text();
    let line_text = text[byte_index(text, line_start)..]
        .split('\n')
        .next()
        .unwrap_or_default();

    let mut width = 0;
    let mut offset = line_start;
    for ch in line_text.chars() {
        let w = display_width(ch);
        if width + w > target {
            break;
        }
        width += w;
        offset += ch.len_utf16();
    }
    Some(offset)
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
