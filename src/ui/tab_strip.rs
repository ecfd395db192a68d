use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::Model;
use crate::session::{Tab, TabId};

const CLOSE_LABEL: &str = "× ";
const SEPARATOR: &str = "│";
const NEW_FILE_LABEL: &str = " + ";

/// What a click on the tab strip does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabStripHit {
    Activate(TabId),
    Close(TabId),
    NewFile,
}

/// One clickable region of the tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabStripItem {
    pub x: u16,
    pub width: u16,
    pub hit: TabStripHit,
}

impl TabStripItem {
    const fn contains(&self, column: u16) -> bool {
        column >= self.x && column < self.x.saturating_add(self.width)
    }
}

/// Lay out the tab strip: ` name × │` per tab, then ` + `.
///
/// Rendering and mouse hit-testing both use this, so they cannot disagree.
pub fn tab_strip_layout(tabs: &[Tab]) -> Vec<TabStripItem> {
    let mut items = Vec::with_capacity(tabs.len() * 2 + 1);
    let mut x: u16 = 0;
    for tab in tabs {
        let label_width = u16::try_from(tab.name().width() + 2).unwrap_or(u16::MAX);
        items.push(TabStripItem {
            x,
            width: label_width,
            hit: TabStripHit::Activate(tab.id()),
        });
        x = x.saturating_add(label_width);
        items.push(TabStripItem {
            x,
            width: 2,
            hit: TabStripHit::Close(tab.id()),
        });
        x = x.saturating_add(2 + 1);
    }
    items.push(TabStripItem {
        x,
        width: 3,
        hit: TabStripHit::NewFile,
    });
    items
}

/// Region under `column`, if any.
pub fn tab_strip_hit(tabs: &[Tab], column: u16) -> Option<TabStripHit> {
    tab_strip_layout(tabs)
        .into_iter()
        .find(|item| item.contains(column))
        .map(|item| item.hit)
}

pub(super) fn render_tab_strip(model: &Model, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for tab in model.session.tabs() {
        let style = if tab.is_active() {
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", tab.name()), style));
        spans.push(Span::styled(CLOSE_LABEL, style.remove_modifier(Modifier::BOLD)));
        spans.push(Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray)));
    }
    spans.push(Span::styled(
        NEW_FILE_LABEL,
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ));

    let strip = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(strip, area);
}
