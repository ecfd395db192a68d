use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};
use crate::editor::{Key, Motion};
use crate::ui::TabStripHit;

impl App {
    pub(super) fn handle_event(event: Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(key, model),
            Event::Mouse(mouse) => Self::handle_mouse(mouse, model),
            Event::Paste(text) => Self::handle_paste(text, model),
            Event::Resize(width, height) => Some(Message::Resize(width, height)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.conflict_visible {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc => Some(Message::DismissConflict),
                _ => None,
            };
        }
        if let Some(input) = model.new_file_prompt.as_deref() {
            return Self::handle_prompt_key(key, input);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Char('q') if ctrl && !alt => Some(Message::Quit),
            KeyCode::Char('n') if ctrl && !alt => Some(Message::OpenNewFilePrompt),
            KeyCode::Char('w') if ctrl && !alt => Some(Message::CloseActiveTab),
            KeyCode::PageDown if ctrl => Some(Message::NextTab),
            KeyCode::PageUp if ctrl => Some(Message::PrevTab),
            KeyCode::Right if alt => Some(Message::NextTab),
            KeyCode::Left if alt => Some(Message::PrevTab),

            KeyCode::Home if ctrl => Some(Message::MoveCaret(Motion::BufferStart, shift)),
            KeyCode::End if ctrl => Some(Message::MoveCaret(Motion::BufferEnd, shift)),
            KeyCode::Left => Some(Message::MoveCaret(Motion::Left, shift)),
            KeyCode::Right => Some(Message::MoveCaret(Motion::Right, shift)),
            KeyCode::Up => Some(Message::MoveCaret(Motion::Up, shift)),
            KeyCode::Down => Some(Message::MoveCaret(Motion::Down, shift)),
            KeyCode::Home => Some(Message::MoveCaret(Motion::LineStart, shift)),
            KeyCode::End => Some(Message::MoveCaret(Motion::LineEnd, shift)),

            KeyCode::Tab if !ctrl && !alt => Some(Message::KeyDown(Key::Tab)),
            KeyCode::Enter => Some(Message::KeyDown(Key::Enter)),
            KeyCode::Backspace => Some(Message::KeyDown(Key::Backspace)),
            KeyCode::Delete => Some(Message::KeyDown(Key::Delete)),
            // AltGr arrives as Ctrl+Alt on some platforms and still types.
            KeyCode::Char(c) if ctrl == alt => Some(Message::KeyDown(Key::Char(c))),
            _ => None,
        }
    }

    fn handle_prompt_key(key: KeyEvent, input: &str) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Esc => Some(Message::PromptCancel),
            KeyCode::Enter => Some(Message::PromptSubmit),
            KeyCode::Backspace => {
                let mut next = input.to_string();
                next.pop();
                Some(Message::PromptInput(next))
            }
            KeyCode::Char(c) if ctrl == alt => Some(Message::PromptInput(format!("{input}{c}"))),
            _ => None,
        }
    }

    fn handle_paste(text: String, model: &Model) -> Option<Message> {
        if model.conflict_visible {
            return None;
        }
        if let Some(input) = model.new_file_prompt.as_deref() {
            let pasted: String = text.chars().filter(|c| !c.is_control()).collect();
            return Some(Message::PromptInput(format!("{input}{pasted}")));
        }
        Some(Message::Paste(text))
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.modal_open() {
            return None;
        }

        let (width, height) = model.terminal_size;
        let area = Rect::new(0, 0, width, height);
        let rows = crate::ui::screen_rows(area);
        let on_tab_strip = rows.tabs.height > 0 && mouse.row == rows.tabs.y;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if on_tab_strip => {
                match crate::ui::tab_strip_hit(model.session.tabs(), mouse.column)? {
                    TabStripHit::Activate(id) => Some(Message::RequestTabActivate(id)),
                    TabStripHit::Close(id) => Some(Message::RequestTabClose(id)),
                    TabStripHit::NewFile => Some(Message::OpenNewFilePrompt),
                }
            }
            MouseEventKind::Down(MouseButton::Middle) if on_tab_strip => {
                match crate::ui::tab_strip_hit(model.session.tabs(), mouse.column)? {
                    TabStripHit::Activate(id) | TabStripHit::Close(id) => {
                        Some(Message::RequestTabClose(id))
                    }
                    TabStripHit::NewFile => None,
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                crate::ui::editor_offset_at(model, area, mouse.column, mouse.row)
                    .map(Message::PlaceCaret)
            }
            MouseEventKind::ScrollUp => Some(Message::MoveCaret(Motion::Up, false)),
            MouseEventKind::ScrollDown => Some(Message::MoveCaret(Motion::Down, false)),
            _ => None,
        }
    }
}
