use tracing::{debug, warn};

use crate::app::Model;
use crate::app::model::is_valid_file_name;
use crate::editor::{Key, KeyOutcome, Motion, Selection, TextChange, surface};
use crate::session::{SessionError, TabId};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Tabs
    /// Make a tab the active one
    RequestTabActivate(TabId),
    /// Close a tab, active or not
    RequestTabClose(TabId),
    /// Close whichever tab is active
    CloseActiveTab,
    /// Activate the tab after the active one, wrapping around
    NextTab,
    /// Activate the tab before the active one, wrapping around
    PrevTab,
    /// Open a new empty tab with the given file name
    RequestFileCreate(String),
    /// Hide the name-conflict dialog
    DismissConflict,

    // New-file prompt
    /// Show the new-file prompt with empty input
    OpenNewFilePrompt,
    /// Replace the prompt's input text
    PromptInput(String),
    /// Create a file from the prompt input
    PromptSubmit,
    /// Close the prompt without creating anything
    PromptCancel,

    // Editing
    /// A key reached the editor surface
    KeyDown(Key),
    /// The input surface reported a new text and selection
    TextChanged(TextChange),
    /// Text pasted into the editor surface
    Paste(String),
    /// Move the caret, extending the selection when the flag is set
    MoveCaret(Motion, bool),
    /// Place a caret at a UTF-16 offset (mouse click)
    PlaceCaret(usize),

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Quit the application
    Quit,
}

/// Pure function that computes the next state from the current state and a message.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Tabs
        Message::RequestTabActivate(id) => activate_tab(&mut model, id),
        Message::RequestTabClose(id) => close_tab(&mut model, id),
        Message::CloseActiveTab => {
            if let Some(id) = model.session.active_id() {
                close_tab(&mut model, id);
            }
        }
        Message::NextTab => cycle_tab(&mut model, true),
        Message::PrevTab => cycle_tab(&mut model, false),
        Message::RequestFileCreate(name) => create_file(&mut model, &name),
        Message::DismissConflict => {
            model.conflict_visible = false;
        }

        // New-file prompt
        Message::OpenNewFilePrompt => {
            model.new_file_prompt = Some(String::new());
        }
        Message::PromptInput(text) => {
            if model.new_file_prompt.is_some() {
                model.new_file_prompt = Some(text);
            }
        }
        Message::PromptSubmit => {
            // An invalid name keeps the prompt open and does nothing.
            if let Some(name) = model.new_file_prompt.take_if(|name| is_valid_file_name(name)) {
                create_file(&mut model, &name);
            }
        }
        Message::PromptCancel => {
            model.new_file_prompt = None;
        }

        // Editing
        Message::KeyDown(key) => handle_key_down(&mut model, key),
        Message::TextChanged(change) => {
            if let Some(buffer) = model.session.active_buffer_mut() {
                model.engine.text_changed(buffer, change);
            }
            model.ensure_cursor_visible();
        }
        Message::Paste(text) => {
            if let Some(buffer) = model.session.active_buffer_mut() {
                model.engine.key_down(buffer, Key::Other);
                let change = surface::insert(buffer, &text);
                model.engine.text_changed(buffer, change);
            }
            model.ensure_cursor_visible();
        }
        Message::MoveCaret(motion, extend) => {
            if let Some(buffer) = model.session.active_buffer_mut() {
                model.engine.key_down(buffer, Key::Other);
                let selection = surface::move_selection(buffer, motion, extend);
                buffer.set_selection(selection);
            }
            model.ensure_cursor_visible();
        }
        Message::PlaceCaret(offset) => {
            if let Some(buffer) = model.session.active_buffer_mut() {
                buffer.set_selection(Selection::caret(offset));
            }
        }

        // Window
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.ensure_cursor_visible();
        }
        Message::Quit => {
            model.should_quit = true;
        }
    }

    model
}

/// Route a key through the edit rules, falling back to the surface's
/// default handling when the engine passes it through.
fn handle_key_down(model: &mut Model, key: Key) {
    let Some(buffer) = model.session.active_buffer_mut() else {
        return;
    };
    if model.engine.key_down(buffer, key) == KeyOutcome::PassThrough {
        let mut utf8 = [0; 4];
        let change = match key {
            Key::Char(ch) => Some(surface::insert(buffer, ch.encode_utf8(&mut utf8))),
            Key::Enter => Some(surface::insert(buffer, "\n")),
            Key::Backspace => surface::delete_backward(buffer),
            Key::Delete => surface::delete_forward(buffer),
            // A Tab over a range would move focus in a richer host; here it
            // has nowhere to go.
            Key::Tab | Key::Other => None,
        };
        if let Some(change) = change {
            model.engine.text_changed(buffer, change);
        }
    }
    model.ensure_cursor_visible();
}

fn create_file(model: &mut Model, name: &str) {
    match model.session.create(name) {
        Ok(_) => {
            model.engine.reset();
            model.editor_scroll_offset = 0;
        }
        Err(SessionError::NameConflict { name }) => {
            debug!(name, "showing name conflict dialog");
            model.conflict_visible = true;
        }
        Err(err) => warn!(%err, "create failed"),
    }
}

fn activate_tab(model: &mut Model, id: TabId) {
    if model.session.active_id() == Some(id) {
        return;
    }
    match model.session.activate(id) {
        Ok(()) => {
            model.engine.reset();
            model.editor_scroll_offset = 0;
            model.ensure_cursor_visible();
        }
        Err(err) => warn!(%err, "activate ignored"),
    }
}

fn close_tab(model: &mut Model, id: TabId) {
    let Some(closed) = model.session.close(id) else {
        warn!(%id, "close ignored, tab not open");
        return;
    };
    if closed.is_active() {
        model.engine.reset();
        model.editor_scroll_offset = 0;
        model.ensure_cursor_visible();
    }
}

fn cycle_tab(model: &mut Model, forward: bool) {
    let len = model.session.len();
    let Some(current) = model.session.active_index() else {
        return;
    };
    if len < 2 {
        return;
    }
    let next = if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    };
    let id = model.session.tabs()[next].id();
    activate_tab(model, id);
}
