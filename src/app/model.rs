use crate::editor::{Buffer, EditingEngine, IndentUnit};
use crate::session::Session;

/// Rows taken by the header, the tab strip and the status bar.
pub const CHROME_ROWS: u16 = 3;

/// Whether the new-file prompt may submit `name`.
///
/// Names need a `.` separating the base name from the language extension;
/// without one the create affordance stays inert.
pub fn is_valid_file_name(name: &str) -> bool {
    name.contains('.')
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Open tabs and the active-tab invariant
    pub session: Session,
    /// Edit rules for the active buffer
    pub engine: EditingEngine,
    /// Raised when a create request hit an existing name; cleared by dismissing
    pub conflict_visible: bool,
    /// Text typed into the new-file prompt, `None` when the prompt is closed
    pub new_file_prompt: Option<String>,
    /// Line index of the first visible editor row
    pub editor_scroll_offset: usize,
    /// Terminal size (width, height)
    pub terminal_size: (u16, u16),
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("tabs", &self.session.len())
            .field("active", &self.session.active_id())
            .field("conflict_visible", &self.conflict_visible)
            .field("prompt_open", &self.new_file_prompt.is_some())
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model with an empty session.
    pub fn new(indent: IndentUnit, terminal_size: (u16, u16)) -> Self {
        Self {
            session: Session::new(),
            engine: EditingEngine::new(indent),
            conflict_visible: false,
            new_file_prompt: None,
            editor_scroll_offset: 0,
            terminal_size,
            should_quit: false,
        }
    }

    /// The buffer shown in the editor surface.
    pub fn active_buffer(&self) -> Option<&Buffer> {
        self.session.active().map(crate::session::Tab::buffer)
    }

    /// Number of text rows available to the editor surface.
    pub const fn editor_rows(&self) -> usize {
        self.terminal_size.1.saturating_sub(CHROME_ROWS) as usize
    }

    /// Whether a modal dialog currently owns keyboard input.
    pub const fn modal_open(&self) -> bool {
        self.conflict_visible || self.new_file_prompt.is_some()
    }

    /// Scroll so the caret line is inside the editor rows.
    pub(super) fn ensure_cursor_visible(&mut self) {
        let Some(buffer) = self.active_buffer() else {
            self.editor_scroll_offset = 0;
            return;
        };
        let (cursor_line, _) = buffer.line_col(buffer.selection().cursor);
        let visible_height = self.editor_rows();
        if visible_height == 0 {
            self.editor_scroll_offset = cursor_line;
            return;
        }

        if cursor_line < self.editor_scroll_offset {
            self.editor_scroll_offset = cursor_line;
        } else if cursor_line >= self.editor_scroll_offset + visible_height {
            self.editor_scroll_offset = cursor_line + 1 - visible_height;
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(IndentUnit::default(), (80, 24))
    }
}
