//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use model::{CHROME_ROWS, Model, is_valid_file_name};
pub use update::{Message, update};

use tracing::warn;

use crate::editor::IndentUnit;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    indent: IndentUnit,
    file_names: Vec<String>,
}

impl App {
    /// Create an application with no files open.
    pub fn new() -> Self {
        Self {
            indent: IndentUnit::default(),
            file_names: Vec::new(),
        }
    }

    /// Set the indentation inserted by the Tab key.
    pub const fn with_indent(mut self, indent: IndentUnit) -> Self {
        self.indent = indent;
        self
    }

    /// Open a tab for each name at startup. The last one becomes active.
    pub fn with_file_names(mut self, file_names: Vec<String>) -> Self {
        self.file_names = file_names;
        self
    }

    /// Build the model the event loop starts from.
    ///
    /// Startup names that collide with an earlier one are skipped.
    pub fn initial_model(&self, terminal_size: (u16, u16)) -> Model {
        let mut model = Model::new(self.indent, terminal_size);
        for name in &self.file_names {
            if let Err(err) = model.session.create(name) {
                warn!(%err, "skipping startup file");
            }
        }
        model.ensure_cursor_visible();
        model
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
