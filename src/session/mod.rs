//! Multi-document session.
//!
//! A [`Session`] owns the ordered list of open [`Tab`]s and keeps exactly one
//! of them active whenever the list is non-empty. Only the active tab's buffer
//! can be edited; inactive buffers are frozen until their tab is activated.

mod tab;

pub use tab::{Tab, TabId, TabSummary};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::editor::{Buffer, Selection};

/// Failures of session operations. None of them change session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A tab with exactly this name is already open.
    #[error("a file named {name:?} is already open")]
    NameConflict { name: String },
    /// No tab has this id.
    #[error("no open tab with id {0}")]
    NotFound(TabId),
}

/// The set of open tabs.
#[derive(Debug, Default)]
pub struct Session {
    tabs: Vec<Tab>,
    next_id: u64,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open tabs in list order.
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id() == id)
    }

    /// Exact, case-sensitive name lookup.
    pub fn contains_name(&self, name: &str) -> bool {
        self.tabs.iter().any(|tab| tab.name() == name)
    }

    /// The active tab, if the session is non-empty.
    pub fn active(&self) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.is_active())
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.active().map(Tab::id)
    }

    /// Position of the active tab in list order.
    pub fn active_index(&self) -> Option<usize> {
        self.tabs.iter().position(Tab::is_active)
    }

    /// The only buffer that may be edited.
    pub fn active_buffer_mut(&mut self) -> Option<&mut Buffer> {
        self.tabs
            .iter_mut()
            .find(|tab| tab.is_active())
            .map(Tab::buffer_mut)
    }

    /// Open a new, empty tab named `file_name` and make it active.
    ///
    /// The language id is the part of the name after the first `.`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NameConflict`] if a tab with the same name is
    /// already open; the session is left untouched.
    pub fn create(&mut self, file_name: &str) -> Result<TabId, SessionError> {
        if self.contains_name(file_name) {
            debug!(name = file_name, "name conflict, tab not created");
            return Err(SessionError::NameConflict {
                name: file_name.to_string(),
            });
        }

        self.next_id += 1;
        let id = TabId::new(self.next_id);
        let order = self.tabs.iter().map(Tab::order).max().unwrap_or(0) + 1;
        let tab = Tab::new(id, file_name.to_string(), order);
        info!(%id, name = file_name, order, language = tab.buffer().language_id(), "tab created");
        self.tabs.push(tab);

        self.activate(id)?;
        Ok(id)
    }

    /// Make `id` the single active tab.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] if no tab has that id.
    pub fn activate(&mut self, id: TabId) -> Result<(), SessionError> {
        if self.get(id).is_none() {
            return Err(SessionError::NotFound(id));
        }
        for tab in &mut self.tabs {
            tab.set_active(tab.id() == id);
        }
        debug!(%id, "tab activated");
        self.repair();
        Ok(())
    }

    /// Close `id`, returning the removed tab. Unknown ids are ignored.
    ///
    /// Closing the active tab activates the first remaining tab. Survivors
    /// keep their ids and `order` values.
    pub fn close(&mut self, id: TabId) -> Option<Tab> {
        let idx = self.tabs.iter().position(|tab| tab.id() == id)?;
        let tab = self.tabs.remove(idx);
        info!(%id, name = tab.name(), was_active = tab.is_active(), "tab closed");
        self.repair();
        Some(tab)
    }

    /// Store an edit in the active buffer. Ignored when the session is empty.
    pub fn set_active_text(&mut self, text: String, selection: Selection) {
        if let Some(buffer) = self.active_buffer_mut() {
            buffer.set_state(text, selection);
        }
    }

    /// Read-only state for one render.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tabs: self.tabs.iter().map(Tab::summary).collect(),
            active: self.active().map(|tab| BufferSnapshot::from(tab.buffer())),
        }
    }

    /// Restore the single-active invariant: keep the first active tab, or
    /// activate the first tab if none is.
    fn repair(&mut self) {
        if self.tabs.is_empty() {
            return;
        }
        let keep = self.active_index().unwrap_or(0);
        let mut changed = false;
        for (idx, tab) in self.tabs.iter_mut().enumerate() {
            let active = idx == keep;
            if tab.is_active() != active {
                tab.set_active(active);
                changed = true;
            }
        }
        if changed {
            debug!(id = %self.tabs[keep].id(), "active tab repaired");
        }
    }
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub tabs: Vec<TabSummary>,
    pub active: Option<BufferSnapshot>,
}

/// The active buffer as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BufferSnapshot {
    pub text: String,
    pub selection: Selection,
    pub language_id: String,
}

impl From<&Buffer> for BufferSnapshot {
    fn from(buffer: &Buffer) -> Self {
        Self {
            text: buffer.text().to_string(),
            selection: buffer.selection(),
            language_id: buffer.language_id().to_string(),
        }
    }
}
