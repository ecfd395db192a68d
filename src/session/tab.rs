use std::fmt;

use serde::Serialize;

use crate::editor::Buffer;

/// Opaque tab identifier, unique within a session and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TabId(u64);

impl TabId {
    pub(super) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the underlying numeric id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named session slot wrapping one buffer.
#[derive(Debug, Clone)]
pub struct Tab {
    id: TabId,
    name: String,
    order: u64,
    active: bool,
    buffer: Buffer,
}

impl Tab {
    pub(super) fn new(id: TabId, name: String, order: u64) -> Self {
        let buffer = Buffer::for_file_name(&name);
        Self {
            id,
            name,
            order,
            active: false,
            buffer,
        }
    }

    pub const fn id(&self) -> TabId {
        self.id
    }

    /// Display name; unique across the session.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display-order hint assigned at creation. Never renumbered.
    pub const fn order(&self) -> u64 {
        self.order
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub(super) const fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub(super) const fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    /// Read-only summary for the tab strip.
    pub fn summary(&self) -> TabSummary {
        TabSummary {
            id: self.id,
            name: self.name.clone(),
            order: self.order,
            active: self.active,
        }
    }
}

/// What the tab strip needs to draw one tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabSummary {
    pub id: TabId,
    pub name: String,
    pub order: u64,
    pub active: bool,
}
