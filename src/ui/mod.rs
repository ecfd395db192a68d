//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - the screen layout (header, tab strip, editor surface, status bar)
//! - the highlighted editor surface with caret and selection
//! - the new-file prompt and name-conflict dialogs

mod overlays;
mod render;
mod status;
mod tab_strip;

pub use overlays::{CONFLICT_MESSAGE, CONFLICT_TITLE, NEW_FILE_HINT, NEW_FILE_TITLE};
pub use render::{
    EMPTY_HINT, HEADER_TITLE, ScreenRows, editor_offset_at, line_number_width, render, screen_rows,
};
pub use tab_strip::{TabStripHit, TabStripItem, tab_strip_hit, tab_strip_layout};

/// Columns a tab character occupies in the editor surface.
pub const TAB_DISPLAY_WIDTH: usize = 4;
