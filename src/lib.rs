// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. session::SessionError)
    clippy::module_name_repetitions
)]

//! # Prodios
//!
//! A terminal code editor with tabs.
//!
//! Prodios edits several in-memory files side by side with:
//! - A tab strip with exactly one active tab
//! - Syntax highlighting chosen from the file extension
//! - Bracket auto-closing and Tab-key indentation
//! - Name-conflict detection when creating files
//!
//! ## Architecture
//!
//! Prodios uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`editor`]: Buffers, selections and edit rules
//! - [`session`]: Open tabs and the active-tab invariant
//! - [`highlight`]: Syntax highlighting
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved flag defaults

pub mod app;
pub mod config;
pub mod editor;
pub mod highlight;
pub mod session;
pub mod ui;

/// Commonly used types.
pub mod prelude {
    pub use crate::app::{App, Message, Model, update};
    pub use crate::editor::{Buffer, EditingEngine, IndentUnit, Key, Selection, TextChange};
    pub use crate::session::{Session, SessionError, SessionSnapshot, Tab, TabId};
}
