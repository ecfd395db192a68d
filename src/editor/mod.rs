//! Buffer editing engine.
//!
//! Provides the per-document text buffer with UTF-16 selection offsets,
//! the edit rules layered on top of raw input (bracket auto-closing and
//! Tab indentation), and the default behaviour of the input surface.

mod buffer;
mod engine;
pub mod surface;

pub use buffer::{Buffer, Selection, byte_index, char_before, language_id_for, utf16_len};
pub use engine::{EditingEngine, IndentUnit, Key, KeyOutcome, TextChange, closing_delimiter};
pub use surface::Motion;
