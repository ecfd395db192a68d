//! Edit rules applied on top of the input surface.
//!
//! The surface performs the raw edit and reports the resulting text and
//! selection; the engine then post-processes it (bracket auto-closing) or
//! intercepts a key before the surface sees it (Tab indentation).

use std::fmt;

use tracing::debug;

use super::buffer::{Buffer, Selection, byte_index, char_before, utf16_len};

/// Identity of a key pressed on the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    /// Navigation and anything else that does not edit text.
    Other,
}

impl Key {
    /// Whether this key removes text.
    pub const fn is_deletion(self) -> bool {
        matches!(self, Self::Backspace | Self::Delete)
    }
}

/// What one press of Tab inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentUnit {
    /// A run of this many spaces.
    Spaces(usize),
    /// A single tab character.
    Tab,
}

impl IndentUnit {
    /// The literal text inserted for one indentation step.
    pub fn text(self) -> String {
        match self {
            Self::Spaces(width) => " ".repeat(width),
            Self::Tab => "\t".to_string(),
        }
    }
}

impl Default for IndentUnit {
    fn default() -> Self {
        Self::Spaces(2)
    }
}

impl fmt::Display for IndentUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spaces(width) => write!(f, "Spaces: {width}"),
            Self::Tab => f.write_str("Tabs"),
        }
    }
}

/// Raw edit reported by the input surface after it already happened there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    pub text: String,
    pub selection: Selection,
}

impl TextChange {
    pub fn new(text: impl Into<String>, selection: Selection) -> Self {
        Self {
            text: text.into(),
            selection,
        }
    }
}

/// Result of offering a key-down to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The engine edited the buffer; the surface must not apply its default.
    Handled,
    /// The surface's default behaviour applies.
    PassThrough,
}

/// Closing delimiter for an auto-closed opener.
///
/// Quotes are deliberately absent: only bracket pairs auto-close.
pub const fn closing_delimiter(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '{' => Some('}'),
        '[' => Some(']'),
        _ => None,
    }
}

/// Per-buffer edit rules.
///
/// The only state carried between events is the most recent key, used to
/// keep auto-closing from firing right after a deletion.
#[derive(Debug, Clone, Default)]
pub struct EditingEngine {
    indent: IndentUnit,
    last_key: Option<Key>,
}

impl EditingEngine {
    pub const fn new(indent: IndentUnit) -> Self {
        Self {
            indent,
            last_key: None,
        }
    }

    pub const fn indent(&self) -> IndentUnit {
        self.indent
    }

    /// The most recent key seen by [`Self::key_down`].
    pub const fn last_key(&self) -> Option<Key> {
        self.last_key
    }

    /// Forget the last key, e.g. when another buffer becomes active.
    pub const fn reset(&mut self) {
        self.last_key = None;
    }

    /// Handle a key before the input surface applies it.
    ///
    /// Every key is recorded. Tab with a caret inserts one indentation unit
    /// and is consumed; Tab over a range and all other keys pass through.
    pub fn key_down(&mut self, buffer: &mut Buffer, key: Key) -> KeyOutcome {
        self.last_key = Some(key);
        if key != Key::Tab {
            return KeyOutcome::PassThrough;
        }

        let selection = buffer.selection();
        if !selection.is_caret() {
            return KeyOutcome::PassThrough;
        }

        let indent = self.indent.text();
        let at = byte_index(buffer.text(), selection.cursor);
        let mut text = String::with_capacity(buffer.text().len() + indent.len());
        text.push_str(&buffer.text()[..at]);
        text.push_str(&indent);
        text.push_str(&buffer.text()[at..]);

        let caret = selection.cursor + utf16_len(&indent);
        debug!(offset = selection.cursor, unit = %self.indent, "indentation inserted");
        buffer.set_state(text, Selection::caret(caret));
        KeyOutcome::Handled
    }

    /// Accept a raw edit from the input surface and store it in `buffer`.
    ///
    /// If the character just before the caret opens a bracket pair and the
    /// last key was not a deletion, the matching closer is spliced in at the
    /// caret. The selection stays as reported, so the closer sits after the
    /// caret. Returns whether a closer was inserted.
    pub fn text_changed(&mut self, buffer: &mut Buffer, change: TextChange) -> bool {
        let TextChange {
            mut text,
            selection,
        } = change;
        let caret = selection.start();

        let closer = char_before(&text, caret).and_then(closing_delimiter);
        let after_deletion = self.last_key.is_some_and(Key::is_deletion);

        let auto_closed = match closer {
            Some(closer) if !after_deletion => {
                let at = byte_index(&text, caret);
                text.insert(at, closer);
                debug!(offset = caret, %closer, "auto-closed bracket");
                true
            }
            _ => false,
        };

        buffer.set_state(text, selection);
        auto_closed
    }
}
