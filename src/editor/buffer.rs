use serde::Serialize;

/// Caret or selected range in an editor buffer.
///
/// Offsets are zero-based UTF-16 code units, matching what a text input
/// surface reports. `anchor == cursor` is a plain caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Selection {
    /// Where the selection started.
    pub anchor: usize,
    /// Where the caret currently is.
    pub cursor: usize,
}

impl Selection {
    /// A caret with no range selected.
    pub const fn caret(offset: usize) -> Self {
        Self {
            anchor: offset,
            cursor: offset,
        }
    }

    /// A range from `anchor` to `cursor`.
    pub const fn new(anchor: usize, cursor: usize) -> Self {
        Self { anchor, cursor }
    }

    /// Whether this is a caret (empty range).
    pub const fn is_caret(&self) -> bool {
        self.anchor == self.cursor
    }

    /// Lower bound of the range.
    pub const fn start(&self) -> usize {
        if self.anchor < self.cursor {
            self.anchor
        } else {
            self.cursor
        }
    }

    /// Upper bound of the range.
    pub const fn end(&self) -> usize {
        if self.anchor > self.cursor {
            self.anchor
        } else {
            self.cursor
        }
    }

    /// Number of code units covered by the range.
    pub const fn len(&self) -> usize {
        self.end() - self.start()
    }

    /// Clamp both ends to `max`.
    pub const fn clamped(self, max: usize) -> Self {
        Self {
            anchor: if self.anchor > max { max } else { self.anchor },
            cursor: if self.cursor > max { max } else { self.cursor },
        }
    }
}

/// Text content and selection for one open document.
///
/// Every edit replaces the whole text with a new snapshot; there is no
/// rope or piece table underneath.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    text: String,
    language_id: String,
    selection: Selection,
}

impl Buffer {
    /// Create an empty buffer highlighted as `language_id`.
    pub fn new(language_id: impl Into<String>) -> Self {
        Self::with_text("", language_id)
    }

    /// Create a buffer from existing text with the caret at the start.
    pub fn with_text(text: impl Into<String>, language_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language_id: language_id.into(),
            selection: Selection::default(),
        }
    }

    /// Create an empty buffer whose language is taken from `file_name`.
    pub fn for_file_name(file_name: &str) -> Self {
        Self::new(language_id_for(file_name))
    }

    /// The full text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Grammar id handed to the highlighter.
    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    /// The current caret/selection.
    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// Length of the text in UTF-16 code units.
    pub fn len_utf16(&self) -> usize {
        utf16_len(&self.text)
    }

    /// Replace text and selection with a new snapshot.
    ///
    /// The selection is clamped to the new text length.
    pub fn set_state(&mut self, text: String, selection: Selection) {
        let max = utf16_len(&text);
        self.text = text;
        self.selection = selection.clamped(max);
    }

    /// Move the selection without touching the text.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamped(self.len_utf16());
    }

    /// Number of lines (an empty buffer has one line).
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Zero-based line and UTF-16 column of `offset`.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        let mut pos = 0;
        for ch in self.text.chars() {
            if pos >= offset {
                break;
            }
            pos += ch.len_utf16();
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += ch.len_utf16();
            }
        }
        (line, col)
    }

    /// UTF-16 offset of the first character of `line`.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        if line == 0 {
            return Some(0);
        }
        let mut seen = 0;
        let mut pos = 0;
        for ch in self.text.chars() {
            pos += ch.len_utf16();
            if ch == '\n' {
                seen += 1;
                if seen == line {
                    return Some(pos);
                }
            }
        }
        None
    }

    /// Length of `line` in UTF-16 code units, without its newline.
    pub fn line_len(&self, line: usize) -> usize {
        self.text.split('\n').nth(line).map_or(0, utf16_len)
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("text", &format_args!("Text({} lines)", self.line_count()))
            .field("language_id", &self.language_id)
            .field("selection", &self.selection)
            .finish()
    }
}

/// Language id for a file name: everything after the first `.`.
///
/// Names without a `.` map to an empty id, which highlights as plain text.
pub fn language_id_for(file_name: &str) -> &str {
    file_name.split_once('.').map_or("", |(_, ext)| ext)
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Byte index in `text` for a UTF-16 offset.
///
/// Offsets past the end clamp to `text.len()`; an offset that falls between
/// the halves of a surrogate pair rounds down to the start of that character.
pub fn byte_index(text: &str, offset: usize) -> usize {
    let mut pos = 0;
    for (idx, ch) in text.char_indices() {
        if pos + ch.len_utf16() > offset {
            return idx;
        }
        pos += ch.len_utf16();
    }
    text.len()
}

/// The character that ends right at UTF-16 `offset`, if any.
pub fn char_before(text: &str, offset: usize) -> Option<char> {
    text[..byte_index(text, offset)].chars().next_back()
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Selection ---

    #[test]
    fn test_caret_is_empty_range() {
        let sel = Selection::caret(4);
        assert!(sel.is_caret());
        assert_eq!(sel.len(), 0);
        assert_eq!(sel.start(), 4);
        assert_eq!(sel.end(), 4);
    }

    #[test]
    fn test_backward_selection_orders_bounds() {
        let sel = Selection::new(7, 2);
        assert!(!sel.is_caret());
        assert_eq!(sel.start(), 2);
        assert_eq!(sel.end(), 7);
        assert_eq!(sel.len(), 5);
    }

    #[test]
    fn test_clamped_limits_both_ends() {
        assert_eq!(Selection::new(3, 10).clamped(5), Selection::new(3, 5));
    }

    // --- Construction ---

    #[test]
    fn test_new_buffer_is_empty_with_caret_at_zero() {
        let buf = Buffer::new("rs");
        assert_eq!(buf.text(), "");
        assert_eq!(buf.language_id(), "rs");
        assert_eq!(buf.selection(), Selection::caret(0));
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn test_for_file_name_derives_language() {
        let buf = Buffer::for_file_name("page.tsx");
        assert_eq!(buf.language_id(), "tsx");
    }

    #[test]
    fn test_language_id_uses_text_after_first_dot() {
        assert_eq!(language_id_for("main.rs"), "rs");
        assert_eq!(language_id_for("app.test.tsx"), "test.tsx");
        assert_eq!(language_id_for("Makefile"), "");
        assert_eq!(language_id_for(".env"), "env");
    }

    // --- State replacement ---

    #[test]
    fn test_set_state_clamps_selection() {
        let mut buf = Buffer::new("txt");
        buf.set_state("abc".to_string(), Selection::caret(10));
        assert_eq!(buf.selection(), Selection::caret(3));
    }

    #[test]
    fn test_set_selection_keeps_text() {
        let mut buf = Buffer::with_text("hello", "txt");
        buf.set_selection(Selection::new(1, 4));
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.selection(), Selection::new(1, 4));
    }

    // --- UTF-16 arithmetic ---

    #[test]
    fn test_utf16_len_counts_surrogate_pairs_as_two() {
        assert_eq!(utf16_len("a😀b"), 4);
        assert_eq!(utf16_len("café"), 4);
    }

    #[test]
    fn test_byte_index_maps_utf16_offsets() {
        let text = "é😀x";
        assert_eq!(byte_index(text, 0), 0);
        assert_eq!(byte_index(text, 1), 2);
        assert_eq!(byte_index(text, 3), 6);
        assert_eq!(byte_index(text, 4), 7);
    }

    #[test]
    fn test_byte_index_inside_surrogate_pair_rounds_down() {
        assert_eq!(byte_index("😀", 1), 0);
    }

    #[test]
    fn test_byte_index_past_end_clamps() {
        assert_eq!(byte_index("ab", 99), 2);
    }

    #[test]
    fn test_char_before() {
        assert_eq!(char_before("a(b", 2), Some('('));
        assert_eq!(char_before("a(b", 0), None);
        assert_eq!(char_before("😀(", 3), Some('('));
    }

    // --- Line queries ---

    #[test]
    fn test_line_col_tracks_newlines() {
        let buf = Buffer::with_text("ab\ncd\n", "txt");
        assert_eq!(buf.line_col(0), (0, 0));
        assert_eq!(buf.line_col(2), (0, 2));
        assert_eq!(buf.line_col(3), (1, 0));
        assert_eq!(buf.line_col(5), (1, 2));
        assert_eq!(buf.line_col(6), (2, 0));
    }

    #[test]
    fn test_line_start_and_len() {
        let buf = Buffer::with_text("one\nthree\n", "txt");
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.line_start(0), Some(0));
        assert_eq!(buf.line_start(1), Some(4));
        assert_eq!(buf.line_start(2), Some(10));
        assert_eq!(buf.line_start(3), None);
        assert_eq!(buf.line_len(1), 5);
        assert_eq!(buf.line_len(2), 0);
    }
}
