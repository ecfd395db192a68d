//! Default behaviour of the input surface.
//!
//! A terminal has no native text area, so these functions stand in for one:
//! they perform the raw edit a text area would and report the result as a
//! [`TextChange`] for the [`EditingEngine`](super::EditingEngine) to
//! post-process. Caret movement only produces a new [`Selection`].

use super::buffer::{Buffer, Selection, byte_index, char_before, utf16_len};
use super::engine::TextChange;

/// Caret movement on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    BufferStart,
    BufferEnd,
}

/// Insert `s`, replacing the selected range if there is one.
pub fn insert(buffer: &Buffer, s: &str) -> TextChange {
    let selection = buffer.selection();
    let text = splice(buffer.text(), selection.start(), selection.end(), s);
    TextChange::new(text, Selection::caret(selection.start() + utf16_len(s)))
}

/// Backspace: remove the selected range or the character before the caret.
///
/// Returns `None` when there is nothing to delete.
pub fn delete_backward(buffer: &Buffer) -> Option<TextChange> {
    let selection = buffer.selection();
    if !selection.is_caret() {
        return Some(delete_range(buffer, selection));
    }
    let prev = char_before(buffer.text(), selection.cursor)?;
    let start = selection.cursor.saturating_sub(prev.len_utf16());
    Some(delete_range(buffer, Selection::new(start, selection.cursor)))
}

/// Delete: remove the selected range or the character after the caret.
///
/// Returns `None` when there is nothing to delete.
pub fn delete_forward(buffer: &Buffer) -> Option<TextChange> {
    let selection = buffer.selection();
    if !selection.is_caret() {
        return Some(delete_range(buffer, selection));
    }
    let text = buffer.text();
    let next = text[byte_index(text, selection.cursor)..].chars().next()?;
    Some(delete_range(
        buffer,
        Selection::new(selection.cursor, selection.cursor + next.len_utf16()),
    ))
}

/// Where the selection ends up after `motion`.
///
/// With `extend` the anchor stays put (shift-selection). Without it,
/// Left/Right on a range collapse it to the corresponding edge.
pub fn move_selection(buffer: &Buffer, motion: Motion, extend: bool) -> Selection {
    let selection = buffer.selection();
    let text = buffer.text();

    if !extend && !selection.is_caret() {
        match motion {
            Motion::Left => return Selection::caret(selection.start()),
            Motion::Right => return Selection::caret(selection.end()),
            _ => {}
        }
    }

    let cursor = selection.cursor;
    let (line, col) = buffer.line_col(cursor);
    let target = match motion {
        Motion::Left => cursor - char_before(text, cursor).map_or(0, char::len_utf16),
        Motion::Right => {
            let next = text[byte_index(text, cursor)..].chars().next();
            cursor + next.map_or(0, char::len_utf16)
        }
        Motion::Up if line == 0 => 0,
        Motion::Up => column_on_line(buffer, line - 1, col),
        Motion::Down if line + 1 >= buffer.line_count() => buffer.len_utf16(),
        Motion::Down => column_on_line(buffer, line + 1, col),
        Motion::LineStart => buffer.line_start(line).unwrap_or(0),
        Motion::LineEnd => buffer.line_start(line).unwrap_or(0) + buffer.line_len(line),
        Motion::BufferStart => 0,
        Motion::BufferEnd => buffer.len_utf16(),
    };

    if extend {
        Selection::new(selection.anchor, target)
    } else {
        Selection::caret(target)
    }
}

fn delete_range(buffer: &Buffer, range: Selection) -> TextChange {
    let text = splice(buffer.text(), range.start(), range.end(), "");
    TextChange::new(text, Selection::caret(range.start()))
}

fn splice(text: &str, start: usize, end: usize, replacement: &str) -> String {
    let from = byte_index(text, start);
    let to = byte_index(text, end);
    let mut out = String::with_capacity(text.len() - (to - from) + replacement.len());
    out.push_str(&text[..from]);
    out.push_str(replacement);
    out.push_str(&text[to..]);
    out
}

/// Offset of `col` on `line`, clamped to the line and snapped to a char boundary.
fn column_on_line(buffer: &Buffer, line: usize, col: usize) -> usize {
    let start = buffer.line_start(line).unwrap_or(0);
    let raw = start + col.min(buffer.line_len(line));
    let text = buffer.text();
    utf16_len(&text[..byte_index(text, raw)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn buffer_at(text: &str, selection: Selection) -> Buffer {
        let mut buf = Buffer::with_text(text, "txt");
        buf.set_selection(selection);
        buf
    }

    // --- Insertion ---

    #[test]
    fn test_insert_at_caret() {
        let buf = buffer_at("hd", Selection::caret(1));
        let change = insert(&buf, "ello worl");
        assert_eq!(change.text, "hello world");
        assert_eq!(change.selection, Selection::caret(10));
    }

    #[test]
    fn test_insert_replaces_range() {
        let buf = buffer_at("hello world", Selection::new(11, 6));
        let change = insert(&buf, "there");
        assert_eq!(change.text, "hello there");
        assert_eq!(change.selection, Selection::caret(11));
    }

    #[test]
    fn test_insert_astral_advances_two_units() {
        let buf = buffer_at("", Selection::caret(0));
        let change = insert(&buf, "😀");
        assert_eq!(change.selection, Selection::caret(2));
    }

    // --- Deletion ---

    #[test]
    fn test_delete_backward_at_start_is_noop() {
        let buf = buffer_at("hello", Selection::caret(0));
        assert_eq!(delete_backward(&buf), None);
    }

    #[test]
    fn test_delete_backward_removes_previous_char() {
        let buf = buffer_at("hello", Selection::caret(5));
        let change = delete_backward(&buf).unwrap();
        assert_eq!(change.text, "hell");
        assert_eq!(change.selection, Selection::caret(4));
    }

    #[test]
    fn test_delete_backward_removes_whole_surrogate_pair() {
        let buf = buffer_at("a😀", Selection::caret(3));
        let change = delete_backward(&buf).unwrap();
        assert_eq!(change.text, "a");
        assert_eq!(change.selection, Selection::caret(1));
    }

    #[test]
    fn test_delete_backward_joins_lines() {
        let buf = buffer_at("hello\nworld", Selection::caret(6));
        let change = delete_backward(&buf).unwrap();
        assert_eq!(change.text, "helloworld");
        assert_eq!(change.selection, Selection::caret(5));
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let buf = buffer_at("hello", Selection::caret(5));
        assert_eq!(delete_forward(&buf), None);
    }

    #[test]
    fn test_delete_forward_removes_next_char() {
        let buf = buffer_at("hello", Selection::caret(0));
        let change = delete_forward(&buf).unwrap();
        assert_eq!(change.text, "ello");
        assert_eq!(change.selection, Selection::caret(0));
    }

    #[test]
    fn test_delete_removes_selected_range() {
        let buf = buffer_at("hello world", Selection::new(5, 11));
        assert_eq!(delete_backward(&buf).unwrap().text, "hello");
        assert_eq!(delete_forward(&buf).unwrap().text, "hello");
    }

    // --- Caret movement ---

    #[test]
    fn test_move_left_and_right() {
        let buf = buffer_at("abc", Selection::caret(1));
        assert_eq!(move_selection(&buf, Motion::Left, false), Selection::caret(0));
        assert_eq!(move_selection(&buf, Motion::Right, false), Selection::caret(2));
    }

    #[test]
    fn test_move_left_at_start_stays() {
        let buf = buffer_at("abc", Selection::caret(0));
        assert_eq!(move_selection(&buf, Motion::Left, false), Selection::caret(0));
    }

    #[test]
    fn test_move_right_steps_over_surrogate_pair() {
        let buf = buffer_at("😀x", Selection::caret(0));
        assert_eq!(move_selection(&buf, Motion::Right, false), Selection::caret(2));
    }

    #[test]
    fn test_left_right_collapse_range() {
        let buf = buffer_at("abcdef", Selection::new(4, 1));
        assert_eq!(move_selection(&buf, Motion::Left, false), Selection::caret(1));
        assert_eq!(move_selection(&buf, Motion::Right, false), Selection::caret(4));
    }

    #[test]
    fn test_extend_keeps_anchor() {
        let buf = buffer_at("abcdef", Selection::caret(2));
        assert_eq!(move_selection(&buf, Motion::Right, true), Selection::new(2, 3));
        assert_eq!(move_selection(&buf, Motion::LineEnd, true), Selection::new(2, 6));
    }

    #[test]
    fn test_move_up_down_keeps_column() {
        let buf = buffer_at("hello\nworld", Selection::caret(3));
        assert_eq!(move_selection(&buf, Motion::Down, false), Selection::caret(9));
        let buf = buffer_at("hello\nworld", Selection::caret(9));
        assert_eq!(move_selection(&buf, Motion::Up, false), Selection::caret(3));
    }

    #[test]
    fn test_move_down_clamps_to_shorter_line() {
        let buf = buffer_at("hello\nhi", Selection::caret(4));
        assert_eq!(move_selection(&buf, Motion::Down, false), Selection::caret(8));
    }

    #[test]
    fn test_move_up_on_first_line_goes_to_start() {
        let buf = buffer_at("hello\nworld", Selection::caret(3));
        assert_eq!(move_selection(&buf, Motion::Up, false), Selection::caret(0));
    }

    #[test]
    fn test_move_down_on_last_line_goes_to_end() {
        let buf = buffer_at("hello\nworld", Selection::caret(7));
        assert_eq!(move_selection(&buf, Motion::Down, false), Selection::caret(11));
    }

    #[test]
    fn test_line_start_end_and_buffer_bounds() {
        let buf = buffer_at("one\ntwo\nthree", Selection::caret(5));
        assert_eq!(move_selection(&buf, Motion::LineStart, false), Selection::caret(4));
        assert_eq!(move_selection(&buf, Motion::LineEnd, false), Selection::caret(7));
        assert_eq!(move_selection(&buf, Motion::BufferStart, false), Selection::caret(0));
        assert_eq!(move_selection(&buf, Motion::BufferEnd, false), Selection::caret(13));
    }

    // --- Properties ---

    #[derive(Debug, Clone)]
    enum Op {
        Insert(String),
        Backspace,
        Delete,
        Move(u8, bool),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            "[a-z(\\n😀é]{0,3}".prop_map(Op::Insert),
            Just(Op::Backspace),
            Just(Op::Delete),
            (0u8..8, any::<bool>()).prop_map(|(m, e)| Op::Move(m, e)),
        ]
    }

    const MOTIONS: [Motion; 8] = [
        Motion::Left,
        Motion::Right,
        Motion::Up,
        Motion::Down,
        Motion::LineStart,
        Motion::LineEnd,
        Motion::BufferStart,
        Motion::BufferEnd,
    ];

    proptest! {
        #[test]
        fn prop_selection_stays_in_bounds_and_on_char_boundaries(ops in prop::collection::vec(op(), 0..40)) {
            let mut buf = Buffer::new("txt");
            for op in ops {
                match op {
                    Op::Insert(s) => {
                        let change = insert(&buf, &s);
                        buf.set_state(change.text, change.selection);
                    }
                    Op::Backspace => {
                        if let Some(change) = delete_backward(&buf) {
                            buf.set_state(change.text, change.selection);
                        }
                    }
                    Op::Delete => {
                        if let Some(change) = delete_forward(&buf) {
                            buf.set_state(change.text, change.selection);
                        }
                    }
                    Op::Move(m, extend) => {
                        let sel = move_selection(&buf, MOTIONS[usize::from(m)], extend);
                        buf.set_selection(sel);
                    }
                }
                let sel = buf.selection();
                let len = buf.len_utf16();
                prop_assert!(sel.anchor <= len && sel.cursor <= len);
                let text = buf.text();
                prop_assert_eq!(utf16_len(&text[..byte_index(text, sel.cursor)]), sel.cursor);
            }
        }
    }
}
