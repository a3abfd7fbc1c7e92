//! Single-line text editing for the combobox input.
//!
//! Cursor positions are byte offsets that always sit on grapheme cluster
//! boundaries, so a backspace removes what the user sees as one character
//! (an emoji with modifiers, a letter with combining marks).

use unicode_segmentation::UnicodeSegmentation;

/// Editable text with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    cursor: usize,
    max_length: Option<usize>,
}

impl TextField {
    /// Create an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum length in chars using builder pattern.
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.set_max_length(Some(max));
        self
    }

    /// The current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The cursor as a byte offset into [`text`](Self::text).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The maximum length in chars.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Set the maximum length, truncating the current text if needed.
    pub fn set_max_length(&mut self, max: Option<usize>) {
        self.max_length = max;
        if let Some(max) = max
            && self.text.chars().count() > max
        {
            let text = truncate_graphemes(&self.text, max).to_string();
            self.text = text;
            self.cursor = self.cursor.min(self.text.len());
        }
    }

    /// Replace the text and move the cursor to its end.
    ///
    /// Returns `true` if the text changed.
    pub fn set_text(&mut self, text: &str) -> bool {
        let text = match self.max_length {
            Some(max) => truncate_graphemes(text, max),
            None => text,
        };
        let changed = self.text != text;
        if changed {
            self.text = text.to_string();
        }
        self.cursor = self.text.len();
        changed
    }

    /// Remove all text.
    pub fn clear(&mut self) -> bool {
        self.set_text("")
    }

    /// Insert text at the cursor.
    ///
    /// Control characters (line breaks, tabs) are dropped, and the insertion
    /// is cut at a grapheme boundary to respect the maximum length.
    pub fn insert(&mut self, text: &str) -> bool {
        let filtered: String = text.chars().filter(|c| !c.is_control()).collect();
        let insertion = match self.max_length {
            Some(max) => {
                let room = max.saturating_sub(self.text.chars().count());
                truncate_graphemes(&filtered, room)
            }
            None => filtered.as_str(),
        };
        if insertion.is_empty() {
            return false;
        }

        self.text.insert_str(self.cursor, insertion);
        self.cursor += insertion.len();
        true
    }

    /// Delete the grapheme before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.prev_grapheme_boundary(self.cursor);
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    /// Delete the grapheme after the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        let end = self.next_grapheme_boundary(self.cursor);
        self.text.replace_range(self.cursor..end, "");
        true
    }

    /// Move the cursor one grapheme left.
    pub fn move_left(&mut self) -> bool {
        let pos = self.prev_grapheme_boundary(self.cursor);
        self.move_to(pos)
    }

    /// Move the cursor one grapheme right.
    pub fn move_right(&mut self) -> bool {
        let pos = self.next_grapheme_boundary(self.cursor);
        self.move_to(pos)
    }

    /// Move the cursor to the start.
    pub fn move_home(&mut self) -> bool {
        self.move_to(0)
    }

    /// Move the cursor to the end.
    pub fn move_end(&mut self) -> bool {
        self.move_to(self.text.len())
    }

    fn move_to(&mut self, pos: usize) -> bool {
        let moved = pos != self.cursor;
        self.cursor = pos;
        moved
    }

    fn prev_grapheme_boundary(&self, pos: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .map(|(offset, _)| offset)
            .take_while(|offset| *offset < pos)
            .last()
            .unwrap_or(0)
    }

    fn next_grapheme_boundary(&self, pos: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .map(|(offset, grapheme)| offset + grapheme.len())
            .find(|end| *end > pos)
            .unwrap_or(self.text.len())
    }
}

/// The longest prefix of `text` made of whole graphemes and at most
/// `max_chars` chars.
fn truncate_graphemes(text: &str, max_chars: usize) -> &str {
    let mut chars = 0;
    let mut end = 0;
    for grapheme in text.graphemes(true) {
        chars += grapheme.chars().count();
        if chars > max_chars {
            break;
        }
        end += grapheme.len();
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut field = TextField::new();
        assert!(field.insert("ap"));
        assert!(field.insert("p"));
        assert_eq!(field.text(), "app");
        assert_eq!(field.cursor(), 3);

        assert!(field.backspace());
        assert_eq!(field.text(), "ap");
        assert!(field.backspace());
        assert!(field.backspace());
        assert!(!field.backspace());
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        let mut field = TextField::new();
        // Thumbs up with skin tone modifier: two chars, one grapheme.
        field.insert("a👍🏽");
        assert!(field.backspace());
        assert_eq!(field.text(), "a");
    }

    #[test]
    fn test_cursor_movement_and_mid_insert() {
        let mut field = TextField::new();
        field.set_text("ale");
        assert!(field.move_left());
        assert!(field.move_left());
        field.insert("pp");
        assert_eq!(field.text(), "apple");

        assert!(field.move_home());
        assert!(!field.move_left());
        assert!(field.delete());
        assert_eq!(field.text(), "pple");

        assert!(field.move_end());
        assert!(!field.move_right());
        assert!(!field.delete());
    }

    #[test]
    fn test_combining_marks_move_as_one() {
        let mut field = TextField::new();
        // "e" followed by a combining acute accent.
        field.set_text("e\u{301}x");
        field.move_home();
        field.move_right();
        assert_eq!(field.cursor(), "e\u{301}".len());
    }

    #[test]
    fn test_max_length_truncates_insertions() {
        let mut field = TextField::new().with_max_length(4);
        field.insert("abc");
        field.insert("def");
        assert_eq!(field.text(), "abcd");
        assert!(!field.insert("x"));

        assert!(field.set_text("overflowing"));
        assert_eq!(field.text(), "over");
    }

    #[test]
    fn test_control_characters_dropped() {
        let mut field = TextField::new();
        field.insert("a\nb\tc");
        assert_eq!(field.text(), "abc");
        assert!(!field.insert("\r\n"));
    }

    #[test]
    fn test_set_text_reports_change() {
        let mut field = TextField::new();
        assert!(field.set_text("x"));
        assert!(!field.set_text("x"));
        assert!(field.clear());
        assert!(!field.clear());
    }
}
