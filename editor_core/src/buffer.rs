//! Text buffer implementation using ropey.

use ropey::Rope;
use std::fmt;

/// The live editing buffer, backed by a rope.
/// Indices are character offsets.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    /// Creates a new empty text buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Creates a text buffer from a string.
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Replaces the whole contents.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Returns true if the buffer holds exactly `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.rope == text
    }

    /// Returns the total number of characters in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Returns the contents with the character range `start..end` replaced
    /// by `text`. The buffer itself is left untouched.
    pub fn spliced(&self, start: usize, end: usize, text: &str) -> String {
        let start = start.min(self.len_chars());
        let end = end.clamp(start, self.len_chars());
        let mut rope = self.rope.clone();
        rope.remove(start..end);
        rope.insert(start, text);
        rope.to_string()
    }

    /// Converts a character index to a (line, column) position.
    /// Both line and column are 0-indexed.
    pub fn char_to_line_col(&self, char_idx: usize) -> (usize, usize) {
        let char_idx = char_idx.min(self.len_chars());
        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);
        (line, char_idx - line_start)
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.rope, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buf = TextBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len_chars(), 0);
        assert!(buf.matches(""));
    }

    #[test]
    fn test_set_text() {
        let mut buf = TextBuffer::from_str("hello");
        buf.set_text("héllo\nworld");
        assert_eq!(buf.len_chars(), 11);
        assert_eq!(buf.to_string(), "héllo\nworld");
        assert!(buf.matches("héllo\nworld"));
        assert!(!buf.matches("hello\nworld"));
    }

    #[test]
    fn test_spliced() {
        let buf = TextBuffer::from_str("hello world");
        assert_eq!(buf.spliced(6, 11, "there"), "hello there");
        assert_eq!(buf.spliced(0, 0, ">> "), ">> hello world");
        assert_eq!(buf.spliced(5, 99, "!"), "hello!");
        assert_eq!(buf.to_string(), "hello world");
    }

    #[test]
    fn test_char_to_line_col() {
        let buf = TextBuffer::from_str("abc\ndefgh");
        assert_eq!(buf.char_to_line_col(0), (0, 0));
        assert_eq!(buf.char_to_line_col(2), (0, 2));
        assert_eq!(buf.char_to_line_col(3), (0, 3)); // newline char
        assert_eq!(buf.char_to_line_col(4), (1, 0));
        assert_eq!(buf.char_to_line_col(6), (1, 2));
    }
}
