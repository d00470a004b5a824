//! Cursor-addressable text buffer driven by the on-screen keyboard.
//!
//! The cursor is a *character* index in `[0, char_count]`; byte positions
//! are derived per edit so multi-byte characters stay intact. Boundary
//! operations are no-ops, never errors.

/// An editable line of text with a cursor.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    content: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing text with the cursor at the end.
    pub fn with_text(text: &str) -> Self {
        Self {
            content: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position as a character index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte offset of the character index `at`.
    fn byte_pos(&self, at: usize) -> usize {
        self.content
            .char_indices()
            .nth(at)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Text before the cursor (used for pixel measurement).
    pub fn prefix(&self) -> &str {
        &self.content[..self.byte_pos(self.cursor)]
    }

    /// Insert at the cursor and advance past the new character.
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_pos(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
    }

    /// Remove the character before the cursor; no-op at position 0.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_pos(self.cursor);
        self.content.remove(at);
    }

    /// Move the cursor one character left; no-op at 0.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one character right; no-op at the end.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Take the finished text, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }
}
