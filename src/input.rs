use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Editable text with a cursor measured in characters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInput {
    buffer: String,
    cursor: usize,
    pub multiline: bool,
    pub digits_only: bool,
    pub scroll_y: u16,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multiline() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    pub fn numeric(initial: u32) -> Self {
        let mut input = Self {
            digits_only: true,
            ..Self::default()
        };
        input.set_text(initial.to_string());
        input
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position as a byte offset into `text()`.
    pub fn cursor_byte_index(&self) -> usize {
        self.byte_index(self.cursor)
    }

    pub fn set_text(&mut self, text: String) {
        self.buffer = text;
        self.cursor = self.buffer.chars().count();
        self.scroll_y = 0;
    }

    pub fn clear(&mut self) {
        self.set_text(String::new());
    }

    pub fn is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    /// Parse as a page number. Empty or overflowing input reads as 0.
    pub fn as_number(&self) -> u32 {
        self.buffer.trim().parse().unwrap_or(0)
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    pub fn insert(&mut self, c: char) {
        if self.digits_only && !c.is_ascii_digit() {
            return;
        }
        if c == '\n' && !self.multiline {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.buffer.insert(idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let idx = self.byte_index(self.cursor - 1);
            self.buffer.remove(idx);
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.buffer.chars().count() {
            let idx = self.byte_index(self.cursor);
            self.buffer.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.min(self.buffer.chars().count()).saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.buffer.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.chars().count();
    }

    /// Apply an editing key. Returns false if the key isn't an editing key.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            KeyCode::Enter if self.multiline => self.insert('\n'),
            _ => return false,
        }
        true
    }
}
