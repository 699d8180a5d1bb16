use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// Editable text with a cursor. The cursor is a char index, never a byte index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
    multiline: bool,
    masked: bool,
}

impl TextInput {
    pub fn single_line() -> Self {
        Self::default()
    }

    pub fn multi_line() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = if self.multiline {
            value.to_string()
        } else {
            value.replace('\n', " ")
        };
        self.cursor = self.value.chars().count();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// What the widget shows: bullets for masked inputs.
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        if c == '\n' && !self.multiline {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_offset(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        let (_, column) = self.line_and_column();
        self.cursor -= column;
    }

    pub fn move_end(&mut self) {
        let (line, column) = self.line_and_column();
        let len = self.lines()[line].chars().count();
        self.cursor += len - column;
    }

    pub fn move_up(&mut self) {
        let (line, column) = self.line_and_column();
        if line > 0 {
            self.cursor = self.position_of(line - 1, column);
        }
    }

    pub fn move_down(&mut self) {
        let (line, column) = self.line_and_column();
        if line + 1 < self.lines().len() {
            self.cursor = self.position_of(line + 1, column);
        }
    }

    fn lines(&self) -> Vec<&str> {
        self.value.split('\n').collect()
    }

    /// Line index and char column of the cursor.
    pub fn line_and_column(&self) -> (usize, usize) {
        let before = &self.value[..self.byte_offset(self.cursor)];
        let line = before.matches('\n').count();
        let column = before
            .rsplit('\n')
            .next()
            .map(|s| s.chars().count())
            .unwrap_or(0);
        (line, column)
    }

    /// Char index of `column` on `line`, clamped to the line's length.
    fn position_of(&self, line: usize, column: usize) -> usize {
        let lines = self.lines();
        let start: usize = lines[..line].iter().map(|l| l.chars().count() + 1).sum();
        start + column.min(lines[line].chars().count())
    }

    /// Terminal cell offset of the cursor (row, column) within the rendered text.
    pub fn cursor_cell(&self) -> (u16, u16) {
        let (line, column) = self.line_and_column();
        let shown = self.display();
        let text = shown.split('\n').nth(line).unwrap_or("");
        let prefix: String = text.chars().take(column).collect();
        (line as u16, prefix.width() as u16)
    }

    /// Applies an editing key. Returns false when the key is not an editing key.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT) {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Enter if self.multiline => self.insert('\n'),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            KeyCode::Up if self.multiline => self.move_up(),
            KeyCode::Down if self.multiline => self.move_down(),
            _ => return false,
        }
        true
    }
}
