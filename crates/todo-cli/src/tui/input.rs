//! Single-line text editing shared by the add bar and the inline row editor.

use crossterm::event::{KeyCode, KeyEvent};

/// Text plus a cursor measured in chars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    text: String,
    cursor: usize,
}

impl LineInput {
    /// Start with `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = char_len(&text);
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Apply an editing key. Returns `true` if the text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        edit_single_line(&mut self.text, &mut self.cursor, key)
    }

    /// The text with a block cursor drawn in.
    pub fn display(&self) -> String {
        with_cursor(&self.text, self.cursor)
    }
}

fn edit_single_line(text: &mut String, cursor: &mut usize, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Left => *cursor = cursor.saturating_sub(1),
        KeyCode::Right => *cursor = (*cursor + 1).min(char_len(text)),
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = char_len(text),
        KeyCode::Backspace => {
            if *cursor > 0 {
                let remove_idx = *cursor - 1;
                remove_char_at(text, remove_idx);
                *cursor = remove_idx;
                return true;
            }
        }
        KeyCode::Delete => {
            if *cursor < char_len(text) {
                remove_char_at(text, *cursor);
                return true;
            }
        }
        KeyCode::Char(c) => {
            insert_char_at(text, *cursor, c);
            *cursor += 1;
            return true;
        }
        _ => {}
    }
    false
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn byte_index_at_char(value: &str, char_idx: usize) -> usize {
    value
        .char_indices()
        .nth(char_idx)
        .map_or(value.len(), |(idx, _)| idx)
}

fn insert_char_at(value: &mut String, char_idx: usize, ch: char) {
    let idx = byte_index_at_char(value, char_idx);
    value.insert(idx, ch);
}

fn remove_char_at(value: &mut String, char_idx: usize) {
    if char_idx >= char_len(value) {
        return;
    }
    let start = byte_index_at_char(value, char_idx);
    let end = byte_index_at_char(value, char_idx + 1);
    value.replace_range(start..end, "");
}

fn with_cursor(value: &str, char_idx: usize) -> String {
    let mut out = String::with_capacity(value.len() + 3);
    let mut inserted = false;
    for (idx, ch) in value.chars().enumerate() {
        if idx == char_idx {
            out.push('█');
            inserted = true;
        }
        out.push(ch);
    }
    if !inserted {
        out.push('█');
    }
    out
}
