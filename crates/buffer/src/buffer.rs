use anyhow::{Context, Result};
use ropey::Rope;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

use quill_text_search::Document;

use crate::{LineEnding, Position, Selection};

/// Text buffer based on Rope for efficient work with large files
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// Rope structure for storing text (always '\n' line breaks)
    rope: Rope,
    /// File path (if exists)
    file_path: Option<PathBuf>,
    /// Modified flag
    modified: bool,
    /// Line ending type (for saving)
    line_ending: LineEnding,
    /// Cursor and selection
    selection: Selection,
}

impl TextBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// Create buffer holding `text`, cursor at the start
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(&normalize_line_endings(text)),
            file_path: None,
            modified: false,
            line_ending: LineEnding::detect(text),
            selection: Selection::default(),
        }
    }

    /// Load file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let mut buffer = Self::from_text(&contents);
        buffer.file_path = Some(path.to_path_buf());
        Ok(buffer)
    }

    /// Save file
    pub fn save(&mut self) -> Result<()> {
        if let Some(path) = self.file_path.clone() {
            self.save_to(&path)
        } else {
            anyhow::bail!("No file path set")
        }
    }

    /// Save to specified file, restoring the original line endings
    pub fn save_to<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut contents = String::with_capacity(self.rope.len_bytes());

        for chunk in self.rope.chunks() {
            match self.line_ending {
                LineEnding::LF => contents.push_str(chunk),
                LineEnding::CRLF => contents.push_str(&chunk.replace('\n', "\r\n")),
            }
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Get line count
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get line by 0-based index, including its trailing newline
    pub fn line(&self, index: usize) -> Option<String> {
        if index < self.line_count() {
            Some(self.rope.line(index).to_string())
        } else {
            None
        }
    }

    /// Get all text
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Buffer length in characters
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Line ending used when saving
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Current selection
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Cursor offset
    pub fn cursor(&self) -> usize {
        self.selection.active
    }

    /// Selected text, if any
    pub fn selected_text(&self) -> Option<String> {
        if self.selection.is_empty() {
            return None;
        }
        Some(
            self.rope
                .slice(self.selection.start()..self.selection.end())
                .to_string(),
        )
    }

    /// Move the cursor, collapsing the selection
    pub fn set_cursor(&mut self, offset: usize) {
        self.selection = Selection::caret(offset).clamp(self.rope.len_chars());
    }

    /// Select `[anchor, active)` in either order
    pub fn select(&mut self, anchor: usize, active: usize) {
        self.selection = Selection::new(anchor, active).clamp(self.rope.len_chars());
    }

    /// Cursor location as line/column
    pub fn cursor_location(&self) -> Position {
        self.position_of(self.cursor())
    }

    /// Convert a character offset to line/column
    pub fn position_of(&self, offset: usize) -> Position {
        let offset = offset.min(self.rope.len_chars());
        let line_idx = self.rope.char_to_line(offset);
        Position::at(line_idx + 1, offset - self.rope.line_to_char(line_idx))
    }

    /// Convert line/column to a character offset
    pub fn offset_of(&self, position: &Position) -> Result<usize> {
        if position.line < 1 || position.line > self.line_count() {
            anyhow::bail!("Line {} out of range", position.line);
        }
        let line_idx = position.line - 1;
        let line_start = self.rope.line_to_char(line_idx);
        let line_len = self.rope.line(line_idx).len_chars();
        if position.column > line_len {
            anyhow::bail!(
                "Column {} out of range on line {}",
                position.column,
                position.line
            );
        }
        Ok(line_start + position.column)
    }

    /// Replace the selection with `text` and put the cursor after it
    pub fn insert(&mut self, text: &str) {
        let start = self.selection.start();
        let end = self.selection.end();
        if start < end {
            self.rope.remove(start..end);
        }

        let text = normalize_line_endings(text);
        self.rope.insert(start, &text);
        self.selection = Selection::caret(start + text.chars().count());
        self.modified = true;
    }

    /// Check if buffer is modified
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Get file path
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Set file path
    pub fn set_file_path<P: AsRef<Path>>(&mut self, path: P) {
        self.file_path = Some(path.as_ref().to_path_buf());
    }

    /// Get file name
    pub fn file_name(&self) -> Option<&str> {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for TextBuffer {
    fn text(&self) -> Cow<'_, str> {
        // Small ropes are a single chunk and can be lent out as is
        match self.rope.slice(..).as_str() {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(self.rope.to_string()),
        }
    }

    fn selection_range(&self) -> (usize, usize) {
        (self.selection.start(), self.selection.end())
    }

    fn cursor_position(&self) -> usize {
        self.selection.active
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        self.select(start, end);
    }

    fn clear_selection_keep_cursor_at(&mut self, offset: usize) {
        self.set_cursor(offset);
    }

    fn insert_text(&mut self, text: &str) {
        self.insert(text);
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn offset_of_line_start(&self, line: usize) -> usize {
        let line_idx = line.clamp(1, self.rope.len_lines()) - 1;
        self.rope.line_to_char(line_idx)
    }

    fn line_and_column_of(&self, offset: usize) -> (usize, usize) {
        let position = self.position_of(offset);
        (position.line, position.column)
    }

    fn character_count(&self) -> usize {
        self.rope.len_chars()
    }
}

fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer() {
        let buf = TextBuffer::new();
        assert_eq!(buf.line_count(), 1); // Rope always has at least 1 line
        assert!(!buf.is_modified());
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut buf = TextBuffer::from_text("hello world");
        buf.select(6, 11);
        buf.insert("there");

        assert_eq!(buf.text(), "hello there");
        assert_eq!(buf.selection(), Selection::caret(11));
        assert!(buf.is_modified());
    }

    #[test]
    fn test_insert_newline() {
        let mut buf = TextBuffer::new();
        buf.insert("hello\nworld");

        assert_eq!(buf.cursor_location(), Position::at(2, 5));
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line(0).unwrap(), "hello\n");
        assert_eq!(buf.line(1).unwrap(), "world");
    }

    #[test]
    fn test_selected_text() {
        let mut buf = TextBuffer::from_text("abcdef");
        assert_eq!(buf.selected_text(), None);
        buf.select(4, 1);
        assert_eq!(buf.selected_text().unwrap(), "bcd");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut buf = TextBuffer::from_text("abc");
        buf.select(1, 99);
        assert_eq!(buf.selection(), Selection::new(1, 3));
        buf.set_cursor(42);
        assert_eq!(buf.cursor(), 3);
    }

    #[test]
    fn test_positions() {
        let buf = TextBuffer::from_text("ab\ncde\n");
        assert_eq!(buf.position_of(0), Position::at(1, 0));
        assert_eq!(buf.position_of(4), Position::at(2, 1));
        assert_eq!(buf.position_of(7), Position::at(3, 0));
        assert_eq!(buf.offset_of(&Position::at(2, 1)).unwrap(), 4);
        assert!(buf.offset_of(&Position::at(0, 0)).is_err());
        assert!(buf.offset_of(&Position::at(1, 9)).is_err());
    }

    #[test]
    fn test_document_line_indexing() {
        let buf = TextBuffer::from_text("one\ntwo\nthree");
        assert_eq!(Document::line_count(&buf), 3);
        assert_eq!(buf.offset_of_line_start(1), 0);
        assert_eq!(buf.offset_of_line_start(3), 8);
        assert_eq!(buf.offset_of_line_start(99), 8);
        assert_eq!(buf.line_and_column_of(10), (3, 2));
        assert_eq!(buf.character_count(), 13);
    }

    #[test]
    fn test_crlf_normalized_in_memory() {
        let buf = TextBuffer::from_text("a\r\nb\r\n");
        assert_eq!(buf.text(), "a\nb\n");
        assert_eq!(buf.line_ending(), LineEnding::CRLF);
        assert_eq!(buf.character_count(), 4);
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut buf = TextBuffer::from_text("x");
        assert!(buf.save().is_err());
    }

    #[test]
    fn test_save_load_cycle() {
        use std::fs;
        use tempfile::NamedTempFile;

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path();

        let mut buf = TextBuffer::new();
        buf.insert("line 1\nline 2\nline 3");
        buf.save_to(temp_path).unwrap();
        assert!(!buf.is_modified());

        let saved_content = fs::read_to_string(temp_path).unwrap();
        assert_eq!(saved_content, "line 1\nline 2\nline 3");

        let buf2 = TextBuffer::from_file(temp_path).unwrap();
        assert_eq!(buf2.text(), saved_content);
        assert_eq!(buf2.file_path(), Some(temp_path));
    }

    #[test]
    fn test_save_preserves_crlf() {
        use std::fs;
        use tempfile::NamedTempFile;

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path();
        fs::write(temp_path, "1\r\n2\r\n3").unwrap();

        let mut buf = TextBuffer::from_file(temp_path).unwrap();
        buf.set_cursor(buf.len_chars());
        buf.insert("\n4");
        buf.save().unwrap();

        assert_eq!(fs::read_to_string(temp_path).unwrap(), "1\r\n2\r\n3\r\n4");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = TextBuffer::from_file("/nonexistent/quill/file.txt").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/quill/file.txt"));
    }
}
