use std::borrow::Cow;

use crate::matcher::{Match, Matcher};
use crate::request::Direction;

/// Capabilities the engine needs from an editable text buffer.
///
/// Offsets are character offsets into the whole buffer. Lines are 1-based,
/// columns are 0-based. A collapsed selection (`start == end`) is just the
/// cursor.
pub trait Document {
    /// Whole buffer contents.
    fn text(&self) -> Cow<'_, str>;

    /// Find the next match starting from `origin`.
    ///
    /// The default implementation runs the matcher over [`Document::text`].
    /// Bulk replace takes one copy of the text up front and searches that
    /// instead of calling this per match.
    fn find(&self, matcher: &Matcher, origin: usize, direction: Direction) -> Option<Match> {
        matcher.find(&self.text(), origin, direction)
    }

    /// Current selection as an ordered `(start, end)` pair.
    fn selection_range(&self) -> (usize, usize);

    /// Cursor offset (the active end of the selection).
    fn cursor_position(&self) -> usize;

    /// Select `[start, end)`, leaving the cursor at `end`.
    fn set_selection(&mut self, start: usize, end: usize);

    /// Drop the selection and put the cursor at `offset`.
    fn clear_selection_keep_cursor_at(&mut self, offset: usize);

    /// Replace the selection with `text`, leaving the cursor after it.
    fn insert_text(&mut self, text: &str);

    fn line_count(&self) -> usize;

    /// Offset of the first character of a 1-based line.
    fn offset_of_line_start(&self, line: usize) -> usize;

    /// 1-based line and 0-based column of an offset.
    fn line_and_column_of(&self, offset: usize) -> (usize, usize);

    /// Buffer end offset.
    fn character_count(&self) -> usize;
}
