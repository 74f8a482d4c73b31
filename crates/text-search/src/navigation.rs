use crate::document::Document;
use crate::engine::SearchEngine;
use crate::result::GoToResult;

impl SearchEngine {
    /// Line to offer in a go-to-line prompt.
    ///
    /// The remembered line falls back to 1 once the buffer no longer has it.
    pub fn suggested_line<D: Document + ?Sized>(&mut self, doc: &D) -> usize {
        if self.last_goto < 1 || self.last_goto > doc.line_count() {
            self.last_goto = 1;
        }
        self.last_goto
    }

    /// Move the cursor to the start of a 1-based line.
    ///
    /// A line outside `1..=line_count` is not an error: the remembered line
    /// resets to 1 and the cursor goes there.
    pub fn go_to_line<D: Document + ?Sized>(&mut self, doc: &mut D, line: usize) -> GoToResult {
        let clamped = line < 1 || line > doc.line_count();
        self.last_goto = if clamped { 1 } else { line };

        let offset = doc.offset_of_line_start(self.last_goto);
        doc.clear_selection_keep_cursor_at(offset);
        quill_logger::debug(format!("Go to line {} (requested {})", self.last_goto, line));

        GoToResult {
            line: self.last_goto,
            clamped,
        }
    }
}
