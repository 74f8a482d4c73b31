//! Text buffer with rope data structure for quill.
//!
//! Provides text storage using ropey, a cursor/selection model measured in
//! characters, line indexing, and file loading/saving that preserves the
//! original line endings. [`TextBuffer`] implements the search engine's
//! [`Document`](quill_text_search::Document) trait.

mod buffer;
mod cursor;

pub use buffer::TextBuffer;
pub use cursor::{Position, Selection};

/// Line ending type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::upper_case_acronyms)]
pub enum LineEnding {
    #[default]
    LF, // Unix \n
    CRLF, // Windows \r\n
}

impl LineEnding {
    /// Detect the line ending used by file contents
    pub fn detect(contents: &str) -> Self {
        if contents.contains("\r\n") {
            LineEnding::CRLF
        } else {
            LineEnding::LF
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::LF => "\n",
            LineEnding::CRLF => "\r\n",
        }
    }
}
