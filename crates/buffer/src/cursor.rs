use std::cmp::{max, min};

/// Human-facing location in a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number (1-based)
    pub line: usize,
    /// Position in line in characters (0-based)
    pub column: usize,
}

impl Position {
    /// Create position at specified line and column
    pub fn at(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.column.cmp(&other.column),
            other => other,
        }
    }
}

/// Text selection as character offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Start point of selection (anchor) - doesn't move
    pub anchor: usize,
    /// Active point (the cursor)
    pub active: usize,
}

impl Selection {
    /// Create a new selection
    pub fn new(anchor: usize, active: usize) -> Self {
        Self { anchor, active }
    }

    /// Collapsed selection at `offset`
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Start of selection (minimum offset)
    pub fn start(&self) -> usize {
        min(self.anchor, self.active)
    }

    /// End of selection (maximum offset)
    pub fn end(&self) -> usize {
        max(self.anchor, self.active)
    }

    /// Selection is empty (start == end)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// Clamp both ends to `len`
    pub fn clamp(self, len: usize) -> Self {
        Self::new(min(self.anchor, len), min(self.active, len))
    }
}
