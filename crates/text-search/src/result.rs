//! Operation results and the status-bar text for each.

use std::fmt;

/// Outcome of a find operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FindResult {
    pub found: bool,
    /// 1-based line of the match start
    pub line: Option<usize>,
    /// 0-based column of the match start
    pub column: Option<usize>,
}

impl FindResult {
    pub fn found_at(line: usize, column: usize) -> Self {
        Self {
            found: true,
            line: Some(line),
            column: Some(column),
        }
    }

    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn status_message(&self) -> String {
        match (self.found, self.line, self.column) {
            (true, Some(line), Some(column)) => format!("Found match at {}:{}", line, column),
            _ => "No matches.".to_string(),
        }
    }
}

/// Outcome of a single replace.
///
/// `found && !replaced` means the user declined the confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaceResult {
    pub found: bool,
    pub replaced: bool,
    /// 1-based line of the match start
    pub line: Option<usize>,
    /// 0-based column of the match start
    pub column: Option<usize>,
}

impl ReplaceResult {
    pub fn replaced_at(line: usize, column: usize) -> Self {
        Self {
            found: true,
            replaced: true,
            line: Some(line),
            column: Some(column),
        }
    }

    pub fn declined_at(line: usize, column: usize) -> Self {
        Self {
            found: true,
            replaced: false,
            line: Some(line),
            column: Some(column),
        }
    }

    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn status_message(&self) -> String {
        match (self.line, self.column) {
            (Some(line), Some(column)) if self.replaced => {
                format!("Replaced text at {}:{}", line, column)
            }
            (Some(line), Some(column)) if self.found => {
                format!("Found match at {}:{}", line, column)
            }
            _ => "No matches.".to_string(),
        }
    }
}

/// Outcome of a replace-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaceAllResult {
    pub replaced_count: usize,
    /// User refused the whole-operation confirmation
    pub declined: bool,
}

impl ReplaceAllResult {
    pub fn status_message(&self) -> String {
        if self.declined {
            return "Replace cancelled.".to_string();
        }
        format!("{} occurrences replaced.", self.replaced_count)
    }
}

/// Outcome of go-to-line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoToResult {
    /// 1-based line the cursor was moved to
    pub line: usize,
    /// The requested line was outside the buffer and line 1 was used
    pub clamped: bool,
}

impl GoToResult {
    pub fn status_message(&self) -> String {
        format!("Line {}", self.line)
    }
}

impl fmt::Display for FindResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status_message())
    }
}

impl fmt::Display for ReplaceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status_message())
    }
}

impl fmt::Display for ReplaceAllResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status_message())
    }
}

impl fmt::Display for GoToResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status_message())
    }
}
