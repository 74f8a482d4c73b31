use crate::request::{Direction, Origin, SearchParams, SearchRequest};

/// Parameters of the last successful search, kept for "find again".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Search text or expression (empty means no search yet)
    pub pattern: String,
    /// Case sensitivity
    pub case_sensitive: bool,
    /// Whole word only (always false for regex searches)
    pub whole_word: bool,
    /// Direction of the last search
    pub backward: bool,
    /// Regex or literal
    pub is_regex: bool,
}

impl SearchState {
    /// Create an empty search state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there is nothing to repeat
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    pub fn direction(&self) -> Direction {
        if self.backward {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }

    /// Rebuild the stored request
    pub fn request(&self) -> Option<SearchRequest> {
        if self.is_empty() {
            return None;
        }
        let request = if self.is_regex {
            SearchRequest::pattern(self.pattern.clone(), self.case_sensitive)
        } else {
            SearchRequest::literal(self.pattern.clone(), self.case_sensitive, self.whole_word)
        };
        Some(request)
    }

    /// Parameters for repeating the last search from the cursor
    pub fn repeat_params(&self) -> Option<SearchParams> {
        self.request()
            .map(|request| SearchParams::new(request, self.direction(), Origin::FromCursor))
    }

    /// Overwrite every field at once from a successful search
    pub(crate) fn record(&mut self, request: &SearchRequest, direction: Direction) {
        *self = Self {
            pattern: request.query().to_string(),
            case_sensitive: request.case_sensitive(),
            whole_word: request.whole_word(),
            backward: direction.is_backward(),
            is_regex: request.is_regex(),
        };
    }
}
