//! Search request types.

/// Search direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub fn is_backward(self) -> bool {
        self == Direction::Backward
    }
}

/// Where a search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// End of the selection going forward, start of the selection going backward.
    #[default]
    FromCursor,
    /// Buffer start going forward, buffer end going backward.
    FromBoundary,
}

/// What to look for.
///
/// Whole-word matching only exists for literal text; regex authors write
/// their own word boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    Literal {
        text: String,
        case_sensitive: bool,
        whole_word: bool,
    },
    Pattern {
        pattern: String,
        case_sensitive: bool,
    },
}

impl SearchRequest {
    /// Literal substring search.
    pub fn literal(text: impl Into<String>, case_sensitive: bool, whole_word: bool) -> Self {
        SearchRequest::Literal {
            text: text.into(),
            case_sensitive,
            whole_word,
        }
    }

    /// Regular expression search.
    pub fn pattern(pattern: impl Into<String>, case_sensitive: bool) -> Self {
        SearchRequest::Pattern {
            pattern: pattern.into(),
            case_sensitive,
        }
    }

    /// The text or expression as typed by the user.
    pub fn query(&self) -> &str {
        match self {
            SearchRequest::Literal { text, .. } => text,
            SearchRequest::Pattern { pattern, .. } => pattern,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query().is_empty()
    }

    pub fn case_sensitive(&self) -> bool {
        match self {
            SearchRequest::Literal { case_sensitive, .. }
            | SearchRequest::Pattern { case_sensitive, .. } => *case_sensitive,
        }
    }

    pub fn whole_word(&self) -> bool {
        matches!(
            self,
            SearchRequest::Literal {
                whole_word: true,
                ..
            }
        )
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, SearchRequest::Pattern { .. })
    }
}

/// A request together with its direction and starting point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub request: SearchRequest,
    pub direction: Direction,
    pub origin: Origin,
}

impl SearchParams {
    pub fn new(request: SearchRequest, direction: Direction, origin: Origin) -> Self {
        Self {
            request,
            direction,
            origin,
        }
    }

    /// Forward search from the cursor.
    pub fn forward(request: SearchRequest) -> Self {
        Self::new(request, Direction::Forward, Origin::FromCursor)
    }

    /// Backward search from the cursor.
    pub fn backward(request: SearchRequest) -> Self {
        Self::new(request, Direction::Backward, Origin::FromCursor)
    }

    /// Same request and direction, starting at the buffer boundary.
    pub fn from_boundary(mut self) -> Self {
        self.origin = Origin::FromBoundary;
        self
    }
}
