use crate::document::Document;
use crate::error::SearchError;
use crate::matcher::{Match, Matcher};
use crate::request::{Direction, Origin, SearchParams, SearchRequest};
use crate::result::FindResult;
use crate::state::SearchState;

/// Find/replace/go-to-line engine for one open document.
///
/// Holds the parameters of the last successful search and the last
/// go-to-line target. Every operation runs to completion against the
/// document it is given.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    pub(crate) state: SearchState,
    pub(crate) last_goto: usize,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self {
            state: SearchState::new(),
            last_goto: 1,
        }
    }

    /// Parameters "find again" will use.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Run a search and select the match.
    ///
    /// A failed search keeps the cursor where it is but drops the selection.
    pub fn find<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        params: &SearchParams,
    ) -> Result<FindResult, SearchError> {
        Ok(match self.locate(doc, params)? {
            Some((_, found)) => {
                let (line, column) = doc.line_and_column_of(found.start);
                FindResult::found_at(line, column)
            }
            None => FindResult::not_found(),
        })
    }

    /// Literal search.
    pub fn find_literal<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        text: &str,
        case_sensitive: bool,
        whole_word: bool,
        direction: Direction,
        origin: Origin,
    ) -> Result<FindResult, SearchError> {
        let request = SearchRequest::literal(text, case_sensitive, whole_word);
        self.find(doc, &SearchParams::new(request, direction, origin))
    }

    /// Regular expression search.
    pub fn find_pattern<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        pattern: &str,
        case_sensitive: bool,
        direction: Direction,
        origin: Origin,
    ) -> Result<FindResult, SearchError> {
        let request = SearchRequest::pattern(pattern, case_sensitive);
        self.find(doc, &SearchParams::new(request, direction, origin))
    }

    /// Repeat the last successful search from the cursor.
    ///
    /// Returns `Ok(None)` without touching the document when nothing has
    /// been searched yet.
    pub fn find_again<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
    ) -> Result<Option<FindResult>, SearchError> {
        match self.state.repeat_params() {
            Some(params) => self.find(doc, &params).map(Some),
            None => Ok(None),
        }
    }

    /// Repeat the last search toward the end of the buffer.
    ///
    /// The direction sticks: a later [`find_again`](Self::find_again) keeps
    /// going forward.
    pub fn find_again_forward<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
    ) -> Result<Option<FindResult>, SearchError> {
        self.find_again_in(doc, Direction::Forward)
    }

    /// Repeat the last search toward the start of the buffer.
    pub fn find_again_backward<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
    ) -> Result<Option<FindResult>, SearchError> {
        self.find_again_in(doc, Direction::Backward)
    }

    fn find_again_in<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        direction: Direction,
    ) -> Result<Option<FindResult>, SearchError> {
        match self.state.repeat_params() {
            Some(mut params) => {
                params.direction = direction;
                self.find(doc, &params).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Shared search step for find and single replace.
    ///
    /// On success records the request, selects the match and hands back the
    /// compiled matcher for replacement expansion.
    pub(crate) fn locate<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        params: &SearchParams,
    ) -> Result<Option<(Matcher, Match)>, SearchError> {
        if params.request.is_empty() {
            quill_logger::debug("Search rejected: empty query");
            clear_selection(doc);
            return Ok(None);
        }

        let matcher = compile(&params.request)?;
        let origin = search_origin(doc, params.direction, params.origin);

        match doc.find(&matcher, origin, params.direction) {
            Some(found) => {
                self.state.record(&params.request, params.direction);
                doc.set_selection(found.start, found.end);
                quill_logger::debug(format!(
                    "Search '{}' {:?} from {}: match at {}..{}",
                    params.request.query(),
                    params.direction,
                    origin,
                    found.start,
                    found.end
                ));
                Ok(Some((matcher, found)))
            }
            None => {
                quill_logger::debug(format!(
                    "Search '{}' {:?} from {}: no matches",
                    params.request.query(),
                    params.direction,
                    origin
                ));
                clear_selection(doc);
                Ok(None)
            }
        }
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn compile(request: &SearchRequest) -> Result<Matcher, SearchError> {
    Matcher::new(request).map_err(|e| {
        quill_logger::warn(format!("Search '{}' rejected: {}", request.query(), e));
        e
    })
}

/// Offset a search starts from.
pub(crate) fn search_origin<D: Document + ?Sized>(
    doc: &D,
    direction: Direction,
    origin: Origin,
) -> usize {
    match (origin, direction) {
        (Origin::FromBoundary, Direction::Forward) => 0,
        (Origin::FromBoundary, Direction::Backward) => doc.character_count(),
        (Origin::FromCursor, Direction::Forward) => doc.selection_range().1,
        (Origin::FromCursor, Direction::Backward) => doc.selection_range().0,
    }
}

pub(crate) fn clear_selection<D: Document + ?Sized>(doc: &mut D) {
    let cursor = doc.cursor_position();
    doc.clear_selection_keep_cursor_at(cursor);
}
