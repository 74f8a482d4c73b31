//! Single and bulk replacement built on top of search.

use crate::document::Document;
use crate::engine::{clear_selection, compile, search_origin, SearchEngine};
use crate::error::SearchError;
use crate::matcher::Match;
use crate::request::{Direction, SearchParams, SearchRequest};
use crate::result::{ReplaceAllResult, ReplaceResult};

/// Blocking yes/no prompt shown before editing.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}

const CONFIRM_ONE: &str = "Replace this text?";

fn confirm_all_question(request: &SearchRequest) -> String {
    match request {
        SearchRequest::Literal { text, .. } => {
            format!("Replace all occurrences of \"{}\"?", text)
        }
        SearchRequest::Pattern { pattern, .. } => format!(
            "Replace all occurrences of text matching expression \"{}\"?",
            pattern
        ),
    }
}

impl SearchEngine {
    /// Find the next match and replace it.
    ///
    /// With a `confirm` prompt the user may decline; the match is then left
    /// unselected with the cursor past it in the search direction (its end
    /// going forward, its start going backward), so the next call moves on.
    pub fn replace_one<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        params: &SearchParams,
        replacement: &str,
        confirm: Option<&mut dyn Confirm>,
    ) -> Result<ReplaceResult, SearchError> {
        let Some((matcher, found)) = self.locate(doc, params)? else {
            return Ok(ReplaceResult::not_found());
        };

        let (line, column) = doc.line_and_column_of(found.start);

        if let Some(confirm) = confirm {
            if !confirm.confirm(CONFIRM_ONE) {
                let rest = match params.direction {
                    Direction::Forward => found.end,
                    Direction::Backward => found.start,
                };
                doc.clear_selection_keep_cursor_at(rest);
                quill_logger::debug(format!("Replace at {}:{} declined", line, column));
                return Ok(ReplaceResult::declined_at(line, column));
            }
        }

        let new_text = matcher.expand(&doc.text(), &found, replacement);
        doc.insert_text(&new_text);
        quill_logger::debug(format!(
            "Replaced '{}' with '{}' at {}:{}",
            found.text, new_text, line, column
        ));

        Ok(ReplaceResult::replaced_at(line, column))
    }

    /// Replace every match from the starting point to the buffer boundary.
    ///
    /// Never prompts when there is nothing to replace. Replacements are
    /// applied one at a time as matches are found, and the text just
    /// inserted is never searched again. Does not change what "find again"
    /// repeats.
    pub fn replace_all<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        params: &SearchParams,
        replacement: &str,
        confirm: Option<&mut dyn Confirm>,
    ) -> Result<ReplaceAllResult, SearchError> {
        if params.request.is_empty() {
            clear_selection(doc);
            return Ok(ReplaceAllResult::default());
        }

        let matcher = compile(&params.request)?;
        let origin = search_origin(doc, params.direction, params.origin);

        // Searched in a private copy kept in step with each edit
        let mut text = doc.text().into_owned();

        let Some(mut found) = matcher.find(&text, origin, params.direction) else {
            clear_selection(doc);
            return Ok(ReplaceAllResult::default());
        };

        if let Some(confirm) = confirm {
            if !confirm.confirm(&confirm_all_question(&params.request)) {
                quill_logger::debug(format!(
                    "Replace all '{}' declined",
                    params.request.query()
                ));
                return Ok(ReplaceAllResult {
                    replaced_count: 0,
                    declined: true,
                });
            }
        }

        let mut count = 0;
        loop {
            let new_text = matcher.expand(&text, &found, replacement);
            doc.set_selection(found.start, found.end);
            doc.insert_text(&new_text);
            splice(&mut text, &found, &new_text);
            count += 1;

            let next = match params.direction {
                Direction::Forward => {
                    let resume = found.start + new_text.chars().count();
                    matcher.find(&text, resume, Direction::Forward)
                }
                Direction::Backward => matcher.find_before(&text, found.start),
            };
            match next {
                Some(next) => found = next,
                None => break,
            }
        }

        clear_selection(doc);
        quill_logger::info(format!(
            "Replace all '{}': {} occurrences replaced",
            params.request.query(),
            count
        ));

        Ok(ReplaceAllResult {
            replaced_count: count,
            declined: false,
        })
    }
}

/// Apply the edit just made to the document to its copy in `text`.
fn splice(text: &mut String, found: &Match, new_text: &str) {
    let mut bytes = text.char_indices().map(|(byte, _)| byte).skip(found.start);
    let start = bytes.next().unwrap_or(text.len());
    let end = bytes.nth(found.end - found.start - 1).unwrap_or(text.len());
    text.replace_range(start..end, new_text);
}
