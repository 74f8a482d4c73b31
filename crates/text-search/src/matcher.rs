//! Compiled search requests.
//!
//! A [`Matcher`] is built once per operation from a [`SearchRequest`] and
//! then asked for the next or previous match relative to a character offset.
//! All offsets it accepts and returns are character offsets, the same unit
//! the [`Document`](crate::Document) uses for its cursor.

use regex::{Regex, RegexBuilder};

use crate::error::SearchError;
use crate::request::{Direction, SearchRequest};

/// A match location in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Start offset (characters, inclusive).
    pub start: usize,
    /// End offset (characters, exclusive).
    pub end: usize,
    /// Matched text.
    pub text: String,
}

/// Word-constituent character for whole-word matching.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Compiled form of a [`SearchRequest`].
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    whole_word: bool,
    is_pattern: bool,
}

impl Matcher {
    /// Compile a request.
    ///
    /// Literal text is escaped, so only [`SearchRequest::Pattern`] can fail
    /// with [`SearchError::InvalidPattern`].
    pub fn new(request: &SearchRequest) -> Result<Self, SearchError> {
        if request.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let search_pattern = match request {
            SearchRequest::Literal { text, .. } => regex::escape(text),
            SearchRequest::Pattern { pattern, .. } => pattern.clone(),
        };

        // Patterns never span lines, so anchors bind to line boundaries
        let regex = RegexBuilder::new(&search_pattern)
            .case_insensitive(!request.case_sensitive())
            .multi_line(true)
            .build()
            .map_err(|e| SearchError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            regex,
            whole_word: request.whole_word(),
            is_pattern: request.is_regex(),
        })
    }

    /// Find the match closest to `origin` in `direction`.
    ///
    /// Forward: leftmost match starting at or after `origin`.
    /// Backward: the match with the greatest start before `origin`; it may
    /// run past `origin`, so a cursor inside a word finds that word.
    /// Zero-length matches are never reported.
    pub fn find(&self, text: &str, origin: usize, direction: Direction) -> Option<Match> {
        let origin_byte = char_to_byte(text, origin);
        let found = match direction {
            Direction::Forward => self.find_forward(text, origin_byte),
            Direction::Backward => self.find_backward(text, origin_byte, false),
        };
        found.map(|(start, end)| to_match(text, start, end))
    }

    /// Backward search restricted to matches ending at or before `origin`.
    ///
    /// Bulk replace uses this so text it just inserted is never matched again.
    pub(crate) fn find_before(&self, text: &str, origin: usize) -> Option<Match> {
        let limit = char_to_byte(text, origin);
        self.find_backward(text, limit, true)
            .map(|(start, end)| to_match(text, start, end))
    }

    /// Replacement text for `found`, a match previously returned for `text`.
    ///
    /// Literal searches insert `replacement` verbatim. Pattern searches
    /// expand `$1` / `${name}` references against the captures of the match,
    /// evaluated in place so assertions such as `\b` see the real context.
    pub fn expand(&self, text: &str, found: &Match, replacement: &str) -> String {
        if !self.is_pattern {
            return replacement.to_string();
        }

        let start = char_to_byte(text, found.start);
        let mut expanded = String::new();
        if let Some(caps) = self.regex.captures_at(text, start) {
            caps.expand(replacement, &mut expanded);
        }
        expanded
    }

    fn find_forward(&self, text: &str, from: usize) -> Option<(usize, usize)> {
        let mut pos = from;
        while pos <= text.len() {
            let mat = self.regex.find_at(text, pos)?;
            if !mat.is_empty() && self.accepts(text, mat.start(), mat.end()) {
                return Some((mat.start(), mat.end()));
            }
            pos = next_char_boundary(text, mat.start());
        }
        None
    }

    fn find_backward(
        &self,
        text: &str,
        limit: usize,
        end_within: bool,
    ) -> Option<(usize, usize)> {
        // Scan the whole text so anchors and word boundaries see real context
        let mut best = None;
        let mut pos = 0;
        while pos < limit {
            let Some(mat) = self.regex.find_at(text, pos) else {
                break;
            };
            if mat.start() >= limit {
                break;
            }
            if !mat.is_empty()
                && (!end_within || mat.end() <= limit)
                && self.accepts(text, mat.start(), mat.end())
            {
                best = Some((mat.start(), mat.end()));
            }
            pos = next_char_boundary(text, mat.start());
        }
        best
    }

    fn accepts(&self, text: &str, start: usize, end: usize) -> bool {
        if !self.whole_word {
            return true;
        }
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    }
}

fn to_match(text: &str, start: usize, end: usize) -> Match {
    let start_char = text[..start].chars().count();
    let matched = &text[start..end];
    Match {
        start: start_char,
        end: start_char + matched.chars().count(),
        text: matched.to_string(),
    }
}

/// Convert character offset to byte offset, clamping to the end of `text`.
fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Byte offset just past the character starting at `byte`.
fn next_char_boundary(text: &str, byte: usize) -> usize {
    match text[byte..].chars().next() {
        Some(c) => byte + c.len_utf8(),
        None => text.len() + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(text: &str, case_sensitive: bool, whole_word: bool) -> Matcher {
        Matcher::new(&SearchRequest::literal(text, case_sensitive, whole_word)).unwrap()
    }

    #[test]
    fn test_forward_from_origin() {
        let m = literal("foo", true, false);
        let text = "foo bar foo baz foo";
        assert_eq!(m.find(text, 0, Direction::Forward).unwrap().start, 0);
        assert_eq!(m.find(text, 1, Direction::Forward).unwrap().start, 8);
        assert_eq!(m.find(text, 17, Direction::Forward), None);
    }

    #[test]
    fn test_backward_starts_before_origin() {
        let m = literal("foo", true, false);
        let text = "foo bar foo baz foo";
        assert_eq!(m.find(text, 19, Direction::Backward).unwrap().start, 16);
        assert_eq!(m.find(text, 16, Direction::Backward).unwrap().start, 8);
        assert_eq!(m.find(text, 8, Direction::Backward).unwrap().start, 0);
        assert_eq!(m.find(text, 0, Direction::Backward), None);
    }

    #[test]
    fn test_backward_from_inside_a_word() {
        let m = literal("world", true, false);
        let found = m.find("hello world", 8, Direction::Backward).unwrap();
        assert_eq!((found.start, found.end), (6, 11));
        assert_eq!(m.find_before("hello world", 8), None);
        assert_eq!(m.find_before("hello world", 11).unwrap().start, 6);
    }

    #[test]
    fn test_backward_finds_overlapping_candidate() {
        let m = literal("aa", true, false);
        assert_eq!(m.find("aaa", 3, Direction::Backward).unwrap().start, 1);
        assert_eq!(m.find_before("aaa", 2).unwrap().start, 0);
    }

    #[test]
    fn test_backward_sees_text_past_origin() {
        let text = "foobar";
        let anchored = Matcher::new(&SearchRequest::pattern("foo$", true)).unwrap();
        assert_eq!(anchored.find(text, 3, Direction::Backward), None);
        assert_eq!(anchored.find_before(text, 3), None);

        let bounded = Matcher::new(&SearchRequest::pattern(r"\bfoo\b", true)).unwrap();
        assert_eq!(bounded.find(text, 3, Direction::Backward), None);
        assert_eq!(bounded.find_before(text, 3), None);
    }

    #[test]
    fn test_case_sensitivity() {
        let text = "Hello HELLO hello";
        assert_eq!(literal("hello", true, false).find(text, 0, Direction::Forward).unwrap().start, 12);
        assert_eq!(literal("hello", false, false).find(text, 0, Direction::Forward).unwrap().start, 0);
    }

    #[test]
    fn test_whole_word() {
        let m = literal("cat", true, true);
        assert_eq!(m.find("category", 0, Direction::Forward), None);
        assert_eq!(m.find("category cat", 0, Direction::Forward).unwrap().start, 9);
        assert_eq!(m.find("cat_x", 0, Direction::Forward), None);
        assert_eq!(m.find("(cat)", 0, Direction::Forward).unwrap().start, 1);
        assert_eq!(m.find("cat concat", 10, Direction::Backward).unwrap().start, 0);
    }

    #[test]
    fn test_literal_is_escaped() {
        let m = literal("a.b", true, false);
        assert_eq!(m.find("axb a.b", 0, Direction::Forward).unwrap().start, 4);
    }

    #[test]
    fn test_char_offsets_with_multibyte_text() {
        let m = literal("ж", true, false);
        let found = m.find("привет ж", 0, Direction::Forward).unwrap();
        assert_eq!((found.start, found.end), (7, 8));
        assert_eq!(found.text, "ж");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Matcher::new(&SearchRequest::pattern("a(", true)).unwrap_err();
        assert!(matches!(err, SearchError::InvalidPattern(_)));
    }

    #[test]
    fn test_empty_query_rejected() {
        assert_eq!(
            Matcher::new(&SearchRequest::literal("", true, false)).unwrap_err(),
            SearchError::EmptyQuery
        );
    }

    #[test]
    fn test_zero_length_matches_skipped() {
        let m = Matcher::new(&SearchRequest::pattern("x*", true)).unwrap();
        let found = m.find("abxx", 0, Direction::Forward).unwrap();
        assert_eq!((found.start, found.end), (2, 4));
        assert_eq!(m.find("abc", 0, Direction::Forward), None);
    }

    #[test]
    fn test_anchors_bind_to_lines() {
        let m = Matcher::new(&SearchRequest::pattern("^b", true)).unwrap();
        assert_eq!(m.find("a\nb", 0, Direction::Forward).unwrap().start, 2);
    }

    #[test]
    fn test_expand_back_references() {
        let m = Matcher::new(&SearchRequest::pattern(r"(\w+)@(\w+)", true)).unwrap();
        let text = "mail user@host now";
        let found = m.find(text, 0, Direction::Forward).unwrap();
        assert_eq!(m.expand(text, &found, "$2 at ${1}"), "host at user");

        // Literal replacement keeps dollar signs
        let lit = literal("a", true, false);
        let found = lit.find("a", 0, Direction::Forward).unwrap();
        assert_eq!(lit.expand("a", &found, "$1"), "$1");
    }

    #[test]
    fn test_expand_uses_surrounding_context() {
        let m = Matcher::new(&SearchRequest::pattern(r"\B(at)", true)).unwrap();
        let found = m.find("cat", 0, Direction::Forward).unwrap();
        assert_eq!(found.text, "at");
        assert_eq!(m.expand("cat", &found, "[$1]"), "[at]");

        let m = Matcher::new(&SearchRequest::pattern("é(.)", true)).unwrap();
        let found = m.find("café! éx", 4, Direction::Forward).unwrap();
        assert_eq!(found.start, 6);
        assert_eq!(m.expand("café! éx", &found, "<$1>"), "<x>");
    }
}
