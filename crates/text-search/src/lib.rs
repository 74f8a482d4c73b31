//! Find, replace and go-to-line engine for quill.
//!
//! The engine turns a search request (literal or regex, case-sensitive or
//! not, whole-word or not, forward or backward, from the cursor or from the
//! buffer boundary) into a single match against a mutable [`Document`],
//! remembers enough to repeat the search, and performs single and bulk
//! replacement while keeping the cursor and selection consistent.
//!
//! The engine never depends on a concrete buffer type: anything that
//! implements [`Document`] can be searched.

mod document;
mod engine;
mod error;
mod matcher;
mod navigation;
mod replace;
mod request;
mod result;
mod state;

pub use document::Document;
pub use engine::SearchEngine;
pub use error::SearchError;
pub use matcher::{Match, Matcher};
pub use replace::Confirm;
pub use request::{Direction, Origin, SearchParams, SearchRequest};
pub use result::{FindResult, GoToResult, ReplaceAllResult, ReplaceResult};
pub use state::SearchState;
