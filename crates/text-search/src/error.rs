use thiserror::Error;

/// Errors raised while preparing a search.
///
/// An absent match is not an error: it is reported through the result
/// types. Only input the engine cannot act on ends up here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("search text cannot be empty")]
    EmptyQuery,
    #[error("invalid regular expression: {0}")]
    InvalidPattern(String),
}
