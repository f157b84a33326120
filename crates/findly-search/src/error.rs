//! Error types for the search layer.

use findly_core::error::FindlyError;

/// Errors raised inside provider adapters before they are converted into
/// an `Outcome` at the adapter boundary. They never escape `execute`.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("http error: {0}")]
    Http(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("provider error: {0}")]
    Provider(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Http(err.to_string())
    }
}

impl From<SearchError> for FindlyError {
    fn from(err: SearchError) -> Self {
        FindlyError::Search(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_display() {
        let err = SearchError::Http("connection refused".to_string());
        assert_eq!(err.to_string(), "http error: connection refused");

        let err = SearchError::Parse("unexpected envelope".to_string());
        assert_eq!(err.to_string(), "parse error: unexpected envelope");
    }

    #[test]
    fn test_converts_to_core_error() {
        let err: FindlyError = SearchError::Provider("quota exceeded".to_string()).into();
        assert!(matches!(err, FindlyError::Search(_)));
    }
}
