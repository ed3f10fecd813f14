use std::time::Duration;

use thiserror::Error;

/// The only failure text ever shown to the user. The precise cause is logged.
pub const GENERIC_ERROR_MESSAGE: &str = "Failed to perform search. Please try again.";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,
    #[error("no response text returned by the model")]
    EmptyResponse,
    #[error("malformed response from the model: {0}")]
    MalformedResponse(#[source] serde_json::Error),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend error [{status}]: {message}")]
    Backend { status: u16, message: String },
    #[error("backend call timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// Coarse taxonomy used for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    EmptyResponse,
    MalformedResponse,
    Transport,
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::MissingApiKey => ErrorKind::Configuration,
            SearchError::EmptyResponse => ErrorKind::EmptyResponse,
            SearchError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            SearchError::Transport(_) | SearchError::Backend { .. } | SearchError::Timeout(_) => {
                ErrorKind::Transport
            }
        }
    }

    pub fn user_message(&self) -> &'static str {
        GENERIC_ERROR_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(SearchError::MissingApiKey.kind(), ErrorKind::Configuration);
        assert_eq!(SearchError::EmptyResponse.kind(), ErrorKind::EmptyResponse);
        let bad = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        assert_eq!(
            SearchError::MalformedResponse(bad).kind(),
            ErrorKind::MalformedResponse
        );
        let backend = SearchError::Backend {
            status: 503,
            message: "overloaded".to_string(),
        };
        assert_eq!(backend.kind(), ErrorKind::Transport);
        assert_eq!(
            SearchError::Timeout(Duration::from_secs(5)).kind(),
            ErrorKind::Transport
        );
    }

    #[test]
    fn test_user_message_is_generic() {
        let backend = SearchError::Backend {
            status: 400,
            message: "API key not valid".to_string(),
        };
        assert_eq!(backend.user_message(), GENERIC_ERROR_MESSAGE);
        assert!(!backend.user_message().contains("API key"));
        assert_eq!(SearchError::MissingApiKey.user_message(), GENERIC_ERROR_MESSAGE);
    }
}
