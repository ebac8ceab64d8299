use thiserror::Error;

/// Errors raised while talking to the Mars analysis backend
#[derive(Error, Debug)]
pub enum MarsError {
    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Request Error: {0}")]
    RequestError(String),

    #[error("Parsing Error: {0}")]
    ParsingError(String),

    #[error("HTTP error! status: {status_code}")]
    HttpError { status_code: u16 },
}

impl MarsError {
    /// Text shown in an error slot of the view, e.g. `Error: HTTP error! status: 503`.
    pub fn user_message(&self) -> String {
        format!("Error: {}", self)
    }
}

/// Result type for backend operations
pub type MarsResult<T> = Result<T, MarsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_mentions_status_code() {
        let err = MarsError::HttpError { status_code: 502 };
        assert_eq!(err.to_string(), "HTTP error! status: 502");
        assert_eq!(err.user_message(), "Error: HTTP error! status: 502");
    }

    #[test]
    fn test_request_error_message() {
        let err = MarsError::RequestError("connection refused".to_string());
        assert_eq!(err.user_message(), "Error: Request Error: connection refused");
    }
}
