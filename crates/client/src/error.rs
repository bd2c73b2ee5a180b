//! Error taxonomy for backend-facing calls.
//!
//! Every failure is surfaced to the caller; nothing is retried automatically
//! and no failure is fatal - callers recover to their pre-call state and may
//! resubmit.

use thiserror::Error;

/// Errors that can occur when talking to the Ecopuls backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never reached the server or produced no response.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response. The message comes from the response's JSON
    /// `{message}` body when present, falling back to the HTTP status text.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// A token is required but absent; the request was never issued.
    #[error("{0}")]
    AuthRequired(String),

    /// A required field was empty; checked before submission.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A 2xx response carried a body we could not decode.
    #[error("malformed response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Whether this error is a server-side 401, i.e. the session expired or
    /// the token was rejected. Callers should treat this as "please log in
    /// again".
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Server { status: 401, .. })
    }

    /// Whether this error is a server-side 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Server { status: 404, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_unauthorized() {
        let err = ApiError::Server {
            status: 401,
            message: "Invalid token".to_string(),
        };
        assert!(err.is_unauthorized());

        let err = ApiError::Server {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(!err.is_unauthorized());
        assert!(!ApiError::AuthRequired("login first".to_string()).is_unauthorized());
    }

    #[test]
    fn test_display_includes_status_and_message() {
        let err = ApiError::Server {
            status: 404,
            message: "Product not found".to_string(),
        };
        assert_eq!(err.to_string(), "server error (404): Product not found");
    }
}
