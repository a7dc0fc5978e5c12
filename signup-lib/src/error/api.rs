//! Client error types

/// Errors that can occur when calling the sign-up backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a status the client does not handle.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The backend refused the request and listed why.
    #[error("HTTP {status}: {}", .errors.join(", "))]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Error messages from the response body.
        errors: Vec<String>,
    },

    /// Network error during the call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured base URL cannot be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse the response body.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if the backend answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the backend's error messages for a rejected request.
    pub fn rejections(&self) -> &[String] {
        match self {
            Self::Rejected { errors, .. } => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display_joins_messages() {
        let err = ApiError::Rejected {
            status: 409,
            errors: vec!["username is already taken".into(), "second".into()],
        };
        assert_eq!(err.to_string(), "HTTP 409: username is already taken, second");
        assert_eq!(err.status_code(), Some(409));
        assert_eq!(err.rejections().len(), 2);
    }

    #[test]
    fn test_parse_has_no_status() {
        let err = ApiError::parse_with_body("expected array", "{}");
        assert_eq!(err.status_code(), None);
        assert!(err.rejections().is_empty());
        assert_eq!(ApiError::http(500, "boom").to_string(), "HTTP 500: boom");
    }
}
