//! IAM Identity client errors

use thiserror::Error;

/// Errors that can occur when interacting with the IAM Identity API
#[derive(Debug, Error)]
pub enum IamIdentityError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IAM Identity API returned an error status
    #[error("IAM Identity API error: {status} - {body}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Raw response body
        body: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (invalid token, expired, etc.)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request (e.g., missing required fields)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl IamIdentityError {
    /// HTTP status code carried by the error, if the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the server reported that the resource does not exist
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Map a non-success status and its raw body to the matching variant
    pub fn from_status(status: u16, context: &str, body: String) -> Self {
        match status {
            404 => Self::NotFound(format!("{} - {}", context, body)),
            401 | 403 => Self::Authentication(format!("{}: {} - {}", context, status, body)),
            _ => Self::Api { status, body },
        }
    }
}
