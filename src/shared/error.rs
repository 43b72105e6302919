//! Shared Error Types
//!
//! Every failure a screen can run into while talking to the camera or the
//! document API ends up as a [`ClientError`]. Screens never inspect the
//! variant beyond picking the alert text, so the `Display` output is what the
//! user eventually reads.
//!
//! # Error Categories
//!
//! - `PermissionDenied` - the camera is not available to us
//! - `Network` - the request never produced a response
//! - `Status` - the server answered with a non-2xx status
//! - `Decode` - the response body was not what we expected
//! - `Validation` - a precondition on user input failed, no request was made
//! - `Camera` - the capture itself failed
//!
//! # Usage
//!
//! ```rust
//! use docscan::shared::error::ClientError;
//!
//! let error = ClientError::validation("title", "Please enter a document title");
//! assert!(error.is_validation());
//! ```
use thiserror::Error;

/// Errors produced by the client flows
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Camera permission was refused
    #[error("Camera permission denied: {0}")]
    PermissionDenied(String),

    /// Transport failure, no HTTP response received
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("Request failed: {status} - {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or status reason
        body: String,
    },

    /// The response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// A client-side precondition failed
    #[error("{message}")]
    Validation {
        /// The input that failed validation
        field: &'static str,
        /// Human-readable error message
        message: String,
    },

    /// Capture or image processing failure
    #[error("Camera error: {0}")]
    Camera(String),
}

impl ClientError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// HTTP status carried by the error, if any
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::status(status.as_u16(), err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(format!("JSON error: {}", err))
    }
}

impl From<image::ImageError> for ClientError {
    fn from(err: image::ImageError) -> Self {
        Self::Camera(err.to_string())
    }
}
