//! Shared Module
//!
//! Types that describe the document API contract independently of any UI:
//! wire records, endpoint configuration and the error taxonomy. Everything
//! here is plain data and pure functions.

/// Application configuration and URL resolution
pub mod config;

/// Document API records
pub mod document;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use config::{build_api_url, endpoints, AppConfig, AppConfigBuilder, ConfigError};
pub use document::{Category, CreateDocumentRequest, CreatedDocument, Document, NewDocument};
pub use error::ClientError;
