//! Common test utilities and helpers
//!
//! - Fake document API and camera
//! - wiremock-backed document API
//! - Assertion macros and polling helper

#![allow(dead_code)]

pub mod assertions;
pub mod fake_api;
pub mod mock_server;

// Re-export commonly used utilities
pub use assertions::*;
pub use fake_api::*;
pub use mock_server::*;
