//! docscan - Main Library
//!
//! docscan is a desktop client for a document-management REST API. It
//! captures a still of a paper document, files it under a title, and lets
//! the user search stored documents and view their page images.
//!
//! # Module Structure
//!
//! - **`shared`** - The API contract, independent of any UI
//!   - Category and Document records, create payload
//!   - Endpoint paths and the URL resolver
//!   - Configuration and error types
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!   - HTTP client, camera abstraction
//!   - Capture and search screen state
//!   - Views and theme
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use docscan::egui_app::{AppState, Config, FolderCamera, HttpDocumentApi};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let api = Arc::new(HttpDocumentApi::new(config.app().clone())?);
//! let camera = Box::new(FolderCamera::new(config.capture_dir()));
//! let state = AppState::new(config, api, camera);
//! # let _ = state;
//! # Ok(())
//! # }
//! ```
//!
//! # Threading
//!
//! egui runs on one thread. Every network call happens on a short-lived
//! worker thread and reports back over a channel that the screen polls once
//! per frame; see `egui_app::request`.
//!
//! # Error Handling
//!
//! - `Result<T, ClientError>` for everything that touches the camera or the network
//! - `ConfigError` for startup configuration
//! - Screens turn errors into an `Alert`

/// Shared types and data structures
pub mod shared;

/// egui native desktop app
/// Only compiled for native targets (not WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_app;
