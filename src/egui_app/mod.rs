//! egui Native Desktop App Module
//!
//! Desktop client of the document-management API: a capture tab that turns
//! a camera still into a titled document, and a search tab that lists,
//! filters and displays stored documents.
//!
//! # Architecture
//!
//! - **`config`** - Startup configuration (file + environment, resolved once)
//! - **`api`** - `DocumentApi` trait and its reqwest implementation
//! - **`camera`** - `Camera` trait and the folder-backed desktop camera
//! - **`request`** - Background request slots polled by the UI
//! - **`capture`** - Capture screen state machine and submission saga
//! - **`search`** - Search screen state
//! - **`viewer`** - Full-screen image viewer state
//! - **`state`** - `AppState`, tying the screens together
//! - **`views`** / **`theme`** - egui rendering
//! - **`main`** - Binary entry point
//!
//! # Example
//!
//! ```rust,no_run
//! // Run the app:
//! // cargo run --bin docscan_app
//! ```

pub mod api;
pub mod camera;
pub mod capture;
pub mod config;
pub mod request;
pub mod search;
pub mod state;
pub mod theme;
pub mod types;
pub mod viewer;
pub mod views;

// Re-export commonly used types
pub use api::{DocumentApi, DocumentQuery, HttpDocumentApi};
pub use camera::{Camera, CapturedPicture, FolderCamera, PermissionStatus};
pub use capture::{CapturePhase, CaptureState};
pub use config::Config;
pub use search::SearchState;
pub use state::AppState;
pub use types::{Alert, AlertKind, AppView};
