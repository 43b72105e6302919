//! Theme Module
//!
//! Color scheme and frame builders for the capture and search screens.
//!
//! ```rust,ignore
//! use crate::egui_app::theme::{colors, styles};
//!
//! styles::apply_global_theme(ctx);
//! styles::result_card_frame().show(ui, |ui| {
//!     ui.colored_label(colors::TEXT_PRIMARY, "Lease");
//! });
//! ```

pub mod colors;
pub mod styles;

pub use colors::*;
pub use styles::*;
