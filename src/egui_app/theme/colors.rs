//! Color Constants
//!
//! Light theme: white surfaces, near-black text and a teal accent for
//! primary actions.

use eframe::egui::Color32;

/// Screen background
pub const BG: Color32 = Color32::WHITE;

/// Top bar background - Teal
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x0A, 0x7E, 0xA4);

/// Primary text
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0x11, 0x18, 0x1C);

/// Secondary text (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x66, 0x66, 0x66);

/// Placeholder text
pub const TEXT_PLACEHOLDER: Color32 = Color32::from_rgb(0x99, 0x99, 0x99);

/// Text on the accent color
pub const TEXT_LIGHT: Color32 = Color32::WHITE;

/// Primary buttons, selected tab
pub const ACCENT: Color32 = Color32::from_rgb(0x0A, 0x7E, 0xA4);

/// Secondary buttons
pub const BUTTON_SECONDARY: Color32 = Color32::from_rgb(0xF0, 0xF0, 0xF0);

/// Input and dropdown borders
pub const BORDER: Color32 = Color32::from_rgb(0xDD, 0xDD, 0xDD);

/// Selected dropdown row
pub const SELECTED_ITEM: Color32 = Color32::from_rgb(0xE6, 0xF7, 0xFF);

/// Result card background
pub const CARD_BG: Color32 = Color32::from_rgb(0xF8, 0xF8, 0xF8);

/// Shutter button
pub const SHUTTER: Color32 = Color32::from_rgb(0xFF, 0x3B, 0x30);

/// Viewer backdrop
pub const VIEWER_BG: Color32 = Color32::from_rgb(0x10, 0x10, 0x10);

/// Success color - Green
pub const SUCCESS: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// Error color - Red
pub const ERROR: Color32 = Color32::from_rgb(0xE5, 0x39, 0x35);
