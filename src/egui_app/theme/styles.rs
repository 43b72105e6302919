//! Theme Styling Functions
//!
//! Frame builders and the global style used by every screen.

use eframe::egui::{self, Color32, CornerRadius, Stroke};
use super::colors;

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::light();
    style.visuals.panel_fill = colors::BG;
    style.visuals.window_fill = colors::BG;
    style.visuals.window_stroke = Stroke::new(1.0, colors::BORDER);

    style.visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, colors::BORDER);
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors::TEXT_PRIMARY);
    style.visuals.widgets.hovered.bg_fill = colors::SELECTED_ITEM;
    style.visuals.widgets.active.bg_fill = colors::ACCENT;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.visuals.selection.bg_fill = colors::ACCENT;
    style.visuals.selection.stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.spacing.item_spacing = egui::vec2(8.0, 8.0);

    ctx.set_style(style);
}

/// Create a frame style for the top bar
pub fn top_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8))
}

/// Create a frame style for screen bodies
pub fn screen_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::BG)
        .inner_margin(egui::Margin::same(16))
}

/// Create a frame for search results
pub fn result_card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::CARD_BG)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::same(12))
}

/// Create a frame for the category dropdown menu
pub fn dropdown_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::BG)
        .stroke(Stroke::new(1.0, colors::BORDER))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::same(4))
}

/// Create a frame for modal dialogs
pub fn modal_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::BG)
        .corner_radius(CornerRadius::same(16))
        .inner_margin(egui::Margin::same(24))
        .shadow(egui::epaint::Shadow {
            offset: [0, 4],
            blur: 12,
            spread: 0,
            color: Color32::from_black_alpha(60),
        })
}

/// Primary action button
pub fn primary_button(label: &str) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(label.to_string()).color(colors::TEXT_LIGHT).strong())
        .fill(colors::ACCENT)
        .corner_radius(CornerRadius::same(8))
}

/// Secondary action button
pub fn secondary_button(label: &str) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(label.to_string()).color(colors::TEXT_SECONDARY).strong())
        .fill(colors::BUTTON_SECONDARY)
        .corner_radius(CornerRadius::same(8))
}
