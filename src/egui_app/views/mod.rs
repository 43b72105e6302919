use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::{Alert, AlertKind, AppView};

pub mod capture_view;
pub mod search_view;
pub mod viewer_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new("📄 docscan").size(18.0).strong());
                ui.add_space(24.0);

                let mut view = state.current_view;
                ui.selectable_value(&mut view, AppView::Capture, tab_label("📷 Capture"));
                ui.selectable_value(&mut view, AppView::Search, tab_label("🔍 Search"));
                state.set_view(view);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if state.is_busy() {
                        ui.spinner();
                    }
                    ui.colored_label(colors::TEXT_LIGHT, state.config.app().api_base_url.as_str());
                });
            });
        });
}

fn tab_label(text: &str) -> egui::RichText {
    egui::RichText::new(text).color(colors::TEXT_LIGHT).size(15.0)
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    if state.current_view == AppView::Search && state.search.viewer().is_open() {
        viewer_view::render(ctx, state.search.viewer_mut());
        return;
    }

    egui::CentralPanel::default()
        .frame(styles::screen_frame())
        .show(ctx, |ui| match state.current_view {
            AppView::Capture => capture_view::render(ui, state),
            AppView::Search => search_view::render(ui, &mut state.search),
        });
}

/// Show an alert as a modal. Returns true once the user dismissed it.
pub fn render_alert(ctx: &egui::Context, id: &str, alert: &Alert) -> bool {
    let mut dismissed = false;
    let response = egui::Modal::new(egui::Id::new(id))
        .frame(styles::modal_frame())
        .show(ctx, |ui| {
            ui.set_max_width(360.0);
            let title_color = match alert.kind {
                AlertKind::Success => colors::SUCCESS,
                AlertKind::Error => colors::ERROR,
            };
            ui.label(egui::RichText::new(&alert.title).size(20.0).strong().color(title_color));
            ui.add_space(8.0);
            ui.label(egui::RichText::new(&alert.message).color(colors::TEXT_PRIMARY));
            ui.add_space(16.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add(styles::primary_button("OK")).clicked() {
                    dismissed = true;
                }
            });
        });
    dismissed || response.should_close()
}
