use eframe::egui;

use crate::egui_app::search::SearchState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::render_alert;
use crate::shared::document::{Category, Document};

pub fn render(ui: &mut egui::Ui, search: &mut SearchState) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        render_search_bar(ui, search);
        ui.add_space(24.0);
        render_category_dropdown(ui, search);
        ui.add_space(24.0);
        render_results(ui, search);
    });

    if let Some(alert) = search.alert().cloned() {
        if render_alert(ui.ctx(), "search_alert", &alert) {
            search.dismiss_alert();
        }
    }
}

fn render_search_bar(ui: &mut egui::Ui, search: &mut SearchState) {
    ui.label(egui::RichText::new("Search Documents").size(16.0).strong().color(colors::TEXT_PRIMARY));
    ui.horizontal(|ui| {
        let searching = search.is_searching();
        let input = ui.add(
            egui::TextEdit::singleline(&mut search.query_input)
                .hint_text("Enter search query...")
                .desired_width(ui.available_width() - 140.0),
        );
        let enter = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        if !search.query_input.is_empty() && ui.button("✕").on_hover_text("Clear").clicked() {
            search.clear_query();
            return;
        }

        if searching {
            ui.spinner();
        } else if ui.add(styles::primary_button("Search")).clicked() || enter {
            search.search();
        }
    });
}

fn render_category_dropdown(ui: &mut egui::Ui, search: &mut SearchState) {
    ui.label(egui::RichText::new("Category").size(16.0).strong().color(colors::TEXT_PRIMARY));

    let (text, color) = match search.selected_category() {
        Some(category) => (category.name.clone(), colors::TEXT_PRIMARY),
        None => ("Select a category".to_string(), colors::TEXT_PLACEHOLDER),
    };
    let arrow = if search.is_dropdown_open() { "▲" } else { "▼" };
    let button = egui::Button::new(egui::RichText::new(format!("{}   {}", text, arrow)).color(color))
        .fill(colors::BG)
        .stroke(egui::Stroke::new(1.0, colors::BORDER))
        .min_size(egui::vec2(ui.available_width(), 40.0));
    if ui.add(button).clicked() {
        search.toggle_dropdown();
    }

    if !search.is_dropdown_open() {
        return;
    }

    let mut picked: Option<Option<Category>> = None;
    styles::dropdown_frame().show(ui, |ui| {
        if search.is_loading_categories() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(egui::RichText::new("Loading categories...").color(colors::TEXT_SECONDARY));
            });
            return;
        }
        if search.categories().is_empty() {
            ui.label(egui::RichText::new("No categories available").color(colors::TEXT_PLACEHOLDER));
            return;
        }

        egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
            let selected_id = search.selected_category().map(|c| c.id.clone());
            if ui
                .selectable_label(selected_id.is_none(), "All categories")
                .clicked()
            {
                picked = Some(None);
            }
            for category in search.categories() {
                let is_selected = selected_id.as_deref() == Some(category.id.as_str());
                if ui.selectable_label(is_selected, category.name.as_str()).clicked() {
                    picked = Some(Some(category.clone()));
                }
            }
        });
    });

    if let Some(choice) = picked {
        search.select_category(choice);
    }
}

fn render_results(ui: &mut egui::Ui, search: &mut SearchState) {
    if search.results().is_empty() {
        if !search.is_searching() {
            ui.label(egui::RichText::new("No documents").color(colors::TEXT_PLACEHOLDER));
        }
        return;
    }

    ui.label(
        egui::RichText::new(format!("Search Results ({})", search.results().len()))
            .size(18.0)
            .strong()
            .color(colors::TEXT_PRIMARY),
    );

    let mut opened: Option<Document> = None;
    for document in search.results() {
        styles::result_card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(
                        egui::RichText::new(document.display_title())
                            .size(16.0)
                            .strong()
                            .color(colors::TEXT_PRIMARY),
                    );
                    if let Some(description) = document.description() {
                        ui.label(egui::RichText::new(description).color(colors::TEXT_SECONDARY));
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(styles::secondary_button("View")).clicked() {
                        opened = Some(document.clone());
                    }
                });
            });
        });
        ui.add_space(4.0);
    }

    if let Some(document) = opened {
        search.open_document(&document);
    }
}
