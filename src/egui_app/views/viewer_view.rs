use eframe::egui;

use crate::egui_app::theme::{colors, styles};
use crate::egui_app::viewer::{ImageViewer, ViewerContent};

/// Full-screen viewer, drawn in place of the tab content
pub fn render(ctx: &egui::Context, viewer: &mut ImageViewer) {
    let mut close = false;

    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(colors::VIEWER_BG).inner_margin(egui::Margin::same(12)))
        .show(ctx, |ui| {
            let Some(open) = viewer.current_mut() else {
                return;
            };

            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new(&open.path).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(styles::primary_button("Close")).clicked() {
                        close = true;
                    }
                });
            });
            ui.add_space(8.0);

            match &open.content {
                ViewerContent::Loading => {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                }
                ViewerContent::Failed(message) => {
                    ui.centered_and_justified(|ui| {
                        ui.colored_label(colors::ERROR, message.as_str());
                    });
                }
                ViewerContent::Ready(image) => {
                    let texture = open
                        .texture
                        .get_or_insert_with(|| {
                            ui.ctx().load_texture(
                                format!("document-{}", open.path),
                                image.to_color_image(),
                                egui::TextureOptions::LINEAR,
                            )
                        })
                        .clone();
                    let available = ui.available_size();
                    ui.centered_and_justified(|ui| {
                        ui.add(
                            egui::Image::from_texture(egui::load::SizedTexture::from_handle(&texture))
                                .max_size(available)
                                .maintain_aspect_ratio(true),
                        );
                    });
                }
            }
        });

    if close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        viewer.close();
    }
}
