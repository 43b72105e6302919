use eframe::egui;

use crate::egui_app::capture::{CapturePhase, CaptureState};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::render_alert;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let capture_dir = state.config.capture_dir();
    let capture = &mut state.capture;

    match capture.phase() {
        CapturePhase::Idle => {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("Checking permissions").color(colors::TEXT_SECONDARY));
            });
        }
        CapturePhase::PermissionDenied => {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 3.0);
                ui.label(egui::RichText::new("Camera not allowed").size(20.0).color(colors::TEXT_PRIMARY));
                ui.label(
                    egui::RichText::new(format!("Cannot read the capture folder {}", capture_dir.display()))
                        .color(colors::TEXT_SECONDARY),
                );
                ui.add_space(12.0);
                if ui.add(styles::primary_button("Allow camera access")).clicked() {
                    capture.request_permission();
                }
            });
        }
        CapturePhase::Previewing | CapturePhase::Captured | CapturePhase::Submitting => {
            ui.vertical_centered(|ui| {
                let viewfinder = (ui.available_size() - egui::vec2(0.0, SHUTTER_AREA)).max(egui::Vec2::ZERO);
                match viewfinder_texture(ui.ctx(), capture) {
                    Some(texture) => {
                        ui.add(
                            egui::Image::from_texture(egui::load::SizedTexture::from_handle(&texture))
                                .max_size(viewfinder)
                                .maintain_aspect_ratio(true),
                        );
                    }
                    None => {
                        ui.add_space(viewfinder.y / 3.0);
                        ui.label(egui::RichText::new("Camera ready").size(20.0).color(colors::TEXT_PRIMARY));
                        ui.label(
                            egui::RichText::new(format!("Stills are taken from {}", capture_dir.display()))
                                .color(colors::TEXT_SECONDARY),
                        );
                    }
                }
                ui.add_space(16.0);
                if shutter_button(ui).clicked() {
                    capture.take_picture();
                }
            });
        }
    }

    if matches!(capture.phase(), CapturePhase::Captured | CapturePhase::Submitting) {
        render_title_dialog(ui.ctx(), capture);
    }

    if let Some(alert) = capture.alert().cloned() {
        if render_alert(ui.ctx(), "capture_alert", &alert) {
            capture.dismiss_alert();
        }
    }
}

/// Height kept free below the viewfinder for the shutter
const SHUTTER_AREA: f32 = 110.0;

fn viewfinder_texture(ctx: &egui::Context, capture: &mut CaptureState) -> Option<egui::TextureHandle> {
    let frame = capture.preview_mut()?;
    let texture = frame.texture.get_or_insert_with(|| {
        ctx.load_texture("viewfinder", frame.image.to_color_image(), egui::TextureOptions::LINEAR)
    });
    Some(texture.clone())
}

fn shutter_button(ui: &mut egui::Ui) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(80.0, 80.0), egui::Sense::click());
    let painter = ui.painter();
    painter.circle_stroke(rect.center(), 38.0, egui::Stroke::new(4.0, colors::BORDER));
    let inner = if response.hovered() { 34.0 } else { 32.0 };
    painter.circle_filled(rect.center(), inner, colors::SHUTTER);
    response.on_hover_text("Take picture")
}

fn render_title_dialog(ctx: &egui::Context, capture: &mut CaptureState) {
    let submitting = capture.is_submitting();
    let editable = capture.title_editable();
    let mut submit = false;
    let mut cancel = false;

    let response = egui::Modal::new(egui::Id::new("title_dialog"))
        .frame(styles::modal_frame())
        .show(ctx, |ui| {
            ui.set_width(340.0);
            ui.label(egui::RichText::new("Document title").size(20.0).strong().color(colors::TEXT_PRIMARY));
            if let Some(picture) = capture.picture() {
                ui.label(
                    egui::RichText::new(format!("{} × {} still", picture.width, picture.height))
                        .color(colors::TEXT_SECONDARY),
                );
            }
            ui.add_space(12.0);

            let edit = ui.add_enabled(
                editable,
                egui::TextEdit::singleline(&mut capture.title_input)
                    .hint_text("Enter document title...")
                    .desired_width(f32::INFINITY),
            );
            if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }
            if !editable && !submitting {
                ui.label(
                    egui::RichText::new("The record exists; submitting retries the image upload.")
                        .color(colors::TEXT_SECONDARY),
                );
            }
            ui.add_space(16.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if submitting {
                    ui.spinner();
                } else if ui.add(styles::primary_button("Submit")).clicked() {
                    submit = true;
                }
                if ui
                    .add_enabled(!submitting, styles::secondary_button("Cancel"))
                    .clicked()
                {
                    cancel = true;
                }
            });
        });

    if response.should_close() {
        cancel = true;
    }
    if submit {
        capture.submit();
    } else if cancel {
        capture.cancel();
    }
}
