/**
 * docscan Desktop App - Main Entry Point
 *
 * Resolves configuration once, builds the API client and the camera, and
 * hands them to the egui app.
 */
use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use docscan::egui_app::capture::PREVIEW_REFRESH;
use docscan::egui_app::theme::styles;
use docscan::egui_app::{views, AppState, Config, FolderCamera, HttpDocumentApi};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = Config::load()?;
    tracing::info!(
        "[STARTUP] API base {}, capture folder {}",
        config.app().api_base_url,
        config.capture_dir().display()
    );

    let api = Arc::new(HttpDocumentApi::new(config.app().clone())?);
    let camera = Box::new(FolderCamera::new(config.capture_dir()));
    let state = AppState::new(config, api, camera);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 820.0])
            .with_min_inner_size([360.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "docscan",
        options,
        Box::new(|cc| {
            styles::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(DocscanApp { state }))
        }),
    )?;
    Ok(())
}

/// Main application state
struct DocscanApp {
    state: AppState,
}

impl eframe::App for DocscanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.tick();

        views::render_top_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);

        // Worker threads report through channels, keep polling while they run
        if self.state.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else if self.state.is_previewing() {
            ctx.request_repaint_after(PREVIEW_REFRESH);
        }
    }
}
