use std::sync::Arc;

use crate::egui_app::api::DocumentApi;
use crate::egui_app::camera::Camera;
use crate::egui_app::capture::{CapturePhase, CaptureState};
use crate::egui_app::search::SearchState;
use crate::egui_app::{AppView, Config};

/// Central application state shared across egui views.
pub struct AppState {
    pub config: Config,
    pub current_view: AppView,
    pub capture: CaptureState,
    pub search: SearchState,
}

impl AppState {
    pub fn new(config: Config, api: Arc<dyn DocumentApi>, camera: Box<dyn Camera>) -> Self {
        tracing::info!("[STATE] using document API at {}", config.api_url(""));
        Self {
            capture: CaptureState::new(camera, Arc::clone(&api), config.created_by()),
            search: SearchState::new(api),
            config,
            current_view: AppView::Capture,
        }
    }

    /// Switch tabs. Leaving the capture tab discards an unsent picture.
    pub fn set_view(&mut self, view: AppView) {
        if view == self.current_view {
            return;
        }
        if self.current_view == AppView::Capture {
            self.capture.cancel();
        }
        self.current_view = view;
    }

    /// Per-frame bookkeeping: mount the visible screen and collect results
    /// of background requests for both screens.
    pub fn tick(&mut self) {
        match self.current_view {
            AppView::Capture => self.capture.activate(),
            AppView::Search => self.search.load(),
        }
        self.capture.poll();
        self.search.poll();
    }

    /// Whether any screen waits on the network, so the UI keeps repainting
    pub fn is_busy(&self) -> bool {
        self.capture.is_submitting()
            || self.capture.is_compensating()
            || self.search.is_searching()
            || self.search.is_loading_categories()
            || self.search.viewer().is_open()
    }

    /// Whether the visible screen shows a live viewfinder
    pub fn is_previewing(&self) -> bool {
        self.current_view == AppView::Capture && self.capture.phase() == CapturePhase::Previewing
    }
}
