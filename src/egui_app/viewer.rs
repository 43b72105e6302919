//! Full-screen Image Viewer State
//!
//! Fetches a stored page image, decodes it off the UI thread and keeps the
//! pixels until the view turns them into a texture.

use std::sync::Arc;

use eframe::egui;

use crate::egui_app::api::DocumentApi;
use crate::egui_app::request::RequestSlot;
use crate::shared::error::ClientError;

/// RGBA pixels ready for upload to the GPU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    pub fn decode(bytes: &[u8]) -> Result<Self, ClientError> {
        let rgba = image::load_from_memory(bytes)
            .map_err(|e| ClientError::Decode(format!("Unsupported image data: {}", e)))?
            .to_rgba8();
        Ok(Self::from_rgba(rgba))
    }

    pub fn from_rgba(rgba: image::RgbaImage) -> Self {
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            rgba: rgba.into_raw(),
        }
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.width as usize, self.height as usize],
            &self.rgba,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerContent {
    Loading,
    Ready(DecodedImage),
    Failed(String),
}

pub struct OpenImage {
    pub path: String,
    pub content: ViewerContent,
    pub texture: Option<egui::TextureHandle>,
}

pub struct ImageViewer {
    api: Arc<dyn DocumentApi>,
    open: Option<OpenImage>,
    request: RequestSlot<Result<DecodedImage, ClientError>>,
}

impl ImageViewer {
    pub fn new(api: Arc<dyn DocumentApi>) -> Self {
        Self {
            api,
            open: None,
            request: RequestSlot::new("image"),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<&OpenImage> {
        self.open.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut OpenImage> {
        self.open.as_mut()
    }

    /// Show the stored image at `path`. Replaces whatever was showing.
    pub fn open(&mut self, path: &str) {
        tracing::info!("[VIEWER] opening {}", path);
        let api = Arc::clone(&self.api);
        let owned = path.to_string();
        self.request.start(move || {
            let bytes = api.fetch_image(&owned)?;
            DecodedImage::decode(&bytes)
        });
        self.open = Some(OpenImage {
            path: path.to_string(),
            content: ViewerContent::Loading,
            texture: None,
        });
    }

    pub fn close(&mut self) {
        self.request.abandon();
        self.open = None;
    }

    pub fn poll(&mut self) {
        let Some(result) = self.request.poll() else {
            return;
        };
        let Some(open) = self.open.as_mut() else {
            return;
        };
        open.content = match result {
            Ok(image) => ViewerContent::Ready(image),
            Err(e) => {
                tracing::error!("[VIEWER] failed to load {}: {}", open.path, e);
                ViewerContent::Failed(format!("Failed to load image: {}", e))
            }
        };
    }
}
