//! Camera Capture
//!
//! The capture screen only needs three things from a camera: its permission
//! state, a way to ask for permission, and a still. [`Camera`] is that seam.
//!
//! On the desktop the platform capture tool drops stills into a folder;
//! [`FolderCamera`] treats that folder as the camera and hands out the newest
//! image in it, re-encoded as JPEG. The same newest image doubles as the
//! viewfinder.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use image::codecs::jpeg::JpegEncoder;

use crate::egui_app::viewer::DecodedImage;
use crate::shared::error::ClientError;

/// JPEG quality used for captured stills
pub const CAPTURE_JPEG_QUALITY: u8 = 80;

/// Longest edge of a viewfinder frame
pub const PREVIEW_MAX_EDGE: u32 = 640;

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Camera permission as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Undetermined,
    Granted,
    Denied,
}

/// A still held in memory between capture and submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPicture {
    /// Where the still came from
    pub uri: String,
    /// JPEG-encoded image
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub trait Camera: Send {
    fn permission(&self) -> PermissionStatus;

    /// Ask the platform for access and report the outcome
    fn request_permission(&mut self) -> PermissionStatus;

    fn capture(&mut self) -> Result<CapturedPicture, ClientError>;

    /// A new viewfinder frame, or `None` when nothing changed since the
    /// last call. Cameras without a viewfinder keep the default.
    fn preview(&mut self) -> Result<Option<DecodedImage>, ClientError> {
        Ok(None)
    }
}

/// Folder-backed camera
pub struct FolderCamera {
    dir: PathBuf,
    status: PermissionStatus,
    /// Still shown in the viewfinder, keyed by path and mtime
    previewed: Option<(PathBuf, SystemTime)>,
}

impl FolderCamera {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            status: PermissionStatus::Undetermined,
            previewed: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Newest image in the folder with its mtime, if there is one
    fn newest_image(&self) -> Result<Option<(SystemTime, PathBuf)>, ClientError> {
        let entries = fs::read_dir(&self.dir)
            .map_err(|e| ClientError::Camera(format!("Cannot read {:?}: {}", self.dir, e)))?;

        Ok(entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_image(path))
            .map(|path| {
                let modified = fs::metadata(&path)
                    .and_then(|m| m.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                (modified, path)
            })
            .max())
    }

    fn read(path: &Path) -> Result<Vec<u8>, ClientError> {
        fs::read(path).map_err(|e| ClientError::Camera(format!("Cannot read {:?}: {}", path, e)))
    }
}

impl Camera for FolderCamera {
    fn permission(&self) -> PermissionStatus {
        self.status
    }

    fn request_permission(&mut self) -> PermissionStatus {
        self.status = match fs::read_dir(&self.dir) {
            Ok(_) => PermissionStatus::Granted,
            Err(e) => {
                tracing::warn!("[CAMERA] capture folder {:?} unavailable: {}", self.dir, e);
                PermissionStatus::Denied
            }
        };
        self.status
    }

    fn capture(&mut self) -> Result<CapturedPicture, ClientError> {
        if self.status != PermissionStatus::Granted {
            return Err(ClientError::PermissionDenied(
                "camera access has not been granted".to_string(),
            ));
        }
        let (_, path) = self
            .newest_image()?
            .ok_or_else(|| ClientError::Camera(format!("No image found in {:?}", self.dir)))?;
        let raw = Self::read(&path)?;
        let picture = encode_still(&raw, path.display().to_string())?;
        tracing::info!(
            "[CAMERA] captured {} ({}x{}, {} bytes)",
            picture.uri,
            picture.width,
            picture.height,
            picture.bytes.len()
        );
        Ok(picture)
    }

    fn preview(&mut self) -> Result<Option<DecodedImage>, ClientError> {
        if self.status != PermissionStatus::Granted {
            return Ok(None);
        }
        let Some((modified, path)) = self.newest_image()? else {
            return Ok(None);
        };
        if self
            .previewed
            .as_ref()
            .is_some_and(|(seen, at)| *seen == path && *at == modified)
        {
            return Ok(None);
        }

        let mut frame = image::load_from_memory(&Self::read(&path)?)?;
        if frame.width() > PREVIEW_MAX_EDGE || frame.height() > PREVIEW_MAX_EDGE {
            frame = frame.thumbnail(PREVIEW_MAX_EDGE, PREVIEW_MAX_EDGE);
        }
        tracing::debug!("[CAMERA] viewfinder shows {}", path.display());
        self.previewed = Some((path, modified));
        Ok(Some(DecodedImage::from_rgba(frame.to_rgba8())))
    }
}

/// Decode any supported still and re-encode it as JPEG
pub fn encode_still(raw: &[u8], uri: String) -> Result<CapturedPicture, ClientError> {
    let decoded = image::load_from_memory(raw)?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, CAPTURE_JPEG_QUALITY).encode_image(&rgb)?;

    Ok(CapturedPicture {
        uri,
        bytes: out.into_inner(),
        width,
        height,
    })
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use image::{ImageFormat, Rgb, RgbImage};

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, Rgb([200, 180, 40]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();
        path
    }

    #[test]
    fn test_permission_starts_undetermined() {
        let dir = tempfile::tempdir().unwrap();
        let camera = FolderCamera::new(dir.path());
        assert_eq!(camera.permission(), PermissionStatus::Undetermined);
    }

    #[test]
    fn test_missing_folder_is_denied() {
        let dir = tempfile::tempdir().unwrap();
        let mut camera = FolderCamera::new(dir.path().join("nope"));
        assert_eq!(camera.request_permission(), PermissionStatus::Denied);
        assert_matches!(camera.capture(), Err(ClientError::PermissionDenied(_)));
    }

    #[test]
    fn test_capture_without_images() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        let mut camera = FolderCamera::new(dir.path());
        camera.request_permission();
        assert_matches!(camera.capture(), Err(ClientError::Camera(_)));
    }

    #[test]
    fn test_capture_reencodes_as_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "page.PNG", 16, 8);
        let mut camera = FolderCamera::new(dir.path());
        assert_eq!(camera.request_permission(), PermissionStatus::Granted);

        let picture = camera.capture().unwrap();
        assert_eq!((picture.width, picture.height), (16, 8));
        assert_eq!(image::guess_format(&picture.bytes).unwrap(), ImageFormat::Jpeg);
        assert!(picture.uri.ends_with("page.PNG"));
    }

    #[test]
    fn test_encode_still_rejects_garbage() {
        assert_matches!(
            encode_still(b"not an image", "x".into()),
            Err(ClientError::Camera(_))
        );
    }

    #[test]
    fn test_preview_only_reports_new_stills() {
        let dir = tempfile::tempdir().unwrap();
        let mut camera = FolderCamera::new(dir.path());
        assert_eq!(camera.preview().unwrap(), None);

        camera.request_permission();
        assert_eq!(camera.preview().unwrap(), None);

        write_png(dir.path(), "first.png", 1280, 640);
        let frame = camera.preview().unwrap().expect("first frame");
        assert_eq!((frame.width, frame.height), (PREVIEW_MAX_EDGE, 320));
        assert_eq!(camera.preview().unwrap(), None);

        // A fresh still replaces the old one in the viewfinder
        fs::remove_file(dir.path().join("first.png")).unwrap();
        write_png(dir.path(), "second.png", 20, 10);
        let frame = camera.preview().unwrap().expect("second frame");
        assert_eq!((frame.width, frame.height), (20, 10));
    }
}
