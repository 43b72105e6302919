//! Capture Screen State
//!
//! Drives the camera tab:
//!
//! ```text
//! Idle -> Previewing -> Captured -> Submitting -> Previewing
//!   \                      ^             |
//!    -> PermissionDenied   '-- failure --'
//! ```
//!
//! A captured picture stays in memory, together with its shared filename and
//! submission progress, until it is submitted successfully or discarded.
//! Discarding a picture whose record already exists starts a compensation;
//! every compensation runs to completion and a failed one gets its own alert.

pub mod saga;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use eframe::egui;

use crate::egui_app::api::DocumentApi;
use crate::egui_app::camera::{Camera, CapturedPicture, PermissionStatus};
use crate::egui_app::request::{RequestPool, RequestSlot};
use crate::egui_app::types::Alert;
use crate::egui_app::viewer::DecodedImage;
use crate::shared::error::ClientError;

pub use saga::{
    compensate, run_submission, timestamp_filename, Compensation, Submission, SubmissionFailure,
    SubmissionProgress, SubmitStep,
};

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Document created and image uploaded successfully!";
pub const CAPTURE_FAILED_MESSAGE: &str = "Failed to take picture. Please try again.";
pub const EMPTY_TITLE_MESSAGE: &str = "Please enter a document title";
pub const NO_PICTURE_MESSAGE: &str = "No picture captured";

/// How often the viewfinder asks the camera for a new frame
pub const PREVIEW_REFRESH: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePhase {
    Idle,
    PermissionDenied,
    Previewing,
    /// Picture held, title dialog open
    Captured,
    Submitting,
}

/// Current viewfinder frame and its GPU texture, created by the view
pub struct PreviewFrame {
    pub image: DecodedImage,
    pub texture: Option<egui::TextureHandle>,
}

type SubmissionResult = Result<SubmissionProgress, SubmissionFailure>;

pub struct CaptureState {
    camera: Box<dyn Camera>,
    api: Arc<dyn DocumentApi>,
    created_by: i64,
    phase: CapturePhase,
    permission_requested: bool,
    picture: Option<CapturedPicture>,
    progress: Option<SubmissionProgress>,
    pub title_input: String,
    alert: Option<Alert>,
    /// Failed compensations, shown one after another
    compensation_alerts: VecDeque<Alert>,
    preview: Option<PreviewFrame>,
    preview_checked: Option<Instant>,
    submission: RequestSlot<SubmissionResult>,
    compensations: RequestPool<Compensation>,
}

impl CaptureState {
    pub fn new(camera: Box<dyn Camera>, api: Arc<dyn DocumentApi>, created_by: i64) -> Self {
        Self {
            camera,
            api,
            created_by,
            phase: CapturePhase::Idle,
            permission_requested: false,
            picture: None,
            progress: None,
            title_input: String::new(),
            alert: None,
            compensation_alerts: VecDeque::new(),
            preview: None,
            preview_checked: None,
            submission: RequestSlot::new("submission"),
            compensations: RequestPool::new("compensation"),
        }
    }

    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    pub fn picture(&self) -> Option<&CapturedPicture> {
        self.picture.as_ref()
    }

    pub fn progress(&self) -> Option<&SubmissionProgress> {
        self.progress.as_ref()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref().or_else(|| self.compensation_alerts.front())
    }

    pub fn dismiss_alert(&mut self) {
        if self.alert.take().is_none() {
            self.compensation_alerts.pop_front();
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == CapturePhase::Submitting
    }

    /// Whether an orphaned record is still being deleted
    pub fn is_compensating(&self) -> bool {
        self.compensations.is_pending()
    }

    pub fn preview(&self) -> Option<&PreviewFrame> {
        self.preview.as_ref()
    }

    pub fn preview_mut(&mut self) -> Option<&mut PreviewFrame> {
        self.preview.as_mut()
    }

    /// The title is frozen once the server holds a record with it
    pub fn title_editable(&self) -> bool {
        !self.is_submitting()
            && !self
                .progress
                .as_ref()
                .map(SubmissionProgress::record_created)
                .unwrap_or(false)
    }

    /// Bring the screen up. Permission is requested automatically only once.
    pub fn activate(&mut self) {
        if self.phase != CapturePhase::Idle {
            return;
        }
        let status = match self.camera.permission() {
            PermissionStatus::Undetermined if !self.permission_requested => {
                self.permission_requested = true;
                self.camera.request_permission()
            }
            status => status,
        };
        self.apply_permission(status);
    }

    /// Explicit request from the permission affordance
    pub fn request_permission(&mut self) {
        if !matches!(self.phase, CapturePhase::Idle | CapturePhase::PermissionDenied) {
            return;
        }
        self.permission_requested = true;
        let status = self.camera.request_permission();
        self.apply_permission(status);
    }

    fn apply_permission(&mut self, status: PermissionStatus) {
        self.phase = match status {
            PermissionStatus::Granted => CapturePhase::Previewing,
            PermissionStatus::Denied => CapturePhase::PermissionDenied,
            PermissionStatus::Undetermined => CapturePhase::Idle,
        };
        if self.phase != CapturePhase::Previewing {
            self.preview = None;
        }
        tracing::info!("[CAPTURE] camera permission {:?}, phase {:?}", status, self.phase);
    }

    pub fn take_picture(&mut self) {
        if self.phase != CapturePhase::Previewing {
            return;
        }
        match self.camera.capture() {
            Ok(picture) => {
                let filename = timestamp_filename(Utc::now());
                tracing::info!("[CAPTURE] picture held as {}", filename);
                self.picture = Some(picture);
                self.progress = Some(SubmissionProgress::new(filename));
                self.title_input.clear();
                self.phase = CapturePhase::Captured;
            }
            Err(ClientError::PermissionDenied(reason)) => {
                tracing::warn!("[CAPTURE] capture refused: {}", reason);
                self.phase = CapturePhase::PermissionDenied;
            }
            Err(e) => {
                tracing::error!("[CAPTURE] error taking picture: {}", e);
                self.alert = Some(Alert::error(CAPTURE_FAILED_MESSAGE));
            }
        }
    }

    /// Start the submission. Returns whether a request was issued.
    pub fn submit(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        if self.title_input.trim().is_empty() {
            self.alert = Some(Alert::error(EMPTY_TITLE_MESSAGE));
            return false;
        }
        let (Some(picture), Some(progress)) = (self.picture.as_ref(), self.progress.clone()) else {
            self.alert = Some(Alert::error(NO_PICTURE_MESSAGE));
            return false;
        };

        let submission = Submission {
            title: self.title_input.clone(),
            created_by: self.created_by,
            image: picture.bytes.clone(),
            progress,
        };
        let api = Arc::clone(&self.api);
        tracing::info!("[CAPTURE] submitting {}", submission.progress.filename);
        self.submission
            .start(move || run_submission(api.as_ref(), submission));
        self.alert = None;
        self.phase = CapturePhase::Submitting;
        true
    }

    /// Discard the held picture. Ignored while a submission is in flight.
    pub fn cancel(&mut self) {
        if self.is_submitting() {
            return;
        }
        if let Some(progress) = self.progress.take() {
            if progress.record_created() {
                let api = Arc::clone(&self.api);
                self.compensations
                    .start(move || compensate(api.as_ref(), &progress));
            }
        }
        self.picture = None;
        self.title_input.clear();
        if self.phase == CapturePhase::Captured {
            self.phase = CapturePhase::Previewing;
        }
    }

    /// Called once per frame
    pub fn poll(&mut self) {
        if let Some(result) = self.submission.poll() {
            match result {
                Ok(progress) => {
                    tracing::info!("[CAPTURE] {} submitted", progress.filename);
                    self.picture = None;
                    self.progress = None;
                    self.title_input.clear();
                    self.phase = CapturePhase::Previewing;
                    self.alert = Some(Alert::success(SUBMIT_SUCCESS_MESSAGE));
                }
                Err(failure) => {
                    tracing::error!("[CAPTURE] submission failed at {:?}: {}", failure.step, failure.error);
                    self.alert = Some(Alert::error(failure.message()));
                    self.progress = Some(failure.progress);
                    self.phase = CapturePhase::Captured;
                }
            }
        }

        for outcome in self.compensations.poll() {
            if let Compensation::Failed { id, error } = outcome {
                self.compensation_alerts.push_back(Alert::error(format!(
                    "Could not remove incomplete document {}: {}",
                    id, error
                )));
            }
        }

        if self.phase == CapturePhase::Previewing {
            self.refresh_preview();
        }
    }

    /// Ask the camera for a new viewfinder frame, at most once per
    /// [`PREVIEW_REFRESH`]
    fn refresh_preview(&mut self) {
        if self
            .preview_checked
            .is_some_and(|checked| checked.elapsed() < PREVIEW_REFRESH)
        {
            return;
        }
        self.preview_checked = Some(Instant::now());
        match self.camera.preview() {
            Ok(Some(image)) => {
                self.preview = Some(PreviewFrame {
                    image,
                    texture: None,
                });
            }
            Ok(None) => {}
            Err(e) => tracing::debug!("[CAPTURE] no viewfinder frame: {}", e),
        }
    }
}
