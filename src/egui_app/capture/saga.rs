//! Two-step document submission
//!
//! Creating a document takes two independent calls with no shared
//! transaction: the metadata record, then the image upload. Both carry the
//! same timestamp-derived filename so the server can pair them up.
//!
//! Progress is kept with the captured picture. A retry after a failed upload
//! skips the create call and uploads again under the same filename. When the
//! user gives up on a picture whose record exists but whose image never
//! arrived, [`compensate`] deletes the orphaned record.

use chrono::{DateTime, Utc};

use crate::egui_app::api::DocumentApi;
use crate::shared::document::{CreateDocumentRequest, CreatedDocument};
use crate::shared::error::ClientError;

/// Extension of every uploaded page image
pub const UPLOAD_EXTENSION: &str = "jpg";

/// Filename shared by the record's `path` and the uploaded file
pub fn timestamp_filename(now: DateTime<Utc>) -> String {
    format!("{}.{}", now.timestamp_millis(), UPLOAD_EXTENSION)
}

/// How far a submission got
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionProgress {
    pub filename: String,
    /// Set once the server accepted the metadata record
    pub record: Option<CreatedDocument>,
}

impl SubmissionProgress {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            record: None,
        }
    }

    pub fn record_created(&self) -> bool {
        self.record.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStep {
    CreateRecord,
    UploadImage,
}

/// A failed step, with the progress made before it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFailure {
    pub step: SubmitStep,
    pub error: ClientError,
    pub progress: SubmissionProgress,
}

impl SubmissionFailure {
    /// Alert text for the user
    pub fn message(&self) -> String {
        match self.step {
            SubmitStep::CreateRecord => format!("Failed to create document: {}", self.error),
            SubmitStep::UploadImage => format!(
                "The document was created but the image upload failed: {}. Submit again to retry the upload.",
                self.error
            ),
        }
    }
}

/// Everything a submission needs, owned so it can move to a worker thread
#[derive(Debug, Clone)]
pub struct Submission {
    pub title: String,
    pub created_by: i64,
    pub image: Vec<u8>,
    pub progress: SubmissionProgress,
}

/// Run the remaining steps of a submission in order.
///
/// The upload is only attempted once the record exists.
pub fn run_submission(
    api: &dyn DocumentApi,
    submission: Submission,
) -> Result<SubmissionProgress, SubmissionFailure> {
    let Submission {
        title,
        created_by,
        image,
        mut progress,
    } = submission;

    if progress.record.is_none() {
        let request = CreateDocumentRequest::new(title.trim(), progress.filename.clone(), created_by);
        match api.create_document(&request) {
            Ok(created) => {
                tracing::info!(
                    "[CAPTURE] record created for {} (id: {:?})",
                    progress.filename,
                    created.id
                );
                progress.record = Some(created);
            }
            Err(error) => {
                return Err(SubmissionFailure {
                    step: SubmitStep::CreateRecord,
                    error,
                    progress,
                });
            }
        }
    } else {
        tracing::info!("[CAPTURE] record for {} exists, retrying upload only", progress.filename);
    }

    match api.upload_image(&progress.filename, &image) {
        Ok(()) => Ok(progress),
        Err(error) => Err(SubmissionFailure {
            step: SubmitStep::UploadImage,
            error,
            progress,
        }),
    }
}

/// Outcome of undoing a half-finished submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compensation {
    /// Nothing was created, nothing to undo
    NotNeeded,
    Deleted { id: String },
    /// The server never told us the record id
    UnknownId { filename: String },
    Failed { id: String, error: ClientError },
}

/// Delete the record of a submission whose image never arrived
pub fn compensate(api: &dyn DocumentApi, progress: &SubmissionProgress) -> Compensation {
    let Some(record) = progress.record.as_ref() else {
        return Compensation::NotNeeded;
    };
    let Some(id) = record.id.clone() else {
        tracing::warn!(
            "[CAPTURE] orphaned record for {} left on server, id unknown",
            progress.filename
        );
        return Compensation::UnknownId {
            filename: progress.filename.clone(),
        };
    };
    match api.delete_document(&id) {
        Ok(()) => {
            tracing::info!("[CAPTURE] deleted orphaned record {}", id);
            Compensation::Deleted { id }
        }
        Err(error) => {
            tracing::error!("[CAPTURE] failed to delete orphaned record {}: {}", id, error);
            Compensation::Failed { id, error }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egui_app::api::DocumentQuery;
    use crate::shared::document::{Category, Document};
    use chrono::TimeZone;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedApi {
        fail_create: bool,
        fail_upload: bool,
        created_id: Option<String>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedApi {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl DocumentApi for ScriptedApi {
        fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
            unreachable!()
        }
        fn list_documents(&self, _: &DocumentQuery) -> Result<Vec<Document>, ClientError> {
            unreachable!()
        }
        fn create_document(&self, request: &CreateDocumentRequest) -> Result<CreatedDocument, ClientError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("create:{}:{}", request.document.title, request.document.path));
            if self.fail_create {
                return Err(ClientError::status(500, "boom"));
            }
            Ok(CreatedDocument {
                id: self.created_id.clone(),
            })
        }
        fn upload_image(&self, filename: &str, _: &[u8]) -> Result<(), ClientError> {
            self.calls.lock().unwrap().push(format!("upload:{}", filename));
            if self.fail_upload {
                return Err(ClientError::Network("connection reset".into()));
            }
            Ok(())
        }
        fn delete_document(&self, id: &str) -> Result<(), ClientError> {
            self.calls.lock().unwrap().push(format!("delete:{}", id));
            Ok(())
        }
        fn fetch_image(&self, _: &str) -> Result<Vec<u8>, ClientError> {
            unreachable!()
        }
    }

    fn submission(progress: SubmissionProgress) -> Submission {
        Submission {
            title: "  Lease  ".into(),
            created_by: 1,
            image: vec![0xFF, 0xD8],
            progress,
        }
    }

    #[test]
    fn test_timestamp_filename() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(timestamp_filename(now), "1700000000123.jpg");
    }

    #[test]
    fn test_create_then_upload_share_filename() {
        let api = ScriptedApi::default();
        let progress = run_submission(&api, submission(SubmissionProgress::new("42.jpg"))).unwrap();
        assert!(progress.record_created());
        assert_eq!(api.calls(), vec!["create:Lease:42.jpg", "upload:42.jpg"]);
    }

    #[test]
    fn test_create_failure_skips_upload() {
        let api = ScriptedApi {
            fail_create: true,
            ..Default::default()
        };
        let failure = run_submission(&api, submission(SubmissionProgress::new("42.jpg"))).unwrap_err();
        assert_eq!(failure.step, SubmitStep::CreateRecord);
        assert!(!failure.progress.record_created());
        assert_eq!(api.calls(), vec!["create:Lease:42.jpg"]);
        assert!(failure.message().starts_with("Failed to create document"));
    }

    #[test]
    fn test_upload_failure_keeps_record_progress() {
        let api = ScriptedApi {
            fail_upload: true,
            created_id: Some("9".into()),
            ..Default::default()
        };
        let failure = run_submission(&api, submission(SubmissionProgress::new("42.jpg"))).unwrap_err();
        assert_eq!(failure.step, SubmitStep::UploadImage);
        assert_eq!(
            failure.progress.record,
            Some(CreatedDocument { id: Some("9".into()) })
        );
    }

    #[test]
    fn test_retry_only_uploads() {
        let api = ScriptedApi::default();
        let progress = SubmissionProgress {
            filename: "42.jpg".into(),
            record: Some(CreatedDocument::default()),
        };
        run_submission(&api, submission(progress)).unwrap();
        assert_eq!(api.calls(), vec!["upload:42.jpg"]);
    }

    #[test]
    fn test_compensate() {
        let api = ScriptedApi::default();
        assert_eq!(
            compensate(&api, &SubmissionProgress::new("1.jpg")),
            Compensation::NotNeeded
        );

        let unknown = SubmissionProgress {
            filename: "1.jpg".into(),
            record: Some(CreatedDocument { id: None }),
        };
        assert_eq!(
            compensate(&api, &unknown),
            Compensation::UnknownId { filename: "1.jpg".into() }
        );

        let known = SubmissionProgress {
            filename: "1.jpg".into(),
            record: Some(CreatedDocument { id: Some("5".into()) }),
        };
        assert_eq!(compensate(&api, &known), Compensation::Deleted { id: "5".into() });
        assert_eq!(api.calls(), vec!["delete:5"]);
    }
}
