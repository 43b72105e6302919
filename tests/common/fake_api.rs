//! In-memory stand-ins for the document API and the camera
//!
//! `FakeApi` records every call and answers from scripted responses. Its
//! gate can hold the first N calls open so tests can act while a request is
//! still in flight.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};

use docscan::egui_app::camera::{Camera, CapturedPicture, PermissionStatus};
use docscan::egui_app::viewer::DecodedImage;
use docscan::egui_app::{DocumentApi, DocumentQuery};
use docscan::shared::document::{Category, CreateDocumentRequest, CreatedDocument, Document};
use docscan::shared::error::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListCategories,
    ListDocuments(DocumentQuery),
    Create(CreateDocumentRequest),
    Upload { filename: String, len: usize },
    Delete(String),
    FetchImage(String),
}

type DocumentsFn = Arc<dyn Fn(&DocumentQuery) -> Result<Vec<Document>, ClientError> + Send + Sync>;

/// Holds the first `remaining` callers until released
#[derive(Default)]
pub struct Gate {
    state: Mutex<(usize, bool)>,
    opened: Condvar,
}

impl Gate {
    pub fn hold(&self, calls: usize) {
        *self.state.lock().unwrap() = (calls, false);
    }

    pub fn release(&self) {
        self.state.lock().unwrap().1 = true;
        self.opened.notify_all();
    }

    /// Block while held, for callers inside scripted answers
    pub fn pass(&self) {
        let mut state = self.state.lock().unwrap();
        if state.0 == 0 {
            return;
        }
        state.0 -= 1;
        while !state.1 {
            state = self.opened.wait(state).unwrap();
        }
    }
}

pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    pub categories: Mutex<Result<Vec<Category>, ClientError>>,
    documents: Mutex<DocumentsFn>,
    pub create: Mutex<Result<CreatedDocument, ClientError>>,
    /// Consumed front to back; an empty queue means success
    pub uploads: Mutex<VecDeque<Result<(), ClientError>>>,
    pub image: Mutex<Result<Vec<u8>, ClientError>>,
    /// Answers per document id; ids not listed delete fine
    pub deletes: Mutex<HashMap<String, Result<(), ClientError>>>,
    /// Holds document listing and create calls
    pub gate: Gate,
    /// Holds delete calls
    pub delete_gate: Gate,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            categories: Mutex::new(Ok(Vec::new())),
            documents: Mutex::new(Arc::new(|_| Ok(Vec::new()))),
            create: Mutex::new(Ok(CreatedDocument::default())),
            uploads: Mutex::new(VecDeque::new()),
            image: Mutex::new(Ok(Vec::new())),
            deletes: Mutex::new(HashMap::new()),
            gate: Gate::default(),
            delete_gate: Gate::default(),
        }
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| matches(c)).count()
    }

    pub fn set_documents<F>(&self, f: F)
    where
        F: Fn(&DocumentQuery) -> Result<Vec<Document>, ClientError> + Send + Sync + 'static,
    {
        *self.documents.lock().unwrap() = Arc::new(f);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl DocumentApi for FakeApi {
    fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.record(Call::ListCategories);
        self.categories.lock().unwrap().clone()
    }

    fn list_documents(&self, query: &DocumentQuery) -> Result<Vec<Document>, ClientError> {
        self.record(Call::ListDocuments(query.clone()));
        self.gate.pass();
        // Cloned out so a blocking answer does not hold the lock
        let documents = self.documents.lock().unwrap().clone();
        (*documents)(query)
    }

    fn create_document(&self, request: &CreateDocumentRequest) -> Result<CreatedDocument, ClientError> {
        self.record(Call::Create(request.clone()));
        self.gate.pass();
        self.create.lock().unwrap().clone()
    }

    fn upload_image(&self, filename: &str, bytes: &[u8]) -> Result<(), ClientError> {
        self.record(Call::Upload {
            filename: filename.to_string(),
            len: bytes.len(),
        });
        self.uploads.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    fn delete_document(&self, id: &str) -> Result<(), ClientError> {
        self.record(Call::Delete(id.to_string()));
        self.delete_gate.pass();
        self.deletes.lock().unwrap().get(id).cloned().unwrap_or(Ok(()))
    }

    fn fetch_image(&self, path: &str) -> Result<Vec<u8>, ClientError> {
        self.record(Call::FetchImage(path.to_string()));
        self.image.lock().unwrap().clone()
    }
}

/// Camera with a scripted permission answer and queue of stills
pub struct FakeCamera {
    status: PermissionStatus,
    answer: PermissionStatus,
    /// Shared so tests can read it after the camera is boxed
    pub permission_requests: Arc<AtomicUsize>,
    stills: VecDeque<Result<CapturedPicture, ClientError>>,
    frames: VecDeque<DecodedImage>,
}

impl FakeCamera {
    /// `answer` is what the platform replies to a permission request
    pub fn new(answer: PermissionStatus) -> Self {
        Self {
            status: PermissionStatus::Undetermined,
            answer,
            permission_requests: Arc::new(AtomicUsize::new(0)),
            stills: VecDeque::new(),
            frames: VecDeque::new(),
        }
    }

    pub fn with_still(mut self, still: Result<CapturedPicture, ClientError>) -> Self {
        self.stills.push_back(still);
        self
    }

    pub fn with_frame(mut self, frame: DecodedImage) -> Self {
        self.frames.push_back(frame);
        self
    }
}

impl Camera for FakeCamera {
    fn permission(&self) -> PermissionStatus {
        self.status
    }

    fn request_permission(&mut self) -> PermissionStatus {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        self.status = self.answer;
        self.status
    }

    fn capture(&mut self) -> Result<CapturedPicture, ClientError> {
        self.stills
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Camera("no still queued".into())))
    }

    fn preview(&mut self) -> Result<Option<DecodedImage>, ClientError> {
        Ok(self.frames.pop_front())
    }
}

pub fn picture() -> CapturedPicture {
    CapturedPicture {
        uri: "file:///tmp/page.jpg".to_string(),
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10],
        width: 4,
        height: 3,
    }
}

pub fn document(id: &str, title: &str, path: Option<&str>) -> Document {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": title,
        "path": path,
    }))
    .unwrap()
}

pub fn category(id: &str, name: &str) -> Category {
    serde_json::from_value(serde_json::json!({ "id": id, "name": name })).unwrap()
}
