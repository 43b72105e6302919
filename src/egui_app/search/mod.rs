//! Search Screen State
//!
//! Holds the query, the category dropdown, the result list and the image
//! viewer of the search tab. Categories and documents are fetched on
//! independent request slots; the document slot is shared by the initial
//! load, user searches and category changes, so only the newest of those can
//! land in `results`.

use std::sync::Arc;

use crate::egui_app::api::{DocumentApi, DocumentQuery};
use crate::egui_app::request::RequestSlot;
use crate::egui_app::types::Alert;
use crate::egui_app::viewer::ImageViewer;
use crate::shared::document::{Category, Document};
use crate::shared::error::ClientError;

pub const CATEGORIES_FAILED_MESSAGE: &str = "Failed to load categories. Please try again later.";
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search documents. Please try again later.";
pub const LIST_FAILED_MESSAGE: &str = "Failed to load documents. Please try again later.";
pub const MISSING_PATH_MESSAGE: &str = "This document has no stored image";

pub struct SearchState {
    api: Arc<dyn DocumentApi>,
    pub query_input: String,
    categories: Vec<Category>,
    selected_category: Option<Category>,
    dropdown_open: bool,
    results: Vec<Document>,
    loaded: bool,
    alert: Option<Alert>,
    /// Query of the most recent document request
    last_query: DocumentQuery,
    categories_request: RequestSlot<Result<Vec<Category>, ClientError>>,
    documents_request: RequestSlot<Result<Vec<Document>, ClientError>>,
    viewer: ImageViewer,
}

impl SearchState {
    pub fn new(api: Arc<dyn DocumentApi>) -> Self {
        Self {
            viewer: ImageViewer::new(Arc::clone(&api)),
            api,
            query_input: String::new(),
            categories: Vec::new(),
            selected_category: None,
            dropdown_open: false,
            results: Vec::new(),
            loaded: false,
            alert: None,
            last_query: DocumentQuery::default(),
            categories_request: RequestSlot::new("categories"),
            documents_request: RequestSlot::new("documents"),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.selected_category.as_ref()
    }

    pub fn results(&self) -> &[Document] {
        &self.results
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn is_searching(&self) -> bool {
        self.documents_request.is_pending()
    }

    pub fn is_loading_categories(&self) -> bool {
        self.categories_request.is_pending()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn viewer(&self) -> &ImageViewer {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut ImageViewer {
        &mut self.viewer
    }

    /// First display of the screen: categories plus the full document list
    pub fn load(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        self.load_categories();
        self.fetch_documents();
    }

    pub fn load_categories(&mut self) {
        if self.categories_request.is_pending() {
            return;
        }
        let api = Arc::clone(&self.api);
        self.categories_request.start(move || api.list_categories());
    }

    /// The search button. A blank query lists every document.
    /// Returns whether a request was issued.
    pub fn search(&mut self) -> bool {
        if self.is_searching() {
            return false;
        }
        self.fetch_documents();
        true
    }

    pub fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
    }

    /// Pick a category (or clear it) and rerun the current query
    pub fn select_category(&mut self, category: Option<Category>) {
        self.dropdown_open = false;
        let unchanged = self.selected_category.as_ref().map(|c| &c.id)
            == category.as_ref().map(|c| &c.id);
        self.selected_category = category;
        if !unchanged {
            self.fetch_documents();
        }
    }

    /// Empty the query box and show everything again
    pub fn clear_query(&mut self) {
        self.query_input.clear();
        self.fetch_documents();
    }

    /// Open the viewer on a document's stored image.
    /// Returns whether the viewer was opened.
    pub fn open_document(&mut self, document: &Document) -> bool {
        match document.stored_path() {
            Some(path) => {
                self.viewer.open(path);
                true
            }
            None => {
                tracing::warn!("[SEARCH] document {} has no stored path", document.id);
                self.alert = Some(Alert::error(MISSING_PATH_MESSAGE));
                false
            }
        }
    }

    /// Issue a document request for the current inputs, superseding any
    /// request still in flight.
    fn fetch_documents(&mut self) {
        let query = DocumentQuery::new(
            self.query_input.trim(),
            self.selected_category.as_ref().map(|c| c.id.clone()),
        );
        tracing::info!(
            "[SEARCH] {} (category: {:?})",
            if query.is_search() { "searching" } else { "listing documents" },
            query.category_id
        );
        let api = Arc::clone(&self.api);
        let request = query.clone();
        self.documents_request
            .start(move || api.list_documents(&request));
        self.last_query = query;
    }

    /// Called once per frame
    pub fn poll(&mut self) {
        if let Some(result) = self.categories_request.poll() {
            match result {
                Ok(categories) => {
                    tracing::debug!("[SEARCH] {} categories loaded", categories.len());
                    self.categories = categories;
                }
                Err(e) => {
                    tracing::error!("[SEARCH] error loading categories: {}", e);
                    self.categories.clear();
                    self.alert = Some(Alert::error(CATEGORIES_FAILED_MESSAGE));
                }
            }
        }

        if let Some(result) = self.documents_request.poll() {
            match result {
                Ok(documents) => {
                    tracing::debug!("[SEARCH] {} documents loaded", documents.len());
                    self.results = documents;
                }
                Err(e) => {
                    tracing::error!("[SEARCH] error fetching documents: {}", e);
                    self.results.clear();
                    self.alert = Some(Alert::error(if self.last_query.is_search() {
                        SEARCH_FAILED_MESSAGE
                    } else {
                        LIST_FAILED_MESSAGE
                    }));
                }
            }
        }

        self.viewer.poll();
    }
}
