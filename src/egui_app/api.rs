//! Document API Client
//!
//! Blocking facade over the document-management REST API. Screens call it
//! from worker threads; each call drives the shared tokio runtime until the
//! response is in.

use std::sync::Arc;

use reqwest::{multipart, Client, RequestBuilder, Response, Url};
use tokio::runtime::Runtime;

use crate::shared::config::{endpoints, AppConfig};
use crate::shared::document::{decode_list, Category, CreateDocumentRequest, CreatedDocument, Document};
use crate::shared::error::ClientError;

/// Content type of every uploaded page image
pub const UPLOAD_CONTENT_TYPE: &str = "image/jpeg";

/// Operations the client performs against the document API
pub trait DocumentApi: Send + Sync {
    /// `GET /api/v1/categories`
    fn list_categories(&self) -> Result<Vec<Category>, ClientError>;

    /// `GET /api/v1/documents` or `/api/v1/documents/search`, depending on the query
    fn list_documents(&self, query: &DocumentQuery) -> Result<Vec<Document>, ClientError>;

    /// `POST /api/v1/documents`
    fn create_document(&self, request: &CreateDocumentRequest) -> Result<CreatedDocument, ClientError>;

    /// `POST /api/v1/documents/upload` with a multipart `file` field
    fn upload_image(&self, filename: &str, bytes: &[u8]) -> Result<(), ClientError>;

    /// `DELETE /api/v1/documents/{id}`
    fn delete_document(&self, id: &str) -> Result<(), ClientError>;

    /// `GET /uploads/{path}`
    fn fetch_image(&self, path: &str) -> Result<Vec<u8>, ClientError>;
}

/// What the search screen is asking for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentQuery {
    pub text: String,
    pub category_id: Option<String>,
}

impl DocumentQuery {
    pub fn new(text: impl Into<String>, category_id: Option<String>) -> Self {
        Self {
            text: text.into(),
            category_id,
        }
    }

    /// A blank query lists everything instead of searching
    pub fn is_search(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Absolute request URL. Parameters are form-encoded.
    pub fn url(&self, config: &AppConfig) -> Result<String, ClientError> {
        let (endpoint, text) = if self.is_search() {
            (endpoints::DOCUMENTS_SEARCH, Some(self.text.trim()))
        } else {
            (endpoints::DOCUMENTS, None)
        };

        let mut url = parse_url(&config.api_url(endpoint))?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(text) = text {
                pairs.append_pair("q", text);
            }
            if let Some(category_id) = self.category_id.as_deref() {
                pairs.append_pair("category_id", category_id);
            }
        }
        // query_pairs_mut leaves a bare '?' behind when nothing was appended
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url.into())
    }
}

/// URL of a stored page image. Each segment of `path` is percent-encoded.
pub fn image_url(config: &AppConfig, path: &str) -> Result<String, ClientError> {
    let mut url = parse_url(&config.api_url(endpoints::UPLOADS))?;
    url.path_segments_mut()
        .map_err(|_| ClientError::validation("api_base_url", "API base URL cannot carry a path"))?
        .extend(path.split('/').filter(|segment| !segment.is_empty()));
    Ok(url.into())
}

fn parse_url(raw: &str) -> Result<Url, ClientError> {
    Url::parse(raw).map_err(|e| {
        ClientError::validation("api_base_url", format!("Invalid API URL '{}': {}", raw, e))
    })
}

/// reqwest-backed implementation of [`DocumentApi`]
pub struct HttpDocumentApi {
    config: AppConfig,
    client: Client,
    runtime: Arc<Runtime>,
}

impl HttpDocumentApi {
    pub fn new(config: AppConfig) -> Result<Self, ClientError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("docscan-http")
            .enable_all()
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create runtime: {}", e)))?;
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            config,
            client,
            runtime: Arc::new(runtime),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn block_on<F, T>(&self, future: F) -> Result<T, ClientError>
    where
        F: std::future::Future<Output = Result<T, ClientError>>,
    {
        self.runtime.block_on(future)
    }
}

/// Send a request and turn any non-2xx answer into [`ClientError::Status`]
async fn send_checked(request: RequestBuilder, what: &str) -> Result<Response, ClientError> {
    let response = request
        .send()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .ok()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
        tracing::warn!("[API] {} failed: {} - {}", what, status, error_text);
        return Err(ClientError::status(status.as_u16(), error_text));
    }
    Ok(response)
}

impl DocumentApi for HttpDocumentApi {
    fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let url = self.config.api_url(endpoints::CATEGORIES);
        tracing::debug!("[API] GET {}", url);

        self.block_on(async {
            let response = send_checked(self.client.get(&url), "list categories").await?;
            let body = response.text().await?;
            Ok(decode_list(&body)?)
        })
    }

    fn list_documents(&self, query: &DocumentQuery) -> Result<Vec<Document>, ClientError> {
        let url = query.url(&self.config)?;
        tracing::debug!("[API] GET {}", url);

        self.block_on(async {
            let response = send_checked(self.client.get(&url), "list documents").await?;
            let body = response.text().await?;
            Ok(decode_list(&body)?)
        })
    }

    fn create_document(&self, request: &CreateDocumentRequest) -> Result<CreatedDocument, ClientError> {
        let url = self.config.api_url(endpoints::DOCUMENTS);
        tracing::info!("[API] POST {} path={}", url, request.document.path);

        self.block_on(async {
            let response = send_checked(
                self.client
                    .post(&url)
                    .header("Content-Type", "application/json")
                    .json(request),
                "create document",
            )
            .await?;
            let body = response.text().await.unwrap_or_default();
            Ok(CreatedDocument::from_body(&body))
        })
    }

    fn upload_image(&self, filename: &str, bytes: &[u8]) -> Result<(), ClientError> {
        let url = self.config.api_url(endpoints::DOCUMENTS_UPLOAD);
        tracing::info!("[API] POST {} file={} ({} bytes)", url, filename, bytes.len());

        let part = multipart::Part::bytes(bytes.to_vec())
            .file_name(filename.to_string())
            .mime_str(UPLOAD_CONTENT_TYPE)?;
        let form = multipart::Form::new().part("file", part);

        self.block_on(async {
            send_checked(self.client.post(&url).multipart(form), "upload image").await?;
            Ok(())
        })
    }

    fn delete_document(&self, id: &str) -> Result<(), ClientError> {
        let mut url = parse_url(&self.config.api_url(endpoints::DOCUMENTS))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::validation("api_base_url", "API base URL cannot carry a path"))?
            .push(id);
        tracing::info!("[API] DELETE {}", url);

        self.block_on(async {
            send_checked(self.client.delete(url), "delete document").await?;
            Ok(())
        })
    }

    fn fetch_image(&self, path: &str) -> Result<Vec<u8>, ClientError> {
        let url = image_url(&self.config, path)?;
        tracing::debug!("[API] GET {}", url);

        self.block_on(async {
            let response = send_checked(self.client.get(&url), "fetch image").await?;
            let bytes = response.bytes().await?;
            Ok(bytes.to_vec())
        })
    }
}
