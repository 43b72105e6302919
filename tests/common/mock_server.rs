//! Mock server helpers for integration tests
//!
//! Runs a wiremock server on its own runtime so the blocking
//! `HttpDocumentApi` can be driven from a plain `#[test]` thread.

use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

use docscan::egui_app::HttpDocumentApi;
use docscan::shared::config::AppConfig;

/// Mock document API. `server` is declared first so it is dropped while
/// `runtime` is still alive.
pub struct MockDocumentApi {
    pub server: MockServer,
    pub runtime: Runtime,
}

impl MockDocumentApi {
    pub fn start() -> Self {
        let runtime = Runtime::new().expect("test runtime");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    /// Host without scheme, the way the app is usually configured
    pub fn host(&self) -> String {
        self.server.address().to_string()
    }

    pub fn config(&self) -> AppConfig {
        AppConfig::builder()
            .api_base_url(self.host())
            .request_timeout_secs(5)
            .build()
            .expect("mock config")
    }

    pub fn client(&self) -> HttpDocumentApi {
        HttpDocumentApi::new(self.config()).expect("http client")
    }

    pub fn received(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    pub fn verify(&self) {
        self.runtime.block_on(self.server.verify());
    }
}
