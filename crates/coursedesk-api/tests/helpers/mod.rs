//! Test helpers: build AppState and router for integration tests.
//!
//! Every app gets its own temporary data directory, so tests can run in parallel.

#![allow(dead_code)]

pub mod fixtures;
pub mod storage;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use coursedesk_api::setup::{routes, services::build_state};
use coursedesk_core::Config;
use coursedesk_db::JsonFileLedger;
use coursedesk_processing::PdfTextExtractor;
use coursedesk_storage::{LocalStorage, Storage};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Test application: server plus the directory backing it.
pub struct TestApp {
    pub server: TestServer,
    pub config: Config,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn uploads_dir(&self) -> &Path {
        self.config.uploads_dir()
    }

    pub fn feedback_file(&self) -> &Path {
        self.config.feedback_file()
    }

    pub fn public_dir(&self) -> &Path {
        self.config.public_dir()
    }
}

/// Setup test app with local storage and a JSON ledger under a temp dir.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}, None).await
}

/// Setup test app after adjusting the config; `storage` replaces the local backend.
pub async fn setup_test_app_with(
    customize: impl FnOnce(&mut Config),
    storage: Option<Arc<dyn Storage>>,
) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let mut config = Config::with_data_dir(temp_dir.path());
    customize(&mut config);

    let storage = storage.unwrap_or_else(|| Arc::new(LocalStorage::lazy(config.uploads_dir())));
    let ledger = Arc::new(JsonFileLedger::new(config.feedback_file()));
    let state = build_state(storage, ledger, Arc::new(PdfTextExtractor::new()));

    let app = routes::setup_routes(&config, state)
        .await
        .expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        config,
        _temp_dir: temp_dir,
    }
}

/// POST `data` to the upload endpoint as the `curriculumFile` part.
pub async fn upload_file(
    client: &TestServer,
    file_name: &str,
    mime_type: &str,
    data: Vec<u8>,
) -> TestResponse {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(file_name.to_string())
        .mime_type(mime_type.to_string());
    let form = MultipartForm::new().add_part("curriculumFile", part);
    client.post("/api/upload").multipart(form).await
}

/// Submit a complete feedback entry and assert it was accepted.
pub async fn submit_feedback(client: &TestServer, name: &str) {
    let response = client
        .post("/api/feedback")
        .json(&serde_json::json!({
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase()),
            "message": "Looks good"
        }))
        .await;
    assert_eq!(response.status_code(), 200);
}
