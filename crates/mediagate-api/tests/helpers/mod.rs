//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p mediagate-api --test files_test`.
//! Each test gets an isolated temp directory as its local storage root, so
//! tests never share state and never touch the environment.

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use mediagate_api::setup::routes;
use mediagate_api::state::AppState;
use mediagate_core::{Config, StorageBackend};
use mediagate_storage::LocalStorage;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub const BASE_URL: &str = "http://localhost:4000";

/// Test application: server plus the owned storage root.
pub struct TestApp {
    pub server: TestServer,
    temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// The local storage root backing this app.
    pub fn storage_root(&self) -> &Path {
        self.temp_dir.path()
    }
}

fn test_config(storage_dir: &Path) -> Config {
    Config {
        server_port: 4000,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        storage_backend: StorageBackend::Local,
        media_storage_dir: storage_dir.to_string_lossy().into_owned(),
        public_base_url: BASE_URL.to_string(),
        gcs_bucket: None,
        max_file_size_bytes: 10 * 1024 * 1024,
    }
}

/// Setup a test app with isolated local storage.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config = test_config(temp_dir.path());

    let storage = LocalStorage::new(temp_dir.path(), config.public_base_url.clone())
        .await
        .expect("create local storage");

    let state = Arc::new(AppState {
        storage: Arc::new(storage),
        config: config.clone(),
    });

    let router = routes::setup_routes(&config, state).expect("build router");
    let server = TestServer::new(router).expect("start test server");

    TestApp {
        server,
        temp_dir,
    }
}

/// Upload the given bytes as a multipart `file` field.
pub async fn upload_bytes(server: &TestServer, filename: &str, bytes: &[u8]) -> TestResponse {
    let part = Part::bytes(bytes.to_vec())
        .file_name(filename)
        .mime_type("application/octet-stream");
    server
        .post("/files")
        .multipart(MultipartForm::new().add_part("file", part))
        .await
}
