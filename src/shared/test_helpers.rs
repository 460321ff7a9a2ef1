#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use axum_test::TestServer;
#[cfg(test)]
use tempfile::TempDir;

#[cfg(test)]
use crate::core::middleware;
#[cfg(test)]
use crate::features::captures::{self, CaptureService};
#[cfg(test)]
use crate::modules::storage::LocalDiskStorage;

#[cfg(test)]
pub const TEST_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Service over a throwaway upload directory. Keep the returned `TempDir`
/// alive for the duration of the test.
#[cfg(test)]
pub fn create_test_service() -> (Arc<CaptureService>, TempDir) {
    let dir = TempDir::new().expect("create temp upload dir");
    let storage = LocalDiskStorage::new(dir.path().join("uploads"));
    (Arc::new(CaptureService::new(storage)), dir)
}

/// Application router as served in production: capture routes plus the
/// uniform CORS layer.
#[cfg(test)]
pub fn create_test_server(service: Arc<CaptureService>) -> TestServer {
    let app = captures::routes(service, TEST_MAX_BODY_SIZE).layer(middleware::cors_layer(vec![
        "http://localhost:3000".to_string(),
    ]));
    TestServer::new(app).expect("start test server")
}
