use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::captures::handlers::{
    download_latest_file, get_latest_data, upload_capture,
};
use crate::features::captures::services::CaptureService;

/// Create routes for the captures feature
pub fn routes(service: Arc<CaptureService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/upload/",
            // Allow body size up to the configured limit + buffer for multipart overhead
            post(upload_capture).layer(DefaultBodyLimit::max(max_body_size + 1024 * 1024)),
        )
        .route("/data/", get(get_latest_data))
        .route("/file/", get(download_latest_file))
        .with_state(service)
}
