use utoipa::{Modify, OpenApi};

use crate::features::captures::{dtos as capture_dtos, handlers as capture_handlers};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        capture_handlers::upload_capture,
        capture_handlers::get_latest_data,
        capture_handlers::download_latest_file,
    ),
    components(
        schemas(
            ErrorResponse,
            capture_dtos::UploadCaptureDto,
            capture_dtos::CaptureResponseDto,
            capture_dtos::LatestCaptureDto,
        )
    ),
    tags(
        (name = "captures", description = "Snapshot upload and latest-capture reads"),
    ),
    info(
        title = "Moodcam API",
        version = "0.1.0",
        description = "API documentation for Moodcam",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
