use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use trivet_core::{IngestError, RecipeDraft};

use crate::api::{error_response, ErrorResponse};
use crate::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TestExtractRequest {
    /// Raw caption text to run through the generative extractor
    pub caption: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TestExtractResponse {
    pub success: bool,
    pub recipe: RecipeDraft,
}

/// Runs the generative extractor on raw text without fetching a source or
/// persisting the result.
#[utoipa::path(
    post,
    path = "/api/test-extract",
    tag = "extract",
    request_body = TestExtractRequest,
    responses(
        (status = 200, description = "Extraction result", body = TestExtractResponse),
        (status = 422, description = "No recipe found in caption", body = ErrorResponse),
        (status = 500, description = "Extraction failed", body = ErrorResponse)
    )
)]
pub async fn test_extract(
    State(ingestor): State<AppState>,
    Json(request): Json<TestExtractRequest>,
) -> impl IntoResponse {
    match ingestor.extract_from_caption(&request.caption).await {
        Ok(draft) => (
            StatusCode::OK,
            Json(TestExtractResponse {
                success: true,
                recipe: draft,
            }),
        )
            .into_response(),
        Err(e) => error_response(IngestError::Extract(e), "").into_response(),
    }
}
