use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::{error_response, ErrorResponse, ExtractResponse};
use crate::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageExtractRequest {
    /// Image payload: a data URI or bare base64
    pub image_data: String,
    /// Declared media type (jpeg/png/webp/gif); jpeg when omitted
    pub media_type: Option<String>,
    pub user_id: String,
}

#[utoipa::path(
    post,
    path = "/api/image/auto-extract",
    tag = "extract",
    request_body = ImageExtractRequest,
    responses(
        (status = 200, description = "Recipe extracted and saved", body = ExtractResponse),
        (status = 400, description = "Unreadable image payload", body = ErrorResponse),
        (status = 422, description = "No recipe found in image", body = ErrorResponse),
        (status = 500, description = "Extraction failed", body = ErrorResponse)
    )
)]
pub async fn image_auto_extract(
    State(ingestor): State<AppState>,
    Json(request): Json<ImageExtractRequest>,
) -> impl IntoResponse {
    tracing::info!("starting image auto-extract");

    match ingestor
        .ingest_image(
            &request.image_data,
            request.media_type.as_deref(),
            &request.user_id,
        )
        .await
    {
        Ok(recipe) => (
            StatusCode::OK,
            Json(ExtractResponse {
                success: true,
                recipe,
                message: "Recipe extracted from image and saved".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e, "Could not read image data").into_response(),
    }
}
