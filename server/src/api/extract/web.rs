use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::{error_response, ErrorResponse, ExtractResponse};
use crate::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebExtractRequest {
    /// Recipe page URL
    pub url: String,
    pub user_id: String,
}

#[utoipa::path(
    post,
    path = "/api/web/auto-extract",
    tag = "extract",
    request_body = WebExtractRequest,
    responses(
        (status = 200, description = "Recipe extracted and saved", body = ExtractResponse),
        (status = 400, description = "Could not fetch source data", body = ErrorResponse),
        (status = 422, description = "No recipe found in source", body = ErrorResponse),
        (status = 500, description = "Extraction failed", body = ErrorResponse)
    )
)]
pub async fn web_auto_extract(
    State(ingestor): State<AppState>,
    Json(request): Json<WebExtractRequest>,
) -> impl IntoResponse {
    tracing::info!(url = %request.url, "starting web page auto-extract");

    match ingestor.ingest_web(&request.url, &request.user_id).await {
        Ok(recipe) => (
            StatusCode::OK,
            Json(ExtractResponse {
                success: true,
                recipe,
                message: "Recipe extracted from web page and saved".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e, "Could not fetch recipe page").into_response(),
    }
}
