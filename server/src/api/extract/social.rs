use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use trivet_core::SocialPlatform;

use crate::api::{error_response, ErrorResponse, ExtractResponse};
use crate::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TikTokExtractRequest {
    /// TikTok post URL
    pub tiktok_url: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstagramExtractRequest {
    /// Instagram post URL
    pub instagram_url: String,
    pub user_id: String,
}

#[utoipa::path(
    post,
    path = "/api/tiktok/auto-extract",
    tag = "extract",
    request_body = TikTokExtractRequest,
    responses(
        (status = 200, description = "Recipe extracted and saved", body = ExtractResponse),
        (status = 400, description = "Could not fetch source data", body = ErrorResponse),
        (status = 422, description = "No recipe found in source", body = ErrorResponse),
        (status = 500, description = "Extraction failed", body = ErrorResponse)
    )
)]
pub async fn tiktok_auto_extract(
    State(ingestor): State<AppState>,
    Json(request): Json<TikTokExtractRequest>,
) -> impl IntoResponse {
    tracing::info!(url = %request.tiktok_url, "starting TikTok auto-extract");

    match ingestor
        .ingest_social(SocialPlatform::TikTok, &request.tiktok_url, &request.user_id)
        .await
    {
        Ok(recipe) => (
            StatusCode::OK,
            Json(ExtractResponse {
                success: true,
                recipe,
                message: "Recipe extracted from TikTok and saved".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e, "Could not fetch TikTok video data").into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/instagram/auto-extract",
    tag = "extract",
    request_body = InstagramExtractRequest,
    responses(
        (status = 200, description = "Recipe extracted and saved", body = ExtractResponse),
        (status = 400, description = "Could not fetch source data", body = ErrorResponse),
        (status = 422, description = "No recipe found in source", body = ErrorResponse),
        (status = 500, description = "Extraction failed", body = ErrorResponse)
    )
)]
pub async fn instagram_auto_extract(
    State(ingestor): State<AppState>,
    Json(request): Json<InstagramExtractRequest>,
) -> impl IntoResponse {
    tracing::info!(url = %request.instagram_url, "starting Instagram auto-extract");

    match ingestor
        .ingest_social(
            SocialPlatform::Instagram,
            &request.instagram_url,
            &request.user_id,
        )
        .await
    {
        Ok(recipe) => (
            StatusCode::OK,
            Json(ExtractResponse {
                success: true,
                recipe,
                message: "Recipe extracted from Instagram and saved".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e, "Could not fetch Instagram post data").into_response(),
    }
}
