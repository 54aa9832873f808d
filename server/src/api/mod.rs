pub mod extract;
pub mod health;
pub mod recipes;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use trivet_core::{ExtractError, IngestError, Recipe};

use crate::AppState;

/// Success envelope shared by all extraction endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExtractResponse {
    pub success: bool,
    pub recipe: Recipe,
    pub message: String,
}

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/tiktok/auto-extract",
            post(extract::social::tiktok_auto_extract),
        )
        .route(
            "/api/instagram/auto-extract",
            post(extract::social::instagram_auto_extract),
        )
        .route("/api/web/auto-extract", post(extract::web::web_auto_extract))
        .route(
            "/api/image/auto-extract",
            post(extract::image::image_auto_extract),
        )
        .route("/api/test-extract", post(extract::caption::test_extract))
        .route("/api/recipes/:user_id", get(recipes::list::list_recipes))
}

/// Map a pipeline failure to its client-visible shape. Operator detail goes
/// to the log, never into the response body.
pub fn error_response(
    error: IngestError,
    fetch_message: &str,
) -> (StatusCode, Json<ErrorResponse>) {
    let (status, message) = match &error {
        IngestError::Fetch(e) => {
            tracing::warn!(error = %e, "source fetch failed");
            (StatusCode::BAD_REQUEST, fetch_message.to_string())
        }
        IngestError::Extract(ExtractError::ModelCall(e)) => {
            tracing::error!(error = %e, "model call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Recipe extraction failed".to_string(),
            )
        }
        IngestError::Extract(ExtractError::MalformedOutput(e)) => {
            // Usually means the source simply had no recipe content.
            tracing::warn!(error = %e, "model output could not be parsed");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Could not extract recipe from source".to_string(),
            )
        }
    };

    (
        status,
        Json(ErrorResponse {
            success: false,
            error: message,
        }),
    )
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse, ExtractResponse)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    // Merge in each module's spec
    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        extract::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        health::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
