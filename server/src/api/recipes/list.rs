use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use trivet_core::Recipe;

use crate::AppState;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub success: bool,
    pub recipes: Vec<Recipe>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{user_id}",
    tag = "recipes",
    params(
        ("user_id" = String, Path, description = "Owning user identifier")
    ),
    responses(
        (status = 200, description = "Recipes in insertion order", body = ListRecipesResponse)
    )
)]
pub async fn list_recipes(
    State(ingestor): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let recipes = ingestor.recipes_for(&user_id);
    Json(ListRecipesResponse {
        success: true,
        recipes,
    })
}
