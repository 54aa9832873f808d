pub mod list;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(list::list_recipes),
    components(schemas(list::ListRecipesResponse))
)]
pub struct ApiDoc;
