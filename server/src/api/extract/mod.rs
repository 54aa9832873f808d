pub mod caption;
pub mod image;
pub mod social;
pub mod web;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        social::tiktok_auto_extract,
        social::instagram_auto_extract,
        web::web_auto_extract,
        image::image_auto_extract,
        caption::test_extract,
    ),
    components(schemas(
        social::TikTokExtractRequest,
        social::InstagramExtractRequest,
        web::WebExtractRequest,
        image::ImageExtractRequest,
        caption::TestExtractRequest,
        caption::TestExtractResponse,
    ))
)]
pub struct ApiDoc;
