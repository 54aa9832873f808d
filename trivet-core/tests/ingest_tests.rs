//! End-to-end ingest tests against mock collaborators: no network, no
//! model, deterministic.

use std::sync::Arc;

use trivet_core::llm::MockProvider;
use trivet_core::{
    IngestError, Ingestor, MemoryStore, MockClient, RecipeSource, RecipeStore, SocialPlatform,
};

const TIKTOK_POST: &str = "https://www.tiktok.com/@cook/video/123";
const TIKTOK_OEMBED: &str =
    "https://www.tiktok.com/oembed?url=https%3A%2F%2Fwww.tiktok.com%2F%40cook%2Fvideo%2F123";

fn ingestor(http: MockClient, llm: MockProvider) -> (Ingestor, Arc<MemoryStore>, Arc<MockProvider>) {
    let store = Arc::new(MemoryStore::new());
    let llm = Arc::new(llm);
    let ingestor = Ingestor::new(Arc::new(http), llm.clone(), store.clone());
    (ingestor, store, llm)
}

#[tokio::test]
async fn structured_web_page_skips_the_model_entirely() {
    let html = r#"
        <html><head>
        <meta property="og:image" content="https://example.com/og.jpg">
        <script type="application/ld+json">
        {
            "@type": "Recipe",
            "name": "Weeknight Pasta",
            "prepTime": "PT15M",
            "recipeIngredient": ["200g spaghetti", "2 cloves garlic"],
            "recipeInstructions": [{"@type": "HowToStep", "text": "Boil the pasta."}]
        }
        </script>
        </head><body></body></html>
    "#;
    let http = MockClient::new().with_text("https://example.com/pasta", html);
    let (ingestor, store, llm) = ingestor(http, MockProvider::new());

    let recipe = ingestor
        .ingest_web("https://example.com/pasta", "alice")
        .await
        .unwrap();

    assert_eq!(recipe.title, "Weeknight Pasta");
    assert_eq!(recipe.prep_time, "15min");
    assert_eq!(recipe.ingredients, vec!["200g spaghetti", "2 cloves garlic"]);
    assert_eq!(recipe.instructions, vec!["Boil the pasta."]);
    assert_eq!(recipe.source, RecipeSource::Website);
    assert_eq!(recipe.source_url, "https://example.com/pasta");
    assert_eq!(recipe.thumbnail_url, "https://example.com/og.jpg");
    // structured path: no generative call is issued
    assert_eq!(llm.call_count(), 0);
    assert_eq!(store.list_by_owner("alice").len(), 1);
}

#[tokio::test]
async fn social_caption_runs_through_the_model_with_adapter_urls() {
    let http = MockClient::new().with_text(
        TIKTOK_OEMBED,
        r#"{"title": "2 eggs\n1 cup flour\nMix and bake at 350F for 20 min",
            "thumbnail_url": "https://cdn.tiktok.example/thumb.jpg"}"#,
    );
    // The model tries to smuggle its own URLs; they must be ignored.
    let llm = MockProvider::new().with_response(
        r#"{
            "title": "Simple Bake",
            "ingredients": ["2 eggs", "1 cup flour"],
            "instructions": ["Mix and bake at 350F for 20 min"],
            "sourceUrl": "https://fabricated.example.com",
            "thumbnailUrl": "https://fabricated.example.com/t.jpg"
        }"#,
    );
    let (ingestor, store, llm) = ingestor(http, llm);

    let recipe = ingestor
        .ingest_social(SocialPlatform::TikTok, TIKTOK_POST, "alice")
        .await
        .unwrap();

    assert_eq!(llm.call_count(), 1);
    assert!(!recipe.ingredients.is_empty());
    assert!(!recipe.instructions.is_empty());
    assert_eq!(recipe.source, RecipeSource::TikTok);
    assert_eq!(recipe.source_url, TIKTOK_POST);
    assert_eq!(recipe.thumbnail_url, "https://cdn.tiktok.example/thumb.jpg");
    assert_eq!(store.list_by_owner("alice").len(), 1);
}

#[tokio::test]
async fn unstructured_web_page_falls_back_to_the_model() {
    let html = "<html><body><h1>Stew</h1><p>Brown the beef. Simmer.</p></body></html>";
    let http = MockClient::new().with_text("https://example.com/stew", html);
    let llm = MockProvider::new()
        .with_response(r#"{"title": "Stew", "instructions": ["Brown the beef.", "Simmer."]}"#);
    let (ingestor, _store, llm) = ingestor(http, llm);

    let recipe = ingestor
        .ingest_web("https://example.com/stew", "alice")
        .await
        .unwrap();

    assert_eq!(llm.call_count(), 1);
    assert_eq!(recipe.title, "Stew");
    assert_eq!(recipe.source_url, "https://example.com/stew");
}

#[tokio::test]
async fn malformed_model_output_fails_without_touching_the_store() {
    let http = MockClient::new().with_text(TIKTOK_OEMBED, r#"{"title": "just vibes"}"#);
    let llm = MockProvider::new().with_response("Sorry, there is no recipe in this caption.");
    let (ingestor, store, _llm) = ingestor(http, llm);

    let err = ingestor
        .ingest_social(SocialPlatform::TikTok, TIKTOK_POST, "alice")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IngestError::Extract(trivet_core::ExtractError::MalformedOutput(_))
    ));
    assert!(store.list_by_owner("alice").is_empty());
}

#[tokio::test]
async fn failed_fetch_surfaces_without_a_model_call() {
    let http = MockClient::new().with_error(TIKTOK_OEMBED, "connection timed out");
    let (ingestor, store, llm) = ingestor(http, MockProvider::new());

    let err = ingestor
        .ingest_social(SocialPlatform::TikTok, TIKTOK_POST, "alice")
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::Fetch(_)));
    assert_eq!(llm.call_count(), 0);
    assert!(store.list_by_owner("alice").is_empty());
}

#[tokio::test]
async fn image_scan_keeps_inbound_reference_and_empty_source_url() {
    use base64::{engine::general_purpose::STANDARD, Engine};

    let payload = format!("data:image/png;base64,{}", STANDARD.encode(b"fake image"));
    let llm = MockProvider::new().with_response(
        r#"{"title": "Scanned Pie", "ingredients": ["1 pie crust"], "instructions": ["Bake."]}"#,
    );
    let (ingestor, _store, _llm) = ingestor(MockClient::new(), llm);

    let recipe = ingestor.ingest_image(&payload, None, "bob").await.unwrap();

    assert_eq!(recipe.source, RecipeSource::ImageScan);
    assert_eq!(recipe.source_url, "");
    assert_eq!(recipe.thumbnail_url, payload);
    assert_eq!(recipe.owner_id, "bob");
}

#[tokio::test]
async fn recipes_for_returns_only_the_owners_records_in_order() {
    let html_a = r#"<html><head><script type="application/ld+json">
        {"@type": "Recipe", "name": "First"}</script></head></html>"#;
    let html_b = r#"<html><head><script type="application/ld+json">
        {"@type": "Recipe", "name": "Second"}</script></head></html>"#;
    let http = MockClient::new()
        .with_text("https://example.com/a", html_a)
        .with_text("https://example.com/b", html_b);
    let (ingestor, _store, _llm) = ingestor(http, MockProvider::new());

    ingestor.ingest_web("https://example.com/a", "alice").await.unwrap();
    ingestor.ingest_web("https://example.com/b", "alice").await.unwrap();

    let titles: Vec<String> = ingestor
        .recipes_for("alice")
        .into_iter()
        .map(|r| r.title)
        .collect();
    assert_eq!(titles, vec!["First", "Second"]);
    assert!(ingestor.recipes_for("bob").is_empty());
}
