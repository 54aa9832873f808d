//! End-to-end ingest orchestration.
//!
//! Control flow: source adapter -> (structured | generative) extractor ->
//! canonical Recipe -> store. Requests are handled independently; the only
//! shared mutation is the store append, which happens exactly once, after
//! the full canonical record is assembled. No stage retries.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{ExtractError, IngestError};
use crate::generative;
use crate::http::HttpClient;
use crate::llm::LlmProvider;
use crate::source::{self, SocialPlatform};
use crate::store::RecipeStore;
use crate::structured;
use crate::types::{ImageFormat, Recipe, RecipeDraft, RecipeSource, SourceDocument, SourceOrigin};

/// Orchestrates one extraction request from source reference to stored
/// canonical recipe.
pub struct Ingestor {
    http: Arc<dyn HttpClient>,
    llm: Arc<dyn LlmProvider>,
    store: Arc<dyn RecipeStore>,
}

impl Ingestor {
    pub fn new(
        http: Arc<dyn HttpClient>,
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn RecipeStore>,
    ) -> Self {
        Self { http, llm, store }
    }

    /// Ingest a TikTok or Instagram post by URL.
    pub async fn ingest_social(
        &self,
        platform: SocialPlatform,
        post_url: &str,
        owner_id: &str,
    ) -> Result<Recipe, IngestError> {
        let document = source::fetch_social_embed(self.http.as_ref(), platform, post_url).await?;

        let recipe_source = match platform {
            SocialPlatform::TikTok => RecipeSource::TikTok,
            SocialPlatform::Instagram => RecipeSource::Instagram,
        };
        let hint_label = match platform {
            SocialPlatform::TikTok => "TikTok caption",
            SocialPlatform::Instagram => "Instagram caption",
        };

        self.extract_and_save(document, recipe_source, hint_label, owner_id)
            .await
    }

    /// Ingest an arbitrary recipe web page by URL.
    pub async fn ingest_web(&self, page_url: &str, owner_id: &str) -> Result<Recipe, IngestError> {
        let document = source::fetch_web_page(self.http.as_ref(), page_url).await?;
        self.extract_and_save(document, RecipeSource::Website, "web page", owner_id)
            .await
    }

    /// Ingest a photographed recipe from an inline image payload.
    pub async fn ingest_image(
        &self,
        payload: &str,
        declared_media_type: Option<&str>,
        owner_id: &str,
    ) -> Result<Recipe, IngestError> {
        let document = source::decode_image(payload, declared_media_type)?;
        self.extract_and_save(
            document,
            RecipeSource::ImageScan,
            "photo of a printed recipe",
            owner_id,
        )
        .await
    }

    /// Run the generative extractor against raw caption text without
    /// fetching or persisting anything. Exercises the model path in
    /// isolation.
    pub async fn extract_from_caption(&self, caption: &str) -> Result<RecipeDraft, ExtractError> {
        let document = SourceDocument {
            origin: SourceOrigin::SocialEmbed,
            source_url: String::new(),
            raw_text: Some(caption.to_string()),
            raw_binary: None,
            image_format: ImageFormat::default(),
            embedded_structured_data: None,
            thumbnail_url: None,
        };
        generative::extract_draft(self.llm.as_ref(), &document, "caption").await
    }

    /// All recipes owned by `owner_id`, in insertion order.
    pub fn recipes_for(&self, owner_id: &str) -> Vec<Recipe> {
        self.store.list_by_owner(owner_id)
    }

    async fn extract_and_save(
        &self,
        document: SourceDocument,
        recipe_source: RecipeSource,
        hint_label: &str,
        owner_id: &str,
    ) -> Result<Recipe, IngestError> {
        let draft = match &document.embedded_structured_data {
            Some(data) => {
                tracing::info!(source = ?recipe_source, "coercing embedded structured data");
                structured::coerce_structured(data)
            }
            None => {
                tracing::info!(
                    source = ?recipe_source,
                    model = self.llm.model_name(),
                    "running generative extraction"
                );
                generative::extract_draft(self.llm.as_ref(), &document, hint_label).await?
            }
        };

        let recipe = finalize(draft, &document, recipe_source, owner_id);
        self.store.append(recipe.clone());
        tracing::info!(recipe_id = %recipe.id, owner_id, title = %recipe.title, "recipe saved");
        Ok(recipe)
    }
}

/// Stamp identity and request context onto an extracted draft. The source
/// URL always comes from the request side; the thumbnail prefers what the
/// structured markup carried, then what the adapter saw.
fn finalize(
    draft: RecipeDraft,
    document: &SourceDocument,
    recipe_source: RecipeSource,
    owner_id: &str,
) -> Recipe {
    let thumbnail_url = if draft.thumbnail_url.is_empty() {
        document.thumbnail_url.clone().unwrap_or_default()
    } else {
        draft.thumbnail_url
    };

    Recipe {
        id: Uuid::new_v4(),
        owner_id: owner_id.to_string(),
        title: draft.title,
        description: draft.description,
        prep_time: draft.prep_time,
        cook_time: draft.cook_time,
        total_time: draft.total_time,
        servings: draft.servings,
        difficulty: draft.difficulty,
        ingredients: draft.ingredients,
        instructions: draft.instructions,
        tags: draft.tags,
        notes: draft.notes,
        source: recipe_source,
        source_url: document.source_url.clone(),
        thumbnail_url,
        created_at: Utc::now(),
        favorite: false,
    }
}
