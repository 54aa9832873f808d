//! Generative extraction of recipes from unstructured documents.
//!
//! The model's output is untrusted: it is sanitized and bounded before
//! parsing, and no single field is taken at face value afterward. Only
//! overall JSON validity is required of the model.

use serde_json::Value;

use crate::coerce::{
    coerce_servings, flatten_ingredients, flatten_instructions, string_list_or_default,
    string_or_default, title_or_untitled,
};
use crate::error::ExtractError;
use crate::llm::{CompletionRequest, ImageAttachment, LlmProvider};
use crate::types::{RecipeDraft, SourceDocument};

/// Response-length bound for one extraction, sized to comfortably hold a
/// full recipe.
pub const MAX_COMPLETION_TOKENS: u32 = 2000;

/// Render the extraction instruction for one source document.
pub fn render_extract_prompt(hint_label: &str) -> String {
    format!(
        r#"Extract a recipe from this {hint_label}. Return exactly one JSON object with this structure:

{{
  "title": "Recipe name",
  "description": "Brief description",
  "prepTime": "X min",
  "cookTime": "X min",
  "totalTime": "X min",
  "servings": "X",
  "difficulty": "Easy/Medium/Hard",
  "ingredients": ["ingredient 1", "ingredient 2"],
  "instructions": ["Step 1", "Step 2"],
  "tags": ["tag1", "tag2"],
  "notes": "Tips"
}}

Rules:
- Return ONLY the JSON object. No markdown fences, no commentary.
- Copy ingredients and instructions verbatim from the source. Do not paraphrase.
- Use an empty string or empty array for any field the source does not contain. Never invent content."#
    )
}

/// Extract a recipe draft from an unstructured source document.
///
/// Text sources have their content inlined into the instruction; image
/// sources pair the instruction with the image bytes in a single multimodal
/// request. One attempt, no retry.
pub async fn extract_draft(
    provider: &dyn LlmProvider,
    document: &SourceDocument,
    hint_label: &str,
) -> Result<RecipeDraft, ExtractError> {
    let mut prompt = render_extract_prompt(hint_label);

    let image = document.raw_binary.as_ref().map(|data| ImageAttachment {
        format: document.image_format,
        data: data.clone(),
    });

    if image.is_none() {
        prompt.push_str("\n\nSource:\n");
        prompt.push_str(document.raw_text.as_deref().unwrap_or_default());
    }

    let response = provider
        .complete(CompletionRequest {
            prompt,
            image,
            max_tokens: MAX_COMPLETION_TOKENS,
        })
        .await?;

    let parsed = sanitize_model_output(&response)?;
    Ok(draft_from_model_json(&parsed))
}

/// Sanitize raw model output down to one parsed JSON object.
///
/// Applied in order: trim; strip code-fence markers wherever they occur
/// (models sometimes wrap output mid-response, not only at the edges);
/// re-trim; slice from the first `{` to the last `}` to discard any leading
/// prose the model added despite instructions; parse. Either brace missing
/// means the model produced no JSON object at all.
pub fn sanitize_model_output(raw: &str) -> Result<Value, ExtractError> {
    let trimmed = raw.trim();
    let without_fences = trimmed.replace("```json", "").replace("```", "");
    let cleaned = without_fences.trim();

    let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) else {
        return Err(ExtractError::MalformedOutput(
            "no JSON object in model output".to_string(),
        ));
    };
    if end < start {
        return Err(ExtractError::MalformedOutput(
            "no JSON object in model output".to_string(),
        ));
    }

    let span = &cleaned[start..=end];

    serde_json::from_str(span).map_err(|e| {
        // Keep a short prefix for diagnostics; never surfaced to end users.
        let preview: String = span.chars().take(100).collect();
        ExtractError::MalformedOutput(format!("{}: {}", e, preview))
    })
}

/// Read every expected field with a typed default fallback. `thumbnail_url`
/// stays empty here: it is always overwritten from the request context, as
/// is the source URL - the model never sees either and must not fabricate
/// them.
fn draft_from_model_json(value: &Value) -> RecipeDraft {
    RecipeDraft {
        title: title_or_untitled(string_or_default(value, "title")),
        description: string_or_default(value, "description"),
        prep_time: string_or_default(value, "prepTime"),
        cook_time: string_or_default(value, "cookTime"),
        total_time: string_or_default(value, "totalTime"),
        servings: value
            .get("servings")
            .map(coerce_servings)
            .unwrap_or_default(),
        difficulty: string_or_default(value, "difficulty"),
        ingredients: value
            .get("ingredients")
            .map(flatten_ingredients)
            .unwrap_or_default(),
        instructions: value
            .get("instructions")
            .map(flatten_instructions)
            .unwrap_or_default(),
        tags: string_list_or_default(value, "tags"),
        notes: string_or_default(value, "notes"),
        thumbnail_url: String::new(),
    }
}
