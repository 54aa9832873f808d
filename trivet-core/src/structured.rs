//! Direct coercion of embedded structured recipe markup.
//!
//! No network, no model calls: deterministic given its input. A missing or
//! malformed sub-field degrades to that field's default rather than failing
//! the request - partial structured data is still more useful than a hard
//! failure.

use serde_json::Value;

use crate::coerce::{
    coerce_servings, flatten_ingredients, flatten_instructions, format_duration,
    string_list_or_default, string_or_default, title_or_untitled,
};
use crate::types::RecipeDraft;

/// Coerce a schema.org Recipe node into a draft. Never fails.
pub fn coerce_structured(data: &Value) -> RecipeDraft {
    RecipeDraft {
        title: title_or_untitled(string_or_default(data, "name")),
        description: string_or_default(data, "description"),
        prep_time: format_duration(&string_or_default(data, "prepTime")),
        cook_time: format_duration(&string_or_default(data, "cookTime")),
        total_time: format_duration(&string_or_default(data, "totalTime")),
        servings: data
            .get("recipeYield")
            .map(coerce_servings)
            .unwrap_or_default(),
        // Not a schema.org Recipe property; never present in this markup form.
        difficulty: String::new(),
        ingredients: data
            .get("recipeIngredient")
            .map(flatten_ingredients)
            .unwrap_or_default(),
        instructions: data
            .get("recipeInstructions")
            .map(flatten_instructions)
            .unwrap_or_default(),
        tags: string_list_or_default(data, "recipeCategory"),
        notes: string_or_default(data, "notes"),
        thumbnail_url: coerce_image_url(data.get("image")),
    }
}

/// The `image` property appears as a bare URL, an ImageObject carrying a
/// `url`, or an array of either.
fn coerce_image_url(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(obj)) => obj
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Some(Value::Array(items)) => items
            .first()
            .map(|item| coerce_image_url(Some(item)))
            .unwrap_or_default(),
        _ => String::new(),
    }
}
