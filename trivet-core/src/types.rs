use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Where a source document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOrigin {
    SocialEmbed,
    WebPage,
    Image,
}

/// The originating platform recorded on a canonical recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RecipeSource {
    TikTok,
    Instagram,
    Website,
    ImageScan,
}

/// Image media types accepted for scanned recipes.
/// Anything undeclared or unrecognized resolves to jpeg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Jpeg,
    Png,
    Webp,
    Gif,
}

impl ImageFormat {
    pub fn media_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Gif => "image/gif",
        }
    }

    pub fn from_media_type(media_type: &str) -> Self {
        match media_type.trim().to_ascii_lowercase().as_str() {
            "image/png" | "png" => ImageFormat::Png,
            "image/webp" | "webp" => ImageFormat::Webp,
            "image/gif" | "gif" => ImageFormat::Gif,
            _ => ImageFormat::Jpeg,
        }
    }
}

/// Result of retrieving one source.
///
/// Constructed once per inbound request, immutable, discarded after
/// extraction. For non-structured origins exactly one of `raw_text` /
/// `raw_binary` is populated; `embedded_structured_data` only when the
/// retrieval discovered machine-readable recipe markup.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub origin: SourceOrigin,
    /// Canonical URL of the request, empty for inline images.
    pub source_url: String,
    pub raw_text: Option<String>,
    pub raw_binary: Option<Vec<u8>>,
    pub image_format: ImageFormat,
    pub embedded_structured_data: Option<serde_json::Value>,
    pub thumbnail_url: Option<String>,
}

/// Extracted recipe content before identity assignment.
///
/// Every field holds its typed default when the source had nothing for it,
/// never an absent value, so downstream consumers don't branch on presence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
    pub servings: String,
    pub difficulty: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
    pub notes: String,
    pub thumbnail_url: String,
}

/// The canonical recipe record - the only persisted entity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Assigned once at creation, unique for the lifetime of the process.
    pub id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub prep_time: String,
    pub cook_time: String,
    /// Never inferred from prep and cook times.
    pub total_time: String,
    pub servings: String,
    pub difficulty: String,
    /// Order-preserving and verbatim - a source's wording is not reformatted.
    pub ingredients: Vec<String>,
    /// One step per entry, verbatim.
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
    pub notes: String,
    pub source: RecipeSource,
    /// Empty for ImageScan.
    pub source_url: String,
    /// Remote URL or inline image data.
    pub thumbnail_url: String,
    pub created_at: DateTime<Utc>,
    /// Mutable only by collaborators outside this core.
    pub favorite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_media_type_defaults_to_jpeg() {
        assert_eq!(ImageFormat::from_media_type("image/tiff"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_media_type(""), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_media_type("image/png"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_media_type("WEBP"), ImageFormat::Webp);
    }
}
