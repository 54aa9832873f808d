//! Source retrieval: turn a source reference into a normalized
//! `SourceDocument`, classifying it as structured or needing
//! interpretation along the way.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use url::Url;

use crate::error::FetchError;
use crate::html;
use crate::http::HttpClient;
use crate::types::{ImageFormat, SourceDocument, SourceOrigin};

/// Bounded timeout for embed-metadata endpoints.
const EMBED_TIMEOUT: Duration = Duration::from_secs(10);

/// Bounded timeout for arbitrary recipe pages.
const PAGE_TIMEOUT: Duration = Duration::from_secs(15);

/// Cap on page text forwarded to the generative extractor, to keep
/// downstream prompts bounded.
const MAX_PAGE_TEXT_CHARS: usize = 10_000;

const EMBED_USER_AGENT: &str = "Mozilla/5.0 (compatible; TrivetBot/1.0)";

/// Realistic browser user agent; plenty of recipe sites reject obvious bots.
const PAGE_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Social platforms with a public embed-metadata endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialPlatform {
    TikTok,
    Instagram,
}

impl SocialPlatform {
    fn oembed_endpoint(&self) -> &'static str {
        match self {
            SocialPlatform::TikTok => "https://www.tiktok.com/oembed",
            SocialPlatform::Instagram => "https://api.instagram.com/oembed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SocialPlatform::TikTok => "TikTok",
            SocialPlatform::Instagram => "Instagram",
        }
    }
}

#[derive(Debug, Deserialize)]
struct OembedResponse {
    /// The post caption. Absent on some embeds; an empty caption is not an
    /// error.
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    thumbnail_url: Option<String>,
}

/// Fetch a social post's embed metadata. The caption becomes `raw_text`;
/// embedded structured data is never present for this origin.
pub async fn fetch_social_embed(
    http: &dyn HttpClient,
    platform: SocialPlatform,
    post_url: &str,
) -> Result<SourceDocument, FetchError> {
    let endpoint = Url::parse_with_params(platform.oembed_endpoint(), &[("url", post_url)])
        .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

    tracing::info!(platform = platform.label(), url = post_url, "fetching embed metadata");

    let body = http
        .fetch_text(endpoint.as_str(), EMBED_TIMEOUT, EMBED_USER_AGENT)
        .await?;

    let embed: OembedResponse =
        serde_json::from_str(&body).map_err(|e| FetchError::MalformedResponse {
            origin: platform.label(),
            message: e.to_string(),
        })?;

    Ok(SourceDocument {
        origin: SourceOrigin::SocialEmbed,
        source_url: post_url.to_string(),
        raw_text: Some(embed.title.unwrap_or_default()),
        raw_binary: None,
        image_format: ImageFormat::default(),
        embedded_structured_data: None,
        thumbnail_url: embed.thumbnail_url,
    })
}

/// Fetch a recipe web page. Embedded structured markup wins when present;
/// otherwise the page's visible text (bounded) is kept for interpretation.
pub async fn fetch_web_page(
    http: &dyn HttpClient,
    page_url: &str,
) -> Result<SourceDocument, FetchError> {
    tracing::info!(url = page_url, "fetching web page");

    let body = http
        .fetch_text(page_url, PAGE_TIMEOUT, PAGE_USER_AGENT)
        .await?;

    let og_image = html::extract_og_image(&body);

    if let Some(recipe) = html::find_embedded_recipe(&body) {
        tracing::debug!(url = page_url, "found embedded structured recipe");
        return Ok(SourceDocument {
            origin: SourceOrigin::WebPage,
            source_url: page_url.to_string(),
            raw_text: None,
            raw_binary: None,
            image_format: ImageFormat::default(),
            embedded_structured_data: Some(recipe),
            thumbnail_url: og_image,
        });
    }

    tracing::debug!(url = page_url, "no structured markup, keeping visible text");
    Ok(SourceDocument {
        origin: SourceOrigin::WebPage,
        source_url: page_url.to_string(),
        raw_text: Some(html::visible_text(&body, MAX_PAGE_TEXT_CHARS)),
        raw_binary: None,
        image_format: ImageFormat::default(),
        embedded_structured_data: None,
        thumbnail_url: og_image,
    })
}

/// Normalize an inbound image payload. Accepts a data URI or bare base64;
/// the declared media type wins over the data-URI prefix, and anything
/// unrecognized falls back to jpeg. The original inbound reference is kept
/// as the thumbnail so the record can be redisplayed without re-encoding.
pub fn decode_image(
    payload: &str,
    declared_media_type: Option<&str>,
) -> Result<SourceDocument, FetchError> {
    let (prefix_media_type, encoded) = match split_data_uri(payload) {
        Some((media_type, rest)) => (Some(media_type), rest),
        None => (None, payload),
    };

    let format = match declared_media_type.or(prefix_media_type) {
        Some(media_type) => ImageFormat::from_media_type(media_type),
        None => ImageFormat::default(),
    };

    let data = STANDARD
        .decode(encoded.trim())
        .map_err(|e| FetchError::InvalidImage(e.to_string()))?;

    Ok(SourceDocument {
        origin: SourceOrigin::Image,
        source_url: String::new(),
        raw_text: None,
        raw_binary: Some(data),
        image_format: format,
        embedded_structured_data: None,
        thumbnail_url: Some(payload.to_string()),
    })
}

/// Split `data:<media-type>;base64,<payload>` into its parts.
fn split_data_uri(payload: &str) -> Option<(&str, &str)> {
    let rest = payload.strip_prefix("data:")?;
    let (media_type, tail) = rest.split_once(';')?;
    let encoded = tail.strip_prefix("base64,")?;
    Some((media_type, encoded))
}
