//! Claude (Anthropic) model provider.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use super::{CompletionRequest, LlmConfig, LlmError, LlmProvider};

/// Claude API provider.
#[derive(Debug)]
pub struct ClaudeProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl ClaudeProvider {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            api_key: config.api_key,
            model: config.model,
            base_url: config.base_url,
            client: reqwest::Client::new(),
        }
    }
}

/// Claude API request format.
#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ClaudeMessage>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage {
    role: String,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentBlock {
    Text { text: String },
    Image { source: ImageSource },
}

#[derive(Debug, Serialize)]
struct ImageSource {
    #[serde(rename = "type")]
    source_type: &'static str,
    media_type: String,
    data: String,
}

/// Claude API response format.
#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClaudeApiError {
    message: String,
}

/// Error response from the Claude API.
#[derive(Debug, Deserialize)]
struct ClaudeErrorResponse {
    error: ClaudeApiError,
}

#[async_trait]
impl LlmProvider for ClaudeProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let mut content = Vec::new();
        if let Some(image) = &request.image {
            content.push(ContentBlock::Image {
                source: ImageSource {
                    source_type: "base64",
                    media_type: image.format.media_type().to_string(),
                    data: STANDARD.encode(&image.data),
                },
            });
        }
        content.push(ContentBlock::Text {
            text: request.prompt,
        });

        let body = ClaudeRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens,
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content,
            }],
        };

        tracing::debug!(model = %self.model, "calling model API");

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();

        let body_text = response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if status != 200 {
            // Try to parse error response
            if let Ok(error_response) = serde_json::from_str::<ClaudeErrorResponse>(&body_text) {
                return Err(LlmError::ApiError {
                    status,
                    message: error_response.error.message,
                });
            }
            return Err(LlmError::ApiError {
                status,
                message: body_text,
            });
        }

        let parsed: ClaudeResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError(e.to_string()))?;

        // Extract text from the first text content block
        parsed
            .content
            .into_iter()
            .find_map(|c| {
                if c.content_type == "text" {
                    c.text
                } else {
                    None
                }
            })
            .ok_or_else(|| LlmError::ParseError("No text content in response".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
