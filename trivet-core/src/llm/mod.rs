//! Generative model boundary.
//!
//! The core talks to one narrow contract: hand a provider an instruction
//! (plus optional image bytes) and a response-length bound, get one textual
//! response back or an error. No retries at this layer - a failed call is
//! terminal for the request that issued it.

mod claude;
mod config;

pub use claude::ClaudeProvider;
pub use config::{ConfigError, LlmConfig, DEFAULT_MODEL};

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::ImageFormat;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// An image carried alongside the instruction in a multimodal request.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub format: ImageFormat,
    pub data: Vec<u8>,
}

/// One completion request: a single instruction, an optional image, and a
/// hard upper bound on response length.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub image: Option<ImageAttachment>,
    pub max_tokens: u32,
}

/// Trait for generative model providers.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one completion to its own conclusion or timeout.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;

    fn model_name(&self) -> &str;
}

/// Canned provider for tests. Returns queued responses in order and records
/// how many calls were made.
#[derive(Default)]
pub struct MockProvider {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, content: &str) -> Self {
        self.responses
            .lock()
            .expect("mock provider lock poisoned")
            .push_back(Ok(content.to_string()));
        self
    }

    pub fn with_error(self, error: LlmError) -> Self {
        self.responses
            .lock()
            .expect("mock provider lock poisoned")
            .push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .expect("mock provider lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(LlmError::RequestFailed(
                    "no mock response queued".to_string(),
                ))
            })
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
