use thiserror::Error;

use crate::llm::LlmError;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Malformed response from {origin}: {message}")]
    MalformedResponse {
        origin: &'static str,
        message: String,
    },

    #[error("Invalid image payload: {0}")]
    InvalidImage(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Model call failed: {0}")]
    ModelCall(#[from] LlmError),

    #[error("Model output was not a JSON object: {0}")]
    MalformedOutput(String),
}

/// Failure of a full ingest request, for callers that drive the pipeline
/// end to end.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Source fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extract(#[from] ExtractError),
}
