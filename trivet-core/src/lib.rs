pub mod coerce;
pub mod error;
pub mod generative;
pub mod html;
pub mod http;
pub mod llm;
pub mod pipeline;
pub mod source;
pub mod store;
pub mod structured;
pub mod types;

pub use error::{ExtractError, FetchError, IngestError};
pub use http::{HttpClient, MockClient, MockResponse, WebClient};
pub use pipeline::Ingestor;
pub use source::SocialPlatform;
pub use store::{MemoryStore, RecipeStore};
pub use types::{
    ImageFormat, Recipe, RecipeDraft, RecipeSource, SourceDocument, SourceOrigin,
};
