//! docqa-gateway
//!
//! Remote text generation and embedding over the Generative Language REST
//! API, plus a deterministic offline embedder for tests and development.

pub mod decode;
pub mod embedding;
pub mod generation;
pub mod hashing;
mod http;
pub mod retry;

pub use embedding::GeminiEmbedder;
pub use generation::GeminiGenerator;
pub use hashing::HashingEmbedder;
pub use retry::RetryPolicy;

use docqa_core::config::Settings;
use docqa_core::error::Result;
use docqa_core::traits::EmbeddingGateway;
use tracing::info;

/// Dimensionality of the hashing embedder used when fake embeddings are on.
pub const FAKE_EMBEDDING_DIM: usize = 768;

/// Pick the embedding gateway the settings ask for.
///
/// `use_fake_embeddings` (or `APP_USE_FAKE_EMBEDDINGS=1`) selects the hashing
/// embedder; otherwise a configured API key selects the remote gateway.
/// `None` means retrieval has to run in keyword mode.
pub fn get_default_embedder(settings: &Settings) -> Result<Option<Box<dyn EmbeddingGateway>>> {
    if settings.use_fake_embeddings {
        info!("using hashing embedder (dim {})", FAKE_EMBEDDING_DIM);
        return Ok(Some(Box::new(HashingEmbedder::new(FAKE_EMBEDDING_DIM))));
    }
    if settings.gateway.require_api_key().is_err() {
        info!("no API key configured; embedding retrieval disabled");
        return Ok(None);
    }
    Ok(Some(Box::new(GeminiEmbedder::new(&settings.gateway)?)))
}
