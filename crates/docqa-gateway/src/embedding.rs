use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{debug, warn};

use docqa_core::config::GatewaySettings;
use docqa_core::error::{Error, Result};
use docqa_core::traits::EmbeddingGateway;

use crate::decode::decode_embeddings;
use crate::http::{build_client, endpoint, post_json};

#[derive(Serialize)]
struct EmbedRequest<'a> {
    texts: &'a [String],
}

/// `embedText` client. One request per call, no retries.
pub struct GeminiEmbedder {
    client: Client,
    url: String,
    api_key: String,
}

impl GeminiEmbedder {
    pub fn new(settings: &GatewaySettings) -> Result<Self> {
        let api_key = settings.require_api_key()?.to_string();
        Ok(Self {
            client: build_client(settings)?,
            url: endpoint(settings, &settings.embedding_model, "embedText"),
            api_key,
        })
    }
}

impl EmbeddingGateway for GeminiEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() { return Ok(Vec::new()); }
        debug!(inputs = texts.len(), "embed");
        let resp = post_json(&self.client, &self.url, &self.api_key, &EmbedRequest { texts })?;
        if !resp.is_success() {
            warn!(status = resp.status, "embedding request failed: {}", resp.body);
            return Err(Error::EmbeddingFailed { status: resp.status, body: resp.body });
        }
        let vectors = decode_embeddings(&resp.body)?;
        if vectors.len() != texts.len() {
            return Err(Error::UnknownEmbeddingResponseFormat(format!(
                "{} vectors returned for {} inputs",
                vectors.len(),
                texts.len()
            )));
        }
        Ok(vectors)
    }
}
