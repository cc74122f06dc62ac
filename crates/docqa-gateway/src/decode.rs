//! Response decoding for the generation and embedding endpoints.
//!
//! Embedding responses come in a closed set of shapes; anything outside it
//! is rejected with [`Error::UnknownEmbeddingResponseFormat`].

use serde::Deserialize;
use serde_json::Value;

use docqa_core::error::{Error, Result};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmbeddingResponse {
    /// `{"embeddings": [{"values": [..]}]}` or `{"embeddings": [{"embedding": [..]}]}`
    Embeddings { embeddings: Vec<EmbeddingItem> },
    /// `{"data": [{"embedding": [..]}]}`
    Data { data: Vec<DataItem> },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmbeddingItem {
    Values { values: Vec<f32> },
    Embedding { embedding: Vec<f32> },
}

#[derive(Debug, Deserialize)]
struct DataItem {
    embedding: Vec<f32>,
}

impl EmbeddingResponse {
    fn into_vectors(self) -> Vec<Vec<f32>> {
        match self {
            EmbeddingResponse::Embeddings { embeddings } => embeddings
                .into_iter()
                .map(|item| match item {
                    EmbeddingItem::Values { values } => values,
                    EmbeddingItem::Embedding { embedding } => embedding,
                })
                .collect(),
            EmbeddingResponse::Data { data } => data.into_iter().map(|d| d.embedding).collect(),
        }
    }
}

const PREVIEW_CHARS: usize = 200;

fn preview(body: &str) -> String {
    let mut p: String = body.chars().take(PREVIEW_CHARS).collect();
    if body.chars().nth(PREVIEW_CHARS).is_some() { p.push_str("..."); }
    p
}

/// Vectors in response order.
pub fn decode_embeddings(body: &str) -> Result<Vec<Vec<f32>>> {
    serde_json::from_str::<EmbeddingResponse>(body)
        .map(EmbeddingResponse::into_vectors)
        .map_err(|_| Error::UnknownEmbeddingResponseFormat(preview(body)))
}

/// Text at `candidates[0].content.parts[0].text`, or the raw body when the
/// response does not have that shape.
pub fn decode_generation(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/candidates/0/content/parts/0/text").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
