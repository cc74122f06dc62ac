//! Domain types shared by the chunker, the vector store and the retrievers.

use serde::{Deserialize, Serialize};

/// 0-based ordinal of a chunk within one document.
pub type ChunkId = usize;

/// A contiguous word range of a document's extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_id: ChunkId,
    pub text: String,
}

/// A character-bounded slice of a [`Chunk`], sized for one embedding request item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingPart {
    pub chunk_id: ChunkId,
    pub text: String,
}

/// Metadata stored next to each vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    pub chunk_id: ChunkId,
    pub text: String,
}

impl From<EmbeddingPart> for RecordMeta {
    fn from(part: EmbeddingPart) -> Self {
        Self { chunk_id: part.chunk_id, text: part.text }
    }
}

/// One vector store hit. Higher `score` is better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub score: f32,
    pub metadata: RecordMeta,
}

/// Indicates which strategy produced a result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RetrievalStrategy {
    Embedding,
    Keyword,
}

/// A passage selected for the answer prompt.
///
/// `score` is cosine similarity for embedding retrieval and the keyword
/// overlap count for keyword retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedPassage {
    pub score: f32,
    pub text: String,
    pub chunk_id: ChunkId,
}

impl From<ScoredRecord> for RetrievedPassage {
    fn from(hit: ScoredRecord) -> Self {
        Self { score: hit.score, text: hit.metadata.text, chunk_id: hit.metadata.chunk_id }
    }
}
