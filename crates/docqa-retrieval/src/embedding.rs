use tracing::{debug, info};

use docqa_core::chunker::embedding_parts;
use docqa_core::config::RetrievalSettings;
use docqa_core::error::{Error, Result};
use docqa_core::traits::EmbeddingGateway;
use docqa_core::types::{Chunk, RecordMeta, RetrievedPassage};
use docqa_vector::InMemoryVectorStore;

/// Any gateway failure means embedding retrieval is unavailable for this
/// document; usage errors stay what they are.
fn unavailable(e: Error) -> Error {
    match e {
        Error::EmbeddingUnavailable(_) | Error::Usage(_) => e,
        other => Error::EmbeddingUnavailable(other.to_string()),
    }
}

/// Embeds a document's chunks into a fresh vector store and answers
/// nearest-neighbour queries against it.
pub struct EmbeddingRetriever {
    embedder: Box<dyn EmbeddingGateway>,
    store: Option<InMemoryVectorStore>,
    batch_size: usize,
    max_chars: usize,
}

impl EmbeddingRetriever {
    /// # Panics
    /// Panics if `batch_size` or `max_chars` is zero.
    pub fn new(embedder: Box<dyn EmbeddingGateway>, batch_size: usize, max_chars: usize) -> Self {
        assert!(batch_size > 0, "batch_size must be positive");
        assert!(max_chars > 0, "max_chars must be positive");
        Self { embedder, store: None, batch_size, max_chars }
    }

    pub fn from_settings(embedder: Box<dyn EmbeddingGateway>, settings: &RetrievalSettings) -> Self {
        Self::new(embedder, settings.embed_batch_size, settings.embed_max_chars)
    }

    /// Records in the current index, if one has been built.
    pub fn indexed_parts(&self) -> Option<usize> { self.store.as_ref().map(InMemoryVectorStore::len) }

    /// Replace the index with one built from `chunks`; returns the number of
    /// embedded parts.
    ///
    /// Each chunk is split into embedding-safe parts, parts are embedded
    /// `batch_size` at a time, and the vectors are stored in part order.
    /// The previous index is dropped before any request is made, so a failed
    /// build never leaves another document's vectors behind.
    pub fn build_index(&mut self, chunks: &[Chunk]) -> Result<usize> {
        self.store = None;
        let parts = embedding_parts(chunks, self.max_chars);
        let mut vectors = Vec::with_capacity(parts.len());
        for (n, batch) in parts.chunks(self.batch_size).enumerate() {
            let texts: Vec<String> = batch.iter().map(|p| p.text.clone()).collect();
            let embedded = self.embedder.embed_batch(&texts).map_err(unavailable)?;
            if embedded.len() != batch.len() {
                return Err(Error::EmbeddingUnavailable(format!(
                    "batch {} returned {} vectors for {} parts",
                    n,
                    embedded.len(),
                    batch.len()
                )));
            }
            debug!(batch = n, parts = batch.len(), "embedded batch");
            vectors.extend(embedded);
        }
        let count = parts.len();
        let mut store = InMemoryVectorStore::new();
        store.add(vectors, parts.into_iter().map(RecordMeta::from).collect())?;
        info!(chunks = chunks.len(), parts = count, "embedding index built");
        self.store = Some(store);
        Ok(count)
    }

    /// The `top_k` parts closest to `question`, best first.
    ///
    /// Before any index has been built this returns an empty list.
    pub fn retrieve(&self, question: &str, top_k: usize) -> Result<Vec<RetrievedPassage>> {
        let Some(store) = &self.store else { return Ok(Vec::new()) };
        if store.is_empty() { return Ok(Vec::new()); }
        let query = self.embedder.embed_one(question).map_err(unavailable)?;
        let hits = store.search(&query, top_k)?;
        Ok(hits.into_iter().map(RetrievedPassage::from).collect())
    }
}
