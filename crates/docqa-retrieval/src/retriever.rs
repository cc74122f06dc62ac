use std::fmt::Write as _;

use tracing::{info, warn};

use docqa_core::config::RetrievalSettings;
use docqa_core::error::{Error, Result};
use docqa_core::traits::EmbeddingGateway;
use docqa_core::types::{Chunk, RetrievalStrategy, RetrievedPassage};
use docqa_text::KeywordRetriever;

use crate::embedding::EmbeddingRetriever;

/// Passages for one question and the strategy that selected them.
#[derive(Debug, Clone, PartialEq)]
pub struct Retrieval {
    pub strategy: RetrievalStrategy,
    pub passages: Vec<RetrievedPassage>,
}

/// Per-document retriever: embedding search when possible, keyword overlap otherwise.
///
/// Build one per document. [`build_index`](Self::build_index) replaces
/// everything the retriever knew about the previous document.
pub struct Retriever {
    embedding: Option<EmbeddingRetriever>,
    embedding_ready: bool,
    keyword: KeywordRetriever,
    top_k: usize,
}

impl Retriever {
    pub fn new(embedder: Option<Box<dyn EmbeddingGateway>>, settings: &RetrievalSettings) -> Self {
        Self {
            embedding: embedder.map(|e| EmbeddingRetriever::from_settings(e, settings)),
            embedding_ready: false,
            keyword: KeywordRetriever::new(Vec::new(), settings.keyword_top_n),
            top_k: settings.top_k,
        }
    }

    pub fn keyword_only(settings: &RetrievalSettings) -> Self { Self::new(None, settings) }

    /// Strategy the next [`retrieve`](Self::retrieve) call will try first.
    pub fn strategy(&self) -> RetrievalStrategy {
        if self.embedding_ready { RetrievalStrategy::Embedding } else { RetrievalStrategy::Keyword }
    }

    /// Index `chunks` for retrieval.
    ///
    /// An unavailable embedder is not fatal: the failure is logged and the
    /// retriever answers with keyword overlap for this document.
    pub fn build_index(&mut self, chunks: &[Chunk]) -> Result<()> {
        self.keyword = KeywordRetriever::new(chunks.to_vec(), self.keyword.top_n());
        self.embedding_ready = false;
        let Some(embedding) = self.embedding.as_mut() else {
            info!(chunks = chunks.len(), "keyword index built");
            return Ok(());
        };
        match embedding.build_index(chunks) {
            Ok(_) => self.embedding_ready = true,
            Err(Error::EmbeddingUnavailable(reason)) => {
                warn!("embedding index unavailable, using keyword retrieval: {reason}");
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    pub fn retrieve(&self, question: &str) -> Result<Retrieval> {
        if let (true, Some(embedding)) = (self.embedding_ready, self.embedding.as_ref()) {
            match embedding.retrieve(question, self.top_k) {
                Ok(passages) => return Ok(Retrieval { strategy: RetrievalStrategy::Embedding, passages }),
                Err(Error::EmbeddingUnavailable(reason)) => {
                    warn!("embedding retrieval failed, falling back to keywords: {reason}");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(Retrieval { strategy: RetrievalStrategy::Keyword, passages: self.keyword.retrieve(question) })
    }
}

/// Render passages as numbered context blocks for the answer prompt.
pub fn format_contexts(passages: &[RetrievedPassage]) -> String {
    let mut out = String::new();
    for p in passages {
        let _ = write!(out, "CONTEXT #{} (score {}):\n{}\n\n", p.chunk_id, p.score, p.text);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contexts_are_numbered_by_chunk() {
        let passages = vec![
            RetrievedPassage { score: 2.0, text: "first".into(), chunk_id: 3 },
            RetrievedPassage { score: 1.0, text: "second".into(), chunk_id: 0 },
        ];
        assert_eq!(format_contexts(&passages), "CONTEXT #3 (score 2):\nfirst\n\nCONTEXT #0 (score 1):\nsecond\n\n");
    }

    #[test]
    fn keyword_only_before_indexing_returns_nothing() {
        let retriever = Retriever::keyword_only(&RetrievalSettings::default());
        let r = retriever.retrieve("anything at all").unwrap();
        assert_eq!(r.strategy, RetrievalStrategy::Keyword);
        assert!(r.passages.is_empty());
    }
}
