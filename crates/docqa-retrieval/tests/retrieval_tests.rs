use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use docqa_core::config::RetrievalSettings;
use docqa_core::error::{Error, Result};
use docqa_core::traits::EmbeddingGateway;
use docqa_core::types::{Chunk, RetrievalStrategy};
use docqa_gateway::HashingEmbedder;
use docqa_retrieval::{EmbeddingRetriever, Retriever};

fn chunks(texts: &[&str]) -> Vec<Chunk> {
    texts
        .iter()
        .enumerate()
        .map(|(chunk_id, t)| Chunk { chunk_id, text: t.to_string() })
        .collect()
}

fn paper() -> Vec<Chunk> {
    chunks(&[
        "the introduction motivates offline document question answering",
        "our methodology embeds every passage with a sentence encoder",
        "results show retrieval accuracy improves over the keyword baseline",
        "future work covers multilingual corpora and scanned pages",
    ])
}

/// Records the size of every batch it is asked to embed.
struct RecordingEmbedder {
    inner: HashingEmbedder,
    batches: Arc<Mutex<Vec<usize>>>,
}

impl EmbeddingGateway for RecordingEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.batches.lock().unwrap().push(texts.len());
        self.inner.embed_batch(texts)
    }
}

struct FailingEmbedder;

impl EmbeddingGateway for FailingEmbedder {
    fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(Error::EmbeddingFailed { status: 500, body: "backend down".into() })
    }
}

/// Works until `broken` is set, then fails every call.
struct SwitchableEmbedder {
    inner: HashingEmbedder,
    broken: Arc<AtomicBool>,
}

impl EmbeddingGateway for SwitchableEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(Error::Transport("connection reset".into()));
        }
        self.inner.embed_batch(texts)
    }
}

/// Drops the last vector of every batch.
struct ShortEmbedder(HashingEmbedder);

impl EmbeddingGateway for ShortEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut out = self.0.embed_batch(texts)?;
        out.pop();
        Ok(out)
    }
}

#[test]
fn embedding_retrieval_ranks_exact_passage_first() {
    let mut retriever = EmbeddingRetriever::new(Box::new(HashingEmbedder::new(256)), 3, 600);
    let docs = paper();
    assert_eq!(retriever.build_index(&docs).unwrap(), 4);
    assert_eq!(retriever.indexed_parts(), Some(4));

    let hits = retriever.retrieve(&docs[1].text, 2).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].chunk_id, 1);
    assert!((hits[0].score - 1.0).abs() < 1e-4);
    assert!(hits[0].score >= hits[1].score);
}

#[test]
fn retrieve_before_build_is_empty() {
    let retriever = EmbeddingRetriever::new(Box::new(HashingEmbedder::new(64)), 3, 600);
    assert_eq!(retriever.indexed_parts(), None);
    assert!(retriever.retrieve("anything", 4).unwrap().is_empty());
}

#[test]
fn parts_are_embedded_in_batches_of_three() {
    let batches = Arc::new(Mutex::new(Vec::new()));
    let embedder = RecordingEmbedder { inner: HashingEmbedder::new(64), batches: batches.clone() };
    let mut retriever = EmbeddingRetriever::new(Box::new(embedder), 3, 600);
    let docs: Vec<Chunk> = (0..7).map(|i| Chunk { chunk_id: i, text: format!("passage number {i}") }).collect();

    assert_eq!(retriever.build_index(&docs).unwrap(), 7);
    assert_eq!(*batches.lock().unwrap(), vec![3, 3, 1]);
}

#[test]
fn long_chunks_split_into_parts_that_keep_their_chunk_id() {
    let long = vec!["alpha"; 300].join(" ");
    let docs = chunks(&["short opening text", &long]);
    let mut retriever = EmbeddingRetriever::new(Box::new(HashingEmbedder::new(64)), 3, 600);

    let parts = retriever.build_index(&docs).unwrap();
    assert!(parts >= 4, "expected the long chunk to split, got {parts} parts");

    let hits = retriever.retrieve("alpha alpha alpha", parts).unwrap();
    assert_eq!(hits.len(), parts);
    assert!(hits.iter().all(|h| h.text.chars().count() <= 600));
    assert_eq!(hits.iter().filter(|h| h.chunk_id == 1).count(), parts - 1);
}

#[test]
fn rebuilding_replaces_the_previous_document() {
    let mut retriever = EmbeddingRetriever::new(Box::new(HashingEmbedder::new(128)), 3, 600);
    retriever.build_index(&paper()).unwrap();
    retriever.build_index(&chunks(&["a completely different document"])).unwrap();

    let hits = retriever.retrieve("methodology sentence encoder", 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, "a completely different document");
}

#[test]
fn short_batch_is_reported_as_unavailable() {
    let mut retriever = EmbeddingRetriever::new(Box::new(ShortEmbedder(HashingEmbedder::new(32))), 3, 600);
    let err = retriever.build_index(&paper()).unwrap_err();
    assert!(matches!(err, Error::EmbeddingUnavailable(_)), "{err:?}");
    assert_eq!(retriever.indexed_parts(), None);
}

#[test]
fn retriever_prefers_embeddings_when_available() {
    let settings = RetrievalSettings::default();
    let mut retriever = Retriever::new(Some(Box::new(HashingEmbedder::new(256))), &settings);
    retriever.build_index(&paper()).unwrap();
    assert_eq!(retriever.strategy(), RetrievalStrategy::Embedding);

    let r = retriever.retrieve(&paper()[2].text).unwrap();
    assert_eq!(r.strategy, RetrievalStrategy::Embedding);
    assert_eq!(r.passages.len(), settings.top_k);
    assert_eq!(r.passages[0].chunk_id, 2);
}

#[test]
fn failed_index_build_falls_back_to_keywords() {
    let mut retriever = Retriever::new(Some(Box::new(FailingEmbedder)), &RetrievalSettings::default());
    retriever.build_index(&paper()).unwrap();
    assert_eq!(retriever.strategy(), RetrievalStrategy::Keyword);

    let r = retriever.retrieve("Which encoder does the methodology use?").unwrap();
    assert_eq!(r.strategy, RetrievalStrategy::Keyword);
    assert_eq!(r.passages[0].chunk_id, 1);
}

#[test]
fn failed_query_embedding_falls_back_to_keywords() {
    let broken = Arc::new(AtomicBool::new(false));
    let embedder = SwitchableEmbedder { inner: HashingEmbedder::new(128), broken: broken.clone() };
    let mut retriever = Retriever::new(Some(Box::new(embedder)), &RetrievalSettings::default());
    retriever.build_index(&paper()).unwrap();
    assert_eq!(retriever.strategy(), RetrievalStrategy::Embedding);

    broken.store(true, Ordering::SeqCst);
    let r = retriever.retrieve("keyword baseline results").unwrap();
    assert_eq!(r.strategy, RetrievalStrategy::Keyword);
    assert_eq!(r.passages[0].chunk_id, 2);
}

#[test]
fn keyword_only_retriever_finds_overlapping_chunks() {
    let mut retriever = Retriever::keyword_only(&RetrievalSettings::default());
    retriever.build_index(&paper()).unwrap();

    let r = retriever.retrieve("multilingual corpora").unwrap();
    assert_eq!(r.strategy, RetrievalStrategy::Keyword);
    assert_eq!(r.passages.len(), 1);
    assert_eq!(r.passages[0].chunk_id, 3);
    assert_eq!(r.passages[0].score, 2.0);

    assert!(retriever.retrieve("zebra giraffe").unwrap().passages.is_empty());
}
