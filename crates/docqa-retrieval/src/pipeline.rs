//! Summarization and question answering on top of the gateways.

use tracing::{info, warn};

use docqa_core::error::{Error, Result};
use docqa_core::traits::GenerationGateway;
use docqa_core::types::{Chunk, ChunkId, RetrievalStrategy};

use crate::prompts::{answer_prompt, SummaryMode};
use crate::retriever::{format_contexts, Retriever};

/// Outcome of [`summarize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReport {
    pub summary: String,
    /// Chunks whose partial summary failed and was left out.
    pub failed_chunks: Vec<ChunkId>,
    /// Whether the final text came from the merge pass rather than the joined partials.
    pub merged: bool,
}

/// Summarize every chunk, then merge the partial summaries in one more call.
///
/// A chunk whose generation fails contributes nothing and is listed in
/// `failed_chunks`; processing continues with the next chunk. `on_progress`
/// receives `(done, total)` after each chunk. If the merge call fails the
/// joined partials are returned instead.
pub fn summarize(
    generator: &dyn GenerationGateway,
    chunks: &[Chunk],
    mode: SummaryMode,
    mut on_progress: impl FnMut(usize, usize),
) -> SummaryReport {
    let total = chunks.len();
    let mut partials = Vec::with_capacity(total);
    let mut failed_chunks = Vec::new();
    for (done, chunk) in chunks.iter().enumerate() {
        match generator.generate(&mode.prompt(&chunk.text)) {
            Ok(text) => {
                let text = text.trim();
                if !text.is_empty() { partials.push(text.to_string()); }
            }
            Err(e) => {
                warn!(chunk = chunk.chunk_id, "summary generation failed: {e}");
                failed_chunks.push(chunk.chunk_id);
            }
        }
        on_progress(done + 1, total);
    }

    if partials.is_empty() {
        return SummaryReport { summary: String::new(), failed_chunks, merged: false };
    }
    let joined = partials.join("\n\n");
    match generator.generate(&mode.prompt(&joined)) {
        Ok(summary) => {
            info!(chunks = total, failed = failed_chunks.len(), "summary merged");
            SummaryReport { summary: summary.trim().to_string(), failed_chunks, merged: true }
        }
        Err(e) => {
            warn!("merge generation failed, returning partial summaries: {e}");
            SummaryReport { summary: joined, failed_chunks, merged: false }
        }
    }
}

/// Result of [`answer`].
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Retrieval found nothing to ground an answer on.
    NoRelevantPassages,
    Generated {
        text: String,
        /// The formatted context blocks that were sent with the question.
        contexts: String,
        strategy: RetrievalStrategy,
    },
}

/// Retrieve passages for `question` and ask the generator to answer from them.
pub fn answer(generator: &dyn GenerationGateway, retriever: &Retriever, question: &str) -> Result<Answer> {
    let question = question.trim();
    if question.is_empty() {
        return Err(Error::Usage("question must not be empty".into()));
    }
    let retrieval = retriever.retrieve(question)?;
    if retrieval.passages.is_empty() {
        info!(strategy = ?retrieval.strategy, "no relevant passages");
        return Ok(Answer::NoRelevantPassages);
    }
    let contexts = format_contexts(&retrieval.passages);
    let text = generator.generate(&answer_prompt(&contexts, question))?;
    Ok(Answer::Generated { text, contexts, strategy: retrieval.strategy })
}
