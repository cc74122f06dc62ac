use tracing::debug;

use docqa_core::types::{Chunk, RetrievedPassage};

use crate::tokenize::query_tokens;

/// Passages returned when the caller does not ask for a specific count.
pub const DEFAULT_TOP_N: usize = 5;

/// Number of `tokens` that occur in `text_lower` as substrings.
///
/// Matching is by substring, not whole word: "art" matches inside
/// "particle". A token repeated in the question counts once per repetition.
pub fn keyword_score(tokens: &[String], text_lower: &str) -> usize {
    tokens.iter().filter(|t| text_lower.contains(t.as_str())).count()
}

/// Ranks a document's chunks by keyword overlap with the question.
pub struct KeywordRetriever {
    chunks: Vec<Chunk>,
    lowered: Vec<String>,
    top_n: usize,
}

impl KeywordRetriever {
    pub fn new(chunks: Vec<Chunk>, top_n: usize) -> Self {
        let lowered = chunks.iter().map(|c| c.text.to_lowercase()).collect();
        Self { chunks, lowered, top_n }
    }

    pub fn with_default_top_n(chunks: Vec<Chunk>) -> Self { Self::new(chunks, DEFAULT_TOP_N) }

    pub fn chunks(&self) -> &[Chunk] { &self.chunks }

    pub fn top_n(&self) -> usize { self.top_n }

    /// Chunks with a positive score, best first, at most `top_n`.
    ///
    /// Equal scores keep document order. No overlap at all yields an empty
    /// list, which means "no relevant passages", not an error.
    pub fn retrieve(&self, question: &str) -> Vec<RetrievedPassage> {
        let tokens = query_tokens(question);
        let mut matches: Vec<(usize, &Chunk)> = self
            .chunks
            .iter()
            .zip(&self.lowered)
            .map(|(chunk, lower)| (keyword_score(&tokens, lower), chunk))
            .filter(|(score, _)| *score > 0)
            .collect();
        matches.sort_by(|a, b| b.0.cmp(&a.0));
        matches.truncate(self.top_n);
        debug!(tokens = tokens.len(), hits = matches.len(), "keyword retrieval");
        matches
            .into_iter()
            .map(|(score, chunk)| RetrievedPassage { score: score as f32, text: chunk.text.clone(), chunk_id: chunk.chunk_id })
            .collect()
    }
}
