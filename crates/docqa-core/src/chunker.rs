//! Word-window chunking and character-bounded splitting for embedding requests.

use std::ops::Range;

use crate::config::ChunkingSettings;
use crate::types::{Chunk, EmbeddingPart};

/// Collapse every whitespace run to a single space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Word ranges covered by each window over a sequence of `word_count` words.
///
/// The next window starts `overlap` words before the previous end, unless
/// that would not move past the previous start, in which case it starts at
/// the previous end. Iteration stops at the window that reaches the last word.
///
/// # Panics
/// Panics if `max_words` is zero.
pub fn window_ranges(word_count: usize, max_words: usize, overlap: usize) -> Vec<Range<usize>> {
    assert!(max_words > 0, "max_words must be positive");
    let mut ranges = Vec::new();
    let mut start = 0;
    while start < word_count {
        let end = (start + max_words).min(word_count);
        ranges.push(start..end);
        if end == word_count { break; }
        start = end.checked_sub(overlap).filter(|&next| next > start).unwrap_or(end);
    }
    ranges
}

/// Split `text` on whitespace into windows of at most `max_words` words,
/// consecutive windows sharing `overlap` words.
///
/// Empty input yields no chunks. `overlap >= max_words` degrades to
/// non-overlapping windows.
///
/// # Panics
/// Panics if `max_words` is zero.
pub fn chunk_text(text: &str, max_words: usize, overlap: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    window_ranges(words.len(), max_words, overlap)
        .into_iter()
        .map(|r| words[r].join(" "))
        .collect()
}

/// Greedily split `text` into parts of at most `max_chars` characters.
///
/// Each part is the longest prefix of at most `max_chars` characters that
/// ends at a whitespace boundary, including a boundary right after the
/// `max_chars`-th character. A window with no whitespace is cut hard at
/// `max_chars`. Parts are trimmed at their ends but keep inner whitespace
/// runs, so only the whitespace-normalized join of the parts equals the
/// whitespace-normalized input (when no hard cut was needed).
///
/// # Panics
/// Panics if `max_chars` is zero.
pub fn split_for_embedding(text: &str, max_chars: usize) -> Vec<String> {
    assert!(max_chars > 0, "max_chars must be positive");
    let mut parts = Vec::new();
    let mut rest = text.trim();
    // `nth(max_chars)` exists only while more than `max_chars` chars remain.
    while let Some((limit, next)) = rest.char_indices().nth(max_chars) {
        let cut = if next.is_whitespace() {
            limit
        } else {
            rest[..limit]
                .rfind(char::is_whitespace)
                .filter(|&i| i > 0)
                .unwrap_or(limit)
        };
        parts.push(rest[..cut].trim_end().to_string());
        rest = rest[cut..].trim_start();
    }
    if !rest.is_empty() {
        parts.push(rest.to_string());
    }
    parts
}

/// Chunker bound to one chunking configuration.
#[derive(Debug, Clone)]
pub struct Chunker {
    max_words: usize,
    overlap: usize,
}

impl Chunker {
    /// # Panics
    /// Panics if `max_words` is zero.
    pub fn new(max_words: usize, overlap: usize) -> Self {
        assert!(max_words > 0, "max_words must be positive");
        Self { max_words, overlap }
    }

    pub fn from_settings(settings: &ChunkingSettings) -> Self { Self::new(settings.max_words, settings.overlap) }

    /// Chunk a document, assigning `chunk_id`s left to right from 0.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        chunk_text(text, self.max_words, self.overlap)
            .into_iter()
            .enumerate()
            .map(|(chunk_id, text)| Chunk { chunk_id, text })
            .collect()
    }
}

/// Split every chunk into embedding-safe parts tagged with the parent `chunk_id`.
pub fn embedding_parts(chunks: &[Chunk], max_chars: usize) -> Vec<EmbeddingPart> {
    chunks
        .iter()
        .flat_map(|c| {
            split_for_embedding(&c.text, max_chars)
                .into_iter()
                .map(move |text| EmbeddingPart { chunk_id: c.chunk_id, text })
        })
        .collect()
}
