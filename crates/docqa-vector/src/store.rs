use std::cmp::Ordering;

use tracing::debug;

use docqa_core::error::{Error, Result};
use docqa_core::types::{RecordMeta, ScoredRecord};

use crate::similarity::cosine_similarity;

/// Ordered, append-only collection of `(vector, metadata)` records.
///
/// The first successful [`add`](Self::add) fixes the dimensionality; every
/// later vector must match it. Records are never removed or updated, so a
/// record's position is a stable identity for the life of the store.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    dim: Option<usize>,
    vectors: Vec<Vec<f32>>,
    metadatas: Vec<RecordMeta>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.metadatas.len() }

    pub fn is_empty(&self) -> bool { self.metadatas.is_empty() }

    /// Dimensionality, once the first vector has been added.
    pub fn dim(&self) -> Option<usize> { self.dim }

    /// Append `vectors[i]` paired with `metadatas[i]`.
    ///
    /// The whole call is validated before anything is appended, so a usage
    /// error leaves the store unchanged.
    pub fn add(&mut self, vectors: Vec<Vec<f32>>, metadatas: Vec<RecordMeta>) -> Result<()> {
        if vectors.len() != metadatas.len() {
            return Err(Error::Usage(format!(
                "add() got {} vectors but {} metadata entries",
                vectors.len(),
                metadatas.len()
            )));
        }
        let Some(first) = vectors.first() else { return Ok(()) };
        let dim = self.dim.unwrap_or(first.len());
        if dim == 0 {
            return Err(Error::Usage("vectors must have at least one dimension".into()));
        }
        if let Some((i, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != dim) {
            return Err(Error::Usage(format!(
                "vector {} has dimensionality {} but the store holds {}-dimensional vectors",
                i,
                v.len(),
                dim
            )));
        }
        self.dim = Some(dim);
        self.vectors.extend(vectors);
        self.metadatas.extend(metadatas);
        debug!(records = self.len(), dim, "vector store extended");
        Ok(())
    }

    /// The `top_k` records most similar to `query`, best first.
    ///
    /// Equal scores keep insertion order. An empty store yields no results
    /// whatever the query.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<ScoredRecord>> {
        let Some(dim) = self.dim else { return Ok(Vec::new()) };
        if query.len() != dim {
            return Err(Error::Usage(format!(
                "query has dimensionality {} but the store holds {}-dimensional vectors",
                query.len(),
                dim
            )));
        }
        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, cosine_similarity(query, v)))
            .collect();
        // Stable sort: ties stay in insertion order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(i, score)| ScoredRecord { score, metadata: self.metadatas[i].clone() })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(chunk_id: usize, text: &str) -> RecordMeta { RecordMeta { chunk_id, text: text.to_string() } }

    #[test]
    fn empty_store_returns_nothing_for_any_k() {
        let store = InMemoryVectorStore::new();
        for k in [0, 1, 10] { assert!(store.search(&[1.0, 2.0], k).unwrap().is_empty()); }
    }

    #[test]
    fn mismatched_lengths_are_rejected_without_side_effects() {
        let mut store = InMemoryVectorStore::new();
        let err = store.add(vec![vec![1.0, 0.0]], vec![]).unwrap_err();
        assert!(matches!(err, Error::Usage(_)));
        assert!(store.is_empty());
        assert_eq!(store.dim(), None);
    }

    #[test]
    fn dimensionality_is_fixed_by_first_add() {
        let mut store = InMemoryVectorStore::new();
        store.add(vec![vec![1.0, 0.0, 0.0]], vec![meta(0, "a")]).unwrap();
        assert_eq!(store.dim(), Some(3));
        let err = store.add(vec![vec![1.0, 0.0]], vec![meta(1, "b")]).unwrap_err();
        assert!(matches!(err, Error::Usage(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn mixed_dimensions_in_one_call_are_rejected() {
        let mut store = InMemoryVectorStore::new();
        let err = store
            .add(vec![vec![1.0, 0.0], vec![1.0, 0.0, 0.0]], vec![meta(0, "a"), meta(1, "b")])
            .unwrap_err();
        assert!(matches!(err, Error::Usage(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut store = InMemoryVectorStore::new();
        store
            .add(
                vec![vec![0.0, 1.0], vec![2.0, 0.0], vec![1.0, 0.0], vec![3.0, 0.0]],
                vec![meta(0, "up"), meta(1, "first"), meta(2, "second"), meta(3, "third")],
            )
            .unwrap();
        let hits = store.search(&[1.0, 0.0], 3).unwrap();
        let texts: Vec<&str> = hits.iter().map(|h| h.metadata.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn zero_query_scores_zero_without_panicking() {
        let mut store = InMemoryVectorStore::new();
        store.add(vec![vec![1.0, 1.0]], vec![meta(0, "a")]).unwrap();
        let hits = store.search(&[0.0, 0.0], 1).unwrap();
        assert_eq!(hits[0].score, 0.0);
    }

    #[test]
    fn wrong_query_dimension_is_a_usage_error() {
        let mut store = InMemoryVectorStore::new();
        store.add(vec![vec![1.0, 1.0]], vec![meta(0, "a")]).unwrap();
        assert!(matches!(store.search(&[1.0], 1), Err(Error::Usage(_))));
    }
}
