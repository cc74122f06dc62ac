//! docqa-vector
//!
//! Append-only in-memory vector store with exhaustive cosine-similarity
//! search. One store holds the embedding parts of a single document.

pub mod similarity;
pub mod store;

pub use similarity::cosine_similarity;
pub use store::InMemoryVectorStore;
