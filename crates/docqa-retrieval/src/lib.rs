//! docqa-retrieval
//!
//! Chooses which chunks reach the generation step. Embedding retrieval is
//! preferred; keyword overlap takes over when no embedder is configured or
//! the embedder fails. The `pipeline` module drives summarization and
//! question answering on top of it.

pub mod embedding;
pub mod pipeline;
pub mod prompts;
pub mod retriever;

pub use embedding::EmbeddingRetriever;
pub use pipeline::{answer, summarize, Answer, SummaryReport};
pub use prompts::SummaryMode;
pub use retriever::{format_contexts, Retrieval, Retriever};
