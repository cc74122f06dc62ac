//! docqa-text
//!
//! Keyword-overlap retrieval over a document's chunks. Used when no
//! embedding gateway is configured or when embedding retrieval fails.

pub mod search;
pub mod tokenize;

pub use search::{keyword_score, KeywordRetriever, DEFAULT_TOP_N};
pub use tokenize::query_tokens;
