use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A required credential or setting is missing or out of range.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Generation failed: {status} {body}")]
    GenerationFailed { status: u16, body: String },

    #[error("Generation retries exhausted after {attempts} attempts")]
    GenerationRetriesExhausted { attempts: u32 },

    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Embedding failed: {status} {body}")]
    EmbeddingFailed { status: u16, body: String },

    #[error("Unknown embedding response format: {0}")]
    UnknownEmbeddingResponseFormat(String),

    /// Embedding retrieval cannot proceed; callers fall back to keyword retrieval.
    #[error("Embedding unavailable: {0}")]
    EmbeddingUnavailable(String),

    /// Programmer error at the call site (mismatched lengths, dimensions).
    #[error("Usage error: {0}")]
    Usage(String),
}

impl Error {
    /// Only rate limiting and temporary unavailability are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::GenerationFailed { status: 429 | 503, .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
