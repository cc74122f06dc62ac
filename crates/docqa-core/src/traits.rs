use crate::error::{Error, Result};

/// Turns text into fixed-dimension vectors.
///
/// Implementations must return exactly one vector per input, in input order.
pub trait EmbeddingGateway: Send + Sync {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Single-input form: one string in, one vector out.
    fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| Error::UnknownEmbeddingResponseFormat("no vector returned for single input".into()))
    }
}

/// Prompt in, generated text out.
pub trait GenerationGateway: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String>;
}

impl<T: EmbeddingGateway + ?Sized> EmbeddingGateway for Box<T> {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> { (**self).embed_batch(texts) }
    fn embed_one(&self, text: &str) -> Result<Vec<f32>> { (**self).embed_one(text) }
}

impl<T: GenerationGateway + ?Sized> GenerationGateway for Box<T> {
    fn generate(&self, prompt: &str) -> Result<String> { (**self).generate(prompt) }
}
