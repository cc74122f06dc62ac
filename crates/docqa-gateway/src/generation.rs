use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{debug, warn};

use docqa_core::config::GatewaySettings;
use docqa_core::error::{Error, Result};
use docqa_core::traits::GenerationGateway;

use crate::decode::decode_generation;
use crate::http::{build_client, endpoint, post_json};
use crate::retry::RetryPolicy;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// `generateContent` client with retry on 429/503.
pub struct GeminiGenerator {
    client: Client,
    url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl GeminiGenerator {
    pub fn new(settings: &GatewaySettings) -> Result<Self> {
        Self::with_model(settings, &settings.generation_model)
    }

    pub fn with_model(settings: &GatewaySettings, model: &str) -> Result<Self> {
        let api_key = settings.require_api_key()?.to_string();
        Ok(Self {
            client: build_client(settings)?,
            url: endpoint(settings, model, "generateContent"),
            api_key,
            retry: RetryPolicy::from_settings(settings),
        })
    }

    fn attempt(&self, prompt: &str) -> Result<String> {
        let payload = GenerateRequest { contents: [Content { parts: [Part { text: prompt }] }] };
        let resp = post_json(&self.client, &self.url, &self.api_key, &payload)?;
        if !resp.is_success() {
            warn!(status = resp.status, "generation request failed: {}", resp.body);
            return Err(Error::GenerationFailed { status: resp.status, body: resp.body });
        }
        Ok(decode_generation(&resp.body))
    }
}

impl GenerationGateway for GeminiGenerator {
    fn generate(&self, prompt: &str) -> Result<String> {
        debug!(prompt_chars = prompt.len(), "generate");
        self.retry.run(|_| self.attempt(prompt), std::thread::sleep)
    }
}
