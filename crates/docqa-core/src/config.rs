//! Layered settings loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `GOOGLE_API_KEY` + `APP_*` env vars into a typed [`Settings`] value that
//! is passed explicitly to the gateways and retrievers.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingSettings {
    /// Words per chunk (a rough proxy for model tokens).
    pub max_words: usize,
    /// Words shared by consecutive chunks.
    pub overlap: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self { max_words: 3000, overlap: 200 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalSettings {
    /// Parts per embedding request.
    pub embed_batch_size: usize,
    /// Character limit of a single embedding part.
    pub embed_max_chars: usize,
    /// Passages returned by embedding retrieval.
    pub top_k: usize,
    /// Passages returned by keyword retrieval.
    pub keyword_top_n: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self { embed_batch_size: 3, embed_max_chars: 600, top_k: 4, keyword_top_n: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub generation_model: String,
    pub embedding_model: String,
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            generation_model: "models/gemini-flash-latest".to_string(),
            embedding_model: "models/text-embedding-004".to_string(),
            timeout_secs: 60,
            max_attempts: 4,
            initial_backoff_ms: 1000,
        }
    }
}

impl GatewaySettings {
    /// The API key, or a configuration error naming both ways to provide it.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Configuration("missing API key (set GOOGLE_API_KEY or APP_GATEWAY__API_KEY)".into()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
    pub gateway: GatewaySettings,
    /// Swap the remote embedding gateway for the deterministic hashing embedder.
    #[serde(deserialize_with = "lenient_bool")]
    pub use_fake_embeddings: bool,
}

/// Accepts `true`/`false`, `1`/`0` and their string forms, case-insensitively,
/// so `APP_USE_FAKE_EMBEDDINGS=1` works as well as `=true`.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(1) => Ok(true),
        Flag::Int(0) => Ok(false),
        Flag::Int(n) => Err(de::Error::custom(format!("expected 0 or 1, found {n}"))),
        Flag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            other => Err(de::Error::custom(format!("expected true/false or 1/0, found '{other}'"))),
        },
    }
}

impl Settings {
    /// Load from the working directory, picking the environment from `RUST_ENV`.
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    /// Defaults, then `config.toml`, then `config.<env>.toml` from `dir`,
    /// then `GOOGLE_API_KEY`, then `APP_*` variables (`__` nests).
    pub fn load_from(dir: &Path, env_name: &str) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment
            .merge(Env::raw().only(&["GOOGLE_API_KEY"]).map(|_| "gateway.api_key".into()))
            .merge(Env::prefixed("APP_").split("__"));
        Self::from_figment(&figment)
    }

    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let settings: Settings = figment
            .extract()
            .map_err(|e| Error::Configuration(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("chunking.max_words", self.chunking.max_words),
            ("retrieval.embed_batch_size", self.retrieval.embed_batch_size),
            ("retrieval.embed_max_chars", self.retrieval.embed_max_chars),
            ("retrieval.top_k", self.retrieval.top_k),
            ("retrieval.keyword_top_n", self.retrieval.keyword_top_n),
        ];
        for (key, value) in positive {
            if value == 0 { return Err(Error::Configuration(format!("'{key}' must be positive"))); }
        }
        if self.gateway.max_attempts == 0 { return Err(Error::Configuration("'gateway.max_attempts' must be positive".into())); }
        if self.gateway.timeout_secs == 0 { return Err(Error::Configuration("'gateway.timeout_secs' must be positive".into())); }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
