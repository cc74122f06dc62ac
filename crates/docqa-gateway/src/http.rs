use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;

use docqa_core::config::GatewaySettings;
use docqa_core::error::{Error, Result};

/// Status and raw body of a completed HTTP exchange.
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

pub(crate) fn build_client(settings: &GatewaySettings) -> Result<Client> {
    let mut builder = Client::builder().timeout(Duration::from_secs(settings.timeout_secs));
    // Loopback gateways (local proxies, test servers) are never routed through HTTP_PROXY.
    if is_loopback(&settings.base_url) {
        builder = builder.no_proxy();
    }
    builder
        .build()
        .map_err(|e| Error::Transport(format!("failed to build HTTP client: {e}")))
}

fn is_loopback(base_url: &str) -> bool {
    reqwest::Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(|h| matches!(h, "localhost" | "127.0.0.1" | "[::1]" | "::1")))
        .unwrap_or(false)
}

/// `{base}/{model}:{method}`, accepting model names with or without the `models/` prefix.
pub(crate) fn endpoint(settings: &GatewaySettings, model: &str, method: &str) -> String {
    let base = settings.base_url.trim_end_matches('/');
    if model.starts_with("models/") {
        format!("{base}/{model}:{method}")
    } else {
        format!("{base}/models/{model}:{method}")
    }
}

pub(crate) fn post_json<P: Serialize + ?Sized>(client: &Client, url: &str, api_key: &str, payload: &P) -> Result<RawResponse> {
    let resp = client
        .post(url)
        .query(&[("key", api_key)])
        .json(payload)
        .send()
        .map_err(|e| Error::Transport(e.without_url().to_string()))?;
    let status = resp.status().as_u16();
    let body = resp.text().map_err(|e| Error::Transport(e.without_url().to_string()))?;
    Ok(RawResponse { status, body })
}
