use anyhow::Context;
use reqwest::Client;
use std::time::Duration;

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Build a pooled client whose every request is bounded by `timeout`.
pub fn build_client_with_timeout(timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .context("build HTTP client")
}

/// Collapse an upstream error body to one short line for logs and envelopes.
pub fn summarize_error_body(body: &str) -> String {
    let flattened = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.chars().count() <= MAX_ERROR_BODY_CHARS {
        return flattened;
    }
    let truncated: String = flattened.chars().take(MAX_ERROR_BODY_CHARS).collect();
    format!("{truncated}...")
}
