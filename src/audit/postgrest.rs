use super::AuditLog;
use crate::activity::AuditRecord;
use crate::config::AuditConfig;
use crate::http_client::{build_client_with_timeout, summarize_error_body};
use anyhow::Context;
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Inserts records into a Supabase/PostgREST table.
pub struct PostgrestAuditLog {
    insert_url: String,
    api_key: String,
    client: Client,
}

impl PostgrestAuditLog {
    pub fn new(
        base_url: &str,
        api_key: &str,
        table: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        Ok(Self {
            insert_url: format!("{base_url}/rest/v1/{table}"),
            api_key: api_key.to_string(),
            client: build_client_with_timeout(timeout)?,
        })
    }

    pub fn from_config(config: &AuditConfig) -> anyhow::Result<Self> {
        let url = config.url.as_deref().context("audit.url is not set")?;
        let api_key = config.api_key.as_deref().context("audit.api_key is not set")?;
        Self::new(
            url,
            api_key,
            &config.table,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn insert_url(&self) -> &str {
        &self.insert_url
    }

    async fn insert(&self, record: &AuditRecord) -> anyhow::Result<()> {
        let response = self
            .client
            .post(&self.insert_url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .context("audit insert request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "audit insert rejected ({status}): {}",
                summarize_error_body(&body)
            );
        }
        Ok(())
    }
}

impl AuditLog for PostgrestAuditLog {
    fn name(&self) -> &str {
        "postgrest"
    }

    fn append<'a>(
        &'a self,
        record: &'a AuditRecord,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(self.insert(record))
    }
}
