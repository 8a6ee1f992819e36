use crate::config::LedgerConfig;
use crate::http_client::{build_client_with_timeout, summarize_error_body};
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use url::Url;

/// Body of one XP award. Field names are the ledger's wire names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AwardRequest {
    pub email: String,
    pub bot_id: String,
    pub xp_amount: u32,
    pub coin_amount: u32,
    pub reason: String,
}

/// Remote per-user, per-persona XP ledger.
///
/// Neither call raises: transport and remote failures come back as `None`.
/// `award` is not idempotent; repeated calls award repeatedly.
pub trait RewardLedger: Send + Sync {
    fn award<'a>(
        &'a self,
        request: &'a AwardRequest,
    ) -> Pin<Box<dyn Future<Output = Option<Value>> + Send + 'a>>;

    fn read_balance<'a>(
        &'a self,
        email: &'a str,
        persona_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<Value>> + Send + 'a>>;
}

pub struct HttpRewardLedger {
    base_url: Url,
    client: Client,
}

impl HttpRewardLedger {
    pub fn new(config: &LedgerConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| anyhow::anyhow!("invalid ledger base_url {}: {e}", config.base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("ledger base_url cannot be a base: {}", config.base_url);
        }
        Ok(Self {
            base_url,
            client: build_client_with_timeout(config.timeout())?,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn award_url(&self) -> Url {
        self.endpoint(&["award-xp"])
    }

    pub fn balance_url(&self, email: &str, persona_id: &str) -> Url {
        self.endpoint(&["user-xp-current", email, persona_id])
    }

    async fn post_award(&self, request: &AwardRequest) -> Option<Value> {
        let response = match self.client.post(self.award_url()).json(request).send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(
                    bot_id = request.bot_id.as_str(),
                    error = %error,
                    "failed to award XP"
                );
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                bot_id = request.bot_id.as_str(),
                status = status.as_u16(),
                body = %summarize_error_body(&body),
                "XP award rejected"
            );
            return None;
        }

        decode_json(response, "award").await
    }

    async fn get_balance(&self, email: &str, persona_id: &str) -> Option<Value> {
        let response = match self
            .client
            .get(self.balance_url(email, persona_id))
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(bot_id = persona_id, error = %error, "failed to fetch current XP");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            // Error bodies (`{"detail": ...}`) are passed through so the
            // reconciliation poller can tell "not visible yet" from "no data".
            tracing::debug!(
                bot_id = persona_id,
                status = status.as_u16(),
                "XP balance read returned non-success status"
            );
        }

        decode_json(response, "balance").await
    }
}

async fn decode_json(response: Response, call: &'static str) -> Option<Value> {
    match response.json::<Value>().await {
        Ok(body) => Some(body),
        Err(error) => {
            tracing::warn!(call, error = %error, "ledger returned undecodable body");
            None
        }
    }
}

impl RewardLedger for HttpRewardLedger {
    fn award<'a>(
        &'a self,
        request: &'a AwardRequest,
    ) -> Pin<Box<dyn Future<Output = Option<Value>> + Send + 'a>> {
        Box::pin(self.post_award(request))
    }

    fn read_balance<'a>(
        &'a self,
        email: &'a str,
        persona_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<Value>> + Send + 'a>> {
        Box::pin(self.get_balance(email, persona_id))
    }
}
