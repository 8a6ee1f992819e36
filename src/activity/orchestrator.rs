use super::rewards::RewardCatalog;
use super::types::{
    ActivityCompletion, ActivityRequest, AuditRecord, BalanceSnapshot, RewardOutcome,
    ResponseEnvelope,
};
use crate::agent::{ChatCompletionsExecutor, Executor};
use crate::audit::{AuditLog, create_audit_log};
use crate::catalog::{CatalogResolver, ResolveError, TaskQuery, TaskResolver};
use crate::config::Config;
use crate::error::ActivityError;
use crate::ledger::{AwardRequest, BalancePoller, HttpRewardLedger, RewardLedger};
use anyhow::Context;
use std::sync::Arc;
use std::time::Instant;

pub const DEFAULT_PLATFORM: &str = "game_activity";

/// Drives one activity from resolution through the audit write.
///
/// Every collaborator is shared and immutable; requests never touch each
/// other's state.
pub struct ActivityOrchestrator {
    resolver: Arc<dyn TaskResolver>,
    executor: Arc<dyn Executor>,
    ledger: Arc<dyn RewardLedger>,
    audit: Arc<dyn AuditLog>,
    rewards: Arc<RewardCatalog>,
    poller: BalancePoller,
    platform: String,
}

impl ActivityOrchestrator {
    pub fn new(
        resolver: Arc<dyn TaskResolver>,
        executor: Arc<dyn Executor>,
        ledger: Arc<dyn RewardLedger>,
        audit: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            resolver,
            executor,
            ledger,
            audit,
            rewards: Arc::new(RewardCatalog::builtin()),
            poller: BalancePoller::default(),
            platform: DEFAULT_PLATFORM.to_string(),
        }
    }

    pub fn with_rewards(mut self, rewards: Arc<RewardCatalog>) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn with_poller(mut self, poller: BalancePoller) -> Self {
        self.poller = poller;
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Wire the production collaborators described by `config`.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let resolver = match config.catalog.path.as_deref() {
            Some(path) => CatalogResolver::load(&Config::expand_path(path))?,
            None => CatalogResolver::builtin().context("load builtin catalog")?,
        };
        let executor = ChatCompletionsExecutor::new(&config.provider)
            .context("create execution provider")?;
        let ledger = HttpRewardLedger::new(&config.ledger).context("create XP ledger client")?;
        let audit = create_audit_log(&config.audit).await?;

        tracing::info!(
            personas = resolver.persona_count(),
            provider = executor.name(),
            audit = audit.name(),
            "activity orchestrator ready"
        );

        Ok(Self::new(
            Arc::new(resolver),
            Arc::new(executor),
            Arc::new(ledger),
            audit,
        )
        .with_rewards(Arc::new(RewardCatalog::from_config(&config.rewards)))
        .with_poller(BalancePoller::from_config(&config.ledger))
        .with_platform(config.audit.platform.clone()))
    }

    pub fn rewards(&self) -> &Arc<RewardCatalog> {
        &self.rewards
    }

    /// Run the full pipeline for one request.
    ///
    /// Only resolution and execution can fail the request. Once a reply
    /// exists, ledger and audit trouble is logged and the reply is returned.
    pub async fn complete(
        &self,
        request: &ActivityRequest,
    ) -> Result<ActivityCompletion, ActivityError> {
        request.validate()?;
        let started = Instant::now();

        let query = TaskQuery {
            persona_id: &request.persona_id,
            activity_id: &request.activity_id,
            user_input: &request.user_input,
            history: &request.history,
            username: &request.username,
        };
        let resolved = self.resolver.resolve(&query).map_err(|err| match err {
            ResolveError::PersonaNotFound(id) => ActivityError::PersonaNotFound(id),
            ResolveError::Catalog(err) => ActivityError::Internal(err.to_string()),
        })?;
        if resolved.spec.is_empty() {
            return Err(ActivityError::UnsupportedActivity(
                request.activity_id.clone(),
            ));
        }

        let reply = self
            .executor
            .execute(&resolved.spec, &resolved.agent)
            .await
            .map_err(|err| {
                tracing::warn!(
                    bot_id = request.persona_id.as_str(),
                    activity = request.activity_id.as_str(),
                    executor = self.executor.name(),
                    error = %format!("{err:#}"),
                    "activity execution failed"
                );
                ActivityError::Execution(format!("{err:#}"))
            })?
            .into_result()
            .text;

        let xp_amount = self.rewards.lookup(&request.activity_id);
        let reward = self.award(request, xp_amount).await;
        let balance = self.reconcile(request, &reward).await;
        self.record(request, &reply).await;

        tracing::info!(
            bot_id = request.persona_id.as_str(),
            activity = request.activity_id.as_str(),
            xp_amount,
            xp_awarded = reward.succeeded,
            xp_resolved = balance.resolved,
            balance_reads = balance.attempts,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "activity completed"
        );

        Ok(ActivityCompletion {
            reply,
            reward,
            balance,
        })
    }

    /// Run `complete` on a detached task.
    ///
    /// A dropped caller does not cancel the award or the audit write, and a
    /// panic inside the pipeline becomes an `Internal` error.
    pub async fn complete_detached(
        self: Arc<Self>,
        request: ActivityRequest,
    ) -> Result<ActivityCompletion, ActivityError> {
        let handle = tokio::spawn(async move { self.complete(&request).await });
        match handle.await {
            Ok(result) => result,
            Err(join_err) => {
                tracing::error!(error = %join_err, "activity pipeline aborted");
                Err(ActivityError::Internal(if join_err.is_panic() {
                    "activity pipeline panicked".to_string()
                } else {
                    "activity pipeline cancelled".to_string()
                }))
            }
        }
    }

    /// Outermost boundary: always yields exactly one envelope shape.
    pub async fn respond(self: Arc<Self>, request: ActivityRequest) -> ResponseEnvelope {
        match self.complete_detached(request).await {
            Ok(completion) => completion.into(),
            Err(err) => ResponseEnvelope::from(&err),
        }
    }

    async fn award(&self, request: &ActivityRequest, xp_amount: u32) -> RewardOutcome {
        let award = AwardRequest {
            email: request.email.clone(),
            bot_id: request.persona_id.clone(),
            xp_amount,
            coin_amount: 0,
            reason: request.reward_reason(),
        };
        let outcome = RewardOutcome::from_response(xp_amount, self.ledger.award(&award).await);
        if !outcome.succeeded {
            tracing::warn!(
                bot_id = request.persona_id.as_str(),
                activity = request.activity_id.as_str(),
                xp_amount,
                "XP award not confirmed"
            );
        }
        outcome
    }

    async fn reconcile(&self, request: &ActivityRequest, reward: &RewardOutcome) -> BalanceSnapshot {
        let ledger = self.ledger.as_ref();
        if reward.succeeded {
            self.poller
                .reconcile(ledger, &request.email, &request.persona_id)
                .await
        } else {
            self.poller
                .read_once(ledger, &request.email, &request.persona_id)
                .await
        }
    }

    async fn record(&self, request: &ActivityRequest, reply: &str) {
        let record = AuditRecord::capture(request, reply, &self.platform);
        if let Err(err) = self.audit.append(&record).await {
            tracing::warn!(
                bot_id = request.persona_id.as_str(),
                audit = self.audit.name(),
                error = %format!("{err:#}"),
                "failed to write audit record"
            );
        }
    }
}
