#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};
use tokio::time::Instant;

use novibe_activities::activity::{ActivityOrchestrator, ActivityRequest, AuditRecord, TaskSpec};
use novibe_activities::agent::{AgentHandle, AgentOutput, Executor};
use novibe_activities::audit::AuditLog;
use novibe_activities::catalog::{
    CatalogResolver, ResolveError, ResolvedTask, TaskQuery, TaskResolver,
};
use novibe_activities::ledger::{AwardRequest, BalancePoller, RewardLedger};

pub fn request(persona: &str, activity: &str) -> ActivityRequest {
    ActivityRequest {
        persona_id: persona.into(),
        activity_id: activity.into(),
        user_input: "hi".into(),
        username: "alice".into(),
        email: "a@x.com".into(),
        history: Vec::new(),
    }
}

/// Builtin catalog resolver that counts calls.
pub struct CountingResolver {
    inner: CatalogResolver,
    pub calls: AtomicUsize,
}

impl CountingResolver {
    pub fn builtin() -> Self {
        Self {
            inner: CatalogResolver::builtin().unwrap(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl TaskResolver for CountingResolver {
    fn resolve(&self, query: &TaskQuery<'_>) -> Result<ResolvedTask, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(query)
    }
}

pub enum Reply {
    Text(&'static str),
    Structured(Value),
    Fail(&'static str),
}

pub struct StubExecutor {
    reply: Reply,
    pub calls: AtomicUsize,
    pub tasks: Mutex<Vec<TaskSpec>>,
}

impl StubExecutor {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Executor for StubExecutor {
    fn name(&self) -> &str {
        "stub"
    }

    fn execute<'a>(
        &'a self,
        task: &'a TaskSpec,
        _agent: &'a AgentHandle,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<AgentOutput>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tasks.lock().unwrap().push(task.clone());
        Box::pin(async move {
            match &self.reply {
                Reply::Text(text) => Ok(AgentOutput::from(*text)),
                Reply::Structured(value) => Ok(AgentOutput::Structured(value.clone())),
                Reply::Fail(message) => Err(anyhow::anyhow!("{message}")),
            }
        })
    }
}

/// Ledger whose award result and balance reads are scripted up front.
/// The last scripted read repeats once the script runs out.
pub struct ScriptedLedger {
    award_response: Option<Value>,
    reads: Mutex<Vec<Option<Value>>>,
    pub awards: Mutex<Vec<AwardRequest>>,
    pub read_at: Mutex<Vec<Instant>>,
}

impl ScriptedLedger {
    pub fn new(award_response: Option<Value>, reads: Vec<Option<Value>>) -> Self {
        Self {
            award_response,
            reads: Mutex::new(reads),
            awards: Mutex::new(Vec::new()),
            read_at: Mutex::new(Vec::new()),
        }
    }

    /// Awards succeed; balance converges on the given read (1-based).
    pub fn converging_on(read: usize, balance: Value) -> Self {
        let mut reads = vec![Some(json!({"detail": "User XP not found"})); read - 1];
        reads.push(Some(balance));
        Self::new(Some(json!({"success": true, "xp_awarded": 3})), reads)
    }

    pub fn award_count(&self) -> usize {
        self.awards.lock().unwrap().len()
    }

    pub fn read_count(&self) -> usize {
        self.read_at.lock().unwrap().len()
    }

    pub fn read_gaps(&self) -> Vec<Duration> {
        self.read_at
            .lock()
            .unwrap()
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .collect()
    }
}

impl RewardLedger for ScriptedLedger {
    fn award<'a>(
        &'a self,
        request: &'a AwardRequest,
    ) -> Pin<Box<dyn Future<Output = Option<Value>> + Send + 'a>> {
        self.awards.lock().unwrap().push(request.clone());
        let response = self.award_response.clone();
        Box::pin(async move { response })
    }

    fn read_balance<'a>(
        &'a self,
        _email: &'a str,
        _persona_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<Value>> + Send + 'a>> {
        self.read_at.lock().unwrap().push(Instant::now());
        let mut reads = self.reads.lock().unwrap();
        let next = if reads.len() > 1 {
            reads.remove(0)
        } else {
            reads.first().cloned().flatten()
        };
        Box::pin(async move { next })
    }
}

pub struct RecordingAudit {
    fail: bool,
    pub records: Mutex<Vec<AuditRecord>>,
}

impl RecordingAudit {
    pub fn new() -> Self {
        Self {
            fail: false,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn append_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl AuditLog for RecordingAudit {
    fn name(&self) -> &str {
        "recording"
    }

    fn append<'a>(
        &'a self,
        record: &'a AuditRecord,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        self.records.lock().unwrap().push(record.clone());
        let fail = self.fail;
        Box::pin(async move {
            if fail {
                anyhow::bail!("audit store unavailable");
            }
            Ok(())
        })
    }
}

/// Collaborators wired into an orchestrator, kept for call-count asserts.
pub struct Harness {
    pub resolver: Arc<CountingResolver>,
    pub executor: Arc<StubExecutor>,
    pub ledger: Arc<ScriptedLedger>,
    pub audit: Arc<RecordingAudit>,
    pub orchestrator: Arc<ActivityOrchestrator>,
}

impl Harness {
    pub fn new(executor: StubExecutor, ledger: ScriptedLedger, audit: RecordingAudit) -> Self {
        Self::with_poller(executor, ledger, audit, BalancePoller::default())
    }

    pub fn with_poller(
        executor: StubExecutor,
        ledger: ScriptedLedger,
        audit: RecordingAudit,
        poller: BalancePoller,
    ) -> Self {
        let resolver = Arc::new(CountingResolver::builtin());
        let executor = Arc::new(executor);
        let ledger = Arc::new(ledger);
        let audit = Arc::new(audit);
        let orchestrator = ActivityOrchestrator::new(
            Arc::clone(&resolver) as Arc<dyn TaskResolver>,
            Arc::clone(&executor) as Arc<dyn Executor>,
            Arc::clone(&ledger) as Arc<dyn RewardLedger>,
            Arc::clone(&audit) as Arc<dyn AuditLog>,
        )
        .with_poller(poller);
        Self {
            resolver,
            executor,
            ledger,
            audit,
            orchestrator: Arc::new(orchestrator),
        }
    }

    pub fn downstream_calls(&self) -> usize {
        self.executor.call_count()
            + self.ledger.award_count()
            + self.ledger.read_count()
            + self.audit.append_count()
    }
}
