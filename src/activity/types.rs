//! Request-scoped value objects for one activity completion.

use crate::error::ActivityError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound `/chat` body. Wire names follow the public API (`persona`,
/// `activity`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRequest {
    #[serde(rename = "persona")]
    pub persona_id: String,
    #[serde(rename = "activity")]
    pub activity_id: String,
    pub user_input: String,
    pub username: String,
    /// Empty means the user is unidentified.
    #[serde(default)]
    pub email: String,
    /// Prior dialogue lines, oldest first.
    #[serde(default)]
    pub history: Vec<String>,
}

impl ActivityRequest {
    pub fn validate(&self) -> Result<(), ActivityError> {
        if self.persona_id.trim().is_empty() {
            return Err(ActivityError::InvalidRequest("persona is required".into()));
        }
        if self.activity_id.trim().is_empty() {
            return Err(ActivityError::InvalidRequest("activity is required".into()));
        }
        Ok(())
    }

    pub fn is_identified(&self) -> bool {
        !self.email.trim().is_empty()
    }

    /// Reason string recorded with the XP award.
    pub fn reward_reason(&self) -> String {
        format!("Completed activity: {}", self.activity_id)
    }
}

/// Natural-language task plus the shape of the expected answer.
///
/// An empty description means the activity is not supported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub description: String,
    pub expected_output: String,
}

impl TaskSpec {
    pub fn new(description: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.description.trim().is_empty()
    }
}

/// Generated persona reply, already unwrapped to plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardOutcome {
    pub requested_amount: u32,
    pub ledger_response: Option<Value>,
    pub succeeded: bool,
}

impl RewardOutcome {
    pub fn from_response(requested_amount: u32, ledger_response: Option<Value>) -> Self {
        let succeeded = ledger_response
            .as_ref()
            .and_then(|body| body.get("success"))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Self {
            requested_amount,
            ledger_response,
            succeeded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub value: Option<Value>,
    pub resolved: bool,
    /// Reads performed to produce this snapshot.
    pub attempts: u32,
}

impl BalanceSnapshot {
    pub fn from_read(value: Option<Value>, attempts: u32) -> Self {
        let resolved = value.as_ref().is_some_and(balance_converged);
        Self {
            value,
            resolved,
            attempts,
        }
    }
}

/// A balance read has converged when it is a non-empty object without a
/// `detail` field. The ledger reports "not found yet" and other errors as
/// `{"detail": ...}`; this shape check is the only signal it offers.
pub fn balance_converged(body: &Value) -> bool {
    body.as_object()
        .is_some_and(|fields| !fields.is_empty() && !fields.contains_key("detail"))
}

/// One logged persona exchange. Field names match the audit table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub email: String,
    pub bot_id: String,
    pub user_message: String,
    pub bot_response: String,
    pub requested_time: DateTime<Utc>,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_name: Option<String>,
}

impl AuditRecord {
    pub fn capture(request: &ActivityRequest, reply: &str, platform: &str) -> Self {
        Self {
            email: request.email.clone(),
            bot_id: request.persona_id.clone(),
            user_message: request.user_input.clone(),
            bot_response: reply.to_string(),
            requested_time: Utc::now(),
            platform: platform.to_string(),
            activity_name: Some(request.activity_id.clone()).filter(|name| !name.is_empty()),
        }
    }
}

/// Successful pipeline result before it is shaped for the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityCompletion {
    pub reply: String,
    pub reward: RewardOutcome,
    pub balance: BalanceSnapshot,
}

/// `/chat` response body: exactly one of the two shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
    Completed {
        reply: String,
        xp_award: Option<Value>,
        xp_amount: u32,
        xp_status: Option<Value>,
        xp_status_resolved: bool,
    },
    Failed {
        error: String,
    },
}

impl ResponseEnvelope {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl From<ActivityCompletion> for ResponseEnvelope {
    fn from(completion: ActivityCompletion) -> Self {
        Self::Completed {
            reply: completion.reply,
            xp_award: completion.reward.ledger_response,
            xp_amount: completion.reward.requested_amount,
            xp_status: completion.balance.value,
            xp_status_resolved: completion.balance.resolved,
        }
    }
}

impl From<&ActivityError> for ResponseEnvelope {
    fn from(err: &ActivityError) -> Self {
        Self::failed(err.to_string())
    }
}
