use serde_json::json;

use novibe_activities::ActivityError;
use novibe_activities::activity::ResponseEnvelope;

use crate::support::{Harness, RecordingAudit, Reply, ScriptedLedger, StubExecutor, request};

fn harness(reply: Reply) -> Harness {
    Harness::new(
        StubExecutor::new(reply),
        ScriptedLedger::converging_on(1, json!({"points": 15})),
        RecordingAudit::new(),
    )
}

#[tokio::test]
async fn unknown_persona_touches_nothing_downstream() {
    let h = harness(Reply::Text("never"));
    let err = h
        .orchestrator
        .complete(&request("bot_stranger", "word_of_the_day"))
        .await
        .unwrap_err();

    assert!(matches!(err, ActivityError::PersonaNotFound(ref id) if id == "bot_stranger"));
    assert_eq!(h.downstream_calls(), 0);
}

#[tokio::test]
async fn unknown_persona_envelope_has_only_error() {
    let h = harness(Reply::Text("never"));
    let envelope = h
        .orchestrator
        .clone()
        .respond(request("bot_stranger", "word_of_the_day"))
        .await;

    assert_eq!(
        serde_json::to_value(envelope).unwrap(),
        json!({"error": "Persona not found: bot_stranger"})
    );
}

#[tokio::test]
async fn unsupported_activity_touches_nothing_downstream() {
    let h = harness(Reply::Text("never"));
    let err = h
        .orchestrator
        .complete(&request("bot_friend", "interpretive_dance"))
        .await
        .unwrap_err();

    assert!(matches!(err, ActivityError::UnsupportedActivity(ref id) if id == "interpretive_dance"));
    assert_eq!(err.to_string(), "Activity not supported yet: interpretive_dance");
    assert_eq!(h.resolver.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(h.downstream_calls(), 0);
}

#[tokio::test]
async fn execution_failure_skips_reward_and_audit() {
    let h = harness(Reply::Fail("model overloaded"));
    let envelope = h
        .orchestrator
        .clone()
        .respond(request("bot_mentor", "word_of_the_day"))
        .await;

    assert!(envelope.is_error());
    let ResponseEnvelope::Failed { error } = envelope else {
        panic!("expected failure envelope");
    };
    assert!(error.contains("model overloaded"), "{error}");
    assert_eq!(h.executor.call_count(), 1);
    assert_eq!(h.ledger.award_count(), 0);
    assert_eq!(h.ledger.read_count(), 0);
    assert_eq!(h.audit.append_count(), 0);
}

#[tokio::test]
async fn blank_identifiers_rejected_before_resolution() {
    let h = harness(Reply::Text("never"));
    let err = h
        .orchestrator
        .complete(&request("", "word_of_the_day"))
        .await
        .unwrap_err();

    assert!(matches!(err, ActivityError::InvalidRequest(_)));
    assert!(err.is_client_error());
    assert_eq!(h.resolver.calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    assert_eq!(h.downstream_calls(), 0);
}
