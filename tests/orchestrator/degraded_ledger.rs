use std::time::Duration;

use serde_json::{Value, json};

use novibe_activities::ledger::BalancePoller;

use crate::support::{Harness, RecordingAudit, Reply, ScriptedLedger, StubExecutor, request};

fn quick_poller() -> BalancePoller {
    BalancePoller::new(5, Duration::ZERO)
}

#[tokio::test]
async fn award_transport_failure_still_replies_with_single_read() {
    let h = Harness::with_poller(
        StubExecutor::new(Reply::Text("Here's your word!")),
        ScriptedLedger::new(None, vec![Some(json!({"detail": "User XP not found"}))]),
        RecordingAudit::new(),
        quick_poller(),
    );

    let envelope = h
        .orchestrator
        .clone()
        .respond(request("bot_mentor", "word_of_the_day"))
        .await;
    let body = serde_json::to_value(&envelope).unwrap();

    assert_eq!(body["reply"], "Here's your word!");
    assert_eq!(body["xp_award"], Value::Null);
    assert_eq!(body["xp_amount"], 3);
    assert_eq!(h.ledger.award_count(), 1);
    assert_eq!(h.ledger.read_count(), 1);
    assert_eq!(h.audit.append_count(), 1);
}

#[tokio::test]
async fn unconfirmed_award_is_not_polled() {
    let h = Harness::with_poller(
        StubExecutor::new(Reply::Text("ok")),
        ScriptedLedger::new(
            Some(json!({"success": false, "detail": "user not registered"})),
            vec![Some(json!({"detail": "User XP not found"}))],
        ),
        RecordingAudit::new(),
        quick_poller(),
    );

    let completion = h
        .orchestrator
        .complete(&request("bot_friend", "city_shuffle"))
        .await
        .unwrap();

    assert!(!completion.reward.succeeded);
    assert_eq!(
        completion.reward.ledger_response,
        Some(json!({"success": false, "detail": "user not registered"}))
    );
    assert_eq!(h.ledger.read_count(), 1);
}

#[tokio::test]
async fn unreachable_balance_yields_null_status() {
    let h = Harness::with_poller(
        StubExecutor::new(Reply::Text("ok")),
        ScriptedLedger::new(Some(json!({"success": true})), vec![None]),
        RecordingAudit::new(),
        quick_poller(),
    );

    let body = serde_json::to_value(
        h.orchestrator
            .clone()
            .respond(request("bot_friend", "city_shuffle"))
            .await,
    )
    .unwrap();

    assert_eq!(body["xp_status"], Value::Null);
    assert_eq!(body["xp_status_resolved"], false);
    assert_eq!(h.ledger.read_count(), 5);
}

#[tokio::test]
async fn audit_failure_does_not_change_envelope() {
    let run = |audit: RecordingAudit| async move {
        let h = Harness::with_poller(
            StubExecutor::new(Reply::Text("Here's your word!")),
            ScriptedLedger::converging_on(1, json!({"points": 15})),
            audit,
            quick_poller(),
        );
        let body = serde_json::to_value(
            h.orchestrator
                .clone()
                .respond(request("bot_mentor", "word_of_the_day"))
                .await,
        )
        .unwrap();
        (body, h.audit.append_count())
    };

    let (healthy, healthy_writes) = run(RecordingAudit::new()).await;
    let (degraded, degraded_writes) = run(RecordingAudit::failing()).await;

    assert_eq!(healthy, degraded);
    assert_eq!(healthy_writes, 1);
    assert_eq!(degraded_writes, 1);
}
